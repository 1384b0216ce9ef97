//! Kiosk screen components
//!
//! Each component owns its flow controller and form draft; rendering
//! is layered on top of the same methods the tests drive.

pub mod atm;
pub mod game;
pub mod home;
pub mod loan;
pub mod support;

pub use atm::{AtmArea, AtmScreen};
pub use game::{GameLevel, TransferGame};
pub use home::{HomeEntry, HomeScreen};
pub use loan::{LoanArea, LoanScreen};
pub use support::{SupportDesk, SupportTab};
