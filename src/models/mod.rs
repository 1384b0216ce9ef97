//! Data models for session records

pub mod receipt;

pub use receipt::{
    ApplicationStatus, HistoryEntry, LoanApplication, TransactionReceipt, TxKind,
};
