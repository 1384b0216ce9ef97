//! Simulated banking domain
//!
//! Everything here is demo data and demo math: a local account with a
//! seeded statement, the loan product table with amortization, and
//! the scripted customer-service desk. Nothing talks to a backend.

pub mod account;
pub mod loan;
pub mod support;
