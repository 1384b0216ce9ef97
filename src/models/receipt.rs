//! Session record data models
//!
//! Contains the serializable records a kiosk session produces: ATM
//! transaction receipts and loan applications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::money::format_balance;

/// ATM transaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    Withdraw,
    Deposit,
}

impl TxKind {
    /// Get a human-readable description of the transaction kind
    pub fn description(&self) -> &'static str {
        match self {
            TxKind::Withdraw => "Cash Withdrawal",
            TxKind::Deposit => "Cash Deposit",
        }
    }
}

/// Receipt for one completed ATM transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Timestamp when the transaction completed
    pub timestamp: DateTime<Utc>,
    /// Transaction kind
    pub kind: TxKind,
    /// Transaction amount
    pub amount: f64,
    /// Account balance after the transaction
    pub balance_after: f64,
}

impl TransactionReceipt {
    pub fn new(timestamp: DateTime<Utc>, kind: TxKind, amount: f64, balance_after: f64) -> Self {
        Self {
            timestamp,
            kind,
            amount,
            balance_after,
        }
    }

    /// Get a one-line summary of the receipt
    pub fn summary(&self, currency: &str) -> String {
        format!(
            "{} - {} - {}{} - balance {}{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.kind.description(),
            currency,
            format_balance(self.amount),
            currency,
            format_balance(self.balance_after),
        )
    }
}

/// Outcome of a submitted loan application
///
/// The kiosk picks one of these three at random; the choice is a demo
/// stand-in, not underwriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Approved,
    PendingReview,
    ConditionallyApproved,
}

impl ApplicationStatus {
    /// Headline shown on the verdict screen
    pub fn headline(&self) -> &'static str {
        match self {
            ApplicationStatus::Approved => "Application Approved!",
            ApplicationStatus::PendingReview => "Application Under Review",
            ApplicationStatus::ConditionallyApproved => "Conditionally Approved",
        }
    }

    /// Explanatory copy shown under the headline
    pub fn detail(&self) -> &'static str {
        match self {
            ApplicationStatus::Approved => {
                "Congratulations! Your loan application has been approved. \
                 The funds will be deposited into your account within 3-5 business days."
            }
            ApplicationStatus::PendingReview => {
                "Your application has been submitted and is being reviewed by our team. \
                 This typically takes 1-2 business days."
            }
            ApplicationStatus::ConditionallyApproved => {
                "Your application is conditionally approved. We need some additional \
                 documentation to finalize your loan. Check your email for details."
            }
        }
    }
}

/// Record of one submitted loan application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    /// Timestamp when the verdict was issued
    pub timestamp: DateTime<Utc>,
    /// Generated reference id, e.g. APP-493172
    pub reference: String,
    /// Product name, e.g. "Personal Loan"
    pub product: String,
    /// Requested principal
    pub amount: f64,
    /// Term in months
    pub term_months: u32,
    /// Annual interest rate in percent
    pub rate: f64,
    /// Estimated monthly payment at submission time
    pub monthly_payment: f64,
    /// Verdict
    pub status: ApplicationStatus,
}

/// One entry in the persisted session history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HistoryEntry {
    Transaction(TransactionReceipt),
    Loan(LoanApplication),
}

impl HistoryEntry {
    /// Timestamp of the underlying record
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            HistoryEntry::Transaction(receipt) => receipt.timestamp,
            HistoryEntry::Loan(application) => application.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_receipt() -> TransactionReceipt {
        TransactionReceipt::new(Utc::now(), TxKind::Withdraw, 100.0, 2447.63)
    }

    #[test]
    fn test_receipt_summary() {
        let summary = sample_receipt().summary("GHC");
        assert!(summary.contains("Cash Withdrawal"));
        assert!(summary.contains("GHC100.00"));
        assert!(summary.contains("GHC2,447.63"));
    }

    #[test]
    fn test_history_entry_serde_round_trip() {
        let entry = HistoryEntry::Transaction(sample_receipt());
        let json = serde_json::to_string(&entry).expect("serialize");
        let back: HistoryEntry = serde_json::from_str(&json).expect("deserialize");

        match back {
            HistoryEntry::Transaction(receipt) => {
                assert_eq!(receipt.kind, TxKind::Withdraw);
                assert_eq!(receipt.amount, 100.0);
            }
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_status_copy_is_distinct() {
        let statuses = [
            ApplicationStatus::Approved,
            ApplicationStatus::PendingReview,
            ApplicationStatus::ConditionallyApproved,
        ];
        for status in statuses {
            assert!(!status.headline().is_empty());
            assert!(!status.detail().is_empty());
        }
        assert_ne!(
            ApplicationStatus::Approved.headline(),
            ApplicationStatus::PendingReview.headline()
        );
    }
}
