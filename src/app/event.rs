//! Completion events delivered by processing timers
//!
//! Every synthetic delay ends in one of these, sent over the app's
//! event channel and applied on the next loop tick.

use crate::bank::support::QueueSlot;
use crate::models::ApplicationStatus;

/// Deferred outcome of a kiosk action
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// ATM withdraw/deposit finished processing
    AtmTransactionDone,
    /// ATM balance retrieval finished
    AtmBalanceReady,
    /// Loan application verdict is ready
    LoanDecided(ApplicationStatus),
    /// Chat bot reply is ready to display
    ChatReply(String),
    /// Virtual-queue position was assigned
    QueueAssigned(QueueSlot),
}
