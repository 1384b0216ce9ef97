//! Demo account state
//!
//! Holds the kiosk session's balance and the seeded mini-statement.
//! Withdrawals are allowed to push the balance negative, as the demo
//! ATM has no overdraft rule.

/// One line of the mini-statement, preformatted for display
#[derive(Debug, Clone)]
pub struct StatementEntry {
    pub date: String,
    pub description: String,
    pub amount: String,
}

impl StatementEntry {
    fn new(date: &str, description: &str, amount: &str) -> Self {
        Self {
            date: date.to_string(),
            description: description.to_string(),
            amount: amount.to_string(),
        }
    }

    /// Whether the entry credits the account
    pub fn is_credit(&self) -> bool {
        self.amount.starts_with('+')
    }
}

/// In-memory demo account
#[derive(Debug, Clone)]
pub struct Account {
    balance: f64,
    statement: Vec<StatementEntry>,
}

impl Account {
    /// Create an account with the given opening balance and no history
    pub fn new(opening_balance: f64) -> Self {
        Self {
            balance: opening_balance,
            statement: Vec::new(),
        }
    }

    /// Create the demo account with the seeded recent transactions
    pub fn with_demo_statement(opening_balance: f64, currency: &str) -> Self {
        let statement = vec![
            StatementEntry::new("05/08/25", "Grocery Store", &format!("-{}82.45", currency)),
            StatementEntry::new("05/06/25", "Salary Deposit", &format!("+{}1,950.00", currency)),
            StatementEntry::new("05/05/25", "Gas Station", &format!("-{}45.28", currency)),
            StatementEntry::new("05/03/25", "ATM Withdrawal", &format!("-{}100.00", currency)),
            StatementEntry::new(
                "05/01/25",
                "Monthly Subscription",
                &format!("-{}14.99", currency),
            ),
        ];

        Self {
            balance: opening_balance,
            statement,
        }
    }

    /// Current balance
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Debit the account, returning the new balance
    pub fn withdraw(&mut self, amount: f64) -> f64 {
        self.balance -= amount;
        self.balance
    }

    /// Credit the account, returning the new balance
    pub fn deposit(&mut self, amount: f64) -> f64 {
        self.balance += amount;
        self.balance
    }

    /// Recent transactions for the mini-statement screen
    pub fn statement(&self) -> &[StatementEntry] {
        &self.statement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdraw_and_deposit() {
        let mut account = Account::new(2547.63);

        assert_eq!(account.withdraw(100.0), 2447.63);
        assert_eq!(account.deposit(50.0), 2497.63);
    }

    #[test]
    fn test_withdraw_deposit_round_trip() {
        let mut account = Account::new(2547.63);
        let before = account.balance();

        account.withdraw(123.0);
        account.deposit(123.0);

        assert!((account.balance() - before).abs() < 0.005);
    }

    #[test]
    fn test_overdraft_is_permitted() {
        let mut account = Account::new(50.0);
        assert_eq!(account.withdraw(80.0), -30.0);
    }

    #[test]
    fn test_demo_statement_is_seeded() {
        let account = Account::with_demo_statement(2547.63, "GHC");
        assert_eq!(account.statement().len(), 5);
        assert!(account.statement()[1].is_credit());
        assert_eq!(account.statement()[1].description, "Salary Deposit");
        assert!(account.statement()[0].amount.contains("GHC"));
    }
}
