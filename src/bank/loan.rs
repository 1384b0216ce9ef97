//! Loan products and amortization math
//!
//! The product table and rates mirror the bank's demo catalogue. The
//! application verdict is a uniform random pick over three outcomes,
//! kept behind an injectable strategy so tests can pin it.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::models::ApplicationStatus;

/// Loan terms offered on the details and calculator screens, in months
pub const TERM_CHOICES: [u32; 6] = [12, 24, 36, 48, 60, 72];

/// Default term preselected when entering the loan flow
pub const DEFAULT_TERM_MONTHS: u32 = 36;

/// One entry of the loan product catalogue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanProduct {
    pub id: &'static str,
    pub name: &'static str,
    pub blurb: &'static str,
    pub min_amount: u64,
    pub max_amount: u64,
    /// Base annual rate in percent
    pub base_rate: f64,
}

const PRODUCTS: [LoanProduct; 4] = [
    LoanProduct {
        id: "personal",
        name: "Personal Loan",
        blurb: "For personal expenses, debt consolidation, or unexpected costs",
        min_amount: 1_000,
        max_amount: 50_000,
        base_rate: 5.9,
    },
    LoanProduct {
        id: "auto",
        name: "Auto Loan",
        blurb: "Finance a new or used vehicle with competitive rates",
        min_amount: 5_000,
        max_amount: 100_000,
        base_rate: 4.5,
    },
    LoanProduct {
        id: "home",
        name: "Home Loan",
        blurb: "Purchase or refinance your home with flexible terms",
        min_amount: 50_000,
        max_amount: 1_000_000,
        base_rate: 3.8,
    },
    LoanProduct {
        id: "business",
        name: "Business Loan",
        blurb: "Support your business growth and operations",
        min_amount: 10_000,
        max_amount: 500_000,
        base_rate: 6.2,
    },
];

/// The full product catalogue
pub fn products() -> &'static [LoanProduct] {
    &PRODUCTS
}

/// Look up a product by its id
pub fn product_by_id(id: &str) -> Option<&'static LoanProduct> {
    PRODUCTS.iter().find(|product| product.id == id)
}

/// Standard amortized monthly payment
///
/// `annual_rate` is in percent. Returns 0 when the principal, rate,
/// or term make the formula meaningless.
///
/// # Examples
/// ```
/// use fabank::bank::loan::monthly_payment;
///
/// let monthly = monthly_payment(10_000.0, 5.9, 36);
/// assert!((monthly - 303.77).abs() < 0.01);
/// assert_eq!(monthly_payment(10_000.0, 0.0, 36), 0.0);
/// ```
pub fn monthly_payment(principal: f64, annual_rate: f64, term_months: u32) -> f64 {
    if principal <= 0.0 || annual_rate <= 0.0 || term_months == 0 {
        return 0.0;
    }

    let monthly_rate = annual_rate / 100.0 / 12.0;
    let growth = (1.0 + monthly_rate).powi(term_months as i32);
    (principal * growth * monthly_rate) / (growth - 1.0)
}

/// Total amount repaid over the life of the loan
pub fn total_repayment(monthly: f64, term_months: u32) -> f64 {
    if monthly <= 0.0 {
        return 0.0;
    }
    monthly * term_months as f64
}

/// Interest paid over the life of the loan
pub fn total_interest(monthly: f64, term_months: u32, principal: f64) -> f64 {
    if monthly <= 0.0 {
        return 0.0;
    }
    monthly * term_months as f64 - principal
}

/// Whether the details screen may advance to personal information
pub fn can_continue(amount: &str) -> bool {
    crate::util::money::parse_amount(amount) > 0.0
}

/// Verdict source for submitted applications
pub type DecisionStrategy = Box<dyn FnMut() -> ApplicationStatus + Send>;

/// The demo verdict: one of three outcomes, uniformly at random
pub fn uniform_decision(mut rng: SmallRng) -> DecisionStrategy {
    const OUTCOMES: [ApplicationStatus; 3] = [
        ApplicationStatus::Approved,
        ApplicationStatus::PendingReview,
        ApplicationStatus::ConditionallyApproved,
    ];

    Box::new(move || OUTCOMES[rng.gen_range(0..OUTCOMES.len())])
}

/// A strategy that always returns `status`, for tests and demos
pub fn fixed_decision(status: ApplicationStatus) -> DecisionStrategy {
    Box::new(move || status)
}

/// Generate an application reference, e.g. APP-493172
pub fn application_reference<R: Rng>(rng: &mut R) -> String {
    format!("APP-{}", rng.gen_range(100_000..1_000_000))
}

/// Generate a loan account id, e.g. L2025-4821
pub fn loan_id<R: Rng>(rng: &mut R, year: i32) -> String {
    format!("L{}-{}", year, rng.gen_range(1_000..10_000))
}

/// One row of the My Loans table, preformatted for display
#[derive(Debug, Clone)]
pub struct ExistingLoan {
    pub id: String,
    pub kind: String,
    pub amount: String,
    pub rate: String,
    pub remaining: String,
    pub status: String,
}

impl ExistingLoan {
    pub fn new(id: &str, kind: &str, amount: &str, rate: &str, remaining: &str, status: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            amount: amount.to_string(),
            rate: rate.to_string(),
            remaining: remaining.to_string(),
            status: status.to_string(),
        }
    }
}

/// Seeded loans shown on the My Loans screen
pub fn demo_loans(currency: &str) -> Vec<ExistingLoan> {
    vec![
        ExistingLoan::new(
            "L2023-5671",
            "Auto Loan",
            &format!("{}18,450.00", currency),
            "4.5%",
            &format!("{}12,382.45", currency),
            "Active",
        ),
        ExistingLoan::new(
            "L2022-9834",
            "Personal Loan",
            &format!("{}5,000.00", currency),
            "7.2%",
            &format!("{}1,842.10", currency),
            "Active",
        ),
        ExistingLoan::new(
            "L2020-6723",
            "Home Loan",
            &format!("{}320,000.00", currency),
            "3.1%",
            &format!("{}275,690.33", currency),
            "Active",
        ),
    ]
}
