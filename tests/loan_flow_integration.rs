//! Integration tests for the loan application flow

use chrono::Utc;
use fabank::app::screens::{LoanArea, LoanScreen};
use fabank::app::AppEvent;
use fabank::bank::loan::{self, fixed_decision};
use fabank::config::{KioskConfig, ProcessingDelays};
use fabank::models::ApplicationStatus;
use tokio::sync::mpsc;

fn fast_config() -> KioskConfig {
    KioskConfig::default().with_delays(ProcessingDelays {
        transaction_ms: 10,
        balance_ms: 10,
        decision_ms: 10,
        queue_ms: 10,
        chat_ms: 10,
    })
}

#[tokio::test]
async fn test_application_end_to_end_with_pinned_verdict() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut portal = LoanArea::new(&fast_config())
        .with_decision(fixed_decision(ApplicationStatus::Approved));

    // main -> apply -> personal loan at 5.9%
    portal.go_to(LoanScreen::ApplyLoan);
    portal.select_product(0);
    assert_eq!(portal.current_screen(), LoanScreen::LoanDetails);
    assert_eq!(portal.draft().rate, 5.9);

    // details: amount 10,000 over 36 months
    for c in "10000".chars() {
        portal.amount_input(c);
    }
    assert_eq!(portal.draft().amount, "10,000");
    let expected_monthly = loan::monthly_payment(10_000.0, 5.9, 36);
    assert!((portal.monthly_payment() - expected_monthly).abs() < 1e-9);

    portal.continue_to_personal_info();
    assert_eq!(portal.current_screen(), LoanScreen::PersonalInfo);

    for c in "Ama Mensah".chars() {
        portal.type_field(c);
    }
    assert_eq!(portal.draft().personal.full_name, "Ama Mensah");

    // submit -> verdict arrives after the processing delay
    portal.submit_application(&tx);
    assert!(portal.is_processing());

    let status = match rx.recv().await.expect("verdict event") {
        AppEvent::LoanDecided(status) => status,
        other => panic!("unexpected event: {:?}", other),
    };
    let application = portal
        .complete_decision(status, Utc::now())
        .expect("application record");

    assert_eq!(application.status, ApplicationStatus::Approved);
    assert_eq!(application.amount, 10_000.0);
    assert_eq!(application.term_months, 36);
    assert!((application.monthly_payment - expected_monthly).abs() < 1e-9);

    // the approved loan joined the table, and return-to-main clears the draft
    assert_eq!(portal.existing_loans()[0].status, "Pending Activation");
    portal.return_to_main();
    assert_eq!(portal.current_screen(), LoanScreen::Main);
    assert_eq!(portal.draft().amount, "");
    assert!(portal.draft().product.is_none());
    assert!(portal.draft().verdict.is_none());
}

#[tokio::test]
async fn test_each_pinned_outcome_is_reported() {
    for expected in [
        ApplicationStatus::Approved,
        ApplicationStatus::PendingReview,
        ApplicationStatus::ConditionallyApproved,
    ] {
        let (tx, mut rx) = mpsc::channel(8);
        let mut portal = LoanArea::new(&fast_config()).with_decision(fixed_decision(expected));

        portal.go_to(LoanScreen::ApplyLoan);
        portal.select_product(1);
        for c in "8000".chars() {
            portal.amount_input(c);
        }
        portal.continue_to_personal_info();
        portal.submit_application(&tx);

        let status = match rx.recv().await.expect("verdict event") {
            AppEvent::LoanDecided(status) => status,
            other => panic!("unexpected event: {:?}", other),
        };
        assert_eq!(status, expected);

        let application = portal
            .complete_decision(status, Utc::now())
            .expect("application record");
        assert_eq!(application.status, expected);

        // Only approvals extend the table
        let expected_rows = if expected == ApplicationStatus::Approved {
            4
        } else {
            3
        };
        assert_eq!(portal.existing_loans().len(), expected_rows);
    }
}

#[tokio::test]
async fn test_continue_gate_blocks_empty_and_zero_amounts() {
    let mut portal = LoanArea::new(&fast_config());

    portal.go_to(LoanScreen::ApplyLoan);
    portal.select_product(0);

    portal.continue_to_personal_info();
    assert_eq!(portal.current_screen(), LoanScreen::LoanDetails);

    portal.amount_input('0');
    assert!(!portal.can_continue());
    portal.continue_to_personal_info();
    assert_eq!(portal.current_screen(), LoanScreen::LoanDetails);

    portal.amount_input('9');
    assert!(portal.can_continue());
    portal.continue_to_personal_info();
    assert_eq!(portal.current_screen(), LoanScreen::PersonalInfo);
}
