//! Integration tests for the ATM flow

use chrono::Utc;
use fabank::app::screens::{AtmArea, AtmScreen};
use fabank::app::AppEvent;
use fabank::config::{KioskConfig, ProcessingDelays};
use fabank::models::TxKind;
use fabank::util::money::format_balance;
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
async fn test_withdraw_end_to_end() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut atm = AtmArea::new(&fast_config());
    let starting = atm.balance();

    // main -> withdraw -> amount 100 -> confirm
    assert_eq!(atm.current_screen(), AtmScreen::Main);
    atm.go_to(AtmScreen::Withdraw);
    for c in "100".chars() {
        atm.push_digit(c);
    }
    atm.confirm(&tx);
    assert!(atm.is_processing());
    assert!(!atm.has_receipt());

    // processing completes -> receipt with the amount and new balance
    let event = rx.recv().await.expect("completion event");
    assert_eq!(event, AppEvent::AtmTransactionDone);
    let receipt = atm.complete_transaction(Utc::now()).expect("receipt");

    assert_eq!(receipt.kind, TxKind::Withdraw);
    assert_eq!(receipt.amount, 100.0);
    assert!(atm.has_receipt());
    assert_eq!(atm.amount(), "100");
    assert_eq!(
        format_balance(atm.balance()),
        format_balance(starting - 100.0)
    );

    // back to main clears the amount and hides the receipt
    atm.back_to_main();
    assert_eq!(atm.current_screen(), AtmScreen::Main);
    assert_eq!(atm.amount(), "");
    assert!(!atm.has_receipt());
}

#[tokio::test]
async fn test_withdraw_then_deposit_restores_balance() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut atm = AtmArea::new(&fast_config());
    let starting = atm.balance();

    atm.go_to(AtmScreen::Withdraw);
    for c in "375".chars() {
        atm.push_digit(c);
    }
    atm.confirm(&tx);
    rx.recv().await.expect("withdraw completion");
    atm.complete_transaction(Utc::now()).expect("withdraw receipt");
    atm.back_to_main();

    atm.go_to(AtmScreen::Deposit);
    for c in "375".chars() {
        atm.push_digit(c);
    }
    atm.confirm(&tx);
    rx.recv().await.expect("deposit completion");
    let receipt = atm.complete_transaction(Utc::now()).expect("deposit receipt");
    assert_eq!(receipt.kind, TxKind::Deposit);

    assert_eq!(format_balance(atm.balance()), format_balance(starting));
}

#[tokio::test]
async fn test_back_during_processing_cancels_the_transaction() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut atm = AtmArea::new(&fast_config());
    let starting = atm.balance();

    atm.go_to(AtmScreen::Withdraw);
    atm.push_digit('9');
    atm.confirm(&tx);
    atm.back_to_main();

    // The cancelled delay never delivers, and a stale completion
    // applied anyway must not move money
    let delivered =
        tokio::time::timeout(std::time::Duration::from_millis(100), rx.recv()).await;
    assert!(delivered.is_err());
    assert!(atm.complete_transaction(Utc::now()).is_none());
    assert_eq!(atm.balance(), starting);
}

#[tokio::test]
async fn test_confirm_without_amount_is_ignored() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut atm = AtmArea::new(&fast_config());

    atm.go_to(AtmScreen::Deposit);
    atm.confirm(&tx);
    assert!(!atm.is_processing());

    let delivered =
        tokio::time::timeout(std::time::Duration::from_millis(50), rx.recv()).await;
    assert!(delivered.is_err());
}
