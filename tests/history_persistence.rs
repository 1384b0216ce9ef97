//! Integration tests for session history persistence

use chrono::Utc;
use fabank::config::persistence::HistoryStore;
use fabank::models::{
    ApplicationStatus, HistoryEntry, LoanApplication, TransactionReceipt, TxKind,
};

fn sample_receipt() -> HistoryEntry {
    HistoryEntry::Transaction(TransactionReceipt::new(
        Utc::now(),
        TxKind::Withdraw,
        100.0,
        2447.63,
    ))
}

fn sample_application() -> HistoryEntry {
    HistoryEntry::Loan(LoanApplication {
        timestamp: Utc::now(),
        reference: "APP-123456".to_string(),
        product: "Personal Loan".to_string(),
        amount: 10_000.0,
        term_months: 36,
        rate: 5.9,
        monthly_payment: 303.77,
        status: ApplicationStatus::Approved,
    })
}

#[test]
fn test_mixed_history_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = HistoryStore::with_path(dir.path().join("history.json"));

    store.append_entry(sample_receipt()).expect("append receipt");
    store
        .append_entry(sample_application())
        .expect("append application");

    let entries = store.load_entries().expect("reload");
    assert_eq!(entries.len(), 2);
    assert!(entries[0].timestamp() <= entries[1].timestamp());

    match &entries[0] {
        HistoryEntry::Transaction(receipt) => {
            assert_eq!(receipt.kind, TxKind::Withdraw);
            assert_eq!(receipt.amount, 100.0);
        }
        other => panic!("unexpected first entry: {:?}", other),
    }

    match &entries[1] {
        HistoryEntry::Loan(application) => {
            assert_eq!(application.status, ApplicationStatus::Approved);
            assert_eq!(application.reference, "APP-123456");
        }
        other => panic!("unexpected second entry: {:?}", other),
    }
}

#[test]
fn test_history_survives_reopening_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history.json");

    {
        let store = HistoryStore::with_path(path.clone());
        store.append_entry(sample_receipt()).expect("append");
    }

    let reopened = HistoryStore::with_path(path);
    assert_eq!(reopened.count_entries().expect("count"), 1);
}

#[test]
fn test_corrupt_history_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history.json");
    std::fs::write(&path, "not json at all").expect("write garbage");

    let store = HistoryStore::with_path(path);
    assert!(store.load_entries().is_err());
}
