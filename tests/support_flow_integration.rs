//! Integration tests for the customer-service desk

use fabank::app::screens::SupportDesk;
use fabank::app::AppEvent;
use fabank::config::{KioskConfig, ProcessingDelays};
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
async fn test_scripted_chat_conversation() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut desk = SupportDesk::new(&fast_config());

    for c in "what is the dollar rate?".chars() {
        desk.type_message(c);
    }
    desk.send_message(&tx);

    let reply = match rx.recv().await.expect("chat reply") {
        AppEvent::ChatReply(text) => text,
        other => panic!("unexpected event: {:?}", other),
    };
    desk.complete_chat_reply(reply);

    let last = desk.messages().last().expect("bot reply");
    assert!(!last.from_user);
    assert!(last.text.contains("1 USD = GHC 14.50"));
}

#[tokio::test]
async fn test_new_message_supersedes_pending_reply() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut desk = SupportDesk::new(&fast_config());

    for c in "balance".chars() {
        desk.type_message(c);
    }
    desk.send_message(&tx);

    // A second send before the first reply lands supersedes it
    for c in "thank you".chars() {
        desk.type_message(c);
    }
    desk.send_message(&tx);

    let reply = match rx.recv().await.expect("chat reply") {
        AppEvent::ChatReply(text) => text,
        other => panic!("unexpected event: {:?}", other),
    };
    assert!(reply.starts_with("You're welcome"));

    let extra = tokio::time::timeout(std::time::Duration::from_millis(100), rx.recv()).await;
    assert!(extra.is_err(), "superseded reply must not be delivered");
}

#[tokio::test]
async fn test_queue_after_agent_request() {
    let (tx, mut rx) = mpsc::channel(8);
    let mut desk = SupportDesk::new(&fast_config());

    for c in "I want to talk to a representative".chars() {
        desk.type_message(c);
    }
    desk.send_message(&tx);

    let reply = match rx.recv().await.expect("chat reply") {
        AppEvent::ChatReply(text) => text,
        other => panic!("unexpected event: {:?}", other),
    };
    assert!(reply.contains("virtual queue"));
    desk.complete_chat_reply(reply);

    desk.join_queue(&tx);
    let slot = match rx.recv().await.expect("queue assignment") {
        AppEvent::QueueAssigned(slot) => slot,
        other => panic!("unexpected event: {:?}", other),
    };
    desk.complete_queue(slot);

    let assigned = desk.queue_slot().expect("assigned slot");
    assert!((1..=5).contains(&assigned.position));
    assert!((5..=14).contains(&assigned.wait_minutes));
}

#[test]
fn test_callback_scheduling_gates_and_confirms() {
    let mut desk = SupportDesk::new(&fast_config());
    desk.open_scheduler();

    // Submitting with nothing chosen is a no-op
    desk.submit_schedule();
    assert!(desk.notification().is_none());

    desk.move_date(true);
    desk.move_date(true);
    desk.move_time(true);
    assert!(desk.can_submit_schedule());
    desk.submit_schedule();

    assert_eq!(
        desk.notification(),
        Some("Your call has been scheduled successfully!")
    );
    let confirmation = desk.messages().last().expect("confirmation message");
    assert!(confirmation.text.contains("Sunday, May 11"));
    assert!(confirmation.text.contains("9:00 AM"));
}
