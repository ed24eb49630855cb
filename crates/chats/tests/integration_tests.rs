//! Integration tests for the chats crate.

use std::time::Duration;

use chamapay_chats::services::reply_service::{
    BALANCE_REPLY, FALLBACK_REPLY, GREETING_REPLY, HELP_REPLY, SENT_REPLY,
};
use chamapay_chats::{resolve, ChatEvent, ConversationController, EntryOrigin, SessionRegistry};

const DELAY: Duration = Duration::from_millis(1200);

#[tokio::test(start_paused = true)]
async fn hello_round_trip_adds_user_and_bot_entry() {
    let controller = ConversationController::with_default_resolver(DELAY);
    let before = controller.len().await;

    controller.submit("hello").await.expect("accepted");
    tokio::time::sleep(DELAY + Duration::from_millis(1)).await;

    let entries = controller.entries().await;
    assert_eq!(entries.len(), before + 2);

    let last = entries.last().expect("bot reply");
    assert_eq!(last.origin(), EntryOrigin::Bot);
    assert_eq!(last.text(), GREETING_REPLY);
}

#[tokio::test(start_paused = true)]
async fn reply_uses_the_trimmed_submission() {
    let controller = ConversationController::with_default_resolver(DELAY);
    let mut events = controller.subscribe();

    controller.submit("   What is my BALANCE?   ").await.expect("accepted");

    let mut texts = Vec::new();
    for _ in 0..2 {
        if let ChatEvent::EntryAppended { entry, .. } = events.recv().await.expect("event") {
            texts.push(entry.text().to_string());
        }
    }

    assert_eq!(texts, vec!["What is my BALANCE?", BALANCE_REPLY]);
}

#[tokio::test(start_paused = true)]
async fn closing_a_screen_mid_reply_leaves_its_log_untouched() {
    let registry = SessionRegistry::with_default_resolver(DELAY);
    let controller = registry.open().await;

    controller.submit("help").await.expect("accepted");
    tokio::time::sleep(DELAY / 2).await;
    registry.close(&controller.id()).await.expect("closed");
    tokio::time::sleep(DELAY * 3).await;

    let entries = controller.entries().await;
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|entry| entry.text() != HELP_REPLY));
}

#[test]
fn resolver_rules_follow_documented_precedence() {
    let cases = [
        ("SENT", SENT_REPLY),
        ("I sent it", SENT_REPLY),
        ("I sent it, what's my balance?", SENT_REPLY),
        ("balance", BALANCE_REPLY),
        ("Hi", GREETING_REPLY),
        ("support", HELP_REPLY),
        ("xyz123", FALLBACK_REPLY),
    ];

    for (input, expected) in cases {
        assert_eq!(resolve(input).as_deref(), Some(expected), "input: {input}");
    }
}
