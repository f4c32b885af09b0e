use std::sync::Once;

use ragchat_core::{
    source_welcome, update, AppState, ChatPhase, ChatTurn, ConversationSnapshot, Effect, Msg,
    GENERIC_WELCOME,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

fn snapshot_for(source: &str) -> ConversationSnapshot {
    ConversationSnapshot {
        source: Some(source.to_string()),
        turns: vec![
            ChatTurn::system(source_welcome(source)),
            ChatTurn::user("What is 2wrap?"),
            ChatTurn::assistant("2wrap is a gifting platform."),
        ],
    }
}

#[test]
fn matching_source_adopts_persisted_turns() {
    init_logging();
    let snapshot = snapshot_for("https://example.com");

    let (state, effects) = update(
        AppState::new(),
        Msg::RestoreConversation {
            source: Some("https://example.com".to_string()),
            snapshot: Some(snapshot.clone()),
        },
    );

    assert_eq!(state.conversation_snapshot(), snapshot);
    assert_eq!(state.view().phase, ChatPhase::SourceActive);
    assert!(effects.is_empty());
}

#[test]
fn normalized_source_variants_still_match() {
    init_logging();
    let snapshot = snapshot_for("https://example.com/");

    let (state, _effects) = update(
        AppState::new(),
        Msg::RestoreConversation {
            source: Some("HTTPS://EXAMPLE.COM".to_string()),
            snapshot: Some(snapshot.clone()),
        },
    );

    assert_eq!(state.view().message_count, 3);
    assert_eq!(
        state.view().active_source.as_deref(),
        Some("https://example.com/")
    );
}

#[test]
fn mismatching_source_discards_persisted_turns() {
    init_logging();
    let snapshot = snapshot_for("https://a.example.com");

    let (state, effects) = update(
        AppState::new(),
        Msg::RestoreConversation {
            source: Some("https://b.example.com".to_string()),
            snapshot: Some(snapshot),
        },
    );
    let view = state.view();

    assert_eq!(view.message_count, 1);
    assert_eq!(view.turns[0].text, source_welcome("https://b.example.com"));
    assert_eq!(view.phase, ChatPhase::SourceActive);
    assert_eq!(effects, vec![Effect::PersistConversation]);
}

#[test]
fn missing_snapshot_with_source_shows_fresh_welcome() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::RestoreConversation {
            source: Some("https://example.com".to_string()),
            snapshot: None,
        },
    );
    let view = state.view();

    assert_eq!(view.message_count, 1);
    assert_eq!(view.turns[0].text, source_welcome("https://example.com"));
    assert_eq!(effects, vec![Effect::PersistConversation]);
}

#[test]
fn no_requested_source_shows_generic_welcome() {
    init_logging();
    let snapshot = snapshot_for("https://example.com");

    let (state, effects) = update(
        AppState::new(),
        Msg::RestoreConversation {
            source: None,
            snapshot: Some(snapshot),
        },
    );
    let view = state.view();

    assert_eq!(view.message_count, 1);
    assert_eq!(view.turns[0].text, GENERIC_WELCOME);
    assert_eq!(view.phase, ChatPhase::Idle);
    assert_eq!(view.active_source, None);
    assert!(effects.is_empty());
}

#[test]
fn snapshot_without_source_is_stale() {
    init_logging();
    let snapshot = ConversationSnapshot {
        source: None,
        turns: vec![ChatTurn::user("orphaned")],
    };

    let (state, _effects) = update(
        AppState::new(),
        Msg::RestoreConversation {
            source: Some("https://example.com".to_string()),
            snapshot: Some(snapshot),
        },
    );
    let view = state.view();

    assert_eq!(view.message_count, 1);
    assert_eq!(view.turns[0].text, source_welcome("https://example.com"));
}
