//! Typed persistence over the key-value store.
//!
//! Three fixed keys hold the conversation turns, the active source URL, and
//! the sidebar session list, all JSON-encoded without schema versioning.
//! Malformed persisted state is logged and treated as absent.

use chat_logging::{chat_info, chat_warn};
use ragchat_core::{
    Author, ChatSessionMeta, ChatTurn, ConversationSnapshot, FlowDirection, RenderPosition,
};
use serde::{Deserialize, Serialize};

use super::storage::KeyValueStore;

pub(crate) const HISTORY_KEY: &str = "chat_history";
pub(crate) const SOURCE_KEY: &str = "processed_url";
pub(crate) const SESSIONS_KEY: &str = "chat_sessions";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PersistedAuthor {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PersistedDirection {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PersistedPosition {
    Single,
    First,
    Normal,
    Last,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedTurn {
    message: String,
    sender: PersistedAuthor,
    direction: PersistedDirection,
    position: PersistedPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    id: String,
    title: String,
    timestamp: i64,
    message_count: u32,
}

impl From<&ChatTurn> for PersistedTurn {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            message: turn.text.clone(),
            sender: match turn.author {
                Author::User => PersistedAuthor::User,
                Author::Assistant => PersistedAuthor::Assistant,
                Author::System => PersistedAuthor::System,
            },
            direction: match turn.direction {
                FlowDirection::Incoming => PersistedDirection::Incoming,
                FlowDirection::Outgoing => PersistedDirection::Outgoing,
            },
            position: match turn.position {
                RenderPosition::Single => PersistedPosition::Single,
                RenderPosition::First => PersistedPosition::First,
                RenderPosition::Normal => PersistedPosition::Normal,
                RenderPosition::Last => PersistedPosition::Last,
            },
        }
    }
}

impl From<PersistedTurn> for ChatTurn {
    fn from(turn: PersistedTurn) -> Self {
        Self {
            text: turn.message,
            author: match turn.sender {
                PersistedAuthor::User => Author::User,
                PersistedAuthor::Assistant => Author::Assistant,
                PersistedAuthor::System => Author::System,
            },
            direction: match turn.direction {
                PersistedDirection::Incoming => FlowDirection::Incoming,
                PersistedDirection::Outgoing => FlowDirection::Outgoing,
            },
            position: match turn.position {
                PersistedPosition::Single => RenderPosition::Single,
                PersistedPosition::First => RenderPosition::First,
                PersistedPosition::Normal => RenderPosition::Normal,
                PersistedPosition::Last => RenderPosition::Last,
            },
        }
    }
}

pub(crate) fn load_conversation(store: &dyn KeyValueStore) -> Option<ConversationSnapshot> {
    let source = store
        .get(SOURCE_KEY)
        .and_then(|raw| match serde_json::from_str::<String>(&raw) {
            Ok(url) => Some(url),
            Err(err) => {
                chat_warn!("Ignoring malformed persisted source: {}", err);
                None
            }
        });

    let turns = store
        .get(HISTORY_KEY)
        .and_then(|raw| match serde_json::from_str::<Vec<PersistedTurn>>(&raw) {
            Ok(turns) => Some(turns),
            Err(err) => {
                chat_warn!("Ignoring malformed persisted chat history: {}", err);
                None
            }
        });

    if source.is_none() && turns.is_none() {
        return None;
    }
    chat_info!("Loaded persisted conversation");
    Some(ConversationSnapshot {
        source,
        turns: turns
            .unwrap_or_default()
            .into_iter()
            .map(ChatTurn::from)
            .collect(),
    })
}

pub(crate) fn save_conversation(store: &mut dyn KeyValueStore, snapshot: &ConversationSnapshot) {
    let turns: Vec<PersistedTurn> = snapshot.turns.iter().map(PersistedTurn::from).collect();
    match serde_json::to_string(&turns) {
        Ok(encoded) => store.set(HISTORY_KEY, &encoded),
        Err(err) => {
            chat_warn!("Failed to serialize chat history: {}", err);
            return;
        }
    }
    match &snapshot.source {
        Some(source) => match serde_json::to_string(source) {
            Ok(encoded) => store.set(SOURCE_KEY, &encoded),
            Err(err) => chat_warn!("Failed to serialize source: {}", err),
        },
        None => store.remove(SOURCE_KEY),
    }
}

/// Clearing drops the persisted turns; the source key stays so the next
/// launch restores into the same conversation.
pub(crate) fn clear_conversation(store: &mut dyn KeyValueStore) {
    store.remove(HISTORY_KEY);
}

pub(crate) fn load_sessions(store: &dyn KeyValueStore) -> Vec<ChatSessionMeta> {
    let Some(raw) = store.get(SESSIONS_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<PersistedSession>>(&raw) {
        Ok(sessions) => sessions
            .into_iter()
            .map(|session| ChatSessionMeta {
                id: session.id,
                title: session.title,
                created_at_ms: session.timestamp,
                message_count: session.message_count,
            })
            .collect(),
        Err(err) => {
            chat_warn!("Ignoring malformed persisted sessions: {}", err);
            Vec::new()
        }
    }
}

pub(crate) fn save_sessions(store: &mut dyn KeyValueStore, sessions: &[ChatSessionMeta]) {
    let persisted: Vec<PersistedSession> = sessions
        .iter()
        .map(|session| PersistedSession {
            id: session.id.clone(),
            title: session.title.clone(),
            timestamp: session.created_at_ms,
            message_count: session.message_count,
        })
        .collect();
    match serde_json::to_string(&persisted) {
        Ok(encoded) => store.set(SESSIONS_KEY, &encoded),
        Err(err) => chat_warn!("Failed to serialize sessions: {}", err),
    }
}
