use crate::{ChatSessionMeta, ConversationSnapshot};

/// How an in-flight query ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Answered(String),
    Failed(String),
}

/// How an in-flight website ingestion ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Ingested,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a question from the input box.
    QuerySubmitted(String),
    /// The in-flight query finished.
    QueryCompleted { outcome: QueryOutcome },
    /// User submitted a website for ingestion.
    IngestSubmitted {
        url: String,
        max_pages: u32,
        max_depth: u32,
    },
    /// The in-flight ingestion finished.
    IngestCompleted { url: String, outcome: IngestOutcome },
    /// User clicked Clear Chat.
    ClearChat,
    /// Restore the persisted conversation, if it belongs to the requested source.
    RestoreConversation {
        source: Option<String>,
        snapshot: Option<ConversationSnapshot>,
    },
    /// Restore the persisted sidebar session list.
    RestoreSessions(Vec<ChatSessionMeta>),
    /// User clicked New Chat; `now_ms` seeds the session id.
    NewChatClicked { now_ms: i64 },
    /// User selected a session from the sidebar.
    ChatSelected { id: String },
    /// User deleted a session from the sidebar.
    ChatDeleted { id: String },
    /// User toggled the sidebar panel.
    SidebarToggled,
}
