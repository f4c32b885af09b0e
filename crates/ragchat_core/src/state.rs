use crate::view_model::{ChatViewModel, SessionRowView, TurnView};

/// Welcome shown while no website has been ingested yet.
pub const GENERIC_WELCOME: &str = "Process a website first, then ask questions about it here.";

/// Welcome shown after a website has been ingested.
pub fn source_welcome(url: &str) -> String {
    format!("Website processed: {url}. What would you like to know about it?")
}

/// Normalizes a source URL so equality checks ignore case, surrounding
/// whitespace, and a bare trailing slash.
pub fn normalize_source_url(raw: &str) -> String {
    let trimmed = raw.trim();
    match url::Url::parse(trimmed) {
        Ok(parsed) => {
            let mut normalized = parsed.to_string();
            if parsed.path() == "/" && parsed.query().is_none() && parsed.fragment().is_none() {
                normalized.pop();
            }
            normalized
        }
        Err(_) => trimmed.to_ascii_lowercase(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowDirection {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPosition {
    Single,
    First,
    Normal,
    Last,
}

/// One entry of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub text: String,
    pub author: Author,
    pub direction: FlowDirection,
    pub position: RenderPosition,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::User,
            direction: FlowDirection::Outgoing,
            position: RenderPosition::Single,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::Assistant,
            direction: FlowDirection::Incoming,
            position: RenderPosition::Single,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::System,
            direction: FlowDirection::Incoming,
            position: RenderPosition::Single,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatPhase {
    /// No source is set; the transcript shows the generic welcome.
    #[default]
    Idle,
    /// A source is set; questions are answered about it.
    SourceActive,
    /// One query is in flight; further submits are refused.
    AwaitingResponse,
}

/// Sidebar bookkeeping for one conversation.
///
/// `message_count` is static metadata; it is not synchronized with the
/// transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSessionMeta {
    pub id: String,
    pub title: String,
    pub created_at_ms: i64,
    pub message_count: u32,
}

/// The unit of conversation persistence and restoration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationSnapshot {
    pub source: Option<String>,
    pub turns: Vec<ChatTurn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    turns: Vec<ChatTurn>,
    phase: ChatPhase,
    active_source: Option<String>,
    ingesting: bool,
    sessions: Vec<ChatSessionMeta>,
    active_chat_id: Option<String>,
    sidebar_open: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ChatViewModel {
        ChatViewModel {
            turns: self
                .turns
                .iter()
                .map(|turn| TurnView {
                    text: turn.text.clone(),
                    author: turn.author,
                    direction: turn.direction,
                    position: turn.position,
                })
                .collect(),
            phase: self.phase,
            typing: self.phase == ChatPhase::AwaitingResponse,
            ingesting: self.ingesting,
            active_source: self.active_source.clone(),
            message_count: self.turns.len(),
            sessions: self
                .sessions
                .iter()
                .map(|session| SessionRowView {
                    id: session.id.clone(),
                    title: session.title.clone(),
                    created_at_ms: session.created_at_ms,
                    message_count: session.message_count,
                })
                .collect(),
            active_chat_id: self.active_chat_id.clone(),
            sidebar_open: self.sidebar_open,
        }
    }

    /// Returns whether a render is pending and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Conversation data to hand to the persistence layer.
    pub fn conversation_snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            source: self.active_source.clone(),
            turns: self.turns.clone(),
        }
    }

    /// Session list to hand to the persistence layer.
    pub fn sessions_snapshot(&self) -> Vec<ChatSessionMeta> {
        self.sessions.clone()
    }

    pub(crate) fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub(crate) fn is_ingesting(&self) -> bool {
        self.ingesting
    }

    pub(crate) fn source_matches(&self, url: &str) -> bool {
        self.active_source
            .as_deref()
            .map(|current| normalize_source_url(current) == normalize_source_url(url))
            .unwrap_or(false)
    }

    /// The conversation is persisted only while a source is active and the
    /// transcript is non-empty.
    pub(crate) fn should_persist_conversation(&self) -> bool {
        self.active_source.is_some() && !self.turns.is_empty()
    }

    pub(crate) fn append_turn(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
        self.dirty = true;
    }

    pub(crate) fn begin_awaiting(&mut self) {
        self.phase = ChatPhase::AwaitingResponse;
        self.dirty = true;
    }

    /// Leaves AwaitingResponse for whichever resting phase the source implies.
    pub(crate) fn settle_phase(&mut self) {
        self.phase = if self.active_source.is_some() {
            ChatPhase::SourceActive
        } else {
            ChatPhase::Idle
        };
        self.dirty = true;
    }

    pub(crate) fn set_ingesting(&mut self, ingesting: bool) {
        self.ingesting = ingesting;
        self.dirty = true;
    }

    /// Replaces the transcript with the single welcome turn appropriate to
    /// the current source state.
    pub(crate) fn reset_to_welcome(&mut self) {
        match self.active_source.as_deref() {
            Some(source) => {
                self.turns = vec![ChatTurn::system(source_welcome(source))];
                self.phase = ChatPhase::SourceActive;
            }
            None => {
                self.turns = vec![ChatTurn::system(GENERIC_WELCOME)];
                self.phase = ChatPhase::Idle;
            }
        }
        self.dirty = true;
    }

    /// Switches the conversation to a newly ingested source.
    pub(crate) fn adopt_source(&mut self, url: String) {
        self.active_source = Some(url);
        self.reset_to_welcome();
    }

    /// Adopts a persisted conversation unchanged.
    pub(crate) fn adopt_snapshot(&mut self, snapshot: ConversationSnapshot) {
        self.phase = if snapshot.source.is_some() {
            ChatPhase::SourceActive
        } else {
            ChatPhase::Idle
        };
        self.active_source = snapshot.source;
        self.turns = snapshot.turns;
        self.dirty = true;
    }

    pub(crate) fn set_sessions(&mut self, mut sessions: Vec<ChatSessionMeta>) {
        sessions.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms));
        self.sessions = sessions;
        self.dirty = true;
    }

    /// Prepends a fresh session entry with a unique timestamp-derived id.
    pub(crate) fn create_session(&mut self, now_ms: i64) {
        let mut candidate = now_ms;
        let mut id = candidate.to_string();
        while self.sessions.iter().any(|session| session.id == id) {
            candidate += 1;
            id = candidate.to_string();
        }
        self.sessions.insert(
            0,
            ChatSessionMeta {
                id,
                title: "New Chat".to_string(),
                created_at_ms: now_ms,
                message_count: 0,
            },
        );
        // A freshly created chat starts with no selection.
        self.active_chat_id = None;
        self.dirty = true;
    }

    pub(crate) fn select_session(&mut self, id: &str) {
        if self.sessions.iter().any(|session| session.id == id) {
            self.active_chat_id = Some(id.to_string());
            // Selecting from the sidebar collapses the mobile panel.
            self.sidebar_open = false;
            self.dirty = true;
        }
    }

    /// Removes a session by id; returns whether anything was removed.
    pub(crate) fn delete_session(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|session| session.id != id);
        if self.sessions.len() == before {
            return false;
        }
        if self.active_chat_id.as_deref() == Some(id) {
            self.active_chat_id = None;
        }
        self.dirty = true;
        true
    }

    pub(crate) fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        self.dirty = true;
    }
}
