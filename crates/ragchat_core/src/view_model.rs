use crate::{Author, ChatPhase, FlowDirection, RenderPosition};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub turns: Vec<TurnView>,
    pub phase: ChatPhase,
    pub typing: bool,
    pub ingesting: bool,
    pub active_source: Option<String>,
    pub message_count: usize,
    pub sessions: Vec<SessionRowView>,
    pub active_chat_id: Option<String>,
    pub sidebar_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub text: String,
    pub author: Author,
    pub direction: FlowDirection,
    pub position: RenderPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRowView {
    pub id: String,
    pub title: String,
    pub created_at_ms: i64,
    pub message_count: u32,
}
