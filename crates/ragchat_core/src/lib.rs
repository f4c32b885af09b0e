//! Ragchat core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{IngestOutcome, Msg, QueryOutcome};
pub use state::{
    normalize_source_url, source_welcome, AppState, Author, ChatPhase, ChatSessionMeta, ChatTurn,
    ConversationSnapshot, FlowDirection, RenderPosition, GENERIC_WELCOME,
};
pub use update::{update, MAX_DEPTH_LIMIT, MAX_PAGES_LIMIT};
pub use view_model::{ChatViewModel, SessionRowView, TurnView};
