#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitQuery {
        text: String,
    },
    SubmitWebsite {
        url: String,
        max_pages: u32,
        max_depth: u32,
    },
    PersistConversation,
    ClearPersistedConversation,
    PersistSessions,
}
