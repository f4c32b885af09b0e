use crate::state::normalize_source_url;
use crate::{AppState, ChatPhase, ChatTurn, Effect, IngestOutcome, Msg, QueryOutcome};

/// Upper bound accepted for `max_pages` on ingestion.
pub const MAX_PAGES_LIMIT: u32 = 20;
/// Upper bound accepted for `max_depth` on ingestion.
pub const MAX_DEPTH_LIMIT: u32 = 5;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QuerySubmitted(raw) => {
            let text = raw.trim();
            if text.is_empty() {
                return (state, Vec::new());
            }
            // One outstanding request at a time; submits while a query or an
            // ingestion is in flight are dropped.
            if state.phase() == ChatPhase::AwaitingResponse || state.is_ingesting() {
                return (state, Vec::new());
            }
            state.append_turn(ChatTurn::user(text));
            state.begin_awaiting();
            let mut effects = persist_conversation(&state);
            effects.push(Effect::SubmitQuery {
                text: text.to_string(),
            });
            effects
        }
        Msg::QueryCompleted { outcome } => {
            // A completion is only honored while a query is outstanding;
            // anything else is stale (the transcript was cleared meanwhile).
            if state.phase() != ChatPhase::AwaitingResponse {
                return (state, Vec::new());
            }
            match outcome {
                QueryOutcome::Answered(answer) => {
                    state.append_turn(ChatTurn::assistant(answer));
                }
                QueryOutcome::Failed(message) => {
                    state.append_turn(ChatTurn::system(format!("Error: {message}")));
                }
            }
            state.settle_phase();
            persist_conversation(&state)
        }
        Msg::IngestSubmitted {
            url,
            max_pages,
            max_depth,
        } => {
            if state.is_ingesting() || state.phase() == ChatPhase::AwaitingResponse {
                return (state, Vec::new());
            }
            let url = url.trim().to_string();
            if url.is_empty() {
                return (state, Vec::new());
            }
            state.set_ingesting(true);
            vec![Effect::SubmitWebsite {
                url,
                max_pages: max_pages.clamp(1, MAX_PAGES_LIMIT),
                max_depth: max_depth.clamp(1, MAX_DEPTH_LIMIT),
            }]
        }
        Msg::IngestCompleted { url, outcome } => {
            state.set_ingesting(false);
            match outcome {
                IngestOutcome::Ingested => {
                    if state.source_matches(&url) {
                        // Same site ingested again; the transcript stays.
                        Vec::new()
                    } else {
                        state.adopt_source(url);
                        persist_conversation(&state)
                    }
                }
                IngestOutcome::Failed(message) => {
                    state.append_turn(ChatTurn::system(format!("Error: {message}")));
                    persist_conversation(&state)
                }
            }
        }
        Msg::ClearChat => {
            let mut effects = vec![Effect::ClearPersistedConversation];
            state.reset_to_welcome();
            effects.extend(persist_conversation(&state));
            effects
        }
        Msg::RestoreConversation { source, snapshot } => {
            let snapshot_matches = match (&source, &snapshot) {
                (Some(requested), Some(snap)) => snap
                    .source
                    .as_deref()
                    .map(|saved| normalize_source_url(saved) == normalize_source_url(requested))
                    .unwrap_or(false),
                _ => false,
            };
            if snapshot_matches {
                state.adopt_snapshot(snapshot.unwrap_or_default());
                Vec::new()
            } else {
                match source {
                    Some(requested) => {
                        state.adopt_source(requested);
                        persist_conversation(&state)
                    }
                    None => {
                        state.reset_to_welcome();
                        Vec::new()
                    }
                }
            }
        }
        Msg::RestoreSessions(sessions) => {
            state.set_sessions(sessions);
            Vec::new()
        }
        Msg::NewChatClicked { now_ms } => {
            state.create_session(now_ms);
            vec![Effect::PersistSessions]
        }
        Msg::ChatSelected { id } => {
            state.select_session(&id);
            Vec::new()
        }
        Msg::ChatDeleted { id } => {
            if state.delete_session(&id) {
                vec![Effect::PersistSessions]
            } else {
                Vec::new()
            }
        }
        Msg::SidebarToggled => {
            state.toggle_sidebar();
            Vec::new()
        }
    };

    (state, effects)
}

fn persist_conversation(state: &AppState) -> Vec<Effect> {
    if state.should_persist_conversation() {
        vec![Effect::PersistConversation]
    } else {
        Vec::new()
    }
}
