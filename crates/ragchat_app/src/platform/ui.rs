//! Plain-text rendering of the view model.

use ragchat_core::{Author, ChatViewModel};

const MS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

pub(crate) fn help() -> &'static str {
    "Commands:\n\
     \x20 /site <url> [pages] [depth]   process a website\n\
     \x20 /clear                        clear the conversation\n\
     \x20 /new                          start a new chat\n\
     \x20 /chats                        list recent chats\n\
     \x20 /select <id>                  switch to a chat\n\
     \x20 /delete <id>                  delete a chat\n\
     \x20 /sidebar                      toggle the sidebar\n\
     \x20 /quit                         exit\n\
     Anything else is sent as a question."
}

pub(crate) fn render_screen(view: &ChatViewModel) -> String {
    let mut out = String::new();
    out.push('\n');
    if view.message_count == 0 {
        out.push_str("No messages yet\n");
    } else {
        out.push_str(&format!("{} messages\n", view.message_count));
    }
    for turn in &view.turns {
        out.push_str(&format!("[{}] {}\n", author_marker(turn.author), turn.text));
    }
    if view.typing {
        out.push_str("AI is thinking...\n");
    }
    if view.ingesting {
        out.push_str("Processing website...\n");
    }
    out.push_str(&format!("({})\n", input_hint(view)));
    out
}

pub(crate) fn render_sidebar(view: &ChatViewModel, now_ms: i64) -> String {
    if view.sessions.is_empty() {
        return "No chat history yet. Start a new conversation to see it here.\n".to_string();
    }
    let mut out = String::from("Recent Chats\n");
    for session in &view.sessions {
        let marker = if view.active_chat_id.as_deref() == Some(session.id.as_str()) {
            '*'
        } else {
            ' '
        };
        out.push_str(&format!(
            "{} {}  {} - {} messages  (id {})\n",
            marker,
            session.title,
            format_date(session.created_at_ms, now_ms),
            session.message_count,
            session.id,
        ));
    }
    out
}

/// Relative date label for the sidebar, falling back to a calendar date
/// after a week.
pub(crate) fn format_date(created_at_ms: i64, now_ms: i64) -> String {
    let days = (now_ms - created_at_ms) / MS_PER_DAY;
    if days <= 0 {
        return "Today".to_string();
    }
    if days == 1 {
        return "Yesterday".to_string();
    }
    if days < 7 {
        return format!("{days} days ago");
    }
    chrono::DateTime::from_timestamp_millis(created_at_ms)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn author_marker(author: Author) -> &'static str {
    match author {
        Author::User => "you",
        Author::Assistant => "bot",
        Author::System => "sys",
    }
}

fn input_hint(view: &ChatViewModel) -> &'static str {
    if view.active_source.is_some() {
        "Type your question here..."
    } else {
        "Process a website first..."
    }
}

#[cfg(test)]
mod tests {
    use ragchat_core::{update, AppState, IngestOutcome, Msg};

    use super::{format_date, render_screen, render_sidebar, MS_PER_DAY};

    fn view_with_source() -> ragchat_core::ChatViewModel {
        let state = AppState::new();
        let (state, _) = update(
            state,
            Msg::IngestSubmitted {
                url: "https://example.com".to_string(),
                max_pages: 5,
                max_depth: 1,
            },
        );
        let (state, _) = update(
            state,
            Msg::IngestCompleted {
                url: "https://example.com".to_string(),
                outcome: IngestOutcome::Ingested,
            },
        );
        state.view()
    }

    #[test]
    fn format_date_buckets() {
        let now = 20 * MS_PER_DAY;
        assert_eq!(format_date(now, now), "Today");
        assert_eq!(format_date(now - MS_PER_DAY, now), "Yesterday");
        assert_eq!(format_date(now - 3 * MS_PER_DAY, now), "3 days ago");
        assert_eq!(format_date(now - 10 * MS_PER_DAY, now), "1970-01-11");
    }

    #[test]
    fn future_timestamps_render_as_today() {
        let now = 20 * MS_PER_DAY;
        assert_eq!(format_date(now + MS_PER_DAY, now), "Today");
    }

    #[test]
    fn screen_shows_typing_indicator_while_awaiting() {
        let view = view_with_source();
        let state: AppState = {
            let state = AppState::new();
            let (state, _) = update(
                state,
                Msg::IngestSubmitted {
                    url: "https://example.com".to_string(),
                    max_pages: 5,
                    max_depth: 1,
                },
            );
            let (state, _) = update(
                state,
                Msg::IngestCompleted {
                    url: "https://example.com".to_string(),
                    outcome: IngestOutcome::Ingested,
                },
            );
            let (state, _) = update(state, Msg::QuerySubmitted("What is 2wrap?".to_string()));
            state
        };

        assert!(!render_screen(&view).contains("AI is thinking..."));
        assert!(render_screen(&state.view()).contains("AI is thinking..."));
    }

    #[test]
    fn sidebar_marks_the_active_session() {
        let state = AppState::new();
        let (state, _) = update(state, Msg::NewChatClicked { now_ms: 1_000 });
        let id = state.view().sessions[0].id.clone();
        let (state, _) = update(state, Msg::ChatSelected { id: id.clone() });

        let rendered = render_sidebar(&state.view(), 2_000);
        assert!(rendered.contains("* New Chat"));
        assert!(rendered.contains(&format!("(id {id})")));
    }

    #[test]
    fn sidebar_without_sessions_explains_itself() {
        let view = AppState::new().view();
        assert!(render_sidebar(&view, 0).contains("No chat history yet"));
    }
}
