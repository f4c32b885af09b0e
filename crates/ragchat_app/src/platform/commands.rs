//! Line protocol for the terminal shell. Anything not starting with `/` is
//! sent to the answer service as a question.

use ragchat_client::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Query(String),
    OpenSite {
        url: String,
        max_pages: u32,
        max_depth: u32,
    },
    Clear,
    NewChat,
    Chats,
    Select(String),
    Delete(String),
    Sidebar,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub(crate) fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    if !trimmed.starts_with('/') {
        return Command::Query(trimmed.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default();
    match command {
        "/site" => match parts.next() {
            Some(url) => Command::OpenSite {
                url: url.to_string(),
                max_pages: parts
                    .next()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(DEFAULT_MAX_PAGES),
                max_depth: parts
                    .next()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(DEFAULT_MAX_DEPTH),
            },
            None => Command::Unknown(trimmed.to_string()),
        },
        "/clear" => Command::Clear,
        "/new" => Command::NewChat,
        "/chats" => Command::Chats,
        "/select" => match parts.next() {
            Some(id) => Command::Select(id.to_string()),
            None => Command::Unknown(trimmed.to_string()),
        },
        "/delete" => match parts.next() {
            Some(id) => Command::Delete(id.to_string()),
            None => Command::Unknown(trimmed.to_string()),
        },
        "/sidebar" => Command::Sidebar,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}
