use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use chat_logging::chat_info;
use chrono::Utc;
use ragchat_core::{update, AppState, Effect, Msg};

use super::commands::{self, Command};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::persistence;
use super::storage::{state_dir, FileStore};
use super::ui;

/// Everything the main loop reacts to: a raw input line or a core message
/// produced by a completed effect.
pub(crate) enum LoopEvent {
    Line(String),
    Msg(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let mut store = FileStore::new(state_dir()).context("initialize state directory")?;
    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();

    let runner = EffectRunner::new(event_tx.clone()).context("start api client")?;
    spawn_input_reader(event_tx);

    let mut state = AppState::new();

    // Restore persisted state before the first render. The requested source
    // is whatever the store paired the turns with; a mismatching or missing
    // snapshot falls back to a fresh welcome.
    let snapshot = persistence::load_conversation(&store);
    let source = snapshot.as_ref().and_then(|snap| snap.source.clone());
    state = dispatch(state, Msg::RestoreConversation { source, snapshot }, &runner, &mut store);
    let sessions = persistence::load_sessions(&store);
    state = dispatch(state, Msg::RestoreSessions(sessions), &runner, &mut store);

    println!("{}", ui::help());
    render(&mut state);

    while let Ok(event) = event_rx.recv() {
        match event {
            LoopEvent::Msg(msg) => {
                state = dispatch(state, msg, &runner, &mut store);
                render(&mut state);
            }
            LoopEvent::Line(line) => match commands::parse_line(&line) {
                Command::Quit => break,
                Command::Empty => {}
                Command::Help => println!("{}", ui::help()),
                Command::Chats => {
                    println!(
                        "{}",
                        ui::render_sidebar(&state.view(), Utc::now().timestamp_millis())
                    );
                }
                Command::Unknown(input) => {
                    println!("Unrecognized command: {input} (try /help)");
                }
                command => {
                    if let Some(msg) = to_msg(command) {
                        state = dispatch(state, msg, &runner, &mut store);
                        render(&mut state);
                    }
                }
            },
        }
    }

    chat_info!("Shutting down");
    Ok(())
}

fn to_msg(command: Command) -> Option<Msg> {
    match command {
        Command::Query(text) => Some(Msg::QuerySubmitted(text)),
        Command::OpenSite {
            url,
            max_pages,
            max_depth,
        } => Some(Msg::IngestSubmitted {
            url,
            max_pages,
            max_depth,
        }),
        Command::Clear => Some(Msg::ClearChat),
        Command::NewChat => Some(Msg::NewChatClicked {
            now_ms: Utc::now().timestamp_millis(),
        }),
        Command::Select(id) => Some(Msg::ChatSelected { id }),
        Command::Delete(id) => Some(Msg::ChatDeleted { id }),
        Command::Sidebar => Some(Msg::SidebarToggled),
        Command::Chats | Command::Help | Command::Quit | Command::Empty | Command::Unknown(_) => {
            None
        }
    }
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner, store: &mut FileStore) -> AppState {
    let (state, effects) = update(state, msg);
    apply_effects(runner, store, &state, effects);
    state
}

fn apply_effects(
    runner: &EffectRunner,
    store: &mut FileStore,
    state: &AppState,
    effects: Vec<Effect>,
) {
    for effect in effects {
        match effect {
            Effect::SubmitQuery { text } => runner.submit_query(text),
            Effect::SubmitWebsite {
                url,
                max_pages,
                max_depth,
            } => runner.submit_website(url, max_pages, max_depth),
            Effect::PersistConversation => {
                persistence::save_conversation(store, &state.conversation_snapshot());
            }
            Effect::ClearPersistedConversation => {
                persistence::clear_conversation(store);
            }
            Effect::PersistSessions => {
                persistence::save_sessions(store, &state.sessions_snapshot());
            }
        }
    }
}

fn render(state: &mut AppState) {
    if state.consume_dirty() {
        print!("{}", ui::render_screen(&state.view()));
        let _ = io::stdout().flush();
    }
}

fn spawn_input_reader(event_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if event_tx.send(LoopEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        // EOF on stdin ends the app.
        let _ = event_tx.send(LoopEvent::Line("/quit".to_string()));
    });
}
