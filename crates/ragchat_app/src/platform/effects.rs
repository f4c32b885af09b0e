use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chat_logging::{chat_info, chat_warn};
use ragchat_client::{ApiEvent, ApiHandle, ApiSettings, RequestError};
use ragchat_core::{IngestOutcome, Msg, QueryOutcome};

use super::app::LoopEvent;

/// Executes network effects on the client bridge and feeds completions back
/// into the main loop as messages.
pub(crate) struct EffectRunner {
    api: ApiHandle,
}

impl EffectRunner {
    pub(crate) fn new(event_tx: mpsc::Sender<LoopEvent>) -> Result<Self, RequestError> {
        let api = ApiHandle::new(ApiSettings::from_env())?;
        let runner = Self { api };
        runner.spawn_event_loop(event_tx);
        Ok(runner)
    }

    pub(crate) fn submit_query(&self, text: String) {
        chat_info!("SubmitQuery len={}", text.len());
        self.api.submit_query(text);
    }

    pub(crate) fn submit_website(&self, url: String, max_pages: u32, max_depth: u32) {
        chat_info!(
            "SubmitWebsite url={} max_pages={} max_depth={}",
            url,
            max_pages,
            max_depth
        );
        self.api.submit_website(url, max_pages, max_depth);
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<LoopEvent>) {
        let api = self.api.clone();
        thread::spawn(move || loop {
            if let Some(event) = api.try_recv() {
                let msg = match event {
                    ApiEvent::QueryFinished { result } => Msg::QueryCompleted {
                        outcome: match result {
                            Ok(answer) => QueryOutcome::Answered(answer.answer),
                            Err(err) => {
                                chat_warn!("Query failed: {}", err);
                                QueryOutcome::Failed(err.to_string())
                            }
                        },
                    },
                    ApiEvent::IngestFinished { url, result } => Msg::IngestCompleted {
                        url,
                        outcome: match result {
                            Ok(_) => IngestOutcome::Ingested,
                            Err(err) => {
                                chat_warn!("Ingestion failed: {}", err);
                                IngestOutcome::Failed(err.to_string())
                            }
                        },
                    },
                };
                if event_tx.send(LoopEvent::Msg(msg)).is_err() {
                    // Main loop is gone; completions have nowhere to go.
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}
