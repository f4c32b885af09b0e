use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use chat_logging::chat_error;

use crate::api::{QueryApi, ReqwestApi};
use crate::types::{ApiSettings, QueryAnswer, RequestError};

enum ApiCommand {
    SubmitWebsite {
        url: String,
        max_pages: u32,
        max_depth: u32,
    },
    SubmitQuery {
        text: String,
    },
}

/// Completion of a request that was handed to the bridge.
#[derive(Debug)]
pub enum ApiEvent {
    IngestFinished {
        url: String,
        result: Result<serde_json::Value, RequestError>,
    },
    QueryFinished {
        result: Result<QueryAnswer, RequestError>,
    },
}

/// Bridge between the synchronous app loop and the async HTTP client: a
/// command channel into a dedicated runtime thread, completions polled via
/// `try_recv`.
#[derive(Clone)]
pub struct ApiHandle {
    cmd_tx: mpsc::Sender<ApiCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ApiEvent>>>,
}

impl ApiHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, RequestError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<ApiEvent>();
        let api = Arc::new(ReqwestApi::new(settings)?);

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    chat_error!("Failed to start client runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn submit_website(&self, url: impl Into<String>, max_pages: u32, max_depth: u32) {
        let _ = self.cmd_tx.send(ApiCommand::SubmitWebsite {
            url: url.into(),
            max_pages,
            max_depth,
        });
    }

    pub fn submit_query(&self, text: impl Into<String>) {
        let _ = self.cmd_tx.send(ApiCommand::SubmitQuery { text: text.into() });
    }

    pub fn try_recv(&self) -> Option<ApiEvent> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|event_rx| event_rx.try_recv().ok())
    }
}

async fn handle_command(
    api: &dyn QueryApi,
    command: ApiCommand,
    event_tx: mpsc::Sender<ApiEvent>,
) {
    // The receiver side may be gone by the time a request resolves; a
    // dropped completion is dropped silently.
    match command {
        ApiCommand::SubmitWebsite {
            url,
            max_pages,
            max_depth,
        } => {
            let result = api.submit_website(&url, max_pages, max_depth).await;
            let _ = event_tx.send(ApiEvent::IngestFinished { url, result });
        }
        ApiCommand::SubmitQuery { text } => {
            let result = api.submit_query(&text).await;
            let _ = event_tx.send(ApiEvent::QueryFinished { result });
        }
    }
}
