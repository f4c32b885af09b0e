//! Ragchat client: HTTP calls to the remote answer service and the async
//! bridge the app shell drives them through.
mod api;
mod engine;
mod types;

pub use api::{QueryApi, ReqwestApi, PROCESS_WEBSITE_FALLBACK, QUERY_FALLBACK};
pub use engine::{ApiEvent, ApiHandle};
pub use types::{
    ApiSettings, QueryAnswer, RequestError, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_PAGES,
};
