use chat_logging::{chat_debug, chat_info};
use serde::Serialize;

use crate::types::{ApiSettings, ErrorBody, ProcessWebsiteRequest, QueryAnswer, QueryRequest, RequestError};

/// Generic message when the ingestion endpoint fails without a usable body.
pub const PROCESS_WEBSITE_FALLBACK: &str = "Failed to process website";
/// Generic message when the query endpoint fails without a usable body.
pub const QUERY_FALLBACK: &str = "Failed to query RAG system";

#[async_trait::async_trait]
pub trait QueryApi: Send + Sync {
    /// Submits a website for ingestion. The success body is opaque JSON;
    /// the caller only cares that the call went through.
    async fn submit_website(
        &self,
        url: &str,
        max_pages: u32,
        max_depth: u32,
    ) -> Result<serde_json::Value, RequestError>;

    /// Submits a question and returns the service's answer.
    async fn submit_query(&self, text: &str) -> Result<QueryAnswer, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RequestError::new(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<T>(
        &self,
        path: &str,
        body: &T,
        fallback: &str,
    ) -> Result<reqwest::Response, RequestError>
    where
        T: Serialize + Sync,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|err| RequestError::new(err.to_string()))?;

        let status = response.status();
        chat_debug!("POST /{} -> {}", path, status);
        if !status.is_success() {
            return Err(RequestError::new(
                extract_error_message(response, fallback).await,
            ));
        }
        Ok(response)
    }
}

/// Reads a JSON error body's `detail` field as the message; falls back to
/// the per-endpoint generic message when the body is not parseable JSON.
async fn extract_error_message(response: reqwest::Response, fallback: &str) -> String {
    match response.json::<ErrorBody>().await {
        Ok(body) if !body.detail.is_empty() => body.detail,
        _ => fallback.to_string(),
    }
}

#[async_trait::async_trait]
impl QueryApi for ReqwestApi {
    async fn submit_website(
        &self,
        url: &str,
        max_pages: u32,
        max_depth: u32,
    ) -> Result<serde_json::Value, RequestError> {
        chat_info!(
            "Processing website {} (max_pages {}, max_depth {})",
            url,
            max_pages,
            max_depth
        );
        let response = self
            .post_json(
                "process-website",
                &ProcessWebsiteRequest {
                    url,
                    max_pages,
                    max_depth,
                },
                PROCESS_WEBSITE_FALLBACK,
            )
            .await?;
        response
            .json::<serde_json::Value>()
            .await
            .map_err(|_| RequestError::new(PROCESS_WEBSITE_FALLBACK))
    }

    async fn submit_query(&self, text: &str) -> Result<QueryAnswer, RequestError> {
        chat_info!("Querying answer service ({} chars)", text.len());
        let response = self
            .post_json("query", &QueryRequest { query: text }, QUERY_FALLBACK)
            .await?;
        response
            .json::<QueryAnswer>()
            .await
            .map_err(|_| RequestError::new(QUERY_FALLBACK))
    }
}
