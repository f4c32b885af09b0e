use std::time::Duration;

use pretty_assertions::assert_eq;
use ragchat_client::{
    ApiSettings, QueryApi, ReqwestApi, PROCESS_WEBSITE_FALLBACK, QUERY_FALLBACK,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    ReqwestApi::new(ApiSettings::with_base_url(server.uri())).expect("client builds")
}

#[tokio::test]
async fn query_returns_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({ "query": "What is 2wrap?" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "answer": "2wrap is a gifting platform." })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let answer = api.submit_query("What is 2wrap?").await.expect("query ok");
    assert_eq!(answer.answer, "2wrap is a gifting platform.");
}

#[tokio::test]
async fn query_error_uses_detail_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "index not built yet" })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.submit_query("anything").await.unwrap_err();
    assert_eq!(err.message, "index not built yet");
}

#[tokio::test]
async fn query_error_falls_back_on_unparsable_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.submit_query("anything").await.unwrap_err();
    assert_eq!(err.message, QUERY_FALLBACK);
}

#[tokio::test]
async fn process_website_sends_crawl_bounds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-website"))
        .and(body_json(json!({
            "url": "https://example.com",
            "max_pages": 5,
            "max_depth": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pages_processed": 3 })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let receipt = api
        .submit_website("https://example.com", 5, 1)
        .await
        .expect("ingest ok");
    assert_eq!(receipt["pages_processed"], 3);
}

#[tokio::test]
async fn process_website_error_uses_detail_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-website"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "detail": "Invalid URL" })),
        )
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.submit_website("not-a-url", 5, 1).await.unwrap_err();
    assert_eq!(err.message, "Invalid URL");
}

#[tokio::test]
async fn process_website_error_falls_back_on_empty_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process-website"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "" })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.submit_website("https://example.com", 5, 1).await.unwrap_err();
    assert_eq!(err.message, PROCESS_WEBSITE_FALLBACK);
}

#[tokio::test]
async fn network_failure_surfaces_as_request_error() {
    // Nothing listens on this port.
    let api = ReqwestApi::new(ApiSettings::with_base_url("http://127.0.0.1:9"))
        .expect("client builds");
    let err = api.submit_query("anything").await.unwrap_err();
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "answer": "slow" })),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::with_base_url(server.uri())
    };
    let api = ReqwestApi::new(settings).expect("client builds");
    let err = api.submit_query("anything").await.unwrap_err();
    assert!(!err.message.is_empty());
}
