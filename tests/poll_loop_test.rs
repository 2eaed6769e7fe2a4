//! End-to-end poll loop tests: real HTTP client and Telegram channel against mock servers

use homework_status_bot::{
    ApiClient, Config, FailureNotice, PollLoop, TelegramChannel, TelegramConfig,
};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CURSOR: i64 = 1_700_000_000;
const API_PATH: &str = "/api/user_api/homework_statuses/";

struct Harness {
    api: MockServer,
    telegram: MockServer,
}

impl Harness {
    async fn start() -> Self {
        let telegram = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/botbot-token/sendMessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&telegram)
            .await;

        Self {
            api: MockServer::start().await,
            telegram,
        }
    }

    fn poller_with_endpoint(&self, endpoint: String) -> PollLoop<ApiClient, TelegramChannel> {
        let mut config = Config::new("practicum-token", "bot-token", "42");
        config.endpoint = endpoint;
        config.telegram_api_url = self.telegram.uri();
        config.request_timeout_secs = Some(5);

        PollLoop::with_cursor(
            ApiClient::new(&config).unwrap(),
            TelegramChannel::new(TelegramConfig::from(&config)).unwrap(),
            CURSOR,
            Duration::from_secs(600),
        )
    }

    fn poller(&self) -> PollLoop<ApiClient, TelegramChannel> {
        self.poller_with_endpoint(format!("{}{}", self.api.uri(), API_PATH))
    }

    async fn respond_with(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path(API_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.api)
            .await;
    }

    /// Texts delivered to the mock Bot API, in order
    async fn sent_texts(&self) -> Vec<String> {
        self.telegram
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|req| {
                let body: Value = serde_json::from_slice(&req.body).unwrap();
                assert_eq!(body["chat_id"], "42");
                body["text"].as_str().unwrap().to_string()
            })
            .collect()
    }
}

fn homework(name: &str, status: &str) -> Value {
    json!({"homework_name": name, "status": status, "date_updated": "2024-01-01T10:00:00Z"})
}

#[tokio::test]
async fn test_scenario_new_status_sent_and_cursor_advanced() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("from_date", "1700000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "homeworks": [homework("hw1", "approved")],
            "current_date": 1700000500
        })))
        .expect(1)
        .mount(&harness.api)
        .await;

    let mut poller = harness.poller();
    let report = poller.run_once().await;

    assert_eq!(
        harness.sent_texts().await,
        vec!["Changed status for \"hw1\". Work reviewed: the reviewer liked everything."]
    );
    assert_eq!(poller.state().cursor(), 1_700_000_500);
    assert_eq!(report.cursor_after, 1_700_000_500);
}

#[tokio::test]
async fn test_scenario_repeated_payload_is_deduplicated() {
    let harness = Harness::start().await;
    harness
        .respond_with(json!({
            "homeworks": [homework("hw1", "approved")],
            "current_date": 1700000500
        }))
        .await;

    let mut poller = harness.poller();
    poller.run_once().await;
    let second = poller.run_once().await;

    assert_eq!(harness.sent_texts().await.len(), 1);
    assert_eq!(second.duplicates, 1);
}

#[tokio::test]
async fn test_scenario_connection_error_notified_once() {
    let harness = Harness::start().await;
    // Nothing listens on port 1
    let mut poller = harness.poller_with_endpoint("http://127.0.0.1:1/api/".to_string());

    let first = poller.run_once().await;
    let second = poller.run_once().await;

    let sent = harness.sent_texts().await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("Program failure: request to http://127.0.0.1:1/api/"));
    assert_eq!(first.failure_notice, FailureNotice::Sent);
    assert_eq!(second.failure_notice, FailureNotice::Suppressed);
    assert!(second.operational_error.is_some());
    assert_eq!(poller.state().cursor(), CURSOR);
}

#[tokio::test]
async fn test_scenario_missing_homeworks() {
    let harness = Harness::start().await;
    harness.respond_with(json!({"current_date": 123})).await;

    let mut poller = harness.poller();
    let report = poller.run_once().await;

    assert_eq!(
        harness.sent_texts().await,
        vec!["Program failure: invalid API response: missing homeworks"]
    );
    assert_eq!(poller.state().cursor(), CURSOR);
    assert!(!report.is_success());
}

#[tokio::test]
async fn test_scenario_unknown_status_skipped() {
    let harness = Harness::start().await;
    harness
        .respond_with(json!({
            "homeworks": [
                homework("hw1", "rejected"),
                homework("hw2", "archived"),
                homework("hw3", "reviewing"),
            ],
            "current_date": 1700000500
        }))
        .await;

    let mut poller = harness.poller();
    let report = poller.run_once().await;

    assert_eq!(
        harness.sent_texts().await,
        vec![
            "Changed status for \"hw1\". Work reviewed: the reviewer has comments.",
            "Changed status for \"hw3\". Work has been taken up for review.",
        ]
    );
    assert_eq!(report.item_errors, 1);
    assert_eq!(report.failure_notice, FailureNotice::None);
}

#[tokio::test]
async fn test_server_error_notice_then_recovery() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&harness.api)
        .await;
    harness
        .respond_with(json!({"homeworks": [homework("hw1", "approved")]}))
        .await;

    let mut poller = harness.poller();
    for _ in 0..3 {
        poller.run_once().await;
    }

    assert_eq!(
        harness.sent_texts().await,
        vec![
            "Program failure: API returned status 503",
            "Changed status for \"hw1\". Work reviewed: the reviewer liked everything.",
        ]
    );
}
