//! Integration tests for the reqwest transport against a mock Bot API.

use serde_json::json;
use tgnotice::config::Config;
use tgnotice::{build_notifier, AlertNotifyHandler, NoticeError, TransportError};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::{test_group_alert, test_receiver, test_template, TEST_BOT_TOKEN};

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.telegram.webhook_url = format!("{}/bot%s/sendMessage", server.uri());
    config.telegram.timeout_ms = 1_000;
    config
}

fn send_path() -> String {
    format!("/bot{}/sendMessage", TEST_BOT_TOKEN)
}

#[tokio::test]
async fn test_posts_once_and_accepts_ok() {
    // Arrange
    let server = MockServer::start().await;
    let expected_body = json!({
        "chat_id": "123456789",
        "text": "Alert Notification\ntest content\n\nseverity: critical\nalertname: Test Alert",
        "disable_web_page_preview": true,
    });

    Mock::given(method("POST"))
        .and(path(send_path()))
        .and(body_json(&expected_body))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "description": "Test Success"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let notifier = build_notifier(&config_for(&server)).unwrap();

    // Act
    let result = notifier
        .send(&test_receiver(), &test_template(), &test_group_alert())
        .await;

    // Assert
    assert!(result.is_ok(), "unexpected error: {:?}", result);
}

#[tokio::test]
async fn test_ok_false_is_rejected_with_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(send_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "description": "Test failed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let notifier = build_notifier(&config_for(&server)).unwrap();
    let err = notifier
        .send(&test_receiver(), &test_template(), &test_group_alert())
        .await
        .unwrap_err();

    assert!(matches!(err, NoticeError::Rejected(_)));
    assert_eq!(err.to_string(), "Test failed");
}

#[tokio::test]
async fn test_missing_token_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let notifier = build_notifier(&config_for(&server)).unwrap();
    let mut receiver = test_receiver();
    receiver.tg_bot_token = String::new();

    let err = notifier
        .send(&receiver, &test_template(), &test_group_alert())
        .await
        .unwrap_err();
    assert!(matches!(err, NoticeError::Configuration(_)));
}

#[tokio::test]
async fn test_error_status_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(send_path()))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"ok": false, "description": "Bad Request: chat not found"})),
        )
        .mount(&server)
        .await;

    let notifier = build_notifier(&config_for(&server)).unwrap();
    let err = notifier
        .send(&test_receiver(), &test_template(), &test_group_alert())
        .await
        .unwrap_err();

    match err {
        NoticeError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("chat not found"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_html_body_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(send_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let notifier = build_notifier(&config_for(&server)).unwrap();
    let err = notifier
        .send(&test_receiver(), &test_template(), &test_group_alert())
        .await
        .unwrap_err();

    assert!(matches!(err, NoticeError::Protocol { .. }));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(send_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.telegram.timeout_ms = 200;
    let notifier = build_notifier(&config).unwrap();

    let err = notifier
        .send(&test_receiver(), &test_template(), &test_group_alert())
        .await
        .unwrap_err();

    match err {
        NoticeError::Transport(e) => assert!(e.is_timeout(), "expected timeout, got {}", e),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_error_does_not_leak_token() {
    let mut config = Config::default();
    // Nothing listens on the discard port.
    config.telegram.webhook_url = "http://127.0.0.1:9/bot%s/sendMessage".to_string();
    let notifier = build_notifier(&config).unwrap();

    let err = notifier
        .send(&test_receiver(), &test_template(), &test_group_alert())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "transport");
    assert!(!format!("{:?}", err).contains("ABC-DEF1234"));
}
