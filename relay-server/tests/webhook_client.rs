use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

use formrelay::{
    Deliver, DeliveryError, NotificationPayload, RetryPolicy, WebhookClient,
};

#[derive(Clone)]
struct FakeDiscord {
    status: StatusCode,
    reply: &'static str,
    received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn receive(
    State(fake): State<FakeDiscord>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, &'static str) {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.received.lock().unwrap().push((content_type, body));
    (fake.status, fake.reply)
}

/// Start a fake webhook endpoint and return its URL plus the request log.
async fn spawn_fake(
    status: StatusCode,
    reply: &'static str,
) -> (Url, Arc<Mutex<Vec<(Option<String>, Value)>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let fake = FakeDiscord {
        status,
        reply,
        received: received.clone(),
    };

    let app = Router::new()
        .route("/api/webhooks/1/token", post(receive))
        .with_state(fake);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let url = Url::parse(&format!("http://{addr}/api/webhooks/1/token")).unwrap();
    (url, received)
}

#[tokio::test]
async fn test_delivers_json_payload() {
    let (url, received) = spawn_fake(StatusCode::NO_CONTENT, "").await;
    let client = WebhookClient::new(Client::new(), url);

    client
        .deliver(&NotificationPayload::text("hello"))
        .await
        .unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0.as_deref(), Some("application/json"));
    assert_eq!(received[0].1, json!({ "content": "hello" }));
}

#[tokio::test]
async fn test_non_success_status_is_rejected_with_body() {
    let (url, received) = spawn_fake(StatusCode::BAD_REQUEST, "bad embed").await;
    let client = WebhookClient::new(Client::new(), url);

    let err = client
        .deliver(&NotificationPayload::text("hello"))
        .await
        .unwrap_err();

    match err {
        DeliveryError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "bad embed");
        }
        other => panic!("Expected rejection, got {other:?}"),
    }
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejection_is_never_retried() {
    let (url, received) = spawn_fake(StatusCode::INTERNAL_SERVER_ERROR, "").await;
    let client = WebhookClient::new(Client::new(), url).with_retry(RetryPolicy {
        max_retries: 3,
        base_delay: Duration::from_millis(1),
    });

    assert!(client.deliver(&NotificationPayload::text("x")).await.is_err());
    assert_eq!(received.lock().unwrap().len(), 1);
}

/// A URL on a port nothing is listening on.
async fn closed_port_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/hook")).unwrap()
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let client = WebhookClient::new(Client::new(), closed_port_url().await);

    let err = client
        .deliver(&NotificationPayload::text("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, DeliveryError::Transport(_)));
}

#[tokio::test]
async fn test_connection_failure_retries_then_gives_up() {
    let client = WebhookClient::new(Client::new(), closed_port_url().await).with_retry(RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(5),
    });

    let err = client
        .deliver(&NotificationPayload::text("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, DeliveryError::Transport(_)));
}
