//! Shared test fixtures: a local HTTP server and a recording webhook.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::Value;

/// Serve `router` on an ephemeral local port and return its address.
pub async fn spawn_router(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Webhook double that records payloads and answers with a fixed status,
/// optionally after a delay.
#[derive(Clone)]
pub struct RecordingWebhook {
    status: Arc<Mutex<StatusCode>>,
    delay: Arc<Mutex<Duration>>,
    received: Arc<Mutex<Vec<Value>>>,
}

impl RecordingWebhook {
    /// Start a webhook answering `status` and return it with its URL.
    pub async fn start(status: StatusCode) -> (Self, String) {
        let hook = Self {
            status: Arc::new(Mutex::new(status)),
            delay: Arc::default(),
            received: Arc::default(),
        };
        let app = Router::new()
            .route("/webhook/weekly-checkin", post(receive))
            .with_state(hook.clone());
        let addr = spawn_router(app).await;
        (hook, format!("http://{addr}/webhook/weekly-checkin"))
    }

    /// Change the status returned for subsequent deliveries.
    pub fn set_status(&self, status: StatusCode) {
        *self.status.lock().unwrap() = status;
    }

    /// Hold every subsequent response for `delay`.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Payloads received so far.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

async fn receive(State(hook): State<RecordingWebhook>, Json(body): Json<Value>) -> StatusCode {
    hook.received.lock().unwrap().push(body);
    let delay = *hook.delay.lock().unwrap();
    tokio::time::sleep(delay).await;
    *hook.status.lock().unwrap()
}
