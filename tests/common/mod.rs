use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use reqwest::Client;
use tokio::sync::Notify;

use dishform::config::Config;

/// A running form server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// GET the form page, return (html, status).
    pub async fn page(&self) -> (String, StatusCode) {
        let resp = self
            .client
            .get(self.url("/"))
            .send()
            .await
            .expect("get page failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// POST the form, return (html, status).
    pub async fn post_form(&self, fields: &[(&str, &str)]) -> (String, StatusCode) {
        let resp = self
            .client
            .post(self.url("/"))
            .form(fields)
            .send()
            .await
            .expect("post form failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// POST to the HTMX details partial, return (html, status).
    pub async fn details(&self, fields: &[(&str, &str)]) -> (String, StatusCode) {
        let resp = self
            .client
            .post(self.url("/htmx/details"))
            .form(fields)
            .send()
            .await
            .expect("post details failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }
}

/// A request the mock dish API received.
#[derive(Debug, Clone)]
pub struct Received {
    pub body: String,
    pub content_type: Option<String>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    hold: bool,
    received: Arc<Mutex<Vec<Received>>>,
    release: Arc<Notify>,
}

/// Stand-in for the remote dish API.
pub struct MockApi {
    pub url: String,
    received: Arc<Mutex<Vec<Received>>>,
    release: Arc<Notify>,
}

impl MockApi {
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    /// Let a held request answer.
    pub fn release(&self) {
        self.release.notify_one();
    }

    /// Wait until at least `count` requests have arrived.
    pub async fn wait_for(&self, count: usize) {
        for _ in 0..100 {
            if self.received.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("mock API never received {count} request(s)");
    }
}

async fn create_dish(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> StatusCode {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    state.received.lock().unwrap().push(Received {
        body: String::from_utf8_lossy(&body).into_owned(),
        content_type,
    });

    if state.hold {
        state.release.notified().await;
    }

    state.status
}

/// Spawn a mock dish API answering every POST with `status`.
/// With `hold`, each response waits for [`MockApi::release`].
pub async fn spawn_api(status: StatusCode, hold: bool) -> MockApi {
    let received = Arc::new(Mutex::new(Vec::new()));
    let release = Arc::new(Notify::new());

    let app = Router::new()
        .route("/dishes/", post(create_dish))
        .with_state(MockState {
            status,
            hold,
            received: received.clone(),
            release: release.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock API");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock API failed");
    });

    MockApi {
        url: format!("http://{addr}/dishes/"),
        received,
        release,
    }
}

/// Spawn the form server pointed at `api_url`.
pub async fn spawn_app(api_url: &str) -> TestApp {
    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        api_url: api_url.to_string(),
        api_timeout: Duration::from_secs(5),
        log_level: "warn".to_string(),
    };

    let app = dishform::build_app(config).expect("Failed to build app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp { addr, client }
}

/// The hidden form token rendered into a page.
pub fn form_id(html: &str) -> String {
    let marker = r#"name="form_id" value=""#;
    let start = html.find(marker).expect("page has no form_id") + marker.len();
    let len = html[start..].find('"').expect("unterminated form_id");
    html[start..start + len].to_string()
}

/// An address nothing listens on.
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/dishes/")
}
