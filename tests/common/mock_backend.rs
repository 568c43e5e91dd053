//! Scripted json-server stand-in. Every request is recorded; replies are
//! served in the order they were queued, falling back to an empty list.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    /// Decoded query pairs, in request order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(query) = &self.query else {
            return Vec::new();
        };
        reqwest::Url::parse(&format!("http://mock/?{query}"))
            .map(|url| url.query_pairs().into_owned().collect())
            .unwrap_or_default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Request body as JSON; `Null` when it is not JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// A queued reply.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    total_count: Option<u64>,
    body: String,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::json("[]")
    }
}

impl MockResponse {
    /// 200 with a JSON body.
    pub fn json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            total_count: None,
            body: body.to_string(),
        }
    }

    /// A list page carrying the total-count header.
    pub fn page(body: &str, total: u64) -> Self {
        Self {
            total_count: Some(total),
            ..Self::json(body)
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            total_count: None,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = StatusCode::from_u16(status).unwrap_or(self.status);
        self
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> axum::response::Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        if let Some(total) = self.total_count {
            headers.insert(
                HeaderName::from_static("x-total-count"),
                HeaderValue::from(total),
            );
        }
        (self.status, headers, self.body).into_response()
    }
}

#[derive(Clone, Default)]
struct Script {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    replies: Arc<Mutex<VecDeque<MockResponse>>>,
}

impl Script {
    fn record(&self, request: CapturedRequest) -> MockResponse {
        self.requests.lock().unwrap().push(request);
        self.replies.lock().unwrap().pop_front().unwrap_or_default()
    }
}

/// Backend bound to an ephemeral localhost port for the life of the value.
pub struct MockBackend {
    addr: SocketAddr,
    script: Script,
    stop: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let script = Script::default();
        let handler_script = script.clone();
        let app = Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
                let script = handler_script.clone();
                async move {
                    script.record(CapturedRequest {
                        method: method.to_string(),
                        path: uri.path().to_string(),
                        query: uri.query().map(str::to_string),
                        headers,
                        body,
                    })
                }
            },
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("bound listener has an address");
        let (stop, stopped) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stopped.await;
                })
                .await;
        });

        Self {
            addr,
            script,
            stop: Some(stop),
        }
    }

    /// Queue the reply for the next unanswered request.
    pub async fn enqueue_response(&self, response: MockResponse) {
        self.script.replies.lock().unwrap().push_back(response);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.script.requests.lock().unwrap().clone()
    }

    /// The single captured request; panics unless exactly one arrived.
    pub async fn only_request(&self) -> CapturedRequest {
        let mut requests = self.captured_requests().await;
        assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
        requests.remove(0)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}
