//! Local HTTP stubs for provider and asset tests.

use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::header;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub struct Stub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Stub {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serves every request on a loopback port with `respond`, recording it first.
pub async fn serve<F>(respond: F) -> Stub
where
    F: Fn(&RecordedRequest) -> Response + Clone + Send + Sync + 'static,
{
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    let app = Router::new().fallback(move |request: Request| {
        let respond = respond.clone();
        let log = Arc::clone(&log);
        async move {
            let (parts, body) = request.into_parts();
            let recorded = RecordedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                authorization: parts
                    .headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: to_bytes(body, usize::MAX).await.unwrap().to_vec(),
            };
            log.lock().unwrap().push(recorded.clone());
            respond(&recorded)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Stub {
        base_url: format!("http://{addr}"),
        requests,
    }
}

/// Response with a status, content type and body.
pub fn reply(status: u16, content_type: &str, body: impl Into<axum::body::Body>) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap()
}
