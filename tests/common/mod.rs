//! A local stand-in for the GitHub GraphQL endpoint.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

pub struct FakeGitHub {
    hits: AtomicUsize,
    reply: Mutex<(StatusCode, String)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeGitHub {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn set_reply(&self, status: StatusCode, body: impl Into<String>) {
        *self.reply.lock().unwrap() = (status, body.into());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn graphql(
    State(fake): State<Arc<FakeGitHub>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    fake.hits.fetch_add(1, Ordering::SeqCst);

    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let authorization = header_value(header::AUTHORIZATION);
    let content_type = header_value(header::CONTENT_TYPE);
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    fake.requests
        .lock()
        .unwrap()
        .push(RecordedRequest {
            authorization,
            content_type,
            body,
        });

    let (status, reply) = fake.reply.lock().unwrap().clone();
    (status, [(header::CONTENT_TYPE, "application/json")], reply).into_response()
}

/// Serves `POST /graphql` on an ephemeral port. Returns the base URL.
pub async fn spawn_fake_github(status: StatusCode, body: impl Into<String>) -> (String, Arc<FakeGitHub>) {
    let fake = Arc::new(FakeGitHub {
        hits: AtomicUsize::new(0),
        reply: Mutex::new((status, body.into())),
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/graphql", post(graphql))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), fake)
}

/// A calendar response with a single week holding `days` as `(date, count)`.
pub fn calendar_response(days: &[(&str, u32)]) -> String {
    let contribution_days: Vec<Value> = days
        .iter()
        .map(|(date, count)| json!({ "contributionCount": count, "date": date }))
        .collect();
    let total: u32 = days.iter().map(|(_, count)| count).sum();

    json!({
        "data": {
            "user": {
                "contributionsCollection": {
                    "contributionCalendar": {
                        "totalContributions": total,
                        "weeks": [{ "contributionDays": contribution_days }]
                    }
                }
            }
        }
    })
    .to_string()
}
