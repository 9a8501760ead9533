pub mod config;
pub mod contributions;
pub mod error;
pub mod fetcher;
pub mod github;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use config::AppConfig;
use contributions::{ContributionLevel, ContributionSnapshot, TodayProgress};
use error::FetchError;
use fetcher::ContributionFetcher;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// One cell of the contribution grid.
#[derive(Debug, Serialize)]
pub struct ContributionDayResponse {
    pub date: String,
    pub contribution_count: u32,
    pub level: ContributionLevel,
}

#[derive(Debug, Serialize)]
pub struct ContributionsResponse {
    pub username: String,
    pub total_contributions: u32,
    pub today_contribution_count: u32,
    pub days: Vec<ContributionDayResponse>,
}

impl ContributionsResponse {
    fn new(username: &str, snapshot: ContributionSnapshot) -> Self {
        Self {
            username: username.to_string(),
            total_contributions: snapshot.total_contributions,
            today_contribution_count: snapshot.today_contribution_count,
            days: snapshot
                .days
                .into_iter()
                .map(|day| ContributionDayResponse {
                    level: ContributionLevel::from_count(day.contribution_count),
                    date: day.date,
                    contribution_count: day.contribution_count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    /// The date the published count was resolved against; `None` before the first fetch.
    pub date: Option<String>,
    pub contribution_count: u32,
    pub progress: TodayProgress,
}

impl TodayResponse {
    fn new(snapshot: ContributionSnapshot) -> Self {
        Self {
            date: snapshot.today,
            contribution_count: snapshot.today_contribution_count,
            progress: TodayProgress::from_count(snapshot.today_contribution_count),
        }
    }
}

/// Shared application state accessible to all request handlers.
pub struct AppState {
    /// Fetches and holds the published contribution snapshot.
    pub fetcher: ContributionFetcher,
    /// Application configuration loaded from environment variables.
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let fetcher = ContributionFetcher::new(config.github_api_url.clone());
        Self { fetcher, config }
    }

    /// Runs one fetch for the configured user with the configured token.
    pub async fn refresh(&self) -> Result<ContributionSnapshot, FetchError> {
        let token = self.config.resolve_token()?;
        self.fetcher
            .fetch_contributions(&self.config.github_username, &token)
            .await
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/contributions", get(get_contributions))
        .route("/api/contributions/today", get(get_today))
        .route("/api/contributions/refresh", post(refresh_contributions))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "commit-grid",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_contributions(State(state): State<Arc<AppState>>) -> Json<ContributionsResponse> {
    Json(ContributionsResponse::new(
        &state.config.github_username,
        state.fetcher.current(),
    ))
}

pub async fn get_today(State(state): State<Arc<AppState>>) -> Json<TodayResponse> {
    Json(TodayResponse::new(state.fetcher.current()))
}

pub async fn refresh_contributions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContributionsResponse>, (StatusCode, String)> {
    match state.refresh().await {
        Ok(snapshot) => {
            tracing::debug!(username = %state.config.github_username, "Returning refreshed contributions");
            Ok(Json(ContributionsResponse::new(
                &state.config.github_username,
                snapshot,
            )))
        }
        Err(e) => Err(error_response(&e)),
    }
}

fn error_response(err: &FetchError) -> (StatusCode, String) {
    if err.is_rate_limited() {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            "GitHub Rate Limit Exceeded".to_string(),
        );
    }

    match err {
        FetchError::MissingCredential => (
            StatusCode::SERVICE_UNAVAILABLE,
            "GitHub token not configured".to_string(),
        ),
        FetchError::UserNotFound(_) => (StatusCode::NOT_FOUND, "User Not Found".to_string()),
        e if e.is_configuration() => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        _ => (StatusCode::BAD_GATEWAY, "Failed to fetch contributions".to_string()),
    }
}
