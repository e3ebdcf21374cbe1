//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Json, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::state::AppState;
use crate::error::HashtagError;
use crate::request::HashtagRequest;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_size = state.config.max_body_size;
    let cors_enabled = state.config.cors_enabled;

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/hashtags", post(generate_hashtags))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server answers
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Seconds since the server state was created
    pub uptime_secs: u64,
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime().as_secs(),
    })
}

/// Generate hashtags for the posted text
async fn generate_hashtags(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<HashtagRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return HashtagError::InvalidInput(rejection.body_text()).into_response();
        },
    };

    match state.service.generate(&request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

impl IntoResponse for HashtagError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}
