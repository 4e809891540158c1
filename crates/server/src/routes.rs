use axum::extract::{Query, State};
use axum::http::Method;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use vidinfo_core::error::GatewayError;
use vidinfo_core::types::VideoInfo;

use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api", api_router())
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);
    Router::new().route("/video", get(video_info)).layer(cors)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Re-read on every request so template edits show up without a restart.
async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = tokio::fs::read_to_string(&state.template_path)
        .await
        .map_err(|e| {
            GatewayError::Template(format!("open {}: {e}", state.template_path.display()))
        })?;
    Ok(Html(page))
}

// ---------------------------------------------------------------------------
// Video info
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct VideoQuery {
    url: Option<String>,
}

async fn video_info(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Result<Json<VideoInfo>, AppError> {
    let url = query
        .url
        .filter(|u| !u.is_empty())
        .ok_or(GatewayError::MissingParameter)?;

    let raw = state.source.fetch_info(&url).await?;
    let info = vidinfo_extractor::simplify(raw);
    info!(url = %url, files = info.files.len(), "video info served");
    Ok(Json(info))
}
