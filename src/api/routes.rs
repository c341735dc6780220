use axum::{
    routing::{get, post},
    Router,
    extract::{rejection::JsonRejection, Json, State},
    response::IntoResponse,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use std::time::Instant;

use crate::error::{Result, AppError};
use crate::api::models::{RawSummaryRequest, SummaryRequest};
use crate::api::response::{self, split_points};
use crate::scraper::fetch_html;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let static_dir = app_state.config.static_dir.clone();
    let front_end = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/summarize", post(summarize_handler))
        .route("/healthcheck", get(healthcheck))
        .fallback_service(front_end)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn healthcheck() -> &'static str {
    "ok"
}

async fn summarize_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<RawSummaryRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(raw) = body.map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;
    let req = raw.validate(&state.config.article_domain)?;

    tracing::info!(url = %req.url, "summarizing article");
    let points = summarize_article(&state, &req).await?;
    tracing::info!(url = %req.url, points = points.len(), "summary ready");

    Ok(response::success(points))
}

/// Fetch, extract, summarize, split. Runs only on validated input.
async fn summarize_article(state: &AppState, req: &SummaryRequest) -> Result<Vec<String>> {
    let fetch_start = Instant::now();
    let html = fetch_html(&req.url).await?;
    tracing::debug!(bytes = html.len(), elapsed = ?fetch_start.elapsed(), "fetched article");

    let text = state.extractor.extract(&html)?;
    tracing::debug!(chars = text.len(), "extracted article text");

    let summarize_start = Instant::now();
    let summary = state.summarizer.summarize(&text, req).await?;
    tracing::debug!(elapsed = ?summarize_start.elapsed(), "summarization service responded");

    Ok(split_points(&summary))
}
