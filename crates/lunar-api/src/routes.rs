//! Axum router and HTTP handlers.
//!
//! `build_router` is the single entry point; `main.rs` calls it with the
//! parts of a built `App`, tests call it with their own.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use lunar_core::QueryError;
use lunar_core::app::IngestService;
use lunar_core::domain::{MessageEnvelope, SortKey, SortOrder};
use lunar_core::ports::RocketReader;

use crate::errors::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<IngestService>,
    pub reader: Arc<dyn RocketReader>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/messages", post(post_message))
        .route("/api/rockets", get(list_rockets))
        .route("/api/rockets/:channel", get(get_rocket))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

// ---------------------------------------------------------------------------
// POST /messages
// ---------------------------------------------------------------------------

async fn post_message(
    State(st): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    // parse ourselves so malformed JSON gets the same error body as validation
    let envelope: MessageEnvelope = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))?;
    st.ingest.submit(&envelope).await?;
    Ok(StatusCode::ACCEPTED)
}

// ---------------------------------------------------------------------------
// GET /api/rockets
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ListParams {
    /// Absent parameters fall back to channel / asc; present-but-empty ones are rejected.
    pub fn parse(&self) -> Result<(SortKey, SortOrder), QueryError> {
        let sort = match &self.sort {
            Some(raw) => raw.parse()?,
            None => SortKey::default(),
        };
        let order = match &self.order {
            Some(raw) => raw.parse()?,
            None => SortOrder::default(),
        };
        Ok((sort, order))
    }
}

async fn list_rockets(
    State(st): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let (sort, order) = params.parse()?;
    let rockets = st.reader.list(sort, order).await;
    Ok((StatusCode::OK, Json(rockets)))
}

// ---------------------------------------------------------------------------
// GET /api/rockets/:channel
// ---------------------------------------------------------------------------

async fn get_rocket(
    State(st): State<AppState>,
    Path(channel): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rocket = st
        .reader
        .get(&channel)
        .await
        .ok_or_else(|| QueryError::NotFound(channel.clone()))?;
    Ok((StatusCode::OK, Json(rocket)))
}
