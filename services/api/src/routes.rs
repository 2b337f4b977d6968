use crate::infra::{resolve_session_config, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use net_benefit::error::AppError;
use net_benefit::import::OutcomeTableImporter;
use net_benefit::scoring::{
    ConstraintInputs, ImportanceScale, NetBanding, OutcomeRecord, ScoreResult, WeightingScheme,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) outcomes: Vec<OutcomeRecord>,
    /// Raw outcome table export; replaces `outcomes` when present.
    #[serde(default)]
    pub(crate) outcomes_csv: Option<String>,
    #[serde(default)]
    pub(crate) scheme: Option<WeightingScheme>,
    #[serde(default)]
    pub(crate) scale: Option<ImportanceScale>,
    #[serde(default)]
    pub(crate) banding: Option<NetBanding>,
    #[serde(default)]
    pub(crate) constraints: ConstraintInputs,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) scored_at: DateTime<Utc>,
    pub(crate) data_source: OutcomeDataSource,
    pub(crate) summary: String,
    #[serde(flatten)]
    pub(crate) result: ScoreResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OutcomeDataSource {
    Inline,
    Csv,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/score", post(score_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let ScoreRequest {
        outcomes,
        outcomes_csv,
        scheme,
        scale,
        banding,
        constraints,
    } = payload;

    let (outcomes, data_source) = match outcomes_csv {
        Some(csv) => {
            let reader = Cursor::new(csv.into_bytes());
            let imported = OutcomeTableImporter::from_reader(reader)?;
            (imported, OutcomeDataSource::Csv)
        }
        None => (outcomes, OutcomeDataSource::Inline),
    };

    let session = resolve_session_config(state.scoring, scheme, scale, banding).session();
    let result = session.score(&outcomes, &constraints)?;
    let summary = result.summary();

    info!(
        outcomes = outcomes.len(),
        ?data_source,
        net_per_1000 = result.net_per_1000,
        "scored net benefit request"
    );

    Ok(Json(ScoreResponse {
        scored_at: Utc::now(),
        data_source,
        summary,
        result,
    }))
}
