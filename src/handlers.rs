use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::Engine as _;

use crate::data::parser;
use crate::error::ApiError;
use crate::models::{ChartQuery, ChartResponse, LoadDataRequest, LoadDataResponse};
use crate::processing::statistics::{CentralTendency, Dispersion, Summary};
use crate::render::chart::ChartKind;
use crate::state::dataset::DatasetInfo;
use crate::state::theme::Theme;
use crate::AppState;

pub async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

/// `POST /api/load-data` with `{"data": [numbers]}`.
pub async fn load_data(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoadDataResponse>, ApiError> {
    let request: LoadDataRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::invalid_payload(e.to_string()))?;
    let outcome = state.analyzer.load(request.data.unwrap_or_default())?;
    Ok(Json(LoadDataResponse::loaded(outcome.count)))
}

/// `POST /api/load-text` with delimited numbers as the raw body.
pub async fn load_text(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoadDataResponse>, ApiError> {
    let text = std::str::from_utf8(&body)
        .map_err(|e| ApiError::invalid_payload(format!("body is not UTF-8: {e}")))?;
    let parsed = parser::parse_values(text).map_err(ApiError::invalid_payload)?;
    if let Some(header) = &parsed.header {
        tracing::debug!(?header, "skipped header row");
    }
    let outcome = state.analyzer.load(parsed.values)?;
    Ok(Json(LoadDataResponse::loaded(outcome.count)))
}

pub async fn dataset_info(State(state): State<AppState>) -> Result<Json<DatasetInfo>, ApiError> {
    Ok(Json(state.analyzer.info()?))
}

pub async fn central_tendency(
    State(state): State<AppState>,
) -> Result<Json<CentralTendency>, ApiError> {
    Ok(Json(state.analyzer.central_tendency()?))
}

pub async fn dispersion(State(state): State<AppState>) -> Result<Json<Dispersion>, ApiError> {
    Ok(Json(state.analyzer.dispersion()?))
}

pub async fn full_statistics(State(state): State<AppState>) -> Result<Json<Summary>, ApiError> {
    Ok(Json(state.analyzer.summary()?))
}

/// `GET /api/chart/{kind}`. The kind is validated before the dataset is
/// looked at; rendering runs on the blocking pool.
pub async fn chart(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    let kind: ChartKind = kind.parse()?;

    let mut style = state.chart_style;
    if let Some(theme) = query.theme.as_deref() {
        style.theme = theme.parse::<Theme>().map_err(ApiError::invalid_query)?;
    }

    let analyzer = Arc::clone(&state.analyzer);
    let png = tokio::task::spawn_blocking(move || analyzer.render_chart(kind, &style))
        .await
        .map_err(|e| ApiError::TaskFailed {
            context: format!("{kind} render: {e}"),
        })??;

    let encoded = base64::engine::general_purpose::STANDARD.encode(png);
    Ok(Json(ChartResponse {
        image: format!("data:image/png;base64,{encoded}"),
    }))
}
