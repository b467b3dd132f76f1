use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod data;
pub mod error;
pub mod handlers;
pub mod models;
pub mod processing;
pub mod render;
pub mod state;

use render::canvas::ChartStyle;
use state::analyzer::StatisticalAnalyzer;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<StatisticalAnalyzer>,
    pub chart_style: ChartStyle,
}

impl AppState {
    pub fn new(chart_style: ChartStyle) -> Self {
        Self {
            analyzer: Arc::new(StatisticalAnalyzer::new()),
            chart_style,
        }
    }
}

/// Build the HTTP router. Any origin may call the API.
pub fn app(state: AppState, body_limit: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/api/load-data", post(handlers::load_data))
        .route("/api/load-text", post(handlers::load_text))
        .route("/api/dataset", get(handlers::dataset_info))
        .route("/api/central-tendency", get(handlers::central_tendency))
        .route("/api/dispersion", get(handlers::dispersion))
        .route("/api/full-statistics", get(handlers::full_statistics))
        .route("/api/chart/:kind", get(handlers::chart))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
