//! Dicebins HTTP API
//!
//! A stateless axum service around [`dicebins_calculator`]: every request
//! carries its own dice and precinct counts and is answered from scratch.

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use chrono::{DateTime, Utc};
use dicebins_calculator::BinCalculator;
use tower_http::cors::CorsLayer;
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info};

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod tracing_setup;
pub mod types;

use config::DicebinsConfig;

/// Shared, read-only application state.
#[derive(Debug)]
pub struct AppState {
    pub start_time: DateTime<Utc>,
    pub config: DicebinsConfig,
    pub calculator: BinCalculator,
}

impl AppState {
    pub fn new(config: DicebinsConfig) -> Self {
        Self { start_time: Utc::now(), config, calculator: BinCalculator::new() }
    }

    pub fn elapsed(&self) -> Duration {
        (Utc::now() - self.start_time).to_std().unwrap_or_default()
    }
}

pub fn create_app(config: DicebinsConfig) -> Router {
    info!(
        max_precincts = config.limits.max_precincts,
        enable_cors = config.server.enable_cors,
        "Building router"
    );
    let enable_cors = config.server.enable_cors;
    let state = Arc::new(AppState::new(config));

    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/bins", get(handlers::bins_json))
        .route("/api/v1/bins/text", get(handlers::bins_text))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        );

    if enable_cors { router.layer(CorsLayer::permissive()) } else { router }
}
