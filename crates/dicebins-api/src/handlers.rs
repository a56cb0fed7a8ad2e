use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::render::render_text;
use crate::types::{BinsResponse, HealthResponse};
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use dicebins_calculator::{Calculation, RawInput};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs the calculator and applies the per-response precinct cap.
fn run(state: &AppState, raw: &RawInput) -> ApiResult<Calculation> {
    let calculation = state.calculator.evaluate(raw).map_err(|errors| {
        info!(
            detected = ?errors.detected(),
            reported = ?errors.reported(),
            "Rejected bin request"
        );
        ApiError::from(errors)
    })?;

    let max_precincts = state.config.limits.max_precincts;
    if calculation.result.num_precincts() > u128::from(max_precincts) {
        info!(
            num_precincts = %calculation.result.num_precincts(),
            max_precincts, "Bin request exceeds precinct limit"
        );
        return Err(ApiError::validation_field(
            "InvalidPrecinctCount",
            "numprec",
            format!("The number of precincts may not exceed {max_precincts} per request."),
        ));
    }

    debug!(
        num_dice = calculation.result.num_dice(),
        num_precincts = %calculation.result.num_precincts(),
        interval = %calculation.result.interval(),
        modulus = %calculation.result.modulus(),
        paste_mode = calculation.paste_mode.is_on(),
        "Computed bins"
    );
    Ok(calculation)
}

pub async fn bins_json(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawInput>,
) -> ApiResult<Json<BinsResponse>> {
    let calculation = run(&state, &raw)?;
    Ok(Json(BinsResponse::from(&calculation)))
}

pub async fn bins_text(State(state): State<Arc<AppState>>, Query(raw): Query<RawInput>) -> Response {
    match run(&state, &raw) {
        Ok(calculation) => render_text(&calculation).into_response(),
        Err(err) => err.into_text_response(),
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.elapsed().as_secs(),
        timestamp: Utc::now(),
    })
}
