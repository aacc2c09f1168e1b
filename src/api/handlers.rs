//! HTTP API handlers.
//!
//! Handlers only decode requests, call the calculators and encode results.
//! Validation lives in the calculators; their errors become 400 responses.

use std::error::Error as _;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::error::AppError;
use crate::metrics::{self, LatencyTimer, Operation};
use crate::odds::{AmericanOdds, FormattedOdds};
use crate::settlement::{compute_settlement, SettlementInput, SettlementResult};
use crate::wager::{
    effective_odds, odds_from_stake_payout, payout_from_odds, stake_from_odds, DEFAULT_FEE,
};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Fee used when an effective-odds request omits one.
    pub default_fee: Decimal,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(default_fee: Decimal) -> Self {
        Self {
            default_fee,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_FEE)
    }
}

/// Error returned to API clients as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        // Clients see the domain message without the category prefix.
        if err.is_client_error() {
            let message = err
                .source()
                .map(ToString::to_string)
                .unwrap_or_else(|| err.to_string());
            return Self::bad_request(message);
        }

        error!(error = %err, "Unhandled error in request");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_string(),
        }
    }
}

/// Payout request body.
#[derive(Debug, Deserialize)]
pub struct PayoutRequest {
    /// American odds (e.g. "+150").
    pub odds: String,
    /// Amount wagered.
    pub stake: Decimal,
}

/// Payout response body.
#[derive(Debug, Serialize)]
pub struct PayoutResponse {
    /// Total payout including stake.
    #[serde(with = "rust_decimal::serde::float")]
    pub payout: Decimal,
    /// Profit.
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
}

/// Stake request body.
#[derive(Debug, Deserialize)]
pub struct StakeRequest {
    /// American odds.
    pub odds: String,
    /// Desired total payout.
    pub payout: Decimal,
}

/// Stake response body.
#[derive(Debug, Serialize)]
pub struct StakeResponse {
    /// Required stake.
    #[serde(with = "rust_decimal::serde::float")]
    pub stake: Decimal,
    /// Profit.
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
}

/// Odds request body.
#[derive(Debug, Deserialize)]
pub struct OddsRequest {
    /// Amount wagered.
    pub stake: Decimal,
    /// Desired total payout.
    pub payout: Decimal,
}

/// Odds response body.
#[derive(Debug, Serialize)]
pub struct OddsResponse {
    /// American odds.
    pub odds: FormattedOdds,
    /// Decimal odds, 4 places.
    #[serde(with = "rust_decimal::serde::float")]
    pub decimal_odds: Decimal,
}

/// Effective odds request body.
#[derive(Debug, Deserialize)]
pub struct EffectiveOddsRequest {
    /// American odds before the fee.
    pub odds: String,
    /// Fee on profit; the server default when omitted.
    #[serde(default)]
    pub fee: Option<Decimal>,
}

/// Effective odds response body.
#[derive(Debug, Serialize)]
pub struct EffectiveOddsResponse {
    /// Odds as quoted.
    pub odds: String,
    /// Odds after the fee.
    pub effective_odds: FormattedOdds,
    /// Fee applied.
    #[serde(with = "rust_decimal::serde::float")]
    pub fee: Decimal,
}

fn tracked<T, E: Into<AppError>>(operation: Operation, result: Result<T, E>) -> Result<T, AppError> {
    metrics::record_calculation(operation, result.is_ok());
    result.map_err(|e| {
        let err = e.into();
        warn!(%operation, error = %err, "Rejected calculation request");
        err
    })
}

/// API info handler.
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "name": "Wager Calculator API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/calculate/payout": "Calculate payout from odds and stake",
            "/calculate/stake": "Calculate stake from odds and payout",
            "/calculate/odds": "Calculate odds from stake and payout",
            "/calculate/effective-odds": "Calculate odds after a fee on profit",
            "/settlement": "Aggregate graded wagers into a record and ROI"
        },
        "usage": "Send POST requests with JSON data to the endpoints"
    }))
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Prometheus metrics handler.
pub async fn metrics_text(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Payout from odds and stake.
pub async fn calculate_payout(
    payload: Result<Json<PayoutRequest>, JsonRejection>,
) -> Result<Json<PayoutResponse>, ApiError> {
    let _timer = LatencyTimer::new("/calculate/payout");
    let Json(req) = payload?;

    let quote = tracked(Operation::Payout, payout_from_odds(&req.odds, req.stake))?;

    Ok(Json(PayoutResponse {
        payout: quote.payout,
        profit: quote.profit,
    }))
}

/// Stake from odds and desired payout.
pub async fn calculate_stake(
    payload: Result<Json<StakeRequest>, JsonRejection>,
) -> Result<Json<StakeResponse>, ApiError> {
    let _timer = LatencyTimer::new("/calculate/stake");
    let Json(req) = payload?;

    let quote = tracked(Operation::Stake, stake_from_odds(&req.odds, req.payout))?;

    Ok(Json(StakeResponse {
        stake: quote.stake,
        profit: quote.profit,
    }))
}

/// Odds from stake and desired payout.
pub async fn calculate_odds(
    payload: Result<Json<OddsRequest>, JsonRejection>,
) -> Result<Json<OddsResponse>, ApiError> {
    let _timer = LatencyTimer::new("/calculate/odds");
    let Json(req) = payload?;

    let quote = tracked(Operation::Odds, odds_from_stake_payout(req.stake, req.payout))?;

    Ok(Json(OddsResponse {
        odds: quote.odds,
        decimal_odds: quote.decimal_odds,
    }))
}

/// Fee-adjusted odds.
pub async fn calculate_effective_odds(
    State(state): State<AppState>,
    payload: Result<Json<EffectiveOddsRequest>, JsonRejection>,
) -> Result<Json<EffectiveOddsResponse>, ApiError> {
    let _timer = LatencyTimer::new("/calculate/effective-odds");
    let Json(req) = payload?;
    let fee = req.fee.unwrap_or(state.default_fee);

    let effective = tracked(Operation::EffectiveOdds, effective_odds(&req.odds, fee))?;

    // Echo the quotation in canonical form.
    let odds = req
        .odds
        .parse::<AmericanOdds>()
        .map(|o| o.to_string())
        .unwrap_or(req.odds);

    Ok(Json(EffectiveOddsResponse {
        odds,
        effective_odds: effective,
        fee,
    }))
}

/// Aggregate a batch of graded wagers.
pub async fn settle(
    payload: Result<Json<Vec<SettlementInput>>, JsonRejection>,
) -> Result<Json<SettlementResult>, ApiError> {
    let _timer = LatencyTimer::new("/settlement");
    let Json(records) = payload?;

    let result = tracked(Operation::Settlement, compute_settlement(&records))?;
    metrics::inc_settlement_records(records.len());

    Ok(Json(result))
}
