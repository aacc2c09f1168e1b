//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    calculate_effective_odds, calculate_odds, calculate_payout, calculate_stake, health, index,
    metrics_text, settle, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        // Health and metrics
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        // Calculators
        .route("/calculate/payout", post(calculate_payout))
        .route("/calculate/stake", post(calculate_stake))
        .route("/calculate/odds", post(calculate_odds))
        .route("/calculate/effective-odds", post(calculate_effective_odds))
        .route("/settlement", post(settle))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
