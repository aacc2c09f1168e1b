//! HTTP API module exposing the calculators and settlement over JSON.

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, AppState};
pub use routes::create_router;
