//! American odds conversion, bet math and wager settlement.
//!
//! The calculators are pure functions over [`rust_decimal::Decimal`]. Money is
//! rounded to cents only when a result is returned, never in between:
//!
//! ```text
//! Odds:    +150  -> decimal 2.5
//! Stake:   $100
//! ───────────────────────
//! Payout:  $250.00
//! Profit:  $150.00
//! ```
//!
//! # Modules
//!
//! - [`odds`]: American/decimal odds parsing and formatting
//! - [`wager`]: Payout, stake, odds and fee-adjusted odds calculations
//! - [`settlement`]: Win/loss/draw record, net units and ROI over graded wagers
//! - [`ingest`]: Turning scraped pick payloads into settlement inputs
//! - [`api`]: HTTP API over the calculators
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod odds;
pub mod settlement;
pub mod utils;
pub mod wager;

pub use config::Config;
pub use error::{AppError, Result};
