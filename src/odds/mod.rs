//! Odds module for American/decimal odds conversion.
//!
//! This module handles:
//! - Parsing signed quotations (`+150`, `-200`) into decimal odds
//! - Formatting decimal odds back into quotations

pub mod converter;
pub mod types;

pub use converter::{decimal_to_american_odds, normalize_american_odds, parse_american_odds, EVEN_MONEY};
pub use types::{AmericanOdds, FormattedOdds, OddsSide};
