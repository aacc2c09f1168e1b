//! Wager module for bet math.
//!
//! This module handles:
//! - Payout from odds and stake
//! - Stake from odds and desired payout
//! - Odds from stake and desired payout
//! - Fee-adjusted effective odds

pub mod calculator;
pub mod fee;
pub mod types;

pub use calculator::{odds_from_stake_payout, payout_from_odds, stake_from_odds};
pub use fee::{effective_decimal_odds, effective_odds, validate_fee, DEFAULT_FEE};
pub use types::{OddsQuote, PayoutQuote, StakeQuote, Wager};
