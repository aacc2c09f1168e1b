//! Settlement record and result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Graded outcome of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ResultStatus {
    /// Wager won.
    Win,
    /// Wager lost.
    Loss,
    /// Graded even; stake returned.
    Push,
    /// Voided; stake returned.
    Void,
}

impl ResultStatus {
    /// Push and Void both count as a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, ResultStatus::Push | ResultStatus::Void)
    }
}

/// A normalized graded wager, sized in units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInput {
    /// Raw result status; classified case-insensitively when settled.
    #[serde(alias = "resultStatus")]
    pub result_status: String,
    /// Units risked.
    #[serde(alias = "unit")]
    pub unit_size: Decimal,
    /// Signed American odds magnitude (e.g. -150, 120).
    #[serde(alias = "selection.odds")]
    pub odds: Decimal,
}

impl SettlementInput {
    /// Create a settlement input.
    pub fn new(result_status: impl Into<String>, unit_size: Decimal, odds: Decimal) -> Self {
        Self {
            result_status: result_status.into(),
            unit_size,
            odds,
        }
    }
}

/// Win/loss/draw counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SettlementRecord {
    /// Winning wagers.
    pub wins: u64,
    /// Losing wagers.
    pub losses: u64,
    /// Pushed or voided wagers.
    pub draws: u64,
}

impl SettlementRecord {
    /// Number of graded wagers.
    pub fn total(&self) -> u64 {
        self.wins + self.losses + self.draws
    }
}

/// Aggregated performance over a batch of graded wagers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementResult {
    /// Win/loss/draw counts.
    pub record: SettlementRecord,
    /// Net units won (positive) or lost (negative).
    #[serde(with = "rust_decimal::serde::float")]
    pub net_result: Decimal,
    /// Units wagered, draws included.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_units: Decimal,
    /// Net result per unit wagered.
    #[serde(with = "rust_decimal::serde::float")]
    pub roi: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("win".parse::<ResultStatus>().unwrap(), ResultStatus::Win);
        assert_eq!("LOSS".parse::<ResultStatus>().unwrap(), ResultStatus::Loss);
        assert_eq!("PuSh".parse::<ResultStatus>().unwrap(), ResultStatus::Push);
        assert!("Cancelled".parse::<ResultStatus>().is_err());
    }

    #[test]
    fn draws_are_push_and_void() {
        assert!(ResultStatus::Push.is_draw());
        assert!(ResultStatus::Void.is_draw());
        assert!(!ResultStatus::Win.is_draw());
    }

    #[test]
    fn input_accepts_scraped_field_names() {
        let json = r#"{"resultStatus": "Win", "unit": 0.5, "selection.odds": -165}"#;
        let input: SettlementInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, SettlementInput::new("Win", dec!(0.5), dec!(-165)));
    }
}
