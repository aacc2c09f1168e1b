//! Wager and calculation result types.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::WagerError;
use crate::odds::{AmericanOdds, FormattedOdds};

/// A stake placed at a given quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wager {
    stake: Decimal,
    odds: AmericanOdds,
}

impl Wager {
    /// Create a wager. The stake must be strictly positive.
    pub fn new(odds: AmericanOdds, stake: Decimal) -> Result<Self, WagerError> {
        if stake <= Decimal::ZERO {
            return Err(WagerError::InvalidStake(stake));
        }

        // Reject stakes whose payout would not fit in a Decimal.
        if stake.checked_mul(odds.decimal_odds()).is_none() {
            return Err(WagerError::InvalidStake(stake));
        }

        Ok(Self { stake, odds })
    }

    /// Quotation the wager was placed at.
    pub fn odds(&self) -> AmericanOdds {
        self.odds
    }

    /// Total returned on a win (stake included), unrounded.
    pub fn payout(&self) -> Decimal {
        self.stake * self.odds.decimal_odds()
    }
}

/// Payout for a stake at given odds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoutQuote {
    /// Total payout including stake, rounded to cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub payout: Decimal,
    /// Payout minus stake, rounded to cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    /// Stake as supplied.
    #[serde(with = "rust_decimal::serde::float")]
    pub stake: Decimal,
    /// Quotation as parsed.
    pub odds: AmericanOdds,
}

/// Stake required for a desired payout at given odds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StakeQuote {
    /// Required stake, rounded to cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub stake: Decimal,
    /// Expected profit, rounded to cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    /// Desired payout as supplied.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payout: Decimal,
    /// Quotation as parsed.
    pub odds: AmericanOdds,
}

/// Odds implied by a stake and a desired payout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OddsQuote {
    /// American quotation.
    pub odds: FormattedOdds,
    /// Decimal odds, rounded to 4 places for display.
    #[serde(with = "rust_decimal::serde::float")]
    pub decimal_odds: Decimal,
    /// Stake as supplied.
    #[serde(with = "rust_decimal::serde::float")]
    pub stake: Decimal,
    /// Desired payout as supplied.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payout: Decimal,
    /// Payout minus stake, rounded to cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub profit: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn wager_rejects_non_positive_stake() {
        let odds: AmericanOdds = "+150".parse().unwrap();
        assert_eq!(Wager::new(odds, dec!(0)), Err(WagerError::InvalidStake(dec!(0))));
        assert_eq!(Wager::new(odds, dec!(-50)), Err(WagerError::InvalidStake(dec!(-50))));
    }

    #[test]
    fn wager_payout_is_unrounded() {
        let odds: AmericanOdds = "-110".parse().unwrap();
        let wager = Wager::new(odds, dec!(10)).unwrap();

        assert!(wager.payout() > dec!(19.09) && wager.payout() < dec!(19.1));
        assert_ne!(wager.payout(), wager.payout().round_dp(2));
    }

    #[test]
    fn wager_rejects_overflowing_stake() {
        let odds: AmericanOdds = "+500".parse().unwrap();
        assert!(Wager::new(odds, Decimal::MAX).is_err());
    }
}
