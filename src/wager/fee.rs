//! Fee-adjusted ("effective") odds.
//!
//! A fee is a fraction of the winning profit retained by the house. It is
//! applied to the profit component of the decimal odds only; the returned
//! stake is untouched.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, instrument};

use crate::error::WagerError;
use crate::odds::{decimal_to_american_odds, parse_american_odds, FormattedOdds};

/// Fee applied when the caller does not supply one (3% of profit).
pub const DEFAULT_FEE: Decimal = dec!(0.03);

/// Check that a fee lies in `[0, 1)`.
///
/// Negative fees (rebates) are rejected.
pub fn validate_fee(fee: Decimal) -> Result<Decimal, WagerError> {
    if fee < Decimal::ZERO || fee >= Decimal::ONE {
        return Err(WagerError::InvalidFee(fee));
    }
    Ok(fee)
}

/// Decimal odds after taking `fee` out of the profit component.
pub fn effective_decimal_odds(odds: &str, fee: Decimal) -> Result<Decimal, WagerError> {
    let fee = validate_fee(fee)?;
    let decimal_odds = parse_american_odds(odds)?;

    let adjusted_profit = (decimal_odds - Decimal::ONE) * (Decimal::ONE - fee);
    Ok(Decimal::ONE + adjusted_profit)
}

/// American odds after taking `fee` out of the profit component.
#[instrument(fields(fee = %fee))]
pub fn effective_odds(odds: &str, fee: Decimal) -> Result<FormattedOdds, WagerError> {
    let effective = effective_decimal_odds(odds, fee)?;
    let formatted = decimal_to_american_odds(effective)?;

    debug!(effective_decimal_odds = %effective, effective_odds = %formatted, "Effective odds calculated");

    Ok(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::normalize_american_odds;
    use crate::wager::odds_from_stake_payout;

    #[test]
    fn zero_fee_is_identity() {
        for odds in ["+150", "-200", "-110", "+100", "-100", "+133.7"] {
            assert_eq!(
                effective_odds(odds, Decimal::ZERO).unwrap(),
                normalize_american_odds(odds).unwrap(),
                "{odds}"
            );
        }
    }

    #[test]
    fn default_fee_examples() {
        assert_eq!(effective_odds("-105", DEFAULT_FEE).unwrap().to_string(), "-108");
        assert_eq!(effective_odds("-110", DEFAULT_FEE).unwrap().to_string(), "-113");
        assert_eq!(effective_odds("+125", DEFAULT_FEE).unwrap().to_string(), "+121");
        // Even money drops below 2.0 and flips to the favorite side.
        assert_eq!(effective_odds("+100", DEFAULT_FEE).unwrap().to_string(), "-103");
    }

    #[test]
    fn matches_stake_payout_derivation() {
        let stake = dec!(100);
        for odds in ["-105", "+125", "-250", "+310"] {
            let decimal_odds = parse_american_odds(odds).unwrap();
            let adjusted_profit = stake * (decimal_odds - Decimal::ONE) * (Decimal::ONE - DEFAULT_FEE);
            let expected = odds_from_stake_payout(stake, stake + adjusted_profit).unwrap().odds;

            assert_eq!(effective_odds(odds, DEFAULT_FEE).unwrap(), expected, "{odds}");
        }
    }

    #[test]
    fn positive_fee_shrinks_profit() {
        let base = parse_american_odds("+200").unwrap();
        let adjusted = effective_decimal_odds("+200", dec!(0.1)).unwrap();
        assert!(adjusted < base);
        assert_eq!(adjusted, dec!(2.8));
    }

    #[test]
    fn fee_bounds_are_enforced() {
        assert_eq!(effective_odds("+150", dec!(-0.01)), Err(WagerError::InvalidFee(dec!(-0.01))));
        assert_eq!(effective_odds("+150", Decimal::ONE), Err(WagerError::InvalidFee(Decimal::ONE)));
        assert_eq!(effective_odds("+150", dec!(1.5)), Err(WagerError::InvalidFee(dec!(1.5))));
        assert!(effective_odds("+150", dec!(0.999)).is_ok());
    }

    #[test]
    fn invalid_odds_propagate() {
        assert!(matches!(effective_odds("abc", DEFAULT_FEE), Err(WagerError::Odds(_))));
    }
}
