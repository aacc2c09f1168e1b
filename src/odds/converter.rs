//! Conversion between American and decimal odds.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::instrument;

use super::types::{AmericanOdds, FormattedOdds, OddsSide};
use crate::error::OddsError;

/// Decimal odds of even money. Quoted as `+100`, never `-100`.
pub const EVEN_MONEY: Decimal = dec!(2);

/// Parse an American odds string into decimal odds.
///
/// `+150` becomes 2.5, `-200` becomes 1.5. A quotation without a sign is
/// read as underdog odds.
#[instrument(level = "trace")]
pub fn parse_american_odds(odds: &str) -> Result<Decimal, OddsError> {
    Ok(odds.parse::<AmericanOdds>()?.decimal_odds())
}

/// Convert decimal odds to an American quotation.
///
/// Underdog magnitudes are truncated toward zero, favorite magnitudes are
/// rounded to the nearest integer.
#[instrument(level = "trace")]
pub fn decimal_to_american_odds(decimal_odds: Decimal) -> Result<FormattedOdds, OddsError> {
    if decimal_odds < Decimal::ONE {
        return Err(OddsError::InvalidMultiplier(decimal_odds));
    }

    if decimal_odds == Decimal::ONE {
        return Ok(FormattedOdds::Undefined);
    }

    let profit_per_unit = decimal_odds - Decimal::ONE;
    let (side, magnitude) = if decimal_odds >= EVEN_MONEY {
        let magnitude = profit_per_unit.checked_mul(Decimal::ONE_HUNDRED).map(|m| m.trunc());
        (OddsSide::Underdog, magnitude)
    } else {
        let magnitude = Decimal::ONE_HUNDRED.checked_div(profit_per_unit).map(|m| m.round());
        (OddsSide::Favorite, magnitude)
    };

    let magnitude = magnitude.ok_or(OddsError::InvalidMultiplier(decimal_odds))?;
    let odds = AmericanOdds::new(side, magnitude)
        .map_err(|_| OddsError::InvalidMultiplier(decimal_odds))?;

    Ok(FormattedOdds::Quoted(odds))
}

/// Parse a quotation and format it back, normalizing it.
///
/// `-100` comes back as `+100`; fractional underdog magnitudes are truncated.
pub fn normalize_american_odds(odds: &str) -> Result<FormattedOdds, OddsError> {
    decimal_to_american_odds(parse_american_odds(odds)?)
}
