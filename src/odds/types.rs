//! American odds quotation types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use strum::Display;

use crate::error::OddsError;

/// Which side of the line a quotation sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum OddsSide {
    /// `+` odds: profit exceeds the amount risked.
    #[strum(serialize = "+")]
    Underdog,
    /// `-` odds: profit is less than the amount risked.
    #[strum(serialize = "-")]
    Favorite,
}

/// A signed American odds quotation such as `+150` or `-200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AmericanOdds {
    side: OddsSide,
    magnitude: Decimal,
    decimal_odds: Decimal,
}

impl AmericanOdds {
    /// Create a quotation from a side and a strictly positive magnitude.
    pub fn new(side: OddsSide, magnitude: Decimal) -> Result<Self, OddsError> {
        let invalid = || OddsError::InvalidOddsFormat(format!("{side}{magnitude}"));

        if magnitude <= Decimal::ZERO {
            return Err(invalid());
        }

        let profit_per_unit = match side {
            OddsSide::Underdog => magnitude.checked_div(Decimal::ONE_HUNDRED),
            OddsSide::Favorite => Decimal::ONE_HUNDRED.checked_div(magnitude),
        };
        let decimal_odds = profit_per_unit
            .and_then(|p| p.checked_add(Decimal::ONE))
            .ok_or_else(invalid)?;

        Ok(Self {
            side,
            magnitude: magnitude.normalize(),
            decimal_odds,
        })
    }

    /// Equivalent decimal odds (payout per unit staked). Always > 1.
    pub fn decimal_odds(&self) -> Decimal {
        self.decimal_odds
    }
}

impl FromStr for AmericanOdds {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OddsError::InvalidOddsFormat(s.to_string());
        let trimmed = s.trim();

        // Unsigned quotations are read as underdog odds.
        let (side, digits) = match trimmed.chars().next() {
            None => return Err(invalid()),
            Some('+') => (OddsSide::Underdog, &trimmed[1..]),
            Some('-') => (OddsSide::Favorite, &trimmed[1..]),
            Some(_) => (OddsSide::Underdog, trimmed),
        };

        let magnitude = Decimal::from_str(digits).map_err(|_| invalid())?;
        Self::new(side, magnitude).map_err(|_| invalid())
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side, self.magnitude)
    }
}

impl Serialize for AmericanOdds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of formatting decimal odds as an American quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormattedOdds {
    /// A signed quotation.
    Quoted(AmericanOdds),
    /// Decimal odds of exactly 1.0: no profit, no signed form.
    Undefined,
}

impl fmt::Display for FormattedOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattedOdds::Quoted(odds) => odds.fmt(f),
            FormattedOdds::Undefined => f.write_str("Undefined"),
        }
    }
}

impl Serialize for FormattedOdds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
