//! Payout, stake and odds calculations.
//!
//! Each calculation works on unrounded intermediates. Currency amounts are
//! rounded to cents only when the quote is built, so chained results never
//! drift by a cent.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::types::{OddsQuote, PayoutQuote, StakeQuote, Wager};
use crate::error::WagerError;
use crate::odds::{decimal_to_american_odds, AmericanOdds};

/// Decimal places for currency amounts.
pub const CURRENCY_DP: u32 = 2;

/// Decimal places for displayed decimal odds.
pub const DECIMAL_ODDS_DP: u32 = 4;

/// Calculate the payout for a stake at the given odds.
#[instrument(fields(stake = %stake))]
pub fn payout_from_odds(odds: &str, stake: Decimal) -> Result<PayoutQuote, WagerError> {
    if stake <= Decimal::ZERO {
        return Err(WagerError::InvalidStake(stake));
    }

    let wager = Wager::new(odds.parse::<AmericanOdds>()?, stake)?;
    let payout = wager.payout().round_dp(CURRENCY_DP);
    let profit = (payout - stake).round_dp(CURRENCY_DP);

    debug!(odds = %wager.odds(), %payout, %profit, "Payout calculated");

    Ok(PayoutQuote {
        payout,
        profit,
        stake,
        odds: wager.odds(),
    })
}

/// Calculate the stake needed to reach a desired payout at the given odds.
#[instrument(fields(desired_payout = %desired_payout))]
pub fn stake_from_odds(odds: &str, desired_payout: Decimal) -> Result<StakeQuote, WagerError> {
    if desired_payout <= Decimal::ZERO {
        return Err(WagerError::InvalidPayout(desired_payout));
    }

    let odds = odds.parse::<AmericanOdds>()?;

    // Decimal odds are always > 1, so this never overflows.
    let stake = desired_payout / odds.decimal_odds();
    let profit = desired_payout - stake;

    debug!(%odds, %stake, %profit, "Stake calculated");

    Ok(StakeQuote {
        stake: stake.round_dp(CURRENCY_DP),
        profit: profit.round_dp(CURRENCY_DP),
        total_payout: desired_payout,
        odds,
    })
}

/// Calculate the odds at which a stake returns the desired payout.
#[instrument(fields(stake = %stake, desired_payout = %desired_payout))]
pub fn odds_from_stake_payout(
    stake: Decimal,
    desired_payout: Decimal,
) -> Result<OddsQuote, WagerError> {
    if stake <= Decimal::ZERO {
        return Err(WagerError::InvalidStake(stake));
    }

    if desired_payout <= Decimal::ZERO {
        return Err(WagerError::InvalidPayout(desired_payout));
    }

    if desired_payout <= stake {
        return Err(WagerError::InvalidPayoutRelation {
            stake,
            payout: desired_payout,
        });
    }

    let decimal_odds = desired_payout
        .checked_div(stake)
        .ok_or(WagerError::InvalidStake(stake))?;
    let odds = decimal_to_american_odds(decimal_odds)?;

    debug!(%odds, %decimal_odds, "Odds calculated");

    Ok(OddsQuote {
        odds,
        decimal_odds: decimal_odds.round_dp(DECIMAL_ODDS_DP),
        stake,
        total_payout: desired_payout,
        profit: (desired_payout - stake).round_dp(CURRENCY_DP),
    })
}
