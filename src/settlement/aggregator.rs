//! Settlement aggregation over graded wagers.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::types::{ResultStatus, SettlementInput, SettlementRecord, SettlementResult};
use crate::error::SettlementError;

/// Profit on a winning wager of `unit_size` units at signed American odds.
///
/// Works from the signed magnitude directly rather than through decimal odds.
/// Returns `None` for odds of zero or when the profit does not fit in a
/// `Decimal`.
pub fn unit_profit(unit_size: Decimal, odds: Decimal) -> Option<Decimal> {
    let per_unit = if odds > Decimal::ZERO {
        odds.checked_div(Decimal::ONE_HUNDRED)?
    } else {
        Decimal::ONE_HUNDRED.checked_div(odds.abs())?
    };
    unit_size.checked_mul(per_unit)
}

/// Aggregate graded wagers into a record, net result, units wagered and ROI.
///
/// Fails on an empty batch, on any record with a non-positive unit size or
/// zero odds, on any status other than Win, Loss, Push or Void, and when a
/// running total leaves the `Decimal` range. A single bad record fails the
/// whole batch.
#[instrument(skip(records), fields(records = records.len()))]
pub fn compute_settlement(records: &[SettlementInput]) -> Result<SettlementResult, SettlementError> {
    if records.is_empty() {
        return Err(SettlementError::EmptyDataset);
    }

    let mut record = SettlementRecord::default();
    let mut net_result = Decimal::ZERO;
    let mut total_units = Decimal::ZERO;

    for (index, input) in records.iter().enumerate() {
        if input.unit_size <= Decimal::ZERO {
            return Err(SettlementError::InvalidUnitSize {
                index,
                unit_size: input.unit_size,
            });
        }

        if input.odds.is_zero() {
            return Err(SettlementError::InvalidOdds { index });
        }

        let status: ResultStatus = input
            .result_status
            .trim()
            .parse()
            .map_err(|_| SettlementError::UnknownResultStatus(input.result_status.clone()))?;

        let overflow = || SettlementError::Overflow { index };

        total_units = total_units
            .checked_add(input.unit_size)
            .ok_or_else(overflow)?;

        match status {
            status if status.is_draw() => {
                record.draws += 1;
                debug!(index, %status, "Draw settled");
            }
            ResultStatus::Win => {
                let profit = unit_profit(input.unit_size, input.odds).ok_or_else(overflow)?;
                net_result = net_result.checked_add(profit).ok_or_else(overflow)?;
                record.wins += 1;
                debug!(index, odds = %input.odds, %profit, "Win settled");
            }
            _ => {
                net_result = net_result
                    .checked_sub(input.unit_size)
                    .ok_or_else(overflow)?;
                record.losses += 1;
                debug!(index, unit_size = %input.unit_size, "Loss settled");
            }
        }
    }

    let roi = if total_units > Decimal::ZERO {
        net_result
            .checked_div(total_units)
            .ok_or(SettlementError::Overflow {
                index: records.len() - 1,
            })?
    } else {
        Decimal::ZERO
    };

    debug!(
        wins = record.wins,
        losses = record.losses,
        draws = record.draws,
        %net_result,
        %total_units,
        %roi,
        "Settlement computed"
    );

    Ok(SettlementResult {
        record,
        net_result,
        total_units,
        roi,
    })
}
