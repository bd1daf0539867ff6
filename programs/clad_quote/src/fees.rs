//! Fees earned by liquidity positions.
use crate::constants::Q64_RESOLUTION;
use crate::errors::ErrorCode;
use crate::math::{checked_u256_to_u128, mul_u256, to_token_amount};
use crate::state::{Globalpool, LiquidityPosition};
use crate::tick::Tick;
use anchor_lang::prelude::*;

/// Fees a position could collect right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectFeesQuote {
    pub fee_owed_a: u64,
    pub fee_owed_b: u64,
}

/// Fee growth per unit of liquidity accrued inside `[tick_lower_index, tick_upper_index)`.
///
/// Computed as `global - below(lower) - above(upper)`, where each tick's outside
/// value is read from the side of the current price. An uninitialized lower tick
/// counts all growth as below it; an uninitialized upper tick counts none above it.
/// All arithmetic wraps, like the accumulators themselves.
pub fn get_fee_growth_inside(
    tick_current_index: i32,
    tick_lower: &Tick,
    tick_lower_index: i32,
    tick_upper: &Tick,
    tick_upper_index: i32,
    fee_growth_global_a: u128,
    fee_growth_global_b: u128,
) -> (u128, u128) {
    let (fee_growth_below_a, fee_growth_below_b) = if !tick_lower.initialized {
        (fee_growth_global_a, fee_growth_global_b)
    } else if tick_current_index < tick_lower_index {
        (
            fee_growth_global_a.wrapping_sub(tick_lower.fee_growth_outside_a),
            fee_growth_global_b.wrapping_sub(tick_lower.fee_growth_outside_b),
        )
    } else {
        (tick_lower.fee_growth_outside_a, tick_lower.fee_growth_outside_b)
    };

    let (fee_growth_above_a, fee_growth_above_b) = if !tick_upper.initialized {
        (0, 0)
    } else if tick_current_index < tick_upper_index {
        (tick_upper.fee_growth_outside_a, tick_upper.fee_growth_outside_b)
    } else {
        (
            fee_growth_global_a.wrapping_sub(tick_upper.fee_growth_outside_a),
            fee_growth_global_b.wrapping_sub(tick_upper.fee_growth_outside_b),
        )
    };

    (
        fee_growth_global_a
            .wrapping_sub(fee_growth_below_a)
            .wrapping_sub(fee_growth_above_a),
        fee_growth_global_b
            .wrapping_sub(fee_growth_below_b)
            .wrapping_sub(fee_growth_above_b),
    )
}

/// Quotes the fees owed to `position`: what it already owes plus
/// `liquidity * (growth_inside - checkpoint) >> 64` for each token.
///
/// # Arguments
/// * `globalpool` - Pool snapshot
/// * `position` - The position's snapshot
/// * `tick_lower` - Tick record at `position.tick_lower_index`
/// * `tick_upper` - Tick record at `position.tick_upper_index`
pub fn collect_fees_quote(
    globalpool: &Globalpool,
    position: &LiquidityPosition,
    tick_lower: &Tick,
    tick_upper: &Tick,
) -> Result<CollectFeesQuote> {
    let (fee_growth_inside_a, fee_growth_inside_b) = get_fee_growth_inside(
        globalpool.tick_current_index,
        tick_lower,
        position.tick_lower_index,
        tick_upper,
        position.tick_upper_index,
        globalpool.fee_growth_global_a,
        globalpool.fee_growth_global_b,
    );

    let fee_delta_a = fee_delta(
        position.liquidity,
        fee_growth_inside_a.wrapping_sub(position.fee_growth_checkpoint_a),
    )?;
    let fee_delta_b = fee_delta(
        position.liquidity,
        fee_growth_inside_b.wrapping_sub(position.fee_growth_checkpoint_b),
    )?;

    Ok(CollectFeesQuote {
        fee_owed_a: position
            .fee_owed_a
            .checked_add(fee_delta_a)
            .ok_or(error!(ErrorCode::TokenMaxExceeded))?,
        fee_owed_b: position
            .fee_owed_b
            .checked_add(fee_delta_b)
            .ok_or(error!(ErrorCode::TokenMaxExceeded))?,
    })
}

fn fee_delta(liquidity: u128, fee_growth_delta: u128) -> Result<u64> {
    let shifted = checked_u256_to_u128(mul_u256(liquidity, fee_growth_delta) >> Q64_RESOLUTION)
        .map_err(|_| error!(ErrorCode::TokenMaxExceeded))?;
    to_token_amount(shifted)
}
