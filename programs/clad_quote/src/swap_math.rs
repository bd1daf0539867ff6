//! Single swap step arithmetic.
//!
//! One step moves the price from the current sqrt-price toward a target (the next
//! initialized tick or the caller's limit) with constant liquidity. The amount of the
//! token the caller specified is the "fixed" delta; the other side is "unfixed".
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::math::*;
use anchor_lang::prelude::*;

/// Result of a single swap step within one liquidity segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapStepComputation {
    /// Amount of the input token consumed, excluding the fee
    pub amount_in: u64,
    /// Amount of the output token produced
    pub amount_out: u64,
    /// Sqrt-price at the end of the step
    pub next_price: u128,
    /// Trading fee charged on `amount_in`, in the input token
    pub fee_amount: u64,
}

/// Protocol share of a step's fee and the resulting global fee growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeSplit {
    pub protocol_fee: u64,
    pub fee_growth_global: u128,
}

/// Computes one swap step from `sqrt_price_current` toward `sqrt_price_target`.
///
/// When the remaining budget (net of fee for exact-in) can pay for the whole segment
/// the step lands exactly on the target; otherwise the end price is solved from the
/// budget and the step ends inside the segment.
///
/// # Arguments
/// * `amount_remaining` - Remaining budget of the specified token
/// * `fee_rate` - Pool fee rate in hundredths of a basis point
/// * `liquidity` - Swappable (available) liquidity across the segment
/// * `sqrt_price_current` - Starting sqrt-price
/// * `sqrt_price_target` - Segment boundary in the swap direction
/// * `amount_specified_is_input` - True for exact-input swaps
/// * `a_to_b` - True when token A is sold for token B
///
/// # Returns
/// * `Result<SwapStepComputation>` - Amounts in, out, fee and the end sqrt-price
pub fn compute_swap_step(
    amount_remaining: u64,
    fee_rate: u16,
    liquidity: u128,
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<SwapStepComputation> {
    let fee_rate = fee_rate as u128;
    let fee_complement = FEE_RATE_MUL_VALUE
        .checked_sub(fee_rate)
        .ok_or(error!(ErrorCode::FeeRateMaxExceeded))?;

    let initial_amount_fixed_delta = try_get_amount_fixed_delta(
        sqrt_price_current,
        sqrt_price_target,
        liquidity,
        amount_specified_is_input,
        a_to_b,
    )?;

    let amount_calc = if amount_specified_is_input {
        checked_mul_div(amount_remaining as u128, fee_complement, FEE_RATE_MUL_VALUE)?
    } else {
        amount_remaining as u128
    };

    let next_price = if initial_amount_fixed_delta <= amount_calc {
        sqrt_price_target
    } else {
        // amount_calc < fixed delta, and amount_calc <= amount_remaining
        get_next_sqrt_price(
            sqrt_price_current,
            liquidity,
            to_token_amount(amount_calc)?,
            amount_specified_is_input,
            a_to_b,
        )?
    };

    let is_max_swap = next_price == sqrt_price_target;

    let amount_unfixed_delta = to_token_amount(try_get_amount_unfixed_delta(
        sqrt_price_current,
        next_price,
        liquidity,
        amount_specified_is_input,
        a_to_b,
    )?)?;

    let amount_fixed_delta = if is_max_swap {
        to_token_amount(initial_amount_fixed_delta)?
    } else {
        to_token_amount(try_get_amount_fixed_delta(
            sqrt_price_current,
            next_price,
            liquidity,
            amount_specified_is_input,
            a_to_b,
        )?)?
    };

    let (amount_in, mut amount_out) = if amount_specified_is_input {
        (amount_fixed_delta, amount_unfixed_delta)
    } else {
        (amount_unfixed_delta, amount_fixed_delta)
    };

    // Output rounding must never pay out more than requested.
    if !amount_specified_is_input && amount_out > amount_remaining {
        amount_out = amount_remaining;
    }

    let fee_amount = if amount_specified_is_input && !is_max_swap {
        // The segment absorbs the whole budget; what the price move did not use is fee.
        amount_remaining
            .checked_sub(amount_in)
            .ok_or(error!(ErrorCode::ArithmeticOverflow))?
    } else {
        to_token_amount(checked_mul_div_round_up(
            amount_in as u128,
            fee_rate,
            fee_complement,
        )?)?
    };

    Ok(SwapStepComputation {
        amount_in,
        amount_out,
        next_price,
        fee_amount,
    })
}

/// Delta of the token the caller specified, rounded against the caller.
fn try_get_amount_fixed_delta(
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u128> {
    if a_to_b == amount_specified_is_input {
        try_get_amount_delta_a(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            amount_specified_is_input,
        )
    } else {
        try_get_amount_delta_b(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            amount_specified_is_input,
        )
    }
}

/// Delta of the other token, rounded against the caller.
fn try_get_amount_unfixed_delta(
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u128> {
    if a_to_b == amount_specified_is_input {
        try_get_amount_delta_b(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            !amount_specified_is_input,
        )
    } else {
        try_get_amount_delta_a(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            !amount_specified_is_input,
        )
    }
}

/// Splits a step's fee into the protocol share and the liquidity providers' share,
/// and returns the global fee growth after crediting the providers' share per unit of
/// liquidity.
///
/// Fee growth is a wrapping Q64.64 accumulator: only differences between two readings
/// are meaningful, exactly as the settlement program stores it.
pub fn calculate_fees(
    fee_amount: u64,
    protocol_fee_rate: u16,
    liquidity: u128,
    fee_growth_global: u128,
) -> Result<FeeSplit> {
    let protocol_fee = to_token_amount(checked_mul_div(
        fee_amount as u128,
        protocol_fee_rate as u128,
        PROTOCOL_FEE_RATE_MUL_VALUE,
    )?)?;
    let lp_fee = fee_amount
        .checked_sub(protocol_fee)
        .ok_or(error!(ErrorCode::ProtocolFeeRateMaxExceeded))?;

    let fee_growth_global = if liquidity > 0 {
        fee_growth_global.wrapping_add(((lp_fee as u128) << Q64_RESOLUTION) / liquidity)
    } else {
        fee_growth_global
    };

    Ok(FeeSplit {
        protocol_fee,
        fee_growth_global,
    })
}
