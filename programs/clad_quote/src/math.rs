//! Clad Fixed-Point Math
//!
//! Integer math shared by the swap stepper: conversion between tick indices and
//! Q64.64 sqrt-prices, the token amounts moved between two sqrt-prices at a given
//! liquidity, and the sqrt-price reached after moving a given token amount.
//!
//! Rounding always favours the pool: amounts the trader pays are rounded up,
//! amounts the trader receives are rounded down. Products that may exceed 128 bits
//! are computed in `U256` and narrowed with a checked conversion, so an
//! unrepresentable result is an error, never a wraparound.
use crate::constants::*;
use crate::errors::ErrorCode;
use anchor_lang::prelude::*;
use primitive_types::U256;

/// Multiplies two u128 values into a full-width U256 product.
#[inline(always)]
pub(crate) fn mul_u256(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Narrows a U256 to u128, failing with `ArithmeticOverflow` if it does not fit.
#[inline(always)]
pub(crate) fn checked_u256_to_u128(value: U256) -> Result<u128> {
    if value.bits() > 128 {
        return err!(ErrorCode::ArithmeticOverflow);
    }
    Ok(value.low_u128())
}

/// Narrows a u128 token amount to u64, failing with `TokenMaxExceeded`.
#[inline(always)]
pub fn to_token_amount(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(ErrorCode::TokenMaxExceeded))
}

/// Divides a U256 by a U256, optionally rounding the quotient up.
fn div_u256(numerator: U256, denominator: U256, round_up: bool) -> Result<U256> {
    if denominator.is_zero() {
        return err!(ErrorCode::DivideByZero);
    }
    let (quotient, remainder) = numerator.div_mod(denominator);
    if round_up && !remainder.is_zero() {
        Ok(quotient + U256::one())
    } else {
        Ok(quotient)
    }
}

/// Computes `n0 * n1 / d` without intermediate overflow, rounding down.
///
/// # Arguments
/// * `n0` - First factor
/// * `n1` - Second factor
/// * `d` - Divisor
///
/// # Returns
/// * `Result<u128>` - The quotient, or `ArithmeticOverflow` if it exceeds u128
pub fn checked_mul_div(n0: u128, n1: u128, d: u128) -> Result<u128> {
    checked_u256_to_u128(div_u256(mul_u256(n0, n1), U256::from(d), false)?)
}

/// Computes `n0 * n1 / d` without intermediate overflow, rounding up.
pub fn checked_mul_div_round_up(n0: u128, n1: u128, d: u128) -> Result<u128> {
    checked_u256_to_u128(div_u256(mul_u256(n0, n1), U256::from(d), true)?)
}

/// Divides two u128 values, rounding the quotient up when `round_up` is set.
pub fn div_round_up_if(n: u128, d: u128, round_up: bool) -> Result<u128> {
    if d == 0 {
        return err!(ErrorCode::DivideByZero);
    }
    let quotient = n / d;
    if round_up && n % d != 0 {
        quotient.checked_add(1).ok_or(error!(ErrorCode::ArithmeticOverflow))
    } else {
        Ok(quotient)
    }
}

#[inline(always)]
fn mul_shift_96(n0: u128, n1: u128) -> u128 {
    // Both factors are below 2^128 and the tables keep the running ratio below 2^160,
    // so the shifted product always fits a u128.
    (mul_u256(n0, n1) >> 96).low_u128()
}

/// Converts a tick index to its Q64.64 sqrt-price, `sqrt(1.0001^tick) * 2^64`.
///
/// The value is built from a binary decomposition of `|tick|` with precomputed
/// factors `sqrt(1.0001)^(2^i)`, Q32.96 for positive ticks and Q64.64 reciprocals for
/// negative ticks, which reproduces the settlement program's result bit for bit.
///
/// # Arguments
/// * `tick` - A tick index within `[MIN_TICK_INDEX, MAX_TICK_INDEX]`
///
/// # Returns
/// * `Result<u128>` - The sqrt-price, or `InvalidTickIndex` when the tick is out of range
///
/// # Example
///
/// ```
/// use clad_quote::math::sqrt_price_from_tick_index;
/// assert_eq!(sqrt_price_from_tick_index(0).unwrap(), 1u128 << 64);
/// ```
pub fn sqrt_price_from_tick_index(tick: i32) -> Result<u128> {
    if !(MIN_TICK_INDEX..=MAX_TICK_INDEX).contains(&tick) {
        return err!(ErrorCode::InvalidTickIndex);
    }
    if tick >= 0 {
        Ok(sqrt_price_positive_tick(tick))
    } else {
        Ok(sqrt_price_negative_tick(tick))
    }
}

fn sqrt_price_positive_tick(tick: i32) -> u128 {
    let mut ratio: u128 = if tick & 1 != 0 {
        79232123823359799118286999567
    } else {
        79228162514264337593543950336
    };

    const FACTORS: [(i32, u128); 18] = [
        (2, 79236085330515764027303304731),
        (4, 79244008939048815603706035061),
        (8, 79259858533276714757314932305),
        (16, 79291567232598584799939703904),
        (32, 79355022692464371645785046466),
        (64, 79482085999252804386437311141),
        (128, 79736823300114093921829183326),
        (256, 80248749790819932309965073892),
        (512, 81282483887344747381513967011),
        (1024, 83390072131320151908154831281),
        (2048, 87770609709833776024991924138),
        (4096, 97234110755111693312479820773),
        (8192, 119332217159966728226237229890),
        (16384, 179736315981702064433883588727),
        (32768, 407748233172238350107850275304),
        (65536, 2098478828474011932436660412517),
        (131072, 55581415166113811149459800483533),
        (262144, 38992368544603139932233054999993551),
    ];
    for (bit, factor) in FACTORS {
        if tick & bit != 0 {
            ratio = mul_shift_96(ratio, factor);
        }
    }

    // Q32.96 -> Q64.64
    ratio >> 32
}

fn sqrt_price_negative_tick(tick: i32) -> u128 {
    let abs_tick = tick.unsigned_abs();

    let mut ratio: u128 = if abs_tick & 1 != 0 {
        18445821805675392311
    } else {
        18446744073709551616
    };

    const FACTORS: [(u32, u128); 18] = [
        (2, 18444899583751176498),
        (4, 18443055278223354162),
        (8, 18439367220385604838),
        (16, 18431993317065449817),
        (32, 18417254355718160513),
        (64, 18387811781193591352),
        (128, 18329067761203520168),
        (256, 18212142134806087854),
        (512, 17980523815641551639),
        (1024, 17526086738831147013),
        (2048, 16651378430235024244),
        (4096, 15030750278693429944),
        (8192, 12247334978882834399),
        (16384, 8131365268884726200),
        (32768, 3584323654723342297),
        (65536, 696457651847595233),
        (131072, 26294789957452057),
        (262144, 37481735321082),
    ];
    for (bit, factor) in FACTORS {
        if abs_tick & bit != 0 {
            // ratio <= 2^64 and factor < 2^64
            ratio = (ratio * factor) >> Q64_RESOLUTION;
        }
    }

    ratio
}

/// Converts a Q64.64 sqrt-price to the greatest tick whose sqrt-price does not exceed it.
///
/// `sqrt_price_from_tick_index` is strictly increasing, so a binary search over the
/// tick range yields the exact floor tick with at most 20 evaluations.
///
/// # Arguments
/// * `sqrt_price` - A sqrt-price within `[MIN_SQRT_PRICE, MAX_SQRT_PRICE]`
///
/// # Returns
/// * `Result<i32>` - The floor tick, or `SqrtPriceOutOfBounds`
pub fn tick_index_from_sqrt_price(sqrt_price: u128) -> Result<i32> {
    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price) {
        return err!(ErrorCode::SqrtPriceOutOfBounds);
    }
    if sqrt_price == Q64 {
        return Ok(0);
    }

    let mut low = MIN_TICK_INDEX;
    let mut high = MAX_TICK_INDEX;
    let mut ans = MIN_TICK_INDEX;

    while low <= high {
        let mid = low + (high - low) / 2;
        if sqrt_price_from_tick_index(mid)? <= sqrt_price {
            ans = mid;
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    Ok(ans)
}

/// Returns the pair ordered as (lower, upper).
#[inline(always)]
fn increasing_price_order(sqrt_price_0: u128, sqrt_price_1: u128) -> (u128, u128) {
    if sqrt_price_0 > sqrt_price_1 {
        (sqrt_price_1, sqrt_price_0)
    } else {
        (sqrt_price_0, sqrt_price_1)
    }
}

/// Amount of token A between two sqrt-prices at a given liquidity, unbounded by u64.
///
/// `ΔA = L * (√P_upper - √P_lower) / (√P_upper * √P_lower)`
///
/// # Arguments
/// * `sqrt_price_0` - One end of the range (order does not matter)
/// * `sqrt_price_1` - The other end
/// * `liquidity` - The liquidity active across the range
/// * `round_up` - Round up when the trader pays this amount
pub fn try_get_amount_delta_a(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u128> {
    let (sqrt_price_lower, sqrt_price_upper) = increasing_price_order(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;
    if liquidity == 0 || sqrt_price_diff == 0 {
        return Ok(0);
    }
    if sqrt_price_lower == 0 {
        return err!(ErrorCode::DivideByZero);
    }

    let product = mul_u256(liquidity, sqrt_price_diff);
    if product.bits() > 256 - Q64_RESOLUTION as usize {
        return err!(ErrorCode::ArithmeticOverflow);
    }
    let numerator = product << Q64_RESOLUTION;
    let denominator = mul_u256(sqrt_price_upper, sqrt_price_lower);

    let amount = div_u256(numerator, denominator, round_up)?;
    if amount.bits() > 128 {
        return err!(ErrorCode::TokenMaxExceeded);
    }
    Ok(amount.low_u128())
}

/// Amount of token B between two sqrt-prices at a given liquidity, unbounded by u64.
///
/// `ΔB = L * (√P_upper - √P_lower)`
pub fn try_get_amount_delta_b(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u128> {
    let (sqrt_price_lower, sqrt_price_upper) = increasing_price_order(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;
    if liquidity == 0 || sqrt_price_diff == 0 {
        return Ok(0);
    }

    let product = mul_u256(liquidity, sqrt_price_diff);
    let mut amount = product >> Q64_RESOLUTION;
    if round_up && !(product & U256::from(Q64_MASK)).is_zero() {
        amount += U256::one();
    }
    if amount.bits() > 128 {
        return err!(ErrorCode::TokenMaxExceeded);
    }
    Ok(amount.low_u128())
}

/// Amount of token A between two sqrt-prices, as a token amount.
pub fn get_amount_delta_a(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64> {
    to_token_amount(try_get_amount_delta_a(
        sqrt_price_0,
        sqrt_price_1,
        liquidity,
        round_up,
    )?)
}

/// Amount of token B between two sqrt-prices, as a token amount.
pub fn get_amount_delta_b(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64> {
    to_token_amount(try_get_amount_delta_b(
        sqrt_price_0,
        sqrt_price_1,
        liquidity,
        round_up,
    )?)
}

/// Sqrt-price after adding (input) or removing (output) `amount` of token A.
///
/// `√P' = L * √P / (L ± ΔA * √P)`, rounded up so the pool never gives away more
/// token B than the exact curve allows.
///
/// # Arguments
/// * `sqrt_price` - The starting sqrt-price
/// * `liquidity` - The active liquidity
/// * `amount` - Token A amount moved
/// * `amount_specified_is_input` - True when token A flows into the pool
pub fn get_next_sqrt_price_from_a_round_up(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
) -> Result<u128> {
    if amount == 0 {
        return Ok(sqrt_price);
    }

    let product = mul_u256(sqrt_price, amount as u128);
    let numerator = mul_u256(liquidity, sqrt_price) << Q64_RESOLUTION;
    let liquidity_shift_left = U256::from(liquidity) << Q64_RESOLUTION;

    if !amount_specified_is_input && liquidity_shift_left <= product {
        return err!(ErrorCode::DivideByZero);
    }

    let denominator = if amount_specified_is_input {
        liquidity_shift_left
            .checked_add(product)
            .ok_or(error!(ErrorCode::ArithmeticOverflow))?
    } else {
        liquidity_shift_left - product
    };

    let price = checked_u256_to_u128(div_u256(numerator, denominator, true)?)?;
    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&price) {
        return err!(ErrorCode::SqrtPriceOutOfBounds);
    }
    Ok(price)
}

/// Sqrt-price after adding (input) or removing (output) `amount` of token B.
///
/// `√P' = √P ± ΔB / L`. The quotient is rounded down on input and up on output,
/// which in both cases keeps the resulting price on the pool's side.
pub fn get_next_sqrt_price_from_b_round_down(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
) -> Result<u128> {
    let amount_x64 = (amount as u128) << Q64_RESOLUTION;
    let delta = div_round_up_if(amount_x64, liquidity, !amount_specified_is_input)?;

    let price = if amount_specified_is_input {
        sqrt_price.checked_add(delta)
    } else {
        sqrt_price.checked_sub(delta)
    }
    .ok_or(error!(ErrorCode::SqrtPriceOutOfBounds))?;

    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&price) {
        return err!(ErrorCode::SqrtPriceOutOfBounds);
    }
    Ok(price)
}

/// Sqrt-price reached after moving `amount` of the specified token.
///
/// The specified token is A when the swap is A→B exact-in or B→A exact-out.
pub fn get_next_sqrt_price(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u128> {
    if amount_specified_is_input == a_to_b {
        get_next_sqrt_price_from_a_round_up(sqrt_price, liquidity, amount, amount_specified_is_input)
    } else {
        get_next_sqrt_price_from_b_round_down(sqrt_price, liquidity, amount, amount_specified_is_input)
    }
}

/// Applies a signed liquidity delta to an unsigned liquidity value.
pub fn add_liquidity_delta(liquidity: u128, delta: i128) -> Result<u128> {
    if delta == 0 {
        return Ok(liquidity);
    }
    if delta > 0 {
        liquidity
            .checked_add(delta as u128)
            .ok_or(error!(ErrorCode::LiquidityOverflow))
    } else {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(error!(ErrorCode::LiquidityUnderflow))
    }
}
