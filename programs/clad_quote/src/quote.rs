//! Swap quotes.
//!
//! `simulate_swap` validates a request, runs the stepper against the supplied
//! snapshots and checks the caller's slippage threshold. The result carries every
//! numeric argument and tick array account a swap instruction needs.
use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::Globalpool;
use crate::swap::compute_swap;
use crate::tick::TickArray;
use crate::tick_array_sequence::{CrossedTick, TickArraySequence};
use crate::utils::percentage::{adjust_for_slippage, Percentage};
use anchor_lang::prelude::*;
use log::debug;

/// Parameters of a swap quote.
#[derive(Debug, Clone, Copy)]
pub struct SwapQuoteParams<'a> {
    pub globalpool: &'a Globalpool,
    /// Tick arrays, the one containing the current tick first
    pub tick_arrays: &'a [TickArray],
    /// Exact input amount, or exact output amount when `amount_specified_is_input`
    /// is false
    pub token_amount: u64,
    /// Minimum output (exact-in) or maximum input (exact-out)
    pub other_amount_threshold: u64,
    pub sqrt_price_limit: u128,
    pub amount_specified_is_input: bool,
    pub a_to_b: bool,
}

/// A simulated swap, valid against the snapshots it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuote {
    pub estimated_amount_in: u64,
    pub estimated_amount_out: u64,
    pub estimated_end_tick_index: i32,
    pub estimated_end_sqrt_price: u128,
    pub estimated_fee_amount: u64,
    /// Protocol share of `estimated_fee_amount`
    pub estimated_protocol_fee: u64,
    /// Input token's global fee growth after the swap
    pub estimated_end_fee_growth_global: u128,
    pub crossed_ticks: Vec<CrossedTick>,

    pub amount: u64,
    pub amount_specified_is_input: bool,
    pub a_to_b: bool,
    pub other_amount_threshold: u64,
    pub sqrt_price_limit: u128,

    pub tick_array_0: Pubkey,
    pub tick_array_1: Pubkey,
    pub tick_array_2: Pubkey,
}

/// The most permissive price limit for a trade direction.
pub fn default_sqrt_price_limit(a_to_b: bool) -> u128 {
    if a_to_b {
        MIN_SQRT_PRICE
    } else {
        MAX_SQRT_PRICE
    }
}

/// Threshold that never rejects a quote: zero output floor or unbounded input ceiling.
pub fn default_other_amount_threshold(amount_specified_is_input: bool) -> u64 {
    if amount_specified_is_input {
        0
    } else {
        u64::MAX
    }
}

/// Simulates a swap and returns its quote.
///
/// Requests are rejected, in order, for a price limit outside the protocol bounds,
/// a limit on the wrong side of the current price, a zero amount, an inconsistent
/// pool snapshot and a first tick array that does not hold the current tick. After
/// stepping, the realized amounts are checked against `other_amount_threshold` and
/// the number of touched tick arrays against `MAX_SWAP_TICK_ARRAYS`.
///
/// # Arguments
/// * `params` - Snapshots and trade parameters
///
/// # Returns
/// * `Result<SwapQuote>` - The quote, or the first failed check
pub fn simulate_swap(params: &SwapQuoteParams) -> Result<SwapQuote> {
    let SwapQuoteParams {
        globalpool,
        tick_arrays,
        token_amount,
        other_amount_threshold,
        sqrt_price_limit,
        amount_specified_is_input,
        a_to_b,
    } = *params;

    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price_limit) {
        debug!("quote rejected: sqrt price limit {} out of bounds", sqrt_price_limit);
        return err!(ErrorCode::PriceLimitOutOfBounds);
    }

    if (a_to_b && sqrt_price_limit > globalpool.sqrt_price)
        || (!a_to_b && sqrt_price_limit < globalpool.sqrt_price)
    {
        debug!(
            "quote rejected: sqrt price limit {} on the wrong side of {} (a_to_b={})",
            sqrt_price_limit, globalpool.sqrt_price, a_to_b
        );
        return err!(ErrorCode::PriceLimitWrongDirection);
    }

    if token_amount == 0 {
        debug!("quote rejected: zero token amount");
        return err!(ErrorCode::ZeroAmount);
    }

    globalpool.validate()?;

    let mut sequence = TickArraySequence::new(tick_arrays, globalpool.tick_spacing, a_to_b)?;
    if !sequence.is_valid_tick_array_0(globalpool.tick_current_index) {
        debug!(
            "quote rejected: first tick array does not contain tick {}",
            globalpool.tick_current_index
        );
        return err!(ErrorCode::InvalidStartingTickArray);
    }

    let swap_result = compute_swap(
        globalpool,
        &mut sequence,
        token_amount,
        sqrt_price_limit,
        amount_specified_is_input,
        a_to_b,
    )?;

    let (estimated_amount_in, estimated_amount_out) = if a_to_b {
        (swap_result.amount_a, swap_result.amount_b)
    } else {
        (swap_result.amount_b, swap_result.amount_a)
    };

    if amount_specified_is_input {
        require_gte!(
            estimated_amount_out,
            other_amount_threshold,
            ErrorCode::SlippageExceededExactIn
        );
    } else {
        require_gte!(
            other_amount_threshold,
            estimated_amount_in,
            ErrorCode::SlippageExceededExactOut
        );
    }

    let num_touched = sequence.get_num_of_touched_arrays();
    if num_touched > MAX_SWAP_TICK_ARRAYS {
        return err!(ErrorCode::TooManyTickArraysTraversed);
    }

    let touched = sequence.get_touched_arrays(MAX_SWAP_TICK_ARRAYS);
    let head = tick_arrays
        .first()
        .map(|array| array.address)
        .ok_or(error!(ErrorCode::InvalidStartingTickArray))?;
    let tick_array_0 = touched.first().copied().unwrap_or(head);
    let tick_array_1 = touched.get(1).copied().unwrap_or(tick_array_0);
    let tick_array_2 = touched.get(2).copied().unwrap_or(tick_array_1);

    debug!(
        "quote: a_to_b={} exact_in={} amount={} in={} out={} fee={} end_tick={} touched={}",
        a_to_b,
        amount_specified_is_input,
        token_amount,
        estimated_amount_in,
        estimated_amount_out,
        swap_result.total_fee_amount,
        swap_result.next_tick_index,
        num_touched
    );

    Ok(SwapQuote {
        estimated_amount_in,
        estimated_amount_out,
        estimated_end_tick_index: swap_result.next_tick_index,
        estimated_end_sqrt_price: swap_result.next_sqrt_price,
        estimated_fee_amount: swap_result.total_fee_amount,
        estimated_protocol_fee: swap_result.protocol_fee,
        estimated_end_fee_growth_global: swap_result.next_fee_growth_global,
        crossed_ticks: swap_result.crossed_ticks,
        amount: token_amount,
        amount_specified_is_input,
        a_to_b,
        other_amount_threshold,
        sqrt_price_limit,
        tick_array_0,
        tick_array_1,
        tick_array_2,
    })
}

/// Quotes an exact-input swap of `token_amount` of `input_mint`, accepting up to
/// `slippage` less output than the simulated amount.
///
/// The direction follows from the mint and the price limit is the default for that
/// direction.
pub fn swap_quote_by_input_token(
    globalpool: &Globalpool,
    tick_arrays: &[TickArray],
    input_mint: &Pubkey,
    token_amount: u64,
    slippage: Percentage,
) -> Result<SwapQuote> {
    let a_to_b = globalpool.a_to_b_for_input_mint(input_mint)?;
    swap_quote_with_slippage(globalpool, tick_arrays, token_amount, true, a_to_b, slippage)
}

/// Quotes an exact-output swap delivering `token_amount` of `output_mint`, accepting
/// up to `slippage` more input than the simulated amount.
pub fn swap_quote_by_output_token(
    globalpool: &Globalpool,
    tick_arrays: &[TickArray],
    output_mint: &Pubkey,
    token_amount: u64,
    slippage: Percentage,
) -> Result<SwapQuote> {
    // Receiving token A means selling token B.
    let a_to_b = !globalpool.a_to_b_for_input_mint(output_mint)?;
    swap_quote_with_slippage(globalpool, tick_arrays, token_amount, false, a_to_b, slippage)
}

fn swap_quote_with_slippage(
    globalpool: &Globalpool,
    tick_arrays: &[TickArray],
    token_amount: u64,
    amount_specified_is_input: bool,
    a_to_b: bool,
    slippage: Percentage,
) -> Result<SwapQuote> {
    let mut params = SwapQuoteParams {
        globalpool,
        tick_arrays,
        token_amount,
        other_amount_threshold: default_other_amount_threshold(amount_specified_is_input),
        sqrt_price_limit: default_sqrt_price_limit(a_to_b),
        amount_specified_is_input,
        a_to_b,
    };

    let unbounded = simulate_swap(&params)?;
    params.other_amount_threshold = if amount_specified_is_input {
        adjust_for_slippage(unbounded.estimated_amount_out, slippage, false)?
    } else {
        adjust_for_slippage(unbounded.estimated_amount_in, slippage, true)?
    };

    simulate_swap(&params)
}
