//! Swap stepper.
//!
//! Replays the settlement program's swap loop against snapshots: the price advances
//! segment by segment between initialized ticks, each segment priced with the pool's
//! available liquidity, until the budget is spent or the price limit is reached.
use crate::errors::ErrorCode;
use crate::math::*;
use crate::state::{AvailableLiquidity, Globalpool};
use crate::swap_math::*;
use crate::tick_array_sequence::{CrossedTick, TickArraySequence};
use anchor_lang::prelude::*;
use log::trace;

/// State of a simulated swap when the stepper stops.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwapResult {
    pub amount_a: u64,
    pub amount_b: u64,
    /// Available liquidity at the end price
    pub next_liquidity: AvailableLiquidity,
    pub next_tick_index: i32,
    pub next_sqrt_price: u128,
    /// Global fee growth of the input token after the swap
    pub next_fee_growth_global: u128,
    /// Total trading fee, in the input token
    pub total_fee_amount: u64,
    /// Protocol share of `total_fee_amount`
    pub protocol_fee: u64,
    /// Initialized ticks crossed, in traversal order
    pub crossed_ticks: Vec<CrossedTick>,
}

/// Runs the swap loop.
///
/// Borrowed liquidity never participates: the working liquidity starts from
/// `Globalpool::swappable_liquidity` and only moves by the net deltas of crossed ticks.
///
/// # Arguments
/// * `globalpool` - Pool snapshot
/// * `sequence` - Tick arrays in trade direction
/// * `amount` - Budget of the specified token
/// * `sqrt_price_limit` - Price the swap must not move past
/// * `amount_specified_is_input` - True for exact-input swaps
/// * `a_to_b` - Trade direction
///
/// # Returns
/// * `Result<SwapResult>` - Token amounts moved, end state and fee accounting
pub fn compute_swap(
    globalpool: &Globalpool,
    sequence: &mut TickArraySequence,
    amount: u64,
    sqrt_price_limit: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<SwapResult> {
    let AvailableLiquidity(mut curr_liquidity) = globalpool.swappable_liquidity();
    let mut amount_remaining = amount;
    let mut amount_calculated: u64 = 0;
    let mut curr_sqrt_price = globalpool.sqrt_price;
    let mut curr_tick_index = globalpool.tick_current_index;
    let mut total_fee_amount: u64 = 0;
    let mut protocol_fee: u64 = 0;
    let mut fee_growth_global_input = globalpool.fee_growth_global_input(a_to_b);
    let mut crossed_ticks = Vec::new();

    while amount_remaining > 0 && sqrt_price_limit != curr_sqrt_price {
        let next = sequence.find_next_initialized_tick(curr_tick_index)?;
        let next_tick_index = next.tick_index();
        let next_tick_sqrt_price = sqrt_price_from_tick_index(next_tick_index)?;

        let sqrt_price_target = if a_to_b {
            sqrt_price_limit.max(next_tick_sqrt_price)
        } else {
            sqrt_price_limit.min(next_tick_sqrt_price)
        };

        let step = compute_swap_step(
            amount_remaining,
            globalpool.fee_rate,
            curr_liquidity,
            curr_sqrt_price,
            sqrt_price_target,
            amount_specified_is_input,
            a_to_b,
        )?;

        trace!(
            "swap step: liquidity={} price {} -> {} (target {}), in={} out={} fee={}",
            curr_liquidity,
            curr_sqrt_price,
            step.next_price,
            sqrt_price_target,
            step.amount_in,
            step.amount_out,
            step.fee_amount
        );

        if amount_specified_is_input {
            amount_remaining = amount_remaining
                .checked_sub(step.amount_in)
                .and_then(|remaining| remaining.checked_sub(step.fee_amount))
                .ok_or(error!(ErrorCode::ArithmeticOverflow))?;
            amount_calculated = amount_calculated
                .checked_add(step.amount_out)
                .ok_or(error!(ErrorCode::TokenMaxExceeded))?;
        } else {
            amount_remaining = amount_remaining
                .checked_sub(step.amount_out)
                .ok_or(error!(ErrorCode::ArithmeticOverflow))?;
            amount_calculated = amount_calculated
                .checked_add(step.amount_in)
                .and_then(|calculated| calculated.checked_add(step.fee_amount))
                .ok_or(error!(ErrorCode::TokenMaxExceeded))?;
        }

        let fees = calculate_fees(
            step.fee_amount,
            globalpool.protocol_fee_rate,
            curr_liquidity,
            fee_growth_global_input,
        )?;
        fee_growth_global_input = fees.fee_growth_global;
        protocol_fee = protocol_fee
            .checked_add(fees.protocol_fee)
            .ok_or(error!(ErrorCode::TokenMaxExceeded))?;
        total_fee_amount = total_fee_amount
            .checked_add(step.fee_amount)
            .ok_or(error!(ErrorCode::TokenMaxExceeded))?;

        if step.next_price == next_tick_sqrt_price {
            if next.is_initialized() {
                let (fee_growth_global_a, fee_growth_global_b) = if a_to_b {
                    (fee_growth_global_input, globalpool.fee_growth_global_b)
                } else {
                    (globalpool.fee_growth_global_a, fee_growth_global_input)
                };
                let crossed =
                    sequence.cross_tick(next_tick_index, fee_growth_global_a, fee_growth_global_b)?;

                // liquidity_net is defined for upward crossings
                let liquidity_delta = if a_to_b {
                    crossed
                        .liquidity_net
                        .checked_neg()
                        .ok_or(error!(ErrorCode::LiquidityOverflow))?
                } else {
                    crossed.liquidity_net
                };
                curr_liquidity = add_liquidity_delta(curr_liquidity, liquidity_delta)?;

                trace!(
                    "crossed tick {}: liquidity_net={} liquidity={}",
                    next_tick_index,
                    crossed.liquidity_net,
                    curr_liquidity
                );
                crossed_ticks.push(crossed);
            }

            curr_tick_index = if a_to_b {
                next_tick_index - 1
            } else {
                next_tick_index
            };
        } else if step.next_price != curr_sqrt_price {
            curr_tick_index = tick_index_from_sqrt_price(step.next_price)?;
        }

        curr_sqrt_price = step.next_price;
    }

    if amount_remaining == 0 && curr_sqrt_price == globalpool.sqrt_price {
        return err!(ErrorCode::InputExhaustedWithoutPriceMovement);
    }

    let amount_consumed = amount - amount_remaining;
    let (amount_a, amount_b) = if a_to_b == amount_specified_is_input {
        (amount_consumed, amount_calculated)
    } else {
        (amount_calculated, amount_consumed)
    };

    Ok(SwapResult {
        amount_a,
        amount_b,
        next_liquidity: AvailableLiquidity(curr_liquidity),
        next_tick_index: curr_tick_index,
        next_sqrt_price: curr_sqrt_price,
        next_fee_growth_global: fee_growth_global_input,
        total_fee_amount,
        protocol_fee,
        crossed_ticks,
    })
}
