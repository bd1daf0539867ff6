//! Property-based tests for the fixed-point math
//!
//! Tick conversion and the amount/price helpers must keep their rounding
//! direction for every input in the protocol's price range.

use crate::constants::*;
use crate::math::*;
use crate::swap_math::*;
use proptest::prelude::*;

/// Strategies for generating valid inputs
mod strategies {
    use super::*;

    pub fn tick_index() -> impl Strategy<Value = i32> {
        MIN_TICK_INDEX..MAX_TICK_INDEX
    }

    pub fn sqrt_price() -> impl Strategy<Value = u128> {
        MIN_SQRT_PRICE..=MAX_SQRT_PRICE
    }

    /// Liquidity up to 2^96, well above anything a real pool holds
    pub fn liquidity() -> impl Strategy<Value = u128> {
        1..(1u128 << 96)
    }

    pub fn amount() -> impl Strategy<Value = u64> {
        1..u64::MAX
    }

    pub fn fee_rate() -> impl Strategy<Value = u16> {
        0..=MAX_FEE_RATE
    }
}

proptest! {
    #[test]
    fn test_tick_round_trip(tick in strategies::tick_index()) {
        let sqrt_price = sqrt_price_from_tick_index(tick).unwrap();
        prop_assert_eq!(tick_index_from_sqrt_price(sqrt_price).unwrap(), tick);

        let next = sqrt_price_from_tick_index(tick + 1).unwrap();
        prop_assert!(next > sqrt_price);
    }

    #[test]
    fn test_tick_from_price_is_floor(sqrt_price in strategies::sqrt_price()) {
        let tick = tick_index_from_sqrt_price(sqrt_price).unwrap();
        prop_assert!(sqrt_price_from_tick_index(tick).unwrap() <= sqrt_price);
        if tick < MAX_TICK_INDEX {
            prop_assert!(sqrt_price_from_tick_index(tick + 1).unwrap() > sqrt_price);
        }
    }

    #[test]
    fn test_amount_deltas_round_toward_pool(
        price_0 in strategies::sqrt_price(),
        price_1 in strategies::sqrt_price(),
        liquidity in strategies::liquidity()
    ) {
        if let (Ok(down), Ok(up)) = (
            try_get_amount_delta_a(price_0, price_1, liquidity, false),
            try_get_amount_delta_a(price_0, price_1, liquidity, true),
        ) {
            prop_assert!(up >= down && up - down <= 1);
        }
        if let (Ok(down), Ok(up)) = (
            try_get_amount_delta_b(price_0, price_1, liquidity, false),
            try_get_amount_delta_b(price_0, price_1, liquidity, true),
        ) {
            prop_assert!(up >= down && up - down <= 1);
        }
    }

    #[test]
    fn test_input_moves_price_in_trade_direction(
        sqrt_price in strategies::sqrt_price(),
        liquidity in strategies::liquidity(),
        amount in strategies::amount()
    ) {
        // Selling A never raises the price, selling B never lowers it
        if let Ok(next) = get_next_sqrt_price(sqrt_price, liquidity, amount, true, true) {
            prop_assert!(next <= sqrt_price);
        }
        if let Ok(next) = get_next_sqrt_price(sqrt_price, liquidity, amount, true, false) {
            prop_assert!(next >= sqrt_price);
        }
    }

    #[test]
    fn test_swap_step_never_overspends(
        tick in -20_000i32..20_000,
        target_offset in 1i32..2_000,
        liquidity in strategies::liquidity(),
        amount in strategies::amount(),
        fee_rate in strategies::fee_rate(),
        a_to_b in any::<bool>()
    ) {
        let current = sqrt_price_from_tick_index(tick).unwrap();
        let target_tick = if a_to_b { tick - target_offset } else { tick + target_offset };
        let target = sqrt_price_from_tick_index(target_tick).unwrap();

        if let Ok(step) = compute_swap_step(amount, fee_rate, liquidity, current, target, true, a_to_b) {
            prop_assert!(step.amount_in as u128 + step.fee_amount as u128 <= amount as u128);
            if a_to_b {
                prop_assert!(step.next_price <= current && step.next_price >= target);
            } else {
                prop_assert!(step.next_price >= current && step.next_price <= target);
            }
        }
    }
}
