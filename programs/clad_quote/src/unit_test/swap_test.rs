use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::*;
use crate::swap::*;
use crate::tick_array_sequence::TickArraySequence;
use crate::unit_test::fixtures::*;

/// Tests for the swap stepper
mod swap_tests {
    use super::*;

    fn run(
        pool: &Globalpool,
        arrays: &[crate::tick::TickArray],
        amount: u64,
        amount_specified_is_input: bool,
        a_to_b: bool,
    ) -> anchor_lang::Result<SwapResult> {
        let mut sequence = TickArraySequence::new(arrays, pool.tick_spacing, a_to_b)?;
        let limit = if a_to_b { MIN_SQRT_PRICE } else { MAX_SQRT_PRICE };
        compute_swap(pool, &mut sequence, amount, limit, amount_specified_is_input, a_to_b)
    }

    mod single_segment_tests {
        use super::*;

        #[test]
        fn test_exact_in_a_to_b() {
            let pool = test_pool(LIQUIDITY);
            let arrays = tick_arrays(&[0, -5632, -11264]);
            let result = run(&pool, &arrays, 1_000_000, true, true).unwrap();

            assert_eq!(result.amount_a, 1_000_000);
            assert_eq!(result.amount_b, 996_999);
            assert_eq!(result.next_sqrt_price, 18446725682324046339);
            assert_eq!(result.next_tick_index, -1);
            assert_eq!(result.total_fee_amount, 3_000);
            assert_eq!(result.protocol_fee, 90);
            assert_eq!(result.next_fee_growth_global, 53680025254);
            assert_eq!(result.next_liquidity, AvailableLiquidity(LIQUIDITY));
            assert!(result.crossed_ticks.is_empty());
        }

        #[test]
        fn test_exact_in_b_to_a() {
            let pool = test_pool(LIQUIDITY);
            let arrays = tick_arrays(&[0, 5632, 11264]);
            let result = run(&pool, &arrays, 1_000_000, true, false).unwrap();

            assert_eq!(result.amount_b, 1_000_000);
            assert_eq!(result.amount_a, 996_999);
            assert_eq!(result.next_sqrt_price, 18446762465113393104);
            assert_eq!(result.next_tick_index, 0);
        }

        #[test]
        fn test_exact_out_charges_fee_on_top() {
            let pool = test_pool(LIQUIDITY);
            let arrays = tick_arrays(&[0, -5632, -11264]);
            let result = run(&pool, &arrays, 500_000, false, true).unwrap();

            assert_eq!(result.amount_b, 500_000);
            assert_eq!(result.amount_a, 501_506);
            assert_eq!(result.total_fee_amount, 1_505);
            assert_eq!(result.protocol_fee, 45);
            assert_eq!(result.next_sqrt_price, 18446734850337514761);
        }

        #[test]
        fn test_borrowed_liquidity_does_not_change_the_curve() {
            let mut pool = test_pool(LIQUIDITY);
            let arrays = tick_arrays(&[0, -5632, -11264]);
            let baseline = run(&pool, &arrays, 1_000_000, true, true).unwrap();

            pool.liquidity_borrowed = BorrowedLiquidity(LIQUIDITY / 2);
            let with_loans = run(&pool, &arrays, 1_000_000, true, true).unwrap();
            assert_eq!(baseline, with_loans);
        }
    }

    mod crossing_tests {
        use super::*;

        #[test]
        fn test_a_to_b_crosses_lower_tick_and_drops_liquidity() {
            let pool = test_pool(LIQUIDITY);
            let mut arrays = tick_arrays(&[0, -5632, -11264]);
            init_tick(&mut arrays, 128, -500_000_000_000);
            init_tick(&mut arrays, -128, 500_000_000_000);

            let result = run(&pool, &arrays, 10_000_000_000, true, true).unwrap();
            assert_eq!(result.amount_a, 10_000_000_000);
            assert_eq!(result.amount_b, 9_859_348_628);
            assert_eq!(result.next_tick_index, -269);
            assert_eq!(result.next_sqrt_price, 18200674624416558641);
            assert_eq!(result.total_fee_amount, 30_000_001);
            assert_eq!(result.protocol_fee, 899_999);
            assert_eq!(result.next_fee_growth_global, 727926949445907);
            assert_eq!(result.next_liquidity, AvailableLiquidity(500_000_000_000));

            // Outside values flipped against the growth at the moment of crossing
            assert_eq!(result.crossed_ticks.len(), 1);
            let crossed = result.crossed_ticks[0];
            assert_eq!(crossed.tick_index, -128);
            assert_eq!(crossed.fee_growth_outside_a, 345673629430963);
            assert_eq!(crossed.fee_growth_outside_b, 0);

            // The snapshot is untouched
            assert_eq!(
                arrays[1].get_tick(-128, TICK_SPACING).unwrap().fee_growth_outside_a,
                0
            );
        }

        #[test]
        fn test_b_to_a_crosses_upper_tick() {
            let pool = test_pool(LIQUIDITY);
            let mut arrays = tick_arrays(&[0, 5632, 11264]);
            init_tick(&mut arrays, 128, -500_000_000_000);

            let result = run(&pool, &arrays, 10_000_000_000, true, false).unwrap();
            assert_eq!(result.amount_b, 10_000_000_000);
            assert_eq!(result.amount_a, 9_859_348_628);
            assert_eq!(result.next_tick_index, 268);
            assert_eq!(result.next_sqrt_price, 18696140332317300847);
            assert_eq!(result.next_liquidity, AvailableLiquidity(500_000_000_000));
            assert_eq!(result.crossed_ticks[0].tick_index, 128);
        }

        #[test]
        fn test_crossing_more_liquidity_than_active_underflows() {
            let pool = test_pool(1_000);
            let mut arrays = tick_arrays(&[0, -5632, -11264]);
            init_tick(&mut arrays, -64, 2_000);

            let result = run(&pool, &arrays, 1_000_000, true, true);
            assert_eq!(result.unwrap_err(), ErrorCode::LiquidityUnderflow.into());
        }
    }

    mod termination_tests {
        use super::*;

        #[test]
        fn test_price_limit_stops_swap_with_budget_left() {
            let pool = test_pool(LIQUIDITY);
            let arrays = tick_arrays(&[0, -5632, -11264]);
            let limit = crate::math::sqrt_price_from_tick_index(-64).unwrap();

            let mut sequence = TickArraySequence::new(&arrays, TICK_SPACING, true).unwrap();
            let result =
                compute_swap(&pool, &mut sequence, 100_000_000_000, limit, true, true).unwrap();
            assert_eq!(result.next_sqrt_price, limit);
            assert!(result.amount_a < 100_000_000_000);
            assert_eq!(result.next_tick_index, -64);
        }

        #[test]
        fn test_budget_consumed_by_fees_without_price_move_fails() {
            let pool = test_pool(LIQUIDITY);
            let arrays = tick_arrays(&[0, -5632, -11264]);
            let result = run(&pool, &arrays, 1, true, true);
            assert_eq!(
                result.unwrap_err(),
                ErrorCode::InputExhaustedWithoutPriceMovement.into()
            );
        }

        #[test]
        fn test_running_past_last_array_fails() {
            let pool = test_pool(1_000_000);
            let arrays = tick_arrays(&[0, -5632, -11264]);
            let result = run(&pool, &arrays, 1_000_000_000_000_000, true, true);
            assert_eq!(
                result.unwrap_err(),
                ErrorCode::TooManyTickArraysTraversed.into()
            );
        }
    }
}
