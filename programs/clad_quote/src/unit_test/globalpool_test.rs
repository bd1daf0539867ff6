use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::*;
use crate::unit_test::fixtures::*;
use anchor_lang::prelude::*;

/// Tests for the Globalpool snapshot
mod globalpool_tests {
    use super::*;

    mod validate_tests {
        use super::*;

        #[test]
        fn test_fixture_pool_is_valid() {
            assert!(test_pool(LIQUIDITY).validate().is_ok());
        }

        #[test]
        fn test_borrowed_beyond_available_is_insolvent() {
            let mut pool = test_pool(100);
            pool.liquidity_borrowed = BorrowedLiquidity(101);
            assert_eq!(
                pool.validate().unwrap_err(),
                ErrorCode::PoolInsolvent.into()
            );

            // Fully lent out is still solvent
            pool.liquidity_borrowed = BorrowedLiquidity(100);
            assert!(pool.validate().is_ok());
        }

        #[test]
        fn test_invalid_parameters() {
            let mut pool = test_pool(LIQUIDITY);
            pool.tick_spacing = 0;
            assert_eq!(pool.validate().unwrap_err(), ErrorCode::InvalidTickSpacing.into());

            let mut pool = test_pool(LIQUIDITY);
            pool.fee_rate = MAX_FEE_RATE + 1;
            assert_eq!(pool.validate().unwrap_err(), ErrorCode::FeeRateMaxExceeded.into());

            let mut pool = test_pool(LIQUIDITY);
            pool.protocol_fee_rate = MAX_PROTOCOL_FEE_RATE + 1;
            assert_eq!(
                pool.validate().unwrap_err(),
                ErrorCode::ProtocolFeeRateMaxExceeded.into()
            );

            let mut pool = test_pool(LIQUIDITY);
            pool.sqrt_price = MAX_SQRT_PRICE + 1;
            assert_eq!(pool.validate().unwrap_err(), ErrorCode::SqrtPriceOutOfBounds.into());

            let mut pool = test_pool(LIQUIDITY);
            pool.tick_current_index = MIN_TICK_INDEX - 1;
            assert_eq!(pool.validate().unwrap_err(), ErrorCode::InvalidTickIndex.into());
        }
    }

    mod accessor_tests {
        use super::*;

        #[test]
        fn test_swappable_liquidity_excludes_borrowed() {
            let mut pool = test_pool(1_000);
            pool.liquidity_borrowed = BorrowedLiquidity(400);
            assert_eq!(pool.swappable_liquidity(), AvailableLiquidity(1_000));
        }

        #[test]
        fn test_direction_from_input_mint() {
            let pool = test_pool(LIQUIDITY);
            assert!(pool.a_to_b_for_input_mint(&mint_a()).unwrap());
            assert!(!pool.a_to_b_for_input_mint(&mint_b()).unwrap());
            assert_eq!(
                pool.a_to_b_for_input_mint(&Pubkey::new_unique()).unwrap_err(),
                ErrorCode::InvalidTokenMint.into()
            );
        }

        #[test]
        fn test_fee_growth_of_input_token() {
            let mut pool = test_pool(LIQUIDITY);
            pool.fee_growth_global_a = 1;
            pool.fee_growth_global_b = 2;
            assert_eq!(pool.fee_growth_global_input(true), 1);
            assert_eq!(pool.fee_growth_global_input(false), 2);
        }

        #[test]
        fn test_new_derives_tick_and_seeds() {
            let price = crate::math::sqrt_price_from_tick_index(-5632).unwrap();
            let pool = Globalpool::new(64, 3000, 300, price, mint_a(), mint_b()).unwrap();
            assert_eq!(pool.tick_current_index, -5632);
            assert_eq!(pool.tick_spacing_seed, 64u16.to_le_bytes());
            assert_eq!(pool.fee_rate_seed, 3000u16.to_le_bytes());
            assert_eq!(pool.swappable_liquidity(), AvailableLiquidity(0));
        }
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn test_round_trip_through_account_bytes() {
            let mut pool = test_pool(LIQUIDITY);
            pool.liquidity_borrowed = BorrowedLiquidity(12345);
            pool.fee_growth_global_b = u128::MAX;
            pool.fee_authority = Pubkey::new_unique();

            let data = pool.to_account_data().unwrap();
            assert_eq!(data[..DISCRIMINATOR_LEN], account_discriminator("Globalpool"));
            assert_eq!(Globalpool::try_deserialize(&data).unwrap(), pool);
        }

        #[test]
        fn test_trailing_padding_is_ignored() {
            let pool = test_pool(LIQUIDITY);
            let mut data = pool.to_account_data().unwrap();
            data.extend_from_slice(&[0u8; 384]);
            assert_eq!(Globalpool::try_deserialize(&data).unwrap(), pool);
        }

        #[test]
        fn test_layout_size() {
            // Borsh writes fields back to back, without alignment padding
            let data = test_pool(LIQUIDITY).to_account_data().unwrap();
            assert_eq!(data.len(), DISCRIMINATOR_LEN + 1 + 2 + 2 + 2 + 2 + 2 + 16 * 3 + 4 + 8 * 2 + 32 * 4 + 16 * 2 + 8 + 32);
        }

        #[test]
        fn test_rejects_other_accounts_and_truncation() {
            let pool = test_pool(LIQUIDITY);
            let mut data = pool.to_account_data().unwrap();
            data[..DISCRIMINATOR_LEN].copy_from_slice(&account_discriminator("TickArray"));
            assert_eq!(
                Globalpool::try_deserialize(&data).unwrap_err(),
                ErrorCode::InvalidAccountDiscriminator.into()
            );

            let data = pool.to_account_data().unwrap();
            assert_eq!(
                Globalpool::try_deserialize(&data[..40]).unwrap_err(),
                ErrorCode::AccountDecodeFailed.into()
            );
            assert_eq!(
                Globalpool::try_deserialize(&data[..4]).unwrap_err(),
                ErrorCode::AccountDataTooSmall.into()
            );
        }
    }
}
