use crate::errors::ErrorCode;
use crate::state::*;
use crate::unit_test::fixtures::*;
use anchor_lang::prelude::*;

mod position_tests {
    use super::*;

    fn trade_position() -> TradePosition {
        TradePosition {
            globalpool: globalpool_key(),
            position_mint: Pubkey::new_unique(),
            tick_lower_index: -128,
            tick_upper_index: 128,
            tick_open_index: 0,
            liquidity_borrowed: 1_000,
            loan_token_available: 10,
            loan_token_swapped: 20,
            trade_token_amount: 19,
            collateral_amount: 5,
            token_mint_loan: mint_a(),
            token_mint_collateral: mint_b(),
            open_time: 1_700_000_000,
            duration: 86_400,
            interest_rate: 500,
        }
    }

    #[test]
    fn test_liquidity_position_round_trip() {
        let position = LiquidityPosition {
            globalpool: globalpool_key(),
            position_mint: Pubkey::new_unique(),
            liquidity: 42,
            tick_lower_index: -5632,
            tick_upper_index: 5632,
            fee_growth_checkpoint_a: 1 << 70,
            fee_owed_a: 3,
            fee_growth_checkpoint_b: 9,
            fee_owed_b: 4,
        };
        let data = position.to_account_data().unwrap();
        assert_eq!(LiquidityPosition::try_deserialize(&data).unwrap(), position);

        // A trade position's bytes are not a liquidity position
        let data = trade_position().to_account_data().unwrap();
        assert_eq!(
            LiquidityPosition::try_deserialize(&data).unwrap_err(),
            ErrorCode::InvalidAccountDiscriminator.into()
        );
    }

    #[test]
    fn test_trade_position_round_trip() {
        let position = trade_position();
        let data = position.to_account_data().unwrap();
        assert_eq!(TradePosition::try_deserialize(&data).unwrap(), position);
    }

    #[test]
    fn test_is_borrow_a() {
        let pool = test_pool(LIQUIDITY);
        let mut position = trade_position();
        assert!(position.is_borrow_a(&pool));
        position.token_mint_loan = mint_b();
        assert!(!position.is_borrow_a(&pool));
    }

    #[test]
    fn test_trade_position_empty_only_when_everything_is_repaid() {
        let mut position = trade_position();
        assert!(!position.is_position_empty());

        position.liquidity_borrowed = 0;
        position.loan_token_available = 0;
        position.loan_token_swapped = 0;
        position.trade_token_amount = 0;
        assert!(!position.is_position_empty());

        position.collateral_amount = 0;
        assert!(position.is_position_empty());
    }

    #[test]
    fn test_liquidity_position_empty() {
        let mut position = LiquidityPosition {
            liquidity: 0,
            fee_owed_a: 1,
            ..Default::default()
        };
        assert!(!position.is_position_empty());
        position.fee_owed_a = 0;
        assert!(position.is_position_empty());
    }
}
