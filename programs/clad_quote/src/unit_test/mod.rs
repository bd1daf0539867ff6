pub mod globalpool_test;
pub mod position_test;
pub mod swap_test;

/// Shared fixtures for the unit tests
pub mod fixtures {
    use crate::constants::*;
    use crate::state::{AvailableLiquidity, BorrowedLiquidity, Globalpool};
    use crate::tick::TickArray;
    use crate::utils::pda::get_tick_array_address;
    use anchor_lang::prelude::*;

    pub const TICK_SPACING: u16 = 64;
    pub const FEE_RATE: u16 = 3000;
    pub const PROTOCOL_FEE_RATE: u16 = 300;
    pub const LIQUIDITY: u128 = 1_000_000_000_000;

    pub fn program_id() -> Pubkey {
        Pubkey::new_from_array([9; 32])
    }

    pub fn globalpool_key() -> Pubkey {
        Pubkey::new_from_array([7; 32])
    }

    pub fn mint_a() -> Pubkey {
        Pubkey::new_from_array([1; 32])
    }

    pub fn mint_b() -> Pubkey {
        Pubkey::new_from_array([2; 32])
    }

    /// Pool at tick 0 (sqrt price 1.0) with `liquidity` fully available
    pub fn test_pool(liquidity: u128) -> Globalpool {
        Globalpool {
            bump: [255],
            tick_spacing: TICK_SPACING,
            tick_spacing_seed: TICK_SPACING.to_le_bytes(),
            fee_rate: FEE_RATE,
            fee_rate_seed: FEE_RATE.to_le_bytes(),
            protocol_fee_rate: PROTOCOL_FEE_RATE,
            liquidity_available: AvailableLiquidity(liquidity),
            liquidity_borrowed: BorrowedLiquidity(0),
            sqrt_price: Q64,
            tick_current_index: 0,
            token_mint_a: mint_a(),
            token_mint_b: mint_b(),
            ..Default::default()
        }
    }

    pub fn tick_array(start_tick_index: i32) -> TickArray {
        TickArray::new(
            get_tick_array_address(&program_id(), &globalpool_key(), start_tick_index),
            globalpool_key(),
            start_tick_index,
        )
    }

    pub fn tick_arrays(starts: &[i32]) -> Vec<TickArray> {
        starts.iter().map(|start| tick_array(*start)).collect()
    }

    /// Marks a tick initialized with the given net liquidity, in whichever array holds it
    pub fn init_tick(arrays: &mut [TickArray], tick_index: i32, liquidity_net: i128) {
        let array = arrays
            .iter_mut()
            .find(|array| array.check_in_array_bounds(tick_index, TICK_SPACING))
            .expect("tick not covered by fixture arrays");
        let tick = array.get_tick_mut(tick_index, TICK_SPACING).unwrap();
        tick.initialized = true;
        tick.liquidity_net = liquidity_net;
        tick.liquidity_gross = liquidity_net.unsigned_abs();
    }
}
