use crate::constants::*;
use crate::state::{deserialize_account, serialize_account, Globalpool};
use anchor_lang::prelude::*;

/// Snapshot of a liquidity provider's position.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LiquidityPosition {
    pub globalpool: Pubkey,
    pub position_mint: Pubkey,
    pub liquidity: u128,
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,

    /// Q64.64
    pub fee_growth_checkpoint_a: u128,
    pub fee_owed_a: u64,
    /// Q64.64
    pub fee_growth_checkpoint_b: u128,
    pub fee_owed_b: u64,
}

impl LiquidityPosition {
    pub fn try_deserialize(data: &[u8]) -> Result<Self> {
        deserialize_account(data, LIQUIDITY_POSITION_ACCOUNT_NAME)
    }

    pub fn to_account_data(&self) -> Result<Vec<u8>> {
        serialize_account(self, LIQUIDITY_POSITION_ACCOUNT_NAME)
    }

    /// A position can be closed once it holds no liquidity and no uncollected fees.
    pub fn is_position_empty(&self) -> bool {
        self.liquidity == 0 && self.fee_owed_a == 0 && self.fee_owed_b == 0
    }
}

/// Snapshot of a leveraged trade position funded by borrowed pool liquidity.
///
/// The quote engine never reads these during a swap; they exist so callers can
/// reconcile a pool's borrowed liquidity against the positions that hold it.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct TradePosition {
    pub globalpool: Pubkey,
    pub position_mint: Pubkey,

    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
    /// Pool tick when the position was opened
    pub tick_open_index: i32,

    pub liquidity_borrowed: u128,

    pub loan_token_available: u64,
    pub loan_token_swapped: u64,
    pub trade_token_amount: u64,
    pub collateral_amount: u64,

    pub token_mint_loan: Pubkey,
    pub token_mint_collateral: Pubkey,

    pub open_time: u64,
    pub duration: u64,
    pub interest_rate: u32,
}

impl TradePosition {
    pub fn try_deserialize(data: &[u8]) -> Result<Self> {
        deserialize_account(data, TRADE_POSITION_ACCOUNT_NAME)
    }

    pub fn to_account_data(&self) -> Result<Vec<u8>> {
        serialize_account(self, TRADE_POSITION_ACCOUNT_NAME)
    }

    /// True when the loan was taken in the pool's token A.
    pub fn is_borrow_a(&self, globalpool: &Globalpool) -> bool {
        self.token_mint_loan == globalpool.token_mint_a
    }

    /// A trade position can be closed once nothing is borrowed or held by it.
    pub fn is_position_empty(&self) -> bool {
        self.liquidity_borrowed == 0
            && self.loan_token_available == 0
            && self.loan_token_swapped == 0
            && self.trade_token_amount == 0
            && self.collateral_amount == 0
    }
}
