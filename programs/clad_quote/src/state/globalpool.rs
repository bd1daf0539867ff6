use crate::constants::*;
use crate::errors::ErrorCode;
use crate::math::tick_index_from_sqrt_price;
use crate::state::{deserialize_account, serialize_account};
use anchor_lang::prelude::*;

/// Liquidity that spot swaps may trade against.
///
/// Kept as its own type so borrowed liquidity can never be passed where swappable
/// liquidity is expected.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct AvailableLiquidity(pub u128);

/// Liquidity lent out to leveraged trade positions. It never backs a swap quote.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct BorrowedLiquidity(pub u128);

impl AvailableLiquidity {
    #[inline]
    pub fn get(self) -> u128 {
        self.0
    }
}

impl BorrowedLiquidity {
    #[inline]
    pub fn get(self) -> u128 {
        self.0
    }
}

/// Snapshot of a Globalpool account.
///
/// Field order matches the on-chain Borsh layout.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Globalpool {
    pub bump: [u8; 1],

    pub tick_spacing: u16,
    pub tick_spacing_seed: [u8; 2],

    /// Stored as hundredths of a basis point
    pub fee_rate: u16,
    pub fee_rate_seed: [u8; 2],

    /// Portion of the fee rate taken by the protocol, in basis points
    pub protocol_fee_rate: u16,

    pub liquidity_available: AvailableLiquidity,
    pub liquidity_borrowed: BorrowedLiquidity,

    /// Q64.64
    pub sqrt_price: u128,
    pub tick_current_index: i32,

    pub protocol_fee_owed_a: u64,
    pub protocol_fee_owed_b: u64,

    pub token_mint_a: Pubkey,
    pub token_vault_a: Pubkey,
    /// Q64.64
    pub fee_growth_global_a: u128,

    pub token_mint_b: Pubkey,
    pub token_vault_b: Pubkey,
    /// Q64.64
    pub fee_growth_global_b: u128,

    pub inception_time: u64,

    pub fee_authority: Pubkey,
}

impl Globalpool {
    /// Decodes a Globalpool from raw account bytes, discriminator included.
    pub fn try_deserialize(data: &[u8]) -> Result<Self> {
        deserialize_account(data, GLOBALPOOL_ACCOUNT_NAME)
    }

    /// Encodes the snapshot in the on-chain account layout.
    pub fn to_account_data(&self) -> Result<Vec<u8>> {
        serialize_account(self, GLOBALPOOL_ACCOUNT_NAME)
    }

    /// Checks the snapshot is one the settlement program could have produced.
    ///
    /// # Returns
    /// * `Ok(())` if spacing, fee rates, price, tick and liquidity are consistent
    pub fn validate(&self) -> Result<()> {
        require!(self.tick_spacing > 0, ErrorCode::InvalidTickSpacing);
        require!(self.fee_rate <= MAX_FEE_RATE, ErrorCode::FeeRateMaxExceeded);
        require!(
            self.protocol_fee_rate <= MAX_PROTOCOL_FEE_RATE,
            ErrorCode::ProtocolFeeRateMaxExceeded
        );
        require!(
            (MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&self.sqrt_price),
            ErrorCode::SqrtPriceOutOfBounds
        );
        require!(
            (MIN_TICK_INDEX..=MAX_TICK_INDEX).contains(&self.tick_current_index),
            ErrorCode::InvalidTickIndex
        );
        require!(
            self.liquidity_available.get() >= self.liquidity_borrowed.get(),
            ErrorCode::PoolInsolvent
        );
        Ok(())
    }

    /// Liquidity a swap at the current price trades against.
    pub fn swappable_liquidity(&self) -> AvailableLiquidity {
        self.liquidity_available
    }

    /// Global fee growth of the input token of a swap in the given direction.
    pub fn fee_growth_global_input(&self, a_to_b: bool) -> u128 {
        if a_to_b {
            self.fee_growth_global_a
        } else {
            self.fee_growth_global_b
        }
    }

    /// Resolves the swap direction for a given input mint.
    ///
    /// # Returns
    /// * `Ok(true)` when `input_mint` is token A, `Ok(false)` when it is token B
    pub fn a_to_b_for_input_mint(&self, input_mint: &Pubkey) -> Result<bool> {
        if *input_mint == self.token_mint_a {
            Ok(true)
        } else if *input_mint == self.token_mint_b {
            Ok(false)
        } else {
            err!(ErrorCode::InvalidTokenMint)
        }
    }

    /// Creates an initialized snapshot at `sqrt_price`, with seeds derived from the
    /// spacing and fee rate the way the program derives them.
    pub fn new(
        tick_spacing: u16,
        fee_rate: u16,
        protocol_fee_rate: u16,
        sqrt_price: u128,
        token_mint_a: Pubkey,
        token_mint_b: Pubkey,
    ) -> Result<Self> {
        let pool = Globalpool {
            tick_spacing,
            tick_spacing_seed: tick_spacing.to_le_bytes(),
            fee_rate,
            fee_rate_seed: fee_rate.to_le_bytes(),
            protocol_fee_rate,
            sqrt_price,
            tick_current_index: tick_index_from_sqrt_price(sqrt_price)?,
            token_mint_a,
            token_mint_b,
            ..Default::default()
        };
        pool.validate()?;
        Ok(pool)
    }
}
