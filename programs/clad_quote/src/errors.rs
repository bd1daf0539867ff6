//! Clad Quote Error Definitions
//!
//! Every failure of the quote engine is a validation or business-rule failure over an
//! immutable snapshot. None of them is transient, so nothing in this crate retries:
//! a failed quote aborts with no partial result and the caller decides whether to
//! widen its parameters or fetch a fresher snapshot.
use anchor_lang::prelude::*;

/// Error codes returned by the quote engine
#[error_code]
pub enum ErrorCode {
    /// The caller's sqrt-price limit lies outside `[MIN_SQRT_PRICE, MAX_SQRT_PRICE]`.
    #[msg("Provided sqrt price limit is out of bounds")]
    PriceLimitOutOfBounds,

    /// The caller's sqrt-price limit lies on the wrong side of the pool price.
    ///
    /// A→B swaps move the price down, so the limit must be at or below the current
    /// price; B→A swaps need a limit at or above it.
    #[msg("Provided sqrt price limit is in the opposite direction of the trade")]
    PriceLimitWrongDirection,

    /// The requested trade amount is zero.
    #[msg("Provided token amount is zero")]
    ZeroAmount,

    /// The first supplied tick array does not contain the pool's current tick.
    #[msg("Tick array at index 0 does not contain the globalpool current tick index")]
    InvalidStartingTickArray,

    /// Exact-input quote whose output falls below `other_amount_threshold`.
    #[msg("Quoted output amount is below the other amount threshold")]
    SlippageExceededExactIn,

    /// Exact-output quote whose required input exceeds `other_amount_threshold`.
    #[msg("Quoted input amount is above the other amount threshold")]
    SlippageExceededExactOut,

    /// The trade would need more tick arrays than a swap instruction can carry.
    #[msg("Swap traverses more than the allowable amount of tick arrays")]
    TooManyTickArraysTraversed,

    /// A fixed-point computation exceeded its representable range.
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    /// The whole budget was consumed by fees and rounding without moving the price.
    #[msg("Input amount exhausted without moving the price")]
    InputExhaustedWithoutPriceMovement,

    #[msg("Tick spacing must be greater than zero")]
    InvalidTickSpacing,

    #[msg("Tick index is out of bounds or not a multiple of tick spacing")]
    InvalidTickIndex,

    #[msg("Tick index does not belong to the tick array")]
    TickArrayIndexOutOfBounds,

    /// A tick array snapshot belongs to a different globalpool.
    #[msg("Tick array does not belong to the globalpool")]
    TickArrayPoolMismatch,

    /// A tick array start is misaligned or outside the protocol's tick range.
    #[msg("Invalid tick array start index")]
    InvalidTickArrayStartIndex,

    #[msg("Sqrt price is out of bounds")]
    SqrtPriceOutOfBounds,

    /// The pool lent out more liquidity than it has available.
    #[msg("Globalpool borrowed liquidity exceeds available liquidity")]
    PoolInsolvent,

    #[msg("Fee rate exceeds the maximum")]
    FeeRateMaxExceeded,

    #[msg("Protocol fee rate exceeds the maximum")]
    ProtocolFeeRateMaxExceeded,

    #[msg("Liquidity overflow")]
    LiquidityOverflow,

    #[msg("Liquidity underflow")]
    LiquidityUnderflow,

    #[msg("Division by zero")]
    DivideByZero,

    /// A token amount does not fit in a u64.
    #[msg("Token amount exceeds u64::MAX")]
    TokenMaxExceeded,

    #[msg("Percentage must have a non-zero denominator and be at most 100%")]
    InvalidPercentage,

    /// The account data does not start with the expected Anchor discriminator.
    #[msg("Invalid account discriminator")]
    InvalidAccountDiscriminator,

    #[msg("Account data is too small")]
    AccountDataTooSmall,

    #[msg("Failed to decode account data")]
    AccountDecodeFailed,

    /// A mint passed to a quote helper belongs to neither side of the pool.
    #[msg("Token mint does not belong to the globalpool")]
    InvalidTokenMint,
}
