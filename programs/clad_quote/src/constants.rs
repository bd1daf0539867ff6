//! Clad Protocol Constants
//!
//! Protocol-wide parameters shared by every quote. They mirror the values compiled
//! into the settlement program; a quote computed against different bounds would not
//! match what the program executes.

/// Number of fractional bits in a Q64.64 fixed-point value.
pub const Q64_RESOLUTION: u32 = 64;

/// 1.0 in Q64.64.
pub const Q64: u128 = 1u128 << Q64_RESOLUTION;

/// Mask selecting the fractional part of a Q64.64 value.
pub const Q64_MASK: u128 = Q64 - 1;

/// The minimum tick index supported by Globalpools.
///
/// Chosen so that `sqrt_price_from_tick_index(MIN_TICK_INDEX)` still fits the
/// Q32.64 range the program stores.
pub const MIN_TICK_INDEX: i32 = -443636;

/// The maximum tick index supported by Globalpools.
pub const MAX_TICK_INDEX: i32 = 443636;

/// The minimum sqrt-price supported by Globalpools (Q64.64).
///
/// Equals `sqrt_price_from_tick_index(MIN_TICK_INDEX)`.
pub const MIN_SQRT_PRICE: u128 = 4295048016;

/// The maximum sqrt-price supported by Globalpools (Q64.64).
///
/// Equals `sqrt_price_from_tick_index(MAX_TICK_INDEX)`.
pub const MAX_SQRT_PRICE: u128 = 79226673515401279992447579055;

/// Number of tick records stored in one tick array account.
pub const TICK_ARRAY_SIZE: i32 = 88;

/// `TICK_ARRAY_SIZE` as a `usize`, for indexing.
pub const TICK_ARRAY_SIZE_USIZE: usize = 88;

/// Maximum number of tick arrays a single swap instruction can reference.
pub const MAX_SWAP_TICK_ARRAYS: usize = 3;

/// The denominator the fee rate is divided by.
///
/// Fee rates are stored as hundredths of a basis point, so 3000 is 0.3%.
pub const FEE_RATE_MUL_VALUE: u128 = 1_000_000;

/// The denominator the protocol fee rate is divided by (basis points).
pub const PROTOCOL_FEE_RATE_MUL_VALUE: u128 = 10_000;

/// Upper bound on a pool's fee rate (3%).
pub const MAX_FEE_RATE: u16 = 30_000;

/// Upper bound on a pool's protocol fee rate (25% of the trading fee).
pub const MAX_PROTOCOL_FEE_RATE: u16 = 2_500;

/// Seed prefix of tick array PDAs.
pub const TICK_ARRAY_SEED: &[u8] = b"tick_array";

/// Anchor account names, used to derive the 8-byte account discriminators.
pub const GLOBALPOOL_ACCOUNT_NAME: &str = "Globalpool";
pub const TICK_ARRAY_ACCOUNT_NAME: &str = "TickArray";
pub const LIQUIDITY_POSITION_ACCOUNT_NAME: &str = "LiquidityPosition";
pub const TRADE_POSITION_ACCOUNT_NAME: &str = "TradePosition";

/// Length of an Anchor account discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;
