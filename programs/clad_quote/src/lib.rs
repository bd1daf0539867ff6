#![allow(unexpected_cfgs)]

//! Client-side swap quotes for Clad concentrated liquidity pools.
//!
//! Given a Globalpool snapshot and the tick arrays around its current price, the
//! engine reproduces the settlement program's swap arithmetic to predict the amounts,
//! end price and fees of a trade before it is submitted. Everything is a pure
//! computation over immutable snapshots: no RPC, no signing.

// Protocol constants, errors and fixed-point math
pub mod constants;
pub mod errors;
pub mod math;
pub mod swap_math;

// Account snapshots
pub mod state;
pub mod tick;

// Quoting
pub mod fees;
pub mod quote;
pub mod swap;
pub mod tick_array_sequence;
pub mod utils;

pub use errors::ErrorCode;
pub use quote::{
    default_sqrt_price_limit, simulate_swap, swap_quote_by_input_token,
    swap_quote_by_output_token, SwapQuote, SwapQuoteParams,
};

#[cfg(test)]
pub mod unit_test;

#[cfg(test)]
pub mod property_based_test;
