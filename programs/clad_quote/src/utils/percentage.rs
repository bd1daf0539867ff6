//! Slippage tolerance.
use crate::errors::ErrorCode;
use crate::math::{checked_mul_div, to_token_amount};
use anchor_lang::prelude::*;

/// A fraction in `[0, 1]`, used as a slippage tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percentage {
    pub numerator: u64,
    pub denominator: u64,
}

impl Percentage {
    /// # Example
    ///
    /// ```
    /// use clad_quote::utils::percentage::Percentage;
    /// let one_percent = Percentage::from_fraction(1, 100).unwrap();
    /// assert_eq!(one_percent.numerator, 1);
    /// ```
    pub fn from_fraction(numerator: u64, denominator: u64) -> Result<Self> {
        require!(
            denominator > 0 && numerator <= denominator,
            ErrorCode::InvalidPercentage
        );
        Ok(Percentage {
            numerator,
            denominator,
        })
    }

    /// Tolerance expressed in basis points (100 bps = 1%).
    pub fn from_bps(bps: u16) -> Result<Self> {
        Self::from_fraction(bps as u64, 10_000)
    }
}

/// Widens `amount` by `slippage`.
///
/// Adjusting up gives the most input a caller accepts, `amount * (d + n) / d`;
/// adjusting down gives the least output, `amount * d / (d + n)`. Both round down.
pub fn adjust_for_slippage(amount: u64, slippage: Percentage, adjust_up: bool) -> Result<u64> {
    let numerator = slippage.numerator as u128;
    let denominator = slippage.denominator as u128;
    if denominator == 0 {
        return err!(ErrorCode::InvalidPercentage);
    }
    let adjusted = if adjust_up {
        checked_mul_div(amount as u128, denominator + numerator, denominator)?
    } else {
        checked_mul_div(amount as u128, denominator, denominator + numerator)?
    };
    to_token_amount(adjusted)
}
