//! Account snapshots read by the quote engine.
use crate::constants::DISCRIMINATOR_LEN;
use crate::errors::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

pub mod globalpool;
pub mod position;

pub use globalpool::*;
pub use position::*;

/// Anchor account discriminator: the first 8 bytes of `sha256("account:<Name>")`.
pub fn account_discriminator(account_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator
        .copy_from_slice(&hash(format!("account:{}", account_name).as_bytes()).to_bytes()[..DISCRIMINATOR_LEN]);
    discriminator
}

/// Checks the discriminator and minimum length of raw account data and returns the
/// bytes following the discriminator.
pub(crate) fn account_data<'a>(data: &'a [u8], account_name: &str, min_len: usize) -> Result<&'a [u8]> {
    if data.len() < DISCRIMINATOR_LEN + min_len {
        return err!(ErrorCode::AccountDataTooSmall);
    }
    if data[..DISCRIMINATOR_LEN] != account_discriminator(account_name) {
        return err!(ErrorCode::InvalidAccountDiscriminator);
    }
    Ok(&data[DISCRIMINATOR_LEN..])
}

/// Borsh-decodes the body of an Anchor account after validating its discriminator.
///
/// Trailing bytes are allowed: accounts are allocated with padding for future fields.
pub(crate) fn deserialize_account<T: AnchorDeserialize>(data: &[u8], account_name: &str) -> Result<T> {
    let mut body = account_data(data, account_name, 0)?;
    T::deserialize(&mut body).map_err(|_| error!(ErrorCode::AccountDecodeFailed))
}

/// Encodes an account body with its discriminator, as the program stores it.
pub(crate) fn serialize_account<T: AnchorSerialize>(value: &T, account_name: &str) -> Result<Vec<u8>> {
    let mut data = account_discriminator(account_name).to_vec();
    value
        .serialize(&mut data)
        .map_err(|_| error!(ErrorCode::AccountDecodeFailed))?;
    Ok(data)
}
