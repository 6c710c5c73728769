use crate::error::{Error, Result};

/// Token amount in the token's smallest units.
pub type Amount = u128;

/// Number of decimal places of a token.
pub type Decimals = u8;

/// The amount representing one whole token, i.e. `10^decimals`.
pub fn unit(decimals: Decimals) -> Result<Amount> {
    Amount::from(10u8)
        .checked_pow(decimals.into())
        .ok_or_else(|| Error::multiplication_overflow(10, format!("^{decimals}")))
}
