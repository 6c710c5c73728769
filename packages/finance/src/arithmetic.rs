//! Proportional arithmetic over token amounts.
//!
//! Products are evaluated in 256 bits so that `lhs * rhs` never overflows
//! before the division brings the result back into range.
use sdk::cosmwasm_std::{Uint128, Uint256};

use crate::{
    coin::Amount,
    error::{Error, Result},
};

/// `lhs * rhs / denominator` rounded towards zero.
pub fn mul_div(lhs: Amount, rhs: Amount, denominator: Amount) -> Result<Amount> {
    quotient(lhs, rhs, denominator)
        .and_then(|(quotient, _remainder)| narrow(quotient, lhs, rhs, denominator))
}

/// `lhs * rhs / denominator` rounded away from zero.
pub fn mul_div_ceil(lhs: Amount, rhs: Amount, denominator: Amount) -> Result<Amount> {
    quotient(lhs, rhs, denominator).and_then(|(quotient, remainder)| {
        let rounded = if remainder.is_zero() {
            quotient
        } else {
            quotient + Uint256::from(1u128)
        };
        narrow(rounded, lhs, rhs, denominator)
    })
}

pub fn checked_add(lhs: Amount, rhs: Amount) -> Result<Amount> {
    lhs.checked_add(rhs)
        .ok_or_else(|| Error::addition_overflow(lhs, rhs))
}

fn quotient(lhs: Amount, rhs: Amount, denominator: Amount) -> Result<(Uint256, Uint256)> {
    if denominator == 0 {
        Err(Error::division_by_zero(format!("{lhs} * {rhs}")))
    } else {
        // a product of two 128-bit values always fits in 256 bits
        let product = Uint256::from(lhs) * Uint256::from(rhs);
        let denominator = Uint256::from(denominator);
        Ok((product / denominator, product % denominator))
    }
}

fn narrow(value: Uint256, lhs: Amount, rhs: Amount, denominator: Amount) -> Result<Amount> {
    Uint128::try_from(value)
        .map(|value| value.u128())
        .map_err(|_| Error::multiplication_overflow(lhs, format!("{rhs} / {denominator}")))
}
