use crate::{
    arithmetic,
    coin::Amount,
    duration::Duration,
    error::Result,
    rate::Rate,
};

/// The fraction of `rate` due over `duration`, scaled by [`Rate::SCALE`].
///
/// Evaluated as `rate * duration / YEAR` and rounded towards zero.
pub fn term_rate(rate: Rate, duration: Duration) -> Result<Amount> {
    arithmetic::mul_div(
        rate.units(),
        duration.secs().into(),
        Duration::YEAR.secs().into(),
    )
}

/// Computes how much interest accrues on `amount` at `rate` over `duration`.
///
/// The term rate is rounded first and the interest second, both towards zero.
pub fn interest_for(amount: Amount, rate: Rate, duration: Duration) -> Result<Amount> {
    term_rate(rate, duration).and_then(|term| arithmetic::mul_div(amount, term, Rate::SCALE))
}

/// Strips one term's worth of interest from `debt`.
///
/// Inverse of `amount + interest_for(amount, rate, duration)` up to rounding.
pub fn principal_of(debt: Amount, rate: Rate, duration: Duration) -> Result<Amount> {
    term_rate(rate, duration)
        .and_then(|term| arithmetic::checked_add(Rate::SCALE, term))
        .and_then(|scaled_debt| arithmetic::mul_div(debt, Rate::SCALE, scaled_debt))
}
