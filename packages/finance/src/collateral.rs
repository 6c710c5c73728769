use crate::{
    arithmetic,
    coin::{self, Amount, Decimals},
    error::Result,
};

/// The collateral backing `amount` of debt at `loan_to_collateral`.
///
/// `loan_to_collateral` is the debt granted per whole collateral token, so the
/// result is `amount * 10^decimals / loan_to_collateral` rounded towards zero.
pub fn collateral_for(
    amount: Amount,
    loan_to_collateral: Amount,
    collateral_decimals: Decimals,
) -> Result<Amount> {
    coin::unit(collateral_decimals)
        .and_then(|unit| arithmetic::mul_div(amount, unit, loan_to_collateral))
}

/// The debt `collateral` supports at `loan_to_collateral`, rounded towards zero.
pub fn debt_for(
    collateral: Amount,
    loan_to_collateral: Amount,
    collateral_decimals: Decimals,
) -> Result<Amount> {
    coin::unit(collateral_decimals)
        .and_then(|unit| arithmetic::mul_div(collateral, loan_to_collateral, unit))
}
