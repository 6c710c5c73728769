use std::fmt::Display;

use finance::coin::Amount;
use platform::context::Context;
use sdk::cosmwasm_std::Addr;
use thiserror::Error;

use crate::loan::LoanId;

/// Notifications a lender may ask to receive from the escrows it lends through.
///
/// The escrow invokes them synchronously. A failing notification aborts the
/// operation that triggered it.
pub trait CoolerCallback {
    /// Self identification checked before a loan is cleared with callbacks.
    fn is_cooler_callback(&self) -> bool;

    fn on_repay(
        &mut self,
        ctx: &mut Context<'_>,
        cooler: &Addr,
        loan_id: LoanId,
        amount: Amount,
    ) -> Result<(), CallbackError>;

    fn on_roll(
        &mut self,
        ctx: &mut Context<'_>,
        cooler: &Addr,
        loan_id: LoanId,
        new_debt: Amount,
        new_collateral: Amount,
    ) -> Result<(), CallbackError>;

    fn on_default(
        &mut self,
        ctx: &mut Context<'_>,
        cooler: &Addr,
        loan_id: LoanId,
        debt: Amount,
        collateral: Amount,
    ) -> Result<(), CallbackError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[Cooler Callback] {0}")]
pub struct CallbackError(String);

impl CallbackError {
    pub fn new<E>(cause: E) -> Self
    where
        E: Display,
    {
        Self(cause.to_string())
    }
}
