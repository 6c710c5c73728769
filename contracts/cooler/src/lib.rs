//! An escrow holding collateral against loans between a single borrower and
//! any number of lenders.
//!
//! A borrower opens a [`Request`], pledging the collateral up front. Any lender
//! may clear it into a [`Loan`], which is then repaid, rolled over new terms, or
//! defaulted once past its expiry.

pub use crate::{
    callback::{CallbackError, CoolerCallback},
    cooler::Cooler,
    error::{ContractError, Result},
    loan::{DefaultedLoan, Loan, LoanId, Request, RequestId},
};

mod callback;
mod cooler;
mod error;
mod event;
mod loan;
mod slots;
