use thiserror::Error;

use crate::{
    callback::CallbackError,
    loan::{LoanId, RequestId},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContractError {
    #[error("[Cooler] Only approved addresses may call")]
    OnlyApproved {},

    #[error("[Cooler] The request has been deactivated")]
    Deactivated {},

    #[error("[Cooler] The loan has defaulted")]
    Default {},

    #[error("[Cooler] The loan has not defaulted yet")]
    NoDefault {},

    #[error("[Cooler] The loan has no active terms to roll over")]
    NotRollable {},

    #[error("[Cooler] The repayment would not release any collateral")]
    ZeroCollateralReturned {},

    #[error("[Cooler] The lender is not a cooler callback")]
    NotCoolerCallback {},

    #[error("[Cooler] Unknown request {0}")]
    UnknownRequest(RequestId),

    #[error("[Cooler] Unknown loan {0}")]
    UnknownLoan(LoanId),

    #[error("[Cooler] {0}")]
    Callback(#[from] CallbackError),

    #[error("[Cooler] {0}")]
    Platform(#[from] platform::error::Error),

    #[error("[Cooler] {0}")]
    Finance(#[from] finance::error::Error),
}

pub type Result<T> = core::result::Result<T, ContractError>;
