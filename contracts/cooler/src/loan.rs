use serde::{Deserialize, Serialize};

use finance::{coin::Amount, duration::Duration, rate::Rate};
use sdk::cosmwasm_std::{Addr, Timestamp};

pub type RequestId = u64;
pub type LoanId = u64;

/// Terms a borrower asks for, or a lender offers to roll a loan over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub amount: Amount,
    pub interest: Rate,
    /// Debt granted per whole collateral token.
    pub loan_to_collateral: Amount,
    pub duration: Duration,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    /// The terms the loan was cleared with, or the terms of the next roll.
    pub request: Request,
    /// Principal and interest still owed.
    pub amount: Amount,
    /// Repaid debt held by the escrow until the lender claims it.
    pub unclaimed: Amount,
    pub collateral: Amount,
    pub expiry: Timestamp,
    pub lender: Addr,
    pub repay_direct: bool,
    pub has_callback: bool,
}

impl Loan {
    pub fn has_defaulted(&self, now: &Timestamp) -> bool {
        now > &self.expiry
    }
}

/// The outcome of claiming a defaulted loan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultedLoan {
    pub amount: Amount,
    pub collateral: Amount,
    /// Time passed since the expiry.
    pub elapsed: Duration,
}
