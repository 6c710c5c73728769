use thiserror::Error;

use finance::coin::Amount;
use sdk::cosmwasm_std::Addr;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("[Platform] Unknown token {0}")]
    UnknownToken(Addr),

    #[error("[Platform] Insufficient balance of {token} held by {holder}, needed {needed} but found {available}")]
    InsufficientBalance {
        token: Addr,
        holder: Addr,
        needed: Amount,
        available: Amount,
    },

    #[error("[Platform] Insufficient allowance of {token} granted by {owner} to {spender}, needed {needed} but found {available}")]
    InsufficientAllowance {
        token: Addr,
        owner: Addr,
        spender: Addr,
        needed: Amount,
        available: Amount,
    },

    #[error("[Platform] {0}")]
    Finance(#[from] finance::error::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
