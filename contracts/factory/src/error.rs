use thiserror::Error;

use sdk::cosmwasm_std::Addr;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContractError {
    #[error("[Factory] {0} has not been created by the factory")]
    NotFromFactory(Addr),

    #[error("[Factory] {0}")]
    Platform(#[from] platform::error::Error),
}

pub type Result<T> = core::result::Result<T, ContractError>;
