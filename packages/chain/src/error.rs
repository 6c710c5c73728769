use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("[Chain] {0}")]
    Cooler(#[from] cooler::ContractError),

    #[error("[Chain] {0}")]
    Factory(#[from] factory::ContractError),

    #[error("[Chain] {0}")]
    ClearingHouse(#[from] clearinghouse::ContractError),

    #[error("[Chain] {0}")]
    Vault(#[from] vault::Error),

    #[error("[Chain] {0}")]
    Platform(#[from] platform::error::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
