use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContractError {
    #[error("[ClearingHouse] Lending has been deactivated")]
    NotActive {},

    #[error("[ClearingHouse] Only escrows created by the factory are accepted")]
    OnlyFromFactory {},

    #[error("[ClearingHouse] The escrow does not lend DAI against gOHM")]
    BadEscrow {},

    #[error("[ClearingHouse] gOHM may only be burnt")]
    OnlyBurnable {},

    #[error("[ClearingHouse] The number of escrows and loans differ")]
    LengthDiscrepancy {},

    #[error("[ClearingHouse] Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("[ClearingHouse] {0}")]
    Unauthorized(#[from] access_control::Unauthorized),

    #[error("[ClearingHouse] {0}")]
    Cooler(#[from] cooler::ContractError),

    #[error("[ClearingHouse] {0}")]
    Modules(#[from] modules::Error),

    #[error("[ClearingHouse] {0}")]
    Vault(#[from] vault::Error),

    #[error("[ClearingHouse] {0}")]
    Platform(#[from] platform::error::Error),

    #[error("[ClearingHouse] {0}")]
    Finance(#[from] finance::error::Error),
}

pub type Result<T> = core::result::Result<T, ContractError>;
