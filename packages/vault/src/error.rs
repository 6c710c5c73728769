use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("[Vault] {0}")]
    Platform(#[from] platform::error::Error),

    #[error("[Vault] {0}")]
    Finance(#[from] finance::error::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
