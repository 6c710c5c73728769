//! A lender of last resort issuing loans against a fixed collateral at fixed
//! terms out of reserves borrowed from the treasury.

pub use crate::{
    clearinghouse::ClearingHouse,
    config::{Assets, Config, InstantiateMsg},
    error::{ContractError, Result},
    hooks::Hooks,
    reserves::Reserves,
};

mod clearinghouse;
mod config;
mod error;
mod event;
mod hooks;
mod reserves;
