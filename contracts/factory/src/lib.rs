//! Creates escrows and answers whether an address is one of them.

pub use crate::{
    error::{ContractError, Result},
    factory::CoolerFactory,
    registry::{EscrowRegistry, Registry},
};

mod error;
mod factory;
mod registry;
