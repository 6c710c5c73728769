//! Protocol modules a policy is granted access to.
//!
//! A policy is any component acting on a module. Each module call is guarded by
//! a [`Permission`] the policy must have been granted beforehand.

pub use crate::{
    error::{Error, Result},
    minter::{Burner, Minter},
    permission::{Keycode, Permission},
    staking::Staking,
    treasury::{Ledger, Treasury},
};

mod error;
mod minter;
mod permission;
mod staking;
mod treasury;
