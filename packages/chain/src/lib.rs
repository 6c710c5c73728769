//! A single-threaded host running the lending components against one shared
//! token ledger.
//!
//! Every operation is a transaction: it either completes with all its effects
//! and events, or leaves the state exactly as it found it.

pub use crate::{
    chain::Chain,
    error::{Error, Result},
    genesis::Genesis,
};

mod chain;
mod error;
mod genesis;
