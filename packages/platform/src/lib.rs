pub mod bank;
pub mod context;
mod emit;
pub mod error;

pub use crate::emit::{Emit, Emitter, Journal};
