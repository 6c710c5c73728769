use sdk::cosmwasm_std::Timestamp;

use crate::{bank::Bank, emit::Journal};

/// The environment an operation executes in.
pub struct Context<'a> {
    pub now: Timestamp,
    pub bank: &'a mut Bank,
    pub journal: &'a mut Journal,
}

impl<'a> Context<'a> {
    pub fn new(now: Timestamp, bank: &'a mut Bank, journal: &'a mut Journal) -> Self {
        Self { now, bank, journal }
    }
}
