use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use sdk::cosmwasm_std::Uint128;

use crate::coin::Amount;

/// An annualized interest rate as a fixed-point fraction scaled by `1e18`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(Uint128);

impl Rate {
    pub const SCALE: Amount = 1_000_000_000_000_000_000;

    pub const ZERO: Self = Self::from_units(0);

    pub const fn from_units(units: Amount) -> Self {
        Self(Uint128::new(units))
    }

    pub const fn from_permille(permille: u32) -> Self {
        Self::from_units(permille as Amount * (Self::SCALE / 1000))
    }

    pub const fn units(&self) -> Amount {
        self.0.u128()
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_fmt(format_args!("{}e-18", self.units()))
    }
}
