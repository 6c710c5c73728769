use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Identifies a module.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Keycode {
    /// The treasury, keeping reserves and the debt ledger.
    Trsry,
    /// The minter, the only component able to burn OHM on behalf of others.
    Mintr,
}

impl Keycode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trsry => "TRSRY",
            Self::Mintr => "MINTR",
        }
    }
}

/// A single module call a policy may be granted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    SetDebt,
    IncurDebt,
    RepayDebt,
    IncreaseDebtorApproval,
    BurnOhm,
}

impl Permission {
    pub const fn keycode(&self) -> Keycode {
        match self {
            Self::SetDebt | Self::IncurDebt | Self::RepayDebt | Self::IncreaseDebtorApproval => {
                Keycode::Trsry
            }
            Self::BurnOhm => Keycode::Mintr,
        }
    }

    pub const fn function(&self) -> &'static str {
        match self {
            Self::SetDebt => "setDebt",
            Self::IncurDebt => "incurDebt",
            Self::RepayDebt => "repayDebt",
            Self::IncreaseDebtorApproval => "increaseDebtorApproval",
            Self::BurnOhm => "burnOhm",
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_fmt(format_args!("{}.{}", self.keycode().as_str(), self.function()))
    }
}
