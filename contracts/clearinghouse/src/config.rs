use serde::{Deserialize, Serialize};

use finance::{coin::Amount, duration::Duration, rate::Rate};
use sdk::cosmwasm_std::{Addr, Uint128};

use crate::error::{ContractError, Result};

/// Loan terms and funding parameters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct Config {
    pub interest_rate: Rate,
    /// DAI lent per whole gOHM.
    pub loan_to_collateral: Uint128,
    pub duration: Duration,
    pub fund_cadence: Duration,
    /// DAI kept available for lending.
    pub fund_amount: Uint128,
}

impl Config {
    const TOKEN: Amount = 1_000_000_000_000_000_000;

    pub fn loan_to_collateral(&self) -> Amount {
        self.loan_to_collateral.u128()
    }

    pub fn fund_amount(&self) -> Amount {
        self.fund_amount.u128()
    }

    pub fn validate(self) -> Result<Self> {
        if self.loan_to_collateral.is_zero() {
            Err(ContractError::InvalidConfig("zero loan to collateral".into()))
        } else if self.duration.is_zero() {
            Err(ContractError::InvalidConfig("zero loan duration".into()))
        } else if self.fund_cadence.is_zero() {
            Err(ContractError::InvalidConfig("zero funding cadence".into()))
        } else {
            Ok(self)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interest_rate: Rate::from_permille(5),
            loan_to_collateral: Uint128::new(3_000 * Self::TOKEN),
            duration: Duration::from_days(121),
            fund_cadence: Duration::from_days(7),
            fund_amount: Uint128::new(18_000_000 * Self::TOKEN),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct Assets {
    pub gohm: Addr,
    pub ohm: Addr,
    pub dai: Addr,
    /// The savings vault share, lent by the treasury.
    pub sdai: Addr,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct InstantiateMsg {
    pub assets: Assets,
    pub overseer: Addr,
    pub emergency: Addr,
    #[serde(default)]
    pub config: Config,
}
