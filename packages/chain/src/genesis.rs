use serde::{Deserialize, Serialize};

use clearinghouse::Config;
use finance::coin::Amount;
use sdk::cosmwasm_std::{Addr, Timestamp, Uint128};

/// The initial state of a chain.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct Genesis {
    pub start: Timestamp,
    /// OHM units one whole gOHM unstakes into.
    pub gohm_index: Uint128,
    /// DAI the treasury holds in the savings vault.
    pub treasury_reserves: Uint128,
    pub overseer: Addr,
    pub emergency: Addr,
    pub clearinghouse: Config,
}

impl Genesis {
    const TOKEN: Amount = 1_000_000_000_000_000_000;

    pub fn gohm_index(&self) -> Amount {
        self.gohm_index.u128()
    }

    pub fn treasury_reserves(&self) -> Amount {
        self.treasury_reserves.u128()
    }
}

impl Default for Genesis {
    fn default() -> Self {
        Self {
            start: Timestamp::from_seconds(1_690_000_000),
            gohm_index: Uint128::new(269_238_508_004),
            treasury_reserves: Uint128::new(100_000_000 * Self::TOKEN),
            overseer: Addr::unchecked("overseer"),
            emergency: Addr::unchecked("emergency"),
            clearinghouse: Config::default(),
        }
    }
}
