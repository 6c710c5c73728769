use finance::{
    arithmetic,
    coin::{self, Amount},
};
use platform::bank::Bank;
use sdk::cosmwasm_std::Addr;

use crate::error::Result;

/// Converts the wrapped staked token back into the base token.
///
/// One whole wrapped token is worth `index` base token units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Staking {
    gohm: Addr,
    ohm: Addr,
    index: Amount,
}

impl Staking {
    pub fn new(gohm: Addr, ohm: Addr, index: Amount) -> Self {
        Self { gohm, ohm, index }
    }

    pub const fn index(&self) -> Amount {
        self.index
    }

    pub fn balance_from(&self, bank: &Bank, gohm: Amount) -> Result<Amount> {
        let unit = coin::unit(bank.decimals(&self.gohm)?)?;

        arithmetic::mul_div(gohm, self.index, unit).map_err(Into::into)
    }

    /// Burns `amount` wrapped tokens of `sender` and mints the base tokens they
    /// are worth back to `sender`.
    pub fn unstake(&self, bank: &mut Bank, sender: &Addr, amount: Amount) -> Result<Amount> {
        let ohm = self.balance_from(bank, amount)?;

        bank.burn(&self.gohm, sender, amount)?;
        bank.mint(&self.ohm, sender, ohm)?;

        tracing::debug!(%sender, gohm = amount, ohm, "unstaked");
        Ok(ohm)
    }
}
