use std::collections::BTreeSet;

use finance::coin::Amount;
use platform::bank::Bank;
use sdk::cosmwasm_std::Addr;

use crate::{
    error::{Error, Result},
    permission::Permission,
};

pub trait Burner {
    /// The address burning on behalf of the holders.
    fn address(&self) -> &Addr;

    /// Burns `amount` OHM held by `from`.
    ///
    /// `from` must have allowed the minter to spend the amount.
    fn burn_ohm(&mut self, bank: &mut Bank, policy: &Addr, from: &Addr, amount: Amount)
        -> Result<()>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minter {
    address: Addr,
    ohm: Addr,
    burners: BTreeSet<Addr>,
}

impl Minter {
    pub fn new(address: Addr, ohm: Addr) -> Self {
        Self {
            address,
            ohm,
            burners: BTreeSet::new(),
        }
    }

    pub fn grant(&mut self, policy: Addr, permission: Permission) {
        if permission == Permission::BurnOhm {
            self.burners.insert(policy);
        }
    }
}

impl Burner for Minter {
    fn address(&self) -> &Addr {
        &self.address
    }

    fn burn_ohm(&mut self, bank: &mut Bank, policy: &Addr, from: &Addr, amount: Amount) -> Result<()> {
        if !self.burners.contains(policy) {
            return Err(Error::unauthorized(policy, Permission::BurnOhm));
        }

        bank.burn_from(&self.ohm, &self.address, from, amount)
            .map(|()| tracing::info!(%policy, %from, amount, "burnt OHM"))
            .map_err(Into::into)
    }
}
