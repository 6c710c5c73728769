use std::collections::{BTreeMap, BTreeSet};

use sdk::cosmwasm_std::Addr;

/// The trusted source of escrow genuineness.
pub trait EscrowRegistry {
    fn is_valid_escrow(&self, addr: &Addr) -> bool;
}

/// Membership of the escrows created so far, indexed by owner and by token pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    created: BTreeSet<Addr>,
    by_owner: BTreeMap<(Addr, Addr, Addr), Addr>,
    by_pair: BTreeMap<(Addr, Addr), Vec<Addr>>,
}

impl Registry {
    pub(crate) fn record(&mut self, cooler: Addr, owner: &Addr, collateral: &Addr, debt: &Addr) {
        self.by_owner.insert(
            (owner.clone(), collateral.clone(), debt.clone()),
            cooler.clone(),
        );
        self.by_pair
            .entry((collateral.clone(), debt.clone()))
            .or_default()
            .push(cooler.clone());
        self.created.insert(cooler);
    }

    pub fn cooler_for(&self, owner: &Addr, collateral: &Addr, debt: &Addr) -> Option<&Addr> {
        self.by_owner
            .get(&(owner.clone(), collateral.clone(), debt.clone()))
    }

    pub fn coolers_for(&self, collateral: &Addr, debt: &Addr) -> &[Addr] {
        self.by_pair
            .get(&(collateral.clone(), debt.clone()))
            .map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.created.len()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }
}

impl EscrowRegistry for Registry {
    fn is_valid_escrow(&self, addr: &Addr) -> bool {
        self.created.contains(addr)
    }
}
