use std::collections::{BTreeMap, BTreeSet};

use finance::{arithmetic, coin::Amount};
use platform::bank::Bank;
use sdk::cosmwasm_std::Addr;

use crate::{
    error::{Error, Result},
    permission::Permission,
};

/// The debt ledger of the protocol reserves.
///
/// Debt is recorded per token and debtor, in units of the token lent out.
pub trait Ledger {
    /// The address holding the reserves.
    fn address(&self) -> &Addr;

    fn reserve_debt(&self, token: &Addr, debtor: &Addr) -> Amount;

    fn total_debt(&self, token: &Addr) -> Amount;

    fn debtor_approval(&self, debtor: &Addr, token: &Addr) -> Amount;

    fn increase_debtor_approval(
        &mut self,
        policy: &Addr,
        debtor: &Addr,
        token: &Addr,
        amount: Amount,
    ) -> Result<()>;

    /// Lends `amount` of `token` to `policy`, consuming its approval.
    fn incur_debt(&mut self, bank: &mut Bank, policy: &Addr, token: &Addr, amount: Amount)
        -> Result<()>;

    /// Pulls `amount` of `token` from `policy` towards the debt of `debtor`.
    ///
    /// The recorded debt never goes below zero.
    fn repay_debt(
        &mut self,
        bank: &mut Bank,
        policy: &Addr,
        debtor: &Addr,
        token: &Addr,
        amount: Amount,
    ) -> Result<()>;

    /// Overwrites the debt of `debtor` without moving any funds.
    fn set_debt(&mut self, policy: &Addr, debtor: &Addr, token: &Addr, amount: Amount)
        -> Result<()>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Treasury {
    address: Addr,
    permissions: BTreeSet<(Addr, Permission)>,
    approvals: BTreeMap<(Addr, Addr), Amount>,
    debts: BTreeMap<(Addr, Addr), Amount>,
    total_debts: BTreeMap<Addr, Amount>,
}

impl Treasury {
    pub fn new(address: Addr) -> Self {
        Self {
            address,
            permissions: BTreeSet::new(),
            approvals: BTreeMap::new(),
            debts: BTreeMap::new(),
            total_debts: BTreeMap::new(),
        }
    }

    pub fn grant(&mut self, policy: Addr, permission: Permission) {
        self.permissions.insert((policy, permission));
    }

    pub fn is_granted(&self, policy: &Addr, permission: Permission) -> bool {
        self.permissions.contains(&(policy.clone(), permission))
    }

    fn check(&self, policy: &Addr, permission: Permission) -> Result<()> {
        if self.is_granted(policy, permission) {
            Ok(())
        } else {
            Err(Error::unauthorized(policy, permission))
        }
    }

    fn record_debt(&mut self, token: &Addr, debtor: &Addr, debt: Amount) {
        let key = (token.clone(), debtor.clone());
        let prev = self.debts.get(&key).copied().unwrap_or_default();
        self.debts.insert(key, debt);

        let total = self.total_debts.entry(token.clone()).or_default();
        *total = total.saturating_sub(prev).saturating_add(debt);
    }
}

impl Ledger for Treasury {
    fn address(&self) -> &Addr {
        &self.address
    }

    fn reserve_debt(&self, token: &Addr, debtor: &Addr) -> Amount {
        self.debts
            .get(&(token.clone(), debtor.clone()))
            .copied()
            .unwrap_or_default()
    }

    fn total_debt(&self, token: &Addr) -> Amount {
        self.total_debts.get(token).copied().unwrap_or_default()
    }

    fn debtor_approval(&self, debtor: &Addr, token: &Addr) -> Amount {
        self.approvals
            .get(&(debtor.clone(), token.clone()))
            .copied()
            .unwrap_or_default()
    }

    fn increase_debtor_approval(
        &mut self,
        policy: &Addr,
        debtor: &Addr,
        token: &Addr,
        amount: Amount,
    ) -> Result<()> {
        self.check(policy, Permission::IncreaseDebtorApproval)?;

        let approval = arithmetic::checked_add(self.debtor_approval(debtor, token), amount)?;
        self.approvals
            .insert((debtor.clone(), token.clone()), approval);
        Ok(())
    }

    fn incur_debt(
        &mut self,
        bank: &mut Bank,
        policy: &Addr,
        token: &Addr,
        amount: Amount,
    ) -> Result<()> {
        self.check(policy, Permission::IncurDebt)?;

        let available = self.debtor_approval(policy, token);
        if available < amount {
            return Err(Error::InsufficientApproval {
                debtor: policy.clone(),
                token: token.clone(),
                needed: amount,
                available,
            });
        }

        let debt = arithmetic::checked_add(self.reserve_debt(token, policy), amount)?;
        bank.transfer(token, &self.address, policy, amount)?;

        self.approvals
            .insert((policy.clone(), token.clone()), available - amount);
        self.record_debt(token, policy, debt);

        tracing::info!(%policy, %token, amount, debt, "incurred debt");
        Ok(())
    }

    fn repay_debt(
        &mut self,
        bank: &mut Bank,
        policy: &Addr,
        debtor: &Addr,
        token: &Addr,
        amount: Amount,
    ) -> Result<()> {
        self.check(policy, Permission::RepayDebt)?;

        bank.transfer_from(token, &self.address, policy, &self.address, amount)?;

        let debt = self.reserve_debt(token, debtor).saturating_sub(amount);
        self.record_debt(token, debtor, debt);

        tracing::info!(%debtor, %token, amount, debt, "repaid debt");
        Ok(())
    }

    fn set_debt(&mut self, policy: &Addr, debtor: &Addr, token: &Addr, amount: Amount) -> Result<()> {
        self.check(policy, Permission::SetDebt)?;

        self.record_debt(token, debtor, amount);

        tracing::info!(%debtor, %token, debt = amount, "set debt");
        Ok(())
    }
}
