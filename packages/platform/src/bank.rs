use std::collections::BTreeMap;

use finance::{
    arithmetic,
    coin::{Amount, Decimals},
};
use sdk::cosmwasm_std::Addr;

use crate::error::{Error, Result};

/// Allowance value treated as never depleting.
pub const UNLIMITED: Amount = Amount::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Token {
    decimals: Decimals,
    supply: Amount,
}

/// Fungible token ledger with allowance based delegated transfers.
///
/// Every token is identified by its address. Balances and allowances of
/// registered tokens default to zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bank {
    tokens: BTreeMap<Addr, Token>,
    balances: BTreeMap<(Addr, Addr), Amount>,
    allowances: BTreeMap<(Addr, Addr, Addr), Amount>,
}

impl Bank {
    /// Registers `token`. Registering a known token keeps its state intact.
    pub fn register(&mut self, token: Addr, decimals: Decimals) {
        self.tokens.entry(token).or_insert(Token {
            decimals,
            supply: 0,
        });
    }

    pub fn decimals(&self, token: &Addr) -> Result<Decimals> {
        self.token(token).map(|token| token.decimals)
    }

    pub fn total_supply(&self, token: &Addr) -> Result<Amount> {
        self.token(token).map(|token| token.supply)
    }

    pub fn balance(&self, token: &Addr, holder: &Addr) -> Amount {
        self.balances
            .get(&(token.clone(), holder.clone()))
            .copied()
            .unwrap_or_default()
    }

    pub fn allowance(&self, token: &Addr, owner: &Addr, spender: &Addr) -> Amount {
        self.allowances
            .get(&(token.clone(), owner.clone(), spender.clone()))
            .copied()
            .unwrap_or_default()
    }

    pub fn mint(&mut self, token: &Addr, to: &Addr, amount: Amount) -> Result<()> {
        let supply = self.token(token).map(|token| token.supply)?;
        let new_supply = arithmetic::checked_add(supply, amount)?;
        self.credit(token, to, amount)?;
        self.token_mut(token).map(|token| token.supply = new_supply)
    }

    pub fn burn(&mut self, token: &Addr, from: &Addr, amount: Amount) -> Result<()> {
        self.debit(token, from, amount)?;
        // the supply always covers any single balance
        self.token_mut(token)
            .map(|token| token.supply = token.supply.saturating_sub(amount))
    }

    /// Burns `amount` held by `from` spending the allowance granted to `spender`.
    pub fn burn_from(
        &mut self,
        token: &Addr,
        spender: &Addr,
        from: &Addr,
        amount: Amount,
    ) -> Result<()> {
        self.spend_allowance(token, from, spender, amount)
            .and_then(|()| self.burn(token, from, amount))
    }

    pub fn transfer(&mut self, token: &Addr, from: &Addr, to: &Addr, amount: Amount) -> Result<()> {
        self.debit(token, from, amount)
            .and_then(|()| self.credit(token, to, amount))
    }

    /// Sets the allowance `spender` may move out of `owner`'s balance.
    pub fn approve(&mut self, token: &Addr, owner: &Addr, spender: &Addr, amount: Amount) -> Result<()> {
        self.token(token)?;

        self.allowances
            .insert((token.clone(), owner.clone(), spender.clone()), amount);
        Ok(())
    }

    /// Moves `amount` from `from` to `to` spending the allowance granted to `spender`.
    pub fn transfer_from(
        &mut self,
        token: &Addr,
        spender: &Addr,
        from: &Addr,
        to: &Addr,
        amount: Amount,
    ) -> Result<()> {
        self.spend_allowance(token, from, spender, amount)
            .and_then(|()| self.transfer(token, from, to, amount))
    }

    fn spend_allowance(&mut self, token: &Addr, owner: &Addr, spender: &Addr, amount: Amount) -> Result<()> {
        self.token(token)?;

        let available = self.allowance(token, owner, spender);
        if available == UNLIMITED {
            Ok(())
        } else if available < amount {
            Err(Error::InsufficientAllowance {
                token: token.clone(),
                owner: owner.clone(),
                spender: spender.clone(),
                needed: amount,
                available,
            })
        } else {
            self.allowances.insert(
                (token.clone(), owner.clone(), spender.clone()),
                available - amount,
            );
            Ok(())
        }
    }

    fn debit(&mut self, token: &Addr, holder: &Addr, amount: Amount) -> Result<()> {
        self.token(token)?;

        let available = self.balance(token, holder);
        if available < amount {
            Err(Error::InsufficientBalance {
                token: token.clone(),
                holder: holder.clone(),
                needed: amount,
                available,
            })
        } else {
            self.balances
                .insert((token.clone(), holder.clone()), available - amount);
            Ok(())
        }
    }

    fn credit(&mut self, token: &Addr, holder: &Addr, amount: Amount) -> Result<()> {
        self.token(token)?;

        arithmetic::checked_add(self.balance(token, holder), amount)
            .map(|balance| {
                self.balances
                    .insert((token.clone(), holder.clone()), balance);
            })
            .map_err(Into::into)
    }

    fn token(&self, token: &Addr) -> Result<&Token> {
        self.tokens
            .get(token)
            .ok_or_else(|| Error::UnknownToken(token.clone()))
    }

    fn token_mut(&mut self, token: &Addr) -> Result<&mut Token> {
        self.tokens
            .get_mut(token)
            .ok_or_else(|| Error::UnknownToken(token.clone()))
    }
}
