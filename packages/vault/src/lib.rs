//! A tokenized savings vault.
//!
//! Depositors receive shares, a token whose address is the vault's own. Yield
//! accrues when assets reach the vault without new shares being minted, which
//! raises the asset value of every outstanding share.

use finance::{arithmetic, coin::Amount};
use platform::bank::Bank;
use sdk::cosmwasm_std::Addr;

pub use crate::error::{Error, Result};

mod error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavingsVault {
    address: Addr,
    asset: Addr,
}

impl SavingsVault {
    /// Registers the share token and creates the vault.
    ///
    /// Shares carry the decimals of the underlying asset.
    pub fn new(bank: &mut Bank, address: Addr, asset: Addr) -> Result<Self> {
        bank.decimals(&asset)
            .map(|decimals| bank.register(address.clone(), decimals))
            .map(|()| Self { address, asset })
            .map_err(Into::into)
    }

    /// The address of the vault, which is also the share token.
    pub const fn address(&self) -> &Addr {
        &self.address
    }

    pub const fn asset(&self) -> &Addr {
        &self.asset
    }

    pub fn total_assets(&self, bank: &Bank) -> Amount {
        bank.balance(&self.asset, &self.address)
    }

    pub fn total_shares(&self, bank: &Bank) -> Result<Amount> {
        bank.total_supply(&self.address).map_err(Into::into)
    }

    pub fn shares_of(&self, bank: &Bank, holder: &Addr) -> Amount {
        bank.balance(&self.address, holder)
    }

    /// Shares worth `assets`, rounded down.
    pub fn convert_to_shares(&self, bank: &Bank, assets: Amount) -> Result<Amount> {
        self.total_shares(bank).and_then(|supply| {
            if supply == 0 {
                Ok(assets)
            } else {
                arithmetic::mul_div(assets, supply, self.total_assets(bank)).map_err(Into::into)
            }
        })
    }

    /// Assets worth `shares`, rounded down.
    pub fn convert_to_assets(&self, bank: &Bank, shares: Amount) -> Result<Amount> {
        self.total_shares(bank).and_then(|supply| {
            if supply == 0 {
                Ok(shares)
            } else {
                arithmetic::mul_div(shares, self.total_assets(bank), supply).map_err(Into::into)
            }
        })
    }

    /// Shares burnt on withdrawing `assets`, rounded up.
    pub fn preview_withdraw(&self, bank: &Bank, assets: Amount) -> Result<Amount> {
        self.total_shares(bank).and_then(|supply| {
            if supply == 0 {
                Ok(assets)
            } else {
                arithmetic::mul_div_ceil(assets, supply, self.total_assets(bank))
                    .map_err(Into::into)
            }
        })
    }

    /// Assets `owner` may withdraw at the current share value.
    pub fn max_withdraw(&self, bank: &Bank, owner: &Addr) -> Result<Amount> {
        self.convert_to_assets(bank, self.shares_of(bank, owner))
    }

    /// Pulls `assets` from `sender` and mints the shares they are worth to
    /// `receiver`.
    ///
    /// The vault must be allowed to spend `assets` on behalf of `sender`.
    pub fn deposit(
        &self,
        bank: &mut Bank,
        sender: &Addr,
        assets: Amount,
        receiver: &Addr,
    ) -> Result<Amount> {
        let shares = self.convert_to_shares(bank, assets)?;

        bank.transfer_from(&self.asset, &self.address, sender, &self.address, assets)?;
        bank.mint(&self.address, receiver, shares)?;

        tracing::debug!(%sender, %receiver, assets, shares, "vault deposit");
        Ok(shares)
    }

    /// Burns the shares of `owner` worth `assets` and sends the assets to
    /// `receiver`.
    pub fn withdraw(
        &self,
        bank: &mut Bank,
        sender: &Addr,
        assets: Amount,
        receiver: &Addr,
        owner: &Addr,
    ) -> Result<Amount> {
        self.preview_withdraw(bank, assets).and_then(|shares| {
            self.exit(bank, sender, shares, assets, receiver, owner)
                .map(|()| shares)
        })
    }

    /// Burns `shares` of `owner` and sends the assets they are worth to
    /// `receiver`.
    pub fn redeem(
        &self,
        bank: &mut Bank,
        sender: &Addr,
        shares: Amount,
        receiver: &Addr,
        owner: &Addr,
    ) -> Result<Amount> {
        self.convert_to_assets(bank, shares).and_then(|assets| {
            self.exit(bank, sender, shares, assets, receiver, owner)
                .map(|()| assets)
        })
    }

    fn exit(
        &self,
        bank: &mut Bank,
        sender: &Addr,
        shares: Amount,
        assets: Amount,
        receiver: &Addr,
        owner: &Addr,
    ) -> Result<()> {
        let burnt = if sender == owner {
            bank.burn(&self.address, owner, shares)
        } else {
            bank.burn_from(&self.address, sender, owner, shares)
        };

        burnt
            .and_then(|()| bank.transfer(&self.asset, &self.address, receiver, assets))
            .map(|()| tracing::debug!(%sender, %owner, %receiver, assets, shares, "vault exit"))
            .map_err(Into::into)
    }
}
