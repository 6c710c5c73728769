use access_control::SingleUserAccess;
use cooler::{CoolerCallback, DefaultedLoan, LoanId};
use factory::{CoolerFactory, EscrowRegistry};
use finance::{arithmetic, coin::Amount, duration::Duration, interest};
use modules::{Burner, Permission, Staking};
use platform::{bank::Bank, context::Context};
use sdk::cosmwasm_std::{Addr, Timestamp};
use vault::SavingsVault;

use crate::{
    config::{Assets, Config, InstantiateMsg},
    error::{ContractError, Result},
    event,
    hooks::Hooks,
    reserves::Reserves,
};

const OVERSEER: &str = "cooler_overseer";
const EMERGENCY: &str = "emergency_shutdown";

/// Lends DAI against gOHM through the escrows of the factory.
///
/// The reserves are kept in savings vault shares borrowed from the treasury.
/// Every loan the clearing house issues adds its principal and interest to the
/// receivables, which repayments and defaults reduce again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearingHouse {
    address: Addr,
    assets: Assets,
    config: Config,
    overseer: SingleUserAccess,
    emergency: SingleUserAccess,
    active: bool,
    receivables: Amount,
    fund_time: Timestamp,
}

impl ClearingHouse {
    /// The treasury and minter calls the clearing house must be permitted to make.
    pub const fn request_permissions() -> [Permission; 5] {
        [
            Permission::SetDebt,
            Permission::IncurDebt,
            Permission::RepayDebt,
            Permission::IncreaseDebtorApproval,
            Permission::BurnOhm,
        ]
    }

    pub fn try_new(address: Addr, msg: InstantiateMsg, now: Timestamp) -> Result<Self> {
        msg.config.validate().map(|config| Self {
            address,
            assets: msg.assets,
            config,
            overseer: SingleUserAccess::new(OVERSEER, msg.overseer),
            emergency: SingleUserAccess::new(EMERGENCY, msg.emergency),
            active: true,
            receivables: 0,
            fund_time: now,
        })
    }

    pub const fn address(&self) -> &Addr {
        &self.address
    }

    pub const fn assets(&self) -> &Assets {
        &self.assets
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn overseer(&self) -> &SingleUserAccess {
        &self.overseer
    }

    pub const fn emergency(&self) -> &SingleUserAccess {
        &self.emergency
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn receivables(&self) -> Amount {
        self.receivables
    }

    /// The earliest time of the next funding.
    pub const fn fund_time(&self) -> Timestamp {
        self.fund_time
    }

    /// Funds or defunds the reserves towards the funding target.
    ///
    /// Once a funding is due the next one is scheduled a cadence after the most
    /// recent due slot, so missed slots are all covered by a single transfer.
    /// Returns `false` with no effects until then.
    ///
    /// The host transaction reverts the transfers made before a failure.
    pub fn rebalance(&mut self, ctx: &mut Context<'_>, reserves: &mut Reserves<'_>) -> Result<bool> {
        if ctx.now < self.fund_time {
            return Ok(false);
        }

        let cadence = self.config.fund_cadence;
        let periods = Duration::between(&self.fund_time, &ctx.now)
            .periods(cadence)
            .map(|missed| missed + 1)
            .ok_or_else(|| ContractError::InvalidConfig("zero funding cadence".into()))?;
        let catch_up = cadence
            .checked_mul(periods)
            .ok_or_else(|| ContractError::InvalidConfig("funding cadence overflow".into()))?;
        let next_funding = catch_up.after(&self.fund_time)?;

        let holdings = arithmetic::checked_add(
            reserves.vault.max_withdraw(ctx.bank, &self.address)?,
            self.idle(ctx.bank),
        )?;
        let target = if self.active {
            self.config.fund_amount()
        } else {
            0
        };

        if holdings < target {
            let shortfall = target - holdings;
            let shares = reserves.vault.preview_withdraw(ctx.bank, shortfall)?;

            reserves.treasury.increase_debtor_approval(
                &self.address,
                &self.address,
                &self.assets.sdai,
                shares,
            )?;
            reserves
                .treasury
                .incur_debt(ctx.bank, &self.address, &self.assets.sdai, shares)?;
            self.sweep(ctx.bank, reserves.vault)?;

            ctx.journal.record(event::emit_rebalance(&ctx.now, false, shortfall));
            tracing::info!(periods, shortfall, shares, "funded the clearing house");
        } else if holdings > target {
            let excess = holdings - target;
            self.sweep(ctx.bank, reserves.vault)?;

            let shares = reserves
                .vault
                .convert_to_shares(ctx.bank, excess)?
                .min(reserves.vault.shares_of(ctx.bank, &self.address));
            ctx.bank.approve(
                &self.assets.sdai,
                &self.address,
                reserves.treasury.address(),
                shares,
            )?;
            reserves.treasury.repay_debt(
                ctx.bank,
                &self.address,
                &self.address,
                &self.assets.sdai,
                shares,
            )?;

            ctx.journal.record(event::emit_rebalance(&ctx.now, true, excess));
            tracing::info!(periods, excess, shares, "defunded the clearing house");
        } else {
            tracing::debug!(periods, "clearing house funds on target");
        }

        self.fund_time = next_funding;
        Ok(true)
    }

    /// Deposits the idle DAI into the savings vault.
    pub fn sweep_into_dsr(&mut self, ctx: &mut Context<'_>, vault: &SavingsVault) -> Result<Amount> {
        self.sweep(ctx.bank, vault)
    }

    /// Issues a loan of `amount` on `cooler` pledging the collateral of `sender`.
    ///
    /// `sender` must have allowed the clearing house to spend the collateral.
    /// The loan is lent out of the reserves with repayments sent directly to the
    /// clearing house.
    pub fn lend_to_cooler(
        &mut self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        factory: &mut CoolerFactory,
        reserves: &mut Reserves<'_>,
        cooler: &Addr,
        amount: Amount,
    ) -> Result<LoanId> {
        if !self.active {
            return Err(ContractError::NotActive {});
        }

        let (registry, escrow) = Self::escrow(factory, cooler)?;
        if escrow.collateral() != &self.assets.gohm || escrow.debt() != &self.assets.dai {
            return Err(ContractError::BadEscrow {});
        }

        let collateral = escrow.collateral_for(amount, self.config.loan_to_collateral())?;
        ctx.bank.transfer_from(
            &self.assets.gohm,
            &self.address,
            sender,
            &self.address,
            collateral,
        )?;
        ctx.bank
            .approve(&self.assets.gohm, &self.address, cooler, collateral)?;

        let req_id = escrow.request_loan(
            ctx,
            &self.address,
            amount,
            self.config.interest_rate,
            self.config.loan_to_collateral(),
            self.config.duration,
        )?;

        reserves.vault.withdraw(
            ctx.bank,
            &self.address,
            amount,
            &self.address,
            &self.address,
        )?;
        ctx.bank
            .approve(&self.assets.dai, &self.address, cooler, amount)?;

        let lender = self.address.clone();
        let loan_id = escrow.clear_request(
            ctx,
            &lender,
            req_id,
            true,
            true,
            Some(&Hooks::new(self, registry, reserves)),
        )?;

        let owed = escrow.loan(loan_id)?.amount;
        self.receivables = arithmetic::checked_add(self.receivables, owed)?;

        ctx.journal
            .record(event::emit_lend(&ctx.now, cooler, loan_id, amount, owed));
        tracing::debug!(%cooler, loan_id, amount, owed, receivables = self.receivables, "lent");
        Ok(loan_id)
    }

    /// Rolls a loan of the clearing house over the configured terms.
    ///
    /// Any collateral needed at the configured ratio is pulled from `sender`.
    pub fn roll_loan(
        &mut self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        factory: &mut CoolerFactory,
        reserves: &mut Reserves<'_>,
        cooler: &Addr,
        loan_id: LoanId,
    ) -> Result<()> {
        let (registry, escrow) = Self::escrow(factory, cooler)?;

        escrow.provide_new_terms_for_roll(
            &self.address,
            loan_id,
            self.config.interest_rate,
            self.config.loan_to_collateral(),
            self.config.duration,
        )?;

        let new_collateral = escrow.new_collateral_for(loan_id)?;
        if new_collateral > 0 {
            ctx.bank.transfer_from(
                &self.assets.gohm,
                &self.address,
                sender,
                &self.address,
                new_collateral,
            )?;
            ctx.bank
                .approve(&self.assets.gohm, &self.address, cooler, new_collateral)?;
        }

        let lender = self.address.clone();
        escrow
            .roll_loan(
                ctx,
                &lender,
                loan_id,
                Some(&mut Hooks::new(self, registry, reserves)),
            )
            .map_err(Into::into)
    }

    /// Claims the given defaulted loans in order, all or none.
    pub fn claim_defaulted(
        &mut self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        factory: &mut CoolerFactory,
        reserves: &mut Reserves<'_>,
        coolers: &[Addr],
        loan_ids: &[LoanId],
    ) -> Result<Vec<DefaultedLoan>> {
        self.overseer.check_access(sender)?;

        if coolers.len() != loan_ids.len() {
            return Err(ContractError::LengthDiscrepancy {});
        }

        let mut defaulted = Vec::with_capacity(coolers.len());
        for (cooler, &loan_id) in coolers.iter().zip(loan_ids) {
            let (registry, escrow) = Self::escrow(factory, cooler)?;
            let lent_by_house = escrow.loan(loan_id)?.lender == self.address;

            let mut hooks = Hooks::new(self, registry, reserves);
            let lender: Option<&mut dyn CoolerCallback> = if lent_by_house {
                Some(&mut hooks)
            } else {
                None
            };
            defaulted.push(escrow.claim_defaulted(ctx, loan_id, lender)?);
        }
        Ok(defaulted)
    }

    /// Sends `amount` of `asset` back to the treasury.
    ///
    /// Returning reserves writes their worth off the recorded debt.
    pub fn defund(
        &mut self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        reserves: &mut Reserves<'_>,
        asset: &Addr,
        amount: Amount,
    ) -> Result<()> {
        self.overseer.check_access(sender)?;

        self.return_to_treasury(ctx, reserves, asset, amount)
    }

    /// Unstakes the seized gOHM and burns the OHM it is worth.
    pub fn burn(
        &mut self,
        ctx: &mut Context<'_>,
        staking: &Staking,
        minter: &mut dyn Burner,
    ) -> Result<Amount> {
        let gohm = ctx.bank.balance(&self.assets.gohm, &self.address);
        let ohm = staking.unstake(ctx.bank, &self.address, gohm)?;

        ctx.bank
            .approve(&self.assets.ohm, &self.address, minter.address(), ohm)?;
        minter.burn_ohm(ctx.bank, &self.address, &self.address, ohm)?;

        ctx.journal.record(event::emit_burn(&ctx.now, gohm, ohm));
        tracing::info!(gohm, ohm, "burnt the seized collateral");
        Ok(ohm)
    }

    /// Stops lending and returns all reserves to the treasury.
    pub fn emergency_shutdown(
        &mut self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        reserves: &mut Reserves<'_>,
    ) -> Result<()> {
        self.emergency.check_access(sender)?;

        self.active = false;
        self.sweep(ctx.bank, reserves.vault)?;

        let shares = reserves.vault.shares_of(ctx.bank, &self.address);
        if shares != 0 {
            ctx.bank.approve(
                &self.assets.sdai,
                &self.address,
                reserves.treasury.address(),
                shares,
            )?;
            reserves.treasury.repay_debt(
                ctx.bank,
                &self.address,
                &self.address,
                &self.assets.sdai,
                shares,
            )?;
            ctx.journal
                .record(event::emit_defund(&ctx.now, &self.assets.sdai, shares));
        }

        ctx.journal.record(event::emit_activation(&ctx.now, false));
        tracing::warn!(shares, "clearing house shut down");
        Ok(())
    }

    pub fn activate(&mut self, ctx: &mut Context<'_>, sender: &Addr) -> Result<()> {
        self.emergency.check_access(sender)?;

        self.active = true;

        ctx.journal.record(event::emit_activation(&ctx.now, true));
        tracing::info!("clearing house reactivated");
        Ok(())
    }

    /// Accounts for a repayment and sweeps it into the savings vault.
    pub fn on_repay(
        &mut self,
        ctx: &mut Context<'_>,
        registry: &dyn EscrowRegistry,
        reserves: &mut Reserves<'_>,
        cooler: &Addr,
        loan_id: LoanId,
        amount: Amount,
    ) -> Result<()> {
        Self::only_from_factory(registry, cooler)?;

        self.receivables = self.receivables.saturating_sub(amount);
        self.sweep(ctx.bank, reserves.vault)?;

        tracing::debug!(%cooler, loan_id, amount, receivables = self.receivables, "repaid");
        Ok(())
    }

    pub fn on_roll(
        &mut self,
        registry: &dyn EscrowRegistry,
        cooler: &Addr,
        loan_id: LoanId,
        new_debt: Amount,
        new_collateral: Amount,
    ) -> Result<()> {
        Self::only_from_factory(registry, cooler)?;

        self.receivables = arithmetic::checked_add(self.receivables, new_debt)?;

        tracing::debug!(%cooler, loan_id, new_debt, new_collateral, receivables = self.receivables, "rolled");
        Ok(())
    }

    /// Writes the principal of a defaulted loan off the treasury debt.
    ///
    /// The principal is the debt less one term of interest at the configured
    /// terms, valued in savings vault shares.
    #[allow(clippy::too_many_arguments)]
    pub fn on_default(
        &mut self,
        ctx: &mut Context<'_>,
        registry: &dyn EscrowRegistry,
        reserves: &mut Reserves<'_>,
        cooler: &Addr,
        loan_id: LoanId,
        debt: Amount,
        collateral: Amount,
    ) -> Result<()> {
        Self::only_from_factory(registry, cooler)?;

        self.receivables = self.receivables.saturating_sub(debt);

        let principal =
            interest::principal_of(debt, self.config.interest_rate, self.config.duration)?;
        let shares = reserves.vault.preview_withdraw(ctx.bank, principal)?;
        let outstanding = reserves
            .treasury
            .reserve_debt(&self.assets.sdai, &self.address);
        reserves.treasury.set_debt(
            &self.address,
            &self.address,
            &self.assets.sdai,
            outstanding.saturating_sub(shares),
        )?;

        tracing::info!(%cooler, loan_id, debt, principal, shares, collateral, "settled a default");
        Ok(())
    }

    fn escrow<'f>(
        factory: &'f mut CoolerFactory,
        cooler: &Addr,
    ) -> Result<(&'f dyn EscrowRegistry, &'f mut cooler::Cooler)> {
        factory
            .split_mut(cooler)
            .map_err(|_| ContractError::OnlyFromFactory {})
            .and_then(|(registry, escrow)| {
                Self::only_from_factory(registry, cooler)
                    .map(|()| (registry as &dyn EscrowRegistry, escrow))
            })
    }

    fn only_from_factory(registry: &dyn EscrowRegistry, cooler: &Addr) -> Result<()> {
        if registry.is_valid_escrow(cooler) {
            Ok(())
        } else {
            Err(ContractError::OnlyFromFactory {})
        }
    }

    fn idle(&self, bank: &Bank) -> Amount {
        bank.balance(&self.assets.dai, &self.address)
    }

    fn sweep(&self, bank: &mut Bank, vault: &SavingsVault) -> Result<Amount> {
        let idle = self.idle(bank);
        if idle == 0 {
            return Ok(0);
        }

        bank.approve(&self.assets.dai, &self.address, vault.address(), idle)?;
        vault
            .deposit(bank, &self.address, idle, &self.address)
            .map_err(Into::into)
    }

    fn return_to_treasury(
        &mut self,
        ctx: &mut Context<'_>,
        reserves: &mut Reserves<'_>,
        asset: &Addr,
        amount: Amount,
    ) -> Result<()> {
        if asset == &self.assets.gohm {
            return Err(ContractError::OnlyBurnable {});
        }

        if asset == &self.assets.sdai || asset == &self.assets.dai {
            let shares = if asset == &self.assets.sdai {
                amount
            } else {
                reserves.vault.preview_withdraw(ctx.bank, amount)?
            };
            let outstanding = reserves
                .treasury
                .reserve_debt(&self.assets.sdai, &self.address);
            reserves.treasury.set_debt(
                &self.address,
                &self.address,
                &self.assets.sdai,
                outstanding.saturating_sub(shares),
            )?;
        }

        ctx.bank
            .transfer(asset, &self.address, reserves.treasury.address(), amount)?;

        ctx.journal.record(event::emit_defund(&ctx.now, asset, amount));
        tracing::info!(%asset, amount, "defunded");
        Ok(())
    }
}
