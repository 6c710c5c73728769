use clearinghouse::{Assets, ClearingHouse, Hooks, InstantiateMsg, Reserves};
use cooler::{Cooler, CoolerCallback, DefaultedLoan, LoanId, RequestId};
use factory::{CoolerFactory, Registry};
use finance::{coin::Amount, duration::Duration, rate::Rate};
use modules::{Keycode, Minter, Staking, Treasury};
use platform::{bank::Bank, context::Context, Journal};
use sdk::cosmwasm_std::{Addr, Event, Timestamp};
use vault::SavingsVault;

use crate::{error::Result, genesis::Genesis};

const GOHM: &str = "gohm";
const OHM: &str = "ohm";
const DAI: &str = "dai";
const SDAI: &str = "sdai";
const TREASURY: &str = "treasury";
const MINTER: &str = "minter";
const FACTORY: &str = "cooler-factory";
const CLEARINGHOUSE: &str = "clearinghouse";

#[derive(Clone, Debug)]
struct State {
    now: Timestamp,
    bank: Bank,
    journal: Journal,
    vault: SavingsVault,
    staking: Staking,
    treasury: Treasury,
    minter: Minter,
    factory: CoolerFactory,
    house: ClearingHouse,
}

impl State {
    /// Whether the clearing house lent `loan_id`, the only lender with callbacks.
    fn lent_by_house(&self, cooler: &Addr, loan_id: LoanId) -> Result<bool> {
        self.factory
            .cooler(cooler)?
            .loan(loan_id)
            .map(|loan| &loan.lender == self.house.address())
            .map_err(Into::into)
    }
}

/// Runs every component over a shared bank with all-or-nothing operations.
pub struct Chain {
    state: State,
}

impl Chain {
    pub fn new(genesis: Genesis) -> Result<Self> {
        let gohm = Addr::unchecked(GOHM);
        let ohm = Addr::unchecked(OHM);
        let dai = Addr::unchecked(DAI);
        let treasury_addr = Addr::unchecked(TREASURY);
        let reserves = genesis.treasury_reserves();

        let mut bank = Bank::default();
        bank.register(gohm.clone(), 18);
        bank.register(ohm.clone(), 9);
        bank.register(dai.clone(), 18);

        let vault = SavingsVault::new(&mut bank, Addr::unchecked(SDAI), dai.clone())?;
        bank.mint(&dai, &treasury_addr, reserves)?;
        bank.approve(&dai, &treasury_addr, vault.address(), reserves)?;
        vault.deposit(&mut bank, &treasury_addr, reserves, &treasury_addr)?;

        let house = ClearingHouse::try_new(
            Addr::unchecked(CLEARINGHOUSE),
            InstantiateMsg {
                assets: Assets {
                    gohm: gohm.clone(),
                    ohm: ohm.clone(),
                    dai,
                    sdai: vault.address().clone(),
                },
                overseer: genesis.overseer.clone(),
                emergency: genesis.emergency.clone(),
                config: genesis.clearinghouse.clone(),
            },
            genesis.start,
        )?;

        let mut treasury = Treasury::new(treasury_addr);
        let mut minter = Minter::new(Addr::unchecked(MINTER), ohm.clone());
        for permission in ClearingHouse::request_permissions() {
            match permission.keycode() {
                Keycode::Trsry => treasury.grant(house.address().clone(), permission),
                Keycode::Mintr => minter.grant(house.address().clone(), permission),
            }
        }

        tracing::info!(start = %genesis.start, reserves, "genesis");
        Ok(Self {
            state: State {
                now: genesis.start,
                bank,
                journal: Journal::default(),
                vault,
                staking: Staking::new(gohm, ohm, genesis.gohm_index()),
                treasury,
                minter,
                factory: CoolerFactory::new(Addr::unchecked(FACTORY)),
                house,
            },
        })
    }

    pub fn now(&self) -> Timestamp {
        self.state.now
    }

    pub fn advance(&mut self, duration: Duration) {
        self.state.now += duration;
    }

    pub fn bank(&self) -> &Bank {
        &self.state.bank
    }

    pub fn balance(&self, token: &Addr, holder: &Addr) -> Amount {
        self.state.bank.balance(token, holder)
    }

    pub fn vault(&self) -> &SavingsVault {
        &self.state.vault
    }

    pub fn treasury(&self) -> &Treasury {
        &self.state.treasury
    }

    pub fn staking(&self) -> &Staking {
        &self.state.staking
    }

    pub fn factory(&self) -> &CoolerFactory {
        &self.state.factory
    }

    pub fn registry(&self) -> &Registry {
        self.state.factory.registry()
    }

    pub fn cooler(&self, cooler: &Addr) -> Result<&Cooler> {
        self.state.factory.cooler(cooler).map_err(Into::into)
    }

    pub fn clearinghouse(&self) -> &ClearingHouse {
        &self.state.house
    }

    pub fn assets(&self) -> &Assets {
        self.state.house.assets()
    }

    /// The events of the committed transactions, in order.
    pub fn events(&self) -> &[Event] {
        self.state.journal.events()
    }

    pub fn journal(&self) -> &Journal {
        &self.state.journal
    }

    /// Mints `amount` of `token` out of thin air.
    pub fn mint(&mut self, token: &Addr, to: &Addr, amount: Amount) -> Result<()> {
        self.transact("mint", |state| {
            state.bank.mint(token, to, amount).map_err(Into::into)
        })
    }

    /// Yields `amount` DAI to the savings vault, raising the value of its shares.
    pub fn accrue_savings(&mut self, amount: Amount) -> Result<()> {
        self.transact("accrue_savings", |state| {
            state
                .bank
                .mint(state.vault.asset(), state.vault.address(), amount)
                .map_err(Into::into)
        })
    }

    pub fn approve(
        &mut self,
        sender: &Addr,
        token: &Addr,
        spender: &Addr,
        amount: Amount,
    ) -> Result<()> {
        self.transact("approve", |state| {
            state
                .bank
                .approve(token, sender, spender, amount)
                .map_err(Into::into)
        })
    }

    pub fn transfer(&mut self, sender: &Addr, token: &Addr, to: &Addr, amount: Amount) -> Result<()> {
        self.transact("transfer", |state| {
            state
                .bank
                .transfer(token, sender, to, amount)
                .map_err(Into::into)
        })
    }

    pub fn generate_cooler(&mut self, sender: &Addr, collateral: &Addr, debt: &Addr) -> Result<Addr> {
        self.transact("generate_cooler", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            state
                .factory
                .generate_cooler(&mut ctx, sender, collateral, debt)
                .map_err(Into::into)
        })
    }

    pub fn request_loan(
        &mut self,
        sender: &Addr,
        cooler: &Addr,
        amount: Amount,
        interest: Rate,
        loan_to_collateral: Amount,
        duration: Duration,
    ) -> Result<RequestId> {
        self.transact("request_loan", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            state
                .factory
                .cooler_mut(cooler)?
                .request_loan(&mut ctx, sender, amount, interest, loan_to_collateral, duration)
                .map_err(Into::into)
        })
    }

    pub fn rescind_request(&mut self, sender: &Addr, cooler: &Addr, req_id: RequestId) -> Result<()> {
        self.transact("rescind_request", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            state
                .factory
                .cooler_mut(cooler)?
                .rescind_request(&mut ctx, sender, req_id)
                .map_err(Into::into)
        })
    }

    /// Clears a request on behalf of an account lender.
    ///
    /// Accounts cannot receive callbacks so asking for them fails.
    pub fn clear_request(
        &mut self,
        sender: &Addr,
        cooler: &Addr,
        req_id: RequestId,
        repay_direct: bool,
        has_callback: bool,
    ) -> Result<LoanId> {
        self.transact("clear_request", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            state
                .factory
                .cooler_mut(cooler)?
                .clear_request(&mut ctx, sender, req_id, repay_direct, has_callback, None)
                .map_err(Into::into)
        })
    }

    /// Clears a request on behalf of a lender contract receiving callbacks.
    pub fn clear_request_with_callback(
        &mut self,
        sender: &Addr,
        cooler: &Addr,
        req_id: RequestId,
        repay_direct: bool,
        lender: &dyn CoolerCallback,
    ) -> Result<LoanId> {
        self.transact("clear_request", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            state
                .factory
                .cooler_mut(cooler)?
                .clear_request(&mut ctx, sender, req_id, repay_direct, true, Some(lender))
                .map_err(Into::into)
        })
    }

    pub fn repay_loan(
        &mut self,
        sender: &Addr,
        cooler: &Addr,
        loan_id: LoanId,
        amount: Amount,
    ) -> Result<Amount> {
        self.transact("repay_loan", |state| {
            let by_house = state.lent_by_house(cooler, loan_id)?;

            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            let (registry, escrow) = state.factory.split_mut(cooler)?;
            let mut reserves = Reserves::new(&state.vault, &mut state.treasury);
            let mut hooks = Hooks::new(&mut state.house, registry, &mut reserves);
            let lender: Option<&mut dyn CoolerCallback> = if by_house {
                Some(&mut hooks)
            } else {
                None
            };

            escrow
                .repay_loan(&mut ctx, sender, loan_id, amount, lender)
                .map_err(Into::into)
        })
    }

    /// Repays a loan notifying the given lender contract.
    pub fn repay_loan_with_callback(
        &mut self,
        sender: &Addr,
        cooler: &Addr,
        loan_id: LoanId,
        amount: Amount,
        lender: &mut dyn CoolerCallback,
    ) -> Result<Amount> {
        self.transact("repay_loan", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            state
                .factory
                .cooler_mut(cooler)?
                .repay_loan(&mut ctx, sender, loan_id, amount, Some(lender))
                .map_err(Into::into)
        })
    }

    /// Rolls a loan over the terms its lender has provided.
    pub fn roll_loan(&mut self, sender: &Addr, cooler: &Addr, loan_id: LoanId) -> Result<()> {
        self.transact("roll_loan", |state| {
            let by_house = state.lent_by_house(cooler, loan_id)?;

            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            let (registry, escrow) = state.factory.split_mut(cooler)?;
            let mut reserves = Reserves::new(&state.vault, &mut state.treasury);
            let mut hooks = Hooks::new(&mut state.house, registry, &mut reserves);
            let lender: Option<&mut dyn CoolerCallback> = if by_house {
                Some(&mut hooks)
            } else {
                None
            };

            escrow
                .roll_loan(&mut ctx, sender, loan_id, lender)
                .map_err(Into::into)
        })
    }

    pub fn provide_new_terms_for_roll(
        &mut self,
        sender: &Addr,
        cooler: &Addr,
        loan_id: LoanId,
        interest: Rate,
        loan_to_collateral: Amount,
        duration: Duration,
    ) -> Result<()> {
        self.transact("provide_new_terms_for_roll", |state| {
            state
                .factory
                .cooler_mut(cooler)?
                .provide_new_terms_for_roll(sender, loan_id, interest, loan_to_collateral, duration)
                .map_err(Into::into)
        })
    }

    pub fn claim_repaid(&mut self, cooler: &Addr, loan_id: LoanId) -> Result<Amount> {
        self.transact("claim_repaid", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            state
                .factory
                .cooler_mut(cooler)?
                .claim_repaid(&mut ctx, loan_id)
                .map_err(Into::into)
        })
    }

    /// Settles a defaulted loan directly on its escrow.
    pub fn claim_defaulted(&mut self, cooler: &Addr, loan_id: LoanId) -> Result<DefaultedLoan> {
        self.transact("claim_defaulted", |state| {
            let by_house = state.lent_by_house(cooler, loan_id)?;

            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            let (registry, escrow) = state.factory.split_mut(cooler)?;
            let mut reserves = Reserves::new(&state.vault, &mut state.treasury);
            let mut hooks = Hooks::new(&mut state.house, registry, &mut reserves);
            let lender: Option<&mut dyn CoolerCallback> = if by_house {
                Some(&mut hooks)
            } else {
                None
            };

            escrow
                .claim_defaulted(&mut ctx, loan_id, lender)
                .map_err(Into::into)
        })
    }

    pub fn approve_transfer(&mut self, sender: &Addr, cooler: &Addr, to: &Addr, loan_id: LoanId) -> Result<()> {
        self.transact("approve_transfer", |state| {
            state
                .factory
                .cooler_mut(cooler)?
                .approve_transfer(sender, to.clone(), loan_id)
                .map_err(Into::into)
        })
    }

    pub fn transfer_ownership(&mut self, sender: &Addr, cooler: &Addr, loan_id: LoanId) -> Result<()> {
        self.transact("transfer_ownership", |state| {
            state
                .factory
                .cooler_mut(cooler)?
                .transfer_ownership(sender, loan_id)
                .map_err(Into::into)
        })
    }

    pub fn set_direct_repay(
        &mut self,
        sender: &Addr,
        cooler: &Addr,
        loan_id: LoanId,
        direct: bool,
    ) -> Result<()> {
        self.transact("set_direct_repay", |state| {
            state
                .factory
                .cooler_mut(cooler)?
                .set_direct_repay(sender, loan_id, direct)
                .map_err(Into::into)
        })
    }

    pub fn rebalance(&mut self) -> Result<bool> {
        self.transact("rebalance", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            let mut reserves = Reserves::new(&state.vault, &mut state.treasury);
            state
                .house
                .rebalance(&mut ctx, &mut reserves)
                .map_err(Into::into)
        })
    }

    pub fn sweep_into_dsr(&mut self) -> Result<Amount> {
        self.transact("sweep_into_dsr", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            state
                .house
                .sweep_into_dsr(&mut ctx, &state.vault)
                .map_err(Into::into)
        })
    }

    pub fn lend_to_cooler(&mut self, sender: &Addr, cooler: &Addr, amount: Amount) -> Result<LoanId> {
        self.transact("lend_to_cooler", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            let mut reserves = Reserves::new(&state.vault, &mut state.treasury);
            state
                .house
                .lend_to_cooler(&mut ctx, sender, &mut state.factory, &mut reserves, cooler, amount)
                .map_err(Into::into)
        })
    }

    /// Rolls a clearing house loan over the clearing house terms.
    pub fn extend_loan(&mut self, sender: &Addr, cooler: &Addr, loan_id: LoanId) -> Result<()> {
        self.transact("extend_loan", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            let mut reserves = Reserves::new(&state.vault, &mut state.treasury);
            state
                .house
                .roll_loan(&mut ctx, sender, &mut state.factory, &mut reserves, cooler, loan_id)
                .map_err(Into::into)
        })
    }

    pub fn claim_defaulted_batch(
        &mut self,
        sender: &Addr,
        coolers: &[Addr],
        loan_ids: &[LoanId],
    ) -> Result<Vec<DefaultedLoan>> {
        self.transact("claim_defaulted_batch", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            let mut reserves = Reserves::new(&state.vault, &mut state.treasury);
            state
                .house
                .claim_defaulted(
                    &mut ctx,
                    sender,
                    &mut state.factory,
                    &mut reserves,
                    coolers,
                    loan_ids,
                )
                .map_err(Into::into)
        })
    }

    pub fn defund(&mut self, sender: &Addr, asset: &Addr, amount: Amount) -> Result<()> {
        self.transact("defund", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            let mut reserves = Reserves::new(&state.vault, &mut state.treasury);
            state
                .house
                .defund(&mut ctx, sender, &mut reserves, asset, amount)
                .map_err(Into::into)
        })
    }

    pub fn burn(&mut self) -> Result<Amount> {
        self.transact("burn", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            state
                .house
                .burn(&mut ctx, &state.staking, &mut state.minter)
                .map_err(Into::into)
        })
    }

    pub fn emergency_shutdown(&mut self, sender: &Addr) -> Result<()> {
        self.transact("emergency_shutdown", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            let mut reserves = Reserves::new(&state.vault, &mut state.treasury);
            state
                .house
                .emergency_shutdown(&mut ctx, sender, &mut reserves)
                .map_err(Into::into)
        })
    }

    pub fn activate(&mut self, sender: &Addr) -> Result<()> {
        self.transact("activate", |state| {
            let mut ctx = Context::new(state.now, &mut state.bank, &mut state.journal);
            state.house.activate(&mut ctx, sender).map_err(Into::into)
        })
    }

    fn transact<F, R>(&mut self, operation: &'static str, op: F) -> Result<R>
    where
        F: FnOnce(&mut State) -> Result<R>,
    {
        let snapshot = self.state.clone();

        op(&mut self.state).map_err(|err| {
            tracing::warn!(operation, %err, "transaction reverted");
            self.state = snapshot;
            err
        })
    }
}
