use std::collections::BTreeMap;

use cooler::Cooler;
use platform::{context::Context, Emit, Emitter};
use sdk::cosmwasm_std::Addr;

use crate::{
    error::{ContractError, Result},
    registry::{EscrowRegistry, Registry},
};

const EVENT_TYPE: &str = "cooler-clone";

/// Owns every escrow it creates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoolerFactory {
    address: Addr,
    registry: Registry,
    coolers: BTreeMap<Addr, Cooler>,
}

impl CoolerFactory {
    pub fn new(address: Addr) -> Self {
        Self {
            address,
            registry: Registry::default(),
            coolers: BTreeMap::new(),
        }
    }

    pub const fn address(&self) -> &Addr {
        &self.address
    }

    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the escrow of `owner` for the pair, creating it on first use.
    pub fn generate_cooler(
        &mut self,
        ctx: &mut Context<'_>,
        owner: &Addr,
        collateral: &Addr,
        debt: &Addr,
    ) -> Result<Addr> {
        if let Some(cooler) = self.registry.cooler_for(owner, collateral, debt) {
            return Ok(cooler.clone());
        }

        let decimals = ctx.bank.decimals(collateral)?;
        ctx.bank.decimals(debt)?;

        let address = Addr::unchecked(format!(
            "{}-cooler-{}",
            self.address,
            self.registry.len()
        ));
        self.coolers.insert(
            address.clone(),
            Cooler::new(
                address.clone(),
                owner.clone(),
                collateral.clone(),
                debt.clone(),
                self.address.clone(),
                decimals,
            ),
        );
        self.registry
            .record(address.clone(), owner, collateral, debt);

        ctx.journal.record(
            Emitter::of_type(EVENT_TYPE)
                .emit_tx_info(&ctx.now)
                .emit_addr("cooler", &address)
                .emit_addr("owner", owner)
                .emit_addr("collateral", collateral)
                .emit_addr("debt", debt),
        );
        tracing::debug!(cooler = %address, %owner, "cooler created");
        Ok(address)
    }

    pub fn cooler_for(&self, owner: &Addr, collateral: &Addr, debt: &Addr) -> Option<&Addr> {
        self.registry.cooler_for(owner, collateral, debt)
    }

    pub fn coolers_for(&self, collateral: &Addr, debt: &Addr) -> &[Addr] {
        self.registry.coolers_for(collateral, debt)
    }

    pub fn cooler(&self, addr: &Addr) -> Result<&Cooler> {
        self.coolers
            .get(addr)
            .ok_or_else(|| ContractError::NotFromFactory(addr.clone()))
    }

    pub fn cooler_mut(&mut self, addr: &Addr) -> Result<&mut Cooler> {
        self.coolers
            .get_mut(addr)
            .ok_or_else(|| ContractError::NotFromFactory(addr.clone()))
    }

    /// The registry alongside a mutable escrow, for callers that must check
    /// membership while acting on one escrow.
    pub fn split_mut(&mut self, addr: &Addr) -> Result<(&Registry, &mut Cooler)> {
        let registry = &self.registry;
        self.coolers
            .get_mut(addr)
            .map(|cooler| (registry, cooler))
            .ok_or_else(|| ContractError::NotFromFactory(addr.clone()))
    }
}

impl EscrowRegistry for CoolerFactory {
    fn is_valid_escrow(&self, addr: &Addr) -> bool {
        self.registry.is_valid_escrow(addr)
    }
}
