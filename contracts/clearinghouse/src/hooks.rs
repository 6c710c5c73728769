use cooler::{CallbackError, CoolerCallback, LoanId};
use factory::EscrowRegistry;
use finance::coin::Amount;
use platform::context::Context;
use sdk::cosmwasm_std::Addr;

use crate::{clearinghouse::ClearingHouse, reserves::Reserves};

/// The clearing house acting as a callback of the escrows it lends through.
pub struct Hooks<'h, 'r> {
    house: &'h mut ClearingHouse,
    registry: &'h dyn EscrowRegistry,
    reserves: &'h mut Reserves<'r>,
}

impl<'h, 'r> Hooks<'h, 'r> {
    pub fn new(
        house: &'h mut ClearingHouse,
        registry: &'h dyn EscrowRegistry,
        reserves: &'h mut Reserves<'r>,
    ) -> Self {
        Self {
            house,
            registry,
            reserves,
        }
    }
}

impl CoolerCallback for Hooks<'_, '_> {
    fn is_cooler_callback(&self) -> bool {
        true
    }

    fn on_repay(
        &mut self,
        ctx: &mut Context<'_>,
        cooler: &Addr,
        loan_id: LoanId,
        amount: Amount,
    ) -> Result<(), CallbackError> {
        self.house
            .on_repay(ctx, self.registry, self.reserves, cooler, loan_id, amount)
            .map_err(CallbackError::new)
    }

    fn on_roll(
        &mut self,
        _ctx: &mut Context<'_>,
        cooler: &Addr,
        loan_id: LoanId,
        new_debt: Amount,
        new_collateral: Amount,
    ) -> Result<(), CallbackError> {
        self.house
            .on_roll(self.registry, cooler, loan_id, new_debt, new_collateral)
            .map_err(CallbackError::new)
    }

    fn on_default(
        &mut self,
        ctx: &mut Context<'_>,
        cooler: &Addr,
        loan_id: LoanId,
        debt: Amount,
        collateral: Amount,
    ) -> Result<(), CallbackError> {
        self.house
            .on_default(ctx, self.registry, self.reserves, cooler, loan_id, debt, collateral)
            .map_err(CallbackError::new)
    }
}
