use std::collections::BTreeMap;

use finance::{
    arithmetic,
    coin::{Amount, Decimals},
    collateral,
    duration::Duration,
    interest,
    rate::Rate,
};
use platform::context::Context;
use sdk::cosmwasm_std::Addr;

use crate::{
    callback::CoolerCallback,
    error::{ContractError, Result},
    event,
    loan::{DefaultedLoan, Loan, LoanId, Request, RequestId},
    slots::Slots,
};

/// Escrow of a single owner for one collateral and debt token pair.
///
/// Collateral transfers are made by the escrow on behalf of the caller so the
/// caller must have allowed the escrow's address to spend the amounts involved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cooler {
    address: Addr,
    owner: Addr,
    collateral: Addr,
    debt: Addr,
    factory: Addr,
    collateral_decimals: Decimals,
    requests: Vec<Request>,
    loans: Slots<Loan>,
    approvals: BTreeMap<LoanId, Addr>,
}

impl Cooler {
    pub fn new(
        address: Addr,
        owner: Addr,
        collateral: Addr,
        debt: Addr,
        factory: Addr,
        collateral_decimals: Decimals,
    ) -> Self {
        Self {
            address,
            owner,
            collateral,
            debt,
            factory,
            collateral_decimals,
            requests: Vec::new(),
            loans: Slots::default(),
            approvals: BTreeMap::new(),
        }
    }

    pub const fn address(&self) -> &Addr {
        &self.address
    }

    pub const fn owner(&self) -> &Addr {
        &self.owner
    }

    pub const fn collateral(&self) -> &Addr {
        &self.collateral
    }

    pub const fn debt(&self) -> &Addr {
        &self.debt
    }

    pub const fn factory(&self) -> &Addr {
        &self.factory
    }

    pub fn request(&self, req_id: RequestId) -> Result<&Request> {
        usize::try_from(req_id)
            .ok()
            .and_then(|id| self.requests.get(id))
            .ok_or(ContractError::UnknownRequest(req_id))
    }

    pub fn is_active(&self, req_id: RequestId) -> Result<bool> {
        self.request(req_id).map(|request| request.active)
    }

    /// Reads a live loan. Loans claimed on default are reported as unknown.
    pub fn loan(&self, loan_id: LoanId) -> Result<&Loan> {
        self.loans
            .get(loan_id)
            .ok_or(ContractError::UnknownLoan(loan_id))
    }

    pub fn requests_len(&self) -> u64 {
        self.requests.len() as u64
    }

    pub fn loans_len(&self) -> u64 {
        self.loans.len()
    }

    /// The address allowed to take over the loan.
    pub fn approval(&self, loan_id: LoanId) -> Option<&Addr> {
        self.approvals.get(&loan_id)
    }

    pub fn collateral_for(&self, amount: Amount, loan_to_collateral: Amount) -> Result<Amount> {
        collateral::collateral_for(amount, loan_to_collateral, self.collateral_decimals)
            .map_err(Into::into)
    }

    /// Collateral to add on rolling the loan over its pending terms.
    pub fn new_collateral_for(&self, loan_id: LoanId) -> Result<Amount> {
        self.loan(loan_id).and_then(|loan| {
            self.collateral_for(loan.amount, loan.request.loan_to_collateral)
                .map(|needed| needed.saturating_sub(loan.collateral))
        })
    }

    /// Opens a request pledging the collateral it needs, pulled from `sender`.
    pub fn request_loan(
        &mut self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        amount: Amount,
        interest: Rate,
        loan_to_collateral: Amount,
        duration: Duration,
    ) -> Result<RequestId> {
        let collateral = self.collateral_for(amount, loan_to_collateral)?;
        ctx.bank.transfer_from(
            &self.collateral,
            &self.address,
            sender,
            &self.address,
            collateral,
        )?;

        let req_id = self.requests_len();
        self.requests.push(Request {
            amount,
            interest,
            loan_to_collateral,
            duration,
            active: true,
        });

        event::emit_request(ctx, &self.address, req_id, collateral);
        tracing::debug!(cooler = %self.address, req_id, amount, collateral, "loan requested");
        Ok(req_id)
    }

    pub fn rescind_request(
        &mut self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        req_id: RequestId,
    ) -> Result<()> {
        self.only_owner(sender)?;

        let request = self.active_request(req_id)?;
        let collateral = self.collateral_for(request.amount, request.loan_to_collateral)?;
        ctx.bank
            .transfer(&self.collateral, &self.address, &self.owner, collateral)?;

        self.deactivate(req_id);

        event::emit_rescind(ctx, &self.address, req_id);
        tracing::debug!(cooler = %self.address, req_id, collateral, "request rescinded");
        Ok(())
    }

    /// Lends the requested amount to the owner, `sender` becoming the lender.
    ///
    /// A lender asking for callbacks must present itself as a callback.
    pub fn clear_request(
        &mut self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        req_id: RequestId,
        repay_direct: bool,
        has_callback: bool,
        lender: Option<&dyn CoolerCallback>,
    ) -> Result<LoanId> {
        if has_callback && !lender.map_or(false, |lender| lender.is_cooler_callback()) {
            return Err(ContractError::NotCoolerCallback {});
        }

        let request = self.active_request(req_id)?.clone();
        let interest = interest::interest_for(request.amount, request.interest, request.duration)?;
        let amount = arithmetic::checked_add(request.amount, interest)?;
        let collateral = self.collateral_for(request.amount, request.loan_to_collateral)?;
        let expiry = request.duration.after(&ctx.now)?;

        ctx.bank.transfer_from(
            &self.debt,
            &self.address,
            sender,
            &self.owner,
            request.amount,
        )?;

        self.deactivate(req_id);
        let loan_id = self.loans.push(Loan {
            request: Request {
                active: false,
                ..request
            },
            amount,
            unclaimed: 0,
            collateral,
            expiry,
            lender: sender.clone(),
            repay_direct,
            has_callback,
        });

        event::emit_clear(ctx, &self.address, req_id, loan_id, sender);
        tracing::debug!(cooler = %self.address, req_id, loan_id, amount, "request cleared");
        Ok(loan_id)
    }

    /// Repays up to the owed amount releasing a proportional share of the
    /// collateral back to the owner.
    ///
    /// The lender callback runs last, so a failing callback relies on the host
    /// transaction to revert the repayment.
    pub fn repay_loan(
        &mut self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        loan_id: LoanId,
        repaid: Amount,
        lender: Option<&mut dyn CoolerCallback>,
    ) -> Result<Amount> {
        let loan = self.live_loan(loan_id, ctx)?;

        let repaid = repaid.min(loan.amount);
        let released = if loan.amount == 0 {
            0
        } else {
            arithmetic::mul_div(loan.collateral, repaid, loan.amount)?
        };
        if released == 0 {
            return Err(ContractError::ZeroCollateralReturned {});
        }

        let to = if loan.repay_direct {
            loan.lender.clone()
        } else {
            self.address.clone()
        };
        let unclaimed = if loan.repay_direct {
            loan.unclaimed
        } else {
            arithmetic::checked_add(loan.unclaimed, repaid)?
        };
        let lender = notified(loan.has_callback, lender)?;

        ctx.bank
            .transfer_from(&self.debt, &self.address, sender, &to, repaid)?;
        ctx.bank
            .transfer(&self.collateral, &self.address, &self.owner, released)?;

        let loan = self.loan_mut(loan_id)?;
        loan.amount -= repaid;
        loan.collateral -= released;
        loan.unclaimed = unclaimed;

        event::emit_repay(ctx, &self.address, loan_id, repaid, released);
        tracing::debug!(cooler = %self.address, loan_id, repaid, released, "loan repaid");

        if let Some(lender) = lender {
            lender.on_repay(ctx, &self.address, loan_id, repaid)?;
        }
        Ok(released)
    }

    /// Extends the loan over the terms its lender has provided.
    ///
    /// The interest for the new term is added to the debt and any collateral
    /// missing at the new ratio is pulled from `sender`. As with repayments, the
    /// host transaction reverts the roll if the lender callback fails.
    pub fn roll_loan(
        &mut self,
        ctx: &mut Context<'_>,
        sender: &Addr,
        loan_id: LoanId,
        lender: Option<&mut dyn CoolerCallback>,
    ) -> Result<()> {
        let loan = self.live_loan(loan_id, ctx)?;
        if !loan.request.active {
            return Err(ContractError::NotRollable {});
        }

        let new_collateral = self.new_collateral_for(loan_id)?;
        let new_debt =
            interest::interest_for(loan.amount, loan.request.interest, loan.request.duration)?;
        let amount = arithmetic::checked_add(loan.amount, new_debt)?;
        let collateral = arithmetic::checked_add(loan.collateral, new_collateral)?;
        let expiry = loan.request.duration.after(&loan.expiry)?;
        let lender = notified(loan.has_callback, lender)?;

        ctx.bank.transfer_from(
            &self.collateral,
            &self.address,
            sender,
            &self.address,
            new_collateral,
        )?;

        let loan = self.loan_mut(loan_id)?;
        loan.amount = amount;
        loan.collateral = collateral;
        loan.expiry = expiry;
        loan.request.active = false;

        event::emit_roll(ctx, &self.address, loan_id, new_debt, new_collateral);
        tracing::debug!(cooler = %self.address, loan_id, new_debt, new_collateral, "loan rolled");

        if let Some(lender) = lender {
            lender.on_roll(ctx, &self.address, loan_id, new_debt, new_collateral)?;
        }
        Ok(())
    }

    /// Offers the terms the loan may be rolled over, nominally for the amount
    /// currently owed.
    pub fn provide_new_terms_for_roll(
        &mut self,
        sender: &Addr,
        loan_id: LoanId,
        interest: Rate,
        loan_to_collateral: Amount,
        duration: Duration,
    ) -> Result<()> {
        let loan = self.lender_loan_mut(sender, loan_id)?;
        loan.request = Request {
            amount: loan.amount,
            interest,
            loan_to_collateral,
            duration,
            active: true,
        };
        Ok(())
    }

    /// Sends the repayments held by the escrow to the lender.
    pub fn claim_repaid(&mut self, ctx: &mut Context<'_>, loan_id: LoanId) -> Result<Amount> {
        let loan = self.loan(loan_id)?;
        let claimed = loan.unclaimed;

        ctx.bank
            .transfer(&self.debt, &self.address, &loan.lender, claimed)?;

        self.loan_mut(loan_id).map(|loan| {
            loan.unclaimed = 0;
            claimed
        })
    }

    /// Settles an expired loan handing the collateral and any unclaimed
    /// repayment over to the lender.
    pub fn claim_defaulted(
        &mut self,
        ctx: &mut Context<'_>,
        loan_id: LoanId,
        lender: Option<&mut dyn CoolerCallback>,
    ) -> Result<DefaultedLoan> {
        let loan = self.loan(loan_id)?;
        if !loan.has_defaulted(&ctx.now) {
            return Err(ContractError::NoDefault {});
        }
        let lender = notified(loan.has_callback, lender)?;

        let loan = self
            .loans
            .take(loan_id)
            .ok_or(ContractError::UnknownLoan(loan_id))?;
        self.approvals.remove(&loan_id);

        ctx.bank
            .transfer(&self.collateral, &self.address, &loan.lender, loan.collateral)?;
        ctx.bank
            .transfer(&self.debt, &self.address, &loan.lender, loan.unclaimed)?;

        let defaulted = DefaultedLoan {
            amount: loan.amount,
            collateral: loan.collateral,
            elapsed: Duration::between(&loan.expiry, &ctx.now),
        };

        event::emit_default(ctx, &self.address, loan_id, loan.collateral);
        tracing::debug!(cooler = %self.address, loan_id, debt = loan.amount, collateral = loan.collateral, "loan defaulted");

        if let Some(lender) = lender {
            lender.on_default(ctx, &self.address, loan_id, loan.amount, loan.collateral)?;
        }
        Ok(defaulted)
    }

    pub fn approve_transfer(&mut self, sender: &Addr, to: Addr, loan_id: LoanId) -> Result<()> {
        self.lender_loan_mut(sender, loan_id)?;
        self.approvals.insert(loan_id, to);
        Ok(())
    }

    /// Makes `sender` the lender of the loan, provided the current lender has
    /// approved it.
    ///
    /// Callbacks stay with the previous lender so they are turned off.
    pub fn transfer_ownership(&mut self, sender: &Addr, loan_id: LoanId) -> Result<()> {
        if self.approvals.get(&loan_id) != Some(sender) {
            return Err(ContractError::OnlyApproved {});
        }

        let loan = self.loan_mut(loan_id)?;
        loan.lender = sender.clone();
        loan.has_callback = false;

        self.approvals.remove(&loan_id);
        tracing::debug!(cooler = %self.address, loan_id, lender = %sender, "loan transferred");
        Ok(())
    }

    pub fn set_direct_repay(&mut self, sender: &Addr, loan_id: LoanId, direct: bool) -> Result<()> {
        self.lender_loan_mut(sender, loan_id)
            .map(|loan| loan.repay_direct = direct)
    }

    fn only_owner(&self, sender: &Addr) -> Result<()> {
        access_control::check(&self.owner, sender).map_err(|_| ContractError::OnlyApproved {})
    }

    fn active_request(&self, req_id: RequestId) -> Result<&Request> {
        self.request(req_id).and_then(|request| {
            if request.active {
                Ok(request)
            } else {
                Err(ContractError::Deactivated {})
            }
        })
    }

    fn deactivate(&mut self, req_id: RequestId) {
        if let Some(request) = usize::try_from(req_id)
            .ok()
            .and_then(|id| self.requests.get_mut(id))
        {
            request.active = false;
        }
    }

    /// A loan that has not expired yet.
    fn live_loan(&self, loan_id: LoanId, ctx: &Context<'_>) -> Result<&Loan> {
        self.loan(loan_id).and_then(|loan| {
            if loan.has_defaulted(&ctx.now) {
                Err(ContractError::Default {})
            } else {
                Ok(loan)
            }
        })
    }

    fn loan_mut(&mut self, loan_id: LoanId) -> Result<&mut Loan> {
        self.loans
            .get_mut(loan_id)
            .ok_or(ContractError::UnknownLoan(loan_id))
    }

    fn lender_loan_mut(&mut self, sender: &Addr, loan_id: LoanId) -> Result<&mut Loan> {
        self.loan_mut(loan_id).and_then(|loan| {
            access_control::check(&loan.lender, sender)
                .map(|()| loan)
                .map_err(|_| ContractError::OnlyApproved {})
        })
    }
}

/// The lender to notify, required to be present when the loan asks for callbacks.
fn notified(
    has_callback: bool,
    lender: Option<&mut dyn CoolerCallback>,
) -> Result<Option<&mut dyn CoolerCallback>> {
    if has_callback {
        lender
            .map(Some)
            .ok_or(ContractError::NotCoolerCallback {})
    } else {
        Ok(None)
    }
}
