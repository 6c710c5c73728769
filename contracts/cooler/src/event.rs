use finance::coin::Amount;
use platform::{context::Context, Emit, Emitter};
use sdk::cosmwasm_std::Addr;

use crate::loan::{LoanId, RequestId};

pub(crate) enum Type {
    Request,
    Rescind,
    Clear,
    Repay,
    Roll,
    Default,
}

impl Type {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "cooler-request",
            Self::Rescind => "cooler-rescind",
            Self::Clear => "cooler-clear",
            Self::Repay => "cooler-repay",
            Self::Roll => "cooler-roll",
            Self::Default => "cooler-default",
        }
    }
}

impl From<Type> for String {
    fn from(ty: Type) -> Self {
        String::from(ty.as_str())
    }
}

pub(crate) fn emit_request(ctx: &mut Context<'_>, cooler: &Addr, req_id: RequestId, collateral: Amount) {
    let emitter = of_type(Type::Request, ctx, cooler)
        .emit_to_string_value("request", req_id)
        .emit_amount("collateral", collateral);
    ctx.journal.record(emitter)
}

pub(crate) fn emit_rescind(ctx: &mut Context<'_>, cooler: &Addr, req_id: RequestId) {
    let emitter = of_type(Type::Rescind, ctx, cooler).emit_to_string_value("request", req_id);
    ctx.journal.record(emitter)
}

pub(crate) fn emit_clear(
    ctx: &mut Context<'_>,
    cooler: &Addr,
    req_id: RequestId,
    loan_id: LoanId,
    lender: &Addr,
) {
    let emitter = of_type(Type::Clear, ctx, cooler)
        .emit_to_string_value("request", req_id)
        .emit_to_string_value("loan", loan_id)
        .emit_addr("lender", lender);
    ctx.journal.record(emitter)
}

pub(crate) fn emit_repay(
    ctx: &mut Context<'_>,
    cooler: &Addr,
    loan_id: LoanId,
    repaid: Amount,
    released: Amount,
) {
    let emitter = of_type(Type::Repay, ctx, cooler)
        .emit_to_string_value("loan", loan_id)
        .emit_amount("repaid", repaid)
        .emit_amount("released", released);
    ctx.journal.record(emitter)
}

pub(crate) fn emit_roll(
    ctx: &mut Context<'_>,
    cooler: &Addr,
    loan_id: LoanId,
    new_debt: Amount,
    new_collateral: Amount,
) {
    let emitter = of_type(Type::Roll, ctx, cooler)
        .emit_to_string_value("loan", loan_id)
        .emit_amount("new-debt", new_debt)
        .emit_amount("new-collateral", new_collateral);
    ctx.journal.record(emitter)
}

pub(crate) fn emit_default(ctx: &mut Context<'_>, cooler: &Addr, loan_id: LoanId, collateral: Amount) {
    let emitter = of_type(Type::Default, ctx, cooler)
        .emit_to_string_value("loan", loan_id)
        .emit_amount("collateral", collateral);
    ctx.journal.record(emitter)
}

fn of_type(ty: Type, ctx: &Context<'_>, cooler: &Addr) -> Emitter {
    Emitter::of_type(ty)
        .emit_tx_info(&ctx.now)
        .emit_addr("cooler", cooler)
}
