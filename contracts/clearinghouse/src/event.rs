use finance::coin::Amount;
use platform::{Emit, Emitter};
use sdk::cosmwasm_std::{Addr, Timestamp};

pub(crate) enum Type {
    Lend,
    Rebalance,
    Defund,
    Burn,
    Deactivate,
    Reactivate,
}

impl Type {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lend => "clearinghouse-lend",
            Self::Rebalance => "clearinghouse-rebalance",
            Self::Defund => "clearinghouse-defund",
            Self::Burn => "clearinghouse-burn",
            Self::Deactivate => "clearinghouse-deactivate",
            Self::Reactivate => "clearinghouse-reactivate",
        }
    }
}

impl From<Type> for String {
    fn from(ty: Type) -> Self {
        String::from(ty.as_str())
    }
}

pub(crate) fn emit_lend(now: &Timestamp, cooler: &Addr, loan_id: u64, amount: Amount, owed: Amount) -> Emitter {
    Emitter::of_type(Type::Lend)
        .emit_tx_info(now)
        .emit_addr("cooler", cooler)
        .emit_to_string_value("loan", loan_id)
        .emit_amount("amount", amount)
        .emit_amount("owed", owed)
}

pub(crate) fn emit_rebalance(now: &Timestamp, defund: bool, amount: Amount) -> Emitter {
    Emitter::of_type(Type::Rebalance)
        .emit_tx_info(now)
        .emit_to_string_value("defund", defund)
        .emit_amount("amount", amount)
}

pub(crate) fn emit_defund(now: &Timestamp, asset: &Addr, amount: Amount) -> Emitter {
    Emitter::of_type(Type::Defund)
        .emit_tx_info(now)
        .emit_addr("asset", asset)
        .emit_amount("amount", amount)
}

pub(crate) fn emit_burn(now: &Timestamp, gohm: Amount, ohm: Amount) -> Emitter {
    Emitter::of_type(Type::Burn)
        .emit_tx_info(now)
        .emit_amount("gohm", gohm)
        .emit_amount("ohm", ohm)
}

pub(crate) fn emit_activation(now: &Timestamp, active: bool) -> Emitter {
    Emitter::of_type(if active {
        Type::Reactivate
    } else {
        Type::Deactivate
    })
    .emit_tx_info(now)
}
