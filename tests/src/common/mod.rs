use finance::coin::Amount;
use sdk::cosmwasm_std::Addr;

pub mod test_case;

pub const BORROWER: &str = "borrower";
pub const LENDER: &str = "lender";
pub const OVERSEER: &str = "overseer";
pub const EMERGENCY: &str = "emergency";

pub const TOKEN: Amount = 1_000_000_000_000_000_000;

pub fn borrower() -> Addr {
    Addr::unchecked(BORROWER)
}

pub fn lender() -> Addr {
    Addr::unchecked(LENDER)
}

pub fn overseer() -> Addr {
    Addr::unchecked(OVERSEER)
}

pub fn emergency() -> Addr {
    Addr::unchecked(EMERGENCY)
}
