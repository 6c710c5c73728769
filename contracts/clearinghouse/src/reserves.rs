use modules::Ledger;
use vault::SavingsVault;

/// The collaborators holding the lending reserves.
pub struct Reserves<'a> {
    pub vault: &'a SavingsVault,
    pub treasury: &'a mut dyn Ledger,
}

impl<'a> Reserves<'a> {
    pub fn new(vault: &'a SavingsVault, treasury: &'a mut dyn Ledger) -> Self {
        Self { vault, treasury }
    }
}
