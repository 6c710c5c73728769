use serde::{Deserialize, Serialize};

use sdk::cosmwasm_std::Addr;

/// A role held by exactly one address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleUserAccess {
    role: String,
    address: Addr,
}

impl SingleUserAccess {
    pub fn new<R>(role: R, address: Addr) -> Self
    where
        R: Into<String>,
    {
        Self {
            role: role.into(),
            address,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub const fn address(&self) -> &Addr {
        &self.address
    }

    pub fn check_access(&self, addr: &Addr) -> Result<(), Unauthorized> {
        check(&self.address, addr)
    }
}

impl From<SingleUserAccess> for Addr {
    fn from(value: SingleUserAccess) -> Self {
        value.address
    }
}

/// Ensures `accessed` is the `permitted` address.
pub fn check(permitted: &Addr, accessed: &Addr) -> Result<(), Unauthorized> {
    if permitted == accessed {
        Ok(())
    } else {
        Err(Unauthorized)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("[Access Control] Checked address doesn't match the one associated with access control variable!")]
pub struct Unauthorized;
