use thiserror::Error;

use finance::coin::Amount;
use sdk::cosmwasm_std::Addr;

use crate::permission::Permission;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("[Modules] Policy {policy} has not been granted {permission}")]
    Unauthorized {
        policy: Addr,
        permission: Permission,
    },

    #[error("[Modules] Insufficient approval of {token} for {debtor}, needed {needed} but found {available}")]
    InsufficientApproval {
        debtor: Addr,
        token: Addr,
        needed: Amount,
        available: Amount,
    },

    #[error("[Modules] {0}")]
    Platform(#[from] platform::error::Error),

    #[error("[Modules] {0}")]
    Finance(#[from] finance::error::Error),
}

impl Error {
    pub(crate) fn unauthorized(policy: &Addr, permission: Permission) -> Self {
        Self::Unauthorized {
            policy: policy.clone(),
            permission,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
