use std::sync::Once;

use cosmwasm_std::Addr;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

pub fn user(addr: &str) -> Addr {
    Addr::unchecked(addr)
}

/// Installs a test-friendly subscriber once per process.
///
/// The filter is taken from `RUST_LOG` and defaults to `warn`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        // another test harness may have installed a global subscriber already
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
