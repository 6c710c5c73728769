pub use cosmwasm_std;

#[cfg(feature = "testing")]
pub mod testing;
