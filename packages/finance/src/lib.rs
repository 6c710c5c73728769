pub mod arithmetic;
pub mod coin;
pub mod collateral;
pub mod duration;
pub mod error;
pub mod interest;
pub mod rate;
