#![cfg(all(test, not(target_arch = "wasm32")))]

mod common;

mod clearinghouse_tests;

mod cooler_tests;

mod factory_tests;
