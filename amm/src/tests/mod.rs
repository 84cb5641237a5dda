mod deposit_tests;

pub use fixture::{LiquidityPoolTest, MockLedgerTest};
