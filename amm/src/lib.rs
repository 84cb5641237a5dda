#![no_std]

#[cfg(test)]
extern crate std;

#[cfg(feature = "contract")]
mod contract;
pub mod curve;
mod error;
mod events;
mod ledger;
mod storage;

#[cfg(all(test, feature = "contract"))]
mod tests;

#[cfg(feature = "contract")]
pub use contract::{LiquidityPool, LiquidityPoolClient};
pub use error::PoolError;
pub use storage::{PoolConfig, ShareSeed};

use soroban_sdk::contractmeta;

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Two-asset constant product liquidity pool"
);
