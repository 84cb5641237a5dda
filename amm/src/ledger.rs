//! Asset ledger access: the two SEP-41 token contracts the pool holds.
//!
//! Transfers go through the fallible client calls so a denied transfer comes
//! back as [`PoolError::TransferFailed`] instead of trapping the invocation.

use crate::error::PoolError;
use soroban_sdk::{token, Address, Env};

/// Moves `amount` of `asset` from `from` into the pool.
pub fn pull(e: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), PoolError> {
    let client = token::Client::new(e, asset);
    match client.try_transfer(from, &e.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(PoolError::TransferFailed),
    }
}

/// Moves `amount` of `asset` from the pool to `to`.
pub fn push(e: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), PoolError> {
    let client = token::Client::new(e, asset);
    match client.try_transfer(&e.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(PoolError::TransferFailed),
    }
}

pub fn balance_of(e: &Env, asset: &Address, holder: &Address) -> i128 {
    token::Client::new(e, asset).balance(holder)
}
