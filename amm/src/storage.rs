use crate::error::PoolError;
use soroban_sdk::{contracttype, Address, Env};

// Storage TTL constants
pub const DAY_IN_LEDGERS: u32 = 17280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// How the very first deposit into an empty pool is converted into shares.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ShareSeed {
    /// Mint exactly the deposited amount of asset A (1:1 seeding)
    AssetA,
    /// Mint `floor(sqrt(amount_a * amount_b))`
    GeometricMean,
}

/// Deploy-time pool parameters. Immutable after construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Swap fee in basis points, strictly below 10_000
    pub fee_bps: u32,
    pub share_seed: ShareSeed,
}

impl PoolConfig {
    pub fn zero_fee() -> Self {
        PoolConfig {
            fee_bps: 0,
            share_seed: ShareSeed::AssetA,
        }
    }
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    TokenA,
    TokenB,
    Config,
    TotalShares,
    ReserveA,
    ReserveB,
    Shares(Address),
}

pub fn bump_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn get_token_a(e: &Env) -> Address {
    e.storage().instance().get(&DataKey::TokenA).unwrap()
}

pub fn get_token_b(e: &Env) -> Address {
    e.storage().instance().get(&DataKey::TokenB).unwrap()
}

pub fn get_config(e: &Env) -> PoolConfig {
    e.storage().instance().get(&DataKey::Config).unwrap()
}

pub fn get_total_shares(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalShares)
        .unwrap_or(0)
}

pub fn get_reserves(e: &Env) -> (i128, i128) {
    let storage = e.storage().instance();
    let reserve_a = storage.get::<DataKey, i128>(&DataKey::ReserveA).unwrap_or(0);
    let reserve_b = storage.get::<DataKey, i128>(&DataKey::ReserveB).unwrap_or(0);
    (reserve_a, reserve_b)
}

pub fn put_token_a(e: &Env, contract: &Address) {
    e.storage().instance().set(&DataKey::TokenA, contract);
}

pub fn put_token_b(e: &Env, contract: &Address) {
    e.storage().instance().set(&DataKey::TokenB, contract);
}

pub fn put_config(e: &Env, config: &PoolConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

pub fn put_total_shares(e: &Env, amount: i128) {
    e.storage().instance().set(&DataKey::TotalShares, &amount)
}

pub fn put_reserves(e: &Env, reserve_a: i128, reserve_b: i128) {
    e.storage().instance().set(&DataKey::ReserveA, &reserve_a);
    e.storage().instance().set(&DataKey::ReserveB, &reserve_b);
}

// Share ledger
pub fn get_shares(e: &Env, user: &Address) -> i128 {
    let key = DataKey::Shares(user.clone());
    if let Some(shares) = e.storage().persistent().get::<DataKey, i128>(&key) {
        e.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
        shares
    } else {
        0
    }
}

fn put_shares(e: &Env, user: &Address, amount: i128) {
    let key = DataKey::Shares(user.clone());
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

pub fn receive_shares(e: &Env, to: &Address, amount: i128) -> Result<(), PoolError> {
    let current = get_shares(e, to);
    let updated = current.checked_add(amount).ok_or(PoolError::Overflow)?;
    put_shares(e, to, updated);
    Ok(())
}

pub fn spend_shares(e: &Env, from: &Address, amount: i128) -> Result<(), PoolError> {
    let current = get_shares(e, from);
    if current < amount {
        return Err(PoolError::InsufficientShares);
    }
    put_shares(e, from, current - amount);
    Ok(())
}

pub fn mint_shares(e: &Env, to: &Address, amount: i128) -> Result<(), PoolError> {
    let total = get_total_shares(e);
    let updated = total.checked_add(amount).ok_or(PoolError::Overflow)?;
    receive_shares(e, to, amount)?;
    put_total_shares(e, updated);
    Ok(())
}

pub fn burn_shares(e: &Env, from: &Address, amount: i128) -> Result<(), PoolError> {
    spend_shares(e, from, amount)?;
    let total = get_total_shares(e);
    put_total_shares(e, total - amount);
    Ok(())
}
