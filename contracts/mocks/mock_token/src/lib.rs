#![no_std]
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, MuxedAddress};

/// Mock Token Contract
///
/// Bare-bones fungible token exposing the SEP-41 `transfer` and `balance`
/// entry points. Any address can be frozen, after which every transfer from
/// or to it panics. Lets tests make an asset ledger refuse a pull or a push.
#[contract]
pub struct MockToken;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Balance(Address),
    Frozen(Address),
}

#[contractimpl]
impl MockToken {
    /// Credit `amount` to `to` out of thin air
    pub fn mint(e: Env, to: Address, amount: i128) {
        if amount < 0 {
            panic!("negative amount");
        }
        let balance = Self::get_balance(&e, &to);
        Self::set_balance(&e, &to, balance + amount);
    }

    pub fn set_frozen(e: Env, id: Address, frozen: bool) {
        e.storage().instance().set(&DataKey::Frozen(id), &frozen);
    }

    pub fn balance(e: Env, id: Address) -> i128 {
        Self::get_balance(&e, &id)
    }

    pub fn transfer(e: Env, from: Address, to: MuxedAddress, amount: i128) {
        from.require_auth();

        if amount < 0 {
            panic!("negative amount");
        }

        let to = to.address();
        if Self::is_frozen(&e, &from) || Self::is_frozen(&e, &to) {
            panic!("account frozen");
        }

        let from_balance = Self::get_balance(&e, &from);
        if from_balance < amount {
            panic!("insufficient balance");
        }

        Self::set_balance(&e, &from, from_balance - amount);
        let to_balance = Self::get_balance(&e, &to);
        Self::set_balance(&e, &to, to_balance + amount);
    }

    // ========== Internal Helper Functions ==========

    fn is_frozen(e: &Env, id: &Address) -> bool {
        e.storage()
            .instance()
            .get(&DataKey::Frozen(id.clone()))
            .unwrap_or(false)
    }

    fn get_balance(e: &Env, id: &Address) -> i128 {
        e.storage()
            .persistent()
            .get(&DataKey::Balance(id.clone()))
            .unwrap_or(0)
    }

    fn set_balance(e: &Env, id: &Address, amount: i128) {
        e.storage()
            .persistent()
            .set(&DataKey::Balance(id.clone()), &amount);
    }
}
