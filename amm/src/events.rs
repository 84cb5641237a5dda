use soroban_sdk::{contractevent, Address};

// Share mint, burn and transfer are published with the standard token events
// from soroban-token-sdk; these cover the pool-level transitions.

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreated {
    #[topic]
    pub token_a: Address,
    #[topic]
    pub token_b: Address,
    pub fee_bps: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    #[topic]
    pub provider: Address,
    pub amount_a: i128,
    pub amount_b: i128,
    pub shares: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Swap {
    #[topic]
    pub trader: Address,
    pub asset_in: Address,
    pub amount_in: i128,
    pub asset_out: Address,
    pub amount_out: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdraw {
    #[topic]
    pub provider: Address,
    pub shares: i128,
    pub amount_a: i128,
    pub amount_b: i128,
}
