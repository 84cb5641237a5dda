use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    /// Zero, negative or otherwise unusable amount
    InvalidAmount = 1,
    /// Asset is not one of the two assets bound to the pool
    InvalidAsset = 2,
    /// Deposit too small to mint a single share
    InsufficientLiquidityMinted = 3,
    /// Withdrawal too small to release any asset
    InsufficientLiquidityBurned = 4,
    /// Swap would move nothing or drain one side of the pool
    InsufficientLiquidity = 5,
    InsufficientShares = 6,
    /// An asset ledger denied a pull or a push
    TransferFailed = 7,
    IdenticalAssets = 8,
    InvalidFee = 9,
    Overflow = 10,
    /// Post-swap reserve product fell below the pre-swap product
    InvariantViolated = 11,
}
