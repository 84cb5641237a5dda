use crate::curve;
use crate::error::PoolError;
use crate::events::{Deposit, PoolCreated, Swap, Withdraw};
use crate::ledger;
use crate::storage::*;
use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, Env};
use soroban_token_sdk::events::{Burn, Mint, Transfer};

/// One side of a swap, oriented from the caller's input asset
struct SwapLeg {
    input_is_a: bool,
    reserve_in: i128,
    reserve_out: i128,
    asset_out: Address,
}

impl SwapLeg {
    /// Resolves which reserve receives the input and which asset is paid out
    ///
    /// # Errors
    /// `InvalidAsset` if `input_asset` is neither of the pool's assets
    fn resolve(e: &Env, input_asset: &Address) -> Result<Self, PoolError> {
        let (token_a, token_b) = (get_token_a(e), get_token_b(e));
        let (reserve_a, reserve_b) = get_reserves(e);

        if *input_asset == token_a {
            Ok(SwapLeg {
                input_is_a: true,
                reserve_in: reserve_a,
                reserve_out: reserve_b,
                asset_out: token_b,
            })
        } else if *input_asset == token_b {
            Ok(SwapLeg {
                input_is_a: false,
                reserve_in: reserve_b,
                reserve_out: reserve_a,
                asset_out: token_a,
            })
        } else {
            Err(PoolError::InvalidAsset)
        }
    }

    /// Writes the post-swap reserves back in (A, B) order
    fn commit(&self, e: &Env, new_reserve_in: i128, new_reserve_out: i128) {
        if self.input_is_a {
            put_reserves(e, new_reserve_in, new_reserve_out);
        } else {
            put_reserves(e, new_reserve_out, new_reserve_in);
        }
    }
}

#[contract]
pub struct LiquidityPool;

#[contractimpl]
impl LiquidityPool {
    /// Binds the pool to two assets and its immutable configuration
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `token_a` - Asset A token contract address
    /// * `token_b` - Asset B token contract address (must differ from `token_a`)
    /// * `config` - Swap fee and first-deposit seeding rule
    ///
    /// # Panics
    /// * `IdenticalAssets` if both addresses are the same
    /// * `InvalidFee` if `config.fee_bps` is 10_000 or more
    pub fn __constructor(e: Env, token_a: Address, token_b: Address, config: PoolConfig) {
        if token_a == token_b {
            panic_with_error!(&e, PoolError::IdenticalAssets);
        }
        if config.fee_bps >= curve::BPS_DENOMINATOR {
            panic_with_error!(&e, PoolError::InvalidFee);
        }

        put_token_a(&e, &token_a);
        put_token_b(&e, &token_b);
        put_config(&e, &config);
        put_total_shares(&e, 0);
        put_reserves(&e, 0, 0);

        log!(&e, "liquidity pool created with fee_bps", config.fee_bps);

        PoolCreated {
            token_a,
            token_b,
            fee_bps: config.fee_bps,
        }
        .publish(&e);
    }

    /// Deposits both assets and mints pool shares to the depositor
    ///
    /// The first deposit sets the pool's price and mints according to the
    /// configured [`ShareSeed`]. Later deposits mint
    /// `min(amount_a * total / reserve_a, amount_b * total / reserve_b)`.
    /// Both amounts are always pulled in full: whatever exceeds the current
    /// reserve ratio mints nothing and is donated to existing holders.
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `to` - The depositor (must authorize)
    /// * `amount_a` - Amount of asset A to pull
    /// * `amount_b` - Amount of asset B to pull
    ///
    /// # Returns
    /// The number of shares minted
    ///
    /// # Errors
    /// * `InvalidAmount` if either amount is not strictly positive
    /// * `InsufficientLiquidityMinted` if the deposit rounds to zero shares
    /// * `TransferFailed` if either asset ledger denies the pull
    pub fn deposit(e: Env, to: Address, amount_a: i128, amount_b: i128) -> Result<i128, PoolError> {
        to.require_auth();
        bump_instance(&e);

        if amount_a <= 0 || amount_b <= 0 {
            return Err(PoolError::InvalidAmount);
        }

        let (reserve_a, reserve_b) = get_reserves(&e);
        let total_shares = get_total_shares(&e);

        let minted = if total_shares == 0 {
            curve::initial_shares(get_config(&e).share_seed, amount_a, amount_b)?
        } else {
            curve::proportional_shares(amount_a, amount_b, reserve_a, reserve_b, total_shares)?
        };
        if minted <= 0 {
            return Err(PoolError::InsufficientLiquidityMinted);
        }

        let new_reserve_a = reserve_a
            .checked_add(amount_a)
            .ok_or(PoolError::Overflow)?;
        let new_reserve_b = reserve_b
            .checked_add(amount_b)
            .ok_or(PoolError::Overflow)?;

        ledger::pull(&e, &get_token_a(&e), &to, amount_a)?;
        ledger::pull(&e, &get_token_b(&e), &to, amount_b)?;

        mint_shares(&e, &to, minted)?;
        put_reserves(&e, new_reserve_a, new_reserve_b);

        Mint {
            to: to.clone(),
            to_muxed_id: None,
            amount: minted,
        }
        .publish(&e);
        Deposit {
            provider: to,
            amount_a,
            amount_b,
            shares: minted,
        }
        .publish(&e);

        Ok(minted)
    }

    /// Sells `amount_in` of one asset to the pool for the other asset
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `to` - The trader (must authorize); pays the input and receives the output
    /// * `input_asset` - The asset being sold; the other pool asset is bought
    /// * `amount_in` - Exact amount of `input_asset` to sell
    ///
    /// # Returns
    /// The amount of the other asset paid out
    ///
    /// # How it works
    /// 1. Prices the swap on the constant-product curve after the fee
    /// 2. Checks the reserve product does not decrease
    /// 3. Pulls the input from the trader
    /// 4. Records the new reserves
    /// 5. Pushes the output to the trader
    ///
    /// # Errors
    /// * `InvalidAmount` if `amount_in` is not strictly positive
    /// * `InvalidAsset` if `input_asset` is not one of the pool's assets
    /// * `InsufficientLiquidity` if the output rounds to zero or would drain the pool
    /// * `TransferFailed` if the pull or the push is denied
    pub fn swap(
        e: Env,
        to: Address,
        input_asset: Address,
        amount_in: i128,
    ) -> Result<i128, PoolError> {
        to.require_auth();
        bump_instance(&e);

        if amount_in <= 0 {
            return Err(PoolError::InvalidAmount);
        }

        let leg = SwapLeg::resolve(&e, &input_asset)?;
        let fee_bps = get_config(&e).fee_bps;
        let amount_out = curve::amount_out(amount_in, leg.reserve_in, leg.reserve_out, fee_bps)?;

        let new_reserve_in = leg
            .reserve_in
            .checked_add(amount_in)
            .ok_or(PoolError::Overflow)?;
        let new_reserve_out = leg.reserve_out - amount_out;
        curve::check_product(
            leg.reserve_in,
            leg.reserve_out,
            new_reserve_in,
            new_reserve_out,
        )?;

        ledger::pull(&e, &input_asset, &to, amount_in)?;
        leg.commit(&e, new_reserve_in, new_reserve_out);
        ledger::push(&e, &leg.asset_out, &to, amount_out)?;

        Swap {
            trader: to,
            asset_in: input_asset,
            amount_in,
            asset_out: leg.asset_out,
            amount_out,
        }
        .publish(&e);

        Ok(amount_out)
    }

    /// Burns pool shares and returns the proportional amount of both assets
    ///
    /// # Arguments
    /// * `e` - The environment
    /// * `to` - The share holder (must authorize)
    /// * `share_amount` - The number of shares to burn
    ///
    /// # Returns
    /// A tuple (amount_a, amount_b) of the assets paid out
    ///
    /// Burning the entire supply returns the reserves exactly and leaves the
    /// pool empty.
    ///
    /// # Errors
    /// * `InsufficientShares` if `share_amount` is not strictly positive or exceeds the holder's balance
    /// * `InsufficientLiquidityBurned` if both payouts round to zero
    /// * `TransferFailed` if either push is denied
    pub fn withdraw(e: Env, to: Address, share_amount: i128) -> Result<(i128, i128), PoolError> {
        to.require_auth();
        bump_instance(&e);

        if share_amount <= 0 || share_amount > get_shares(&e, &to) {
            return Err(PoolError::InsufficientShares);
        }

        let (reserve_a, reserve_b) = get_reserves(&e);
        let total_shares = get_total_shares(&e);
        let (out_a, out_b) = curve::redeem(share_amount, reserve_a, reserve_b, total_shares)?;
        if out_a == 0 && out_b == 0 {
            return Err(PoolError::InsufficientLiquidityBurned);
        }

        burn_shares(&e, &to, share_amount)?;
        put_reserves(&e, reserve_a - out_a, reserve_b - out_b);

        if out_a > 0 {
            ledger::push(&e, &get_token_a(&e), &to, out_a)?;
        }
        if out_b > 0 {
            ledger::push(&e, &get_token_b(&e), &to, out_b)?;
        }

        Burn {
            from: to.clone(),
            amount: share_amount,
        }
        .publish(&e);
        Withdraw {
            provider: to,
            shares: share_amount,
            amount_a: out_a,
            amount_b: out_b,
        }
        .publish(&e);

        Ok((out_a, out_b))
    }

    /// Moves pool shares between holders; total supply is unchanged
    ///
    /// # Errors
    /// * `InvalidAmount` if `amount` is not strictly positive
    /// * `InsufficientShares` if `from` holds fewer than `amount` shares
    pub fn transfer_shares(e: Env, from: Address, to: Address, amount: i128) -> Result<(), PoolError> {
        from.require_auth();
        bump_instance(&e);

        if amount <= 0 {
            return Err(PoolError::InvalidAmount);
        }

        spend_shares(&e, &from, amount)?;
        receive_shares(&e, &to, amount)?;

        Transfer {
            from,
            to,
            to_muxed_id: None,
            amount,
        }
        .publish(&e);

        Ok(())
    }

    /// Returns the liquidity pool share balance for a given user
    pub fn share_balance(e: Env, user: Address) -> i128 {
        get_shares(&e, &user)
    }

    pub fn total_shares(e: Env) -> i128 {
        get_total_shares(&e)
    }

    /// Returns the current reserves (reserve_a, reserve_b)
    pub fn get_reserves(e: Env) -> (i128, i128) {
        get_reserves(&e)
    }

    /// Returns the pool's assets (token_a, token_b)
    pub fn get_tokens(e: Env) -> (Address, Address) {
        (get_token_a(&e), get_token_b(&e))
    }

    pub fn get_config(e: Env) -> PoolConfig {
        get_config(&e)
    }

    /// Spot price of one unit of asset A in asset B, scaled by 1e7
    ///
    /// # Errors
    /// `InsufficientLiquidity` on an empty pool
    pub fn get_price(e: Env) -> Result<i128, PoolError> {
        let (reserve_a, reserve_b) = get_reserves(&e);
        curve::spot_price(reserve_a, reserve_b)
    }

    /// Quotes the output `swap` would pay for `amount_in` of `input_asset`
    pub fn get_amount_out(
        e: Env,
        input_asset: Address,
        amount_in: i128,
    ) -> Result<i128, PoolError> {
        if amount_in <= 0 {
            return Err(PoolError::InvalidAmount);
        }
        let leg = SwapLeg::resolve(&e, &input_asset)?;
        curve::amount_out(
            amount_in,
            leg.reserve_in,
            leg.reserve_out,
            get_config(&e).fee_bps,
        )
    }

    /// Quotes the `input_asset` amount needed to receive at least `amount_out`
    /// of the other asset
    pub fn get_amount_in(
        e: Env,
        input_asset: Address,
        amount_out: i128,
    ) -> Result<i128, PoolError> {
        if amount_out <= 0 {
            return Err(PoolError::InvalidAmount);
        }
        let leg = SwapLeg::resolve(&e, &input_asset)?;
        curve::amount_in(
            amount_out,
            leg.reserve_in,
            leg.reserve_out,
            get_config(&e).fee_bps,
        )
    }

    /// Checks the tracked reserves against the asset ledgers
    ///
    /// # Returns
    /// `true` when the pool holds at least its recorded reserve of each asset
    pub fn is_solvent(e: Env) -> bool {
        let pool = e.current_contract_address();
        let (reserve_a, reserve_b) = get_reserves(&e);
        ledger::balance_of(&e, &get_token_a(&e), &pool) >= reserve_a
            && ledger::balance_of(&e, &get_token_b(&e), &pool) >= reserve_b
    }
}
