//! Integer pricing and share math for the constant-product pool.
//!
//! Every function here is pure. Amounts and reserves are `i128`, but every
//! product is formed in 256 bits so that 18-decimal balances never overflow
//! an intermediate step; only a final result that does not fit back into
//! `i128` is reported as `Overflow`. Division always floors. Results are
//! never rounded in the caller's favour: shares minted, assets redeemed and
//! swap output all round down, and quoted swap input rounds up.

use crate::error::PoolError;
use crate::storage::ShareSeed;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for intermediate products.
    pub struct U256(4);
}

/// Basis-point denominator for the swap fee.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Fixed-point scale of the spot price returned by [`spot_price`].
pub const PRICE_SCALE: i128 = 10_000_000;

/// Widens a non-negative amount.
pub(crate) fn wide(v: i128) -> Result<U256, PoolError> {
    u128::try_from(v)
        .map(U256::from)
        .map_err(|_| PoolError::InvalidAmount)
}

/// Narrows a 256-bit result back to `i128`.
pub(crate) fn narrow(v: U256) -> Result<i128, PoolError> {
    if v.bits() > 128 {
        return Err(PoolError::Overflow);
    }
    i128::try_from(v.low_u128()).map_err(|_| PoolError::Overflow)
}

fn mul(a: U256, b: U256) -> Result<U256, PoolError> {
    a.checked_mul(b).ok_or(PoolError::Overflow)
}

/// `floor(a * b / d)` for a strictly positive `d`.
fn mul_div(a: i128, b: i128, d: i128) -> Result<i128, PoolError> {
    let d = wide(d)?;
    if d.is_zero() {
        return Err(PoolError::Overflow);
    }
    narrow(mul(wide(a)?, wide(b)?)? / d)
}

/// Shares minted by the deposit that opens an empty pool.
pub fn initial_shares(seed: ShareSeed, amount_a: i128, amount_b: i128) -> Result<i128, PoolError> {
    match seed {
        ShareSeed::AssetA => Ok(amount_a),
        ShareSeed::GeometricMean => narrow(mul(wide(amount_a)?, wide(amount_b)?)?.integer_sqrt()),
    }
}

/// Shares minted for a deposit into an active pool.
///
/// Takes the smaller of the two implied contributions, so any amount beyond
/// the current reserve ratio mints nothing and stays in the pool.
pub fn proportional_shares(
    amount_a: i128,
    amount_b: i128,
    reserve_a: i128,
    reserve_b: i128,
    total_shares: i128,
) -> Result<i128, PoolError> {
    if reserve_a <= 0 || reserve_b <= 0 {
        return Err(PoolError::InsufficientLiquidity);
    }
    let shares_a = mul_div(amount_a, total_shares, reserve_a)?;
    let shares_b = mul_div(amount_b, total_shares, reserve_b)?;
    Ok(shares_a.min(shares_b))
}

/// Output of a swap of `amount_in` along the constant-product curve.
///
/// `out = floor(reserve_out * in' / (reserve_in * 10_000 + in'))` where
/// `in' = amount_in * (10_000 - fee_bps)`. With a zero fee this reduces to
/// `floor(reserve_out * amount_in / (reserve_in + amount_in))`.
pub fn amount_out(
    amount_in: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee_bps: u32,
) -> Result<i128, PoolError> {
    if amount_in <= 0 {
        return Err(PoolError::InvalidAmount);
    }
    if reserve_in <= 0 || reserve_out <= 0 {
        return Err(PoolError::InsufficientLiquidity);
    }

    let effective_in = mul(wide(amount_in)?, U256::from(BPS_DENOMINATOR - fee_bps))?;
    let numerator = mul(wide(reserve_out)?, effective_in)?;
    let denominator = mul(wide(reserve_in)?, U256::from(BPS_DENOMINATOR))? + effective_in;
    let out = narrow(numerator / denominator)?;

    // The pool must move something and must never be drained of one side
    if out == 0 || out >= reserve_out {
        return Err(PoolError::InsufficientLiquidity);
    }
    Ok(out)
}

/// Input that makes [`amount_out`] return at least `amount_out`, rounded up.
pub fn amount_in(
    amount_out: i128,
    reserve_in: i128,
    reserve_out: i128,
    fee_bps: u32,
) -> Result<i128, PoolError> {
    if amount_out <= 0 {
        return Err(PoolError::InvalidAmount);
    }
    if reserve_in <= 0 || reserve_out <= 0 || amount_out >= reserve_out {
        return Err(PoolError::InsufficientLiquidity);
    }

    let numerator = mul(
        mul(wide(reserve_in)?, wide(amount_out)?)?,
        U256::from(BPS_DENOMINATOR),
    )?;
    let denominator = mul(
        wide(reserve_out - amount_out)?,
        U256::from(BPS_DENOMINATOR - fee_bps),
    )?;
    narrow(numerator / denominator)?
        .checked_add(1)
        .ok_or(PoolError::Overflow)
}

/// Assets released by burning `share_amount` out of `total_shares`.
pub fn redeem(
    share_amount: i128,
    reserve_a: i128,
    reserve_b: i128,
    total_shares: i128,
) -> Result<(i128, i128), PoolError> {
    if share_amount <= 0 || total_shares <= 0 || share_amount > total_shares {
        return Err(PoolError::InsufficientShares);
    }
    // Exact on full exit: reserve * total / total == reserve
    let out_a = mul_div(reserve_a, share_amount, total_shares)?;
    let out_b = mul_div(reserve_b, share_amount, total_shares)?;
    Ok((out_a, out_b))
}

/// Price of one unit of asset A in units of asset B, scaled by [`PRICE_SCALE`].
pub fn spot_price(reserve_a: i128, reserve_b: i128) -> Result<i128, PoolError> {
    if reserve_a <= 0 || reserve_b <= 0 {
        return Err(PoolError::InsufficientLiquidity);
    }
    mul_div(reserve_b, PRICE_SCALE, reserve_a)
}

/// Fails unless `new_in * new_out >= old_in * old_out`.
pub fn check_product(
    old_in: i128,
    old_out: i128,
    new_in: i128,
    new_out: i128,
) -> Result<(), PoolError> {
    if mul(wide(new_in)?, wide(new_out)?)? < mul(wide(old_in)?, wide(old_out)?)? {
        return Err(PoolError::InvariantViolated);
    }
    Ok(())
}
