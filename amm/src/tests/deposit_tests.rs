use super::LiquidityPoolTest;
use crate::{LiquidityPool, PoolConfig, PoolError, ShareSeed};
use soroban_sdk::{testutils::Address as _, Address, Env};

#[test]
fn test_initialization() {
    let test = LiquidityPoolTest::setup();

    assert_eq!(test.pool.get_reserves(), (0, 0));
    assert_eq!(test.pool.total_shares(), 0);
    assert_eq!(
        test.pool.get_tokens(),
        (test.token_a.address.clone(), test.token_b.address.clone())
    );
    assert_eq!(test.pool.get_config(), PoolConfig::zero_fee());
}

#[test]
#[should_panic(expected = "Error(Contract, #8)")]
fn test_initialization_identical_assets() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let token = env.register_stellar_asset_contract_v2(admin);

    let _ = env.register(
        LiquidityPool,
        (&token.address(), &token.address(), &PoolConfig::zero_fee()),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #9)")]
fn test_initialization_fee_out_of_range() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let token_a = env.register_stellar_asset_contract_v2(admin.clone());
    let token_b = env.register_stellar_asset_contract_v2(admin);

    let config = PoolConfig {
        fee_bps: 10_000,
        share_seed: ShareSeed::AssetA,
    };
    let _ = env.register(
        LiquidityPool,
        (&token_a.address(), &token_b.address(), &config),
    );
}

#[test]
fn test_first_deposit_seeds_one_to_one() {
    let test = LiquidityPoolTest::setup();

    let minted = test.seed(100, 100);

    assert_eq!(minted, 100);
    assert_eq!(test.pool.share_balance(&test.user), 100);
    assert_eq!(test.pool.total_shares(), 100);
    assert_eq!(test.pool.get_reserves(), (100, 100));
    assert_eq!(test.token_a.balance(&test.pool.address), 100);
    assert_eq!(test.token_b.balance(&test.pool.address), 100);
}

#[test]
fn test_first_deposit_any_ratio_mints_asset_a_amount() {
    let test = LiquidityPoolTest::setup();

    let minted = test.seed(1_000, 2_000);

    assert_eq!(minted, 1_000);
    assert_eq!(test.pool.get_reserves(), (1_000, 2_000));
}

#[test]
fn test_first_deposit_geometric_mean_seeding() {
    let test = LiquidityPoolTest::setup_with_config(PoolConfig {
        fee_bps: 0,
        share_seed: ShareSeed::GeometricMean,
    });

    // sqrt(100 * 400) = 200
    let minted = test.seed(100, 400);

    assert_eq!(minted, 200);
    assert_eq!(test.pool.total_shares(), 200);
}

#[test]
fn test_proportional_deposit_preserves_ratio() {
    let test = LiquidityPoolTest::setup();
    test.seed(1_000, 2_000);

    let user2 = Address::generate(&test.env);
    test.mint_a(&user2, 500);
    test.mint_b(&user2, 1_000);
    let minted = test.pool.deposit(&user2, &500, &1_000);

    assert_eq!(minted, 500);
    assert_eq!(test.pool.share_balance(&user2), 500);

    let (reserve_a, reserve_b) = test.pool.get_reserves();
    assert_eq!((reserve_a, reserve_b), (1_500, 3_000));
    assert_eq!(reserve_b * 1_000, reserve_a * 2_000);
}

#[test]
fn test_excess_deposit_is_donated_to_holders() {
    let test = LiquidityPoolTest::setup();
    test.seed(1_000, 1_000);

    // 500 A implies 500 shares, 800 B implies 800; only 500 are minted
    let user2 = Address::generate(&test.env);
    test.mint_a(&user2, 500);
    test.mint_b(&user2, 800);
    let minted = test.pool.deposit(&user2, &500, &800);

    assert_eq!(minted, 500);
    assert_eq!(test.pool.get_reserves(), (1_500, 1_800));
    assert_eq!(test.token_a.balance(&user2), 0);
    assert_eq!(test.token_b.balance(&user2), 0);

    // The 300 B excess is shared pro rata: first holder's 1000 of 1500 shares
    let (out_a, out_b) = test.pool.withdraw(&test.user, &1_000);
    assert_eq!(out_a, 1_000);
    assert_eq!(out_b, 1_200);
}

#[test]
fn test_deposit_fails_with_zero_amount() {
    let test = LiquidityPoolTest::setup();
    test.mint_tokens(&test.user, 1_000);

    assert_eq!(
        test.pool.try_deposit(&test.user, &0, &1_000),
        Err(Ok(PoolError::InvalidAmount))
    );
    assert_eq!(
        test.pool.try_deposit(&test.user, &1_000, &0),
        Err(Ok(PoolError::InvalidAmount))
    );

    // Same answer once the pool is active
    test.pool.deposit(&test.user, &500, &500);
    assert_eq!(
        test.pool.try_deposit(&test.user, &0, &100),
        Err(Ok(PoolError::InvalidAmount))
    );
    assert_eq!(
        test.pool.try_deposit(&test.user, &100, &-5),
        Err(Ok(PoolError::InvalidAmount))
    );
}

#[test]
fn test_deposit_too_small_to_mint() {
    let test = LiquidityPoolTest::setup();
    // One share backed by 1 A and 1_000_000 B
    test.seed(1, 1_000_000);

    let user2 = Address::generate(&test.env);
    test.mint_tokens(&user2, 1);

    assert_eq!(
        test.pool.try_deposit(&user2, &1, &1),
        Err(Ok(PoolError::InsufficientLiquidityMinted))
    );
    assert_eq!(test.token_a.balance(&user2), 1);
    assert_eq!(test.token_b.balance(&user2), 1);
    assert_eq!(test.pool.get_reserves(), (1, 1_000_000));
}

#[test]
fn test_deposit_fails_when_pull_is_denied() {
    let test = LiquidityPoolTest::setup();
    test.mint_a(&test.user, 100);
    test.mint_b(&test.user, 50);

    assert_eq!(
        test.pool.try_deposit(&test.user, &100, &100),
        Err(Ok(PoolError::TransferFailed))
    );

    assert_eq!(test.pool.get_reserves(), (0, 0));
    assert_eq!(test.pool.total_shares(), 0);
    assert_eq!(test.pool.share_balance(&test.user), 0);
    assert_eq!(test.token_a.balance(&test.user), 100);
    assert_eq!(test.token_b.balance(&test.user), 50);
}

#[test]
fn test_multiple_liquidity_providers() {
    let test = LiquidityPoolTest::setup();
    test.seed(10_000, 10_000);

    let user2 = Address::generate(&test.env);
    test.mint_tokens(&user2, 5_000);
    test.pool.deposit(&user2, &5_000, &5_000);

    assert_eq!(test.pool.share_balance(&test.user), 10_000);
    assert_eq!(test.pool.share_balance(&user2), 5_000);
    assert_eq!(test.pool.total_shares(), 15_000);
    assert_eq!(test.pool.get_reserves(), (15_000, 15_000));
}

#[test]
fn test_large_deposit_small_deposit_fairness() {
    let test = LiquidityPoolTest::setup();
    test.seed(1_000_000, 1_000_000);

    let user2 = Address::generate(&test.env);
    test.mint_tokens(&user2, 100);
    test.pool.deposit(&user2, &100, &100);

    let shares1 = test.pool.share_balance(&test.user);
    let shares2 = test.pool.share_balance(&user2);

    assert_eq!(shares1 / shares2, 10_000);
}

#[test]
fn test_deposit_keeps_pool_solvent() {
    let test = LiquidityPoolTest::setup();
    test.seed(3_000, 7_000);

    assert!(test.pool.is_solvent());
}
