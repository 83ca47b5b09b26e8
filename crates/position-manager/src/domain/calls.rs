//! Calldata for the position manager contract. Pools with a wrapped native
//! token get the extra calls that move the native currency in and out.

use {
    super::{
        Error,
        eth::{Address, Bytes, U256},
        position::{Pool, TokenId},
        tick::{FeeTier, Range, Tick},
    },
    crate::infra::blockchain::contracts::{INonfungiblePositionManager as Manager, IERC20},
    alloy::{
        primitives::aliases::{I24, U24},
        sol_types::SolCall,
    },
};

/// Collect everything that is owed.
const COLLECT_ALL: u128 = u128::MAX;

fn encode(call: impl SolCall) -> Bytes {
    call.abi_encode().into()
}

fn tick(tick: Tick) -> Result<I24, Error> {
    I24::try_from(tick.get()).map_err(|err| Error::Encoding(format!("tick {tick}: {err}")))
}

fn fee(fee: FeeTier) -> Result<U24, Error> {
    U24::try_from(fee.pips()).map_err(|err| Error::Encoding(format!("fee {fee}: {err}")))
}

/// Where collected tokens are sent and the calls forwarding them to the
/// wallet. With a native side the contract keeps the tokens until the
/// wrapped native token is unwrapped and the other token swept.
fn payout(pool: &Pool, wallet: Address) -> (Address, Vec<Bytes>) {
    match pool.non_native() {
        Some(other) => (
            Address::ZERO,
            vec![unwrap_native(wallet), encode(Manager::sweepTokenCall {
                token: other.address,
                amountMinimum: U256::ZERO,
                recipient: wallet,
            })],
        ),
        None => (wallet, Vec::new()),
    }
}

fn unwrap_native(wallet: Address) -> Bytes {
    encode(Manager::unwrapWETH9Call {
        amountMinimum: U256::ZERO,
        recipient: wallet,
    })
}

fn collect_call(token_id: TokenId, recipient: Address) -> Bytes {
    encode(Manager::collectCall {
        params: Manager::CollectParams {
            tokenId: token_id.0,
            recipient,
            amount0Max: COLLECT_ALL,
            amount1Max: COLLECT_ALL,
        },
    })
}

fn increase_call(token_id: TokenId, amounts: (U256, U256), deadline: U256) -> Bytes {
    encode(Manager::increaseLiquidityCall {
        params: Manager::IncreaseLiquidityParams {
            tokenId: token_id.0,
            amount0Desired: amounts.0,
            amount1Desired: amounts.1,
            amount0Min: U256::ZERO,
            amount1Min: U256::ZERO,
            deadline,
        },
    })
}

pub fn mint(
    pool: &Pool,
    range: Range,
    amounts: (U256, U256),
    recipient: Address,
    deadline: U256,
) -> Result<Vec<Bytes>, Error> {
    let mut calls = vec![encode(Manager::mintCall {
        params: Manager::MintParams {
            token0: pool.token0.address,
            token1: pool.token1.address,
            fee: fee(pool.fee)?,
            tickLower: tick(range.lower())?,
            tickUpper: tick(range.upper())?,
            amount0Desired: amounts.0,
            amount1Desired: amounts.1,
            amount0Min: U256::ZERO,
            amount1Min: U256::ZERO,
            recipient,
            deadline,
        },
    })];
    if pool.native().is_some() {
        calls.push(encode(Manager::refundETHCall {}));
    }
    Ok(calls)
}

pub fn increase(
    pool: &Pool,
    token_id: TokenId,
    amounts: (U256, U256),
    deadline: U256,
) -> Vec<Bytes> {
    let mut calls = vec![increase_call(token_id, amounts, deadline)];
    if pool.native().is_some() {
        calls.push(encode(Manager::refundETHCall {}));
    }
    calls
}

/// Removes `liquidity` and collects the tokens. The contract rejects a
/// decrease of zero liquidity, so removing nothing only collects.
pub fn decrease(
    pool: &Pool,
    token_id: TokenId,
    liquidity: u128,
    wallet: Address,
    deadline: U256,
) -> Vec<Bytes> {
    if liquidity == 0 {
        return collect(pool, token_id, wallet);
    }
    let (recipient, forward) = payout(pool, wallet);
    let decrease = encode(Manager::decreaseLiquidityCall {
        params: Manager::DecreaseLiquidityParams {
            tokenId: token_id.0,
            liquidity,
            amount0Min: U256::ZERO,
            amount1Min: U256::ZERO,
            deadline,
        },
    });
    [decrease, collect_call(token_id, recipient)]
        .into_iter()
        .chain(forward)
        .collect()
}

pub fn collect(pool: &Pool, token_id: TokenId, wallet: Address) -> Vec<Bytes> {
    let (recipient, forward) = payout(pool, wallet);
    std::iter::once(collect_call(token_id, recipient))
        .chain(forward)
        .collect()
}

/// Collects the fees into the wallet and deposits them again.
pub fn restake(
    pool: &Pool,
    token_id: TokenId,
    fees: (U256, U256),
    wallet: Address,
    deadline: U256,
) -> Vec<Bytes> {
    let mut calls = vec![
        collect_call(token_id, wallet),
        increase_call(token_id, fees, deadline),
    ];
    if pool.native().is_some() {
        calls.push(unwrap_native(wallet));
    }
    calls
}

/// Unlimited allowance for `spender`.
pub fn approve(spender: Address) -> Bytes {
    encode(IERC20::approveCall {
        spender,
        amount: U256::MAX,
    })
}
