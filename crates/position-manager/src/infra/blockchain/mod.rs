use {
    crate::domain::{
        FeeTier,
        Pool,
        Position,
        Tick,
        TokenId,
        eth::{Address, B256, Gas, Tx, TxStatus, U256},
    },
    thiserror::Error,
};

pub mod contracts;
mod rpc;

pub use self::rpc::Ethereum;

/// Read access to the chain. Nothing is ever signed or broadcast through it.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait Node: Send + Sync {
    /// The current tick of the pool's on-chain price.
    async fn pool_tick(&self, pool: &Pool) -> Result<Tick, Error>;

    async fn position(&self, token_id: TokenId) -> Result<Position, Error>;

    /// Balance of the chain's native currency.
    async fn native_balance(&self, owner: Address) -> Result<U256, Error>;

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, Error>;

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, Error>;

    /// Fees owed to the position, as a static `collect` call made by `owner`
    /// reports them.
    async fn earned_fees(&self, token_id: TokenId, owner: Address) -> Result<(U256, U256), Error>;

    async fn decimals(&self, token: Address) -> Result<u8, Error>;

    async fn estimate_gas(&self, tx: &Tx) -> Result<Gas, Error>;

    async fn tx_status(&self, hash: B256) -> Result<TxStatus, Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::TransportError),
    #[error("contract error: {0}")]
    Contract(#[from] alloy::contract::Error),
    #[error("execution reverted: {0}")]
    Revert(String),
    #[error("position {0} does not exist")]
    UnknownPosition(TokenId),
    #[error("no pool for {token0}/{token1} at fee {fee}")]
    MissingPool {
        token0: Address,
        token1: Address,
        fee: FeeTier,
    },
    #[error("unexpected response: {0}")]
    Response(String),
    #[error("request timed out")]
    Timeout,
}
