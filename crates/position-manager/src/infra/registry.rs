//! The pairs positions can be opened in.

use {
    crate::domain::{Error, FeeTier, Pool, Token, eth::Address},
    alloy::primitives::address,
};

#[derive(Debug, Clone)]
pub struct Registry {
    pools: Vec<Pool>,
}

impl Registry {
    pub fn new(pools: Vec<Pool>) -> Self {
        Self { pools }
    }

    /// The pool of a pair id such as `eth_dai`.
    pub fn resolve(&self, pair: &str) -> Result<&Pool, Error> {
        self.pools
            .iter()
            .find(|pool| pool.id.eq_ignore_ascii_case(pair))
            .ok_or_else(|| Error::UnknownPair(pair.to_string()))
    }

    /// The registered pool trading `token0` and `token1` at `fee`.
    pub fn find(&self, token0: Address, token1: Address, fee: FeeTier) -> Option<&Pool> {
        self.pools
            .iter()
            .find(|pool| pool.matches(token0, token1, fee))
    }

    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }
}

/// Pairs available without configuration.
pub fn builtin() -> Vec<Pool> {
    vec![Pool {
        id: "eth_dai".to_string(),
        token0: Token {
            address: address!("4F96Fe3b7A6Cf9725f59d353F723c1bDb64CA6Aa"),
            symbol: "DAI".to_string(),
            decimals: 18,
            native: false,
        },
        token1: Token {
            address: address!("d0A1E359811322d97991E03f863a0C30C2cF029C"),
            symbol: "ETH".to_string(),
            decimals: 18,
            native: true,
        },
        fee: FeeTier::Medium,
    }]
}
