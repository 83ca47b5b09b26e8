use {
    crate::domain::{
        self,
        Pool,
        eth::{Address, GasPrice},
    },
    chain::Chain,
    std::{collections::HashMap, path::PathBuf, time::Duration},
    thiserror::Error,
    url::Url,
};

pub mod file;

pub use file::load;

/// Configuration of the position manager.
#[derive(Debug, Clone)]
pub struct Config {
    pub chain: Chain,
    pub rpc: HashMap<Chain, Url>,
    pub position_manager: Address,
    pub deadline: Duration,
    pub request_timeout: Duration,
    /// Used when a command does not name a gas price.
    pub default_gas_price: Option<GasPrice>,
    pub pools: Vec<Pool>,
}

impl Config {
    /// The node endpoint of the configured chain.
    pub fn rpc_url(&self) -> Result<&Url, domain::Error> {
        self.rpc.get(&self.chain).ok_or_else(|| {
            chain::Error::UnsupportedChain(format!("{} has no rpc endpoint", self.chain)).into()
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid pair {id}: {source}")]
    Pair {
        id: String,
        source: domain::Error,
    },
    #[error("pair {0} is configured more than once")]
    DuplicatePair(String),
}
