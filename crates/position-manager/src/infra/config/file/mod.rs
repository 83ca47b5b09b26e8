use {
    crate::domain::{
        FeeTier,
        eth::{Address, U256},
    },
    chain::Chain,
    number::serialization::HexOrDecimalU256,
    serde::Deserialize,
    serde_with::serde_as,
    std::{collections::HashMap, time::Duration},
    url::Url,
};

mod load;

pub use load::{load, parse};

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    /// The chain positions are managed on.
    #[serde(default = "default_chain")]
    chain: Chain,

    /// Node endpoints by chain.
    #[serde(default)]
    rpc: HashMap<Chain, Url>,

    #[serde(default = "default_position_manager")]
    position_manager: Address,

    /// How long built transactions stay valid.
    #[serde(with = "humantime_serde", default = "default_deadline")]
    deadline: Duration,

    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    request_timeout: Duration,

    /// Gas price in wei for commands that do not name one.
    #[serde_as(as = "Option<HexOrDecimalU256>")]
    #[serde(default)]
    default_gas_price: Option<U256>,

    /// The tradable pairs. The built-in ETH/DAI pair is used when empty.
    #[serde(default, rename = "pair")]
    pairs: Vec<PairConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PairConfig {
    id: String,
    fee: FeeTier,
    token0: TokenConfig,
    token1: TokenConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TokenConfig {
    address: Address,
    symbol: String,
    decimals: u8,
    /// Whether this is the wrapped native currency.
    #[serde(default)]
    native: bool,
}

fn default_chain() -> Chain {
    Chain::Ethereum
}

fn default_position_manager() -> Address {
    alloy::primitives::address!("C36442b4a4522E871399CD717aBDD847Ab11FE88")
}

fn default_deadline() -> Duration {
    Duration::from_secs(900_000)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}
