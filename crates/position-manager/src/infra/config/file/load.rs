use {
    super::{Config, PairConfig, TokenConfig},
    crate::{
        domain::{Pool, Token, eth::GasPrice},
        infra::{config, registry},
    },
    std::{collections::HashSet, path::Path},
    tokio::fs,
};

/// Load the configuration from a TOML file.
pub async fn load(path: &Path) -> Result<config::Config, config::Error> {
    let data = fs::read_to_string(path)
        .await
        .map_err(|source| config::Error::Io {
            path: path.to_owned(),
            source,
        })?;
    parse(&data)
}

pub fn parse(data: &str) -> Result<config::Config, config::Error> {
    let config: Config = toml::de::from_str(data)?;

    let mut ids = HashSet::new();
    let pools = config
        .pairs
        .into_iter()
        .map(|pair| {
            if !ids.insert(pair.id.clone()) {
                return Err(config::Error::DuplicatePair(pair.id));
            }
            pool(pair)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(config::Config {
        chain: config.chain,
        rpc: config.rpc,
        position_manager: config.position_manager,
        deadline: config.deadline,
        request_timeout: config.request_timeout,
        default_gas_price: config.default_gas_price.map(GasPrice),
        pools: if pools.is_empty() {
            registry::builtin()
        } else {
            pools
        },
    })
}

fn pool(pair: PairConfig) -> Result<Pool, config::Error> {
    let token = |token: TokenConfig| Token {
        address: token.address,
        symbol: token.symbol,
        decimals: token.decimals,
        native: token.native,
    };
    Pool::new(pair.id.clone(), token(pair.token0), token(pair.token1), pair.fee)
        .map_err(|source| config::Error::Pair { id: pair.id, source })
}
