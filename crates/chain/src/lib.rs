use {
    alloy::primitives::U256,
    serde::{Deserialize, Deserializer, Serialize, Serializer, de},
    std::{fmt, str::FromStr},
    thiserror::Error,
};

/// Represents each chain positions can be managed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u64)]
pub enum Chain {
    Ethereum = 1,
    Binance = 56,
    Polygon = 137,
}

/// Static facts about a chain.
#[derive(Debug)]
pub struct Info {
    pub chain: Chain,
    /// Identifier used in configuration files and on the command line.
    pub key: &'static str,
    pub name: &'static str,
    pub native_symbol: &'static str,
    pub explorer: &'static str,
}

static TABLE: [Info; 3] = [
    Info {
        chain: Chain::Ethereum,
        key: "ethereum",
        name: "Ethereum / Mainnet",
        native_symbol: "ETH",
        explorer: "https://etherscan.io",
    },
    Info {
        chain: Chain::Binance,
        key: "binance",
        name: "BNB Smart Chain",
        native_symbol: "BNB",
        explorer: "https://bscscan.com",
    },
    Info {
        chain: Chain::Polygon,
        key: "polygon",
        name: "Polygon PoS",
        native_symbol: "MATIC",
        explorer: "https://polygonscan.com",
    },
];

impl Chain {
    pub const ALL: [Chain; 3] = [Chain::Ethereum, Chain::Binance, Chain::Polygon];

    fn info(&self) -> &'static Info {
        match self {
            Self::Ethereum => &TABLE[0],
            Self::Binance => &TABLE[1],
            Self::Polygon => &TABLE[2],
        }
    }

    /// Returns the chain's id.
    pub fn id(&self) -> u64 {
        *self as u64
    }

    /// The lowercase identifier (`ethereum`, `binance`, `polygon`).
    pub fn key(&self) -> &'static str {
        self.info().key
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// Symbol of the chain's native currency used in user facing messages.
    pub fn native_symbol(&self) -> &'static str {
        self.info().native_symbol
    }

    /// Link to a transaction on the chain's block explorer.
    pub fn explorer_tx_url(&self, hash: impl fmt::Display) -> String {
        format!("{}/tx/{hash}", self.info().explorer)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TABLE
            .iter()
            .find(|info| info.key.eq_ignore_ascii_case(s))
            .map(|info| info.chain)
            .ok_or_else(|| Error::UnsupportedChain(s.to_string()))
    }
}

impl TryFrom<u64> for Chain {
    type Error = Error;

    /// Initializes `Chain` from a chain id, returns error if the chain id is
    /// not supported.
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|chain| chain.id() == value)
            .ok_or(Error::ChainIdNotSupported(value))
    }
}

impl TryFrom<U256> for Chain {
    type Error = Error;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        let id = u64::try_from(value).map_err(|_| Error::ChainIdNotSupported(u64::MAX))?;
        id.try_into()
    }
}

impl Serialize for Chain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Chain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ChainVisitor;

        impl de::Visitor<'_> for ChainVisitor {
            type Value = Chain;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a chain id or one of ethereum, binance, polygon")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Chain::try_from(value).map_err(de::Error::custom)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map_err(de::Error::custom)
                    .and_then(|value| self.visit_u64(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                // Map keys such as `[rpc]` entries arrive as strings.
                match value.parse::<u64>() {
                    Ok(id) => self.visit_u64(id),
                    Err(_) => value.parse().map_err(de::Error::custom),
                }
            }
        }

        deserializer.deserialize_any(ChainVisitor)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported chain {0:?}")]
    UnsupportedChain(String),
    #[error("chain id {0} not supported")]
    ChainIdNotSupported(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lookups() {
        assert_eq!(Chain::Ethereum.native_symbol(), "ETH");
        assert_eq!(Chain::Binance.native_symbol(), "BNB");
        assert_eq!(Chain::Polygon.native_symbol(), "MATIC");
        assert_eq!(Chain::Polygon.id(), 137);
        for chain in Chain::ALL {
            assert_eq!(chain.info().chain, chain);
            assert_eq!(chain.key().parse::<Chain>().unwrap(), chain);
            assert_eq!(Chain::try_from(chain.id()).unwrap(), chain);
        }
        assert_eq!(
            Chain::Ethereum.explorer_tx_url("0xabc"),
            "https://etherscan.io/tx/0xabc"
        );
    }

    #[test]
    fn rejects_unknown_chains() {
        assert_eq!(
            "solana".parse::<Chain>().unwrap_err(),
            Error::UnsupportedChain("solana".to_string())
        );
        assert_eq!(
            Chain::try_from(5u64).unwrap_err(),
            Error::ChainIdNotSupported(5)
        );
        assert!(Chain::try_from(U256::MAX).is_err());
    }

    #[test]
    fn deserializes_from_name_or_id() {
        let chain: Chain = serde_json::from_str(r#""polygon""#).unwrap();
        assert_eq!(chain, Chain::Polygon);
        let chain: Chain = serde_json::from_str(r#""Binance""#).unwrap();
        assert_eq!(chain, Chain::Binance);
        let chain: Chain = serde_json::from_str("1").unwrap();
        assert_eq!(chain, Chain::Ethereum);
        let chain: Chain = serde_json::from_str(r#""137""#).unwrap();
        assert_eq!(chain, Chain::Polygon);
        assert!(serde_json::from_str::<Chain>(r#""goerli""#).is_err());
        assert!(serde_json::from_str::<Chain>("9999").is_err());

        assert_eq!(serde_json::to_string(&Chain::Binance).unwrap(), r#""binance""#);
    }
}
