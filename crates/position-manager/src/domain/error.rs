use {
    super::{eth::U256, position::TokenId},
    crate::infra::blockchain,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("unknown pair {0:?}")]
    UnknownPair(String),
    #[error("unknown position {0}")]
    UnknownPosition(TokenId),
    #[error("there is not enough {symbol}: {required} required, {available} available")]
    InsufficientFunds {
        symbol: String,
        required: U256,
        available: U256,
    },
    #[error("not enough {symbol} allowance: {required} required, {approved} approved")]
    InsufficientAllowance {
        symbol: String,
        required: U256,
        approved: U256,
    },
    #[error("gas estimation failed: {0}")]
    Estimation(String),
    #[error("encoding failed: {0}")]
    Encoding(String),
    #[error(transparent)]
    UnsupportedChain(#[from] chain::Error),
    #[error("node error: {0}")]
    Node(#[source] blockchain::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<blockchain::Error> for Error {
    fn from(err: blockchain::Error) -> Self {
        match err {
            blockchain::Error::Revert(reason) => Self::Estimation(reason),
            blockchain::Error::UnknownPosition(id) => Self::UnknownPosition(id),
            err => Self::Node(err),
        }
    }
}
