use {
    super::{
        Error,
        coin::Token,
        eth::{Address, U256},
        tick::{FeeTier, Range},
    },
    number::serialization::HexOrDecimalU256,
    serde::Serialize,
    serde_with::serde_as,
    std::fmt,
};

/// Id of a position NFT minted by the position manager contract.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TokenId(#[serde_as(as = "HexOrDecimalU256")] pub U256);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<U256> for TokenId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

/// One of the two tokens of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Token0,
    Token1,
}

/// A pool of two tokens at a fee tier, with `token0` sorting before
/// `token1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub id: String,
    pub token0: Token,
    pub token1: Token,
    pub fee: FeeTier,
}

impl Pool {
    /// Builds a pool, putting the tokens in address order.
    pub fn new(id: String, a: Token, b: Token, fee: FeeTier) -> Result<Self, Error> {
        if a.address == b.address {
            return Err(Error::Validation(format!(
                "pair {id} uses {} on both sides",
                a.symbol
            )));
        }
        if a.native && b.native {
            return Err(Error::Validation(format!(
                "pair {id} has two native tokens"
            )));
        }
        let (token0, token1) = if a.sorts_before(&b) { (a, b) } else { (b, a) };
        Ok(Self {
            id,
            token0,
            token1,
            fee,
        })
    }

    pub fn tick_spacing(&self) -> i32 {
        self.fee.tick_spacing()
    }

    pub fn token(&self, side: Side) -> &Token {
        match side {
            Side::Token0 => &self.token0,
            Side::Token1 => &self.token1,
        }
    }

    /// The wrapped native token of the pool, if any.
    pub fn native(&self) -> Option<&Token> {
        [&self.token0, &self.token1]
            .into_iter()
            .find(|token| token.native)
    }

    /// The token that is not the wrapped native one, if the pool has one.
    pub fn non_native(&self) -> Option<&Token> {
        self.native().map(|native| {
            if native.address == self.token0.address {
                &self.token1
            } else {
                &self.token0
            }
        })
    }

    /// Whether the pool trades exactly these tokens at this fee.
    pub fn matches(&self, token0: Address, token1: Address, fee: FeeTier) -> bool {
        self.fee == fee
            && ((self.token0.address == token0 && self.token1.address == token1)
                || (self.token0.address == token1 && self.token1.address == token0))
    }
}

/// The on-chain state of a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub token_id: TokenId,
    pub token0: Address,
    pub token1: Address,
    pub fee: FeeTier,
    pub range: Range,
    pub liquidity: u128,
}
