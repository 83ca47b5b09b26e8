use {
    super::{
        Error,
        eth::{Address, U256},
    },
    bigdecimal::BigDecimal,
    number::units,
};

/// An ERC-20 token (or the wrapped native currency) as known to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    /// Whether the token is the wrapped native currency which gets paid in
    /// and out as the native currency itself.
    pub native: bool,
}

impl Token {
    /// Whether this token is `token0` of a pool it shares with `other`.
    pub fn sorts_before(&self, other: &Token) -> bool {
        self.address < other.address
    }

    pub fn to_decimal(&self, raw: U256) -> BigDecimal {
        units::from_raw(raw, self.decimals)
    }
}

/// How much of a coin is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    /// A human decimal amount such as `"1.5"`.
    Decimal(String),
    /// An amount already in the token's smallest unit.
    Raw(U256),
}

impl Default for Amount {
    fn default() -> Self {
        Self::Raw(U256::ZERO)
    }
}

/// A requested amount of a token. Resolving a coin never mutates it, it
/// produces a [`ResolvedCoin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    pub token: Token,
    pub amount: Amount,
    /// Use the wallet's entire balance instead of `amount`.
    pub use_max_balance: bool,
}

impl Coin {
    pub fn new(token: Token, amount: Amount) -> Self {
        Self {
            token,
            amount,
            use_max_balance: false,
        }
    }

    pub fn max(token: Token) -> Self {
        Self {
            token,
            amount: Amount::default(),
            use_max_balance: true,
        }
    }

    /// Converts the requested amount into raw token units. `balance` is only
    /// consulted when the whole balance was requested.
    pub fn resolve(&self, balance: Option<U256>) -> Result<ResolvedCoin, Error> {
        let raw = if self.use_max_balance {
            balance.ok_or_else(|| {
                Error::validation(format!("balance of {} is required", self.token.symbol))
            })?
        } else {
            match &self.amount {
                Amount::Raw(raw) => *raw,
                Amount::Decimal(amount) => units::to_raw(amount, self.token.decimals)
                    .map_err(|err| Error::Validation(format!("{}: {err:#}", self.token.symbol)))?,
            }
        };
        Ok(ResolvedCoin {
            token: self.token.clone(),
            raw,
            from_max_balance: self.use_max_balance,
        })
    }
}

/// A coin with its amount in raw token units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCoin {
    pub token: Token,
    pub raw: U256,
    /// The amount is the wallet's whole balance at resolution time.
    pub from_max_balance: bool,
}

impl ResolvedCoin {
    pub fn new(token: Token, raw: U256) -> Self {
        Self {
            token,
            raw,
            from_max_balance: false,
        }
    }

    pub fn to_decimal(&self) -> BigDecimal {
        self.token.to_decimal(self.raw)
    }

    /// The same coin with a different amount.
    pub fn with_raw(&self, raw: U256) -> Self {
        Self {
            raw,
            ..self.clone()
        }
    }
}
