use {
    number::{
        serialization::{HexOrDecimalU256, HexU256},
        u256_ext::U256Ext,
    },
    serde::{Serialize, Serializer, ser::SerializeStruct},
    serde_with::SerializeAs,
    std::{fmt, str::FromStr},
};

pub use alloy::primitives::{Address, B256, Bytes, U256};

/// Gas amount.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Gas(pub U256);

impl Gas {
    /// Adds `percent` percent on top of the estimate, rounding the added part
    /// down.
    pub fn with_buffer(self, percent: u64) -> Option<Self> {
        self.0.checked_add_percent(percent).map(Self)
    }

    /// The amount of native currency needed to pay for this much gas.
    pub fn fee(self, price: GasPrice) -> Option<U256> {
        self.0.checked_mul(price.0)
    }
}

impl From<u64> for Gas {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for Gas {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

/// Gas price in wei.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GasPrice(pub U256);

impl From<U256> for GasPrice {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

/// An amount of the chain's native currency in wei.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ether(pub U256);

impl From<U256> for Ether {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

/// An unsigned call from a wallet, as handed to the node for gas estimation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx {
    pub from: Address,
    pub to: Address,
    pub value: Ether,
    pub input: Bytes,
}

/// How the numeric fields of a [`TransactionDescriptor`] are rendered for the
/// consuming wallet flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowType {
    /// `0x` prefixed hex quantities.
    #[default]
    Defi,
    Pool,
    DefiSwap,
}

impl FlowType {
    fn renders_hex(self) -> bool {
        matches!(self, Self::Defi)
    }
}

impl FromStr for FlowType {
    type Err = UnknownFlowType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "defi" => Ok(Self::Defi),
            "pool" => Ok(Self::Pool),
            "defi_swap" => Ok(Self::DefiSwap),
            other => Err(UnknownFlowType(other.to_string())),
        }
    }
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Defi => "defi",
            Self::Pool => "pool",
            Self::DefiSwap => "defi_swap",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown flow type {0:?}, expected one of defi, pool, defi_swap")]
pub struct UnknownFlowType(String);

/// A transaction ready to be signed by the wallet. It is never signed or
/// broadcast here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDescriptor {
    pub from: Address,
    pub to: Address,
    pub value: Ether,
    pub data: Bytes,
    pub gas: Gas,
    pub gas_price: GasPrice,
    pub flow: FlowType,
}

/// A quantity rendered according to the flow type.
struct Quantity(U256, FlowType);

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.1.renders_hex() {
            HexU256::serialize_as(&self.0, serializer)
        } else {
            HexOrDecimalU256::serialize_as(&self.0, serializer)
        }
    }
}

impl Serialize for TransactionDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tx = serializer.serialize_struct("TransactionDescriptor", 6)?;
        tx.serialize_field("from", &self.from)?;
        tx.serialize_field("to", &self.to)?;
        tx.serialize_field("value", &Quantity(self.value.0, self.flow))?;
        tx.serialize_field("data", &self.data)?;
        tx.serialize_field("gas", &Quantity(self.gas.0, self.flow))?;
        tx.serialize_field("gasPrice", &Quantity(self.gas_price.0, self.flow))?;
        tx.end()
    }
}

/// Status of a broadcast transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Failed,
    Succeeded,
}
