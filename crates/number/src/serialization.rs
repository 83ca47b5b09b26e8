use {
    crate::conversions::big_decimal_to_plain_string,
    alloy::primitives::U256,
    bigdecimal::BigDecimal,
    serde::{Deserializer, Serializer, de},
    serde_with::{DeserializeAs, SerializeAs},
    std::fmt,
};

/// Serialize a [`U256`] as a decimal string and deserialize it from either a
/// decimal string or a hex string prefixed with `0x`.
pub struct HexOrDecimalU256;

/// Serialize a [`U256`] as a `0x` prefixed lowercase hex string without
/// leading zeros, the format JSON-RPC wallets expect for quantities.
pub struct HexU256;

/// Serialize a [`BigDecimal`] as a plain decimal string (no exponent).
pub struct PlainDecimal;

impl<'de> DeserializeAs<'de, U256> for HexOrDecimalU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = U256;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a u256 encoded either as 0x hex prefixed or decimal encoded string"
                )
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(U256::from(v))
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                decode(s).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

impl SerializeAs<U256> for HexOrDecimalU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&source.to_string())
    }
}

impl SerializeAs<U256> for HexU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{source:#x}"))
    }
}

impl<'de> DeserializeAs<'de, U256> for HexU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        HexOrDecimalU256::deserialize_as(deserializer)
    }
}

impl SerializeAs<BigDecimal> for PlainDecimal {
    fn serialize_as<S>(source: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&big_decimal_to_plain_string(source))
    }
}

fn decode(s: &str) -> Result<U256, String> {
    let s = s.trim();
    match s.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16)
            .map_err(|err| format!("failed to decode {s:?} as hex u256: {err}")),
        None => U256::from_str_radix(s, 10)
            .map_err(|err| format!("failed to decode {s:?} as decimal u256: {err}")),
    }
}
