use {
    crate::{conversions::split_unsigned_decimal, u256_ext::U256Ext},
    alloy::primitives::U256,
    anyhow::{Context, Result, ensure},
    bigdecimal::BigDecimal,
    num::{BigInt, BigUint},
};

/// Converts a human decimal amount (e.g. `"1.5"`) into the token's raw integer
/// units: `amount * 10^decimals`.
///
/// Fails if the string is not a plain non-negative decimal, if it has more
/// fractional digits than the token supports or if the result does not fit
/// into 256 bits.
pub fn to_raw(amount: &str, decimals: u8) -> Result<U256> {
    let (digits, scale) = split_unsigned_decimal(amount)
        .with_context(|| format!("cannot parse amount {amount:?}"))?;
    let decimals = u32::from(decimals);
    ensure!(
        scale <= decimals,
        "amount {amount:?} has more than {decimals} fractional digits"
    );
    let raw = digits * BigUint::from(10u32).pow(decimals - scale);
    U256::from_big_uint(&raw).with_context(|| format!("amount {amount:?} is too large"))
}

/// Converts raw integer token units into an exact human decimal amount.
pub fn from_raw(raw: U256, decimals: u8) -> BigDecimal {
    BigDecimal::new(BigInt::from(raw.to_big_uint()), i64::from(decimals))
}
