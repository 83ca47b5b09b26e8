//! Extension trait for U256 arithmetic operations.

use {
    alloy::primitives::U256,
    anyhow::Result,
    num::{BigInt, BigRational, BigUint, Zero, bigint::Sign},
};

/// Extension trait for U256 to bridge into arbitrary precision arithmetic.
pub trait U256Ext: Sized {
    /// Adds `percent` percent of `self` on top of `self`, rounding the added
    /// part down: `self + self * percent / 100`.
    fn checked_add_percent(&self, percent: u64) -> Option<Self>;

    /// Convert to BigInt.
    fn to_big_int(&self) -> BigInt;

    /// Convert to BigUint.
    fn to_big_uint(&self) -> BigUint;

    /// Convert to BigRational.
    fn to_big_rational(&self) -> BigRational;

    /// Create from BigInt.
    fn from_big_int(input: &BigInt) -> Result<Self>;

    /// Create from BigUint.
    fn from_big_uint(input: &BigUint) -> Result<Self>;

    /// Create from BigRational, rounding towards zero.
    fn from_big_rational(value: &BigRational) -> Result<Self>;
}

impl U256Ext for U256 {
    fn checked_add_percent(&self, percent: u64) -> Option<Self> {
        let extra = self
            .checked_mul(U256::from(percent))?
            .checked_div(U256::from(100u64))?;
        self.checked_add(extra)
    }

    fn to_big_int(&self) -> BigInt {
        BigInt::from_biguint(Sign::Plus, self.to_big_uint())
    }

    fn to_big_uint(&self) -> BigUint {
        BigUint::from_bytes_be(self.to_be_bytes::<32>().as_slice())
    }

    fn to_big_rational(&self) -> BigRational {
        BigRational::from_integer(self.to_big_int())
    }

    fn from_big_int(input: &BigInt) -> Result<Self> {
        anyhow::ensure!(input.sign() != Sign::Minus, "negative");
        Self::from_big_uint(input.magnitude())
    }

    fn from_big_uint(input: &BigUint) -> Result<Self> {
        let bytes = input.to_bytes_be();
        anyhow::ensure!(bytes.len() <= 32, "too large");
        Ok(U256::from_be_slice(&bytes))
    }

    fn from_big_rational(value: &BigRational) -> Result<Self> {
        anyhow::ensure!(!value.denom().is_zero(), "zero denominator");
        Self::from_big_int(&(value.numer() / value.denom()))
    }
}
