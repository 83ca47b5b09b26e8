//! Conversions between a liquidity value and the token amounts it
//! represents within a price range. Square root prices are Q64.96 numbers,
//! bounds passed in reverse order are swapped and every division rounds
//! down.

use {
    super::{Error, eth::U256},
    num::{BigUint, One},
    number::u256_ext::U256Ext,
    std::cmp,
};

fn q96() -> BigUint {
    BigUint::one() << 96u32
}

fn ordered(sqrt_a: U256, sqrt_b: U256) -> Result<(BigUint, BigUint), Error> {
    let (lower, upper) = if sqrt_a > sqrt_b {
        (sqrt_b, sqrt_a)
    } else {
        (sqrt_a, sqrt_b)
    };
    if lower == upper {
        return Err(Error::validation("empty price range"));
    }
    if lower.is_zero() {
        return Err(Error::validation("zero sqrt price"));
    }
    Ok((lower.to_big_uint(), upper.to_big_uint()))
}

fn to_u256(value: BigUint) -> Result<U256, Error> {
    U256::from_big_uint(&value)
        .map_err(|_| Error::Validation(format!("{value} overflows 256 bits")))
}

/// Liquidity bought by `amount0` of token0 over the range.
pub fn liquidity_for_amount0(sqrt_a: U256, sqrt_b: U256, amount0: U256) -> Result<U256, Error> {
    let (a, b) = ordered(sqrt_a, sqrt_b)?;
    let intermediate = &a * &b / q96();
    to_u256(amount0.to_big_uint() * intermediate / (b - a))
}

/// Liquidity bought by `amount1` of token1 over the range.
pub fn liquidity_for_amount1(sqrt_a: U256, sqrt_b: U256, amount1: U256) -> Result<U256, Error> {
    let (a, b) = ordered(sqrt_a, sqrt_b)?;
    to_u256(amount1.to_big_uint() * q96() / (b - a))
}

/// The most liquidity that `amount0` and `amount1` can buy at the current
/// price.
pub fn liquidity_for_amounts(
    sqrt_current: U256,
    sqrt_a: U256,
    sqrt_b: U256,
    amount0: U256,
    amount1: U256,
) -> Result<U256, Error> {
    let (lower, upper) = (cmp::min(sqrt_a, sqrt_b), cmp::max(sqrt_a, sqrt_b));
    if sqrt_current <= lower {
        liquidity_for_amount0(lower, upper, amount0)
    } else if sqrt_current < upper {
        Ok(cmp::min(
            liquidity_for_amount0(sqrt_current, upper, amount0)?,
            liquidity_for_amount1(lower, sqrt_current, amount1)?,
        ))
    } else {
        liquidity_for_amount1(lower, upper, amount1)
    }
}

pub fn amount0_for_liquidity(sqrt_a: U256, sqrt_b: U256, liquidity: U256) -> Result<U256, Error> {
    let (a, b) = ordered(sqrt_a, sqrt_b)?;
    to_u256((liquidity.to_big_uint() << 96u32) * (&b - &a) / b / a)
}

pub fn amount1_for_liquidity(sqrt_a: U256, sqrt_b: U256, liquidity: U256) -> Result<U256, Error> {
    let (a, b) = ordered(sqrt_a, sqrt_b)?;
    to_u256(liquidity.to_big_uint() * (b - a) / q96())
}

/// The token amounts `liquidity` is worth at the current price. The side
/// that is out of range is zero.
pub fn amounts_for_liquidity(
    sqrt_current: U256,
    sqrt_a: U256,
    sqrt_b: U256,
    liquidity: U256,
) -> Result<(U256, U256), Error> {
    let (lower, upper) = (cmp::min(sqrt_a, sqrt_b), cmp::max(sqrt_a, sqrt_b));
    ordered(lower, upper)?;
    if sqrt_current <= lower {
        Ok((amount0_for_liquidity(lower, upper, liquidity)?, U256::ZERO))
    } else if sqrt_current < upper {
        Ok((
            amount0_for_liquidity(sqrt_current, upper, liquidity)?,
            amount1_for_liquidity(lower, sqrt_current, liquidity)?,
        ))
    } else {
        Ok((U256::ZERO, amount1_for_liquidity(lower, upper, liquidity)?))
    }
}
