//! Splitting earned fees into the part a position can absorb and the part
//! left over.

use {
    super::{Error, coin::Token, eth::U256, position::Side},
    bigdecimal::BigDecimal,
    num::BigUint,
    number::{
        serialization::{HexOrDecimalU256, PlainDecimal},
        u256_ext::U256Ext,
    },
    serde::Serialize,
    serde_with::serde_as,
};

/// The part of the restaked fees that does not fit the position's token
/// ratio and stays in the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remainder {
    pub side: Side,
    pub raw: U256,
}

/// Computes the remainder of restaking `fees` into a position currently
/// holding `position` amounts of token0 and token1.
///
/// A position holding only one token absorbs only that token. Otherwise the
/// fees are matched at the position's token1 per token0 ratio. A position
/// holding nothing has no ratio to match against.
pub fn remainder(
    fees: (U256, U256),
    position: (U256, U256),
) -> Result<Option<Remainder>, Error> {
    let (fee0, fee1) = fees;
    let (held0, held1) = position;
    if held0.is_zero() && held1.is_zero() {
        return Err(Error::validation("position holds no tokens to match fees against"));
    }
    let remainder = if held0.is_zero() {
        Remainder {
            side: Side::Token0,
            raw: fee0,
        }
    } else if held1.is_zero() {
        Remainder {
            side: Side::Token1,
            raw: fee1,
        }
    } else {
        let needed1 = mul_div(fee0, held1, held0);
        if needed1 < fee1.to_big_uint() {
            Remainder {
                side: Side::Token1,
                raw: fee1 - truncate(needed1),
            }
        } else {
            let needed0 = mul_div(fee1, held0, held1);
            Remainder {
                side: Side::Token0,
                raw: fee0.saturating_sub(truncate(needed0)),
            }
        }
    };
    Ok((!remainder.raw.is_zero()).then_some(remainder))
}

fn mul_div(a: U256, b: U256, denominator: U256) -> BigUint {
    a.to_big_uint() * b.to_big_uint() / denominator.to_big_uint()
}

/// Callers only pass values bounded by a `U256` fee.
fn truncate(value: BigUint) -> U256 {
    U256::from_big_uint(&value).unwrap_or(U256::MAX)
}

/// A remainder as reported to the caller.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leftover {
    pub side: Side,
    pub symbol: String,
    #[serde_as(as = "HexOrDecimalU256")]
    pub raw: U256,
    #[serde_as(as = "PlainDecimal")]
    pub amount: BigDecimal,
}

impl Leftover {
    pub fn new(remainder: Remainder, token: &Token) -> Self {
        Self {
            side: remainder.side,
            symbol: token.symbol.clone(),
            raw: remainder.raw,
            amount: token.to_decimal(remainder.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(value: u128) -> U256 {
        U256::from(value)
    }

    #[test]
    fn excess_token1_is_kept() {
        // 0.9854 and 1.01 earned on a position holding both tokens 1:1.
        let fees = (u(985_400_000_000_000_000), u(1_010_000_000_000_000_000));
        let position = (u(5_000_000_000_000_000_000), u(5_000_000_000_000_000_000));
        assert_eq!(
            remainder(fees, position).unwrap(),
            Some(Remainder {
                side: Side::Token1,
                raw: u(24_600_000_000_000_000),
            })
        );
    }

    #[test]
    fn excess_token0_is_kept() {
        // The position needs two token1 per token0.
        let fees = (u(1_000), u(1_000));
        let position = (u(10), u(20));
        assert_eq!(
            remainder(fees, position).unwrap(),
            Some(Remainder {
                side: Side::Token0,
                raw: u(500),
            })
        );
    }

    #[test]
    fn one_sided_positions_keep_the_other_token() {
        let fees = (u(7), u(9));
        assert_eq!(
            remainder(fees, (U256::ZERO, u(1))).unwrap(),
            Some(Remainder {
                side: Side::Token0,
                raw: u(7),
            })
        );
        assert_eq!(
            remainder(fees, (u(1), U256::ZERO)).unwrap(),
            Some(Remainder {
                side: Side::Token1,
                raw: u(9),
            })
        );
    }

    #[test]
    fn matching_fees_leave_nothing() {
        assert_eq!(remainder((u(10), u(20)), (u(1), u(2))).unwrap(), None);
        assert_eq!(remainder((U256::ZERO, U256::ZERO), (u(1), u(2))).unwrap(), None);
    }

    #[test]
    fn empty_positions_have_no_ratio() {
        assert!(matches!(
            remainder((u(7), u(9)), (U256::ZERO, U256::ZERO)),
            Err(Error::Validation(_))
        ));
    }
}
