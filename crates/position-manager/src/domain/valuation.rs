use {
    super::{
        Error,
        coin::{ResolvedCoin, Token},
        eth::U256,
        liquidity,
        tick::{Range, Tick},
    },
    bigdecimal::BigDecimal,
    number::serialization::{HexOrDecimalU256, PlainDecimal},
    serde::Serialize,
    serde_with::serde_as,
    std::cmp,
};

/// Token amounts of a position, raw and in whole tokens.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Amounts {
    #[serde_as(as = "PlainDecimal")]
    pub amount0: BigDecimal,
    #[serde_as(as = "PlainDecimal")]
    pub amount1: BigDecimal,
    #[serde_as(as = "HexOrDecimalU256")]
    pub raw0: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub raw1: U256,
}

impl Amounts {
    pub fn new(token0: &Token, token1: &Token, raw0: U256, raw1: U256) -> Self {
        Self {
            amount0: token0.to_decimal(raw0),
            amount1: token1.to_decimal(raw1),
            raw0,
            raw1,
        }
    }
}

/// The token amounts a position over `lower..upper` holds at `current`.
///
/// With `liquidity` the position's own liquidity is valued. Without it, the
/// liquidity that the supplied amount of `coin0` (or else `coin1`) alone
/// buys is used, which makes this a quote for the other side of a deposit.
pub fn amounts_for_range(
    coin0: &ResolvedCoin,
    coin1: &ResolvedCoin,
    lower: Tick,
    upper: Tick,
    current: Tick,
    liquidity: Option<U256>,
) -> Result<Amounts, Error> {
    let range = Range::new(lower, upper)?;
    let (sqrt_a, sqrt_b) = (range.lower().sqrt_ratio(), range.upper().sqrt_ratio());
    let sqrt_current = current.sqrt_ratio();

    let liquidity = match liquidity {
        Some(liquidity) => liquidity,
        None => synthetic_liquidity(coin0, coin1, &range, current)?,
    };
    let (raw0, raw1) = liquidity::amounts_for_liquidity(sqrt_current, sqrt_a, sqrt_b, liquidity)?;
    Ok(Amounts::new(&coin0.token, &coin1.token, raw0, raw1))
}

fn synthetic_liquidity(
    coin0: &ResolvedCoin,
    coin1: &ResolvedCoin,
    range: &Range,
    current: Tick,
) -> Result<U256, Error> {
    let (lower, upper) = (range.lower(), range.upper());
    if !coin0.raw.is_zero() && current < upper {
        let from = cmp::max(current, lower).sqrt_ratio();
        return liquidity::liquidity_for_amount0(from, upper.sqrt_ratio(), coin0.raw);
    }
    if !coin1.raw.is_zero() && current > lower {
        let to = cmp::min(current, upper).sqrt_ratio();
        return liquidity::liquidity_for_amount1(lower.sqrt_ratio(), to, coin1.raw);
    }
    if coin0.raw.is_zero() && coin1.raw.is_zero() {
        return Err(Error::validation("either an amount or a liquidity is required"));
    }
    Err(Error::Validation(format!(
        "the supplied side cannot be deposited at tick {current} into range {lower}..{upper}"
    )))
}
