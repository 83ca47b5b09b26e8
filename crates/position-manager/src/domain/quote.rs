use {
    super::{
        Error,
        coin::ResolvedCoin,
        eth::U256,
        position::{Pool, Side},
        tick::{Range, Tick},
        valuation::{self, Amounts},
    },
    number::u256_ext::U256Ext,
};

/// The amounts of a deposit into `range` at `current` that supplies exactly
/// `supplied` of the `side` token. The other side is scaled to match.
pub fn pair_amounts(
    pool: &Pool,
    range: Range,
    current: Tick,
    side: Side,
    supplied: U256,
) -> Result<Amounts, Error> {
    let coin = |of: Side| {
        let raw = if of == side { supplied } else { U256::ZERO };
        ResolvedCoin::new(pool.token(of).clone(), raw)
    };
    let valued = valuation::amounts_for_range(
        &coin(Side::Token0),
        &coin(Side::Token1),
        range.lower(),
        range.upper(),
        current,
        None,
    )?;
    let (given, other) = match side {
        Side::Token0 => (valued.raw0, valued.raw1),
        Side::Token1 => (valued.raw1, valued.raw0),
    };
    if given.is_zero() {
        return Err(Error::Validation(format!(
            "{} is too small to deposit",
            pool.token(side).symbol
        )));
    }
    let other = other.to_big_uint() * supplied.to_big_uint() / given.to_big_uint();
    let other = U256::from_big_uint(&other)
        .map_err(|err| Error::Validation(format!("quote: {err}")))?;
    let (raw0, raw1) = match side {
        Side::Token0 => (supplied, other),
        Side::Token1 => (other, supplied),
    };
    Ok(Amounts::new(&pool.token0, &pool.token1, raw0, raw1))
}
