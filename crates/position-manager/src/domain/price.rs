//! Exact conversions between human entered decimal prices and ticks.
//!
//! Prices are always the amount of `quote` paid for one `base`. Internally
//! they are kept as exact rationals over raw token units and are never
//! rounded through floating point.

use {
    super::{
        coin::Token,
        eth::U256,
        Error,
        tick::{self, FeeTier, MAX_SQRT_RATIO, MIN_SQRT_RATIO, Tick},
    },
    num::{BigInt, BigRational, BigUint, One, Zero},
    number::{
        conversions::{big_rational_to_plain_decimal, split_unsigned_decimal},
        u256_ext::U256Ext,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price<'a> {
    base: &'a Token,
    quote: &'a Token,
    /// Raw `quote` units per raw `base` unit.
    raw: BigRational,
}

impl<'a> Price<'a> {
    pub fn new(base: &'a Token, quote: &'a Token, raw: BigRational) -> Self {
        Self { base, quote, raw }
    }

    /// Parses a plain decimal price such as `"1800.00"` into an exact price.
    pub fn parse(base: &'a Token, quote: &'a Token, value: &str) -> Option<Self> {
        let (digits, scale) = split_unsigned_decimal(value)?;
        let numerator = digits * pow10(u32::from(quote.decimals));
        let denominator = pow10(scale) * pow10(u32::from(base.decimals));
        Some(Self::new(
            base,
            quote,
            BigRational::new(numerator.into(), denominator.into()),
        ))
    }

    /// Whole `quote` tokens per whole `base` token.
    pub fn adjusted(&self) -> BigRational {
        &self.raw * BigRational::new(
            pow10(u32::from(self.base.decimals)).into(),
            pow10(u32::from(self.quote.decimals)).into(),
        )
    }

    /// The adjusted price as a plain decimal string, truncated to
    /// `fraction_digits` digits.
    pub fn to_plain_decimal(&self, fraction_digits: u32) -> String {
        big_rational_to_plain_decimal(&self.adjusted(), fraction_digits)
    }

    fn sorted(&self) -> bool {
        self.base.sorts_before(self.quote)
    }
}

fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}

/// `floor(sqrt(numerator * 2^192 / denominator))`.
fn encode_sqrt_ratio_x96(numerator: &BigInt, denominator: &BigInt) -> Option<BigUint> {
    if denominator.is_zero() {
        return None;
    }
    let ratio = (numerator << 192u32) / denominator;
    ratio.to_biguint().map(|ratio| ratio.sqrt())
}

/// Parses a decimal price into the closest usable tick of a pool with the
/// given fee tier. Prices beyond the representable range map to the minimum
/// or maximum usable tick.
///
/// Returns `None` for anything that is not a plain non-negative decimal.
pub fn try_parse_tick(base: &Token, quote: &Token, fee: FeeTier, value: &str) -> Option<Tick> {
    let price = Price::parse(base, quote, value)?;
    let sqrt_ratio = encode_sqrt_ratio_x96(price.raw.numer(), price.raw.denom())?;
    let tick = if sqrt_ratio >= MAX_SQRT_RATIO.to_big_uint() {
        Tick::MAX
    } else if sqrt_ratio <= MIN_SQRT_RATIO.to_big_uint() {
        Tick::MIN
    } else {
        price_to_closest_tick(&price).ok()?
    };
    tick::nearest_usable_tick(tick, fee.tick_spacing()).ok()
}

/// The tick whose price is closest to `price`, without spacing alignment.
pub fn price_to_closest_tick(price: &Price) -> Result<Tick, Error> {
    let sorted = price.sorted();
    let sqrt_ratio = if sorted {
        encode_sqrt_ratio_x96(price.raw.numer(), price.raw.denom())
    } else {
        encode_sqrt_ratio_x96(price.raw.denom(), price.raw.numer())
    };
    let Some(sqrt_ratio) = sqrt_ratio else {
        return Ok(if sorted { Tick::MAX } else { Tick::MIN });
    };
    let mut tick = match U256::from_big_uint(&sqrt_ratio) {
        Ok(sqrt_ratio) if sqrt_ratio < MIN_SQRT_RATIO => Tick::MIN,
        Ok(sqrt_ratio) if sqrt_ratio < MAX_SQRT_RATIO => Tick::at_sqrt_ratio(sqrt_ratio)?,
        _ => Tick::MAX,
    };

    if let Some(next) = tick.next() {
        let next_price = tick_to_price(price.base, price.quote, next);
        let reached = if sorted {
            price.raw >= next_price.raw
        } else {
            price.raw <= next_price.raw
        };
        if reached {
            tick = next;
        }
    }
    Ok(tick)
}

/// The exact price of `base` in `quote` at `tick`.
pub fn tick_to_price<'a>(base: &'a Token, quote: &'a Token, tick: Tick) -> Price<'a> {
    let sqrt_ratio = tick.sqrt_ratio().to_big_int();
    let ratio_x192 = &sqrt_ratio * &sqrt_ratio;
    let q192 = BigInt::one() << 192u32;
    let raw = if base.sorts_before(quote) {
        BigRational::new(ratio_x192, q192)
    } else {
        BigRational::new(q192, ratio_x192)
    };
    Price::new(base, quote, raw)
}
