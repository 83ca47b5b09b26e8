//! Discrete tick coordinates of a concentrated liquidity pool and the exact
//! fixed point conversions between ticks and Q64.96 square root prices.

use {
    super::{Error, eth::U256},
    num::{BigInt, ToPrimitive, Zero},
    number::u256_ext::U256Ext,
    serde::{Deserialize, Serialize},
    std::fmt,
};

pub const MIN_TICK: i32 = -887_272;
pub const MAX_TICK: i32 = 887_272;

/// Square root price of [`MIN_TICK`] as a Q64.96 number.
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4_295_128_739, 0, 0, 0]);
/// Square root price of [`MAX_TICK`] as a Q64.96 number.
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([0x5d95_1d52_6398_8d26, 0xefd1_fc6a_5064_8849, 0xfffd_8963, 0]);

/// `sqrt(1.0001)^-(2^i)` as Q128.128 numbers for `i` in `1..20`.
const RATIO_MULTIPLIERS: [u128; 19] = [
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

/// `sqrt(1.0001^tick) * 2^96` for any tick whose magnitude fits the 20 bit
/// multiplier table, including candidates just outside the tick bounds.
fn sqrt_ratio_at(tick: i32) -> U256 {
    let abs = tick.unsigned_abs();
    let mut ratio = if abs & 1 != 0 {
        U256::from(0xfffcb933bd6fad37aa2d162d1a594001u128)
    } else {
        U256::from(1u64) << 128
    };
    for (bit, multiplier) in RATIO_MULTIPLIERS.iter().enumerate() {
        if abs & (1 << (bit + 1)) != 0 {
            ratio = (ratio * U256::from(*multiplier)) >> 128;
        }
    }
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }
    // Q128.128 to Q64.96, rounding up so that the inverse lands on the tick.
    let round_up = ratio & U256::from(u32::MAX) != U256::ZERO;
    (ratio >> 32) + U256::from(u8::from(round_up))
}

/// A tick in `[MIN_TICK, MAX_TICK]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Tick(i32);

impl Tick {
    pub const MAX: Tick = Tick(MAX_TICK);
    pub const MIN: Tick = Tick(MIN_TICK);

    pub fn new(tick: i32) -> Result<Self, Error> {
        if !(MIN_TICK..=MAX_TICK).contains(&tick) {
            return Err(Error::Validation(format!("tick {tick} out of bounds")));
        }
        Ok(Self(tick))
    }

    pub fn get(self) -> i32 {
        self.0
    }

    /// The next tick up, if there is one.
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1).ok()
    }

    /// `sqrt(1.0001^tick) * 2^96`, rounded up.
    pub fn sqrt_ratio(self) -> U256 {
        sqrt_ratio_at(self.0)
    }

    /// The greatest tick whose square root price is not above `sqrt_ratio`.
    ///
    /// Fails unless `MIN_SQRT_RATIO <= sqrt_ratio < MAX_SQRT_RATIO`.
    pub fn at_sqrt_ratio(sqrt_ratio: U256) -> Result<Self, Error> {
        if sqrt_ratio < MIN_SQRT_RATIO || sqrt_ratio >= MAX_SQRT_RATIO {
            return Err(Error::Validation(format!(
                "sqrt ratio {sqrt_ratio} out of bounds"
            )));
        }
        let x128 = sqrt_ratio.to_big_int() << 32u32;
        let msb = x128.bits() - 1;
        let mut r = if msb >= 128 {
            &x128 >> (msb - 127)
        } else {
            &x128 << (127 - msb)
        };

        let mut log_2 = (BigInt::from(msb) - 128) << 64u32;
        for i in 0..14u32 {
            r = (&r * &r) >> 127u32;
            let f = &r >> 128u32;
            log_2 += &f << (63 - i);
            if !f.is_zero() {
                r >>= 1u32;
            }
        }

        let log_sqrt10001 = log_2 * BigInt::from(255_738_958_999_603_826_347_141u128);
        let low = (&log_sqrt10001
            - BigInt::from(3_402_992_956_809_132_418_596_140_100_660_247_210u128))
            >> 128u32;
        let high = (&log_sqrt10001
            + BigInt::from(291_339_464_771_989_622_907_027_621_153_398_088_495u128))
            >> 128u32;
        let as_i32 = |value: &BigInt| {
            value
                .to_i32()
                .ok_or_else(|| Error::Validation(format!("tick {value} out of bounds")))
        };

        // Either candidate may sit one step outside the bounds, only the
        // chosen one has to be a valid tick.
        let (low, high) = (as_i32(&low)?, as_i32(&high)?);
        let tick = if low == high || sqrt_ratio_at(high) > sqrt_ratio {
            low
        } else {
            high
        };
        Tick::new(tick)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Pool fee in hundredths of a basis point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FeeTier {
    Lowest,
    Low,
    Medium,
    High,
}

impl FeeTier {
    pub fn pips(self) -> u32 {
        match self {
            Self::Lowest => 100,
            Self::Low => 500,
            Self::Medium => 3000,
            Self::High => 10_000,
        }
    }

    pub fn tick_spacing(self) -> i32 {
        match self {
            Self::Lowest => 1,
            Self::Low => 10,
            Self::Medium => 60,
            Self::High => 200,
        }
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = Error;

    fn try_from(pips: u32) -> Result<Self, Self::Error> {
        match pips {
            100 => Ok(Self::Lowest),
            500 => Ok(Self::Low),
            3000 => Ok(Self::Medium),
            10_000 => Ok(Self::High),
            other => Err(Error::Validation(format!("unsupported fee tier {other}"))),
        }
    }
}

impl From<FeeTier> for u32 {
    fn from(fee: FeeTier) -> Self {
        fee.pips()
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pips().fmt(f)
    }
}

/// Rounds `tick` to the nearest multiple of `spacing` (ties towards positive
/// infinity), stepping one spacing inwards if that leaves the tick bounds.
pub fn nearest_usable_tick(tick: Tick, spacing: i32) -> Result<Tick, Error> {
    if spacing <= 0 {
        return Err(Error::Validation(format!("invalid tick spacing {spacing}")));
    }
    let (tick, spacing) = (i64::from(tick.get()), i64::from(spacing));
    let rounded = (2 * tick + spacing).div_euclid(2 * spacing) * spacing;
    let usable = if rounded < i64::from(MIN_TICK) {
        rounded + spacing
    } else if rounded > i64::from(MAX_TICK) {
        rounded - spacing
    } else {
        rounded
    };
    i32::try_from(usable)
        .map_err(|_| Error::Validation(format!("tick {usable} out of bounds")))
        .and_then(Tick::new)
}

/// A position's tick range, `lower < upper`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Range {
    lower: Tick,
    upper: Tick,
}

impl Range {
    pub fn new(lower: Tick, upper: Tick) -> Result<Self, Error> {
        if lower >= upper {
            return Err(Error::Validation(format!(
                "lower tick {lower} must be below upper tick {upper}"
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> Tick {
        self.lower
    }

    pub fn upper(&self) -> Tick {
        self.upper
    }
}
