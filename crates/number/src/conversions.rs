use {
    bigdecimal::BigDecimal,
    num::{BigInt, BigRational, BigUint, Integer, Signed, Zero},
    std::str::FromStr,
};

/// Splits a plain non-negative decimal number into its digits (with the dot
/// removed) and the number of fractional digits.
///
/// Accepts `digits`, `digits.digits` and `.digits`. Everything else (signs,
/// exponents, whitespace, a trailing dot) is rejected. Floats are never
/// involved, so `"0.1"` is exactly `(1, 1)`.
pub fn split_unsigned_decimal(s: &str) -> Option<(BigUint, u32)> {
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => ("", s),
    };
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if fraction.is_empty() || !is_digits(whole) || !is_digits(fraction) {
        return None;
    }
    // Without a dot the whole input ends up in `fraction` and has no scale.
    let scale = if s.contains('.') {
        u32::try_from(fraction.len()).ok()?
    } else {
        0
    };
    let digits = BigUint::from_str(&format!("{whole}{fraction}")).ok()?;
    Some((digits, scale))
}

/// Exact rational value of a plain non-negative decimal string.
pub fn big_rational_from_decimal_str(s: &str) -> Option<BigRational> {
    let (digits, scale) = split_unsigned_decimal(s)?;
    Some(BigRational::new(
        BigInt::from(digits),
        BigInt::from(10u32).pow(scale),
    ))
}

/// Renders a rational as a plain decimal string (no exponent) with exactly
/// `fraction_digits` digits after the dot, truncating the rest.
///
/// The output always parses back with [`split_unsigned_decimal`] when the
/// value is non-negative.
pub fn big_rational_to_plain_decimal(value: &BigRational, fraction_digits: u32) -> String {
    let scale = BigInt::from(10u32).pow(fraction_digits);
    let scaled = (value.numer().abs() * &scale).div_floor(value.denom());
    let (whole, fraction) = scaled.div_rem(&scale);
    let sign = if value.is_negative() && !scaled.is_zero() {
        "-"
    } else {
        ""
    };
    if fraction_digits == 0 {
        return format!("{sign}{whole}");
    }
    let width = usize::try_from(fraction_digits).unwrap_or(usize::MAX);
    format!("{sign}{whole}.{fraction:0>width$}")
}

/// Renders a [`BigDecimal`] without exponent notation and without trailing
/// fractional zeros, e.g. `0.9854` or `1500`.
pub fn big_decimal_to_plain_string(value: &BigDecimal) -> String {
    let (digits, scale) = value.normalized().into_bigint_and_exponent();
    if scale <= 0 {
        let zeros = u32::try_from(scale.unsigned_abs()).unwrap_or(u32::MAX);
        return (digits * BigInt::from(10u32).pow(zeros)).to_string();
    }
    let sign = if digits.is_negative() { "-" } else { "" };
    let digits = digits.magnitude().to_string();
    let scale = usize::try_from(scale).unwrap_or(usize::MAX);
    let padded = format!("{digits:0>width$}", width = scale.saturating_add(1));
    let (whole, fraction) = padded.split_at(padded.len() - scale);
    format!("{sign}{whole}.{fraction}")
}

#[cfg(test)]
mod tests {
    use {super::*, num::One};

    #[test]
    fn splits_plain_decimals() {
        assert_eq!(
            split_unsigned_decimal("1800.00"),
            Some((BigUint::from(180000u32), 2))
        );
        assert_eq!(split_unsigned_decimal("42"), Some((BigUint::from(42u32), 0)));
        assert_eq!(split_unsigned_decimal(".5"), Some((BigUint::from(5u32), 1)));
        assert_eq!(
            split_unsigned_decimal("0.0001"),
            Some((BigUint::from(1u32), 4))
        );
    }

    #[test]
    fn rejects_malformed_decimals() {
        for input in ["", ".", "1.", "-1", "+1", "1e3", "1.2.3", " 1", "abc", "1,5"] {
            assert_eq!(split_unsigned_decimal(input), None, "{input:?}");
        }
    }

    #[test]
    fn exact_rational_from_decimal_str() {
        assert_eq!(
            big_rational_from_decimal_str("0.125").unwrap(),
            BigRational::new(1.into(), 8.into())
        );
        assert_eq!(
            big_rational_from_decimal_str("1.000").unwrap(),
            BigRational::one()
        );
        assert!(big_rational_from_decimal_str("-0.1").is_none());
    }

    #[test]
    fn big_decimal_without_exponent() {
        let cases = [
            ("0.9854", "0.9854"),
            ("1500", "1500"),
            ("1.500", "1.5"),
            ("0", "0"),
            ("0.000000000000000001", "0.000000000000000001"),
            ("-0.25", "-0.25"),
            ("1e21", "1000000000000000000000"),
        ];
        for (input, expected) in cases {
            let value = BigDecimal::from_str(input).unwrap();
            assert_eq!(big_decimal_to_plain_string(&value), expected, "{input}");
        }
    }

    #[test]
    fn renders_plain_decimals() {
        let value = BigRational::new(1801.into(), 1.into());
        assert_eq!(big_rational_to_plain_decimal(&value, 2), "1801.00");

        let value = BigRational::new(1.into(), 3.into());
        assert_eq!(big_rational_to_plain_decimal(&value, 5), "0.33333");
        assert_eq!(big_rational_to_plain_decimal(&value, 0), "0");

        let value = BigRational::new(1.into(), 1000.into());
        assert_eq!(big_rational_to_plain_decimal(&value, 3), "0.001");

        let value = BigRational::new((-3).into(), 2.into());
        assert_eq!(big_rational_to_plain_decimal(&value, 1), "-1.5");
    }
}
