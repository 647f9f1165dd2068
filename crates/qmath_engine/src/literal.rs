//! Rational literal parser.
//!
//! Accepts the literal forms of the calculator tradition: decimal integers
//! and fractions (`42`, `3/10`), decimal point notation (`0.5`, `.5`),
//! exponential notation (`1e10`, `2.5e-3`), hex (`0x2a`), octal with a
//! leading zero (`052`) and binary (`0b101`).
//!
//! The parser itself permits a zero denominator (`"1/0"` parses); rejecting
//! it is a policy decision that belongs to the conversion layer, which is why
//! the result is a raw numerator/denominator pair rather than a reduced
//! rational.

use num_bigint::BigInt;
use num_traits::{Num, One, Pow, Zero};
use thiserror::Error;

/// Unreduced numerator/denominator pair produced by [`parse_literal`].
///
/// The sign is carried by the numerator; the denominator is non-negative
/// (zero only for explicit zero-denominator fractions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRational {
    pub num: BigInt,
    pub den: BigInt,
}

impl RawRational {
    fn integer(num: BigInt) -> Self {
        RawRational {
            num,
            den: BigInt::one(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("empty numeric literal")]
    Empty,
    #[error("invalid numeric literal '{0}'")]
    Invalid(String),
}

/// Parse a numeric literal into a raw numerator/denominator pair.
///
/// # Edge cases
/// - `"1/0"` parses (denominator zero); callers reject it.
/// - A solitary sign, or trailing garbage, is `LiteralError::Invalid`.
pub fn parse_literal(input: &str) -> Result<RawRational, LiteralError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(LiteralError::Empty);
    }

    let (negative, body) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    if body.is_empty() {
        return Err(LiteralError::Invalid(input.to_string()));
    }

    // Fraction form: each side is an unsigned prefixed or decimal integer.
    let mut raw = if let Some((n, d)) = body.split_once('/') {
        let num = parse_unsigned_integer(n).ok_or_else(|| invalid(input))?;
        let den = parse_unsigned_integer(d).ok_or_else(|| invalid(input))?;
        RawRational { num, den }
    } else if let Some(rest) = prefixed(body, "0x", "0X") {
        RawRational::integer(
            BigInt::from_str_radix(rest, 16).map_err(|_| invalid(input))?,
        )
    } else if let Some(rest) = prefixed(body, "0b", "0B") {
        RawRational::integer(
            BigInt::from_str_radix(rest, 2).map_err(|_| invalid(input))?,
        )
    } else if is_octal(body) {
        RawRational::integer(
            BigInt::from_str_radix(&body[1..], 8).map_err(|_| invalid(input))?,
        )
    } else {
        parse_decimal(body).ok_or_else(|| invalid(input))?
    };

    if negative {
        raw.num = -raw.num;
    }
    Ok(raw)
}

fn invalid(input: &str) -> LiteralError {
    LiteralError::Invalid(input.to_string())
}

fn prefixed<'a>(s: &'a str, lower: &str, upper: &str) -> Option<&'a str> {
    s.strip_prefix(lower)
        .or_else(|| s.strip_prefix(upper))
        .filter(|rest| !rest.is_empty())
}

fn is_octal(s: &str) -> bool {
    s.len() > 1 && s.starts_with('0') && s.bytes().all(|b| b.is_ascii_digit()) && !s.contains('8')
        && !s.contains('9')
}

fn parse_unsigned_integer(s: &str) -> Option<BigInt> {
    if s.is_empty() {
        return None;
    }
    if let Some(rest) = prefixed(s, "0x", "0X") {
        return BigInt::from_str_radix(rest, 16).ok();
    }
    if let Some(rest) = prefixed(s, "0b", "0B") {
        return BigInt::from_str_radix(rest, 2).ok();
    }
    if is_octal(s) {
        return BigInt::from_str_radix(&s[1..], 8).ok();
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok();
    }
    None
}

/// Decimal form with optional fraction digits and optional exponent:
/// `123`, `1.5`, `.5`, `1e10`, `2.5e-3`.
fn parse_decimal(s: &str) -> Option<RawRational> {
    let (mantissa, exponent) = match s.split_once(['e', 'E']) {
        Some((m, e)) => {
            let exp: i64 = e.parse().ok()?;
            (m, exp)
        }
        None => (s, 0),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let digits = format!("{}{}", int_part, frac_part);
    let num: BigInt = if digits.is_empty() {
        BigInt::zero()
    } else {
        digits.parse().ok()?
    };

    // value = digits * 10^(exponent - frac_len)
    let shift = exponent - frac_part.len() as i64;
    let ten = BigInt::from(10u32);
    Some(if shift >= 0 {
        RawRational::integer(num * ten.pow(shift as u64))
    } else {
        RawRational {
            num,
            den: ten.pow((-shift) as u64),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(s: &str) -> (i64, i64) {
        let r = parse_literal(s).unwrap();
        (
            i64::try_from(&r.num).unwrap(),
            i64::try_from(&r.den).unwrap(),
        )
    }

    #[test]
    fn parses_integers_and_fractions() {
        assert_eq!(parsed("42"), (42, 1));
        assert_eq!(parsed("-42"), (-42, 1));
        assert_eq!(parsed("3/10"), (3, 10));
        assert_eq!(parsed("-3/10"), (-3, 10));
    }

    #[test]
    fn parses_decimal_and_exponent_forms() {
        assert_eq!(parsed("0.5"), (5, 10));
        assert_eq!(parsed(".5"), (5, 10));
        assert_eq!(parsed("1e3"), (1000, 1));
        assert_eq!(parsed("2.5e-3"), (25, 10000));
        assert_eq!(parsed("1e-10"), (1, 10_000_000_000));
    }

    #[test]
    fn parses_prefixed_radix_forms() {
        assert_eq!(parsed("0x2a"), (42, 1));
        assert_eq!(parsed("052"), (42, 1));
        assert_eq!(parsed("0b101"), (5, 1));
        assert_eq!(parsed("-0x10"), (-16, 1));
    }

    #[test]
    fn zero_denominator_parses() {
        let r = parse_literal("1/0").unwrap();
        assert!(r.den.is_zero());
        assert!(r.num.is_one());
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "-", "1.2.3", "0x", "cat", "1e", "1//2"] {
            assert!(parse_literal(bad).is_err(), "{bad:?} should not parse");
        }
    }
}
