//! Decimal printing of exact rationals.
//!
//! The engine has no floating-point representation; everything that needs a
//! decimal rendering (display, float projection, oversized integer
//! projection) goes through these functions.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Pow, Signed, Zero};

/// Decimal string of an integer value.
pub fn integer_string(n: &BigInt) -> String {
    n.to_string()
}

/// True if the value has a terminating decimal expansion
/// (denominator of the form 2^a * 5^b).
pub fn is_finite_decimal(q: &BigRational) -> bool {
    finite_decimal_places(q).is_some()
}

/// Number of fraction digits of a terminating decimal expansion
/// (max of the 2- and 5-adic valuations of the denominator), or `None`
/// when the expansion repeats.
pub fn finite_decimal_places(q: &BigRational) -> Option<usize> {
    let mut d = q.denom().clone();
    let mut places = 0usize;
    for p in [2u32, 5] {
        let p = BigInt::from(p);
        let mut count = 0usize;
        while (&d % &p).is_zero() {
            d /= &p;
            count += 1;
        }
        places = places.max(count);
    }
    (d == BigInt::from(1)).then_some(places)
}

/// Fixed-point decimal string, truncated toward zero after `places` fraction
/// digits. Trailing zeros of an exact expansion are trimmed; an inexact
/// rendering keeps all `places` digits.
pub fn decimal_string(q: &BigRational, places: usize) -> String {
    let sign = if q.is_negative() { "-" } else { "" };
    let abs = q.abs();
    let int = abs.trunc().to_integer();
    let mut frac = abs.fract();

    if frac.is_zero() {
        return format!("{}{}", sign, int);
    }

    let scale = BigInt::from(10u32).pow(places as u64);
    let scaled = (frac.numer() * &scale).div_floor(frac.denom());
    let mut digits = format!("{:0>width$}", scaled, width = places);

    // exact expansion: trim trailing zeros
    frac *= BigRational::from_integer(scale);
    if frac.is_integer() {
        while digits.ends_with('0') {
            digits.pop();
        }
    }
    if digits.is_empty() {
        return format!("{}{}", sign, int);
    }
    format!("{}{}.{}", sign, int, digits)
}

/// Scientific-notation string with `sig` significant digits, suitable for
/// reparsing by the host float parser. Zero prints as `"0"`.
pub fn scientific_string(q: &BigRational, sig: usize) -> String {
    if q.is_zero() {
        return "0".to_string();
    }
    let sign = if q.is_negative() { "-" } else { "" };
    let abs = q.abs();
    let exp = decimal_exponent(&abs);

    // mantissa = trunc(|q| * 10^(sig-1-exp)), giving `sig` digits
    let shift = sig as i64 - 1 - exp;
    let ten = BigInt::from(10u32);
    let scaled = if shift >= 0 {
        abs * BigRational::from_integer(ten.pow(shift as u64))
    } else {
        abs / BigRational::from_integer(ten.pow((-shift) as u64))
    };
    let mantissa = scaled.trunc().to_integer();
    format!("{}{}e{}", sign, mantissa, exp - (sig as i64 - 1))
}

/// Exponent `e` such that `10^e <= |q| < 10^(e+1)`; `q` must be nonzero.
fn decimal_exponent(abs: &BigRational) -> i64 {
    // digit-count estimate, then correct by comparison
    let mut e = abs.numer().to_string().trim_start_matches('-').len() as i64
        - abs.denom().to_string().len() as i64;
    while pow10(e + 1) <= *abs {
        e += 1;
    }
    while pow10(e) > *abs {
        e -= 1;
    }
    e
}

fn pow10(e: i64) -> BigRational {
    let ten = BigInt::from(10u32);
    if e >= 0 {
        BigRational::from_integer(ten.pow(e as u64))
    } else {
        BigRational::new(BigInt::from(1), ten.pow((-e) as u64))
    }
}
