//! Value normalization: any acceptable host value becomes a canonical
//! number handle (or a complex handle).
//!
//! Conversion policy:
//! - machine integers embed exactly;
//! - big integers try the machine-word fast path first and fall back to a
//!   decimal-string round trip on overflow, because the fast conversion
//!   refuses rather than saturates and the string channel is the only
//!   overflow-safe one;
//! - ratios convert through their numerator/denominator pair;
//! - floats become the exact fraction equal to their IEEE value, never a
//!   decimal approximation;
//! - strings go through the engine literal parser when the call site allows
//!   them, and a parser-accepted zero denominator is rejected here.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use crate::complex::Complex;
use crate::error::{CalcError, CalcResult};
use crate::number::Number;
use crate::value::HostValue;
use qmath_engine::{literal, printer};

fn accepted_types(allow_string: bool) -> CalcError {
    if allow_string {
        CalcError::type_error("expected integer, big integer, ratio, float, number or string")
    } else {
        CalcError::type_error("expected integer, big integer, ratio, float or number")
    }
}

/// Convert `value` into a canonical number handle.
pub fn to_number(value: &HostValue, allow_string: bool) -> CalcResult<Number> {
    match value {
        HostValue::Int(v) => Ok(Number::from(*v)),
        HostValue::Big(v) => Ok(big_to_number(v)),
        HostValue::Ratio(n, d) => ratio_to_number(n, d),
        HostValue::Float(v) => float_to_number(*v),
        HostValue::Number(n) => Ok(n.link()),
        HostValue::Text(s) if allow_string => text_to_number(s),
        _ => Err(accepted_types(allow_string)),
    }
}

/// Fast machine-word path, then the decimal-string channel for magnitudes
/// that do not fit.
fn big_to_number(v: &BigInt) -> Number {
    if let Some(small) = v.to_i64() {
        return Number::from(small);
    }
    tracing::debug!("big integer exceeds the machine word; converting via string");
    let text = printer::integer_string(v);
    let parsed: BigInt = text.parse().expect("decimal string of an integer reparses");
    Number::from_bigint(parsed)
}

/// Ratio parts are each normalized (they may individually exceed the machine
/// word) and combined by division.
fn ratio_to_number(n: &BigInt, d: &BigInt) -> CalcResult<Number> {
    if d.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    let num = big_to_number(n);
    let den = big_to_number(d);
    Ok(Number::from_raw(num.as_ratio() / den.as_ratio()))
}

/// Exact IEEE fraction: 0.5 becomes 1/2, 0.3 becomes the full binade
/// expansion 5404319552844595/18014398509481984.
fn float_to_number(v: f64) -> CalcResult<Number> {
    if !v.is_finite() {
        return Err(CalcError::type_error(format!(
            "{} cannot be converted to an exact number",
            v
        )));
    }
    let exact = BigRational::from_float(v)
        .ok_or_else(|| CalcError::type_error("float is not an exact value"))?;
    Ok(Number::from_raw(exact))
}

fn text_to_number(s: &str) -> CalcResult<Number> {
    let raw = literal::parse_literal(s).map_err(|e| CalcError::Parse(e.to_string()))?;
    // the engine parser permits a zero denominator
    if raw.den.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    Ok(Number::from_raw(BigRational::new(raw.num, raw.den)))
}

/// Convert `value` into a complex handle. Strings are not accepted; every
/// real-convertible type promotes with a zero imaginary part.
pub fn to_complex(value: &HostValue) -> CalcResult<Complex> {
    match value {
        HostValue::Cplx(c) => Ok(c.clone()),
        HostValue::Int(_)
        | HostValue::Big(_)
        | HostValue::Ratio(_, _)
        | HostValue::Float(_)
        | HostValue::Number(_) => {
            let re = to_number(value, false)?;
            Ok(Complex::from_real(&re))
        }
        _ => Err(CalcError::type_error("expected a numeric or complex value")),
    }
}

/// Project a value onto a machine-word integer, for count/flag parameters.
pub fn to_machine_int(value: &HostValue) -> CalcResult<i64> {
    if let HostValue::Int(v) = value {
        return Ok(*v);
    }
    let n = to_number(value, false)?;
    if !n.is_integer() {
        return Err(CalcError::type_error(format!(
            "fraction ({}) can't be converted to a machine integer",
            n
        )));
    }
    n.as_ratio().numer().to_i64().ok_or_else(|| {
        CalcError::type_error(format!("{} is too large to convert to a machine integer", n))
    })
}
