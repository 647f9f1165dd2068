//! The canonical number handle.
//!
//! A `Number` is an immutable, reference-counted, exact rational value in
//! lowest terms with the sign carried by the numerator. Aliasing is explicit:
//! [`Number::link`] bumps the count and returns another owner; dropping an
//! owner releases it. Because the handle is a plain `Rc`, release on every
//! exit path, including error paths, is enforced by the compiler rather
//! than by convention.

use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::CalcResult;
use crate::normalize;
use crate::value::HostValue;
use qmath_engine::printer;

#[derive(Clone, Debug)]
pub struct Number(Rc<BigRational>);

impl Number {
    /// Create from any normalizer-acceptable value; strings are allowed.
    ///
    /// # Errors
    /// `Parse` for a malformed literal, `DivisionByZero` for a literal with a
    /// zero denominator, `Type` for an unacceptable runtime type.
    pub fn new(value: impl Into<HostValue>) -> CalcResult<Number> {
        normalize::to_number(&value.into(), true)
    }

    /// Create from a numerator/denominator pair (each any acceptable value).
    ///
    /// # Errors
    /// `DivisionByZero` when the denominator is zero.
    pub fn with_parts(
        num: impl Into<HostValue>,
        den: impl Into<HostValue>,
    ) -> CalcResult<Number> {
        let den = normalize::to_number(&den.into(), true)?;
        if den.is_zero() {
            return Err(crate::error::CalcError::DivisionByZero);
        }
        let num = normalize::to_number(&num.into(), true)?;
        Ok(Number::from_raw(num.as_ratio() / den.as_ratio()))
    }

    pub(crate) fn from_raw(value: BigRational) -> Number {
        Number(Rc::new(value))
    }

    pub(crate) fn from_bigint(value: BigInt) -> Number {
        Number::from_raw(BigRational::from_integer(value))
    }

    /// Cheap alias: increments the reference count, never fails.
    pub fn link(&self) -> Number {
        Number(Rc::clone(&self.0))
    }

    /// Number of live handles sharing this value (the allocation-tracking
    /// hook used by the ownership tests).
    pub fn refcount(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// The underlying reduced rational.
    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    /// Numerator, sign included.
    pub fn numerator(&self) -> Number {
        Number::from_bigint(self.0.numer().clone())
    }

    /// Denominator, always positive.
    pub fn denominator(&self) -> Number {
        Number::from_bigint(self.0.denom().clone())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// True for even integers; fractions are neither even nor odd.
    pub fn is_even(&self) -> bool {
        self.0.is_integer() && self.0.numer().is_even()
    }

    pub fn is_odd(&self) -> bool {
        self.0.is_integer() && self.0.numer().is_odd()
    }

    pub fn abs(&self) -> Number {
        Number::from_raw(self.0.abs())
    }

    /// Unary minus.
    pub fn neg(&self) -> Number {
        Number::from_raw(-self.as_ratio().clone())
    }

    /// Total order among numbers (exact comparison).
    pub fn cmp_number(&self, other: &Number) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp_number(other))
    }
}

/// Canonical text form: integers plainly, terminating decimals as decimals,
/// everything else as a reduced fraction.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.as_ratio();
        if q.is_integer() {
            return write!(f, "{}", q.numer());
        }
        if let Some(places) = printer::finite_decimal_places(q) {
            return write!(f, "{}", printer::decimal_string(q, places));
        }
        write!(f, "{}/{}", q.numer(), q.denom())
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::from_raw(BigRational::from_integer(BigInt::from(v)))
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Number::from(v as i64)
    }
}

impl From<BigInt> for Number {
    fn from(v: BigInt) -> Self {
        Number::from_bigint(v)
    }
}

impl From<BigRational> for Number {
    fn from(v: BigRational) -> Self {
        Number::from_raw(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Number::from(42).to_string(), "42");
        assert_eq!(Number::with_parts(1, 2).unwrap().to_string(), "0.5");
        assert_eq!(Number::with_parts(1, 3).unwrap().to_string(), "1/3");
        assert_eq!(Number::with_parts(-1, 4).unwrap().to_string(), "-0.25");
    }

    #[test]
    fn link_shares_storage() {
        let a = Number::from(7);
        assert_eq!(a.refcount(), 1);
        let b = a.link();
        assert_eq!(a.refcount(), 2);
        drop(b);
        assert_eq!(a.refcount(), 1);
    }

    #[test]
    fn parity_only_applies_to_integers() {
        assert!(Number::from(2).is_even());
        assert!(Number::from(-3).is_odd());
        let half = Number::with_parts(1, 2).unwrap();
        assert!(!half.is_even());
        assert!(!half.is_odd());
    }
}
