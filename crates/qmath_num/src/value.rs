//! The closed set of host values a number can be built from.
//!
//! Host callers hand over one of these variants (usually through a `From`
//! conversion) and every downstream component pattern-matches over the closed
//! set instead of re-inspecting dynamic types at each call site. Foreign
//! numeric types that the core does not know participate through the
//! [`Coerce`] escape hatch.

use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::complex::{Complex, Numeric};
use crate::dispatch::OpSymbol;
use crate::error::CalcResult;
use crate::number::Number;

/// Anything convertible to a canonical number (or complex) handle.
#[derive(Clone, Debug)]
pub enum HostValue {
    /// Native machine-word integer.
    Int(i64),
    /// Arbitrary-precision host integer.
    Big(BigInt),
    /// Host ratio: numerator/denominator pair of big integers.
    Ratio(BigInt, BigInt),
    /// Host IEEE float; converted exactly, never through decimal text.
    Float(f64),
    /// An existing canonical handle.
    Number(Number),
    /// Host complex pair.
    Cplx(Complex),
    /// Numeric literal; only accepted where the conversion policy says so.
    Text(String),
    /// A foreign numeric type speaking the coercion protocol.
    Foreign(Rc<dyn Coerce>),
}

impl HostValue {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Int(_) => "integer",
            HostValue::Big(_) => "big integer",
            HostValue::Ratio(_, _) => "ratio",
            HostValue::Float(_) => "float",
            HostValue::Number(_) => "number",
            HostValue::Cplx(_) => "complex",
            HostValue::Text(_) => "string",
            HostValue::Foreign(_) => "foreign value",
        }
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Int(v) => write!(f, "{}", v),
            HostValue::Big(v) => write!(f, "{}", v),
            HostValue::Ratio(n, d) => write!(f, "{}/{}", n, d),
            HostValue::Float(v) => write!(f, "{}", v),
            HostValue::Number(v) => write!(f, "{}", v),
            HostValue::Cplx(v) => write!(f, "{}", v),
            HostValue::Text(v) => write!(f, "{:?}", v),
            HostValue::Foreign(_) => write!(f, "<foreign>"),
        }
    }
}

/// Coercion protocol for foreign numeric types.
///
/// When the dispatcher meets an operand it cannot normalize, it asks the
/// operand to reinterpret the pair `(lhs, self)` in its own representation
/// and then redispatches the original operator symbol on that pair. A
/// malformed response surfaces as a type error.
pub trait Coerce: fmt::Debug {
    /// Reinterpret the operands in the foreign representation.
    fn coerce(&self, lhs: &Number) -> CalcResult<(HostValue, HostValue)>;

    /// Apply `op` to a coerced pair.
    fn binary(&self, op: OpSymbol, lhs: &HostValue, rhs: &HostValue) -> CalcResult<Numeric>;
}

impl From<i64> for HostValue {
    fn from(v: i64) -> Self {
        HostValue::Int(v)
    }
}

impl From<i32> for HostValue {
    fn from(v: i32) -> Self {
        HostValue::Int(v as i64)
    }
}

impl From<u32> for HostValue {
    fn from(v: u32) -> Self {
        HostValue::Int(v as i64)
    }
}

impl From<BigInt> for HostValue {
    fn from(v: BigInt) -> Self {
        HostValue::Big(v)
    }
}

impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        HostValue::Float(v)
    }
}

impl From<BigRational> for HostValue {
    fn from(v: BigRational) -> Self {
        HostValue::Ratio(v.numer().clone(), v.denom().clone())
    }
}

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        HostValue::Text(v.to_string())
    }
}

impl From<String> for HostValue {
    fn from(v: String) -> Self {
        HostValue::Text(v)
    }
}

impl From<Number> for HostValue {
    fn from(v: Number) -> Self {
        HostValue::Number(v)
    }
}

impl From<&Number> for HostValue {
    fn from(v: &Number) -> Self {
        HostValue::Number(v.link())
    }
}

impl From<Complex> for HostValue {
    fn from(v: Complex) -> Self {
        HostValue::Cplx(v)
    }
}

impl From<&Complex> for HostValue {
    fn from(v: &Complex) -> Self {
        HostValue::Cplx(v.clone())
    }
}

impl From<Rc<dyn Coerce>> for HostValue {
    fn from(v: Rc<dyn Coerce>) -> Self {
        HostValue::Foreign(v)
    }
}
