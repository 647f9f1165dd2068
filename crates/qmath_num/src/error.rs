//! Error taxonomy raised to the host.
//!
//! Four kinds cover the whole surface:
//! - [`CalcError::Type`]: the input's runtime type is not acceptable for the
//!   requested conversion, or a coercion partner misbehaved.
//! - [`CalcError::DivisionByZero`]: explicit division, modulus or
//!   construction with a zero denominator/divisor.
//! - [`CalcError::Math`]: domain violations (non-integer where an integer is
//!   required, out-of-range index parameters) and engine primitives that
//!   returned no value.
//! - [`CalcError::Parse`]: a string that is not a numeric literal.
//!
//! The machine-word overflow of the normalizer's fast path is recoverable and
//! never surfaces here; it is handled by retrying through the decimal-string
//! channel.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Unacceptable runtime type for a conversion or operation.
    #[error("type error: {0}")]
    Type(String),

    /// Division, modulus or construction with a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// Domain violation or an engine primitive with no value to return.
    #[error("math error: {0}")]
    Math(String),

    /// Invalid numeric literal.
    #[error("parse error: {0}")]
    Parse(String),
}

impl CalcError {
    pub(crate) fn type_error(msg: impl Into<String>) -> Self {
        CalcError::Type(msg.into())
    }

    pub(crate) fn math(msg: impl Into<String>) -> Self {
        CalcError::Math(msg.into())
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
