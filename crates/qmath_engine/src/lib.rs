//! Arithmetic engine for the qmath workspace.
//!
//! Pure functions over `num_rational::BigRational` and `num_bigint::BigInt`:
//! literal parsing, decimal printing, epsilon-bounded transcendental kernels
//! (real and complex), integer number theory, and rounding primitives.
//!
//! The engine knows nothing about host values, handles, or the public error
//! taxonomy. Functions whose mathematical result does not exist over the
//! reals (or whose argument is outside the representable domain) signal this
//! by returning `None`; the caller decides whether that means "promote to
//! complex" or "raise".

pub mod arith;
pub mod complexmath;
pub mod literal;
pub mod ntheory;
pub mod printer;
pub mod rounding;
pub mod series;
pub mod trans;

pub use complexmath::CValue;
pub use literal::{parse_literal, LiteralError, RawRational};
