//! Conversion-and-dispatch core bridging host values to exact
//! arbitrary-precision rational and complex arithmetic.
//!
//! The shape of the crate:
//! - [`Number`]: reference-counted immutable rational handle;
//! - [`normalize`]: any acceptable host value ([`HostValue`]) into a handle;
//! - [`dispatch`]: binary operations across mixed operand types, with a
//!   machine-word fast path and a coercion fallback for foreign numerics;
//! - the transcendental wrapper: default epsilon resolution plus promotion
//!   of undefined-over-the-reals results into [`Complex`] values, demoted
//!   back to real handles whenever the imaginary part is exactly zero;
//! - [`CalcError`]: the four error kinds raised to the host.
//!
//! Arbitrary-precision arithmetic itself lives in the `qmath_engine` crate;
//! this crate decides which primitive to call, how inputs are produced, and
//! how results, ownership and errors thread back to the caller.

pub mod complex;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod number;
pub mod ops;
pub mod project;
pub mod round;
pub mod theory;
pub mod trans;
pub mod value;

pub use complex::{Complex, Numeric};
pub use config::Config;
pub use dispatch::{compare, dispatch, NumericOp, OpSymbol};
pub use error::{CalcError, CalcResult};
pub use normalize::{to_complex, to_machine_int, to_number};
pub use number::Number;
pub use value::{Coerce, HostValue};

pub use qmath_engine::rounding::RoundMode;
