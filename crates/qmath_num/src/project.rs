//! Projection back to host representations.
//!
//! The engine has no floating-point form, so both the oversized-integer path
//! and the float path route through decimal text produced by the engine
//! printer and re-parsed by the host.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::error::CalcResult;
use crate::normalize;
use crate::number::Number;
use crate::value::HostValue;
use qmath_engine::printer;

impl Number {
    /// Host big integer, truncating toward zero. Magnitudes within the
    /// machine word project directly; anything larger goes through the
    /// decimal-string channel and the host's big-integer parser.
    pub fn to_integer(&self) -> BigInt {
        let t = self.as_ratio().trunc().to_integer();
        if let Some(small) = t.to_i64() {
            return BigInt::from(small);
        }
        tracing::debug!("integer projection exceeds the machine word; using text");
        printer::integer_string(&t)
            .parse()
            .expect("decimal string of an integer reparses")
    }

    /// Machine-word integer.
    ///
    /// # Errors
    /// `Type` when the value is fractional or beyond the machine word.
    pub fn to_i64(&self) -> CalcResult<i64> {
        normalize::to_machine_int(&HostValue::Number(self.link()))
    }

    /// Host float, by way of scientific decimal text, never a direct
    /// binary conversion. Magnitudes beyond the float range overflow to
    /// infinity the way the host parser does.
    pub fn to_f64(&self) -> f64 {
        printer::scientific_string(self.as_ratio(), 17)
            .parse()
            .expect("scientific notation reparses as a float")
    }
}
