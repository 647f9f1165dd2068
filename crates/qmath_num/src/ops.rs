//! Public arithmetic operations on `Number`.
//!
//! Each operation hands the dispatcher a descriptor; the primitives
//! themselves are thin shims over the engine. Multiply and divide carry
//! machine-word fast paths; addition deliberately does not.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::complex::Numeric;
use crate::config::Config;
use crate::dispatch::{compare, dispatch, NumericOp, OpSymbol};
use crate::error::{CalcError, CalcResult};
use crate::normalize;
use crate::number::Number;
use crate::value::HostValue;
use qmath_engine::arith;
use qmath_engine::rounding::RoundMode;

fn q_add(a: &BigRational, b: &BigRational) -> CalcResult<BigRational> {
    Ok(a + b)
}

fn q_sub(a: &BigRational, b: &BigRational) -> CalcResult<BigRational> {
    Ok(a - b)
}

fn q_mul(a: &BigRational, b: &BigRational) -> CalcResult<BigRational> {
    Ok(a * b)
}

fn q_mul_i(a: &BigRational, i: i64) -> CalcResult<BigRational> {
    Ok(a * BigRational::from_integer(BigInt::from(i)))
}

fn q_div(a: &BigRational, b: &BigRational) -> CalcResult<BigRational> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a / b)
}

fn q_div_i(a: &BigRational, i: i64) -> CalcResult<BigRational> {
    if i == 0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a / BigRational::from_integer(BigInt::from(i)))
}

fn integer_pair<'a>(
    a: &'a BigRational,
    b: &'a BigRational,
    op: &str,
) -> CalcResult<(&'a BigInt, &'a BigInt)> {
    if !a.is_integer() || !b.is_integer() {
        return Err(CalcError::math(format!("non-integer value for {}", op)));
    }
    Ok((a.numer(), b.numer()))
}

fn q_and(a: &BigRational, b: &BigRational) -> CalcResult<BigRational> {
    let (x, y) = integer_pair(a, b, "binary and")?;
    Ok(BigRational::from_integer(x & y))
}

fn q_or(a: &BigRational, b: &BigRational) -> CalcResult<BigRational> {
    let (x, y) = integer_pair(a, b, "binary or")?;
    Ok(BigRational::from_integer(x | y))
}

fn q_xor(a: &BigRational, b: &BigRational) -> CalcResult<BigRational> {
    let (x, y) = integer_pair(a, b, "binary xor")?;
    Ok(BigRational::from_integer(x ^ y))
}

const ADD_OP: NumericOp = NumericOp {
    symbol: OpSymbol::Add,
    binary: q_add,
    fast: None,
};

const SUB_OP: NumericOp = NumericOp {
    symbol: OpSymbol::Sub,
    binary: q_sub,
    fast: None,
};

const MUL_OP: NumericOp = NumericOp {
    symbol: OpSymbol::Mul,
    binary: q_mul,
    fast: Some(q_mul_i),
};

const DIV_OP: NumericOp = NumericOp {
    symbol: OpSymbol::Div,
    binary: q_div,
    fast: Some(q_div_i),
};

const AND_OP: NumericOp = NumericOp {
    symbol: OpSymbol::And,
    binary: q_and,
    fast: None,
};

const OR_OP: NumericOp = NumericOp {
    symbol: OpSymbol::Or,
    binary: q_or,
    fast: None,
};

const XOR_OP: NumericOp = NumericOp {
    symbol: OpSymbol::Xor,
    binary: q_xor,
    fast: None,
};

const SHIFT_BOUND: i64 = 1 << 31;

impl Number {
    pub fn add(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        dispatch(self, &other.into(), &ADD_OP)
    }

    pub fn sub(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        dispatch(self, &other.into(), &SUB_OP)
    }

    pub fn mul(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        dispatch(self, &other.into(), &MUL_OP)
    }

    pub fn div(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        dispatch(self, &other.into(), &DIV_OP)
    }

    /// Bitwise AND; both sides must be integers.
    pub fn bit_and(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        dispatch(self, &other.into(), &AND_OP)
    }

    /// Bitwise OR; both sides must be integers.
    pub fn bit_or(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        dispatch(self, &other.into(), &OR_OP)
    }

    /// Bitwise XOR; both sides must be integers.
    pub fn bit_xor(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        dispatch(self, &other.into(), &XOR_OP)
    }

    /// Three-way comparison; `None` when the operand is incomparable.
    pub fn cmp_value(&self, other: impl Into<HostValue>) -> CalcResult<Option<Ordering>> {
        compare(self, &other.into())
    }

    /// Remainder of integer-quotient division, quotient rounding per `rnd`
    /// (configuration default otherwise).
    pub fn modulo(
        &self,
        other: impl Into<HostValue>,
        rnd: Option<RoundMode>,
        cfg: &Config,
    ) -> CalcResult<Number> {
        let q = normalize::to_number(&other.into(), false)?;
        if q.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let mode = rnd.unwrap_or(cfg.modulo);
        Ok(Number::from_raw(arith::modulus(
            self.as_ratio(),
            q.as_ratio(),
            mode,
        )))
    }

    /// Quotient and remainder of division.
    pub fn quomod(
        &self,
        other: impl Into<HostValue>,
        rnd: Option<RoundMode>,
        cfg: &Config,
    ) -> CalcResult<(Number, Number)> {
        let q = normalize::to_number(&other.into(), false)?;
        if q.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let mode = rnd.unwrap_or(cfg.quomod);
        let (quo, rem) = arith::quomod(self.as_ratio(), q.as_ratio(), mode);
        Ok((Number::from_raw(quo), Number::from_raw(rem)))
    }

    /// Shift left; a negative count shifts right.
    pub fn shl(&self, count: impl Into<HostValue>) -> CalcResult<Number> {
        self.shift_by(normalize::to_machine_int(&count.into())?)
    }

    /// Shift right; a negative count shifts left.
    pub fn shr(&self, count: impl Into<HostValue>) -> CalcResult<Number> {
        let c = normalize::to_machine_int(&count.into())?;
        self.shift_by(c.checked_neg().ok_or_else(|| {
            CalcError::math("shift count out of range")
        })?)
    }

    fn shift_by(&self, count: i64) -> CalcResult<Number> {
        if !self.is_integer() {
            return Err(CalcError::math("non-integer value for shift"));
        }
        if count.abs() >= SHIFT_BOUND {
            return Err(CalcError::math("shift count must be below 2^31"));
        }
        Ok(Number::from_bigint(arith::shift(
            self.as_ratio().numer(),
            count,
        )))
    }

    /// Complement: -x - 1 for integers, -x otherwise.
    pub fn comp(&self) -> Number {
        Number::from_raw(arith::comp(self.as_ratio()))
    }

    /// Multiplicative inverse.
    pub fn inverse(&self) -> CalcResult<Number> {
        if self.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        Ok(Number::from_raw(self.as_ratio().recip()))
    }

    /// The square of the value (the real norm).
    pub fn norm(&self) -> Number {
        Number::from_raw(self.as_ratio() * self.as_ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> Number {
        Number::from(v)
    }

    fn real(r: CalcResult<Numeric>) -> Number {
        r.unwrap().into_real().expect("real result")
    }

    #[test]
    fn operator_basics() {
        assert_eq!(real(n(1).add(2)), n(3));
        assert_eq!(real(n(1).sub(2)), n(-1));
        assert_eq!(real(n(2).mul(3)), n(6));
        assert_eq!(real(n(2).div(4)), Number::with_parts(1, 2).unwrap());
        assert_eq!(n(5).div(0).unwrap_err(), CalcError::DivisionByZero);
        assert_eq!(n(1).neg(), n(-1));
    }

    #[test]
    fn bitwise_requires_integers() {
        assert_eq!(real(n(18).bit_and(20)), n(16));
        assert_eq!(real(n(18).bit_or(20)), n(22));
        assert_eq!(real(n(5).bit_xor(3)), n(6));
        let half = Number::with_parts(1, 2).unwrap();
        assert!(matches!(half.bit_and(1), Err(CalcError::Math(_))));
    }

    #[test]
    fn modulo_and_quomod() {
        let cfg = Config::default();
        assert_eq!(n(11).modulo(5, None, &cfg).unwrap(), n(1));
        assert_eq!(n(13).modulo(-4, None, &cfg).unwrap(), n(-3));
        assert_eq!(
            n(5).modulo(0, None, &cfg).unwrap_err(),
            CalcError::DivisionByZero
        );
        let (quo, rem) = n(11).quomod(3, None, &cfg).unwrap();
        assert_eq!((quo, rem), (n(3), n(2)));
        let (quo, rem) = n(11).quomod(-3, None, &cfg).unwrap();
        assert_eq!((quo, rem), (n(-4), n(-1)));
    }

    #[test]
    fn shift_and_complement() {
        assert_eq!(n(5).shl(2).unwrap(), n(20));
        assert_eq!(n(20).shr(2).unwrap(), n(5));
        assert_eq!(n(5).shl(-2).unwrap(), n(1));
        let half = Number::with_parts(1, 2).unwrap();
        assert!(half.shl(1).is_err());
        assert!(n(1).shl(i64::from(i32::MAX) + 1).is_err());
        assert_eq!(n(7).comp(), n(-8));
        assert_eq!(half.comp(), Number::with_parts(-1, 2).unwrap());
    }

    #[test]
    fn comparison_results() {
        assert_eq!(n(5).cmp_value(4).unwrap(), Some(Ordering::Greater));
        assert_eq!(n(5).cmp_value(5).unwrap(), Some(Ordering::Equal));
        assert_eq!(n(5).cmp_value(5.1).unwrap(), Some(Ordering::Less));
        assert_eq!(n(5).cmp_value("cat").unwrap(), None);
    }
}
