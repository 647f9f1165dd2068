//! Binary operation dispatch.
//!
//! Every public arithmetic operation supplies an [`NumericOp`] descriptor:
//! the generic two-handle primitive, an optional machine-word fast path, and
//! the operator symbol used for coercion redispatch. Selection order:
//!
//! 1. fast path, when the descriptor has one and the operand is a machine
//!    integer; skips allocating an operand handle;
//! 2. direct call when the operand already carries a handle;
//! 3. normalize any other acceptable numeric type (strings excluded) and
//!    call the generic primitive, the temporary handle dying by scope;
//! 4. the coercion protocol for foreign numeric types;
//! 5. a type error naming both operand types.
//!
//! Steps 1–3 are observably equivalent; the fast path is purely an
//! allocation optimization, and the test suite pins that equivalence.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::complex::Numeric;
use crate::error::{CalcError, CalcResult};
use crate::normalize;
use crate::number::Number;
use crate::value::{Coerce, HostValue};

/// Operator identity carried through the coercion protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpSymbol {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Cmp,
}

impl fmt::Display for OpSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OpSymbol::Add => "+",
            OpSymbol::Sub => "-",
            OpSymbol::Mul => "*",
            OpSymbol::Div => "/",
            OpSymbol::Mod => "%",
            OpSymbol::Pow => "**",
            OpSymbol::And => "&",
            OpSymbol::Or => "|",
            OpSymbol::Xor => "^",
            OpSymbol::Shl => "<<",
            OpSymbol::Shr => ">>",
            OpSymbol::Cmp => "<=>",
        };
        f.write_str(s)
    }
}

/// Generic two-handle primitive.
pub type BinaryFn = fn(&BigRational, &BigRational) -> CalcResult<BigRational>;
/// Machine-word fast-path primitive.
pub type FastFn = fn(&BigRational, i64) -> CalcResult<BigRational>;

/// Descriptor of one binary operation.
#[derive(Clone, Copy)]
pub struct NumericOp {
    pub symbol: OpSymbol,
    pub binary: BinaryFn,
    pub fast: Option<FastFn>,
}

/// Dispatch `lhs <op> rhs` per the selection order above.
pub fn dispatch(lhs: &Number, rhs: &HostValue, op: &NumericOp) -> CalcResult<Numeric> {
    match rhs {
        HostValue::Int(i) => {
            if let Some(fast) = op.fast {
                let r = fast(lhs.as_ratio(), *i)?;
                return Ok(Numeric::Real(Number::from_raw(r)));
            }
            let operand = Number::from(*i);
            (op.binary)(lhs.as_ratio(), operand.as_ratio())
                .map(|r| Numeric::Real(Number::from_raw(r)))
        }
        HostValue::Number(n) => {
            (op.binary)(lhs.as_ratio(), n.as_ratio()).map(|r| Numeric::Real(Number::from_raw(r)))
        }
        HostValue::Big(_) | HostValue::Ratio(_, _) | HostValue::Float(_) => {
            let operand = normalize::to_number(rhs, false)?;
            (op.binary)(lhs.as_ratio(), operand.as_ratio())
                .map(|r| Numeric::Real(Number::from_raw(r)))
        }
        HostValue::Cplx(c) => coerced(c, lhs, op.symbol),
        HostValue::Foreign(f) => coerced(f.as_ref(), lhs, op.symbol),
        HostValue::Text(_) => Err(cannot_coerce(rhs)),
    }
}

fn coerced(partner: &dyn Coerce, lhs: &Number, symbol: OpSymbol) -> CalcResult<Numeric> {
    tracing::debug!(op = %symbol, "redispatching through the coercion protocol");
    let (l, r) = partner.coerce(lhs)?;
    partner.binary(symbol, &l, &r)
}

fn cannot_coerce(rhs: &HostValue) -> CalcError {
    CalcError::type_error(format!(
        "{} ({}) can't be coerced into a number",
        rhs,
        rhs.type_name()
    ))
}

/// Three-way comparison: -1/0/1 as an ordering, `None` when the operands are
/// incomparable.
///
/// The machine-word operand takes a fast path that compares against the
/// cross product without building a handle; the sign/zero boundary cases are
/// pinned by tests against the generic path.
pub fn compare(lhs: &Number, rhs: &HostValue) -> CalcResult<Option<Ordering>> {
    match rhs {
        HostValue::Int(i) => Ok(Some(compare_machine_word(lhs.as_ratio(), *i))),
        HostValue::Number(n) => Ok(Some(lhs.as_ratio().cmp(n.as_ratio()))),
        HostValue::Big(_) | HostValue::Ratio(_, _) | HostValue::Float(_) => {
            let operand = normalize::to_number(rhs, false)?;
            Ok(Some(lhs.as_ratio().cmp(operand.as_ratio())))
        }
        HostValue::Cplx(c) => {
            // only a degenerate complex is comparable with a real
            if c.is_real() {
                Ok(Some(lhs.as_ratio().cmp(c.re().as_ratio())))
            } else {
                Ok(None)
            }
        }
        _ => Ok(None),
    }
}

/// Exact comparison of a rational against a machine word: the numerator is
/// compared with `i * denominator`, covering every sign/zero combination.
fn compare_machine_word(lhs: &BigRational, i: i64) -> Ordering {
    lhs.numer().cmp(&(BigInt::from(i) * lhs.denom()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn add_q(a: &BigRational, b: &BigRational) -> CalcResult<BigRational> {
        Ok(a + b)
    }

    fn mul_q(a: &BigRational, b: &BigRational) -> CalcResult<BigRational> {
        Ok(a * b)
    }

    fn mul_fast(a: &BigRational, i: i64) -> CalcResult<BigRational> {
        Ok(a * BigRational::from_integer(BigInt::from(i)))
    }

    #[test]
    fn fast_and_generic_paths_agree() {
        let with_fast = NumericOp {
            symbol: OpSymbol::Mul,
            binary: mul_q,
            fast: Some(mul_fast),
        };
        let without_fast = NumericOp {
            symbol: OpSymbol::Mul,
            binary: mul_q,
            fast: None,
        };
        let lhs = Number::with_parts(22, 7).unwrap();
        for i in [-5i64, -1, 0, 1, 9] {
            let a = dispatch(&lhs, &HostValue::Int(i), &with_fast).unwrap();
            let b = dispatch(&lhs, &HostValue::Int(i), &without_fast).unwrap();
            assert_eq!(a, b, "fast path diverged for {i}");
        }
    }

    #[test]
    fn comparison_boundary_cases() {
        // the traditional fast comparison misbehaved around zero operands;
        // pin every sign/zero combination against the generic path
        for (n, d) in [(-3i64, 1i64), (0, 1), (3, 1), (-1, 2), (1, 2)] {
            let lhs = Number::with_parts(n, d).unwrap();
            for i in [-2i64, -1, 0, 1, 2] {
                let fast = compare(&lhs, &HostValue::Int(i)).unwrap().unwrap();
                let generic = compare(&lhs, &HostValue::Number(Number::from(i)))
                    .unwrap()
                    .unwrap();
                assert_eq!(fast, generic, "comparison diverged for {n}/{d} <=> {i}");
            }
        }
    }

    #[test]
    fn string_operand_is_a_type_error() {
        let op = NumericOp {
            symbol: OpSymbol::Add,
            binary: add_q,
            fast: None,
        };
        let lhs = Number::from(1);
        let err = dispatch(&lhs, &HostValue::Text("2".into()), &op).unwrap_err();
        assert!(matches!(err, CalcError::Type(_)));
    }

    #[test]
    fn mock_primitives_see_normalized_operands() {
        fn record_zero(a: &BigRational, b: &BigRational) -> CalcResult<BigRational> {
            assert!(!a.is_zero());
            Ok(a.clone() - a + b - b)
        }
        let op = NumericOp {
            symbol: OpSymbol::Add,
            binary: record_zero,
            fast: None,
        };
        let lhs = Number::from(5);
        let out = dispatch(&lhs, &HostValue::Float(0.25), &op).unwrap();
        assert_eq!(out, Numeric::Real(Number::from(0)));
    }
}
