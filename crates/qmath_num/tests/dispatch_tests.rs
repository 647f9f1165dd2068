//! Binary Operation Dispatcher Tests
//!
//! - fast-path/generic-path observable equivalence (multiply, divide)
//! - comparison boundary cases around zero operands
//! - the coercion escape hatch, exercised by a mock foreign type
//! - reference-count neutrality of every public call

use std::cmp::Ordering;
use std::rc::Rc;

use num_rational::BigRational;
use qmath_num::{
    dispatch, CalcError, CalcResult, Coerce, HostValue, Number, Numeric, NumericOp, OpSymbol,
};

fn real(r: CalcResult<Numeric>) -> Number {
    r.unwrap().into_real().expect("real result")
}

// =============================================================================
// SECTION 1: fast path versus generic path
// =============================================================================

#[test]
fn multiply_fast_path_matches_generic() {
    let lhs = Number::with_parts(-22, 7).unwrap();
    for i in [-3i64, -1, 0, 1, 4, 1000] {
        let fast = real(lhs.mul(i));
        let generic = real(lhs.mul(Number::from(i)));
        assert_eq!(fast, generic, "multiply diverged for {i}");
    }
}

#[test]
fn divide_fast_path_matches_generic() {
    let lhs = Number::with_parts(9, 4).unwrap();
    for i in [-3i64, -1, 1, 4, 1000] {
        let fast = real(lhs.div(i));
        let generic = real(lhs.div(Number::from(i)));
        assert_eq!(fast, generic, "divide diverged for {i}");
    }
    // both paths refuse a zero divisor identically
    assert_eq!(lhs.div(0).unwrap_err(), CalcError::DivisionByZero);
    assert_eq!(
        lhs.div(Number::from(0)).unwrap_err(),
        CalcError::DivisionByZero
    );
}

#[test]
fn comparison_fast_path_boundary_cases() {
    // self negative / other zero and self positive / other zero are the
    // combinations the traditional word-sized comparison got wrong
    assert_eq!(
        Number::from(-3).cmp_value(0).unwrap(),
        Some(Ordering::Less)
    );
    assert_eq!(
        Number::from(3).cmp_value(0).unwrap(),
        Some(Ordering::Greater)
    );
    assert_eq!(Number::from(0).cmp_value(0).unwrap(), Some(Ordering::Equal));
    assert_eq!(
        Number::with_parts(-1, 2).unwrap().cmp_value(0).unwrap(),
        Some(Ordering::Less)
    );
    assert_eq!(Number::from(5).cmp_value(4).unwrap(), Some(Ordering::Greater));
    assert_eq!(Number::from(5).cmp_value(5.1).unwrap(), Some(Ordering::Less));
}

// =============================================================================
// SECTION 2: coercion protocol
// =============================================================================

/// A foreign numeric that models values as "twice a number": 2k. The
/// dispatcher knows nothing about it; the protocol carries the operation.
#[derive(Debug)]
struct Doubled(i64);

impl Coerce for Doubled {
    fn coerce(&self, lhs: &Number) -> CalcResult<(HostValue, HostValue)> {
        Ok((
            HostValue::Number(lhs.link()),
            HostValue::Number(Number::from(self.0 * 2)),
        ))
    }

    fn binary(&self, op: OpSymbol, lhs: &HostValue, rhs: &HostValue) -> CalcResult<Numeric> {
        let l = qmath_num::to_number(lhs, false)?;
        match op {
            OpSymbol::Add => l.add(qmath_num::to_number(rhs, false)?),
            OpSymbol::Mul => l.mul(qmath_num::to_number(rhs, false)?),
            _ => Err(CalcError::Type("unsupported".into())),
        }
    }
}

#[test]
fn foreign_type_participates_through_coercion() {
    let lhs = Number::from(10);
    let foreign: Rc<dyn Coerce> = Rc::new(Doubled(4));
    assert_eq!(real(lhs.add(foreign.clone())), Number::from(18));
    assert_eq!(real(lhs.mul(foreign)), Number::from(80));
}

#[test]
fn malformed_coercion_is_a_type_error() {
    #[derive(Debug)]
    struct Broken;
    impl Coerce for Broken {
        fn coerce(&self, _lhs: &Number) -> CalcResult<(HostValue, HostValue)> {
            Err(CalcError::Type("coerce must return a pair".into()))
        }
        fn binary(
            &self,
            _op: OpSymbol,
            _lhs: &HostValue,
            _rhs: &HostValue,
        ) -> CalcResult<Numeric> {
            unreachable!()
        }
    }
    let foreign: Rc<dyn Coerce> = Rc::new(Broken);
    assert!(matches!(
        Number::from(1).add(foreign),
        Err(CalcError::Type(_))
    ));
}

#[test]
fn complex_operand_goes_through_coercion() {
    let lhs = Number::from(2);
    let c = qmath_num::Complex::new(1, 1).unwrap();
    let sum = lhs.add(c).unwrap();
    assert_eq!(sum.re(), Number::from(3));
    assert_eq!(sum.im(), Number::from(1));
}

// =============================================================================
// SECTION 3: mock primitives through the descriptor interface
// =============================================================================

#[test]
fn dispatcher_accepts_mock_primitives() {
    fn left_only(a: &BigRational, _b: &BigRational) -> CalcResult<BigRational> {
        Ok(a.clone())
    }
    let op = NumericOp {
        symbol: OpSymbol::Add,
        binary: left_only,
        fast: None,
    };
    let lhs = Number::from(7);
    let out = dispatch(&lhs, &HostValue::Float(0.125), &op).unwrap();
    assert_eq!(out, Numeric::Real(Number::from(7)));
}

// =============================================================================
// SECTION 4: reference-count neutrality
// =============================================================================

#[test]
fn public_calls_are_refcount_neutral() {
    let x = Number::with_parts(22, 7).unwrap();
    let y = Number::from(3);
    let before = (x.refcount(), y.refcount());

    let _ = x.add(&y).unwrap();
    let _ = x.mul(&y).unwrap();
    let _ = x.div(&y).unwrap();
    let _ = x.cmp_value(&y).unwrap();
    let _ = x.gcd([HostValue::from(&y)]).unwrap();

    assert_eq!((x.refcount(), y.refcount()), before);
}

#[test]
fn error_paths_are_refcount_neutral() {
    let x = Number::from(5);
    let zero = Number::from(0);
    let before = (x.refcount(), zero.refcount());

    assert!(x.div(&zero).is_err());
    assert!(x.modulo(&zero, None, &qmath_num::Config::default()).is_err());
    assert!(x.add("oops").is_err());

    assert_eq!((x.refcount(), zero.refcount()), before);
}

#[test]
fn results_own_their_storage() {
    let sum;
    {
        let a = Number::from(1);
        let b = Number::from(2);
        sum = real(a.add(&b));
    }
    // operands are gone; the result survives independently
    assert_eq!(sum, Number::from(3));
    assert_eq!(sum.refcount(), 1);
}
