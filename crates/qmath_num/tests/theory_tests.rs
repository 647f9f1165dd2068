//! Number Theory Surface Tests
//!
//! Integrality/range validation at the wrapper layer and the arithmetic
//! behind it: gcd family, special sequences, primality, factorization and
//! modular helpers.

use qmath_num::{CalcError, HostValue, Number};

fn n(v: i64) -> Number {
    Number::from(v)
}

// =============================================================================
// SECTION 1: gcd family over rationals
// =============================================================================

#[test]
fn gcd_and_lcm_are_variadic() {
    assert_eq!(n(12).gcd([HostValue::Int(8)]).unwrap(), n(4));
    assert_eq!(
        n(12).gcd([HostValue::Int(8), HostValue::Int(6)]).unwrap(),
        n(2)
    );
    assert_eq!(n(2).gcd([]).unwrap(), n(2));
    assert_eq!(n(3).lcm([HostValue::Int(-7)]).unwrap(), n(-21));
    assert_eq!(n(4).lcm([HostValue::Int(6)]).unwrap(), n(12));
    assert_eq!(n(4).lcm([HostValue::Int(0)]).unwrap(), n(0));
}

#[test]
fn gcd_works_on_rationals() {
    let a = Number::with_parts(1, 2).unwrap();
    let got = a.gcd([HostValue::from(Number::with_parts(1, 3).unwrap())]).unwrap();
    assert_eq!(got, Number::with_parts(1, 6).unwrap());
}

#[test]
fn gcdrem_strips_shared_factors() {
    assert_eq!(n(24).gcdrem(2).unwrap(), n(3));
    assert!(Number::with_parts(1, 2).unwrap().gcdrem(2).is_err());
}

// =============================================================================
// SECTION 2: special sequences
// =============================================================================

#[test]
fn factorial_and_fibonacci() {
    assert_eq!(n(10).fact().unwrap(), n(3628800));
    assert_eq!(n(0).fact().unwrap(), n(1));
    assert!(n(-2).fact().is_err());
    assert!(Number::with_parts(1, 2).unwrap().fact().is_err());
    assert_eq!(n(10).fib().unwrap(), n(55));
    assert_eq!(n(-6).fib().unwrap(), n(-8));
}

#[test]
fn bernoulli_euler_catalan() {
    assert_eq!(n(1).bernoulli().unwrap(), Number::with_parts(-1, 2).unwrap());
    assert_eq!(n(2).bernoulli().unwrap(), Number::with_parts(1, 6).unwrap());
    assert_eq!(n(19).bernoulli().unwrap(), n(0));
    assert_eq!(n(18).euler().unwrap(), Number::new("-2404879675441").unwrap());
    assert_eq!(n(19).euler().unwrap(), n(0));
    assert_eq!(n(20).euler().unwrap(), Number::new("370371188237525").unwrap());
    assert_eq!(n(5).catalan().unwrap(), n(42));
    assert!(n(-1).catalan().is_err());
}

// =============================================================================
// SECTION 3: primality and factorization
// =============================================================================

#[test]
fn primality_with_range_rule() {
    assert!(n(2).is_prime().unwrap());
    assert!(n((1i64 << 31) - 1).is_prime().unwrap());
    assert!(!n((1i64 << 31) - 9).is_prime().unwrap());
    // odd magnitude beyond 2^32 is out of the deterministic range
    let big = Number::new("4294967297").unwrap();
    assert!(matches!(big.is_prime(), Err(CalcError::Math(_))));
    assert!(Number::with_parts(1, 2).unwrap().is_prime().is_err());
}

#[test]
fn probabilistic_test_beyond_the_range() {
    let p = Number::new("2305843009213693951").unwrap(); // 2^61 - 1
    assert!(p.ptest(Some(HostValue::Int(10)), None).unwrap());
    let c = Number::new("2305843009213693953").unwrap();
    assert!(!c.ptest(Some(HostValue::Int(10)), None).unwrap());
}

#[test]
fn prime_navigation() {
    assert_eq!(n(100).nextprime().unwrap(), Some(n(101)));
    assert_eq!(n(100).prevprime().unwrap(), Some(n(97)));
    assert_eq!(n(2).prevprime().unwrap(), None);
    let big = Number::new("4294967296").unwrap();
    assert!(big.prevprime().is_err());
}

#[test]
fn factor_finds_the_smallest_factor() {
    assert_eq!(n(91).factor(None).unwrap(), n(7));
    // 2^32 + 1 = 641 * 6700417
    let f = Number::new("4294967297").unwrap().factor(None).unwrap();
    assert_eq!(f, n(641));
    assert_eq!(n(101).factor(Some(HostValue::Int(5))).unwrap(), n(1));
    let err = n(10).factor(Some(HostValue::from(Number::new("4294967296").unwrap())));
    assert!(matches!(err, Err(CalcError::Math(_))));
}

// =============================================================================
// SECTION 4: modular helpers and integer roots
// =============================================================================

#[test]
fn modular_arithmetic() {
    assert_eq!(n(3).minv(7).unwrap(), n(5));
    assert_eq!(n(2).minv(4).unwrap(), n(0));
    assert_eq!(n(2).pmod(10, 1000).unwrap(), n(24));
    assert_eq!(
        n(2).pmod(3, 0).unwrap_err(),
        CalcError::DivisionByZero
    );
    assert!(n(5).meq(33, 7).unwrap());
    assert!(!n(5).meq(32, 7).unwrap());
    assert_eq!(n(2).jacobi(5).unwrap(), n(-1));
    assert_eq!(n(2).jacobi(15).unwrap(), n(1));
}

#[test]
fn divisibility_predicates() {
    assert!(n(6).mult(2).unwrap());
    assert!(!n(2).mult(6).unwrap());
    assert!(n(6).rel(5).unwrap());
    assert!(!n(6).rel(2).unwrap());
    assert!(Number::with_parts(1, 2).unwrap().rel(2).is_err());
    assert_eq!(n(48).fcnt(4).unwrap(), n(2));
    assert_eq!(n(24).fcnt(4).unwrap(), n(1));
}

#[test]
fn integer_roots_and_squares() {
    assert_eq!(Number::new("8.5").unwrap().isqrt().unwrap(), n(2));
    assert_eq!(n(200).isqrt().unwrap(), n(14));
    assert!(n(-1).isqrt().is_err());
    assert_eq!(n(100).iroot(3).unwrap(), n(4));
    assert!(n(100).iroot(0).is_err());
    assert!(n(25).sq());
    assert!(Number::with_parts(4, 25).unwrap().sq());
    assert!(!n(3).sq());
}
