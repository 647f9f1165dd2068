//! Transcendental Wrapper Tests
//!
//! - epsilon defaulting and per-call override
//! - promotion to complex when the real primitive has no value, and the
//!   demotion invariant on the way back
//! - two-argument wrappers (atan2, hypot, root) with no complex fallback
//! - the power split between exact, real-approximate and complex paths

use qmath_num::{CalcError, Config, Number, Numeric};

fn cfg() -> Config {
    Config::default()
}

fn assert_close(n: &Number, expected: f64, tol: f64) {
    let got = n.to_f64();
    assert!(
        (got - expected).abs() <= tol,
        "got {got}, expected {expected}"
    );
}

// =============================================================================
// SECTION 1: real results
// =============================================================================

#[test]
fn trig_against_known_values() {
    let one = Number::from(1);
    assert_close(&one.sin(None, &cfg()).unwrap(), 1.0f64.sin(), 1e-15);
    assert_close(&one.cos(None, &cfg()).unwrap(), 1.0f64.cos(), 1e-15);
    assert_close(&one.tan(None, &cfg()).unwrap(), 1.0f64.tan(), 1e-14);
    assert_close(&one.exp(None, &cfg()).unwrap(), std::f64::consts::E, 1e-15);
    assert_close(&one.sinh(None, &cfg()).unwrap(), 1.0f64.sinh(), 1e-15);
    assert_close(&one.atan(None, &cfg()).unwrap(), std::f64::consts::FRAC_PI_4, 1e-15);
}

#[test]
fn epsilon_override_coarsens_the_result() {
    let two = Number::from(2);
    let coarse_eps = Number::with_parts(1, 100).unwrap();
    let coarse = two.ln(Some(&coarse_eps), &cfg()).unwrap().into_real().unwrap();
    let fine = two.ln(None, &cfg()).unwrap().into_real().unwrap();
    assert!((coarse.to_f64() - std::f64::consts::LN_2).abs() <= 0.01);
    assert!((fine.to_f64() - std::f64::consts::LN_2).abs() <= 1e-15);
}

#[test]
fn real_domain_stays_real() {
    let half = Number::with_parts(1, 2).unwrap();
    let r = half.acos(None, &cfg()).unwrap();
    assert!(r.is_real(), "acos(0.5) must not report complex");
    assert_close(&r.re(), 0.5f64.acos(), 1e-15);
    let r = half.asin(None, &cfg()).unwrap();
    assert!(r.is_real());
    assert_close(&r.re(), 0.5f64.asin(), 1e-15);
}

// =============================================================================
// SECTION 2: promotion and demotion
// =============================================================================

#[test]
fn acos_beyond_one_promotes_to_complex() {
    let two = Number::from(2);
    let r = two.acos(None, &cfg()).unwrap();
    let c = match r {
        Numeric::Cplx(c) => c,
        Numeric::Real(_) => panic!("acos(2) must be complex"),
    };
    // acos(2) = 1.31695789692481670863i
    assert_close(&c.re(), 0.0, 1e-15);
    assert_close(&c.im(), 1.3169578969248166, 1e-12);
    assert!(!c.im().is_zero());
}

#[test]
fn acosh_of_zero_promotes() {
    let zero = Number::from(0);
    let r = zero.acosh(None, &cfg()).unwrap();
    assert!(!r.is_real());
    assert_close(&r.im(), std::f64::consts::FRAC_PI_2, 1e-12);
}

#[test]
fn atanh_beyond_one_promotes() {
    let two = Number::from(2);
    let r = two.atanh(None, &cfg()).unwrap();
    assert!(!r.is_real());
    assert_close(&r.re(), 0.5493061443340548, 1e-12);
}

#[test]
fn ln_of_negative_promotes() {
    let neg = Number::from(-1);
    let r = neg.ln(None, &cfg()).unwrap();
    assert!(!r.is_real());
    assert_close(&r.re(), 0.0, 1e-15);
    assert_close(&r.im(), std::f64::consts::PI, 1e-12);
}

#[test]
fn undefined_without_complex_retry_is_a_math_error() {
    // csc(0) has no real value and no complex retry
    let zero = Number::from(0);
    let err = zero.csc(None, &cfg()).unwrap_err();
    assert!(matches!(err, CalcError::Math(_)));
    // ln(0) has no value even in the complex plane
    let err = zero.ln(None, &cfg()).unwrap_err();
    assert!(matches!(err, CalcError::Math(_)));
}

// =============================================================================
// SECTION 3: two-argument wrappers
// =============================================================================

#[test]
fn atan2_and_hypot() {
    let one = Number::from(1);
    assert_close(
        &one.atan2(1, None, &cfg()).unwrap(),
        std::f64::consts::FRAC_PI_4,
        1e-14,
    );
    let three = Number::from(3);
    assert_close(&three.hypot(4, None, &cfg()).unwrap(), 5.0, 1e-14);
}

#[test]
fn root_requires_a_positive_integer_index() {
    let hundred = Number::from(100);
    assert_close(&hundred.root(2, None, &cfg()).unwrap(), 10.0, 1e-12);
    let err = hundred.root(Number::with_parts(1, 2).unwrap(), None, &cfg());
    assert!(matches!(err, Err(CalcError::Math(_))));
    let err = Number::from(-8).root(2, None, &cfg());
    assert!(matches!(err, Err(CalcError::Math(_))));
    assert_close(&Number::from(-8).root(3, None, &cfg()).unwrap(), -2.0, 1e-12);
}

// =============================================================================
// SECTION 4: power
// =============================================================================

#[test]
fn integer_powers_are_exact() {
    let n = Number::with_parts(3, 2).unwrap();
    let r = n.power(2, None, &cfg()).unwrap().into_real().unwrap();
    assert_eq!(r, Number::with_parts(9, 4).unwrap());
    let r = Number::from(-2).power(3, None, &cfg()).unwrap().into_real().unwrap();
    assert_eq!(r, Number::from(-8));
}

#[test]
fn fractional_power_of_negative_base_is_complex() {
    // (-1)^(1/10) = cos(pi/10) + i sin(pi/10)
    let r = Number::from(-1)
        .power(Number::with_parts(1, 10).unwrap(), None, &cfg())
        .unwrap();
    assert!(!r.is_real());
    assert_close(&r.re(), 0.9510565162951535, 1e-12);
    assert_close(&r.im(), 0.3090169943749474, 1e-12);
}

#[test]
fn power_accepts_string_exponents() {
    let r = Number::from(4)
        .power("0.5", None, &cfg())
        .unwrap()
        .into_real()
        .unwrap();
    assert_close(&r, 2.0, 1e-12);
}
