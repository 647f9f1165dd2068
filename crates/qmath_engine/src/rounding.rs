//! Rounding, truncation and approximation primitives.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, Zero};

/// How a quotient is rounded to an integer. The `Half*` variants agree with
/// plain nearest-rounding except on exact ties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundMode {
    /// Toward negative infinity.
    Down,
    /// Toward positive infinity.
    Up,
    /// Toward zero.
    Zero,
    /// Away from zero.
    Away,
    /// Nearest; ties toward negative infinity.
    HalfDown,
    /// Nearest; ties toward positive infinity.
    HalfUp,
    /// Nearest; ties toward zero.
    HalfZero,
    /// Nearest; ties away from zero.
    HalfAway,
    /// Nearest; ties to the even integer.
    #[default]
    HalfEven,
}

/// Round a rational to an integer under the given mode.
pub fn round_quotient(v: &BigRational, mode: RoundMode) -> BigInt {
    let floor = v.floor().to_integer();
    let frac = v - BigRational::from_integer(floor.clone());
    let half = BigRational::new(BigInt::one(), BigInt::from(2u32));

    match mode {
        RoundMode::Down => floor,
        RoundMode::Up => {
            if frac.is_zero() {
                floor
            } else {
                floor + 1
            }
        }
        RoundMode::Zero => v.trunc().to_integer(),
        RoundMode::Away => {
            if frac.is_zero() {
                floor
            } else if v.is_negative() {
                floor
            } else {
                floor + 1
            }
        }
        _ => {
            if frac < half {
                floor
            } else if frac > half {
                floor + 1
            } else {
                // exact tie
                match mode {
                    RoundMode::HalfDown => floor,
                    RoundMode::HalfUp => floor + 1,
                    RoundMode::HalfZero => {
                        if v.is_negative() {
                            floor + 1
                        } else {
                            floor
                        }
                    }
                    RoundMode::HalfAway => {
                        if v.is_negative() {
                            floor
                        } else {
                            floor + 1
                        }
                    }
                    _ => {
                        // HalfEven
                        if floor.is_even() {
                            floor
                        } else {
                            floor + 1
                        }
                    }
                }
            }
        }
    }
}

fn pow10(places: i64) -> BigRational {
    let ten = BigInt::from(10u32);
    if places >= 0 {
        BigRational::from_integer(ten.pow(places as u64))
    } else {
        BigRational::new(BigInt::one(), ten.pow((-places) as u64))
    }
}

/// Round to `places` decimal places.
pub fn round(x: &BigRational, places: i64, mode: RoundMode) -> BigRational {
    let scale = pow10(places);
    BigRational::from_integer(round_quotient(&(x * &scale), mode)) / scale
}

/// Round to `places` binary places.
pub fn bround(x: &BigRational, places: i64, mode: RoundMode) -> BigRational {
    let scale = crate::series::pow2(places);
    BigRational::from_integer(round_quotient(&(x * &scale), mode)) / scale
}

/// Truncate toward zero at `places` decimal places.
pub fn trunc(x: &BigRational, places: i64) -> BigRational {
    round(x, places, RoundMode::Zero)
}

/// Truncate toward zero at `places` binary places.
pub fn btrunc(x: &BigRational, places: i64) -> BigRational {
    bround(x, places, RoundMode::Zero)
}

/// Integer part (toward zero).
pub fn int_part(x: &BigRational) -> BigRational {
    x.trunc()
}

/// Fractional part; `x == int_part(x) + frac_part(x)`.
pub fn frac_part(x: &BigRational) -> BigRational {
    x.fract()
}

/// Approximate by a multiple of `eps` under the given mode.
/// A zero epsilon returns the value unchanged.
pub fn appr(x: &BigRational, eps: &BigRational, mode: RoundMode) -> BigRational {
    if eps.is_zero() {
        return x.clone();
    }
    let e = eps.abs();
    BigRational::from_integer(round_quotient(&(x / &e), mode)) * e
}

/// Compare |a - b| against |eps|: Less when the values are within the bound.
pub fn near(a: &BigRational, b: &BigRational, eps: &BigRational) -> std::cmp::Ordering {
    (a - b).abs().cmp(&eps.abs())
}

/// Continued-fraction coefficients of a rational (finite expansion).
fn cf_terms(x: &BigRational) -> Vec<BigInt> {
    let mut terms = Vec::new();
    let mut num = x.numer().clone();
    let mut den = x.denom().clone();
    while !den.is_zero() {
        let (q, r) = num.div_mod_floor(&den);
        terms.push(q);
        num = den;
        den = r;
    }
    terms
}

fn convergent(terms: &[BigInt]) -> BigRational {
    let mut p_prev = BigInt::one();
    let mut p = terms[0].clone();
    let mut q_prev = BigInt::zero();
    let mut q = BigInt::one();
    for a in &terms[1..] {
        let p_next = a * &p + &p_prev;
        let q_next = a * &q + &q_prev;
        p_prev = p;
        p = p_next;
        q_prev = q;
        q = q_next;
    }
    BigRational::new(p, q)
}

/// Best continued-fraction approximation within `eps` of `x`: the first
/// convergent whose error is inside the bound.
pub fn cfappr(x: &BigRational, eps: &BigRational) -> BigRational {
    if x.is_integer() || eps.is_zero() {
        return x.clone();
    }
    let bound = eps.abs();
    let terms = cf_terms(x);
    for k in 1..=terms.len() {
        let c = convergent(&terms[..k]);
        if (&c - x).abs() <= bound {
            return c;
        }
    }
    x.clone()
}

/// Continued-fraction simplification: drop the last coefficient, yielding
/// the previous (simpler) approximant. Integers are already simplest.
pub fn cfsim(x: &BigRational) -> BigRational {
    let terms = cf_terms(x);
    if terms.len() <= 1 {
        return x.clone();
    }
    convergent(&terms[..terms.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn decimal_rounding_modes() {
        let x = q(7, 32); // 0.21875
        assert_eq!(round(&x, 3, RoundMode::HalfEven), q(219, 1000));
        assert_eq!(trunc(&x, 3), q(218, 1000));
        assert_eq!(round(&q(-5, 2), 0, RoundMode::Down), q(-3, 1));
        assert_eq!(round(&q(-5, 2), 0, RoundMode::Up), q(-2, 1));
        assert_eq!(round(&q(-5, 2), 0, RoundMode::HalfEven), q(-2, 1));
        assert_eq!(round(&q(5, 2), 0, RoundMode::HalfEven), q(2, 1));
        assert_eq!(round(&q(7, 2), 0, RoundMode::HalfEven), q(4, 1));
        assert_eq!(round(&q(5, 2), 0, RoundMode::HalfAway), q(3, 1));
        assert_eq!(round(&q(-5, 2), 0, RoundMode::HalfAway), q(-3, 1));
    }

    #[test]
    fn binary_rounding() {
        assert_eq!(btrunc(&q(7, 32), 3), q(1, 8));
        assert_eq!(btrunc(&q(22, 7), 0), q(3, 1));
        assert_eq!(bround(&q(7, 32), 2, RoundMode::HalfEven), q(1, 4));
    }

    #[test]
    fn appr_rounds_to_multiples() {
        // 5.44 approximated by multiples of 0.1, toward zero
        assert_eq!(appr(&q(544, 100), &q(1, 10), RoundMode::Zero), q(54, 10));
        assert_eq!(appr(&q(544, 100), &q(0, 1), RoundMode::Zero), q(544, 100));
    }

    #[test]
    fn near_classifies_distance() {
        use std::cmp::Ordering;
        assert_eq!(near(&q(22, 7), &q(315, 100), &q(1, 100)), Ordering::Less);
        assert_eq!(near(&q(22, 7), &q(315, 100), &q(5, 1000)), Ordering::Greater);
        assert_eq!(near(&q(3, 1), &q(2, 1), &q(1, 1)), Ordering::Equal);
    }

    #[test]
    fn continued_fraction_approximation() {
        // 5033165/16777216 ~ 0.29999998...
        let x = q(5033165, 16777216);
        assert_eq!(cfappr(&x, &q(1, 100)), q(3, 10));
        assert_eq!(cfappr(&x, &q(1, 10)), q(1, 3));
        let simple = cfsim(&q(22, 7));
        assert_eq!(simple, q(3, 1));
        assert_eq!(cfsim(&q(5, 1)), q(5, 1));
    }
}
