//! Division-adjacent arithmetic: modulus, quotient/remainder pairs, shifts
//! and the integer complement.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use crate::rounding::{round_quotient, RoundMode};

/// Remainder of a/b with the quotient rounded under `mode`.
/// The caller guarantees a nonzero divisor.
pub fn modulus(a: &BigRational, b: &BigRational, mode: RoundMode) -> BigRational {
    quomod(a, b, mode).1
}

/// Quotient and remainder: `a == q*b + r` with integral q rounded per `mode`.
pub fn quomod(a: &BigRational, b: &BigRational, mode: RoundMode) -> (BigRational, BigRational) {
    let q = BigRational::from_integer(round_quotient(&(a / b), mode));
    let r = a - &q * b;
    (q, r)
}

/// Shift an integer left (positive count) or right (negative count).
/// Right shifts round toward negative infinity.
pub fn shift(n: &BigInt, count: i64) -> BigInt {
    if count >= 0 {
        n << (count as u64)
    } else {
        n >> ((-count) as u64)
    }
}

/// Complement: -x - 1 for integers, -x otherwise.
pub fn comp(x: &BigRational) -> BigRational {
    if x.is_integer() {
        -(x + BigRational::one())
    } else {
        -x.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn floor_mod_matches_divisor_sign() {
        assert_eq!(modulus(&q(13, 1), &q(4, 1), RoundMode::Down), q(1, 1));
        assert_eq!(modulus(&q(13, 1), &q(-4, 1), RoundMode::Down), q(-3, 1));
        assert_eq!(modulus(&q(11, 1), &q(5, 1), RoundMode::Down), q(1, 1));
    }

    #[test]
    fn quomod_is_consistent() {
        let (quo, rem) = quomod(&q(13, 1), &q(5, 1), RoundMode::Down);
        assert_eq!(quo, q(2, 1));
        assert_eq!(rem, q(3, 1));
        let (quo, rem) = quomod(&q(11, 1), &q(-3, 1), RoundMode::Down);
        assert_eq!(quo, q(-4, 1));
        assert_eq!(rem, q(-1, 1));
        assert!(rem + quo * q(-3, 1) == q(11, 1));
    }

    #[test]
    fn shifts_and_complement() {
        assert_eq!(shift(&BigInt::from(5), 2), BigInt::from(20));
        assert_eq!(shift(&BigInt::from(20), -2), BigInt::from(5));
        assert_eq!(comp(&q(7, 1)), q(-8, 1));
        assert_eq!(comp(&q(1, 2)), q(-1, 2));
        assert!(!comp(&q(0, 1)).is_zero());
    }
}
