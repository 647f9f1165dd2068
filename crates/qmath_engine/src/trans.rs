//! Real-valued transcendental primitives.
//!
//! Uniform signature: argument(s) plus an epsilon bound, `Option` result.
//! `None` means the value does not exist over the reals (or the argument is
//! outside the representable range); it carries no other failure information.
//! The dispatch layer decides whether `None` triggers a complex retry or an
//! error.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::series::{self, int, ratio};

/// Tighten epsilon until a provably nonzero value separates from zero,
/// returning the approximation and a lower bound on the true magnitude.
/// Callers must exclude arguments where the true value is exactly zero.
fn magnitude_floor<F>(compute: F) -> (BigRational, BigRational)
where
    F: Fn(&BigRational) -> BigRational,
{
    let mut e = ratio(1, 1_000);
    loop {
        let v = compute(&e);
        if v.abs() > int(2) * &e {
            let floor = v.abs() - &e;
            return (v, floor);
        }
        e /= int(1_000);
    }
}

pub fn sin(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    Some(series::sin(x, eps))
}

pub fn cos(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    Some(series::cos(x, eps))
}

/// tan = sin/cos. cos of a nonzero rational is never exactly zero, so the
/// pole is unreachable for exact arguments.
pub fn tan(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    let (_, g) = magnitude_floor(|e| series::cos(x, e));
    // |d(s/c)| <= (ds + dc)/g^2 for |s| <= 1
    let inner = eps * &g * &g / int(4);
    let s = series::sin(x, &inner);
    let c = series::cos(x, &inner);
    Some(s / c)
}

pub fn sec(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    let (_, g) = magnitude_floor(|e| series::cos(x, e));
    let inner = eps * &g * &g / int(2);
    Some(series::cos(x, &inner).recip())
}

pub fn csc(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.is_zero() {
        return None;
    }
    let (_, g) = magnitude_floor(|e| series::sin(x, e));
    let inner = eps * &g * &g / int(2);
    Some(series::sin(x, &inner).recip())
}

pub fn cot(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.is_zero() {
        return None;
    }
    let (_, g) = magnitude_floor(|e| series::sin(x, e));
    let inner = eps * &g * &g / int(4);
    let s = series::sin(x, &inner);
    let c = series::cos(x, &inner);
    Some(c / s)
}

pub fn exp(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    series::exp(x, eps)
}

pub fn ln(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    series::ln(x, eps)
}

/// Base-10 logarithm.
pub fn log(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    let l = series::ln(x, &(eps / int(2)))?;
    let scale = eps / (int(4) * (l.abs() + int(1)));
    let l10 = series::ln(&int(10), &scale)?;
    Some(l / l10)
}

pub fn sinh(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    let e = eps / int(4);
    let a = series::exp(x, &e)?;
    let b = series::exp(&-x, &e)?;
    Some((a - b) / int(2))
}

pub fn cosh(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    let e = eps / int(4);
    let a = series::exp(x, &e)?;
    let b = series::exp(&-x, &e)?;
    Some((a + b) / int(2))
}

/// tanh = (e^2x - 1)/(e^2x + 1); the denominator never drops below 1 for
/// x >= 0, so error transfer is benign.
pub fn tanh(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.is_negative() {
        return tanh(&-x, eps).map(|t| -t);
    }
    let e2x = series::exp(&(int(2) * x), eps)?;
    Some((&e2x - BigRational::one()) / (e2x + BigRational::one()))
}

pub fn sech(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    // cosh >= 1
    let c = cosh(x, &(eps / int(2)))?;
    Some(c.recip())
}

pub fn csch(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.is_zero() {
        return None;
    }
    // |sinh x| >= |x|
    let g = x.abs().min(BigRational::one());
    let inner = (eps * &g * &g / int(2)).min(&g / int(2));
    let s = sinh(x, &inner)?;
    Some(s.recip())
}

pub fn coth(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.is_zero() {
        return None;
    }
    // |tanh x| >= min(|x|/2, 1/2)
    let g = (x.abs() / int(2)).min(ratio(1, 2));
    let inner = (eps * &g * &g / int(2)).min(&g / int(2));
    let t = tanh(x, &inner)?;
    Some(t.recip())
}

pub fn asin(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    let one = BigRational::one();
    if x.abs() > one {
        return None;
    }
    if x.abs() == one {
        let half_pi = series::pi(&(int(2) * eps)) / int(2);
        return Some(if x.is_negative() { -half_pi } else { half_pi });
    }
    // asin(x) = atan(x / sqrt(1 - x^2))
    let u = &one - x * x;
    let s_eps = (eps * &u / (int(2) * (x.abs() + one))).min(&u / int(4));
    let s = series::sqrt(&u, &s_eps)?;
    Some(series::atan(&(x / s), &(eps / int(2))))
}

pub fn acos(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    let a = asin(x, &(eps / int(2)))?;
    Some(series::pi(&(eps / int(2))) / int(2) - a)
}

pub fn atan(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    Some(series::atan(x, eps))
}

pub fn asec(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.abs() < BigRational::one() {
        return None;
    }
    acos(&x.recip(), eps)
}

pub fn acsc(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.abs() < BigRational::one() {
        return None;
    }
    asin(&x.recip(), eps)
}

/// acot with range (0, pi).
pub fn acot(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    let a = series::atan(x, &(eps / int(2)));
    Some(series::pi(&(eps / int(2))) / int(2) - a)
}

pub fn asinh(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.is_negative() {
        return asinh(&-x, eps).map(|v| -v);
    }
    // ln(x + sqrt(x^2 + 1)); the argument is >= 1
    let s = series::sqrt(&(x * x + BigRational::one()), &(eps / int(4)))?;
    series::ln(&(x + s), &(eps / int(2)))
}

pub fn acosh(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if *x < BigRational::one() {
        return None;
    }
    let s = series::sqrt(&(x * x - BigRational::one()), &(eps / int(4)))?;
    series::ln(&(x + s), &(eps / int(2)))
}

pub fn atanh(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.abs() >= BigRational::one() {
        return None;
    }
    let arg = (BigRational::one() + x) / (BigRational::one() - x);
    series::ln(&arg, &(int(2) * eps)).map(|l| l / int(2))
}

pub fn asech(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if !x.is_positive() || *x > BigRational::one() {
        return None;
    }
    acosh(&x.recip(), eps)
}

pub fn acsch(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.is_zero() {
        return None;
    }
    asinh(&x.recip(), eps)
}

pub fn acoth(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.abs() <= BigRational::one() {
        return None;
    }
    atanh(&x.recip(), eps)
}

/// Angle of the point (x, y); zero for the origin.
pub fn atan2(y: &BigRational, x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.is_zero() {
        if y.is_zero() {
            return Some(BigRational::zero());
        }
        let half_pi = series::pi(&(int(2) * eps)) / int(2);
        return Some(if y.is_negative() { -half_pi } else { half_pi });
    }
    let base = series::atan(&(y / x), &(eps / int(2)));
    if x.is_positive() {
        return Some(base);
    }
    let p = series::pi(&(eps / int(2)));
    Some(if y.is_negative() { base - p } else { base + p })
}

pub fn hypot(x: &BigRational, y: &BigRational, eps: &BigRational) -> Option<BigRational> {
    series::sqrt(&(x * x + y * y), eps)
}

/// n-th root, n a positive integer. Negative base allowed for odd n.
pub fn root(x: &BigRational, n: &BigInt, eps: &BigRational) -> Option<BigRational> {
    if !n.is_positive() {
        return None;
    }
    if x.is_zero() {
        return Some(BigRational::zero());
    }
    if x.is_negative() {
        if (n % BigInt::from(2u32)).is_zero() {
            return None;
        }
        return root(&-x, n, eps).map(|r| -r);
    }
    let n_q = BigRational::from_integer(n.clone());
    // x^(1/n) <= max(x, 1)
    let bound = x.clone().max(BigRational::one()) + int(1);
    let v_eps = eps / (int(4) * bound);
    let l = series::ln(x, &(&v_eps * &n_q))?;
    series::exp(&(l / n_q), &(eps / int(2)))
}

/// x^y to within eps. Exact when y is an integer. `None` when the result is
/// not real (negative base, fractional exponent) or out of range.
pub fn power(x: &BigRational, y: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if y.is_zero() {
        return Some(BigRational::one());
    }
    if x.is_zero() {
        return if y.is_positive() {
            Some(BigRational::zero())
        } else {
            None
        };
    }
    if y.is_integer() {
        return pow_exact(x, y.numer());
    }
    if x.is_negative() {
        return None;
    }

    // two passes: a coarse run bounds the magnitude, the fine run meets eps
    let coarse = ratio(1, 1_000);
    let l1 = series::ln(x, &coarse)?;
    let r1 = series::exp(&(y * &l1), &coarse)?;
    let bound = r1.abs() + int(2);

    let dv = eps / (int(4) * bound);
    let l = series::ln(x, &(&dv / (y.abs() + int(1))))?;
    series::exp(&(y * l), &(eps / int(2)))
}

/// Exact integer power by binary exponentiation; exponent magnitude is
/// capped at 2^31 to bound materialization.
fn pow_exact(x: &BigRational, e: &BigInt) -> Option<BigRational> {
    let cap = BigInt::from(1u64 << 31);
    if e.abs() >= cap {
        return None;
    }
    let mut n: u64 = e.abs().try_into().ok()?;
    let mut base = x.clone();
    let mut acc = BigRational::one();
    while n > 0 {
        if n & 1 == 1 {
            acc *= &base;
        }
        n >>= 1;
        if n > 0 {
            base = &base * &base;
        }
    }
    if e.is_negative() {
        if acc.is_zero() {
            return None;
        }
        acc = acc.recip();
    }
    Some(acc)
}
