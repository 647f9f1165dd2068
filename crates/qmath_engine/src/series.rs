//! Epsilon-bounded kernels over exact rationals.
//!
//! Every function here computes its result to within the caller's epsilon:
//! `|returned − true value| <= eps`. All intermediate arithmetic is exact
//! rational arithmetic; convergence control is by series tail bounds, so the
//! guarantee holds without interval tracking.
//!
//! The kernels are: `pi`, `sqrt`, `exp`, `ln`, `sin`, `cos`, `atan`. The rest
//! of the transcendental surface (see `trans`) is built from these by
//! identities.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

pub(crate) fn int(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

pub(crate) fn ratio(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// 2^k as an exact rational, k may be negative.
pub(crate) fn pow2(k: i64) -> BigRational {
    let two = BigInt::from(2u32);
    if k >= 0 {
        BigRational::from_integer(two.pow(k as u64))
    } else {
        BigRational::new(BigInt::one(), two.pow((-k) as u64))
    }
}

/// arctan for |t| <= 1/2 by the Gregory series.
/// Alternating terms, ratio <= 1/4; the tail is bounded by the first
/// omitted term.
fn atan_small(t: &BigRational, eps: &BigRational) -> BigRational {
    let t2 = t * t;
    let mut pow = t.clone();
    let mut sum = BigRational::zero();
    let mut k: i64 = 0;
    let mut negative = false;
    loop {
        let term = &pow / int(2 * k + 1);
        if term.abs() < *eps {
            return sum;
        }
        if negative {
            sum -= term;
        } else {
            sum += term;
        }
        pow *= &t2;
        negative = !negative;
        k += 1;
    }
}

/// artanh for 0 <= t <= 1/3. All terms positive, ratio <= 1/9.
fn atanh_small(t: &BigRational, eps: &BigRational) -> BigRational {
    let t2 = t * t;
    let tail_factor = (BigRational::one() - &t2).recip();
    let mut pow = t.clone();
    let mut sum = BigRational::zero();
    let mut k: i64 = 0;
    loop {
        let term = &pow / int(2 * k + 1);
        if &term * &tail_factor < *eps {
            return sum;
        }
        sum += term;
        pow *= &t2;
        k += 1;
    }
}

/// pi by Machin's formula: 16 atan(1/5) - 4 atan(1/239).
pub fn pi(eps: &BigRational) -> BigRational {
    let e1 = eps / int(32);
    let e2 = eps / int(8);
    int(16) * atan_small(&ratio(1, 5), &e1) - int(4) * atan_small(&ratio(1, 239), &e2)
}

/// ln 2 = 2 artanh(1/3).
fn ln2(eps: &BigRational) -> BigRational {
    int(2) * atanh_small(&ratio(1, 3), &(eps / int(2)))
}

/// Square root by Newton iteration from an integer-sqrt seed.
/// `None` for negative input.
pub fn sqrt(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.is_negative() {
        return None;
    }
    if x.is_zero() {
        return Some(BigRational::zero());
    }
    // sqrt(n/d) = sqrt(n*d)/d gives a seed within a factor of ~2
    let nd = x.numer() * x.denom();
    let mut y = BigRational::new(nd.sqrt() + BigInt::one(), x.denom().clone());
    loop {
        // |y - sqrt(x)| <= |y^2 - x| / y  once y is on the high side
        if (&y * &y - x).abs() <= eps * &y {
            return Some(y);
        }
        y = (&y + x / &y) / int(2);
    }
}

/// Exponential. `None` when the argument magnitude is beyond the
/// representable range (the result would have millions of digits).
pub fn exp(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if x.abs() > int(1 << 20) {
        return None;
    }
    if x.is_negative() {
        // exp(x) = 1/exp(-x) with exp(-x) >= 1, so an absolute error `a`
        // upstream maps to at most `2a` here for a <= 1/2.
        let inner = exp(&-x, &(eps / int(2)).min(ratio(1, 2)))?;
        return Some(inner.recip());
    }

    // halve the argument into [0, 1/2], square back up afterwards
    let mut m: u32 = 0;
    let half = ratio(1, 2);
    let mut xr = x.clone();
    while xr > half {
        xr /= int(2);
        m += 1;
    }

    // worst-case error growth through m squarings, with e^x <= 4^ceil(x)
    let ceil_x = x.ceil().to_integer().to_u64().unwrap_or(1).max(1);
    let bound = BigRational::from_integer(BigInt::from(4u32).pow(ceil_x));
    let growth = (int(3) * &bound).pow(m as i32).max(BigRational::one());
    let inner_eps = eps / (growth * int(2));

    let mut y = exp_taylor(&xr, &inner_eps);
    for _ in 0..m {
        y = &y * &y;
    }
    Some(y)
}

/// Taylor series of e^u for 0 <= u <= 1/2. Term ratio <= 1/2, so the tail is
/// at most twice the first omitted term.
fn exp_taylor(u: &BigRational, eps: &BigRational) -> BigRational {
    let mut term = BigRational::one();
    let mut sum = BigRational::zero();
    let mut k: i64 = 0;
    loop {
        if &term * int(2) < *eps {
            return sum;
        }
        sum += &term;
        k += 1;
        term = term * u / int(k);
    }
}

/// Natural logarithm. `None` for non-positive input.
pub fn ln(x: &BigRational, eps: &BigRational) -> Option<BigRational> {
    if !x.is_positive() {
        return None;
    }
    // scale x = m * 2^k with m in [1, 2)
    let mut k = x.numer().bits() as i64 - x.denom().bits() as i64;
    let mut m = x * pow2(-k);
    while m >= int(2) {
        m /= int(2);
        k += 1;
    }
    while m < BigRational::one() {
        m *= int(2);
        k -= 1;
    }

    let t = (&m - BigRational::one()) / (&m + BigRational::one());
    let frac_part = int(2) * atanh_small(&t, &(eps / int(4)));
    if k == 0 {
        return Some(frac_part);
    }
    let ln2_eps = eps / (int(2) * int(k.abs() + 1));
    Some(int(k) * ln2(&ln2_eps) + frac_part)
}

/// Reduce x by multiples of 2*pi; the result magnitude stays below ~3*pi + 1
/// even when the rough quotient estimate is off by one.
fn reduce_angle(x: &BigRational, eps: &BigRational) -> BigRational {
    // the rough pi must be accurate relative to |x| so the multiple is
    // off by at most one
    let rough_eps = ratio(1, 1_000_000) / (BigRational::one() + x.abs());
    let rough = pi(&rough_eps);
    let n = (x / (int(2) * rough) + ratio(1, 2)).floor();
    if n.is_zero() {
        return x.clone();
    }
    let n_abs = n.abs().to_integer();
    let fine_eps = eps / (int(4) * BigRational::from_integer(n_abs));
    x - int(2) * n * pi(&fine_eps)
}

/// Sine, any argument.
pub fn sin(x: &BigRational, eps: &BigRational) -> BigRational {
    let xr = reduce_angle(x, eps);
    let x2 = &xr * &xr;
    // sum (-1)^k x^(2k+1)/(2k+1)!, terms decrease once 2k(2k+1) > x^2
    let mut term = xr;
    let mut sum = BigRational::zero();
    let mut k: i64 = 0;
    let mut negative = false;
    loop {
        if k >= 6 && term.abs() < eps / int(2) {
            return sum;
        }
        if negative {
            sum -= &term;
        } else {
            sum += &term;
        }
        k += 1;
        term = term * &x2 / int(2 * k * (2 * k + 1));
        negative = !negative;
    }
}

/// Cosine, any argument.
pub fn cos(x: &BigRational, eps: &BigRational) -> BigRational {
    let xr = reduce_angle(x, eps);
    let x2 = &xr * &xr;
    let mut term = BigRational::one();
    let mut sum = BigRational::zero();
    let mut k: i64 = 0;
    let mut negative = false;
    loop {
        if k >= 6 && term.abs() < eps / int(2) {
            return sum;
        }
        if negative {
            sum -= &term;
        } else {
            sum += &term;
        }
        k += 1;
        term = term * &x2 / int(2 * k * (2 * k - 1));
        negative = !negative;
    }
}

/// arctangent, any argument.
pub fn atan(x: &BigRational, eps: &BigRational) -> BigRational {
    if x.is_negative() {
        return -atan(&-x, eps);
    }
    if *x > BigRational::one() {
        // atan(x) = pi/2 - atan(1/x)
        return pi(eps) / int(2) - atan(&x.recip(), &(eps / int(2)));
    }
    let half = ratio(1, 2);
    if *x > half {
        // atan(x) = atan(1/2) + atan((2x-1)/(2+x)); the new argument is in [0, 1/3]
        let reduced = (int(2) * x - BigRational::one()) / (int(2) + x);
        return atan_small(&half, &(eps / int(2))) + atan_small(&reduced, &(eps / int(2)));
    }
    atan_small(x, eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;

    fn eps(p: i32) -> BigRational {
        BigRational::new(BigInt::one(), BigInt::from(10u32).pow(p as u64))
    }

    fn close(actual: &BigRational, expected: f64, tol: f64) {
        let a = actual.to_f64().unwrap();
        assert!(
            (a - expected).abs() <= tol,
            "got {a}, expected {expected}"
        );
    }

    #[test]
    fn pi_matches_known_digits() {
        close(&pi(&eps(15)), std::f64::consts::PI, 1e-14);
    }

    #[test]
    fn sqrt_of_two() {
        close(&sqrt(&int(2), &eps(15)).unwrap(), std::f64::consts::SQRT_2, 1e-14);
        assert!(sqrt(&int(-1), &eps(10)).is_none());
        assert_eq!(sqrt(&int(0), &eps(10)).unwrap(), int(0));
    }

    #[test]
    fn exp_and_ln_are_inverse_at_known_points() {
        close(&exp(&int(1), &eps(15)).unwrap(), std::f64::consts::E, 1e-13);
        close(&exp(&int(-2), &eps(15)).unwrap(), (-2.0f64).exp(), 1e-13);
        close(&ln(&int(2), &eps(15)).unwrap(), std::f64::consts::LN_2, 1e-14);
        close(&ln(&ratio(1, 10), &eps(15)).unwrap(), (0.1f64).ln(), 1e-13);
        assert!(ln(&int(0), &eps(10)).is_none());
        assert!(ln(&int(-3), &eps(10)).is_none());
    }

    #[test]
    fn trig_at_known_points() {
        close(&sin(&int(1), &eps(15)), 1.0f64.sin(), 1e-13);
        close(&cos(&int(1), &eps(15)), 1.0f64.cos(), 1e-13);
        close(&sin(&int(100), &eps(15)), 100.0f64.sin(), 1e-12);
        close(&atan(&int(1), &eps(15)), std::f64::consts::FRAC_PI_4, 1e-13);
        close(&atan(&int(-5), &eps(15)), (-5.0f64).atan(), 1e-13);
        close(&atan(&ratio(3, 10), &eps(15)), 0.3f64.atan(), 1e-13);
    }
}
