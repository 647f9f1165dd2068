//! Complex arithmetic over exact rational parts.
//!
//! `CValue` is the engine-level complex pair. The complex transcendentals
//! here are the retry targets for real primitives that returned `None`: they
//! are total on a wider domain (`acos(2)`, `acosh(0)`, `atanh(2)`, `ln(-1)`)
//! and are built from the real kernels through the usual logarithmic
//! identities. They still return `None` for genuine non-values (`ln(0)`,
//! division by zero).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::series::{self, int};
use crate::trans;

/// Engine-level complex value: exact rational real and imaginary parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CValue {
    pub re: BigRational,
    pub im: BigRational,
}

impl CValue {
    pub fn new(re: BigRational, im: BigRational) -> Self {
        CValue { re, im }
    }

    pub fn from_real(re: BigRational) -> Self {
        CValue {
            re,
            im: BigRational::zero(),
        }
    }

    pub fn zero() -> Self {
        CValue::from_real(BigRational::zero())
    }

    pub fn one() -> Self {
        CValue::from_real(BigRational::one())
    }

    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn conj(&self) -> CValue {
        CValue::new(self.re.clone(), -self.im.clone())
    }

    pub fn neg(&self) -> CValue {
        CValue::new(-self.re.clone(), -self.im.clone())
    }

    /// Multiplication by i.
    pub fn mul_i(&self) -> CValue {
        CValue::new(-self.im.clone(), self.re.clone())
    }

    /// Division by i (multiplication by -i).
    pub fn div_i(&self) -> CValue {
        CValue::new(self.im.clone(), -self.re.clone())
    }

    /// |z|^2, exact.
    pub fn norm(&self) -> BigRational {
        &self.re * &self.re + &self.im * &self.im
    }
}

pub fn add(a: &CValue, b: &CValue) -> CValue {
    CValue::new(&a.re + &b.re, &a.im + &b.im)
}

pub fn sub(a: &CValue, b: &CValue) -> CValue {
    CValue::new(&a.re - &b.re, &a.im - &b.im)
}

pub fn mul(a: &CValue, b: &CValue) -> CValue {
    CValue::new(
        &a.re * &b.re - &a.im * &b.im,
        &a.re * &b.im + &a.im * &b.re,
    )
}

/// Division by the conjugate method. `None` for a zero divisor.
pub fn div(a: &CValue, b: &CValue) -> Option<CValue> {
    let n = b.norm();
    if n.is_zero() {
        return None;
    }
    let p = mul(a, &b.conj());
    Some(CValue::new(p.re / &n, p.im / n))
}

fn real_scale(z: &CValue, s: &BigRational) -> CValue {
    CValue::new(&z.re * s, &z.im * s)
}

/// Complex square root by the half-angle-free stable formula.
pub fn sqrt(z: &CValue, eps: &BigRational) -> Option<CValue> {
    if z.im.is_zero() {
        return if z.re.is_negative() {
            let s = series::sqrt(&-z.re.clone(), eps)?;
            Some(CValue::new(BigRational::zero(), s))
        } else {
            let s = series::sqrt(&z.re, eps)?;
            Some(CValue::from_real(s))
        };
    }
    // r = |z|; re' = sqrt((r + re)/2), im' = sign(im) * sqrt((r - re)/2)
    let e = eps / int(4);
    let r = trans::hypot(&z.re, &z.im, &e)?;
    let re_part = series::sqrt(&((&r + &z.re) / int(2)), &e)?;
    let im_mag = series::sqrt(&((&r - &z.re) / int(2)), &e)?;
    let im_part = if z.im.is_negative() { -im_mag } else { im_mag };
    Some(CValue::new(re_part, im_part))
}

/// Principal complex logarithm: (ln |z|, atan2(im, re)). `None` at zero.
pub fn ln(z: &CValue, eps: &BigRational) -> Option<CValue> {
    if z.is_zero() {
        return None;
    }
    let e = eps / int(2);
    // ln|z| = ln(|z|^2) / 2 keeps the argument exact
    let mag = series::ln(&z.norm(), &(int(2) * &e))?;
    let arg = trans::atan2(&z.im, &z.re, &e)?;
    Some(CValue::new(mag / int(2), arg))
}

/// Complex exponential: e^re * (cos im, sin im).
pub fn exp(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let e = eps / int(8);
    let scale = series::exp(&z.re, &e)?;
    // both factors bounded by |scale| + 1, split the budget accordingly
    let trig_eps = (&e / (scale.abs() + BigRational::one())).min(e.clone());
    let c = series::cos(&z.im, &trig_eps);
    let s = series::sin(&z.im, &trig_eps);
    Some(CValue::new(&scale * c, scale * s))
}

/// Principal complex power: exact Gaussian exponentiation for integer
/// exponents, exp(w ln z) otherwise.
pub fn power(z: &CValue, w: &CValue, eps: &BigRational) -> Option<CValue> {
    if z.is_zero() {
        if w.is_zero() {
            return Some(CValue::one());
        }
        return if w.im.is_zero() && w.re.is_positive() {
            Some(CValue::zero())
        } else {
            None
        };
    }
    if w.im.is_zero() && w.re.is_integer() {
        return pow_int(z, w.re.numer());
    }
    // coarse pass bounds |z^w| for the fine epsilon budget
    let coarse = series::ratio(1, 1_000);
    let l1 = ln(z, &coarse)?;
    let r1 = exp(&mul(w, &l1), &coarse)?;
    let bound = r1.re.abs() + r1.im.abs() + int(2);

    let dv = eps / (int(8) * bound * (w.re.abs() + w.im.abs() + int(1)));
    let l = ln(z, &dv)?;
    exp(&mul(w, &l), &(eps / int(2)))
}

/// Exact integer power by binary exponentiation over Gaussian rationals;
/// exponent magnitudes past 2^31 are refused.
fn pow_int(z: &CValue, e: &BigInt) -> Option<CValue> {
    if e.abs() >= BigInt::from(1u64 << 31) {
        return None;
    }
    let mut n: u64 = e.abs().try_into().ok()?;
    let mut base = z.clone();
    let mut acc = CValue::one();
    while n > 0 {
        if n & 1 == 1 {
            acc = mul(&acc, &base);
        }
        n >>= 1;
        if n > 0 {
            base = mul(&base, &base);
        }
    }
    if e.is_negative() {
        return div(&CValue::one(), &acc);
    }
    Some(acc)
}

/// acos(z) = -i ln(z + i sqrt(1 - z^2)).
pub fn acos(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let e = eps / int(8);
    let one = CValue::one();
    let s = sqrt(&sub(&one, &mul(z, z)), &e)?;
    let u = add(z, &s.mul_i());
    Some(ln(&u, &e)?.div_i())
}

/// asin(z) = pi/2 - acos(z).
pub fn asin(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let a = acos(z, &(eps / int(2)))?;
    let half_pi = series::pi(&(eps / int(2))) / int(2);
    Some(CValue::new(half_pi - a.re, -a.im))
}

/// acosh(z) = ln(z + sqrt(z^2 - 1)).
pub fn acosh(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let e = eps / int(8);
    let s = sqrt(&sub(&mul(z, z), &CValue::one()), &e)?;
    ln(&add(z, &s), &e)
}

/// asinh(z) = ln(z + sqrt(z^2 + 1)).
pub fn asinh(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let e = eps / int(8);
    let s = sqrt(&add(&mul(z, z), &CValue::one()), &e)?;
    ln(&add(z, &s), &e)
}

/// atanh(z) = ln((1 + z)/(1 - z)) / 2.
pub fn atanh(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let one = CValue::one();
    let q = div(&add(&one, z), &sub(&one, z))?;
    let l = ln(&q, &(int(2) * eps))?;
    Some(real_scale(&l, &series::ratio(1, 2)))
}

pub fn acoth(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let inv = div(&CValue::one(), z)?;
    atanh(&inv, eps)
}

pub fn asec(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let inv = div(&CValue::one(), z)?;
    acos(&inv, eps)
}

pub fn acsc(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let inv = div(&CValue::one(), z)?;
    asin(&inv, eps)
}

pub fn asech(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let inv = div(&CValue::one(), z)?;
    acosh(&inv, eps)
}

pub fn acsch(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let inv = div(&CValue::one(), z)?;
    asinh(&inv, eps)
}

/// Complex base-10 logarithm.
pub fn log(z: &CValue, eps: &BigRational) -> Option<CValue> {
    let l = ln(z, &(eps / int(2)))?;
    let scale = eps / (int(4) * (l.re.abs() + l.im.abs() + int(1)));
    let l10 = series::ln(&int(10), &scale)?;
    Some(CValue::new(l.re / &l10, l.im / l10))
}
