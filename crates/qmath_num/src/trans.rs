//! Transcendental wrapper.
//!
//! The engine signals domain failure by returning no value rather than by an
//! error, so this is the single place that (a) resolves the default epsilon
//! and (b) interprets that signal: retry through the complex primitive when
//! one exists, raise a math error otherwise. Results from the complex retry
//! demote back to real handles when the imaginary part is exactly zero.

use num_rational::BigRational;

use crate::complex::Numeric;
use crate::config::Config;
use crate::error::{CalcError, CalcResult};
use crate::normalize;
use crate::number::Number;
use crate::value::HostValue;
use qmath_engine::complexmath::{self, CValue};
use qmath_engine::trans as engine;

type RealFn = fn(&BigRational, &BigRational) -> Option<BigRational>;
type ComplexFn = fn(&CValue, &BigRational) -> Option<CValue>;
type Real2Fn = fn(&BigRational, &BigRational, &BigRational) -> Option<BigRational>;

fn resolve_eps<'a>(eps: Option<&'a Number>, cfg: &'a Config) -> &'a BigRational {
    eps.map(|n| n.as_ratio()).unwrap_or(&cfg.epsilon)
}

/// One-argument wrapper: real primitive, optional complex retry.
fn apply(
    x: &Number,
    eps: Option<&Number>,
    cfg: &Config,
    real: RealFn,
    complex: Option<ComplexFn>,
) -> CalcResult<Numeric> {
    let e = resolve_eps(eps, cfg);
    if let Some(r) = real(x.as_ratio(), e) {
        return Ok(Numeric::Real(Number::from_raw(r)));
    }
    if let Some(retry) = complex {
        tracing::debug!("real primitive returned no value; retrying in the complex plane");
        let z = CValue::from_real(x.as_ratio().clone());
        if let Some(c) = retry(&z, e) {
            return Ok(Numeric::from_cvalue(c));
        }
    }
    Err(CalcError::math("transcendental function returned no value"))
}

/// Same, for primitives with no complex counterpart.
fn apply_real(x: &Number, eps: Option<&Number>, cfg: &Config, real: RealFn) -> CalcResult<Number> {
    match apply(x, eps, cfg, real, None)? {
        Numeric::Real(n) => Ok(n),
        Numeric::Cplx(_) => unreachable!("no complex retry was supplied"),
    }
}

/// Two-argument wrapper: both operands are handles, no complex fallback;
/// a missing value is always a math error.
fn apply2(
    x: &Number,
    other: impl Into<HostValue>,
    eps: Option<&Number>,
    cfg: &Config,
    f: Real2Fn,
) -> CalcResult<Number> {
    let y = normalize::to_number(&other.into(), false)?;
    let e = resolve_eps(eps, cfg);
    f(x.as_ratio(), y.as_ratio(), e)
        .map(Number::from_raw)
        .ok_or_else(|| CalcError::math("transcendental function returned no value"))
}

impl Number {
    pub fn sin(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::sin)
    }

    pub fn cos(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::cos)
    }

    pub fn tan(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::tan)
    }

    pub fn sec(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::sec)
    }

    pub fn csc(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::csc)
    }

    pub fn cot(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::cot)
    }

    pub fn sinh(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::sinh)
    }

    pub fn cosh(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::cosh)
    }

    pub fn tanh(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::tanh)
    }

    pub fn sech(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::sech)
    }

    pub fn csch(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::csch)
    }

    pub fn coth(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::coth)
    }

    pub fn exp(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::exp)
    }

    pub fn atan(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::atan)
    }

    pub fn acot(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::acot)
    }

    pub fn asinh(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        apply_real(self, eps, cfg, engine::asinh)
    }

    /// Inverse sine; arguments beyond [-1, 1] promote to a complex result.
    pub fn asin(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::asin, Some(complexmath::asin))
    }

    /// Inverse cosine; arguments beyond [-1, 1] promote to a complex result.
    pub fn acos(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::acos, Some(complexmath::acos))
    }

    pub fn asec(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::asec, Some(complexmath::asec))
    }

    pub fn acsc(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::acsc, Some(complexmath::acsc))
    }

    pub fn acosh(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::acosh, Some(complexmath::acosh))
    }

    pub fn atanh(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::atanh, Some(complexmath::atanh))
    }

    pub fn acoth(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::acoth, Some(complexmath::acoth))
    }

    pub fn asech(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::asech, Some(complexmath::asech))
    }

    pub fn acsch(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::acsch, Some(complexmath::acsch))
    }

    /// Natural logarithm; non-positive arguments promote to a complex result
    /// (`ln(-1)` is `pi*i`), except zero which has no value at all.
    pub fn ln(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::ln, Some(complexmath::ln))
    }

    /// Base-10 logarithm with the same promotion as `ln`.
    pub fn log(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Numeric> {
        apply(self, eps, cfg, engine::log, Some(complexmath::log))
    }

    /// Angle of the point with ordinate self and abscissa other.
    pub fn atan2(
        &self,
        other: impl Into<HostValue>,
        eps: Option<&Number>,
        cfg: &Config,
    ) -> CalcResult<Number> {
        apply2(self, other, eps, cfg, engine::atan2)
    }

    /// Hypotenuse of a right triangle with legs self and other.
    pub fn hypot(
        &self,
        other: impl Into<HostValue>,
        eps: Option<&Number>,
        cfg: &Config,
    ) -> CalcResult<Number> {
        apply2(self, other, eps, cfg, engine::hypot)
    }

    /// n-th root; n must be a positive integer.
    pub fn root(
        &self,
        n: impl Into<HostValue>,
        eps: Option<&Number>,
        cfg: &Config,
    ) -> CalcResult<Number> {
        let n = normalize::to_number(&n.into(), false)?;
        if !n.is_integer() {
            return Err(CalcError::math("non-integer root index"));
        }
        let e = resolve_eps(eps, cfg);
        engine::root(self.as_ratio(), n.as_ratio().numer(), e)
            .map(Number::from_raw)
            .ok_or_else(|| CalcError::math("root is undefined for this argument"))
    }

    /// x^y. Integer exponents are exact; a negative base with a fractional
    /// exponent, or a complex exponent, routes through the complex power
    /// primitive and demotes when the result is purely real.
    pub fn power(
        &self,
        exponent: impl Into<HostValue>,
        eps: Option<&Number>,
        cfg: &Config,
    ) -> CalcResult<Numeric> {
        let exponent = exponent.into();
        let e = resolve_eps(eps, cfg);
        if let HostValue::Cplx(c) = &exponent {
            let z = CValue::from_real(self.as_ratio().clone());
            return complexmath::power(&z, &c.as_cvalue(), e)
                .map(Numeric::from_cvalue)
                .ok_or_else(|| CalcError::math("power is undefined for this argument"));
        }
        let y = normalize::to_number(&exponent, true)?;
        if let Some(r) = engine::power(self.as_ratio(), y.as_ratio(), e) {
            return Ok(Numeric::Real(Number::from_raw(r)));
        }
        if self.is_negative() && !y.is_integer() {
            tracing::debug!("negative base with fractional exponent; complex power");
            let z = CValue::from_real(self.as_ratio().clone());
            let w = CValue::from_real(y.as_ratio().clone());
            return complexmath::power(&z, &w, e)
                .map(Numeric::from_cvalue)
                .ok_or_else(|| CalcError::math("power is undefined for this argument"));
        }
        Err(CalcError::math("power is undefined for this argument"))
    }
}
