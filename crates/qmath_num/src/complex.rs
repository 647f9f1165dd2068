//! Complex handle and demotion.
//!
//! A `Complex` pairs two canonical number handles. Results that may be real
//! or complex travel as [`Numeric`]; its constructors enforce the demotion
//! invariant: a complex value with an exactly-zero imaginary part never
//! reaches the host as a complex wrapper.

use std::fmt;

use crate::config::Config;
use crate::dispatch::OpSymbol;
use crate::error::{CalcError, CalcResult};
use crate::normalize;
use crate::number::Number;
use crate::value::{Coerce, HostValue};
use qmath_engine::complexmath::{self, CValue};

#[derive(Clone, Debug, PartialEq)]
pub struct Complex {
    re: Number,
    im: Number,
}

/// A result that is real whenever it can be.
#[derive(Clone, Debug, PartialEq)]
pub enum Numeric {
    Real(Number),
    Cplx(Complex),
}

impl Numeric {
    /// Pair two handles, demoting a zero imaginary part to a real result.
    pub fn from_parts(re: Number, im: Number) -> Numeric {
        if im.is_zero() {
            Numeric::Real(re)
        } else {
            Numeric::Cplx(Complex { re, im })
        }
    }

    pub(crate) fn from_cvalue(v: CValue) -> Numeric {
        Numeric::from_parts(Number::from_raw(v.re), Number::from_raw(v.im))
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Numeric::Real(_))
    }

    /// The real handle, if this result demoted.
    pub fn into_real(self) -> Option<Number> {
        match self {
            Numeric::Real(n) => Some(n),
            Numeric::Cplx(_) => None,
        }
    }

    pub fn into_complex(self) -> Option<Complex> {
        match self {
            Numeric::Real(_) => None,
            Numeric::Cplx(c) => Some(c),
        }
    }

    /// Real part of either form.
    pub fn re(&self) -> Number {
        match self {
            Numeric::Real(n) => n.link(),
            Numeric::Cplx(c) => c.re(),
        }
    }

    /// Imaginary part; zero for a real result.
    pub fn im(&self) -> Number {
        match self {
            Numeric::Real(_) => Number::from(0),
            Numeric::Cplx(c) => c.im(),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Real(n) => write!(f, "{}", n),
            Numeric::Cplx(c) => write!(f, "{}", c),
        }
    }
}

impl Complex {
    /// Build from real and imaginary values (any real-convertible types).
    pub fn new(re: impl Into<HostValue>, im: impl Into<HostValue>) -> CalcResult<Complex> {
        let re = normalize::to_number(&re.into(), false)?;
        let im = normalize::to_number(&im.into(), false)?;
        Ok(Complex { re, im })
    }

    /// Promote a real handle: zero imaginary part.
    pub fn from_real(re: &Number) -> Complex {
        Complex {
            re: re.link(),
            im: Number::from(0),
        }
    }

    pub fn re(&self) -> Number {
        self.re.link()
    }

    pub fn im(&self) -> Number {
        self.im.link()
    }

    /// True when the imaginary part is exactly zero.
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    pub fn conj(&self) -> Complex {
        Complex {
            re: self.re.link(),
            im: self.im.neg(),
        }
    }

    pub(crate) fn as_cvalue(&self) -> CValue {
        CValue::new(self.re.as_ratio().clone(), self.im.as_ratio().clone())
    }

    fn other_cvalue(other: &HostValue) -> CalcResult<CValue> {
        normalize::to_complex(other).map(|c| c.as_cvalue())
    }

    pub fn add(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        let rhs = Self::other_cvalue(&other.into())?;
        Ok(Numeric::from_cvalue(complexmath::add(&self.as_cvalue(), &rhs)))
    }

    pub fn sub(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        let rhs = Self::other_cvalue(&other.into())?;
        Ok(Numeric::from_cvalue(complexmath::sub(&self.as_cvalue(), &rhs)))
    }

    pub fn mul(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        let rhs = Self::other_cvalue(&other.into())?;
        Ok(Numeric::from_cvalue(complexmath::mul(&self.as_cvalue(), &rhs)))
    }

    pub fn div(&self, other: impl Into<HostValue>) -> CalcResult<Numeric> {
        let rhs = Self::other_cvalue(&other.into())?;
        complexmath::div(&self.as_cvalue(), &rhs)
            .map(Numeric::from_cvalue)
            .ok_or(CalcError::DivisionByZero)
    }

    pub fn neg(&self) -> Complex {
        Complex {
            re: self.re.neg(),
            im: self.im.neg(),
        }
    }

    /// Complex power with the usual epsilon defaulting.
    pub fn power(
        &self,
        exponent: impl Into<HostValue>,
        eps: Option<&Number>,
        cfg: &Config,
    ) -> CalcResult<Numeric> {
        let rhs = Self::other_cvalue(&exponent.into())?;
        let e = eps.map(|n| n.as_ratio().clone()).unwrap_or_else(|| cfg.epsilon.clone());
        complexmath::power(&self.as_cvalue(), &rhs, &e)
            .map(Numeric::from_cvalue)
            .ok_or_else(|| CalcError::math("power is undefined for this argument"))
    }

    /// Absolute value: hypot of the parts.
    pub fn abs(&self, eps: Option<&Number>, cfg: &Config) -> CalcResult<Number> {
        let e = eps.map(|n| n.as_ratio().clone()).unwrap_or_else(|| cfg.epsilon.clone());
        qmath_engine::trans::hypot(self.re.as_ratio(), self.im.as_ratio(), &e)
            .map(Number::from_raw)
            .ok_or_else(|| CalcError::math("hypot returned no value"))
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.re.is_zero() && !self.im.is_zero() {
            return write!(f, "{}i", self.im);
        }
        if self.im.is_negative() {
            write!(f, "{}{}i", self.re, self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

/// The host complex type takes part in mixed arithmetic through the coercion
/// protocol: the real left operand is promoted into the complex plane and the
/// operation redispatches there.
impl Coerce for Complex {
    fn coerce(&self, lhs: &Number) -> CalcResult<(HostValue, HostValue)> {
        Ok((
            HostValue::Cplx(Complex::from_real(lhs)),
            HostValue::Cplx(self.clone()),
        ))
    }

    fn binary(&self, op: OpSymbol, lhs: &HostValue, rhs: &HostValue) -> CalcResult<Numeric> {
        let l = match lhs {
            HostValue::Cplx(c) => c.clone(),
            other => normalize::to_complex(other)?,
        };
        match op {
            OpSymbol::Add => l.add(rhs.clone()),
            OpSymbol::Sub => l.sub(rhs.clone()),
            OpSymbol::Mul => l.mul(rhs.clone()),
            OpSymbol::Div => l.div(rhs.clone()),
            OpSymbol::Pow => l.power(rhs.clone(), None, &Config::default()),
            other => Err(CalcError::type_error(format!(
                "operation {} is not defined on complex values",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demotion_collapses_zero_imaginary() {
        let r = Numeric::from_parts(Number::from(3), Number::from(0));
        assert!(r.is_real());
        let c = Numeric::from_parts(Number::from(3), Number::from(1));
        assert!(!c.is_real());
    }

    #[test]
    fn arithmetic_demotes_pure_real_results() {
        let a = Complex::new(1, 2).unwrap();
        let b = Complex::new(3, -2).unwrap();
        let sum = a.add(b).unwrap();
        assert!(!sum.is_real());
        let conj = Complex::new(1, 2).unwrap();
        let pure = conj.mul(conj.conj()).unwrap();
        assert!(pure.is_real());
        assert_eq!(pure.re(), Number::from(5));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Complex::new(0, 1).unwrap().to_string(), "1i");
        assert_eq!(Complex::new(2, -3).unwrap().to_string(), "2-3i");
        assert_eq!(Complex::new(2, 3).unwrap().to_string(), "2+3i");
    }
}
