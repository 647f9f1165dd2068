//! Rounding, truncation, approximation and candidate-search wrappers.
//!
//! Thin parameter-resolution layers over the engine primitives: optional
//! place counts and rounding flags default from the configuration record.
//! Candidate search enforces the integrality and count bounds and reports an
//! exhausted search as an absent result, never as an error.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::Signed;

use crate::config::Config;
use crate::error::{CalcError, CalcResult};
use crate::normalize;
use crate::number::Number;
use crate::value::HostValue;
use qmath_engine::ntheory;
use qmath_engine::rounding::{self, RoundMode};

const CAND_COUNT_BOUND: i64 = 1 << 24;

fn ordering_number(o: Ordering) -> Number {
    match o {
        Ordering::Less => Number::from(-1),
        Ordering::Equal => Number::from(0),
        Ordering::Greater => Number::from(1),
    }
}

impl Number {
    /// Round to `places` decimal places (default 0), rounding mode from the
    /// configuration unless overridden.
    pub fn round(&self, places: Option<i64>, rnd: Option<RoundMode>, cfg: &Config) -> Number {
        let mode = rnd.unwrap_or(cfg.round);
        Number::from_raw(rounding::round(self.as_ratio(), places.unwrap_or(0), mode))
    }

    /// Round to `places` binary places.
    pub fn bround(&self, places: Option<i64>, rnd: Option<RoundMode>, cfg: &Config) -> Number {
        let mode = rnd.unwrap_or(cfg.round);
        Number::from_raw(rounding::bround(self.as_ratio(), places.unwrap_or(0), mode))
    }

    /// Truncate toward zero at `places` decimal places (default 0).
    pub fn trunc(&self, places: Option<i64>) -> Number {
        Number::from_raw(rounding::trunc(self.as_ratio(), places.unwrap_or(0)))
    }

    /// Truncate toward zero at `places` binary places.
    pub fn btrunc(&self, places: Option<i64>) -> Number {
        Number::from_raw(rounding::btrunc(self.as_ratio(), places.unwrap_or(0)))
    }

    /// Integer part, toward zero.
    pub fn int(&self) -> Number {
        Number::from_raw(rounding::int_part(self.as_ratio()))
    }

    /// Fractional part.
    pub fn frac(&self) -> Number {
        Number::from_raw(rounding::frac_part(self.as_ratio()))
    }

    /// Approximate by a multiple of `eps` (configuration epsilon when
    /// omitted) under the approximation rounding mode.
    pub fn appr(&self, eps: Option<&Number>, rnd: Option<RoundMode>, cfg: &Config) -> Number {
        let e = eps.map(|n| n.as_ratio()).unwrap_or(&cfg.epsilon);
        let mode = rnd.unwrap_or(cfg.appr);
        Number::from_raw(rounding::appr(self.as_ratio(), e, mode))
    }

    /// Best continued-fraction approximation within `eps`.
    pub fn cfappr(&self, eps: Option<&Number>, cfg: &Config) -> Number {
        let e = eps.map(|n| n.as_ratio()).unwrap_or(&cfg.epsilon);
        Number::from_raw(rounding::cfappr(self.as_ratio(), e))
    }

    /// Drop the last continued-fraction coefficient, yielding the previous
    /// simpler approximant.
    pub fn cfsim(&self) -> Number {
        Number::from_raw(rounding::cfsim(self.as_ratio()))
    }

    /// Compare |self - other| against |eps|: -1 within, 0 equal, 1 beyond.
    pub fn near(
        &self,
        other: impl Into<HostValue>,
        eps: Option<&Number>,
        cfg: &Config,
    ) -> CalcResult<Number> {
        let o = normalize::to_number(&other.into(), true)?;
        let e = eps.map(|n| n.as_ratio()).unwrap_or(&cfg.epsilon);
        Ok(ordering_number(rounding::near(
            self.as_ratio(),
            o.as_ratio(),
            e,
        )))
    }

    /// Next candidate for primality above |self|; see [`Number::prevcand`].
    pub fn nextcand(
        &self,
        count: Option<HostValue>,
        skip: Option<HostValue>,
        residue: Option<HostValue>,
        modulus: Option<HostValue>,
    ) -> CalcResult<Option<Number>> {
        let (count, skip, residue, modulus) =
            self.cand_arguments(count, skip, residue, modulus)?;
        Ok(ntheory::next_cand(
            self.as_ratio().numer(),
            count,
            &skip,
            &residue,
            &modulus,
        )
        .map(Number::from_bigint))
    }

    /// Previous candidate for primality below |self|. An exhausted search is
    /// an absent result; invalid arguments are errors.
    pub fn prevcand(
        &self,
        count: Option<HostValue>,
        skip: Option<HostValue>,
        residue: Option<HostValue>,
        modulus: Option<HostValue>,
    ) -> CalcResult<Option<Number>> {
        let (count, skip, residue, modulus) =
            self.cand_arguments(count, skip, residue, modulus)?;
        Ok(ntheory::prev_cand(
            self.as_ratio().numer(),
            count,
            &skip,
            &residue,
            &modulus,
        )
        .map(Number::from_bigint))
    }

    /// Shared validation: every argument must be an integer, and the test
    /// count must stay below 2^24 to bound the search cost.
    fn cand_arguments(
        &self,
        count: Option<HostValue>,
        skip: Option<HostValue>,
        residue: Option<HostValue>,
        modulus: Option<HostValue>,
    ) -> CalcResult<(i64, BigInt, BigInt, BigInt)> {
        let count = match count {
            Some(v) => normalize::to_number(&v, true)?,
            None => Number::from(1),
        };
        let skip = match skip {
            Some(v) => normalize::to_number(&v, true)?,
            None => Number::from(1),
        };
        let residue = match residue {
            Some(v) => normalize::to_number(&v, true)?,
            None => Number::from(0),
        };
        let modulus = match modulus {
            Some(v) => normalize::to_number(&v, true)?,
            None => Number::from(1),
        };
        if !self.is_integer()
            || !count.is_integer()
            || !skip.is_integer()
            || !residue.is_integer()
            || !modulus.is_integer()
        {
            return Err(CalcError::math(
                "receiver and all arguments must be integers",
            ));
        }
        let count_num = count.as_ratio().numer();
        if count_num.abs() >= BigInt::from(CAND_COUNT_BOUND) {
            return Err(CalcError::math("count must be < 2^24"));
        }
        let count_i = count_num.abs().try_into().expect("bounded by 2^24");
        Ok((
            count_i,
            skip.as_ratio().numer().clone(),
            residue.as_ratio().numer().clone(),
            modulus.as_ratio().numer().clone(),
        ))
    }
}
