//! Number-theoretic surface: gcd family, special sequences, primality,
//! factorization and modular helpers.
//!
//! These are parameter-validation wrappers: integrality and range rules are
//! enforced here, the arithmetic lives in the engine.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::error::{CalcError, CalcResult};
use crate::normalize;
use crate::number::Number;
use crate::value::HostValue;
use qmath_engine::ntheory;

fn two_pow_32() -> BigInt {
    BigInt::from(1u64 << 32)
}

impl Number {
    fn require_integer(&self, what: &str) -> CalcResult<&BigInt> {
        if !self.is_integer() {
            return Err(CalcError::math(format!("non-integer value for {}", what)));
        }
        Ok(self.as_ratio().numer())
    }

    /// Greatest common divisor of self and every further value; works on
    /// rationals the way the engine tradition does.
    pub fn gcd(&self, others: impl IntoIterator<Item = HostValue>) -> CalcResult<Number> {
        let mut acc = self.as_ratio().abs();
        for v in others {
            let q = normalize::to_number(&v, true)?;
            acc = ntheory::gcd(&acc, q.as_ratio());
        }
        Ok(Number::from_raw(acc))
    }

    /// Least common multiple; short-circuits at zero. The sign follows the
    /// running product.
    pub fn lcm(&self, others: impl IntoIterator<Item = HostValue>) -> CalcResult<Number> {
        let mut acc = self.as_ratio().abs();
        for v in others {
            let q = normalize::to_number(&v, true)?;
            acc = ntheory::lcm(&acc, q.as_ratio());
            if acc.is_zero() {
                break;
            }
        }
        Ok(Number::from_raw(acc))
    }

    /// Greatest divisor of self relatively prime to other.
    pub fn gcdrem(&self, other: impl Into<HostValue>) -> CalcResult<Number> {
        let a = self.require_integer("gcdrem")?;
        let o = normalize::to_number(&other.into(), false)?;
        let b = o.require_integer("gcdrem")?;
        Ok(Number::from_bigint(ntheory::gcdrem(a, b)))
    }

    /// Factorial; the receiver must be a non-negative integer below 2^31.
    pub fn fact(&self) -> CalcResult<Number> {
        let n = self.require_integer("fact")?;
        ntheory::factorial(n)
            .map(Number::from_bigint)
            .ok_or_else(|| CalcError::math("factorial argument out of range"))
    }

    /// Fibonacci number of this index (negative indices follow the usual
    /// sign rule).
    pub fn fib(&self) -> CalcResult<Number> {
        let n = self.require_integer("fib")?;
        ntheory::fib(n)
            .map(Number::from_bigint)
            .ok_or_else(|| CalcError::math("fib index out of range"))
    }

    /// Bernoulli number of this index.
    pub fn bernoulli(&self) -> CalcResult<Number> {
        let n = self.require_integer("bernoulli")?;
        ntheory::bernoulli(n)
            .map(Number::from_raw)
            .ok_or_else(|| CalcError::math("bernoulli index out of range"))
    }

    /// Euler number of this index.
    pub fn euler(&self) -> CalcResult<Number> {
        let n = self.require_integer("euler")?;
        ntheory::euler(n)
            .map(Number::from_bigint)
            .ok_or_else(|| CalcError::math("number too big or out of memory for euler"))
    }

    /// Catalan number of this index.
    pub fn catalan(&self) -> CalcResult<Number> {
        let n = self.require_integer("catalan")?;
        ntheory::catalan(n)
            .map(Number::from_bigint)
            .ok_or_else(|| CalcError::math("catalan index out of range"))
    }

    /// Smallest prime factor not exceeding `limit` (default 2^32 - 1);
    /// 1 when there is none.
    pub fn factor(&self, limit: Option<HostValue>) -> CalcResult<Number> {
        let n = self.require_integer("factor")?;
        let limit = match limit {
            Some(v) => {
                let l = normalize::to_number(&v, false)?;
                let li = l.require_integer("factor limit")?.clone();
                if li.abs() >= two_pow_32() {
                    return Err(CalcError::math("limit >= 2^32 for factor"));
                }
                li.abs()
            }
            None => two_pow_32() - 1,
        };
        Ok(Number::from_bigint(ntheory::factor(n, &limit)))
    }

    /// Greatest n for which other^n divides self.
    pub fn fcnt(&self, other: impl Into<HostValue>) -> CalcResult<Number> {
        let n = self.require_integer("fcnt")?;
        let o = normalize::to_number(&other.into(), false)?;
        let y = o.require_integer("fcnt")?;
        Ok(Number::from_bigint(ntheory::divcount(n, y)))
    }

    /// Jacobi symbol (self / other).
    pub fn jacobi(&self, other: impl Into<HostValue>) -> CalcResult<Number> {
        let a = self.require_integer("jacobi")?;
        let o = normalize::to_number(&other.into(), false)?;
        let n = o.require_integer("jacobi")?;
        Ok(Number::from_bigint(ntheory::jacobi(a, n)))
    }

    /// Modular inverse of self mod md; zero when none exists.
    pub fn minv(&self, md: impl Into<HostValue>) -> CalcResult<Number> {
        let a = self.require_integer("minv")?;
        let o = normalize::to_number(&md.into(), true)?;
        let m = o.require_integer("minv")?;
        Ok(Number::from_bigint(ntheory::minv(a, m)))
    }

    /// self^exponent mod md.
    pub fn pmod(
        &self,
        exponent: impl Into<HostValue>,
        md: impl Into<HostValue>,
    ) -> CalcResult<Number> {
        let a = self.require_integer("pmod")?;
        let eo = normalize::to_number(&exponent.into(), false)?;
        let e = eo.require_integer("pmod")?;
        let mo = normalize::to_number(&md.into(), false)?;
        let m = mo.require_integer("pmod")?;
        if m.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        ntheory::pmod(a, e, m)
            .map(Number::from_bigint)
            .ok_or_else(|| CalcError::math("no inverse exists for pmod"))
    }

    /// Congruence test: self ≡ other (mod md). A zero modulus degenerates to
    /// equality.
    pub fn meq(&self, other: impl Into<HostValue>, md: impl Into<HostValue>) -> CalcResult<bool> {
        let o = normalize::to_number(&other.into(), false)?;
        let m = normalize::to_number(&md.into(), false)?;
        if m.is_zero() {
            return Ok(self == &o);
        }
        let diff = self.as_ratio() - o.as_ratio();
        Ok((diff / m.as_ratio()).is_integer())
    }

    /// True when the values are relatively prime.
    pub fn rel(&self, other: impl Into<HostValue>) -> CalcResult<bool> {
        let a = self.require_integer("rel?")?;
        let o = normalize::to_number(&other.into(), false)?;
        let b = o.require_integer("rel?")?;
        Ok(a.gcd(b) == BigInt::from(1))
    }

    /// True when other exactly divides self.
    pub fn mult(&self, other: impl Into<HostValue>) -> CalcResult<bool> {
        let o = normalize::to_number(&other.into(), false)?;
        if o.is_zero() {
            return Ok(self.is_zero());
        }
        Ok((self.as_ratio() / o.as_ratio()).is_integer())
    }

    /// Greatest integer whose square does not exceed self.
    pub fn isqrt(&self) -> CalcResult<Number> {
        ntheory::isqrt(self.as_ratio())
            .map(Number::from_bigint)
            .ok_or_else(|| CalcError::math("isqrt of negative number"))
    }

    /// Greatest integer v with v^n <= self.
    pub fn iroot(&self, n: impl Into<HostValue>) -> CalcResult<Number> {
        let o = normalize::to_number(&n.into(), false)?;
        let idx = o.require_integer("iroot")?;
        ntheory::iroot(self.as_ratio(), idx)
            .map(Number::from_bigint)
            .ok_or_else(|| CalcError::math("iroot index must be a positive integer"))
    }

    /// True when the value is the square of a rational.
    pub fn sq(&self) -> bool {
        ntheory::is_square(self.as_ratio())
    }

    /// Small-integer primality; odd magnitudes beyond 2^32 are out of range.
    pub fn is_prime(&self) -> CalcResult<bool> {
        if !self.is_integer() {
            return Err(CalcError::math("non-integral for prime?"));
        }
        ntheory::is_prime(self.as_ratio().numer())
            .ok_or_else(|| CalcError::math("prime? argument is an odd value > 2^32"))
    }

    /// Probabilistic primality test with `count` rounds; `skip` selects the
    /// bases (0 random, 1 successive primes, otherwise consecutive integers
    /// from that value).
    pub fn ptest(
        &self,
        count: Option<HostValue>,
        skip: Option<HostValue>,
    ) -> CalcResult<bool> {
        let n = self.require_integer("ptest?")?;
        let count = match count {
            Some(v) => normalize::to_machine_int(&v)?,
            None => 1,
        };
        let skip = match skip {
            Some(v) => {
                let s = normalize::to_number(&v, false)?;
                s.require_integer("ptest?")?.clone()
            }
            None => BigInt::from(1),
        };
        Ok(ntheory::ptest(n, count, &skip))
    }

    /// Next prime above self; the receiver must be an integer below 2^32.
    /// `None` when the next prime would leave that range.
    pub fn nextprime(&self) -> CalcResult<Option<Number>> {
        let n = self.require_integer("nextprime")?;
        if n.abs() >= two_pow_32() {
            return Err(CalcError::math("nextprime arg is >= 2^32"));
        }
        let start = n.abs().try_into().expect("bounded by 2^32");
        Ok(ntheory::next_prime(start).map(|p| Number::from(p as i64)))
    }

    /// Previous prime below self; `None` at or below 2.
    pub fn prevprime(&self) -> CalcResult<Option<Number>> {
        let n = self.require_integer("prevprime")?;
        if n.abs() >= two_pow_32() {
            return Err(CalcError::math("prevprime arg is >= 2^32"));
        }
        let start = n.abs().try_into().expect("bounded by 2^32");
        Ok(ntheory::prev_prime(start).map(|p| Number::from(p as i64)))
    }
}
