//! Integer number theory primitives.
//!
//! Domain checks that belong to the public surface (integrality, range
//! bounds) live in the conversion layer; these functions assume well-formed
//! input where documented and use `None` to signal "no result exists"
//! (candidate search exhausted, index out of the supported range).

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rand::Rng;

/// Deterministic Miller-Rabin witness set valid for every u64.
const MR_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

const SMALL_PRIMES: [u64; 26] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101,
];

fn two_pow_32() -> BigInt {
    BigInt::from(1u64 << 32)
}

/// One Miller-Rabin round. `n` odd, >= 3.
fn miller_rabin(n: &BigUint, base: &BigUint) -> bool {
    let one = BigUint::one();
    let n_minus_1 = n - &one;
    let base = base % n;
    if base.is_zero() {
        return true;
    }
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;
    let mut x = base.modpow(&d, n);
    if x == one || x == n_minus_1 {
        return true;
    }
    for _ in 1..s {
        x = (&x * &x) % n;
        if x == n_minus_1 {
            return true;
        }
    }
    false
}

/// Exact primality for magnitudes below 2^64.
pub fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for p in SMALL_PRIMES {
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }
    let n_big = BigUint::from(n);
    MR_BASES
        .iter()
        .all(|b| miller_rabin(&n_big, &BigUint::from(*b)))
}

/// Small-integer primality test. `None` when the (odd) magnitude is beyond
/// 2^32, where the deterministic test is not offered.
pub fn is_prime(n: &BigInt) -> Option<bool> {
    let mag = n.abs();
    if mag >= two_pow_32() {
        if mag.is_even() {
            return Some(false);
        }
        return None;
    }
    Some(is_prime_u64(mag.to_u64().expect("magnitude below 2^32")))
}

/// Probabilistic primality test.
///
/// `skip` selects the bases: 0 draws random bases, 1 walks successive small
/// primes, any other value walks consecutive integers starting there.
/// Below 2^32 the answer is exact regardless of `count`.
pub fn ptest(n: &BigInt, count: i64, skip: &BigInt) -> bool {
    let mag = n.abs();
    if mag < two_pow_32() {
        return is_prime_u64(mag.to_u64().expect("magnitude below 2^32"));
    }
    let m = mag.to_biguint().expect("non-negative magnitude");
    for p in SMALL_PRIMES {
        if (&m % BigUint::from(p)).is_zero() {
            return false;
        }
    }
    let count = count.unsigned_abs();
    if skip.is_one() {
        return SMALL_PRIMES
            .iter()
            .take(count.max(1) as usize)
            .all(|b| miller_rabin(&m, &BigUint::from(*b)));
    }
    if skip.is_zero() {
        let mut rng = rand::thread_rng();
        return (0..count.max(1)).all(|_| {
            let raw: u64 = rng.gen();
            let base = BigUint::from(raw) % (&m - BigUint::from(4u32)) + BigUint::from(2u32);
            miller_rabin(&m, &base)
        });
    }
    let start = skip.abs().to_biguint().expect("absolute value");
    (0..count.max(1)).all(|i| miller_rabin(&m, &(&start + BigUint::from(i))))
}

/// Next prime strictly above `n`, staying below 2^32. `None` when the search
/// leaves that range.
pub fn next_prime(n: u64) -> Option<u64> {
    let mut c = n + 1;
    while c < (1 << 32) {
        if is_prime_u64(c) {
            return Some(c);
        }
        c += 1;
    }
    None
}

/// Previous prime strictly below `n`. `None` below 2.
pub fn prev_prime(n: u64) -> Option<u64> {
    if n <= 2 {
        return None;
    }
    let mut c = n - 1;
    loop {
        if is_prime_u64(c) {
            return Some(c);
        }
        if c == 2 {
            return None;
        }
        c -= 1;
    }
}

const CAND_SEARCH_CAP: u64 = 1 << 20;

/// Least candidate i > |n| with i ≡ residue (mod modulus) passing
/// `ptest(i, count, skip)`. Exhaustion is an absent result, not an error.
pub fn next_cand(
    n: &BigInt,
    count: i64,
    skip: &BigInt,
    residue: &BigInt,
    modulus: &BigInt,
) -> Option<BigInt> {
    let floor = n.abs();
    let m = modulus.abs();
    if m.is_zero() {
        // i ≡ residue (mod 0) pins i to the residue itself
        return (residue > &floor && ptest(residue, count, skip)).then(|| residue.clone());
    }
    let r = residue.mod_floor(&m);
    // progressions sharing a factor with the modulus contain at most one prime
    let g = r.gcd(&m);
    if g > BigInt::one() {
        return (g > floor && g.mod_floor(&m) == r && ptest(&g, count, skip)).then_some(g);
    }
    let start = &floor + BigInt::one();
    let mut c = &start + (&r - &start).mod_floor(&m);
    for _ in 0..CAND_SEARCH_CAP {
        if ptest(&c, count, skip) {
            return Some(c);
        }
        c += &m;
    }
    tracing::warn!(modulus = %m, "candidate search exhausted its step budget");
    None
}

/// Greatest candidate i < |n| (i > 1) in the residue class passing the test.
pub fn prev_cand(
    n: &BigInt,
    count: i64,
    skip: &BigInt,
    residue: &BigInt,
    modulus: &BigInt,
) -> Option<BigInt> {
    let ceil = n.abs();
    let m = modulus.abs();
    if m.is_zero() {
        return (residue < &ceil && residue > &BigInt::one() && ptest(residue, count, skip))
            .then(|| residue.clone());
    }
    let r = residue.mod_floor(&m);
    let g = r.gcd(&m);
    if g > BigInt::one() {
        return (g < ceil && g > BigInt::one() && g.mod_floor(&m) == r && ptest(&g, count, skip))
            .then_some(g);
    }
    let top = &ceil - BigInt::one();
    let mut c = &top - (&top - &r).mod_floor(&m);
    while c > BigInt::one() {
        if ptest(&c, count, skip) {
            return Some(c);
        }
        c -= &m;
    }
    None
}

/// Smallest prime factor of |n| not exceeding `limit`; 1 when there is none.
pub fn factor(n: &BigInt, limit: &BigInt) -> BigInt {
    let n = n.abs();
    if n.is_zero() {
        // every prime divides zero
        return if *limit >= BigInt::from(2u32) {
            BigInt::from(2u32)
        } else {
            BigInt::one()
        };
    }
    if n.is_one() {
        return BigInt::one();
    }
    let try_p = |p: u64| -> bool { (&n % BigInt::from(p)).is_zero() };
    let limit_u = limit.to_u64().unwrap_or(u64::MAX);
    for p in [2u64, 3, 5] {
        if p > limit_u {
            return BigInt::one();
        }
        if try_p(p) {
            return BigInt::from(p);
        }
    }
    let mut p: u64 = 7;
    let mut step = 4u64; // 7, 11, 13, 17, 19, 23, 25, ... (6k±1)
    loop {
        if p > limit_u || BigInt::from(p) * BigInt::from(p) > n {
            break;
        }
        if try_p(p) {
            return BigInt::from(p);
        }
        p += step;
        step = 6 - step;
    }
    // no factor up to min(limit, sqrt(n)): n is prime iff sqrt(n) was reached
    if BigInt::from(p) * BigInt::from(p) > n && n <= *limit {
        return n;
    }
    BigInt::one()
}

/// Greatest k such that y^k divides n; 0 when y is 0, ±1 or n is 0.
pub fn divcount(n: &BigInt, y: &BigInt) -> BigInt {
    if n.is_zero() || y.abs() <= BigInt::one() {
        return BigInt::zero();
    }
    let mut rest = n.clone();
    let mut k = BigInt::zero();
    loop {
        let (q, r) = rest.div_rem(y);
        if !r.is_zero() {
            return k;
        }
        rest = q;
        k += 1;
    }
}

const INDEX_CAP: u64 = 1 << 24;

/// Fibonacci number by fast doubling; negative indices follow
/// F(-n) = (-1)^(n+1) F(n). `None` beyond the supported index range.
pub fn fib(n: &BigInt) -> Option<BigInt> {
    let idx = n.abs().to_u64().filter(|v| *v < INDEX_CAP)?;
    let (f, _) = fib_pair(idx);
    if n.is_negative() && idx % 2 == 0 {
        return Some(-f);
    }
    Some(f)
}

/// (F(k), F(k+1)) by fast doubling.
fn fib_pair(k: u64) -> (BigInt, BigInt) {
    if k == 0 {
        return (BigInt::zero(), BigInt::one());
    }
    let (a, b) = fib_pair(k / 2);
    let two = BigInt::from(2u32);
    let c = &a * (&two * &b - &a);
    let d = &a * &a + &b * &b;
    if k % 2 == 0 {
        (c, d)
    } else {
        let e = &c + &d;
        (d, e)
    }
}

/// n! for integer 0 <= n < 2^31. `None` otherwise.
pub fn factorial(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let n = n.to_u64().filter(|v| *v < (1 << 31))?;
    let mut acc = BigInt::one();
    for i in 2..=n {
        acc *= BigInt::from(i);
    }
    Some(acc)
}

/// Bernoulli number B(n) with B(1) = -1/2. Odd n > 1 gives 0.
pub fn bernoulli(n: &BigInt) -> Option<BigRational> {
    if n.is_negative() {
        return None;
    }
    let n = n.to_usize().filter(|v| *v <= (1 << 16))?;
    if n > 1 && n % 2 == 1 {
        return Some(BigRational::zero());
    }
    // B(m) = -1/(m+1) * sum_{k<m} C(m+1, k) B(k)
    let mut table: Vec<BigRational> = Vec::with_capacity(n + 1);
    table.push(BigRational::one());
    for m in 1..=n {
        let mut acc = BigRational::zero();
        for (k, b) in table.iter().enumerate() {
            if b.is_zero() {
                continue;
            }
            acc += BigRational::from_integer(binomial(m as u64 + 1, k as u64)) * b;
        }
        table.push(-acc / BigRational::from_integer(BigInt::from(m as u64 + 1)));
    }
    Some(table.pop().expect("table is non-empty"))
}

/// Euler number E(n); zero for odd n.
pub fn euler(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let n = n.to_usize().filter(|v| *v <= (1 << 16))?;
    if n % 2 == 1 {
        return Some(BigInt::zero());
    }
    // sum_{k<=n} C(2n, 2k) E(2k) = 0
    let half = n / 2;
    let mut evens: Vec<BigInt> = vec![BigInt::one()];
    for m in 1..=half {
        let mut acc = BigInt::zero();
        for (k, e) in evens.iter().enumerate() {
            acc += binomial(2 * m as u64, 2 * k as u64) * e;
        }
        evens.push(-acc);
    }
    Some(evens.pop().expect("table is non-empty"))
}

/// Catalan number C(2n, n)/(n + 1).
pub fn catalan(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let n = n.to_u64().filter(|v| *v < INDEX_CAP)?;
    Some(binomial(2 * n, n) / BigInt::from(n + 1))
}

fn binomial(n: u64, k: u64) -> BigInt {
    if k > n {
        return BigInt::zero();
    }
    let k = k.min(n - k);
    let mut acc = BigInt::one();
    for i in 0..k {
        acc = acc * BigInt::from(n - i) / BigInt::from(i + 1);
    }
    acc
}

/// Jacobi symbol (a/n); 0 when n is even or negative.
pub fn jacobi(a: &BigInt, n: &BigInt) -> BigInt {
    if !n.is_positive() || n.is_even() {
        return BigInt::zero();
    }
    let mut a = a.mod_floor(n);
    let mut n = n.clone();
    let mut result: i32 = 1;
    while !a.is_zero() {
        while a.is_even() {
            a /= BigInt::from(2u32);
            let r = (&n % BigInt::from(8u32)).to_u8().expect("residue below 8");
            if r == 3 || r == 5 {
                result = -result;
            }
        }
        std::mem::swap(&mut a, &mut n);
        let ra = (&a % BigInt::from(4u32)).to_u8().expect("residue below 4");
        let rn = (&n % BigInt::from(4u32)).to_u8().expect("residue below 4");
        if ra == 3 && rn == 3 {
            result = -result;
        }
        a = a.mod_floor(&n);
    }
    if n.is_one() {
        BigInt::from(result)
    } else {
        BigInt::zero()
    }
}

/// Modular inverse of a mod |m|, in [0, |m|); 0 when none exists.
pub fn minv(a: &BigInt, m: &BigInt) -> BigInt {
    let m = m.abs();
    if m <= BigInt::one() {
        return BigInt::zero();
    }
    let a = a.mod_floor(&m);
    let e = a.extended_gcd(&m);
    if !e.gcd.is_one() {
        return BigInt::zero();
    }
    e.x.mod_floor(&m)
}

/// a^e mod |m|. Negative exponents go through the modular inverse; `None`
/// when the modulus is zero or the inverse does not exist.
pub fn pmod(a: &BigInt, e: &BigInt, m: &BigInt) -> Option<BigInt> {
    if m.is_zero() {
        return None;
    }
    let m = m.abs();
    if m.is_one() {
        return Some(BigInt::zero());
    }
    if e.is_negative() {
        let inv = minv(a, &m);
        if inv.is_zero() {
            return None;
        }
        return Some(inv.modpow(&-e, &m));
    }
    Some(a.mod_floor(&m).modpow(e, &m))
}

/// gcd over rationals: gcd of numerators over lcm of denominators.
pub fn gcd(a: &BigRational, b: &BigRational) -> BigRational {
    if a.is_zero() {
        return b.abs();
    }
    if b.is_zero() {
        return a.abs();
    }
    BigRational::new(
        a.numer().gcd(b.numer()),
        a.denom().lcm(b.denom()),
    )
}

/// lcm over rationals: a*b/gcd(a, b); zero when either side is zero.
/// The sign follows the product, matching the engine tradition.
pub fn lcm(a: &BigRational, b: &BigRational) -> BigRational {
    if a.is_zero() || b.is_zero() {
        return BigRational::zero();
    }
    a * b / gcd(a, b)
}

/// Greatest divisor of |a| relatively prime to b.
pub fn gcdrem(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    if a.is_zero() {
        return BigInt::zero();
    }
    loop {
        let g = a.gcd(b);
        if g.is_one() {
            return a;
        }
        a /= g;
    }
}

/// Greatest integer v with v^2 <= x. `None` for negative x.
pub fn isqrt(x: &BigRational) -> Option<BigInt> {
    if x.is_negative() {
        return None;
    }
    Some(x.floor().to_integer().sqrt())
}

/// Greatest integer v with v^n <= x; n must be positive, even n requires
/// non-negative x.
pub fn iroot(x: &BigRational, n: &BigInt) -> Option<BigInt> {
    if !n.is_positive() {
        return None;
    }
    if x.is_negative() && n.is_even() {
        return None;
    }
    let n_u = n.to_u32()?;
    let fl = x.floor().to_integer();
    let mut v = fl.nth_root(n_u);
    // nth_root truncates toward zero; fix up the floor semantics
    while num_traits::Pow::pow(&v, n_u) > fl {
        v -= 1;
    }
    Some(v)
}

/// True when x = (a/b)^2 for integers a, b.
pub fn is_square(x: &BigRational) -> bool {
    if x.is_negative() {
        return false;
    }
    let ns = x.numer().sqrt();
    let ds = x.denom().sqrt();
    &ns * &ns == *x.numer() && &ds * &ds == *x.denom()
}
