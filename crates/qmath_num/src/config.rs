//! Shared configuration defaults.
//!
//! One read-only record supplies every default this crate resolves: the
//! transcendental epsilon and the rounding modes of `round`, `appr`, `mod`
//! and `quomod`. It is threaded explicitly into the wrappers that need it so
//! tests can supply an isolated configuration; `Config::default()` matches
//! the traditional calculator defaults.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow};
use qmath_engine::rounding::RoundMode;

#[derive(Clone, Debug)]
pub struct Config {
    /// Precision bound for transcendental and iterative computations.
    pub epsilon: BigRational,
    /// Rounding for `round`/`bround` when no flag is given.
    pub round: RoundMode,
    /// Rounding for `appr` when no flag is given.
    pub appr: RoundMode,
    /// Quotient rounding for `mod`.
    pub modulo: RoundMode,
    /// Quotient rounding for `quomod`.
    pub quomod: RoundMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            // 1e-20
            epsilon: BigRational::new(BigInt::one(), BigInt::from(10u32).pow(20u64)),
            round: RoundMode::HalfEven,
            appr: RoundMode::HalfEven,
            modulo: RoundMode::Down,
            quomod: RoundMode::Down,
        }
    }
}

impl Config {
    /// An isolated configuration with a specific epsilon exponent
    /// (epsilon = 10^-digits).
    pub fn with_epsilon_digits(digits: u32) -> Self {
        Config {
            epsilon: BigRational::new(BigInt::one(), BigInt::from(10u32).pow(digits as u64)),
            ..Config::default()
        }
    }
}
