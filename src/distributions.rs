//! Random variate generation.
//!
//! Draws from common distributions using only a uniform source, so any
//! `rand::Rng` can drive them (see [`crate::random::create_rng`]).
//!
//! # Supported Distributions
//!
//! | Function | Parameters | Method |
//! |---|---|---|
//! | [`uniform`], [`uniform_range`] | a, b | `a + U·(b−a)` |
//! | [`exponential`] | λ | inversion, `−ln(1−U)/λ` |
//! | [`gaussian`], [`normal`] | μ, σ | Box–Muller (sine branch) |
//! | [`bernoulli`] | p | `U < p` |
//! | [`binomial`] | p, n | sum of n Bernoulli trials |
//! | [`poisson`] | λ | Knuth's multiplication method |
//!
//! Parameters are validated up front; an invalid parameter is an
//! [`StatsError`] value, never a panic.

use std::f64::consts::TAU;

use log::debug;
use rand::Rng;

use crate::error::{Result, StatsError};

fn check_rate(lambda: f64, what: &str) -> Result<()> {
    if lambda.is_finite() && lambda > 0.0 {
        Ok(())
    } else {
        debug!("{what}: rejecting lambda={lambda}");
        Err(StatsError::InvalidRate(lambda))
    }
}

fn check_probability(p: f64, what: &str) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        debug!("{what}: rejecting p={p}");
        Err(StatsError::InvalidProbability(p))
    }
}

// ============================================================================
// Continuous
// ============================================================================

/// Standard uniform draw in `[0, 1)`.
///
/// # Examples
/// ```
/// use u_statkit::{distributions::uniform, random::create_rng};
/// let mut rng = create_rng(42);
/// let u = uniform(&mut rng);
/// assert!((0.0..1.0).contains(&u));
/// ```
pub fn uniform<R: Rng>(rng: &mut R) -> f64 {
    rng.random()
}

/// Uniform draw in `[a, b)` (or `(b, a]` when `b < a`).
///
/// `a == b` always returns `a`.
pub fn uniform_range<R: Rng>(a: f64, b: f64, rng: &mut R) -> f64 {
    a + uniform(rng) * (b - a)
}

/// Exponential draw with rate `λ`, mean `1/λ`.
///
/// # Errors
/// [`StatsError::InvalidRate`] unless `lambda` is finite and positive.
///
/// # Examples
/// ```
/// use u_statkit::{distributions::exponential, random::create_rng};
/// let mut rng = create_rng(1);
/// assert!(exponential(2.0, &mut rng).unwrap() >= 0.0);
/// assert!(exponential(0.0, &mut rng).is_err());
/// ```
pub fn exponential<R: Rng>(lambda: f64, rng: &mut R) -> Result<f64> {
    check_rate(lambda, "exponential")?;
    // 1 - U lies in (0, 1], so the log is finite
    Ok(-(1.0 - uniform(rng)).ln() / lambda)
}

/// Standard normal draw via the Box–Muller transform.
///
/// `√(−2 ln U₁) · sin(2π U₂)` with `U₁ ∈ (0, 1]`, so the result is
/// always finite.
pub fn gaussian<R: Rng>(rng: &mut R) -> f64 {
    let u1 = 1.0 - uniform(rng);
    let u2 = uniform(rng);
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).sin()
}

/// Normal draw `mu + sigma · Z`.
///
/// `sigma == 0` returns `mu`.
///
/// # Errors
/// [`StatsError::InvalidScale`] if `sigma` is NaN or negative.
///
/// # Examples
/// ```
/// use u_statkit::{distributions::normal, random::create_rng};
/// let mut rng = create_rng(8);
/// assert_eq!(normal(3.0, 0.0, &mut rng).unwrap(), 3.0);
/// assert!(normal(0.0, -1.0, &mut rng).is_err());
/// ```
pub fn normal<R: Rng>(mu: f64, sigma: f64, rng: &mut R) -> Result<f64> {
    if !(sigma >= 0.0) {
        debug!("normal: rejecting sigma={sigma}");
        return Err(StatsError::InvalidScale(sigma));
    }
    Ok(mu + sigma * gaussian(rng))
}

// ============================================================================
// Discrete
// ============================================================================

/// Returns `true` with probability `p`.
///
/// # Errors
/// [`StatsError::InvalidProbability`] if `p` is NaN or outside `[0, 1]`.
pub fn bernoulli<R: Rng>(p: f64, rng: &mut R) -> Result<bool> {
    check_probability(p, "bernoulli")?;
    Ok(uniform(rng) < p)
}

/// Number of successes in `n` independent trials with success
/// probability `p`.
///
/// # Complexity
/// Time: O(n), one uniform draw per trial.
///
/// # Errors
/// [`StatsError::InvalidProbability`] if `p` is NaN or outside `[0, 1]`.
///
/// # Examples
/// ```
/// use u_statkit::{distributions::binomial, random::create_rng};
/// let mut rng = create_rng(4);
/// assert_eq!(binomial(1.0, 12, &mut rng).unwrap(), 12);
/// assert!(binomial(0.3, 12, &mut rng).unwrap() <= 12);
/// ```
pub fn binomial<R: Rng>(p: f64, n: u64, rng: &mut R) -> Result<u64> {
    check_probability(p, "binomial")?;
    Ok((0..n).filter(|_| uniform(rng) < p).count() as u64)
}

/// Poisson draw with mean `λ`.
///
/// # Algorithm
/// Knuth, *TAOCP* Vol. 2, §3.4.1: multiply uniforms until the product
/// drops below `e^(−λ)`. Expected cost is O(λ) draws; intended for small
/// to moderate `λ`. For `λ` beyond about 700, `e^(−λ)` underflows and the
/// draw is no longer Poisson distributed.
///
/// # Errors
/// [`StatsError::InvalidRate`] unless `lambda` is finite and positive.
///
/// # Examples
/// ```
/// use u_statkit::{distributions::poisson, random::create_rng};
/// let mut rng = create_rng(10);
/// let k = poisson(3.5, &mut rng).unwrap();
/// assert!(k < 100);
/// assert!(poisson(-1.0, &mut rng).is_err());
/// ```
pub fn poisson<R: Rng>(lambda: f64, rng: &mut R) -> Result<u64> {
    check_rate(lambda, "poisson")?;
    let limit = (-lambda).exp();
    let mut k = 0_u64;
    let mut prod = uniform(rng);
    while prod > limit {
        k += 1;
        prod *= uniform(rng);
    }
    Ok(k)
}

// ============================================================================
// Tests
// ============================================================================
