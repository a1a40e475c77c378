//! Random number generation, shuffling, and sampling.
//!
//! Provides seeded and entropy-seeded RNG construction, Fisher-Yates
//! shuffling, and sampling with or without replacement.
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform. [`entropy_rng`] seeds a cryptographically strong
//! generator from the operating system instead.

use log::debug;
use rand::Rng;

use crate::error::{Result, StatsError};

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
/// The sequence is deterministic for a given seed on the same platform.
///
/// # Examples
/// ```
/// use u_statkit::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Creates a `StdRng` (ChaCha12) seeded from operating-system entropy.
///
/// Use this when draws must not be predictable from a seed.
///
/// # Examples
/// ```
/// use u_statkit::random::{entropy_rng, rand_below};
/// let mut rng = entropy_rng();
/// assert!(rand_below(10, &mut rng).unwrap() < 10);
/// ```
pub fn entropy_rng() -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::from_os_rng()
}

/// Returns a uniformly distributed integer in `[0, n)`.
///
/// # Errors
/// [`StatsError::EmptyInput`] if `n == 0`.
///
/// # Examples
/// ```
/// use u_statkit::random::{create_rng, rand_below};
/// let mut rng = create_rng(7);
/// assert!(rand_below(6, &mut rng).unwrap() < 6);
/// assert!(rand_below(0, &mut rng).is_err());
/// ```
pub fn rand_below<R: Rng>(n: usize, rng: &mut R) -> Result<usize> {
    if n == 0 {
        debug!("rand_below: empty range");
        return Err(StatsError::EmptyInput);
    }
    Ok(rng.random_range(0..n))
}

/// Fisher-Yates (Durstenfeld) in-place shuffle.
///
/// Produces a uniformly random permutation: each of the n! permutations
/// is equally likely.
///
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P.
///
/// # Complexity
/// Time: O(n), Space: O(1) (in-place)
///
/// # Examples
/// ```
/// use u_statkit::random::{create_rng, shuffle};
/// let mut v = vec![1, 2, 3, 4, 5];
/// let mut rng = create_rng(42);
/// shuffle(&mut v, &mut rng);
/// v.sort();
/// assert_eq!(v, vec![1, 2, 3, 4, 5]);
/// ```
pub fn shuffle<T, R: Rng>(slice: &mut [T], rng: &mut R) {
    let n = slice.len();
    if n <= 1 {
        return;
    }
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// Returns a shuffled copy of `data`, leaving the input untouched.
///
/// # Examples
/// ```
/// use u_statkit::random::{create_rng, shuffled};
/// let data = [1.5, 2.5, 3.5];
/// let mut rng = create_rng(3);
/// let mut out = shuffled(&data, &mut rng);
/// out.sort_by(f64::total_cmp);
/// assert_eq!(out, data.to_vec());
/// ```
pub fn shuffled<T: Clone, R: Rng>(data: &[T], rng: &mut R) -> Vec<T> {
    let mut out = data.to_vec();
    shuffle(&mut out, rng);
    out
}

/// Returns a shuffled index permutation of `[0, n)`.
///
/// # Complexity
/// Time: O(n), Space: O(n)
pub fn shuffled_indices<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    shuffle(&mut indices, rng);
    indices
}

/// Draws `num` elements from `data`, with or without replacement.
///
/// - With replacement, every draw is uniform over all of `data` and `num`
///   may exceed `data.len()`.
/// - Without replacement, the result holds `num` distinct positions of
///   `data` in random order (a partial Fisher-Yates shuffle of indices).
///
/// # Errors
/// - [`StatsError::EmptyInput`] when drawing at least one element with
///   replacement from empty `data`.
/// - [`StatsError::SampleTooLarge`] when `num > data.len()` without
///   replacement.
///
/// # Examples
/// ```
/// use u_statkit::random::{create_rng, sample};
/// let data = [10, 20, 30, 40];
/// let mut rng = create_rng(1);
///
/// let picked = sample(&data, 2, false, &mut rng).unwrap();
/// assert_eq!(picked.len(), 2);
/// assert_ne!(picked[0], picked[1]);
///
/// let boot = sample(&data, 10, true, &mut rng).unwrap();
/// assert_eq!(boot.len(), 10);
///
/// assert!(sample(&data, 5, false, &mut rng).is_err());
/// ```
pub fn sample<T: Clone, R: Rng>(
    data: &[T],
    num: usize,
    replace: bool,
    rng: &mut R,
) -> Result<Vec<T>> {
    let n = data.len();
    if replace {
        if num == 0 {
            return Ok(Vec::new());
        }
        if n == 0 {
            debug!("sample: cannot draw {num} elements from empty data");
            return Err(StatsError::EmptyInput);
        }
        return Ok((0..num)
            .map(|_| data[rng.random_range(0..n)].clone())
            .collect());
    }

    if num > n {
        debug!("sample: {num} elements requested without replacement from {n}");
        return Err(StatsError::SampleTooLarge {
            requested: num,
            available: n,
        });
    }
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..num {
        let j = rng.random_range(i..n);
        indices.swap(i, j);
    }
    Ok(indices[..num].iter().map(|&i| data[i].clone()).collect())
}
