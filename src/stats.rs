//! Descriptive statistics with numerical stability guarantees.
//!
//! Floating-point functions return `None` for empty input and for input
//! containing NaN (and, where the algorithm needs arithmetic on every
//! value, infinities). Integer variants accept any `i64` data.
//!
//! # Algorithms
//!
//! - **Sum / Mean**: Neumaier compensated summation for O(ε) error
//!   independent of n.
//! - **Variance/StdDev**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Median**: sort a copy, average the middle pair for even lengths.

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// An improved Kahan summation that also handles the case where the
/// addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *ZAMM* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Examples
/// ```
/// use u_statkit::stats::sum;
/// assert_eq!(sum(&[]), 0.0);
/// assert_eq!(sum(&[1e100, 1.0, -1e100]), 1.0);
/// assert_eq!(sum(&[1.0, f64::INFINITY]), f64::INFINITY);
/// ```
pub fn sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    if !sum.is_finite() {
        // an infinite addend or overflow poisons `c` with ∞ − ∞
        return sum;
    }
    sum + c
}

/// Sums integer data, returning `None` on `i64` overflow.
///
/// # Examples
/// ```
/// use u_statkit::stats::sum_i64;
/// assert_eq!(sum_i64(&[1, 2, 3]), Some(6));
/// assert_eq!(sum_i64(&[i64::MAX, 1]), None);
/// ```
pub fn sum_i64(data: &[i64]) -> Option<i64> {
    data.iter().try_fold(0_i64, |acc, &x| acc.checked_add(x))
}

/// Computes the arithmetic mean using compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((mean(&v).unwrap() - 3.0).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(sum(data) / data.len() as f64)
}

/// Computes the arithmetic mean of integer data.
///
/// Accumulates in `i128`, so the intermediate sum cannot overflow.
///
/// # Returns
/// - `None` if `data` is empty.
pub fn mean_i64(data: &[i64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let total: i128 = data.iter().map(|&x| i128::from(x)).sum();
    Some(total as f64 / data.len() as f64)
}

/// Computes the median of `data` without mutating the input.
///
/// Clones and sorts the data, then returns the middle element (or the
/// average of the two middle elements for even-length data).
///
/// # Complexity
/// Time: O(n log n), Space: O(n)
///
/// # Returns
/// - `None` if `data` is empty or contains NaN.
///
/// # Examples
/// ```
/// use u_statkit::stats::median;
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
/// ```
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    if data.iter().any(|x| x.is_nan()) {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Some(middle(&sorted, |x: f64| x))
}

/// Computes the median of integer data without mutating the input.
///
/// # Returns
/// - `None` if `data` is empty.
///
/// # Examples
/// ```
/// use u_statkit::stats::median_i64;
/// assert_eq!(median_i64(&[30, 29, 28]), Some(29.0));
/// assert_eq!(median_i64(&[1, 2, 3, 10]), Some(2.5));
/// ```
pub fn median_i64(data: &[i64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable();
    Some(middle(&sorted, |x: i64| x as f64))
}

/// Middle value of a non-empty sorted slice.
fn middle<T: Copy>(sorted: &[T], to_f64: impl Fn(T) -> f64) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        to_f64(sorted[n / 2])
    } else {
        (to_f64(sorted[n / 2 - 1]) + to_f64(sorted[n / 2])) / 2.0
    }
}

/// Computes the sample variance using Welford's online algorithm.
///
/// Returns the **sample** (unbiased) variance with Bessel's correction
/// (denominator `n − 1`).
///
/// # Algorithm
/// Welford's method maintains a running mean and sum of squared deviations,
/// avoiding the catastrophic cancellation of `Var = E[X²] − (E[X])²`.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    accumulate(data)?.sample_variance()
}

/// Computes the population variance (denominator `n`).
///
/// # Returns
/// - `None` if `data` is empty or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::population_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_variance(&v).unwrap() - 4.0).abs() < 1e-10);
/// ```
pub fn population_variance(data: &[f64]) -> Option<f64> {
    accumulate(data)?.population_variance()
}

/// Computes the sample standard deviation, `sqrt(variance(data))`.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use u_statkit::stats::std_dev;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((std_dev(&v).unwrap() - 2.138089935299395).abs() < 1e-10);
/// ```
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Computes the population standard deviation.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN/Inf.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    population_variance(data).map(f64::sqrt)
}

fn accumulate(data: &[f64]) -> Option<WelfordAccumulator> {
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut acc = WelfordAccumulator::new();
    data.iter().for_each(|&x| acc.update(x));
    Some(acc)
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Streaming accumulator for count, mean and variance.
///
/// Single pass, O(1) memory.
///
/// # Examples
/// ```
/// use u_statkit::stats::WelfordAccumulator;
/// let mut acc = WelfordAccumulator::new();
/// for &x in &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.update(x);
/// }
/// assert!((acc.mean().unwrap() - 5.0).abs() < 1e-15);
/// assert!((acc.sample_variance().unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    /// Creates a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a new sample into the accumulator.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            // avoids delta² overflow for huge first values
            self.mean_acc = value;
            return;
        }
        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    /// Returns the number of samples seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the running mean, or `None` if no samples have been added.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean_acc)
    }

    /// Sample variance (n − 1 denominator); `None` below 2 samples.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count >= 2).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Population variance (n denominator); `None` when empty.
    pub fn population_variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }

    /// Sample standard deviation; `None` below 2 samples.
    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }

    /// Population standard deviation; `None` when empty.
    pub fn population_std_dev(&self) -> Option<f64> {
        self.population_variance().map(f64::sqrt)
    }

    /// Merges another accumulator into this one.
    ///
    /// Reference: Chan, Golub & LeVeque (1979), "Updating Formulae and a
    /// Pairwise Algorithm for Computing Sample Variances".
    pub fn merge(&mut self, other: &WelfordAccumulator) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let na = self.count as f64;
        let nb = other.count as f64;
        let total = self.count + other.count;
        let n = total as f64;
        let delta = other.mean_acc - self.mean_acc;

        self.mean_acc += delta * (nb / n);
        self.m2 += other.m2 + delta * delta * na * nb / n;
        self.count = total;
    }
}

impl Extend<f64> for WelfordAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        iter.into_iter().for_each(|x| self.update(x));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- sum ---

    #[test]
    fn test_sum_compensated() {
        // naive left-to-right summation returns 0.0 here
        assert_eq!(sum(&[1e100, 1.0, -1e100]), 1.0);
        let data = vec![0.1; 10];
        assert!((sum(&data) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_sum_non_finite() {
        assert_eq!(sum(&[1.0, f64::INFINITY]), f64::INFINITY);
        assert_eq!(sum(&[f64::NEG_INFINITY, 2.0, 3.0]), f64::NEG_INFINITY);
        assert_eq!(sum(&[f64::MAX, f64::MAX]), f64::INFINITY);
        assert!(sum(&[f64::INFINITY, f64::NEG_INFINITY]).is_nan());
        assert!(sum(&[1.0, f64::NAN]).is_nan());
    }

    #[test]
    fn test_sum_i64() {
        assert_eq!(sum_i64(&[]), Some(0));
        assert_eq!(sum_i64(&[-5, 10, 3]), Some(8));
        assert_eq!(sum_i64(&[i64::MIN, -1]), None);
    }

    // --- mean ---

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[4.0]), Some(4.0));
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]).unwrap() - 2.5).abs() < 1e-15);
    }

    #[test]
    fn test_mean_rejects_bad_input() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, f64::NAN]), None);
        assert_eq!(mean(&[1.0, f64::INFINITY]), None);
    }

    #[test]
    fn test_mean_i64() {
        assert_eq!(mean_i64(&[]), None);
        assert_eq!(mean_i64(&[1, 2, 3, 4]), Some(2.5));
        // sum overflows i64 but not the i128 accumulator
        assert_eq!(mean_i64(&[i64::MAX, i64::MAX]), Some(i64::MAX as f64));
    }

    // --- median ---

    #[test]
    fn test_median_odd_even() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[5.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.0]), Some(7.0));
    }

    #[test]
    fn test_median_does_not_mutate() {
        let data = vec![3.0, 1.0, 2.0];
        let _ = median(&data);
        assert_eq!(data, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_median_rejects_bad_input() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[1.0, f64::NAN, 2.0]), None);
    }

    #[test]
    fn test_median_i64() {
        assert_eq!(median_i64(&[]), None);
        assert_eq!(median_i64(&[30, 29, 28]), Some(29.0));
        assert_eq!(median_i64(&[4, 1, 3, 2]), Some(2.5));
        assert_eq!(median_i64(&[-3]), Some(-3.0));
    }

    // --- variance / std_dev ---

    #[test]
    fn test_variance_known() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&v).unwrap() - 32.0 / 7.0).abs() < 1e-12);
        assert!((population_variance(&v).unwrap() - 4.0).abs() < 1e-12);
        assert!((population_std_dev(&v).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_variance_small_inputs() {
        assert_eq!(variance(&[1.0]), None);
        assert_eq!(std_dev(&[]), None);
        assert_eq!(population_variance(&[3.0]), Some(0.0));
        assert_eq!(population_variance(&[]), None);
    }

    #[test]
    fn test_variance_large_offset() {
        // naive E[X²] − E[X]² loses everything at this offset
        let v: Vec<f64> = [4.0, 7.0, 13.0, 16.0].iter().map(|x| x + 1e9).collect();
        assert!((variance(&v).unwrap() - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_variance_non_finite() {
        assert_eq!(variance(&[1.0, f64::NAN, 2.0]), None);
        assert_eq!(population_std_dev(&[f64::NEG_INFINITY]), None);
    }

    // --- WelfordAccumulator ---

    #[test]
    fn test_accumulator_empty() {
        let acc = WelfordAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.mean(), None);
        assert_eq!(acc.sample_variance(), None);
        assert_eq!(acc.population_std_dev(), None);
    }

    #[test]
    fn test_accumulator_matches_batch() {
        let data = [1.5, 2.5, -3.0, 8.25, 0.0, 4.0];
        let mut acc = WelfordAccumulator::new();
        acc.extend(data.iter().copied());
        assert_eq!(acc.count(), 6);
        assert!((acc.mean().unwrap() - mean(&data).unwrap()).abs() < 1e-14);
        assert!((acc.sample_std_dev().unwrap() - std_dev(&data).unwrap()).abs() < 1e-14);
    }

    #[test]
    fn test_accumulator_merge() {
        let data = [1.0, 2.0, 3.0, 4.0, 10.0, 20.0, 30.0];
        let mut left = WelfordAccumulator::new();
        left.extend(data[..3].iter().copied());
        let mut right = WelfordAccumulator::new();
        right.extend(data[3..].iter().copied());
        left.merge(&right);

        assert_eq!(left.count(), 7);
        assert!((left.mean().unwrap() - mean(&data).unwrap()).abs() < 1e-12);
        assert!((left.sample_variance().unwrap() - variance(&data).unwrap()).abs() < 1e-10);
    }

    #[test]
    fn test_accumulator_merge_empty() {
        let mut acc = WelfordAccumulator::new();
        acc.update(5.0);
        acc.merge(&WelfordAccumulator::new());
        assert_eq!(acc.count(), 1);

        let mut empty = WelfordAccumulator::new();
        empty.merge(&acc);
        assert_eq!(empty.mean(), Some(5.0));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating finite f64 vectors of reasonable size.
    fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1e6_f64..1e6, min_len..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn variance_non_negative(data in finite_vec(2, 100)) {
            let var = variance(&data).unwrap();
            prop_assert!(var >= 0.0, "variance must be >= 0, got {}", var);
        }

        #[test]
        fn std_dev_is_sqrt_of_variance(data in finite_vec(2, 100)) {
            let var = variance(&data).unwrap();
            let sd = std_dev(&data).unwrap();
            prop_assert!((sd * sd - var).abs() < 1e-8 * var.max(1.0));
        }

        #[test]
        fn mean_within_min_max(data in finite_vec(1, 100)) {
            let m = mean(&data).unwrap();
            let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= lo - 1e-9 && m <= hi + 1e-9);
        }

        #[test]
        fn median_splits_data(data in finite_vec(1, 100)) {
            let m = median(&data).unwrap();
            let below = data.iter().filter(|&&x| x < m).count();
            let above = data.iter().filter(|&&x| x > m).count();
            prop_assert!(below <= data.len() / 2);
            prop_assert!(above <= data.len() / 2);
        }

        #[test]
        fn median_i64_matches_f64(data in proptest::collection::vec(-1_000_000_i64..1_000_000, 1..60)) {
            let as_f64: Vec<f64> = data.iter().map(|&x| x as f64).collect();
            prop_assert_eq!(median_i64(&data), median(&as_f64));
        }

        #[test]
        fn sum_i64_matches_i128(data in proptest::collection::vec(-1_000_000_i64..1_000_000, 0..100)) {
            let expected: i128 = data.iter().map(|&x| i128::from(x)).sum();
            prop_assert_eq!(sum_i64(&data).map(i128::from), Some(expected));
        }
    }
}
