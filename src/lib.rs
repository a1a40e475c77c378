//! # u-statkit
//!
//! Statistical helper functions: the normal quantile and CDF, descriptive
//! statistics, random variate generation, shuffling and sampling.
//!
//! Every function is a self-contained computation over scalars or
//! in-memory slices. Nothing holds global state; randomness always comes
//! from a caller-supplied `rand::Rng`.
//!
//! ## Modules
//!
//! - [`special`] — Normal quantile (AS241) and CDF, log-factorials
//! - [`stats`] — Mean, median, sum, variance, standard deviation
//! - [`random`] — RNG construction, shuffling, sampling
//! - [`distributions`] — Uniform, exponential, normal, Bernoulli,
//!   binomial and Poisson variates
//! - [`error`] — [`StatsError`] and the crate [`Result`] alias
//!
//! ## Logging
//!
//! Rejected parameters are reported through the [`log`] facade at `debug`
//! level; the quantile's branch selection at `trace`. The crate never
//! installs a logger.

pub mod distributions;
pub mod error;
pub mod random;
pub mod special;
pub mod stats;

pub use error::{Result, StatsError};
pub use special::{normal_cdf, normal_quantile};
