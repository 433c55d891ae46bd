//! Probability distributions and the shared statistics plumbing.
//!
//! Distributions have scalar methods only; every survey function works on
//! plain slices.
//!
//! ```ignore
//! use survey_stats::stats::{Normal, ContinuousDistribution};
//!
//! let n = Normal::standard();
//! let p = n.sf(1.96);
//! ```
//!
//! # Rank statistics
//!
//! The null distributions behind the nonparametric tests live in [`rank`]
//! as the `di_*` functions, together with the exact/asymptotic thresholds.

// Core modules
mod continuous;
mod discrete;
mod distribution;
mod error;

// Shared slice helpers and records
pub(crate) mod helpers;
pub mod rank;
mod types;

// Public API: Distribution traits and types
pub use distribution::{ContinuousDistribution, DiscreteDistribution, Distribution};
pub use error::{StatsError, StatsResult};
pub use types::{Alternative, TestResult};

// Public API: Continuous distributions
pub use continuous::{ChiSquared, FDistribution, Gamma, Normal, StudentT};

// Public API: Discrete distributions
pub use discrete::{Binomial, Hypergeometric, Multinomial};

// Public API: rank-statistic null distributions
pub use rank::{
    EXACT_MAX_N, MANN_WHITNEY_EXACT_HARD_MAX_N, MULTINOMIAL_MAX_OUTCOMES, PValueMethod,
    SPEARMAN_EXACT_HARD_MAX_N, SPEARMAN_EXACT_MAX_N, di_kendall_tau, di_mann_whitney,
    di_multinomial, di_spearman_rho, di_wilcoxon_signed_rank,
};

pub(crate) use continuous::special;
pub(crate) use discrete::{log_binom, log_multinom};
