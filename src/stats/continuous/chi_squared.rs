//! Chi-squared distribution.

use super::Gamma;
use crate::stats::distribution::{ContinuousDistribution, Distribution};
use crate::stats::error::{StatsError, StatsResult};

/// Chi-squared distribution with k degrees of freedom: χ²(k) = Gamma(k/2, 1/2).
///
/// Reference distribution for the goodness-of-fit family, Kruskal-Wallis,
/// Friedman, Cochran's Q and Mood's median test.
///
/// # Examples
///
/// ```ignore
/// use survey_stats::stats::{ChiSquared, ContinuousDistribution};
///
/// let chi2 = ChiSquared::new(3.0).unwrap();
/// let p = chi2.sf(7.81);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChiSquared {
    k: f64,
    gamma: Gamma,
}

impl ChiSquared {
    /// Create a chi-squared distribution. Fractional degrees of freedom are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns a domain error if k is not positive.
    pub fn new(k: f64) -> StatsResult<Self> {
        if k.is_nan() || k <= 0.0 {
            return Err(StatsError::domain(
                "k",
                k,
                "degrees of freedom must be positive",
            ));
        }
        let gamma = Gamma::new(k / 2.0, 0.5)?;
        Ok(Self { k, gamma })
    }

    pub fn df(&self) -> f64 {
        self.k
    }
}

impl Distribution for ChiSquared {
    fn mean(&self) -> f64 {
        self.k
    }

    fn var(&self) -> f64 {
        2.0 * self.k
    }
}

impl ContinuousDistribution for ChiSquared {
    fn pdf(&self, x: f64) -> f64 {
        self.gamma.pdf(x)
    }

    fn log_pdf(&self, x: f64) -> f64 {
        self.gamma.log_pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.gamma.cdf(x)
    }

    fn sf(&self, x: f64) -> f64 {
        self.gamma.sf(x)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        self.gamma.ppf(p)
    }
}
