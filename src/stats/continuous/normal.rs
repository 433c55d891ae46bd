//! Normal (Gaussian) distribution.

use super::special::{self, INV_SQRT_2PI, LN_SQRT_2PI};
use crate::stats::distribution::{ContinuousDistribution, Distribution};
use crate::stats::error::{StatsError, StatsResult};

/// Normal (Gaussian) distribution.
///
/// f(x) = (1 / (σ√(2π))) exp(-(x-μ)² / (2σ²))
///
/// Reference distribution of every z statistic in the crate (score, Wald,
/// one-sample z, normal approximations of rank statistics).
///
/// # Examples
///
/// ```ignore
/// use survey_stats::stats::{Normal, ContinuousDistribution};
///
/// let z = Normal::standard();
/// let p_two_sided = 2.0 * z.sf(1.96);
/// assert!((p_two_sided - 0.05).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// Create a normal distribution with mean `mu` and standard deviation `sigma`.
    ///
    /// # Errors
    ///
    /// Returns a domain error if sigma is not positive or mu is not finite.
    pub fn new(mu: f64, sigma: f64) -> StatsResult<Self> {
        if sigma.is_nan() || sigma <= 0.0 {
            return Err(StatsError::domain("sigma", sigma, "must be positive"));
        }
        if !mu.is_finite() {
            return Err(StatsError::domain("mu", mu, "must be finite"));
        }
        Ok(Self { mu, sigma })
    }

    /// Standard normal N(0, 1).
    pub fn standard() -> Self {
        Self {
            mu: 0.0,
            sigma: 1.0,
        }
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Two-sided tail probability P(|X - μ| ≥ |x - μ|).
    pub fn two_sided(&self, x: f64) -> f64 {
        let z = self.standardize(x).abs();
        (2.0 * special::norm_cdf(-z)).min(1.0)
    }

    fn standardize(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }
}

impl Distribution for Normal {
    fn mean(&self) -> f64 {
        self.mu
    }

    fn var(&self) -> f64 {
        self.sigma * self.sigma
    }

    fn std(&self) -> f64 {
        self.sigma
    }
}

impl ContinuousDistribution for Normal {
    fn pdf(&self, x: f64) -> f64 {
        let z = self.standardize(x);
        INV_SQRT_2PI * (-0.5 * z * z).exp() / self.sigma
    }

    fn log_pdf(&self, x: f64) -> f64 {
        let z = self.standardize(x);
        -LN_SQRT_2PI - self.sigma.ln() - 0.5 * z * z
    }

    fn cdf(&self, x: f64) -> f64 {
        special::norm_cdf(self.standardize(x))
    }

    fn sf(&self, x: f64) -> f64 {
        special::norm_cdf(-self.standardize(x))
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(StatsError::domain("p", p, "probability must be in [0, 1]"));
        }
        if p == 0.0 {
            return Ok(f64::NEG_INFINITY);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        Ok(self.mu + self.sigma * special::norm_ppf(p))
    }
}
