//! Core distribution traits.

use super::error::{StatsError, StatsResult};

/// Moments shared by every distribution.
pub trait Distribution {
    /// Mean of the distribution.
    fn mean(&self) -> f64;

    /// Variance of the distribution.
    fn var(&self) -> f64;

    /// Standard deviation.
    fn std(&self) -> f64 {
        self.var().sqrt()
    }
}

/// A distribution over the real line.
pub trait ContinuousDistribution: Distribution {
    /// Probability density function.
    fn pdf(&self, x: f64) -> f64;

    /// Log of the probability density function.
    fn log_pdf(&self, x: f64) -> f64 {
        self.pdf(x).ln()
    }

    /// Cumulative distribution function P(X ≤ x).
    fn cdf(&self, x: f64) -> f64;

    /// Survival function P(X > x).
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Percent point function (inverse CDF).
    fn ppf(&self, p: f64) -> StatsResult<f64>;

    /// Inverse survival function.
    fn isf(&self, p: f64) -> StatsResult<f64> {
        self.ppf(1.0 - p)
    }

    /// Central interval containing `confidence` of the probability mass.
    fn interval(&self, confidence: f64) -> StatsResult<(f64, f64)> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(StatsError::domain(
                "confidence",
                confidence,
                "must be in [0, 1]",
            ));
        }
        let alpha = (1.0 - confidence) / 2.0;
        Ok((self.ppf(alpha)?, self.ppf(1.0 - alpha)?))
    }
}

/// A distribution over the non-negative integers.
pub trait DiscreteDistribution: Distribution {
    /// Probability mass function.
    fn pmf(&self, k: u64) -> f64;

    /// Log of the probability mass function.
    fn log_pmf(&self, k: u64) -> f64 {
        self.pmf(k).ln()
    }

    /// Cumulative distribution function P(X ≤ k).
    fn cdf(&self, k: u64) -> f64;

    /// Survival function P(X > k).
    fn sf(&self, k: u64) -> f64 {
        1.0 - self.cdf(k)
    }

    /// Smallest k with CDF(k) ≥ p.
    fn ppf(&self, p: f64) -> StatsResult<u64>;
}
