//! Hypergeometric distribution.

use super::log_binom;
use crate::stats::distribution::{DiscreteDistribution, Distribution};
use crate::stats::error::{StatsError, StatsResult};

/// Hypergeometric distribution: successes in n draws without replacement
/// from a population of N items, K of which are successes.
///
/// P(X = k) = C(K, k) · C(N-K, n-k) / C(N, n)
///
/// With all margins of a 2×2 table fixed, the top-left cell follows this
/// law, which is what Fisher's exact test sums over.
///
/// # Examples
///
/// ```ignore
/// use survey_stats::stats::{Hypergeometric, DiscreteDistribution};
///
/// // table [[10, 5], [3, 12]]: N = 30, first row total 15, first column total 13
/// let h = Hypergeometric::new(30, 15, 13).unwrap();
/// let p_greater = h.sf(9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Hypergeometric {
    pop_size: u64,
    num_success: u64,
    num_draws: u64,
}

impl Hypergeometric {
    /// Create a hypergeometric distribution.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the population is empty or when K or n
    /// exceeds N.
    pub fn new(pop_size: u64, num_success: u64, num_draws: u64) -> StatsResult<Self> {
        if pop_size == 0 {
            return Err(StatsError::domain(
                "pop_size",
                0.0,
                "population size must be positive",
            ));
        }
        if num_success > pop_size {
            return Err(StatsError::domain(
                "num_success",
                num_success as f64,
                "number of successes cannot exceed population size",
            ));
        }
        if num_draws > pop_size {
            return Err(StatsError::domain(
                "num_draws",
                num_draws as f64,
                "number of draws cannot exceed population size",
            ));
        }
        Ok(Self {
            pop_size,
            num_success,
            num_draws,
        })
    }

    pub fn pop_size(&self) -> u64 {
        self.pop_size
    }

    pub fn num_success(&self) -> u64 {
        self.num_success
    }

    pub fn num_draws(&self) -> u64 {
        self.num_draws
    }

    /// Smallest value with positive mass: max(0, n + K - N).
    pub fn min_val(&self) -> u64 {
        (self.num_draws + self.num_success).saturating_sub(self.pop_size)
    }

    /// Largest value with positive mass: min(n, K).
    pub fn max_val(&self) -> u64 {
        self.num_draws.min(self.num_success)
    }

    /// The mass of every value in the support, from `min_val` to `max_val`.
    pub fn support_pmf(&self) -> Vec<(u64, f64)> {
        (self.min_val()..=self.max_val())
            .map(|k| (k, self.pmf(k)))
            .collect()
    }
}

impl Distribution for Hypergeometric {
    fn mean(&self) -> f64 {
        self.num_draws as f64 * self.num_success as f64 / self.pop_size as f64
    }

    fn var(&self) -> f64 {
        let big_n = self.pop_size as f64;
        if big_n <= 1.0 {
            return 0.0;
        }
        let k = self.num_success as f64;
        let n = self.num_draws as f64;
        n * (k / big_n) * ((big_n - k) / big_n) * ((big_n - n) / (big_n - 1.0))
    }
}

impl DiscreteDistribution for Hypergeometric {
    fn pmf(&self, k: u64) -> f64 {
        if k < self.min_val() || k > self.max_val() {
            return 0.0;
        }
        self.log_pmf(k).exp()
    }

    fn log_pmf(&self, k: u64) -> f64 {
        if k < self.min_val() || k > self.max_val() {
            return f64::NEG_INFINITY;
        }
        log_binom(self.num_success, k)
            + log_binom(self.pop_size - self.num_success, self.num_draws - k)
            - log_binom(self.pop_size, self.num_draws)
    }

    fn cdf(&self, k: u64) -> f64 {
        if k < self.min_val() {
            return 0.0;
        }
        if k >= self.max_val() {
            return 1.0;
        }
        let s: f64 = (self.min_val()..=k).map(|i| self.pmf(i)).sum();
        s.min(1.0)
    }

    fn sf(&self, k: u64) -> f64 {
        if k >= self.max_val() {
            return 0.0;
        }
        if k < self.min_val() {
            return 1.0;
        }
        // summed from the upper tail to keep small probabilities accurate
        let s: f64 = (k + 1..=self.max_val()).map(|i| self.pmf(i)).sum();
        s.min(1.0)
    }

    fn ppf(&self, p: f64) -> StatsResult<u64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(StatsError::domain("p", p, "probability must be in [0, 1]"));
        }
        let mut cum = 0.0;
        for k in self.min_val()..=self.max_val() {
            cum += self.pmf(k);
            if cum >= p - 1e-12 {
                return Ok(k);
            }
        }
        Ok(self.max_val())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hypergeometric_creation() {
        assert!(Hypergeometric::new(30, 15, 13).is_ok());
        assert!(Hypergeometric::new(0, 0, 0).is_err());
        assert!(Hypergeometric::new(10, 11, 5).is_err());
        assert!(Hypergeometric::new(10, 5, 11).is_err());
    }

    #[test]
    fn test_hypergeometric_support() {
        let h = Hypergeometric::new(20, 7, 15).unwrap();
        assert_eq!(h.min_val(), 2);
        assert_eq!(h.max_val(), 7);
        let total: f64 = h.support_pmf().iter().map(|&(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypergeometric_fisher_table() {
        // [[10, 5], [3, 12]]
        let h = Hypergeometric::new(30, 15, 13).unwrap();
        assert!((h.pmf(10) - 0.011409207676863323).abs() < 1e-13);
        assert!((h.sf(9) - 0.012663843516838072).abs() < 1e-13);
        assert!((h.cdf(10) - 0.9987453641600254).abs() < 1e-12);
    }

    #[test]
    fn test_hypergeometric_moments() {
        let h = Hypergeometric::new(30, 15, 13).unwrap();
        assert!((h.mean() - 6.5).abs() < 1e-12);
        let direct: f64 = h
            .support_pmf()
            .iter()
            .map(|&(k, p)| p * (k as f64 - 6.5).powi(2))
            .sum();
        assert!((h.var() - direct).abs() < 1e-10);
    }

    #[test]
    fn test_hypergeometric_ppf() {
        let h = Hypergeometric::new(30, 15, 13).unwrap();
        for k in h.min_val()..=h.max_val() {
            assert_eq!(h.ppf(h.cdf(k)).unwrap(), k);
        }
        assert!(h.ppf(1.5).is_err());
    }
}
