//! F distribution (Fisher-Snedecor).

use super::special;
use crate::stats::distribution::{ContinuousDistribution, Distribution};
use crate::stats::error::{StatsError, StatsResult};

/// F distribution with d1 and d2 degrees of freedom.
///
/// Reference distribution for the one-way ANOVA family. d2 may be fractional
/// (Welch's ANOVA).
///
/// # Examples
///
/// ```ignore
/// use survey_stats::stats::{FDistribution, ContinuousDistribution};
///
/// let f = FDistribution::new(2.0, 12.0).unwrap();
/// let p = f.sf(4.26);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FDistribution {
    d1: f64,
    d2: f64,
    /// (d1/2)*ln(d1) + (d2/2)*ln(d2) - ln(B(d1/2, d2/2))
    log_norm: f64,
}

impl FDistribution {
    /// Create an F distribution.
    ///
    /// # Errors
    ///
    /// Returns a domain error if either df is not positive and finite.
    pub fn new(d1: f64, d2: f64) -> StatsResult<Self> {
        for (name, d) in [("d1", d1), ("d2", d2)] {
            if d.is_nan() || d <= 0.0 || !d.is_finite() {
                return Err(StatsError::domain(
                    name,
                    d,
                    "degrees of freedom must be positive and finite",
                ));
            }
        }
        let log_norm =
            (d1 / 2.0) * d1.ln() + (d2 / 2.0) * d2.ln() - special::lbeta(d1 / 2.0, d2 / 2.0);
        Ok(Self { d1, d2, log_norm })
    }

    /// Numerator degrees of freedom.
    pub fn dfn(&self) -> f64 {
        self.d1
    }

    /// Denominator degrees of freedom.
    pub fn dfd(&self) -> f64 {
        self.d2
    }
}

impl Distribution for FDistribution {
    fn mean(&self) -> f64 {
        if self.d2 > 2.0 {
            self.d2 / (self.d2 - 2.0)
        } else {
            f64::NAN
        }
    }

    fn var(&self) -> f64 {
        if self.d2 > 4.0 {
            let num = 2.0 * self.d2 * self.d2 * (self.d1 + self.d2 - 2.0);
            let denom = self.d1 * (self.d2 - 2.0).powi(2) * (self.d2 - 4.0);
            num / denom
        } else {
            f64::NAN
        }
    }
}

impl ContinuousDistribution for FDistribution {
    fn pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        self.log_pdf(x).exp()
    }

    fn log_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let half_d1 = self.d1 / 2.0;
        let half_d2 = self.d2 / 2.0;
        self.log_norm + (half_d1 - 1.0) * x.ln()
            - (half_d1 + half_d2) * (self.d1 * x + self.d2).ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let t = self.d1 * x / (self.d1 * x + self.d2);
        special::betainc(self.d1 / 2.0, self.d2 / 2.0, t)
    }

    fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        let t = self.d2 / (self.d1 * x + self.d2);
        special::betainc(self.d2 / 2.0, self.d1 / 2.0, t)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(StatsError::domain("p", p, "probability must be in [0, 1]"));
        }
        if p == 0.0 {
            return Ok(0.0);
        }
        if p == 1.0 {
            return Ok(f64::INFINITY);
        }
        let t = special::betaincinv(self.d1 / 2.0, self.d2 / 2.0, p);
        Ok(self.d2 * t / (self.d1 * (1.0 - t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f_creation() {
        assert!(FDistribution::new(5.0, 10.0).is_ok());
        assert!(FDistribution::new(2.0, 7.63).is_ok());
        assert!(FDistribution::new(0.0, 10.0).is_err());
        assert!(FDistribution::new(5.0, -1.0).is_err());
    }

    #[test]
    fn test_f_moments() {
        let f = FDistribution::new(5.0, 10.0).unwrap();
        assert!((f.mean() - 1.25).abs() < 1e-10);
        assert!(FDistribution::new(5.0, 2.0).unwrap().mean().is_nan());
    }

    #[test]
    fn test_f_tails() {
        let f = FDistribution::new(5.0, 10.0).unwrap();
        assert!((f.cdf(3.325834530413011) - 0.95).abs() < 1e-6);
        for x in [0.5, 1.0, 2.0, 3.0] {
            assert!((f.sf(x) + f.cdf(x) - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_f_matches_squared_t() {
        // F(1, ν) is the square of t(ν)
        let f = FDistribution::new(1.0, 12.0).unwrap();
        let t = crate::stats::StudentT::new(12.0).unwrap();
        assert!((f.sf(2.5 * 2.5) - t.two_sided(2.5)).abs() < 1e-10);
    }

    #[test]
    fn test_f_ppf() {
        let f = FDistribution::new(3.0, 20.0).unwrap();
        for p in [0.1, 0.5, 0.9] {
            let x = f.ppf(p).unwrap();
            assert!((f.cdf(x) - p).abs() < 1e-6);
        }
    }
}
