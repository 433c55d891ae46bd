//! Gamma distribution.

use super::special;
use crate::stats::distribution::{ContinuousDistribution, Distribution};
use crate::stats::error::{StatsError, StatsResult};

/// Gamma distribution with shape α and rate β.
///
/// f(x) = (β^α / Γ(α)) x^(α-1) exp(-βx)  for x > 0
///
/// Only used here as the backbone of [`ChiSquared`](super::ChiSquared).
#[derive(Debug, Clone, Copy)]
pub struct Gamma {
    alpha: f64,
    beta: f64,
    /// α*ln(β) - ln(Γ(α))
    log_norm: f64,
}

impl Gamma {
    /// Create a gamma distribution with shape `alpha` and rate `beta`.
    pub fn new(alpha: f64, beta: f64) -> StatsResult<Self> {
        if alpha.is_nan() || alpha <= 0.0 || !alpha.is_finite() {
            return Err(StatsError::domain(
                "alpha",
                alpha,
                "shape must be positive and finite",
            ));
        }
        if beta.is_nan() || beta <= 0.0 || !beta.is_finite() {
            return Err(StatsError::domain(
                "beta",
                beta,
                "rate must be positive and finite",
            ));
        }
        let log_norm = alpha * beta.ln() - special::lgamma(alpha);
        Ok(Self {
            alpha,
            beta,
            log_norm,
        })
    }

    pub fn shape(&self) -> f64 {
        self.alpha
    }

    pub fn rate(&self) -> f64 {
        self.beta
    }
}

impl Distribution for Gamma {
    fn mean(&self) -> f64 {
        self.alpha / self.beta
    }

    fn var(&self) -> f64 {
        self.alpha / (self.beta * self.beta)
    }
}

impl ContinuousDistribution for Gamma {
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
        self.log_norm + (self.alpha - 1.0) * x.ln() - self.beta * x
    }

    fn cdf(&self, x: f64) -> f64 {
        special::gammainc(self.alpha, self.beta * x)
    }

    fn sf(&self, x: f64) -> f64 {
        special::gammaincc(self.alpha, self.beta * x)
    }

    fn ppf(&self, p: f64) -> StatsResult<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(StatsError::domain("p", p, "probability must be in [0, 1]"));
        }
        Ok(special::gammaincinv(self.alpha, p) / self.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_creation() {
        assert!(Gamma::new(2.0, 1.0).is_ok());
        assert!(Gamma::new(0.0, 1.0).is_err());
        assert!(Gamma::new(1.0, -1.0).is_err());
    }

    #[test]
    fn test_gamma_exponential_case() {
        // Gamma(1, λ) is Exponential(λ)
        let g = Gamma::new(1.0, 2.0).unwrap();
        assert!((g.cdf(1.0) - (1.0 - (-2.0_f64).exp())).abs() < 1e-12);
        assert!((g.sf(1.0) - (-2.0_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_gamma_ppf_roundtrip() {
        let g = Gamma::new(3.5, 0.5).unwrap();
        for p in [0.05, 0.5, 0.95] {
            let x = g.ppf(p).unwrap();
            assert!((g.cdf(x) - p).abs() < 1e-10);
        }
        assert!((g.ppf(0.0).unwrap() - 0.0).abs() < 1e-15);
        assert!(g.ppf(1.0).unwrap().is_infinite());
    }
}
