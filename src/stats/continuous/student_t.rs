//! Student's t distribution.

use super::special;
use crate::stats::distribution::{ContinuousDistribution, Distribution};
use crate::stats::error::{StatsError, StatsResult};
use std::f64::consts::PI;

/// Student's t distribution with ν degrees of freedom.
///
/// f(x) = Γ((ν+1)/2) / (√(νπ) Γ(ν/2)) (1 + x²/ν)^(-(ν+1)/2)
///
/// ν may be fractional, as produced by the Welch-Satterthwaite
/// approximation.
///
/// # Examples
///
/// ```ignore
/// use survey_stats::stats::StudentT;
///
/// let t = StudentT::new(17.0).unwrap();
/// let p = t.two_sided(1.19335);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StudentT {
    /// Degrees of freedom (ν)
    nu: f64,
    /// ln(Γ((ν+1)/2)) - ln(√(νπ)) - ln(Γ(ν/2))
    log_norm: f64,
}

impl StudentT {
    /// Create a Student's t distribution.
    ///
    /// # Errors
    ///
    /// Returns a domain error if nu is not positive and finite.
    pub fn new(nu: f64) -> StatsResult<Self> {
        if nu.is_nan() || nu <= 0.0 {
            return Err(StatsError::domain(
                "nu",
                nu,
                "degrees of freedom must be positive",
            ));
        }
        if !nu.is_finite() {
            return Err(StatsError::domain("nu", nu, "must be finite"));
        }
        let log_norm =
            special::lgamma((nu + 1.0) / 2.0) - 0.5 * (nu * PI).ln() - special::lgamma(nu / 2.0);
        Ok(Self { nu, log_norm })
    }

    pub fn df(&self) -> f64 {
        self.nu
    }

    /// Two-sided tail probability P(|T| ≥ |t|).
    pub fn two_sided(&self, t: f64) -> f64 {
        if t == 0.0 {
            return 1.0;
        }
        // 2 * SF(|t|) = I_{ν/(ν+t²)}(ν/2, 1/2)
        special::betainc(self.nu / 2.0, 0.5, self.nu / (self.nu + t * t)).min(1.0)
    }
}

impl Distribution for StudentT {
    fn mean(&self) -> f64 {
        if self.nu > 1.0 { 0.0 } else { f64::NAN }
    }

    fn var(&self) -> f64 {
        if self.nu > 2.0 {
            self.nu / (self.nu - 2.0)
        } else if self.nu > 1.0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    }
}

impl ContinuousDistribution for StudentT {
    fn pdf(&self, x: f64) -> f64 {
        self.log_pdf(x).exp()
    }

    fn log_pdf(&self, x: f64) -> f64 {
        self.log_norm - ((self.nu + 1.0) / 2.0) * (1.0 + x * x / self.nu).ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x == 0.0 {
            return 0.5;
        }
        let tail = 0.5 * special::betainc(self.nu / 2.0, 0.5, self.nu / (self.nu + x * x));
        if x > 0.0 { 1.0 - tail } else { tail }
    }

    fn sf(&self, x: f64) -> f64 {
        self.cdf(-x)
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
        if p == 0.5 {
            return Ok(0.0);
        }

        let (q, sign) = if p > 0.5 {
            (2.0 * (1.0 - p), 1.0)
        } else {
            (2.0 * p, -1.0)
        };
        let t = special::betaincinv(self.nu / 2.0, 0.5, q);
        Ok(sign * (self.nu * (1.0 / t - 1.0)).sqrt())
    }
}
