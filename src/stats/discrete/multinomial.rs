//! Multinomial distribution.

use super::log_multinom;
use crate::stats::error::{StatsError, StatsResult};

/// Multinomial distribution over k categories with n draws.
///
/// P(X = x) = n! / (x₁! ⋯ xₖ!) · p₁^x₁ ⋯ pₖ^xₖ
///
/// The exact multinomial goodness-of-fit test sums this mass over every
/// outcome that is no more likely than the observed one.
///
/// # Examples
///
/// ```ignore
/// use survey_stats::stats::Multinomial;
///
/// let m = Multinomial::new(10, vec![0.3, 0.3, 0.4]).unwrap();
/// let p = m.pmf(&[3, 3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Multinomial {
    n: u64,
    p: Vec<f64>,
    /// ln(pᵢ), with -inf for zero probabilities
    ln_p: Vec<f64>,
}

impl Multinomial {
    /// Create a multinomial distribution.
    ///
    /// # Errors
    ///
    /// Returns a domain error if `p` is empty, contains a negative entry or
    /// does not sum to one within 1e-9.
    pub fn new(n: u64, p: Vec<f64>) -> StatsResult<Self> {
        if p.is_empty() {
            return Err(StatsError::empty("multinomial probabilities"));
        }
        if let Some(&bad) = p.iter().find(|&&pi| pi.is_nan() || pi < 0.0) {
            return Err(StatsError::domain(
                "p",
                bad,
                "probabilities must be non-negative",
            ));
        }
        let sum: f64 = p.iter().sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(StatsError::domain("p", sum, "probabilities must sum to 1"));
        }
        let ln_p = p.iter().map(|&pi| pi.ln()).collect();
        Ok(Self { n, p, ln_p })
    }

    /// Number of draws.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Category probabilities.
    pub fn p(&self) -> &[f64] {
        &self.p
    }

    /// Number of categories.
    pub fn k(&self) -> usize {
        self.p.len()
    }

    /// Probability of the count vector `x`. Zero when `x` has the wrong
    /// length or does not sum to n.
    pub fn pmf(&self, x: &[u64]) -> f64 {
        self.log_pmf(x).exp()
    }

    /// Log probability of the count vector `x`.
    pub fn log_pmf(&self, x: &[u64]) -> f64 {
        if x.len() != self.k() || x.iter().sum::<u64>() != self.n {
            return f64::NEG_INFINITY;
        }
        let mut log_result = log_multinom(x);
        for (&xi, &lpi) in x.iter().zip(self.ln_p.iter()) {
            if xi > 0 {
                log_result += xi as f64 * lpi;
            }
        }
        log_result
    }

    /// Expected counts n·pᵢ.
    pub fn mean_vec(&self) -> Vec<f64> {
        let n_f = self.n as f64;
        self.p.iter().map(|&pi| n_f * pi).collect()
    }

    /// Number of distinct count vectors, C(n + k - 1, k - 1).
    pub fn outcome_count(&self) -> f64 {
        super::log_binom(self.n + self.k() as u64 - 1, self.k() as u64 - 1)
            .exp()
            .round()
    }

    /// Visit every count vector that sums to n, in lexicographic order.
    pub fn for_each_outcome<F: FnMut(&[u64])>(&self, mut visit: F) {
        let k = self.k();
        let mut x = vec![0u64; k];
        fill(&mut x, 0, self.n, &mut visit);
    }
}

fn fill<F: FnMut(&[u64])>(x: &mut [u64], pos: usize, remaining: u64, visit: &mut F) {
    if pos + 1 == x.len() {
        x[pos] = remaining;
        visit(x);
        return;
    }
    for v in (0..=remaining).rev() {
        x[pos] = v;
        fill(x, pos + 1, remaining - v, visit);
    }
}
