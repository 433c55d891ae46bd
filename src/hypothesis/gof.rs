//! Goodness-of-fit tests for a single nominal variable.
//!
//! Every test takes the sample and, optionally, expected counts keyed by
//! category. Expected counts only need to be proportional: they are
//! rescaled to the sample size. When they are given, their keys define the
//! categories and data outside them is ignored; otherwise the observed
//! categories are used with equal expected counts.
//!
//! # Example
//!
//! ```ignore
//! use std::collections::BTreeMap;
//! use survey_stats::hypothesis::{ts_pearson_gof, GofCorrection};
//!
//! let expected = BTreeMap::from([("no", 1.0), ("yes", 3.0)]);
//! let res = ts_pearson_gof(&answers, Some(&expected), GofCorrection::None)?;
//! ```

use std::collections::BTreeMap;

use crate::stats::helpers::{category_counts, require_categories};
use crate::stats::{
    ChiSquared, ContinuousDistribution, Multinomial, StatsError, StatsResult,
    MULTINOMIAL_MAX_OUTCOMES,
};

/// Adjustment applied to a chi-square type statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GofCorrection {
    #[default]
    None,
    /// Yates (1934): Σ (|F − E| − 0.5)²/E for the Pearson statistic;
    /// other statistics move every observed count half a unit towards its
    /// expected count
    Yates,
    /// Multiply by (n − 1)/n (E. Pearson)
    Pearson,
    /// Divide by q = 1 + (k² − 1)/(6n(k − 1)) (Williams)
    Williams,
}

impl GofCorrection {
    pub(crate) fn label(self) -> &'static str {
        match self {
            GofCorrection::None => "",
            GofCorrection::Yates => ", with Yates continuity correction",
            GofCorrection::Pearson => ", with E. Pearson continuity correction",
            GofCorrection::Williams => ", with Williams continuity correction",
        }
    }
}

/// Power of the Cressie-Read divergence family.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Lambda {
    /// λ = 2/3
    #[default]
    CressieRead,
    /// λ = 0, the G statistic
    LikelihoodRatio,
    /// λ = 1
    Pearson,
    /// λ = −1/2
    FreemanTukey,
    /// λ = −1
    ModLog,
    /// λ = −2
    Neyman,
    Value(f64),
}

impl Lambda {
    pub fn value(self) -> f64 {
        match self {
            Lambda::CressieRead => 2.0 / 3.0,
            Lambda::LikelihoodRatio => 0.0,
            Lambda::Pearson => 1.0,
            Lambda::FreemanTukey => -0.5,
            Lambda::ModLog => -1.0,
            Lambda::Neyman => -2.0,
            Lambda::Value(v) => v,
        }
    }

    pub(crate) fn name(self) -> String {
        match self {
            Lambda::CressieRead => "Cressie-Read".to_string(),
            Lambda::LikelihoodRatio => "likelihood-ratio".to_string(),
            Lambda::Pearson => "Pearson chi-square".to_string(),
            Lambda::FreemanTukey => "Freeman-Tukey".to_string(),
            Lambda::ModLog => "mod-log likelihood ratio".to_string(),
            Lambda::Neyman => "Neyman".to_string(),
            Lambda::Value(v) => format!("power divergence with lambda = {}", v),
        }
    }
}

/// Result of a goodness-of-fit (or independence) test.
#[derive(Debug, Clone, PartialEq)]
pub struct GofResult {
    /// Sample size
    pub n: u64,
    /// Number of categories (cells for an independence test)
    pub k: usize,
    /// Test statistic; the point probability of the observed counts for
    /// the exact multinomial test
    pub statistic: f64,
    pub df: Option<f64>,
    pub p_value: f64,
    /// Smallest expected count
    pub min_exp: f64,
    /// Proportion of categories with an expected count below 5
    pub prop_below_5: f64,
    pub test: String,
}

/// Observed and expected counts in category order.
struct Cells {
    observed: Vec<f64>,
    expected: Vec<f64>,
    n: u64,
}

impl Cells {
    fn from_sample<T: Ord + Clone>(
        data: &[T],
        expected: Option<&BTreeMap<T, f64>>,
        context: &str,
    ) -> StatsResult<Self> {
        require_categories(data, context)?;
        let counts = category_counts(data);
        let (observed, weights): (Vec<f64>, Vec<f64>) = match expected {
            Some(exp) => {
                if let Some((_, &bad)) = exp.iter().find(|(_, &e)| !(e > 0.0 && e.is_finite())) {
                    return Err(StatsError::domain(
                        "expected",
                        bad,
                        "expected counts must be positive",
                    ));
                }
                exp.iter()
                    .map(|(cat, &e)| (counts.get(cat).copied().unwrap_or(0) as f64, e))
                    .unzip()
            }
            None => counts.values().map(|&c| (c as f64, 1.0)).unzip(),
        };
        let k = observed.len();
        if k < 2 {
            return Err(StatsError::insufficient(2, k, context));
        }
        let n = observed.iter().sum::<f64>();
        if n == 0.0 {
            return Err(StatsError::empty(context));
        }
        let total: f64 = weights.iter().sum();
        let expected = weights.iter().map(|w| w / total * n).collect();
        Ok(Self {
            observed,
            expected,
            n: n as u64,
        })
    }

    fn k(&self) -> usize {
        self.observed.len()
    }

    /// Observed counts after the Yates adjustment, if requested.
    fn adjusted(&self, correction: GofCorrection) -> Vec<f64> {
        if correction == GofCorrection::Yates {
            yates_adjust(&self.observed, &self.expected)
        } else {
            self.observed.clone()
        }
    }

    fn factor(&self, correction: GofCorrection) -> f64 {
        let n = self.n as f64;
        let k = self.k() as f64;
        match correction {
            GofCorrection::Pearson => (n - 1.0) / n,
            GofCorrection::Williams => 1.0 / (1.0 + (k * k - 1.0) / (6.0 * n * (k - 1.0))),
            GofCorrection::None | GofCorrection::Yates => 1.0,
        }
    }

    fn finish(&self, statistic: f64, name: &str, correction: GofCorrection) -> StatsResult<GofResult> {
        let df = self.k() as f64 - 1.0;
        chi_square_result(
            self.n,
            statistic,
            df,
            &self.expected,
            format!("{} test of goodness-of-fit{}", name, correction.label()),
        )
    }
}

/// Move each observed count half a unit towards its expected count. A
/// count equal to its expectation is left as it is.
pub(crate) fn yates_adjust(observed: &[f64], expected: &[f64]) -> Vec<f64> {
    observed
        .iter()
        .zip(expected)
        .map(|(&f, &e)| {
            if f > e {
                f - 0.5
            } else if f < e {
                f + 0.5
            } else {
                f
            }
        })
        .collect()
}

/// Power divergence with the Yates correction applied when requested.
///
/// For λ = 1 this is the Yates (1934) form Σ (|F − E| − 0.5)²/E, so a
/// cell with F = E still adds 0.25/E. Other λ use [`yates_adjust`].
pub(crate) fn corrected_divergence(
    observed: &[f64],
    expected: &[f64],
    lambda: f64,
    correction: GofCorrection,
) -> StatsResult<f64> {
    if correction != GofCorrection::Yates {
        return power_divergence(observed, expected, lambda);
    }
    if lambda == 1.0 {
        return Ok(observed
            .iter()
            .zip(expected)
            .map(|(f, e)| ((f - e).abs() - 0.5).powi(2) / e)
            .sum());
    }
    power_divergence(&yates_adjust(observed, expected), expected, lambda)
}

/// Cressie-Read power divergence 2/(λ(λ+1))·Σ F((F/E)^λ − 1), with the
/// limits at λ = 0 and λ = −1. A zero count contributes nothing for
/// λ > −1 and is undefined otherwise.
pub(crate) fn power_divergence(observed: &[f64], expected: &[f64], lambda: f64) -> StatsResult<f64> {
    if lambda <= -1.0 && observed.iter().any(|&f| f == 0.0) {
        return Err(StatsError::domain(
            "lambda",
            lambda,
            "statistic is undefined with an observed count of zero",
        ));
    }
    let cells = observed.iter().zip(expected).filter(|(f, _)| lambda <= -1.0 || **f > 0.0);
    let stat = if lambda == 0.0 {
        2.0 * cells.map(|(f, e)| f * (f / e).ln()).sum::<f64>()
    } else if lambda == -1.0 {
        2.0 * cells.map(|(f, e)| e * (e / f).ln()).sum::<f64>()
    } else {
        2.0 * cells.map(|(f, e)| f * ((f / e).powf(lambda) - 1.0)).sum::<f64>()
            / (lambda * (lambda + 1.0))
    };
    Ok(stat)
}

/// Assemble a χ² based result.
pub(crate) fn chi_square_result(
    n: u64,
    statistic: f64,
    df: f64,
    expected: &[f64],
    test: String,
) -> StatsResult<GofResult> {
    let p = ChiSquared::new(df)?.sf(statistic);
    let min_exp = expected.iter().copied().fold(f64::INFINITY, f64::min);
    let below = expected.iter().filter(|&&e| e < 5.0).count();
    Ok(GofResult {
        n,
        k: expected.len(),
        statistic,
        df: Some(df),
        p_value: p.clamp(0.0, 1.0),
        min_exp,
        prop_below_5: below as f64 / expected.len() as f64,
        test,
    })
}

/// Pearson chi-square goodness-of-fit test, Σ (F − E)²/E.
pub fn ts_pearson_gof<T: Ord + Clone>(
    data: &[T],
    expected: Option<&BTreeMap<T, f64>>,
    correction: GofCorrection,
) -> StatsResult<GofResult> {
    let cells = Cells::from_sample(data, expected, "ts_pearson_gof")?;
    let stat = corrected_divergence(&cells.observed, &cells.expected, 1.0, correction)?;
    cells.finish(stat * cells.factor(correction), "Pearson chi-square", correction)
}

/// G (likelihood ratio) goodness-of-fit test, 2·Σ F ln(F/E).
pub fn ts_g_gof<T: Ord + Clone>(
    data: &[T],
    expected: Option<&BTreeMap<T, f64>>,
    correction: GofCorrection,
) -> StatsResult<GofResult> {
    let cells = Cells::from_sample(data, expected, "ts_g_gof")?;
    let stat = corrected_divergence(&cells.observed, &cells.expected, 0.0, correction)?;
    cells.finish(stat * cells.factor(correction), "G", correction)
}

/// Freeman-Tukey goodness-of-fit test, 4·Σ (√F − √E)².
pub fn ts_freeman_tukey_gof<T: Ord + Clone>(
    data: &[T],
    expected: Option<&BTreeMap<T, f64>>,
    correction: GofCorrection,
) -> StatsResult<GofResult> {
    let cells = Cells::from_sample(data, expected, "ts_freeman_tukey_gof")?;
    let obs = cells.adjusted(correction);
    let stat: f64 = 4.0
        * obs
            .iter()
            .zip(&cells.expected)
            .map(|(f, e)| (f.sqrt() - e.sqrt()).powi(2))
            .sum::<f64>();
    cells.finish(stat * cells.factor(correction), "Freeman-Tukey", correction)
}

/// Default weights of [`ts_freeman_tukey_read_gof`] (equivalent to a
/// power divergence with λ = 1/2).
pub const FREEMAN_TUKEY_READ_WEIGHTS: [f64; 2] = [4.0 / 3.0, 8.0 / 3.0];

/// Freeman-Tukey-Read goodness-of-fit test (Read, 1993):
/// Σ (Σⱼ bⱼ·(√(F/E))ʲ)·(√F − √E)².
///
/// The weights `b` should sum to four.
pub fn ts_freeman_tukey_read_gof<T: Ord + Clone>(
    data: &[T],
    expected: Option<&BTreeMap<T, f64>>,
    weights: &[f64],
    correction: GofCorrection,
) -> StatsResult<GofResult> {
    if weights.is_empty() {
        return Err(StatsError::empty("Freeman-Tukey-Read weights"));
    }
    let cells = Cells::from_sample(data, expected, "ts_freeman_tukey_read_gof")?;
    let obs = cells.adjusted(correction);
    let stat: f64 = obs
        .iter()
        .zip(&cells.expected)
        .map(|(f, e)| {
            let root = (f / e).sqrt();
            let b: f64 = weights
                .iter()
                .enumerate()
                .map(|(j, w)| w * root.powi(j as i32))
                .sum();
            b * (f.sqrt() - e.sqrt()).powi(2)
        })
        .sum();
    cells.finish(stat * cells.factor(correction), "Freeman-Tukey-Read", correction)
}

/// Neyman goodness-of-fit test, Σ (F − E)²/F.
///
/// # Errors
///
/// `Domain` when a category has an observed count of zero.
pub fn ts_neyman_gof<T: Ord + Clone>(
    data: &[T],
    expected: Option<&BTreeMap<T, f64>>,
    correction: GofCorrection,
) -> StatsResult<GofResult> {
    let cells = Cells::from_sample(data, expected, "ts_neyman_gof")?;
    let obs = cells.adjusted(correction);
    if obs.iter().any(|&f| f == 0.0) {
        return Err(StatsError::domain(
            "observed",
            0.0,
            "Neyman statistic is undefined with an observed count of zero",
        ));
    }
    let stat: f64 = obs
        .iter()
        .zip(&cells.expected)
        .map(|(f, e)| (f - e).powi(2) / f)
        .sum();
    cells.finish(stat * cells.factor(correction), "Neyman", correction)
}

/// Modified log-likelihood goodness-of-fit test, 2·Σ E ln(E/F).
///
/// # Errors
///
/// `Domain` when a category has an observed count of zero.
pub fn ts_mod_log_likelihood_gof<T: Ord + Clone>(
    data: &[T],
    expected: Option<&BTreeMap<T, f64>>,
    correction: GofCorrection,
) -> StatsResult<GofResult> {
    let cells = Cells::from_sample(data, expected, "ts_mod_log_likelihood_gof")?;
    let stat = corrected_divergence(&cells.observed, &cells.expected, -1.0, correction)?;
    cells.finish(
        stat * cells.factor(correction),
        "mod-log likelihood ratio",
        correction,
    )
}

/// Cressie-Read power divergence goodness-of-fit test.
pub fn ts_powerdivergence_gof<T: Ord + Clone>(
    data: &[T],
    expected: Option<&BTreeMap<T, f64>>,
    lambda: Lambda,
    correction: GofCorrection,
) -> StatsResult<GofResult> {
    let l = lambda.value();
    if !l.is_finite() {
        return Err(StatsError::domain("lambda", l, "must be finite"));
    }
    let cells = Cells::from_sample(data, expected, "ts_powerdivergence_gof")?;
    let stat = corrected_divergence(&cells.observed, &cells.expected, l, correction)?;
    cells.finish(stat * cells.factor(correction), &lambda.name(), correction)
}

/// Exact multinomial goodness-of-fit test.
///
/// The p-value sums the probability of every outcome that is no more
/// likely than the observed counts (relative tolerance 1e-7). The
/// statistic is the point probability of the observed counts.
///
/// When the number of possible outcomes exceeds
/// [`MULTINOMIAL_MAX_OUTCOMES`], the Pearson chi-square test is returned
/// instead and `test` says so.
pub fn ts_multinomial_gof<T: Ord + Clone>(
    data: &[T],
    expected: Option<&BTreeMap<T, f64>>,
) -> StatsResult<GofResult> {
    let cells = Cells::from_sample(data, expected, "ts_multinomial_gof")?;
    let n = cells.n as f64;
    let probs: Vec<f64> = cells.expected.iter().map(|e| e / n).collect();
    let dist = Multinomial::new(cells.n, probs)?;

    let outcomes = dist.outcome_count();
    if outcomes > MULTINOMIAL_MAX_OUTCOMES as f64 {
        log::debug!(
            "multinomial test would enumerate {} outcomes, using Pearson chi-square",
            outcomes
        );
        let stat = power_divergence(&cells.observed, &cells.expected, 1.0)?;
        let mut res = cells.finish(stat, "Pearson chi-square", GofCorrection::None)?;
        res.test.push_str(" (too many outcomes for the exact multinomial test)");
        return Ok(res);
    }

    let observed: Vec<u64> = cells.observed.iter().map(|&f| f as u64).collect();
    let p_obs = dist.pmf(&observed);
    let limit = p_obs * (1.0 + 1e-7);
    let mut p = 0.0;
    dist.for_each_outcome(|x| {
        let px = dist.pmf(x);
        if px <= limit {
            p += px;
        }
    });

    let below = cells.expected.iter().filter(|&&e| e < 5.0).count();
    Ok(GofResult {
        n: cells.n,
        k: cells.k(),
        statistic: p_obs,
        df: None,
        p_value: p.min(1.0),
        min_exp: cells.expected.iter().copied().fold(f64::INFINITY, f64::min),
        prop_below_5: below as f64 / cells.k() as f64,
        test: "exact multinomial test of goodness-of-fit".to_string(),
    })
}
