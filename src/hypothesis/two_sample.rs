//! Two-sample tests: independent samples and paired samples.

use crate::stats::helpers::{clean_pairs, clean_sample, clean_sample_min, mean, rank_average, sample_variance, tie_sum};
use crate::stats::rank::mann_whitney_use_exact;
use crate::stats::{
    di_mann_whitney, Normal, PValueMethod, StatsError, StatsResult, StudentT, TestResult,
};

use super::one_sample::{signed_rank_test, WilcoxonOptions, WilcoxonResult};

/// Independent-samples Student t test with pooled variance.
pub fn ts_student_t_is(x: &[f64], y: &[f64]) -> StatsResult<TestResult> {
    let x = clean_sample_min(x, 2, "ts_student_t_is")?;
    let y = clean_sample_min(y, 2, "ts_student_t_is")?;
    let (n1, n2) = (x.len() as f64, y.len() as f64);
    let df = n1 + n2 - 2.0;
    let pooled = ((n1 - 1.0) * sample_variance(&x) + (n2 - 1.0) * sample_variance(&y)) / df;
    if pooled == 0.0 {
        return Err(StatsError::domain("ts_student_t_is", 0.0, "both samples have zero variance"));
    }
    let t = (mean(&x) - mean(&y)) / (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
    let p = StudentT::new(df)?.two_sided(t);
    Ok(TestResult::new(t, Some(df), p, "independent-samples Student t"))
}

/// Welch t test for two independent samples with unequal variances.
///
/// Degrees of freedom follow Welch-Satterthwaite.
pub fn ts_welch_t_is(x: &[f64], y: &[f64]) -> StatsResult<TestResult> {
    let x = clean_sample_min(x, 2, "ts_welch_t_is")?;
    let y = clean_sample_min(y, 2, "ts_welch_t_is")?;
    let (n1, n2) = (x.len() as f64, y.len() as f64);
    let (a, b) = (sample_variance(&x) / n1, sample_variance(&y) / n2);
    if a + b == 0.0 {
        return Err(StatsError::domain("ts_welch_t_is", 0.0, "both samples have zero variance"));
    }
    let t = (mean(&x) - mean(&y)) / (a + b).sqrt();
    let df = (a + b).powi(2) / (a * a / (n1 - 1.0) + b * b / (n2 - 1.0));
    let p = StudentT::new(df)?.two_sided(t);
    Ok(TestResult::new(t, Some(df), p, "Welch t"))
}

/// Mann-Whitney U test for two independent samples.
///
/// Exact when the pooled sample is untied and `method` allows it (pooled
/// size at most [`EXACT_MAX_N`](crate::stats::EXACT_MAX_N) for `Auto`); the statistic is then the
/// smaller U. Otherwise a normal approximation with tie-corrected variance
/// and optional continuity correction; the statistic is z.
///
/// # Errors
///
/// `InvalidOption` when `Exact` is requested on tied data or on more than
/// [`MANN_WHITNEY_EXACT_HARD_MAX_N`](crate::stats::MANN_WHITNEY_EXACT_HARD_MAX_N)
/// pooled observations.
pub fn ts_mann_whitney(
    x: &[f64],
    y: &[f64],
    method: PValueMethod,
    cc: bool,
) -> StatsResult<TestResult> {
    let x = clean_sample(x, "ts_mann_whitney")?;
    let y = clean_sample(y, "ts_mann_whitney")?;
    let (n1, n2) = (x.len(), y.len());
    let pooled: Vec<f64> = x.iter().chain(&y).copied().collect();
    let (ranks, ties) = rank_average(&pooled);
    let r1: f64 = ranks[..n1].iter().sum();
    let (a, b) = (n1 as f64, n2 as f64);
    let u1 = r1 - a * (a + 1.0) / 2.0;
    let u = u1.min(a * b - u1);

    if method == PValueMethod::Exact && !ties.is_empty() {
        return Err(StatsError::invalid_option(
            "Exact",
            "exact Mann-Whitney test requires untied data",
        ));
    }
    if ties.is_empty() && mann_whitney_use_exact(n1, n2, method, "ts_mann_whitney")? {
        let p = 2.0 * di_mann_whitney(n1, n2, u, PValueMethod::Exact)?;
        return Ok(TestResult::new(u, None, p.min(1.0), "Mann-Whitney U, exact"));
    }

    let big_n = a + b;
    let var = a * b / 12.0 * ((big_n + 1.0) - tie_sum(&ties) / (big_n * (big_n - 1.0)));
    if !(var > 0.0) {
        return Err(StatsError::domain("ts_mann_whitney", 0.0, "all values are tied"));
    }
    let mut num = (u1 - a * b / 2.0).abs();
    if cc {
        num = (num - 0.5).max(0.0);
    }
    let z = num / var.sqrt();
    let p = Normal::standard().two_sided(z);
    let test = if cc {
        "Mann-Whitney U, normal approximation with continuity correction"
    } else {
        "Mann-Whitney U, normal approximation"
    };
    Ok(TestResult::new(z, None, p, test))
}

/// Paired-samples Wilcoxon signed-rank test on the differences x − y.
///
/// `opts.mu` defaults to zero. Pairs with a missing side are dropped.
pub fn ts_wilcoxon_ps(x: &[f64], y: &[f64], opts: WilcoxonOptions) -> StatsResult<WilcoxonResult> {
    let (x, y) = clean_pairs(x, y, "ts_wilcoxon_ps")?;
    let diffs: Vec<f64> = x.iter().zip(&y).map(|(a, b)| a - b).collect();
    signed_rank_test(&diffs, opts.mu.unwrap_or(0.0), opts, "paired Wilcoxon signed rank")
}
