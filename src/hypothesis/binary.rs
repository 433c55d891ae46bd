//! One-sample tests for a binary variable.
//!
//! All three tests compare the proportion of the less frequent category
//! with its hypothesized value. `p0` is the expected proportion of the
//! first category.

use crate::stats::helpers::binary_counts;
use crate::stats::{Binomial, DiscreteDistribution, Normal, StatsError, StatsResult, TestResult};

/// How the exact binomial test builds its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TwoSidedMethod {
    /// Add the opposite tail at equal distance from the expected count.
    #[default]
    EqDist,
    /// Double the one-sided p-value.
    Double,
    /// Add every opposite-tail outcome no more likely than the observed one.
    SmallP,
}

impl TwoSidedMethod {
    fn label(self) -> &'static str {
        match self {
            TwoSidedMethod::EqDist => "equal-distance method",
            TwoSidedMethod::Double => "double one-sided method",
            TwoSidedMethod::SmallP => "small p method",
        }
    }
}

fn require_p0(p0: f64) -> StatsResult<()> {
    if !(p0 > 0.0 && p0 < 1.0) {
        return Err(StatsError::domain("p0", p0, "must be in (0, 1)"));
    }
    Ok(())
}

/// The smaller count and the proportion expected for it.
fn min_count(n1: u64, n2: u64, p0: f64) -> (u64, f64) {
    if n2 < n1 {
        (n2, 1.0 - p0)
    } else {
        (n1, p0)
    }
}

/// Two-sided exact binomial p-value for category counts `n1` and `n2`,
/// with `p0` the expected proportion of category 1.
pub(crate) fn binomial_two_sided(n1: u64, n2: u64, p0: f64, method: TwoSidedMethod) -> StatsResult<f64> {
    let n = n1 + n2;
    let (k, p) = min_count(n1, n2, p0);
    let dist = Binomial::new(n, p)?;
    let one_sided = dist.cdf(k);
    let other = match method {
        TwoSidedMethod::Double => one_sided,
        TwoSidedMethod::EqDist => {
            let expected = n as f64 * p;
            let right = 2.0 * expected - k as f64 - 1.0;
            if right < 0.0 {
                1.0
            } else {
                dist.sf(right.floor() as u64)
            }
        }
        TwoSidedMethod::SmallP => {
            let limit = dist.pmf(k) * (1.0 + 1e-7);
            (k + 1..=n)
                .map(|i| dist.pmf(i))
                .filter(|&pi| pi <= limit)
                .sum()
        }
    };
    Ok((one_sided + other).min(1.0))
}

/// Exact one-sample binomial test.
///
/// The statistic is the smaller of the two counts.
///
/// # Examples
///
/// ```ignore
/// use survey_stats::hypothesis::{ts_binomial_os, TwoSidedMethod};
///
/// let res = ts_binomial_os(&answers, Some(("yes", "no")), 0.5, TwoSidedMethod::EqDist)?;
/// ```
pub fn ts_binomial_os<T: Ord + Clone>(
    data: &[T],
    codes: Option<(T, T)>,
    p0: f64,
    method: TwoSidedMethod,
) -> StatsResult<TestResult> {
    require_p0(p0)?;
    let (n1, n2) = binary_counts(data, codes, "ts_binomial_os")?;
    let p = binomial_two_sided(n1, n2, p0, method)?;
    Ok(TestResult::new(
        n1.min(n2) as f64,
        None,
        p,
        format!("one-sample binomial, with {}", method.label()),
    ))
}

fn z_proportion(
    data_counts: (u64, u64),
    p0: f64,
    yates: bool,
    wald: bool,
) -> (f64, f64) {
    let (n1, n2) = data_counts;
    let n = (n1 + n2) as f64;
    let (k, expected) = min_count(n1, n2, p0);
    let cc = if yates { 0.5 } else { 0.0 };
    let p = (k as f64 + cc) / n;
    let se = if wald {
        (p * (1.0 - p) / n).sqrt()
    } else {
        (p0 * (1.0 - p0) / n).sqrt()
    };
    let z = (p - expected) / se;
    let pval = if z.is_finite() {
        Normal::standard().two_sided(z)
    } else {
        0.0
    };
    (z, pval)
}

/// One-sample score test (normal approximation with the null standard
/// error).
pub fn ts_score_os<T: Ord + Clone>(
    data: &[T],
    codes: Option<(T, T)>,
    p0: f64,
    yates: bool,
) -> StatsResult<TestResult> {
    require_p0(p0)?;
    let counts = binary_counts(data, codes, "ts_score_os")?;
    let (z, p) = z_proportion(counts, p0, yates, false);
    let test = if yates {
        "one-sample score, with Yates continuity correction"
    } else {
        "one-sample score"
    };
    Ok(TestResult::new(z, None, p, test))
}

/// One-sample Wald test (normal approximation with the sample standard
/// error).
///
/// # Errors
///
/// `Domain` when one category is absent, since the sample standard error
/// is then zero.
pub fn ts_wald_os<T: Ord + Clone>(
    data: &[T],
    codes: Option<(T, T)>,
    p0: f64,
    yates: bool,
) -> StatsResult<TestResult> {
    require_p0(p0)?;
    let counts = binary_counts(data, codes, "ts_wald_os")?;
    if !yates && counts.0.min(counts.1) == 0 {
        return Err(StatsError::domain(
            "counts",
            0.0,
            "Wald standard error is zero when a category is absent",
        ));
    }
    let (z, p) = z_proportion(counts, p0, yates, true);
    let test = if yates {
        "one-sample Wald, with Yates continuity correction"
    } else {
        "one-sample Wald"
    };
    Ok(TestResult::new(z, None, p, test))
}
