//! One-sample tests of location for ordinal or scale data.
//!
//! Wherever the hypothesized value `mu` is optional, it defaults to the
//! midrange of the sample.

use crate::measures::{TrimFrac, trimmed_mean};
use crate::stats::helpers::{
    clean_sample, clean_sample_min, mean, midrange, rank_average, sample_variance, sorted, tie_sum,
};
use crate::stats::{
    di_wilcoxon_signed_rank, Binomial, DiscreteDistribution, Multinomial, Normal, PValueMethod,
    StatsError, StatsResult, StudentT, TestResult, EXACT_MAX_N,
};

/// Location test result that also reports the hypothesized value used.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationResult {
    pub mu: f64,
    pub statistic: f64,
    pub df: Option<f64>,
    pub p_value: f64,
    pub test: String,
}

impl LocationResult {
    fn new(mu: f64, result: TestResult) -> Self {
        Self {
            mu,
            statistic: result.statistic,
            df: result.df,
            p_value: result.p_value,
            test: result.test,
        }
    }
}

/// One-sample sign test.
///
/// Values equal to `mu` are ignored. The statistic is the smaller of the
/// counts below and above `mu`. Exact binomial when the remaining count is
/// at most [`EXACT_MAX_N`] (or `Exact`); otherwise normal with a continuity
/// correction of one half.
pub fn ts_sign_os(data: &[f64], mu: Option<f64>, method: PValueMethod) -> StatsResult<LocationResult> {
    let x = clean_sample(data, "ts_sign_os")?;
    let mu = mu.unwrap_or_else(|| midrange(&x));
    let below = x.iter().filter(|&&v| v < mu).count() as u64;
    let above = x.iter().filter(|&&v| v > mu).count() as u64;
    let n = below + above;
    if n == 0 {
        return Err(StatsError::domain(
            "mu",
            mu,
            "every value equals the hypothesized value",
        ));
    }
    let k = below.min(above);
    let result = if method.use_exact(n as usize, EXACT_MAX_N, "ts_sign_os") {
        let p = 2.0 * Binomial::new(n, 0.5)?.cdf(k);
        TestResult::new(k as f64, None, p, "one-sample sign, exact")
    } else {
        let nf = n as f64;
        let z = ((k as f64 - nf / 2.0).abs() - 0.5).max(0.0) / (nf.sqrt() / 2.0);
        let p = Normal::standard().two_sided(z);
        TestResult::new(z, None, p, "one-sample sign, normal approximation")
    };
    Ok(LocationResult::new(mu, result))
}

/// Distribution used by the Wilcoxon signed-rank test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WilcoxonApprox {
    /// Exact without ties and at most [`EXACT_MAX_N`] non-zero differences,
    /// normal otherwise
    #[default]
    Auto,
    Exact,
    Normal,
    /// Iman (1974) t approximation
    ImanT,
    /// Iman (1974) z approximation
    ImanZ,
}

/// Treatment of values equal to the hypothesized median.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroMethod {
    /// Drop them.
    #[default]
    Wilcoxon,
    /// Rank them, then drop their ranks (Cureton-adjusted moments).
    Pratt,
    /// Rank them and split their ranks evenly over both signs.
    ZSplit,
}

/// Options of the Wilcoxon signed-rank tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilcoxonOptions {
    /// Hypothesized median; midrange (one-sample) or 0 (paired) when `None`
    pub mu: Option<f64>,
    /// Apply the tie correction to the variance
    pub ties: bool,
    pub approx: WilcoxonApprox,
    pub zeros: ZeroMethod,
    /// Continuity correction of one half
    pub cc: bool,
}

impl Default for WilcoxonOptions {
    fn default() -> Self {
        Self {
            mu: None,
            ties: true,
            approx: WilcoxonApprox::Auto,
            zeros: ZeroMethod::Wilcoxon,
            cc: false,
        }
    }
}

/// Result of a Wilcoxon signed-rank test.
#[derive(Debug, Clone, PartialEq)]
pub struct WilcoxonResult {
    pub mu: f64,
    /// Sum of the positive ranks
    pub w: f64,
    pub statistic: f64,
    pub df: Option<f64>,
    pub p_value: f64,
    pub test: String,
}

/// One-sample Wilcoxon signed-rank test.
///
/// # Errors
///
/// - `InvalidOption` for `Exact` with tied absolute differences
/// - `Domain` when every value equals `mu`
pub fn ts_wilcoxon_os(data: &[f64], opts: WilcoxonOptions) -> StatsResult<WilcoxonResult> {
    let x = clean_sample(data, "ts_wilcoxon_os")?;
    let mu = opts.mu.unwrap_or_else(|| midrange(&x));
    signed_rank_test(&x, mu, opts, "one-sample Wilcoxon signed rank")
}

/// Signed-rank test of cleaned data against `mu`.
pub(crate) fn signed_rank_test(
    x: &[f64],
    mu: f64,
    opts: WilcoxonOptions,
    name: &str,
) -> StatsResult<WilcoxonResult> {
    let nonzero: Vec<f64> = x.iter().map(|v| v - mu).filter(|d| *d != 0.0).collect();
    if nonzero.is_empty() {
        return Err(StatsError::domain(
            "mu",
            mu,
            "every value equals the hypothesized value",
        ));
    }
    let (nz_ranks, nz_ties) = rank_average(&nonzero.iter().map(|d| d.abs()).collect::<Vec<_>>());

    let exact = match opts.approx {
        WilcoxonApprox::Exact => {
            if !nz_ties.is_empty() {
                return Err(StatsError::invalid_option(
                    "Exact",
                    "exact signed-rank test requires untied ranks",
                ));
            }
            true
        }
        WilcoxonApprox::Auto => {
            nz_ties.is_empty()
                && PValueMethod::Auto.use_exact(nonzero.len(), EXACT_MAX_N, "ts_wilcoxon")
        }
        _ => false,
    };

    if exact {
        let nr = nonzero.len();
        let w: f64 = nonzero
            .iter()
            .zip(&nz_ranks)
            .filter(|(d, _)| **d > 0.0)
            .map(|(_, r)| r)
            .sum();
        let total = (nr * (nr + 1) / 2) as f64;
        let stat = w.min(total - w);
        let p = 2.0 * di_wilcoxon_signed_rank(nr, stat, PValueMethod::Exact)?;
        return Ok(WilcoxonResult {
            mu,
            w,
            statistic: stat,
            df: None,
            p_value: p.min(1.0),
            test: format!("{} exact test", name),
        });
    }

    // normal family: zeros stay in the ranking for Pratt and z-split
    let diffs: Vec<f64> = match opts.zeros {
        ZeroMethod::Wilcoxon => nonzero,
        ZeroMethod::Pratt | ZeroMethod::ZSplit => x.iter().map(|v| v - mu).collect(),
    };
    let abs: Vec<f64> = diffs.iter().map(|d| d.abs()).collect();
    let (ranks, _) = rank_average(&abs);
    let nr = diffs.len() as f64;
    let n_zero = diffs.iter().filter(|d| **d == 0.0).count() as f64;

    let mut w: f64 = diffs
        .iter()
        .zip(&ranks)
        .filter(|(d, _)| **d > 0.0)
        .map(|(_, r)| r)
        .sum();
    if opts.zeros == ZeroMethod::ZSplit {
        w += diffs
            .iter()
            .zip(&ranks)
            .filter(|(d, _)| **d == 0.0)
            .map(|(_, r)| r)
            .sum::<f64>()
            / 2.0;
    }
    let mut mean_w = nr * (nr + 1.0) / 4.0;
    let mut var_w = nr * (nr + 1.0) * (2.0 * nr + 1.0) / 24.0;
    if opts.zeros == ZeroMethod::Pratt {
        var_w -= n_zero * (n_zero + 1.0) * (2.0 * n_zero + 1.0) / 24.0;
        mean_w = (nr * (nr + 1.0) - n_zero * (n_zero + 1.0)) / 4.0;
    }
    if opts.ties {
        let tie_ranks: Vec<f64> = if opts.zeros == ZeroMethod::Pratt {
            ranks
                .iter()
                .zip(&abs)
                .filter(|(_, a)| **a != 0.0)
                .map(|(r, _)| *r)
                .collect()
        } else {
            ranks.clone()
        };
        let (_, groups) = rank_average(&tie_ranks);
        var_w -= tie_sum(&groups) / 48.0;
    }
    let mut num = (w - mean_w).abs();
    if opts.cc {
        num = (num - 0.5).max(0.0);
    }

    let mut label = format!("{} test", name);
    match (opts.ties, opts.cc) {
        (true, true) => label.push_str(", with ties and continuity correction"),
        (true, false) => label.push_str(", with ties correction"),
        (false, true) => label.push_str(", with continuity correction"),
        (false, false) => {}
    }
    let (statistic, df, p) = match opts.approx {
        WilcoxonApprox::ImanT => {
            if nr < 2.0 {
                return Err(StatsError::insufficient(2, diffs.len(), "Iman t approximation"));
            }
            let t = num / ((var_w * nr - (w - mean_w).powi(2)) / (nr - 1.0)).sqrt();
            label.push_str(", using Iman t approximation");
            (t, Some(nr - 1.0), StudentT::new(nr - 1.0)?.two_sided(t))
        }
        WilcoxonApprox::ImanZ => {
            let z = num / var_w.sqrt();
            let z = z / 2.0 * (1.0 + ((nr - 1.0) / (nr - z * z)).sqrt());
            label.push_str(", using Iman z approximation");
            (z, None, Normal::standard().two_sided(z))
        }
        _ => {
            let z = num / var_w.sqrt();
            (z, None, Normal::standard().two_sided(z))
        }
    };
    match opts.zeros {
        ZeroMethod::Pratt => label.push_str(", Pratt method for zeros"),
        ZeroMethod::ZSplit => label.push_str(", z-split method for zeros"),
        ZeroMethod::Wilcoxon => {}
    }
    if !statistic.is_finite() {
        return Err(StatsError::domain(
            "statistic",
            statistic,
            "approximation is undefined for this sample",
        ));
    }
    Ok(WilcoxonResult {
        mu,
        w,
        statistic,
        df,
        p_value: p.clamp(0.0, 1.0),
        test: label,
    })
}

/// Counts of a trinomial test.
#[derive(Debug, Clone, PartialEq)]
pub struct TrinomialResult {
    pub mu: f64,
    pub n_pos: u64,
    pub n_neg: u64,
    pub n_tied: u64,
    pub p_value: f64,
}

/// One-sample trinomial test (Bian, McAleer & Wong, 2011).
///
/// Ties with `mu` are kept: their proportion estimates the probability of
/// a tie, and the p-value is the exact probability of a sign-count
/// difference at least as large as observed.
pub fn ts_trinomial_os(data: &[f64], mu: Option<f64>) -> StatsResult<TrinomialResult> {
    let x = clean_sample(data, "ts_trinomial_os")?;
    let mu = mu.unwrap_or_else(|| midrange(&x));
    let n_pos = x.iter().filter(|&&v| v > mu).count() as u64;
    let n_neg = x.iter().filter(|&&v| v < mu).count() as u64;
    let n = x.len() as u64;
    let n_tied = n - n_pos - n_neg;
    let p_tie = n_tied as f64 / n as f64;
    let p_sign = (1.0 - p_tie) / 2.0;
    let dist = Multinomial::new(n, vec![p_sign, p_sign, p_tie])?;

    let nd = n_pos.abs_diff(n_neg);
    let mut sig = 0.0;
    for d in nd..=n {
        for k in 0..=(n - d) / 2 {
            sig += dist.pmf(&[k, k + d, n - 2 * k - d]);
        }
    }
    Ok(TrinomialResult {
        mu,
        n_pos,
        n_neg,
        n_tied,
        p_value: (2.0 * sig).min(1.0),
    })
}

/// One-sample Student t test.
pub fn ts_student_t_os(data: &[f64], mu: Option<f64>) -> StatsResult<LocationResult> {
    let x = clean_sample_min(data, 2, "ts_student_t_os")?;
    let mu = mu.unwrap_or_else(|| midrange(&x));
    let n = x.len() as f64;
    let se = (sample_variance(&x) / n).sqrt();
    if se == 0.0 {
        return Err(StatsError::domain("ts_student_t_os", 0.0, "sample has zero variance"));
    }
    let t = (mean(&x) - mu) / se;
    let p = StudentT::new(n - 1.0)?.two_sided(t);
    Ok(LocationResult::new(
        mu,
        TestResult::new(t, Some(n - 1.0), p, "one-sample Student t"),
    ))
}

/// One-sample z test, with a known `sigma` or the sample standard
/// deviation.
pub fn ts_z_os(data: &[f64], mu: Option<f64>, sigma: Option<f64>) -> StatsResult<LocationResult> {
    let x = match sigma {
        Some(_) => clean_sample(data, "ts_z_os")?,
        None => clean_sample_min(data, 2, "ts_z_os")?,
    };
    let mu = mu.unwrap_or_else(|| midrange(&x));
    let s = sigma.unwrap_or_else(|| sample_variance(&x).sqrt());
    if !(s > 0.0) {
        return Err(StatsError::domain("sigma", s, "must be positive"));
    }
    let z = (mean(&x) - mu) / (s / (x.len() as f64).sqrt());
    let p = Normal::standard().two_sided(z);
    Ok(LocationResult::new(mu, TestResult::new(z, None, p, "one-sample z")))
}

/// Standard error of the trimmed mean in [`ts_trimmed_mean_os`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimmedSe {
    /// √(SSD_w/(h(h−1))), with h the number of kept values
    #[default]
    Yuen,
    /// s_w/((1 − trim)·√n)
    Wilcox,
}

/// One-sample trimmed mean test.
///
/// `trim` is the total proportion removed (half per side, rounded down);
/// the standard error comes from the winsorized sample.
pub fn ts_trimmed_mean_os(
    data: &[f64],
    mu: Option<f64>,
    trim: f64,
    se: TrimmedSe,
) -> StatsResult<LocationResult> {
    let x = sorted(&clean_sample_min(data, 3, "ts_trimmed_mean_os")?);
    let mu = mu.unwrap_or_else(|| midrange(&x));
    let mt = trimmed_mean(&x, trim, TrimFrac::Down)?;
    let n = x.len();
    let nl = (n as f64 * trim / 2.0).floor() as usize;
    let kept = n - 2 * nl;
    if kept < 2 {
        return Err(StatsError::insufficient(2, kept, "ts_trimmed_mean_os"));
    }
    let (lo, hi) = (x[nl], x[nl + kept - 1]);
    let nlf = nl as f64;
    let mw = (mt * kept as f64 + nlf * (lo + hi)) / n as f64;
    let ssd_w = nlf * (lo - mw).powi(2)
        + nlf * (hi - mw).powi(2)
        + x[nl..nl + kept].iter().map(|v| (v - mw).powi(2)).sum::<f64>();
    let h = kept as f64;
    let se_value = match se {
        TrimmedSe::Yuen => (ssd_w / (h * (h - 1.0))).sqrt(),
        TrimmedSe::Wilcox => (ssd_w / (n as f64 - 1.0)).sqrt() / ((1.0 - trim) * (n as f64).sqrt()),
    };
    if se_value == 0.0 {
        return Err(StatsError::domain("se", 0.0, "winsorized sample has zero variance"));
    }
    let t = (mt - mu) / se_value;
    let p = StudentT::new(h - 1.0)?.two_sided(t);
    Ok(LocationResult::new(
        mu,
        TestResult::new(t, Some(h - 1.0), p, "one-sample trimmed mean"),
    ))
}
