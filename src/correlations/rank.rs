//! Rank correlations: Spearman, Kendall and rank-biserial.

use crate::stats::helpers::{clean_pairs, clean_sample, midrange, rank_average};
use crate::stats::rank::{spearman_upper_edgeworth, spearman_use_exact};
use crate::stats::special::norm_cdf;
use crate::stats::{
    di_kendall_tau, di_spearman_rho, EXACT_MAX_N, PValueMethod, StatsError, StatsResult,
};

use super::linear::{pearson_r, t_test_of_r, z_test_of_r};
use super::CorrelationResult;

/// Significance test for [`r_spearman_rho`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpearmanTest {
    /// Exact when n ≤ `SPEARMAN_EXACT_MAX_N` and no ties, Student t
    /// otherwise
    #[default]
    Auto,
    /// Permutation distribution of D (untied data only)
    Exact,
    StudentT,
    /// z = r·√(n−1)
    Olds,
    /// z = atanh(r)·√(n−3)
    FisherZ,
    /// z = atanh(r)·√((n−3)/1.06)
    Fieller,
    /// AS 89 Edgeworth series on D
    Edgeworth,
}

/// Spearman's rank correlation with a two-sided significance test.
///
/// Ties receive average ranks and rho is the Pearson correlation of the
/// ranks. The `test` field of the result names the variant that ran.
///
/// # Errors
///
/// - `InvalidOption` for `Exact` with tied ranks or with n above
///   `SPEARMAN_EXACT_HARD_MAX_N`
/// - `InsufficientData` for fewer than 3 pairs (4 for the z variants)
/// - `Domain` when either variable is constant
pub fn r_spearman_rho(x: &[f64], y: &[f64], test: SpearmanTest) -> StatsResult<CorrelationResult> {
    let (x, y) = clean_pairs(x, y, "r_spearman_rho")?;
    let n = x.len();
    if n < 3 {
        return Err(StatsError::insufficient(3, n, "r_spearman_rho"));
    }
    let (rx, tx) = rank_average(&x);
    let (ry, ty) = rank_average(&y);
    let tied = !tx.is_empty() || !ty.is_empty();
    let rho = pearson_r(&rx, &ry, "r_spearman_rho")?;
    let d: f64 = rx.iter().zip(&ry).map(|(a, b)| (a - b).powi(2)).sum();

    let test = match test {
        SpearmanTest::Auto => {
            if !tied && spearman_use_exact(n, PValueMethod::Auto)? {
                SpearmanTest::Exact
            } else {
                SpearmanTest::StudentT
            }
        }
        SpearmanTest::Exact => {
            if tied {
                return Err(StatsError::invalid_option(
                    "Exact",
                    "exact Spearman test requires untied ranks",
                ));
            }
            spearman_use_exact(n, PValueMethod::Exact)?;
            SpearmanTest::Exact
        }
        other => other,
    };
    let nf = n as f64;
    if matches!(test, SpearmanTest::FisherZ | SpearmanTest::Fieller) && n < 4 {
        return Err(StatsError::insufficient(4, n, "r_spearman_rho"));
    }

    match test {
        SpearmanTest::Exact => {
            let d = d.round() as u64;
            let lower = di_spearman_rho(n, d, PValueMethod::Exact)?;
            let upper = if d == 0 {
                1.0
            } else {
                1.0 - di_spearman_rho(n, d - 1, PValueMethod::Exact)?
            };
            let p = (2.0 * lower.min(upper)).min(1.0);
            Ok(CorrelationResult::new(rho, d as f64, None, p, "Spearman exact"))
        }
        SpearmanTest::Edgeworth => {
            let d = d.round() as u64;
            let lower = 1.0 - spearman_upper_edgeworth(n, d + 1);
            let upper = spearman_upper_edgeworth(n, d);
            let p = (2.0 * lower.min(upper)).min(1.0);
            Ok(CorrelationResult::new(rho, d as f64, None, p, "Spearman Edgeworth"))
        }
        SpearmanTest::Olds => Ok(z_test_of_r(rho, rho * (nf - 1.0).sqrt(), "Spearman Olds")),
        SpearmanTest::FisherZ => Ok(z_test_of_r(
            rho,
            rho.atanh() * (nf - 3.0).sqrt(),
            "Spearman Fisher z",
        )),
        SpearmanTest::Fieller => Ok(z_test_of_r(
            rho,
            rho.atanh() * ((nf - 3.0) / 1.06).sqrt(),
            "Spearman Fieller",
        )),
        SpearmanTest::StudentT | SpearmanTest::Auto => t_test_of_r(rho, n, "Spearman t-test"),
    }
}

/// Tie handling of Kendall's tau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KendallVariant {
    /// S / (n(n−1)/2)
    TauA,
    /// S / √((n₀ − n₁)(n₀ − n₂)), corrected for ties in both variables
    #[default]
    TauB,
}

/// Σ over tie groups of t(t−1), t(t−1)(2t+5) and t(t−1)(t−2).
fn tie_terms(ties: &[usize]) -> (f64, f64, f64) {
    ties.iter().fold((0.0, 0.0, 0.0), |(a, b, c), &t| {
        let t = t as f64;
        (
            a + t * (t - 1.0),
            b + t * (t - 1.0) * (2.0 * t + 5.0),
            c + t * (t - 1.0) * (t - 2.0),
        )
    })
}

/// Kendall's tau with a two-sided test of S.
///
/// The exact null distribution is used for untied data when `method`
/// allows it; otherwise S is tested against a normal distribution with
/// the tie-corrected variance and a continuity correction of 1.
///
/// # Errors
///
/// `InvalidOption` for `PValueMethod::Exact` with ties.
pub fn r_kendall_tau(
    x: &[f64],
    y: &[f64],
    variant: KendallVariant,
    method: PValueMethod,
) -> StatsResult<CorrelationResult> {
    let (x, y) = clean_pairs(x, y, "r_kendall_tau")?;
    let n = x.len();
    if n < 2 {
        return Err(StatsError::insufficient(2, n, "r_kendall_tau"));
    }
    let mut s: i64 = 0;
    for i in 0..n {
        for j in i + 1..n {
            let prod = (x[i] - x[j]) * (y[i] - y[j]);
            s += if prod > 0.0 {
                1
            } else if prod < 0.0 {
                -1
            } else {
                0
            };
        }
    }
    let (_, tx) = rank_average(&x);
    let (_, ty) = rank_average(&y);
    let nf = n as f64;
    let n0 = nf * (nf - 1.0) / 2.0;
    let (tx1, tx2, tx3) = tie_terms(&tx);
    let (ty1, ty2, ty3) = tie_terms(&ty);
    let (n1, n2) = (tx1 / 2.0, ty1 / 2.0);
    if n1 == n0 || n2 == n0 {
        return Err(StatsError::domain("r_kendall_tau", 0.0, "a variable is constant"));
    }
    let tau = match variant {
        KendallVariant::TauA => s as f64 / n0,
        KendallVariant::TauB => s as f64 / ((n0 - n1) * (n0 - n2)).sqrt(),
    };
    let tied = !tx.is_empty() || !ty.is_empty();
    if tied && method == PValueMethod::Exact {
        return Err(StatsError::invalid_option(
            "Exact",
            "exact Kendall test requires untied data",
        ));
    }

    let label = match variant {
        KendallVariant::TauA => "Kendall tau-a",
        KendallVariant::TauB => "Kendall tau-b",
    };
    if !tied && method.use_exact(n, EXACT_MAX_N, "r_kendall_tau") {
        let p = 2.0 * di_kendall_tau(n, -s.abs(), PValueMethod::Exact)?;
        return Ok(CorrelationResult::new(
            tau,
            s as f64,
            None,
            p.min(1.0),
            format!("{} exact", label),
        ));
    }
    let var = (nf * (nf - 1.0) * (2.0 * nf + 5.0) - tx2 - ty2) / 18.0
        + tx1 * ty1 / (2.0 * nf * (nf - 1.0))
        + if n > 2 {
            tx3 * ty3 / (9.0 * nf * (nf - 1.0) * (nf - 2.0))
        } else {
            0.0
        };
    let z = ((s.abs() as f64 - 1.0).max(0.0) / var.sqrt()).copysign(s as f64);
    let p = (2.0 * norm_cdf(-z.abs())).min(1.0);
    Ok(CorrelationResult::new(tau, z, None, p, format!("{} normal", label)))
}

/// One-sample rank-biserial correlation against `mu`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankBiserialOs {
    pub mu: f64,
    /// (R⁺ − R⁻)/(R⁺ + R⁻)
    pub rb: f64,
}

/// One-sample rank-biserial correlation from the signed ranks of the
/// deviations from `mu` (default: the midrange). Zero deviations are
/// dropped.
pub fn r_rank_biserial_os(data: &[f64], mu: Option<f64>) -> StatsResult<RankBiserialOs> {
    let x = clean_sample(data, "r_rank_biserial_os")?;
    let mu = mu.unwrap_or_else(|| midrange(&x));
    let diffs: Vec<f64> = x.iter().map(|v| v - mu).filter(|d| *d != 0.0).collect();
    if diffs.is_empty() {
        return Err(StatsError::domain(
            "mu",
            mu,
            "every value equals the hypothesized value",
        ));
    }
    let abs: Vec<f64> = diffs.iter().map(|d| d.abs()).collect();
    let (ranks, _) = rank_average(&abs);
    let (mut r_plus, mut r_min) = (0.0, 0.0);
    for (d, r) in diffs.iter().zip(&ranks) {
        if *d > 0.0 {
            r_plus += r;
        } else {
            r_min += r;
        }
    }
    Ok(RankBiserialOs {
        mu,
        rb: (r_plus - r_min) / (r_plus + r_min),
    })
}

/// Rank-biserial correlation of two independent samples: 1 − 2U₁/(n₁n₂),
/// with U₁ the Mann-Whitney U of `x`.
pub fn r_rank_biserial_is(x: &[f64], y: &[f64]) -> StatsResult<f64> {
    let x = clean_sample(x, "r_rank_biserial_is")?;
    let y = clean_sample(y, "r_rank_biserial_is")?;
    let (n1, n2) = (x.len() as f64, y.len() as f64);
    let pooled: Vec<f64> = x.iter().chain(&y).copied().collect();
    let (ranks, _) = rank_average(&pooled);
    let r1: f64 = ranks[..x.len()].iter().sum();
    let u1 = r1 - n1 * (n1 + 1.0) / 2.0;
    Ok(1.0 - 2.0 * u1 / (n1 * n2))
}
