//! Null distributions of rank statistics.
//!
//! Each `di_*` function returns the lower-tail probability P(T ≤ t) of a
//! rank statistic under the null hypothesis. Small samples are enumerated
//! exactly; larger ones use a normal (or Edgeworth) approximation. The
//! switch point is fixed by the constants below and can be overridden per
//! call with [`PValueMethod`].
//!
//! # Exact versus asymptotic
//!
//! | Statistic | `Auto` is exact when |
//! |---|---|
//! | Kendall S | n ≤ [`EXACT_MAX_N`] |
//! | Wilcoxon signed-rank W | n ≤ [`EXACT_MAX_N`] |
//! | Mann-Whitney U | n1 + n2 ≤ [`EXACT_MAX_N`] |
//! | Spearman D | n ≤ [`SPEARMAN_EXACT_MAX_N`] |
//!
//! An explicit `Exact` is refused with `InvalidOption` above
//! [`SPEARMAN_EXACT_HARD_MAX_N`] for Spearman and above
//! [`MANN_WHITNEY_EXACT_HARD_MAX_N`] pooled observations for Mann-Whitney.

use super::continuous::special::norm_cdf;
use super::discrete::Multinomial;
use super::error::{StatsError, StatsResult};

/// Largest sample size for which `PValueMethod::Auto` enumerates the exact
/// null distribution of Kendall's S, the signed-rank W, the Mann-Whitney U
/// (on n1 + n2) and the binomial, sign and trinomial tests.
pub const EXACT_MAX_N: usize = 50;

/// Largest n for which `Auto` enumerates all n! rank permutations for
/// Spearman's D.
pub const SPEARMAN_EXACT_MAX_N: usize = 9;

/// Largest n accepted by an explicit exact Spearman request.
pub const SPEARMAN_EXACT_HARD_MAX_N: usize = 10;

/// Largest pooled size n1 + n2 accepted by an explicit exact Mann-Whitney
/// request. The recursion holds (n2 + 1)·(n1·n2 + 1) probabilities.
pub const MANN_WHITNEY_EXACT_HARD_MAX_N: usize = 200;

/// Largest number of count vectors enumerated by the exact multinomial
/// goodness-of-fit test before it falls back to Pearson's chi-square.
pub const MULTINOMIAL_MAX_OUTCOMES: usize = 2_000_000;

/// How a p-value is obtained from a rank statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PValueMethod {
    /// Exact below the size threshold, asymptotic above it.
    #[default]
    Auto,
    Exact,
    Asymptotic,
}

impl PValueMethod {
    /// Decide whether to enumerate, logging the outcome.
    pub(crate) fn use_exact(self, size: usize, limit: usize, context: &str) -> bool {
        let exact = match self {
            PValueMethod::Auto => size <= limit,
            PValueMethod::Exact => true,
            PValueMethod::Asymptotic => false,
        };
        log::debug!(
            "{}: size {} ({:?}) -> {}",
            context,
            size,
            self,
            if exact { "exact" } else { "asymptotic" }
        );
        exact
    }
}

fn require_n(n: usize, context: &str) -> StatsResult<()> {
    if n == 0 {
        return Err(StatsError::domain(context, 0.0, "sample size must be positive"));
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// Kendall
// ----------------------------------------------------------------------------

/// Probability of each inversion count 0..=n(n-1)/2 over the n! orderings.
pub(crate) fn kendall_inversion_pmf(n: usize) -> Vec<f64> {
    let max = n * n.saturating_sub(1) / 2;
    let mut pmf = vec![0.0; max + 1];
    pmf[0] = 1.0;
    let mut width = 0;
    for i in 2..=n {
        // new[k] = (1/i) Σ_{j<i} old[k - j]
        let new_width = width + i - 1;
        let mut next = vec![0.0; max + 1];
        let mut window = 0.0;
        for k in 0..=new_width {
            window += pmf[k];
            if k >= i {
                window -= pmf[k - i];
            }
            next[k] = window / i as f64;
        }
        pmf = next;
        width = new_width;
    }
    pmf
}

/// P(S ≤ s) for Kendall's S = concordant − discordant pairs on n untied
/// observations.
///
/// The exact distribution follows from the Mahonian numbers, since
/// S = n(n-1)/2 − 2·inversions. The approximation is normal with variance
/// n(n-1)(2n+5)/18 and a continuity correction of 1.
pub fn di_kendall_tau(n: usize, s: i64, method: PValueMethod) -> StatsResult<f64> {
    require_n(n, "n")?;
    let m = (n * (n - 1) / 2) as i64;
    if s.abs() > m {
        return Err(StatsError::domain(
            "s",
            s as f64,
            "statistic outside [-n(n-1)/2, n(n-1)/2]",
        ));
    }
    if method.use_exact(n, EXACT_MAX_N, "di_kendall_tau") {
        let pmf = kendall_inversion_pmf(n);
        // S ≤ s  <=>  inversions ≥ (m - s) / 2
        let min_inv = ((m - s) as f64 / 2.0).ceil() as usize;
        Ok(pmf[min_inv..].iter().sum::<f64>().min(1.0))
    } else {
        let nf = n as f64;
        let var = nf * (nf - 1.0) * (2.0 * nf + 5.0) / 18.0;
        if var == 0.0 {
            return Ok(1.0);
        }
        Ok(norm_cdf((s as f64 + 1.0) / var.sqrt()))
    }
}

// ----------------------------------------------------------------------------
// Spearman
// ----------------------------------------------------------------------------

/// Probability of D/2 over all n! rank permutations.
pub(crate) fn spearman_exact_pmf(n: usize) -> Vec<f64> {
    let max_half = n * (n * n - 1) / 6;
    let mut counts = vec![0u64; max_half + 1];
    let mut perm: Vec<usize> = (0..n).collect();
    let d_of = |p: &[usize]| -> usize {
        p.iter()
            .enumerate()
            .map(|(i, &v)| (i as i64 - v as i64).pow(2) as usize)
            .sum()
    };

    // Heap's algorithm, iterative form
    let mut c = vec![0usize; n];
    let mut total = 1u64;
    counts[d_of(&perm) / 2] += 1;
    let mut i = 1;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                perm.swap(0, i);
            } else {
                perm.swap(c[i], i);
            }
            counts[d_of(&perm) / 2] += 1;
            total += 1;
            c[i] += 1;
            i = 1;
        } else {
            c[i] = 0;
            i += 1;
        }
    }
    counts
        .into_iter()
        .map(|cnt| cnt as f64 / total as f64)
        .collect()
}

/// Upper tail P(D ≥ js) by the Edgeworth series expansion of
/// Best & Roberts (1975), algorithm AS 89.
pub(crate) fn spearman_upper_edgeworth(n: usize, js: u64) -> f64 {
    const C: [f64; 12] = [
        0.2274, 0.2531, 0.1745, 0.0758, 0.1033, 0.3932, 0.0879, 0.0151, 0.0072, 0.0831,
        0.0131, 4.6e-4,
    ];
    let js = if js % 2 == 1 { js + 1 } else { js } as f64;
    let b = 1.0 / n as f64;
    let x = (6.0 * (js - 1.0) * b / (1.0 / (b * b) - 1.0) - 1.0) * (1.0 / b - 1.0).sqrt();
    let y = x * x;
    let u = x
        * b
        * (C[0]
            + b * (C[1] + C[2] * b)
            + y * (-C[3] + b * (C[4] + C[5] * b)
                - y * b
                    * (C[6] + C[7] * b
                        - y * (C[8] - C[9] * b + y * b * (C[10] - C[11] * y)))));
    let p = u / (y / 2.0).exp() + (1.0 - norm_cdf(x));
    p.clamp(0.0, 1.0)
}

/// Resolve the exact/asymptotic choice for Spearman's D.
pub(crate) fn spearman_use_exact(n: usize, method: PValueMethod) -> StatsResult<bool> {
    if method == PValueMethod::Exact && n > SPEARMAN_EXACT_HARD_MAX_N {
        return Err(StatsError::invalid_option(
            "Exact",
            &format!(
                "exact Spearman enumeration is limited to n <= {}",
                SPEARMAN_EXACT_HARD_MAX_N
            ),
        ));
    }
    Ok(method.use_exact(n, SPEARMAN_EXACT_MAX_N, "di_spearman_rho"))
}

/// P(D ≤ d) for D = Σ (rank differences)² on n untied pairs.
///
/// Exact enumeration of all n! permutations up to
/// [`SPEARMAN_EXACT_MAX_N`] (an explicit `Exact` is honoured up to
/// [`SPEARMAN_EXACT_HARD_MAX_N`]); the AS 89 Edgeworth series otherwise.
pub fn di_spearman_rho(n: usize, d: u64, method: PValueMethod) -> StatsResult<f64> {
    require_n(n, "n")?;
    let nn = n as u128;
    let max = u64::try_from(nn * (nn * nn - 1) / 3).unwrap_or(u64::MAX);
    if d > max {
        return Err(StatsError::domain("d", d as f64, "statistic above n(n²-1)/3"));
    }
    if spearman_use_exact(n, method)? {
        let pmf = spearman_exact_pmf(n);
        let upto = (d / 2) as usize;
        Ok(pmf[..=upto].iter().sum::<f64>().min(1.0))
    } else {
        Ok(1.0 - spearman_upper_edgeworth(n, d + 1))
    }
}

// ----------------------------------------------------------------------------
// Wilcoxon signed rank
// ----------------------------------------------------------------------------

/// Probability of each signed-rank sum 0..=n(n+1)/2.
pub(crate) fn signed_rank_pmf(n: usize) -> Vec<f64> {
    let max = n * (n + 1) / 2;
    let mut pmf = vec![0.0; max + 1];
    pmf[0] = 1.0;
    let mut top = 0;
    for i in 1..=n {
        top += i;
        for w in (0..=top).rev() {
            let with = if w >= i { pmf[w - i] } else { 0.0 };
            pmf[w] = (pmf[w] + with) / 2.0;
        }
    }
    pmf
}

/// P(W ≤ w) for the Wilcoxon signed-rank sum on n non-zero, untied
/// differences.
///
/// The approximation uses μ = n(n+1)/4, σ² = n(n+1)(2n+1)/24 and a
/// continuity correction of one half.
pub fn di_wilcoxon_signed_rank(n: usize, w: f64, method: PValueMethod) -> StatsResult<f64> {
    require_n(n, "n")?;
    let max = (n * (n + 1) / 2) as f64;
    if w.is_nan() || w < 0.0 || w > max {
        return Err(StatsError::domain("w", w, "statistic outside [0, n(n+1)/2]"));
    }
    if method.use_exact(n, EXACT_MAX_N, "di_wilcoxon_signed_rank") {
        let pmf = signed_rank_pmf(n);
        let upto = w.floor() as usize;
        Ok(pmf[..=upto].iter().sum::<f64>().min(1.0))
    } else {
        let nf = n as f64;
        let mu = nf * (nf + 1.0) / 4.0;
        let sigma = (nf * (nf + 1.0) * (2.0 * nf + 1.0) / 24.0).sqrt();
        Ok(norm_cdf((w + 0.5 - mu) / sigma))
    }
}

// ----------------------------------------------------------------------------
// Mann-Whitney
// ----------------------------------------------------------------------------

/// Probability of each U value 0..=n1·n2.
pub(crate) fn mann_whitney_pmf(n1: usize, n2: usize) -> Vec<f64> {
    let max = n1 * n2;
    // prev[j] holds the pmf for (i - 1, j); cur[j] for (i, j)
    let base = |len: usize| {
        let mut v = vec![0.0; len];
        v[0] = 1.0;
        v
    };
    let mut prev: Vec<Vec<f64>> = (0..=n2).map(|_| base(max + 1)).collect();
    for i in 1..=n1 {
        let mut cur: Vec<Vec<f64>> = Vec::with_capacity(n2 + 1);
        cur.push(base(max + 1));
        for j in 1..=n2 {
            // the largest observation is from the first sample with
            // probability i/(i+j) and then beats all j of the second
            let a = i as f64 / (i + j) as f64;
            let b = j as f64 / (i + j) as f64;
            let mut v = vec![0.0; max + 1];
            for u in 0..=i * j {
                let from_first = if u >= j { prev[j][u - j] } else { 0.0 };
                v[u] = a * from_first + b * cur[j - 1][u];
            }
            cur.push(v);
        }
        prev = cur;
    }
    prev.swap_remove(n2)
}

/// Resolve the exact/asymptotic choice for the Mann-Whitney U.
pub(crate) fn mann_whitney_use_exact(
    n1: usize,
    n2: usize,
    method: PValueMethod,
    context: &str,
) -> StatsResult<bool> {
    if method == PValueMethod::Exact && n1 + n2 > MANN_WHITNEY_EXACT_HARD_MAX_N {
        return Err(StatsError::invalid_option(
            "Exact",
            &format!(
                "exact Mann-Whitney enumeration is limited to n1 + n2 <= {}",
                MANN_WHITNEY_EXACT_HARD_MAX_N
            ),
        ));
    }
    Ok(method.use_exact(n1 + n2, EXACT_MAX_N, context))
}

/// P(U ≤ u) for the Mann-Whitney U of two untied samples.
///
/// Exact by the rank-sum recursion when n1 + n2 ≤ [`EXACT_MAX_N`] (an
/// explicit `Exact` is honoured up to [`MANN_WHITNEY_EXACT_HARD_MAX_N`]);
/// normal otherwise with μ = n1n2/2, σ² = n1n2(n1+n2+1)/12 and a
/// continuity correction of one half.
pub fn di_mann_whitney(n1: usize, n2: usize, u: f64, method: PValueMethod) -> StatsResult<f64> {
    require_n(n1, "n1")?;
    require_n(n2, "n2")?;
    let max = n1 as f64 * n2 as f64;
    if u.is_nan() || u < 0.0 || u > max {
        return Err(StatsError::domain("u", u, "statistic outside [0, n1*n2]"));
    }
    if mann_whitney_use_exact(n1, n2, method, "di_mann_whitney")? {
        let pmf = mann_whitney_pmf(n1, n2);
        let upto = u.floor() as usize;
        Ok(pmf[..=upto].iter().sum::<f64>().min(1.0))
    } else {
        let (a, b) = (n1 as f64, n2 as f64);
        let mu = a * b / 2.0;
        let sigma = (a * b * (a + b + 1.0) / 12.0).sqrt();
        Ok(norm_cdf((u + 0.5 - mu) / sigma))
    }
}

// ----------------------------------------------------------------------------
// Multinomial
// ----------------------------------------------------------------------------

/// Point probability of the count vector `counts` under category
/// probabilities `probs`.
pub fn di_multinomial(counts: &[u64], probs: &[f64]) -> StatsResult<f64> {
    if counts.is_empty() {
        return Err(StatsError::empty("di_multinomial"));
    }
    if counts.len() != probs.len() {
        return Err(StatsError::SizeMismatch {
            expected: counts.len(),
            got: probs.len(),
            context: "di_multinomial".to_string(),
        });
    }
    let n = counts.iter().sum();
    Ok(Multinomial::new(n, probs.to_vec())?.pmf(counts))
}
