//! Omnibus tests for k groups or k related treatments.
//!
//! Independent groups are passed as a map from group label to scores, so
//! results and post-hoc pairs come out in label order. Related samples
//! are passed as blocks: one row per case, one column per treatment.

use std::collections::BTreeMap;

use crate::stats::helpers::{
    clean_blocks, clean_groups, mean, median, rank_average, sample_variance, sum_sq_dev, tie_sum,
};
use crate::stats::{
    ChiSquared, ContinuousDistribution, FDistribution, StatsError, StatsResult, TestResult,
};

use super::gof::{GofCorrection, Lambda};
use super::ts_powerdivergence_ind;

/// Result of an F test with two degrees of freedom.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaResult {
    pub statistic: f64,
    pub df_between: f64,
    pub df_within: f64,
    pub p_value: f64,
    pub test: String,
}

fn f_result(statistic: f64, df1: f64, df2: f64, test: &str) -> StatsResult<AnovaResult> {
    let p = FDistribution::new(df1, df2)?.sf(statistic);
    Ok(AnovaResult {
        statistic,
        df_between: df1,
        df_within: df2,
        p_value: p.clamp(0.0, 1.0),
        test: test.to_string(),
    })
}

fn chi_square_test(statistic: f64, df: f64, test: &str) -> StatsResult<TestResult> {
    let p = ChiSquared::new(df)?.sf(statistic);
    Ok(TestResult::new(statistic, Some(df), p, test))
}

/// Classic one-way ANOVA (Fisher).
///
/// F = (SSB/(k−1)) / (SSW/(N−k)).
pub fn ts_fisher_owa<L: Ord + Clone>(groups: &BTreeMap<L, Vec<f64>>) -> StatsResult<AnovaResult> {
    let groups = clean_groups(groups, 1, "ts_fisher_owa")?;
    let k = groups.len() as f64;
    let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    let n = all.len() as f64;
    if n <= k {
        return Err(StatsError::insufficient(groups.len() + 1, all.len(), "ts_fisher_owa"));
    }
    let grand = mean(&all);
    let ssb: f64 = groups
        .iter()
        .map(|(_, v)| v.len() as f64 * (mean(v) - grand).powi(2))
        .sum();
    let ssw: f64 = groups.iter().map(|(_, v)| sum_sq_dev(v)).sum();
    if ssw == 0.0 {
        return Err(StatsError::domain("ts_fisher_owa", 0.0, "within-group variance is zero"));
    }
    let f = (ssb / (k - 1.0)) / (ssw / (n - k));
    f_result(f, k - 1.0, n - k, "Fisher one-way ANOVA")
}

/// Welch one-way ANOVA for unequal variances.
///
/// Every group needs at least two scores and a non-zero variance.
pub fn ts_welch_owa<L: Ord + Clone>(groups: &BTreeMap<L, Vec<f64>>) -> StatsResult<AnovaResult> {
    let groups = clean_groups(groups, 2, "ts_welch_owa")?;
    let k = groups.len() as f64;
    let mut w = Vec::with_capacity(groups.len());
    for (_, v) in &groups {
        let var = sample_variance(v);
        if var == 0.0 {
            return Err(StatsError::domain("ts_welch_owa", 0.0, "a group has zero variance"));
        }
        w.push(v.len() as f64 / var);
    }
    let w_sum: f64 = w.iter().sum();
    let means: Vec<f64> = groups.iter().map(|(_, v)| mean(v)).collect();
    let weighted: f64 = w.iter().zip(&means).map(|(wi, m)| wi * m).sum::<f64>() / w_sum;
    let a: f64 = w
        .iter()
        .zip(&means)
        .map(|(wi, m)| wi * (m - weighted).powi(2))
        .sum::<f64>()
        / (k - 1.0);
    let lambda: f64 = w
        .iter()
        .zip(&groups)
        .map(|(wi, (_, v))| (1.0 - wi / w_sum).powi(2) / (v.len() as f64 - 1.0))
        .sum();
    let f = a / (1.0 + 2.0 * (k - 2.0) * lambda / (k * k - 1.0));
    let df2 = (k * k - 1.0) / (3.0 * lambda);
    f_result(f, k - 1.0, df2, "Welch one-way ANOVA")
}

/// Kruskal-Wallis H test on pooled average ranks.
///
/// With `tie_correction`, H is divided by 1 − Σ(t³−t)/(N³−N).
pub fn ts_kruskal_wallis<L: Ord + Clone>(
    groups: &BTreeMap<L, Vec<f64>>,
    tie_correction: bool,
) -> StatsResult<TestResult> {
    let groups = clean_groups(groups, 1, "ts_kruskal_wallis")?;
    let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    let n = all.len() as f64;
    let (ranks, ties) = rank_average(&all);

    let mut offset = 0;
    let mut sum = 0.0;
    for (_, v) in &groups {
        let r: f64 = ranks[offset..offset + v.len()].iter().sum();
        sum += r * r / v.len() as f64;
        offset += v.len();
    }
    let mut h = 12.0 / (n * (n + 1.0)) * sum - 3.0 * (n + 1.0);
    let mut test = "Kruskal-Wallis H";
    if tie_correction {
        let c = 1.0 - tie_sum(&ties) / (n * n * n - n);
        if c == 0.0 {
            return Err(StatsError::domain("ts_kruskal_wallis", 0.0, "all values are tied"));
        }
        h /= c;
        test = "Kruskal-Wallis H, with ties correction";
    }
    chi_square_test(h, groups.len() as f64 - 1.0, test)
}

/// Friedman test for k related treatments.
///
/// Scores are ranked within each block (average ranks for ties) and the
/// tie-corrected statistic
/// Q = (12ΣRⱼ² − 3n²k(k+1)²) / (nk(k+1) − Σ(t³−t)/(k−1))
/// is compared with χ²(k−1). Blocks with a missing score are dropped.
pub fn ts_friedman(blocks: &[Vec<f64>]) -> StatsResult<TestResult> {
    let blocks = clean_blocks(blocks, "ts_friedman")?;
    let k = blocks[0].len();
    let (rank_sums, ties) = block_rank_sums(&blocks);
    let n = blocks.len() as f64;
    let kf = k as f64;
    let denom = n * kf * (kf + 1.0) - ties / (kf - 1.0);
    if denom == 0.0 {
        return Err(StatsError::domain("ts_friedman", 0.0, "every block is fully tied"));
    }
    let sum_sq: f64 = rank_sums.iter().map(|r| r * r).sum();
    let q = (12.0 * sum_sq - 3.0 * n * n * kf * (kf + 1.0).powi(2)) / denom;
    chi_square_test(q, kf - 1.0, "Friedman")
}

/// Rank sum per treatment and Σ(t³−t) over all blocks.
pub(crate) fn block_rank_sums(blocks: &[Vec<f64>]) -> (Vec<f64>, f64) {
    let k = blocks.first().map_or(0, Vec::len);
    let mut sums = vec![0.0; k];
    let mut ties = 0.0;
    for row in blocks {
        let (ranks, groups) = rank_average(row);
        for (s, r) in sums.iter_mut().zip(&ranks) {
            *s += r;
        }
        ties += tie_sum(&groups);
    }
    (sums, ties)
}

/// Validate a binary blocks layout.
pub(crate) fn check_binary_blocks(blocks: &[Vec<bool>], context: &str) -> StatsResult<usize> {
    let k = blocks.first().ok_or_else(|| StatsError::empty(context))?.len();
    if let Some(row) = blocks.iter().find(|r| r.len() != k) {
        return Err(StatsError::SizeMismatch {
            expected: k,
            got: row.len(),
            context: context.to_string(),
        });
    }
    if k < 2 {
        return Err(StatsError::insufficient(2, k, context));
    }
    Ok(k)
}

/// Cochran Q test for k related binary treatments.
///
/// Q = (k−1)(kΣCⱼ² − N²) / (kN − ΣRᵢ²), with Cⱼ the successes per
/// treatment, Rᵢ per block and N in total.
pub fn ts_cochran_q(blocks: &[Vec<bool>]) -> StatsResult<TestResult> {
    let k = check_binary_blocks(blocks, "ts_cochran_q")?;
    let kf = k as f64;
    let col: Vec<f64> = (0..k)
        .map(|j| blocks.iter().filter(|r| r[j]).count() as f64)
        .collect();
    let row_sq: f64 = blocks
        .iter()
        .map(|r| (r.iter().filter(|&&v| v).count() as f64).powi(2))
        .sum();
    let total: f64 = col.iter().sum();
    let denom = kf * total - row_sq;
    if denom == 0.0 {
        return Err(StatsError::domain(
            "ts_cochran_q",
            0.0,
            "no block has both outcomes",
        ));
    }
    let q = (kf - 1.0) * (kf * col.iter().map(|c| c * c).sum::<f64>() - total * total) / denom;
    chi_square_test(q, kf - 1.0, "Cochran Q")
}

/// Counts above and at-or-below `median` for each group, as a k×2 table.
pub(crate) fn median_table<'a, I>(groups: I, median: f64) -> Vec<Vec<u64>>
where
    I: IntoIterator<Item = &'a Vec<f64>>,
{
    groups
        .into_iter()
        .map(|v| {
            let above = v.iter().filter(|&&x| x > median).count() as u64;
            vec![above, v.len() as u64 - above]
        })
        .collect()
}

/// Mood's median test.
///
/// Scores are split at the grand median (above versus at or below) and the
/// resulting k×2 table gets a Pearson chi-square test of independence.
pub fn ts_mood_median<L: Ord + Clone>(groups: &BTreeMap<L, Vec<f64>>) -> StatsResult<TestResult> {
    let groups = clean_groups(groups, 1, "ts_mood_median")?;
    let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    let table = median_table(groups.iter().map(|(_, v)| v), median(&all));
    let res = ts_powerdivergence_ind(&table, Lambda::Pearson, GofCorrection::None)?;
    Ok(TestResult::new(res.statistic, res.df, res.p_value, "Mood median"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> BTreeMap<&'static str, Vec<f64>> {
        BTreeMap::from([
            ("a", vec![1.0, 2.0, 4.0, 7.0]),
            ("b", vec![8.0, 9.0, 12.0]),
            ("c", vec![15.0, 16.0, 20.0, 30.0]),
        ])
    }

    #[test]
    fn test_fisher_owa() {
        let r = ts_fisher_owa(&groups()).unwrap();
        assert!((r.statistic - 13.420404534340966).abs() < 1e-10);
        assert_eq!((r.df_between, r.df_within), (2.0, 8.0));
        assert!((r.p_value - 0.0027797582103124756).abs() < 1e-9);
    }

    #[test]
    fn test_welch_owa() {
        let r = ts_welch_owa(&groups()).unwrap();
        assert!((r.statistic - 11.58186706097857).abs() < 1e-10);
        assert!((r.df_within - 5.11087068169492).abs() < 1e-10);
        assert!((r.p_value - 0.012634639820280763).abs() < 1e-8);
    }

    #[test]
    fn test_kruskal_wallis() {
        let r = ts_kruskal_wallis(&groups(), true).unwrap();
        assert!((r.statistic - 8.909090909090914).abs() < 1e-10);
        assert!((r.p_value - 0.01162560303883847).abs() < 1e-9);

        let tied = BTreeMap::from([
            (1, vec![1.0, 2.0, 4.0, 7.0, 7.0]),
            (2, vec![7.0, 9.0, 12.0]),
            (3, vec![15.0, 16.0, 20.0, 20.0]),
        ]);
        let raw = ts_kruskal_wallis(&tied, false).unwrap();
        assert!((raw.statistic - 9.117948717948721).abs() < 1e-10);
        let corrected = ts_kruskal_wallis(&tied, true).unwrap();
        assert!((corrected.statistic - 9.280189798339268).abs() < 1e-10);
        assert!((corrected.p_value - 0.009656781163538866).abs() < 1e-9);
    }

    #[test]
    fn test_friedman() {
        let blocks = vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 1.0],
            vec![1.0, 3.0, 2.0],
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 3.0],
            vec![1.5, 4.0, 2.0],
        ];
        let r = ts_friedman(&blocks).unwrap();
        assert!((r.statistic - 6.869565217391305).abs() < 1e-10);
        assert!((r.p_value - 0.03223241651740544).abs() < 1e-9);
        assert_eq!(block_rank_sums(&blocks).0, vec![7.0, 15.5, 13.5]);
    }

    #[test]
    fn test_cochran_q() {
        let b = |v: [u8; 3]| v.iter().map(|&x| x == 1).collect::<Vec<bool>>();
        let blocks = vec![
            b([1, 1, 0]),
            b([1, 0, 0]),
            b([1, 1, 1]),
            b([0, 1, 0]),
            b([1, 1, 0]),
            b([1, 0, 0]),
            b([1, 1, 0]),
        ];
        let r = ts_cochran_q(&blocks).unwrap();
        assert!((r.statistic - 7.0).abs() < 1e-12);
        assert!((r.p_value - 0.0301973834223185).abs() < 1e-9);
    }

    #[test]
    fn test_mood_median() {
        let r = ts_mood_median(&groups()).unwrap();
        assert!((r.statistic - 8.31111111111111).abs() < 1e-10);
        assert!((r.p_value - 0.015677079221414293).abs() < 1e-9);
        let g = groups();
        assert_eq!(
            median_table(g.values(), 9.0),
            vec![vec![0, 4], vec![1, 2], vec![4, 0]]
        );
    }

    #[test]
    fn test_k_sample_errors() {
        let one = BTreeMap::from([("a", vec![1.0, 2.0])]);
        assert!(matches!(
            ts_fisher_owa(&one),
            Err(StatsError::InsufficientData { .. })
        ));
        let empty: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        assert!(matches!(
            ts_kruskal_wallis(&empty, true),
            Err(StatsError::EmptySample { .. })
        ));
        assert!(matches!(
            ts_friedman(&[vec![1.0, 2.0], vec![1.0]]),
            Err(StatsError::SizeMismatch { .. })
        ));
        assert!(ts_cochran_q(&[vec![true, true], vec![false, false]]).is_err());
    }
}
