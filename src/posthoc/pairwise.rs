//! Pairwise comparisons following an omnibus test.

use std::collections::BTreeMap;

use crate::hypothesis::{
    binomial_two_sided, block_rank_sums, check_binary_blocks, median_table, ts_powerdivergence_ind,
    GofCorrection, Lambda, TwoSidedMethod,
};
use crate::stats::helpers::{category_counts, clean_blocks, clean_groups, median, rank_average, require_categories, tie_sum};
use crate::stats::{
    Binomial, ChiSquared, ContinuousDistribution, DiscreteDistribution, Normal, StatsError,
    StatsResult, StudentT, EXACT_MAX_N,
};

use super::adjust::{adjust_p_values, Adjustment};

/// One pairwise comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseResult<L> {
    pub group1: L,
    pub group2: L,
    pub statistic: f64,
    pub p_value: f64,
    pub p_adjusted: f64,
}

/// One pairwise binomial comparison of two categories.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialPairResult<T> {
    pub category1: T,
    pub category2: T,
    pub n1: u64,
    pub n2: u64,
    /// n1/(n1 + n2); `NaN` when neither category occurs
    pub obs_prop: f64,
    /// E1/(E1 + E2)
    pub exp_prop: f64,
    pub p_value: f64,
    pub p_adjusted: f64,
}

/// Index pairs (i, j) with i < j.
fn pairs(k: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..k).flat_map(move |i| (i + 1..k).map(move |j| (i, j)))
}

/// Attach adjusted p-values to raw (i, j, statistic, p) comparisons.
fn finish<L: Clone>(labels: &[L], raw: Vec<(usize, usize, f64, f64)>, adjustment: Adjustment) -> Vec<PairwiseResult<L>> {
    let p: Vec<f64> = raw.iter().map(|r| r.3).collect();
    let adjusted = adjust_p_values(&p, adjustment);
    raw.into_iter()
        .zip(adjusted)
        .map(|((i, j, statistic, p_value), p_adjusted)| PairwiseResult {
            group1: labels[i].clone(),
            group2: labels[j].clone(),
            statistic,
            p_value,
            p_adjusted,
        })
        .collect()
}

fn check_labels<L>(labels: &[L], k: usize, context: &str) -> StatsResult<()> {
    if labels.len() != k {
        return Err(StatsError::SizeMismatch {
            expected: k,
            got: labels.len(),
            context: context.to_string(),
        });
    }
    Ok(())
}

/// Pairwise binomial tests after a goodness-of-fit test.
///
/// For every pair of categories, the count of the first is tested against
/// the pair total with p₀ = E₁/(E₁ + E₂). Without `expected` all
/// categories are expected equally often.
///
/// # Examples
///
/// ```ignore
/// use survey_stats::hypothesis::TwoSidedMethod;
/// use survey_stats::posthoc::{ph_binomial, Adjustment};
///
/// for pair in ph_binomial(&answers, None, TwoSidedMethod::EqDist, Adjustment::Bonferroni)? {
///     println!("{} vs {}: {:.4}", pair.category1, pair.category2, pair.p_adjusted);
/// }
/// ```
pub fn ph_binomial<T: Ord + Clone>(
    data: &[T],
    expected: Option<&BTreeMap<T, f64>>,
    method: TwoSidedMethod,
    adjustment: Adjustment,
) -> StatsResult<Vec<BinomialPairResult<T>>> {
    require_categories(data, "ph_binomial")?;
    let counts = category_counts(data);
    let cells: Vec<(T, u64, f64)> = match expected {
        Some(exp) => {
            if let Some((_, &bad)) = exp.iter().find(|(_, &e)| !(e > 0.0 && e.is_finite())) {
                return Err(StatsError::domain("expected", bad, "expected counts must be positive"));
            }
            exp.iter()
                .map(|(cat, &e)| (cat.clone(), counts.get(cat).copied().unwrap_or(0), e))
                .collect()
        }
        None => counts.iter().map(|(cat, &c)| (cat.clone(), c, 1.0)).collect(),
    };
    if cells.len() < 2 {
        return Err(StatsError::insufficient(2, cells.len(), "ph_binomial"));
    }

    let mut raw = Vec::new();
    for (i, j) in pairs(cells.len()) {
        let (n1, n2) = (cells[i].1, cells[j].1);
        let exp_prop = cells[i].2 / (cells[i].2 + cells[j].2);
        let p = binomial_two_sided(n1, n2, exp_prop, method)?;
        raw.push((i, j, exp_prop, p));
    }
    let p: Vec<f64> = raw.iter().map(|r| r.3).collect();
    let adjusted = adjust_p_values(&p, adjustment);
    Ok(raw
        .into_iter()
        .zip(adjusted)
        .map(|((i, j, exp_prop, p_value), p_adjusted)| {
            let (n1, n2) = (cells[i].1, cells[j].1);
            BinomialPairResult {
                category1: cells[i].0.clone(),
                category2: cells[j].0.clone(),
                n1,
                n2,
                obs_prop: n1 as f64 / (n1 + n2) as f64,
                exp_prop,
                p_value,
                p_adjusted,
            }
        })
        .collect())
}

/// Dunn's test after Kruskal-Wallis.
///
/// z = (R̄ᵢ − R̄ⱼ)/√((N(N+1)/12 − T/(12(N−1)))(1/nᵢ + 1/nⱼ)) on the pooled
/// average ranks, with T = Σ(t³−t) over ties.
pub fn ph_dunn<L: Ord + Clone>(
    groups: &BTreeMap<L, Vec<f64>>,
    adjustment: Adjustment,
) -> StatsResult<Vec<PairwiseResult<L>>> {
    let groups = clean_groups(groups, 1, "ph_dunn")?;
    let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    let n = all.len() as f64;
    let (ranks, ties) = rank_average(&all);
    let mut mean_ranks = Vec::with_capacity(groups.len());
    let mut offset = 0;
    for (_, v) in &groups {
        mean_ranks.push(ranks[offset..offset + v.len()].iter().sum::<f64>() / v.len() as f64);
        offset += v.len();
    }
    let base = n * (n + 1.0) / 12.0 - tie_sum(&ties) / (12.0 * (n - 1.0));
    if !(base > 0.0) {
        return Err(StatsError::domain("ph_dunn", 0.0, "all values are tied"));
    }
    let raw = pairs(groups.len())
        .map(|(i, j)| {
            let se = (base * (1.0 / groups[i].1.len() as f64 + 1.0 / groups[j].1.len() as f64)).sqrt();
            let z = (mean_ranks[i] - mean_ranks[j]) / se;
            (i, j, z, Normal::standard().two_sided(z))
        })
        .collect();
    let labels: Vec<L> = groups.into_iter().map(|(l, _)| l).collect();
    Ok(finish(&labels, raw, adjustment))
}

/// Conover's pairwise test after a Friedman test.
///
/// t = (Rᵢ − Rⱼ)/√(2(b·A − ΣR²)/((b−1)(k−1))) on (b−1)(k−1) degrees of
/// freedom, with R the within-block rank sums over b blocks and A the sum
/// of all squared ranks (Conover, 1999, p. 371). `labels` names the
/// treatments (columns).
///
/// # Errors
///
/// `Domain` when every block ranks the treatments identically (zero
/// residual variance).
pub fn ph_friedman_conover<L: Clone>(
    blocks: &[Vec<f64>],
    labels: &[L],
    adjustment: Adjustment,
) -> StatsResult<Vec<PairwiseResult<L>>> {
    let blocks = clean_blocks(blocks, "ph_friedman_conover")?;
    let k = blocks[0].len();
    check_labels(labels, k, "ph_friedman_conover")?;
    if blocks.len() < 2 {
        return Err(StatsError::insufficient(2, blocks.len(), "ph_friedman_conover"));
    }
    let b = blocks.len() as f64;
    let (sums, _) = block_rank_sums(&blocks);
    let a: f64 = blocks
        .iter()
        .flat_map(|row| rank_average(row).0)
        .map(|r| r * r)
        .sum();
    let df = (b - 1.0) * (k as f64 - 1.0);
    let residual = b * a - sums.iter().map(|r| r * r).sum::<f64>();
    if !(residual > 1e-12 * b * a) {
        return Err(StatsError::domain(
            "blocks",
            residual,
            "every block ranks the treatments identically",
        ));
    }
    let se = (2.0 * residual / df).sqrt();
    let dist = StudentT::new(df)?;
    let raw = pairs(k)
        .map(|(i, j)| {
            let t = (sums[i] - sums[j]) / se;
            (i, j, t, dist.two_sided(t))
        })
        .collect();
    Ok(finish(labels, raw, adjustment))
}

/// Pairwise McNemar tests after a Cochran Q test.
///
/// For each pair of treatments the statistic is (b − c)²/(b + c) on the
/// discordant counts. The p-value is exact binomial when b + c is at most
/// [`EXACT_MAX_N`], χ²(1) otherwise. Without discordant blocks the
/// statistic is 0 and p is 1.
pub fn ph_cochran_mcnemar<L: Clone>(
    blocks: &[Vec<bool>],
    labels: &[L],
    adjustment: Adjustment,
) -> StatsResult<Vec<PairwiseResult<L>>> {
    let k = check_binary_blocks(blocks, "ph_cochran_mcnemar")?;
    check_labels(labels, k, "ph_cochran_mcnemar")?;
    let mut raw = Vec::new();
    for (i, j) in pairs(k) {
        let b = blocks.iter().filter(|r| r[i] && !r[j]).count() as u64;
        let c = blocks.iter().filter(|r| !r[i] && r[j]).count() as u64;
        let d = b + c;
        if d == 0 {
            raw.push((i, j, 0.0, 1.0));
            continue;
        }
        let stat = (b as f64 - c as f64).powi(2) / d as f64;
        let p = if d as usize <= EXACT_MAX_N {
            (2.0 * Binomial::new(d, 0.5)?.cdf(b.min(c))).min(1.0)
        } else {
            ChiSquared::new(1.0)?.sf(stat)
        };
        raw.push((i, j, stat, p));
    }
    Ok(finish(labels, raw, adjustment))
}

/// Pairwise Mood median tests: each pair is split at the median of the
/// two groups combined and tested with a 2×2 Pearson chi-square.
///
/// A pair with no score above its pooled median is reported with
/// statistic 0 and p = 1.
pub fn ph_mood_median<L: Ord + Clone>(
    groups: &BTreeMap<L, Vec<f64>>,
    adjustment: Adjustment,
) -> StatsResult<Vec<PairwiseResult<L>>> {
    let groups = clean_groups(groups, 1, "ph_mood_median")?;
    let mut raw = Vec::new();
    for (i, j) in pairs(groups.len()) {
        let (a, b) = (&groups[i].1, &groups[j].1);
        let pooled: Vec<f64> = a.iter().chain(b).copied().collect();
        let table = median_table([a, b], median(&pooled));
        if table.iter().all(|row| row[0] == 0) {
            log::debug!("pair ({}, {}) is tied at its median, p = 1", i, j);
            raw.push((i, j, 0.0, 1.0));
            continue;
        }
        let res = ts_powerdivergence_ind(&table, Lambda::Pearson, GofCorrection::None)?;
        raw.push((i, j, res.statistic, res.p_value));
    }
    let labels: Vec<L> = groups.into_iter().map(|(l, _)| l).collect();
    Ok(finish(&labels, raw, adjustment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn groups() -> BTreeMap<&'static str, Vec<f64>> {
        BTreeMap::from([
            ("a", vec![1.0, 2.0, 4.0, 7.0]),
            ("b", vec![8.0, 9.0, 12.0]),
            ("c", vec![15.0, 16.0, 20.0, 30.0]),
        ])
    }

    fn labels<L: Clone>(res: &[PairwiseResult<L>]) -> Vec<(L, L)> {
        res.iter().map(|r| (r.group1.clone(), r.group2.clone())).collect()
    }

    #[test]
    fn test_binomial_pairs() {
        let mut data = vec!["DIVORCED"; 7];
        data.extend(vec!["MARRIED"; 6]);
        data.extend(vec!["NEVER MARRIED"; 4]);
        data.extend(vec!["SEPARATED"; 2]);
        let res = ph_binomial(&data, None, TwoSidedMethod::EqDist, Adjustment::Sidak).unwrap();
        assert_eq!(res.len(), 6);
        assert_eq!((res[0].category1, res[0].category2), ("DIVORCED", "MARRIED"));
        assert_eq!(res[0].p_value, 1.0);
        assert!((res[1].p_value - 0.548828125).abs() < 1e-12);
        assert!((res[2].p_value - 0.1796875).abs() < 1e-12);
        assert!((res[2].p_adjusted - 0.6952975287456411).abs() < 1e-10);
        assert!((res[1].obs_prop - 7.0 / 11.0).abs() < 1e-15);
        assert_eq!(res[1].exp_prop, 0.5);
    }

    #[test]
    fn test_dunn() {
        let res = ph_dunn(&groups(), Adjustment::Holm).unwrap();
        assert_eq!(labels(&res), vec![("a", "b"), ("a", "c"), ("b", "c")]);
        assert!((res[0].statistic + 1.3816985594155151).abs() < 1e-12);
        assert!((res[1].p_value - 0.002837544888792287).abs() < 1e-10);
        assert!((res[1].p_adjusted - 0.008512634666376861).abs() < 1e-10);
        assert!((res[0].p_adjusted - 0.334128553829788).abs() < 1e-10);
    }

    #[test]
    fn test_friedman_conover() {
        let blocks = vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 1.0],
            vec![1.0, 3.0, 2.0],
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 3.0],
            vec![1.5, 4.0, 2.0],
        ];
        let res = ph_friedman_conover(&blocks, &["x", "y", "z"], Adjustment::None).unwrap();
        assert!((res[0].statistic + 3.4993946207686277).abs() < 1e-12);
        assert!((res[0].p_value - 0.00573230025725431).abs() < 1e-10);
        assert!((res[1].statistic + 2.6760076511760094).abs() < 1e-12);
        assert!((res[1].p_value - 0.023251524593854794).abs() < 1e-10);
        assert!((res[2].statistic - 0.8233869695926183).abs() < 1e-12);
        assert!((res[2].p_value - 0.4294869588639433).abs() < 1e-10);
        assert!(matches!(
            ph_friedman_conover(&blocks, &["x", "y"], Adjustment::None),
            Err(StatsError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_friedman_conover_identical_blocks() {
        let blocks = vec![vec![1.0, 2.0, 3.0]; 4];
        assert!(matches!(
            ph_friedman_conover(&blocks, &["x", "y", "z"], Adjustment::None),
            Err(StatsError::Domain { .. })
        ));
        assert!(matches!(
            ph_friedman_conover(&blocks[..1], &["x", "y", "z"], Adjustment::None),
            Err(StatsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_cochran_mcnemar() {
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
        let res = ph_cochran_mcnemar(&blocks, &[1, 2, 3], Adjustment::Bonferroni).unwrap();
        assert!((res[0].statistic - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(res[0].p_value, 1.0);
        assert_eq!(res[1].statistic, 5.0);
        assert!((res[1].p_value - 0.0625).abs() < 1e-12);
        assert!((res[1].p_adjusted - 0.1875).abs() < 1e-12);
        assert!((res[2].p_value - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_mood_median_pairs() {
        let res = ph_mood_median(&groups(), Adjustment::None).unwrap();
        assert!((res[0].statistic - 7.0).abs() < 1e-10);
        assert!((res[0].p_value - 0.008150971593502703).abs() < 1e-9);
        assert!((res[1].statistic - 8.0).abs() < 1e-10);
        assert!((res[2].statistic - 3.9375).abs() < 1e-10);
        assert!((res[2].p_value - 0.047220904003577154).abs() < 1e-9);
    }

    #[test]
    fn test_mood_median_tied_pair() {
        let groups = BTreeMap::from([
            ("a", vec![1.0, 1.0]),
            ("b", vec![1.0, 1.0]),
            ("c", vec![5.0, 6.0]),
        ]);
        let res = ph_mood_median(&groups, Adjustment::Bonferroni).unwrap();
        assert_eq!(labels(&res), vec![("a", "b"), ("a", "c"), ("b", "c")]);
        assert_eq!((res[0].statistic, res[0].p_value, res[0].p_adjusted), (0.0, 1.0, 1.0));
        assert!((res[1].statistic - 4.0).abs() < 1e-12);
        assert!((res[1].p_value - res[2].p_value).abs() < 1e-15);
    }

    #[test]
    fn test_posthoc_errors() {
        let empty: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        assert!(matches!(
            ph_dunn(&empty, Adjustment::None),
            Err(StatsError::EmptySample { .. })
        ));
        assert!(ph_binomial(&["a", "a"], None, TwoSidedMethod::EqDist, Adjustment::None).is_err());
    }
}
