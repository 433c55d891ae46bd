//! Slice helpers shared by the statistic families.
//!
//! Missing values are `NaN`; everything here works on already-cleaned data
//! unless the name says otherwise. Infinite values are not missing and are
//! rejected by the `clean_*` functions.

use std::collections::BTreeMap;

use super::error::{StatsError, StatsResult};

/// Fail on the first infinite value.
fn require_finite<'a>(values: impl IntoIterator<Item = &'a f64>, context: &str) -> StatsResult<()> {
    match values.into_iter().find(|v| v.is_infinite()) {
        Some(&v) => Err(StatsError::domain(context, v, "values must be finite")),
        None => Ok(()),
    }
}

/// Drop missing values; infinite values are an error.
pub(crate) fn drop_missing(data: &[f64], context: &str) -> StatsResult<Vec<f64>> {
    require_finite(data, context)?;
    let clean: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
    if clean.len() != data.len() {
        log::debug!("dropped {} missing values", data.len() - clean.len());
    }
    Ok(clean)
}

/// Drop missing values and fail on an empty remainder.
pub(crate) fn clean_sample(data: &[f64], context: &str) -> StatsResult<Vec<f64>> {
    let clean = drop_missing(data, context)?;
    if clean.is_empty() {
        return Err(StatsError::empty(context));
    }
    Ok(clean)
}

/// Clean sample that must hold at least `required` values.
pub(crate) fn clean_sample_min(
    data: &[f64],
    required: usize,
    context: &str,
) -> StatsResult<Vec<f64>> {
    let clean = clean_sample(data, context)?;
    if clean.len() < required {
        return Err(StatsError::insufficient(required, clean.len(), context));
    }
    Ok(clean)
}

/// Check lengths, then drop every pair with a missing side.
pub(crate) fn clean_pairs(
    x: &[f64],
    y: &[f64],
    context: &str,
) -> StatsResult<(Vec<f64>, Vec<f64>)> {
    if x.len() != y.len() {
        return Err(StatsError::SizeMismatch {
            expected: x.len(),
            got: y.len(),
            context: context.to_string(),
        });
    }
    require_finite(x.iter().chain(y), context)?;
    let (cx, cy): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .unzip();
    if cx.len() != x.len() {
        log::debug!("dropped {} incomplete pairs", x.len() - cx.len());
    }
    if cx.is_empty() {
        return Err(StatsError::empty(context));
    }
    Ok((cx, cy))
}

/// Categorical sample must not be empty.
pub(crate) fn require_categories<T>(data: &[T], context: &str) -> StatsResult<()> {
    if data.is_empty() {
        return Err(StatsError::empty(context));
    }
    Ok(())
}

/// Validate a contingency table and return (rows, columns).
pub(crate) fn table_shape(table: &[Vec<u64>], context: &str) -> StatsResult<(usize, usize)> {
    let first = table.first().ok_or_else(|| StatsError::empty(context))?;
    let cols = first.len();
    if let Some(row) = table.iter().find(|row| row.len() != cols) {
        return Err(StatsError::SizeMismatch {
            expected: cols,
            got: row.len(),
            context: context.to_string(),
        });
    }
    if cols == 0 || table.iter().flatten().all(|&c| c == 0) {
        return Err(StatsError::empty(context));
    }
    Ok((table.len(), cols))
}

pub(crate) fn sorted(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

pub(crate) fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sum of squared deviations from the mean.
pub(crate) fn sum_sq_dev(data: &[f64]) -> f64 {
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum()
}

/// Unbiased sample variance (n - 1 in the denominator).
pub(crate) fn sample_variance(data: &[f64]) -> f64 {
    sum_sq_dev(data) / (data.len() as f64 - 1.0)
}

/// Median of an already sorted, non-empty slice.
pub(crate) fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

pub(crate) fn median(data: &[f64]) -> f64 {
    median_sorted(&sorted(data))
}

/// Midpoint of min and max.
pub(crate) fn midrange(data: &[f64]) -> f64 {
    let (lo, hi) = min_max(data);
    (lo + hi) / 2.0
}

pub(crate) fn min_max(data: &[f64]) -> (f64, f64) {
    data.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        })
}

/// Average ranks (1-based) with the sizes of every tie group.
pub(crate) fn rank_average(data: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let n = data.len();
    let mut idx: Vec<usize> = (0..n).collect();
    idx.sort_by(|&a, &b| data[a].total_cmp(&data[b]));

    let mut ranks = vec![0.0; n];
    let mut ties = Vec::new();
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && data[idx[j]] == data[idx[i]] {
            j += 1;
        }
        // positions i..j share the average of ranks i+1..=j
        let avg = (i + 1 + j) as f64 / 2.0;
        for &k in &idx[i..j] {
            ranks[k] = avg;
        }
        if j - i > 1 {
            ties.push(j - i);
        }
        i = j;
    }
    (ranks, ties)
}

/// Σ (t³ - t) over tie groups.
pub(crate) fn tie_sum(ties: &[usize]) -> f64 {
    ties.iter()
        .map(|&t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum()
}

/// Frequency of every category, in category order.
pub(crate) fn category_counts<T: Ord + Clone>(data: &[T]) -> BTreeMap<T, u64> {
    let mut counts = BTreeMap::new();
    for item in data {
        *counts.entry(item.clone()).or_insert(0) += 1;
    }
    counts
}

/// Counts of the two categories of a binary sample.
///
/// With `codes`, only those two categories are counted. Without, the first
/// category (in `Ord` order) is category 1 and everything else category 2.
pub(crate) fn binary_counts<T: Ord + Clone>(
    data: &[T],
    codes: Option<(T, T)>,
    context: &str,
) -> StatsResult<(u64, u64)> {
    require_categories(data, context)?;
    let (n1, n2) = match codes {
        Some((c1, c2)) => {
            let n1 = data.iter().filter(|&v| *v == c1).count() as u64;
            let n2 = data.iter().filter(|&v| *v == c2).count() as u64;
            (n1, n2)
        }
        None => {
            let counts = category_counts(data);
            let n1 = counts.values().next().copied().unwrap_or(0);
            (n1, data.len() as u64 - n1)
        }
    };
    if n1 + n2 == 0 {
        return Err(StatsError::empty(context));
    }
    Ok((n1, n2))
}

/// Expected counts under independence: row total · column total / n.
pub(crate) fn expected_table(table: &[Vec<u64>]) -> Vec<Vec<f64>> {
    let n: u64 = table.iter().flatten().sum();
    let cols = table.first().map_or(0, Vec::len);
    let row_tot: Vec<f64> = table.iter().map(|r| r.iter().sum::<u64>() as f64).collect();
    let col_tot: Vec<f64> = (0..cols)
        .map(|j| table.iter().map(|r| r[j]).sum::<u64>() as f64)
        .collect();
    row_tot
        .iter()
        .map(|rt| col_tot.iter().map(|ct| rt * ct / n as f64).collect())
        .collect()
}

/// Drop missing values from every group and require at least two
/// non-empty groups, each with at least `min_size` values.
pub(crate) fn clean_groups<L: Ord + Clone>(
    groups: &BTreeMap<L, Vec<f64>>,
    min_size: usize,
    context: &str,
) -> StatsResult<Vec<(L, Vec<f64>)>> {
    let mut cleaned: Vec<(L, Vec<f64>)> = Vec::with_capacity(groups.len());
    for (label, values) in groups {
        let values = drop_missing(values, context)?;
        if !values.is_empty() {
            cleaned.push((label.clone(), values));
        }
    }
    if cleaned.is_empty() {
        return Err(StatsError::empty(context));
    }
    if cleaned.len() < 2 {
        return Err(StatsError::insufficient(2, cleaned.len(), context));
    }
    if let Some((_, small)) = cleaned.iter().find(|(_, v)| v.len() < min_size) {
        return Err(StatsError::insufficient(min_size, small.len(), context));
    }
    Ok(cleaned)
}

/// Validate a blocks-by-treatments layout (rows of equal length, at least
/// two treatments) and drop rows containing a missing value.
pub(crate) fn clean_blocks(blocks: &[Vec<f64>], context: &str) -> StatsResult<Vec<Vec<f64>>> {
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
    require_finite(blocks.iter().flatten(), context)?;
    let clean: Vec<Vec<f64>> = blocks
        .iter()
        .filter(|r| r.iter().all(|v| !v.is_nan()))
        .cloned()
        .collect();
    if clean.len() != blocks.len() {
        log::debug!("dropped {} incomplete blocks", blocks.len() - clean.len());
    }
    if clean.is_empty() {
        return Err(StatsError::empty(context));
    }
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_sample() {
        assert_eq!(clean_sample(&[1.0, f64::NAN, 3.0], "t").unwrap(), vec![1.0, 3.0]);
        assert_eq!(
            clean_sample(&[f64::NAN], "t"),
            Err(StatsError::empty("t"))
        );
        assert!(matches!(
            clean_sample_min(&[1.0], 2, "t"),
            Err(StatsError::InsufficientData { required: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_clean_pairs() {
        let (x, y) = clean_pairs(&[1.0, f64::NAN, 3.0], &[4.0, 5.0, f64::NAN], "t").unwrap();
        assert_eq!(x, vec![1.0]);
        assert_eq!(y, vec![4.0]);
        assert!(matches!(
            clean_pairs(&[1.0], &[1.0, 2.0], "t"),
            Err(StatsError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_infinite_values_rejected() {
        let is_domain = |r: StatsResult<_>| matches!(r, Err(StatsError::Domain { .. }));
        assert!(is_domain(clean_sample(&[1.0, f64::INFINITY], "t").map(|_| ())));
        assert!(is_domain(clean_pairs(&[1.0, 2.0], &[f64::NEG_INFINITY, 3.0], "t").map(|_| ())));
        let groups = BTreeMap::from([("a", vec![1.0, 2.0]), ("b", vec![f64::INFINITY])]);
        assert!(is_domain(clean_groups(&groups, 1, "t").map(|_| ())));
        let blocks = vec![vec![1.0, 2.0], vec![f64::INFINITY, f64::NAN]];
        assert!(is_domain(clean_blocks(&blocks, "t").map(|_| ())));
        // missing values are still dropped
        assert_eq!(clean_sample(&[f64::NAN, 2.0], "t").unwrap(), vec![2.0]);
    }

    #[test]
    fn test_table_shape() {
        assert_eq!(table_shape(&[vec![1, 2], vec![3, 4]], "t").unwrap(), (2, 2));
        assert!(matches!(
            table_shape(&[vec![1, 2], vec![3]], "t"),
            Err(StatsError::SizeMismatch { .. })
        ));
        assert!(table_shape(&[], "t").is_err());
    }

    #[test]
    fn test_rank_average() {
        let (ranks, ties) = rank_average(&[10.0, 20.0, 10.0, 30.0, 20.0, 20.0]);
        assert_eq!(ranks, vec![1.5, 4.0, 1.5, 6.0, 4.0, 4.0]);
        assert_eq!(ties, vec![2, 3]);
        assert!((tie_sum(&ties) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_location_helpers() {
        let data = [5.0, 1.0, 4.0, 2.0];
        assert!((median(&data) - 3.0).abs() < 1e-12);
        assert!((midrange(&data) - 3.0).abs() < 1e-12);
        assert!((mean(&data) - 3.0).abs() < 1e-12);
        assert!((sample_variance(&data) - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_category_counts() {
        let counts = category_counts(&["b", "a", "b"]);
        assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_binary_counts() {
        let data = ["b", "a", "b", "c"];
        assert_eq!(binary_counts(&data, None, "t").unwrap(), (1, 3));
        assert_eq!(binary_counts(&data, Some(("b", "c")), "t").unwrap(), (2, 1));
        assert!(binary_counts(&data, Some(("x", "y")), "t").is_err());
    }

    #[test]
    fn test_expected_table() {
        let e = expected_table(&[vec![10, 5], vec![3, 12]]);
        assert!((e[0][0] - 15.0 * 13.0 / 30.0).abs() < 1e-12);
        assert!((e[1][1] - 15.0 * 17.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_clean_groups() {
        let mut groups = BTreeMap::new();
        groups.insert("a", vec![1.0, f64::NAN]);
        groups.insert("b", vec![f64::NAN]);
        assert!(matches!(
            clean_groups(&groups, 1, "t"),
            Err(StatsError::InsufficientData { .. })
        ));
        groups.insert("c", vec![2.0, 3.0]);
        let g = clean_groups(&groups, 1, "t").unwrap();
        assert_eq!(g, vec![("a", vec![1.0]), ("c", vec![2.0, 3.0])]);
    }

    #[test]
    fn test_clean_blocks() {
        let b = clean_blocks(&[vec![1.0, 2.0], vec![f64::NAN, 1.0], vec![3.0, 4.0]], "t").unwrap();
        assert_eq!(b.len(), 2);
        assert!(clean_blocks(&[vec![1.0, 2.0], vec![1.0]], "t").is_err());
    }
}
