//! Dispersion and consensus measures for scale data.

use std::fmt::Debug;

use super::location::level_codes;
use crate::stats::helpers::{
    category_counts, clean_sample, clean_sample_min, mean, median, min_max, sum_sq_dev,
};
use crate::stats::{StatsError, StatsResult};

/// Denominator of the variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarianceType {
    /// n − 1
    #[default]
    Sample,
    /// n
    Population,
}

/// Center from which absolute deviations are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Center {
    #[default]
    Mean,
    Median,
}

/// Variance of the sample.
///
/// # Errors
///
/// `InsufficientData` when the sample variance is requested for fewer than
/// two values.
pub fn me_variance(data: &[f64], kind: VarianceType) -> StatsResult<f64> {
    match kind {
        VarianceType::Sample => {
            let x = clean_sample_min(data, 2, "me_variance")?;
            Ok(sum_sq_dev(&x) / (x.len() - 1) as f64)
        }
        VarianceType::Population => {
            let x = clean_sample(data, "me_variance")?;
            Ok(sum_sq_dev(&x) / x.len() as f64)
        }
    }
}

pub fn me_standard_deviation(data: &[f64], kind: VarianceType) -> StatsResult<f64> {
    Ok(me_variance(data, kind)?.sqrt())
}

/// Maximum minus minimum.
pub fn me_range(data: &[f64]) -> StatsResult<f64> {
    let (lo, hi) = min_max(&clean_sample(data, "me_range")?);
    Ok(hi - lo)
}

/// Average absolute deviation from the mean or the median.
pub fn me_mean_absolute_deviation(data: &[f64], center: Center) -> StatsResult<f64> {
    let x = clean_sample(data, "me_mean_absolute_deviation")?;
    let c = match center {
        Center::Mean => mean(&x),
        Center::Median => median(&x),
    };
    Ok(x.iter().map(|v| (v - c).abs()).sum::<f64>() / x.len() as f64)
}

/// Consensus of Tastle and Wierman (2007) for ordinal scores.
///
/// Cns = 1 + Σ pᵢ log₂(1 − |Xᵢ − μ| / d), with pᵢ the proportion of each
/// distinct score Xᵢ, μ the mean and d = max − min. One means full
/// agreement, zero a split between the two extremes.
///
/// # Errors
///
/// `Domain` when all scores are equal (d = 0).
pub fn me_consensus(data: &[f64]) -> StatsResult<f64> {
    let x = clean_sample(data, "me_consensus")?;
    consensus_of(&x)
}

/// [`me_consensus`] on labels coded 1..=k by their position in `levels`.
pub fn me_consensus_levels<T: PartialEq + Debug>(data: &[T], levels: &[T]) -> StatsResult<f64> {
    if data.is_empty() {
        return Err(StatsError::empty("me_consensus_levels"));
    }
    consensus_of(&level_codes(data, levels)?)
}

fn consensus_of(x: &[f64]) -> StatsResult<f64> {
    let (lo, hi) = min_max(x);
    let d = hi - lo;
    if d == 0.0 {
        return Err(StatsError::domain(
            "range",
            0.0,
            "consensus needs at least two distinct scores",
        ));
    }
    let mu = mean(x);
    let n = x.len() as f64;
    // f64 keys are not Ord; count via their bit patterns
    let counts = category_counts(&x.iter().map(|v| v.to_bits()).collect::<Vec<_>>());
    let sum: f64 = counts
        .iter()
        .map(|(&bits, &f)| {
            let xi = f64::from_bits(bits);
            f as f64 / n * (1.0 - (xi - mu).abs() / d).log2()
        })
        .sum();
    Ok(1.0 + sum)
}
