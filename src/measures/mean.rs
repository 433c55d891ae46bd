//! Means.

use crate::stats::helpers::{clean_sample, clean_sample_min, mean, midrange, sorted};
use crate::stats::{StatsError, StatsResult};

/// What to do when the number of scores to trim is not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimFrac {
    /// Round the number to trim down.
    #[default]
    Down,
    /// Give the outermost kept scores a partial weight.
    Prop,
    /// Interpolate linearly between the trimmed means of the neighbouring
    /// whole-score trims.
    Linear,
}

/// Kind of mean computed by [`me_mean`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeanType {
    #[default]
    Arithmetic,
    /// Replace the `prop` tails (half per side) by the nearest kept score.
    Winsorized { prop: f64 },
    /// Drop the `prop` tails (half per side).
    Trimmed { prop: f64, frac: TrimFrac },
    /// Drop the minimum and the maximum once.
    Olympic,
    Geometric,
    Harmonic,
    /// Average of minimum and maximum.
    Midrange,
    /// Root mean square.
    Quadratic,
}

/// Compute a mean of the sample.
///
/// Trim proportions are totals: `prop = 0.1` removes 5% from each side,
/// i.e. n·prop/2 scores per side.
///
/// # Errors
///
/// - `EmptySample` when no values remain after dropping `NaN`
/// - `Domain` for a trim proportion outside [0, 1), a non-positive value
///   in a geometric mean, or a zero in a harmonic mean
/// - `InsufficientData` for an Olympic mean on fewer than three scores
///
/// # Examples
///
/// ```ignore
/// use survey_stats::measures::{me_mean, MeanType};
///
/// let m = me_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], MeanType::Arithmetic).unwrap();
/// assert_eq!(m, 3.0);
/// ```
pub fn me_mean(data: &[f64], mean_type: MeanType) -> StatsResult<f64> {
    let data = clean_sample(data, "me_mean")?;
    let n = data.len();
    match mean_type {
        MeanType::Arithmetic => Ok(mean(&data)),
        MeanType::Winsorized { prop } => {
            let x = sorted(&data);
            let nl = trim_count(n, prop)?.1;
            let lo = x[nl];
            let hi = x[n - nl - 1];
            let total: f64 = x
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    if i < nl {
                        lo
                    } else if i >= n - nl {
                        hi
                    } else {
                        v
                    }
                })
                .sum();
            Ok(total / n as f64)
        }
        MeanType::Trimmed { prop, frac } => trimmed_mean(&sorted(&data), prop, frac),
        MeanType::Olympic => {
            let data = clean_sample_min(&data, 3, "me_mean")?;
            let x = sorted(&data);
            Ok(x[1..n - 1].iter().sum::<f64>() / (n - 2) as f64)
        }
        MeanType::Geometric => {
            if let Some(&bad) = data.iter().find(|&&v| v <= 0.0) {
                return Err(StatsError::domain(
                    "data",
                    bad,
                    "geometric mean requires positive values",
                ));
            }
            Ok((data.iter().map(|v| v.ln()).sum::<f64>() / n as f64).exp())
        }
        MeanType::Harmonic => {
            if data.iter().any(|&v| v == 0.0) {
                return Err(StatsError::domain(
                    "data",
                    0.0,
                    "harmonic mean is undefined with a zero value",
                ));
            }
            Ok(n as f64 / data.iter().map(|v| 1.0 / v).sum::<f64>())
        }
        MeanType::Midrange => Ok(midrange(&data)),
        MeanType::Quadratic => Ok((data.iter().map(|v| v * v).sum::<f64>() / n as f64).sqrt()),
    }
}

/// Number to trim per side, exact and rounded down.
fn trim_count(n: usize, prop: f64) -> StatsResult<(f64, usize)> {
    if !(0.0..1.0).contains(&prop) {
        return Err(StatsError::domain(
            "prop",
            prop,
            "trim proportion must be in [0, 1)",
        ));
    }
    let nt = n as f64 * prop / 2.0;
    let nl = nt.floor() as usize;
    if 2 * nl >= n {
        return Err(StatsError::domain(
            "prop",
            prop,
            "trim proportion leaves no scores",
        ));
    }
    Ok((nt, nl))
}

/// Trimmed mean of sorted, non-empty data.
pub(crate) fn trimmed_mean(x: &[f64], prop: f64, frac: TrimFrac) -> StatsResult<f64> {
    let n = x.len();
    let (nt, nl) = trim_count(n, prop)?;
    let kept = &x[nl..n - nl];
    let m1 = mean(kept);
    if nt == nl as f64 || frac == TrimFrac::Down {
        return Ok(m1);
    }
    // the partial rules need the scores strictly between the two kept edges
    let inner = if kept.len() > 2 {
        &kept[1..kept.len() - 1]
    } else {
        &[][..]
    };
    match frac {
        TrimFrac::Down => Ok(m1),
        TrimFrac::Prop => {
            if kept.len() < 2 {
                return Ok(m1);
            }
            let fr = nt - nl as f64;
            let edges = (kept[0] + kept[kept.len() - 1]) * (1.0 - fr);
            Ok((edges + inner.iter().sum::<f64>()) / (n as f64 - 2.0 * nt))
        }
        TrimFrac::Linear => {
            if inner.is_empty() {
                return Err(StatsError::domain(
                    "prop",
                    prop,
                    "trim proportion leaves no scores to interpolate",
                ));
            }
            let m2 = mean(inner);
            let p1 = 2.0 * nl as f64 / n as f64;
            let p2 = 2.0 * (nl + 1) as f64 / n as f64;
            Ok((prop - p1) / (p2 - p1) * (m2 - m1) + m1)
        }
    }
}
