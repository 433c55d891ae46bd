//! Median and mode.

use std::fmt::Debug;

use crate::stats::helpers::{
    category_counts, clean_sample, median_sorted, require_categories, sorted,
};
use crate::stats::{StatsError, StatsResult};

/// Which value to report when the median falls between two scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Average of the two middle scores (or "between a and b" for labels).
    #[default]
    Between,
    Low,
    High,
}

/// Median of a numeric sample.
///
/// # Examples
///
/// ```ignore
/// use survey_stats::measures::{me_median, TieBreak};
///
/// assert_eq!(me_median(&[1.0, 2.0, 3.0, 4.0], TieBreak::Low).unwrap(), 2.0);
/// ```
pub fn me_median(data: &[f64], tie: TieBreak) -> StatsResult<f64> {
    let x = sorted(&clean_sample(data, "me_median")?);
    let n = x.len();
    if n % 2 == 1 {
        return Ok(x[n / 2]);
    }
    Ok(match tie {
        TieBreak::Between => median_sorted(&x),
        TieBreak::Low => x[n / 2 - 1],
        TieBreak::High => x[n / 2],
    })
}

/// Median category of an ordinal sample.
#[derive(Debug, Clone, PartialEq)]
pub enum MedianLabel<T> {
    Level(T),
    Between(T, T),
}

/// Median of ordinal labels, with its numeric (1-based level) value.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMedian<T> {
    pub value: f64,
    pub label: MedianLabel<T>,
}

/// Map every label to its 1-based position in `levels`.
///
/// # Errors
///
/// `Domain` when a label does not appear in `levels`.
pub(crate) fn level_codes<T: PartialEq + Debug>(data: &[T], levels: &[T]) -> StatsResult<Vec<f64>> {
    data.iter()
        .map(|item| {
            levels
                .iter()
                .position(|l| l == item)
                .map(|i| (i + 1) as f64)
                .ok_or_else(|| {
                    StatsError::domain(
                        "data",
                        f64::NAN,
                        &format!("label {:?} is not one of the levels", item),
                    )
                })
        })
        .collect()
}

/// Median of an ordinal sample whose order is given by `levels`.
///
/// With an even count and different middle categories, `Between` reports
/// both labels; `Low` and `High` pick one.
pub fn me_median_levels<T: PartialEq + Clone + Debug>(
    data: &[T],
    levels: &[T],
    tie: TieBreak,
) -> StatsResult<LevelMedian<T>> {
    require_categories(data, "me_median_levels")?;
    let codes = sorted(&level_codes(data, levels)?);
    let n = codes.len();
    let label_at = |code: f64| levels[code as usize - 1].clone();

    if n % 2 == 1 || codes[n / 2 - 1] == codes[n / 2] {
        let code = codes[n / 2];
        return Ok(LevelMedian {
            value: code,
            label: MedianLabel::Level(label_at(code)),
        });
    }
    let (lo, hi) = (codes[n / 2 - 1], codes[n / 2]);
    Ok(match tie {
        TieBreak::Between => LevelMedian {
            value: (lo + hi) / 2.0,
            label: MedianLabel::Between(label_at(lo), label_at(hi)),
        },
        TieBreak::Low => LevelMedian {
            value: lo,
            label: MedianLabel::Level(label_at(lo)),
        },
        TieBreak::High => LevelMedian {
            value: hi,
            label: MedianLabel::Level(label_at(hi)),
        },
    })
}

/// What to report when every category is equally frequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllEqual {
    /// No mode.
    #[default]
    None,
    /// Every category is a mode.
    All,
}

/// Modal categories and their frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeResult<T> {
    /// Modal categories in category order; empty when there is no mode
    pub modes: Vec<T>,
    pub frequency: Option<u64>,
}

/// Mode(s) of a categorical sample.
pub fn me_mode<T: Ord + Clone>(data: &[T], all_equal: AllEqual) -> StatsResult<ModeResult<T>> {
    require_categories(data, "me_mode")?;
    let counts = category_counts(data);
    let max = counts.values().copied().max().unwrap_or(0);
    let modes: Vec<T> = counts
        .iter()
        .filter(|(_, c)| **c == max)
        .map(|(v, _)| v.clone())
        .collect();
    if modes.len() == counts.len() && all_equal == AllEqual::None {
        return Ok(ModeResult {
            modes: Vec::new(),
            frequency: None,
        });
    }
    Ok(ModeResult {
        modes,
        frequency: Some(max),
    })
}

/// How a modal bin is reported by [`me_mode_bin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeBinValue {
    /// The bin bounds only.
    #[default]
    Bins,
    Midpoint,
    /// Grouped-data interpolation: lb + d1/(d1 + d2)·width, with d1 and d2
    /// the density excess over the previous and next bin.
    Quadratic,
}

/// A bin with the highest frequency density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalBin {
    pub lower: f64,
    pub upper: f64,
    /// Point estimate, absent for [`ModeBinValue::Bins`]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModeBinResult {
    /// Modal bins in bin order; empty when there is no mode
    pub modes: Vec<ModalBin>,
    pub density: Option<f64>,
}

/// Mode of binned scale data.
///
/// Bins are half-open `[lower, upper)`. The modal bin is the one with the
/// highest frequency density (count / width).
pub fn me_mode_bin(
    data: &[f64],
    bins: &[(f64, f64)],
    all_equal: AllEqual,
    value: ModeBinValue,
) -> StatsResult<ModeBinResult> {
    let data = clean_sample(data, "me_mode_bin")?;
    if bins.is_empty() {
        return Err(StatsError::empty("me_mode_bin bins"));
    }
    if let Some(&(lb, _)) = bins.iter().find(|(lb, ub)| !(lb < ub)) {
        return Err(StatsError::domain(
            "bins",
            lb,
            "lower bound must be below upper bound",
        ));
    }

    let fd: Vec<f64> = bins
        .iter()
        .map(|&(lb, ub)| {
            let f = data.iter().filter(|&&x| x >= lb && x < ub).count();
            f as f64 / (ub - lb)
        })
        .collect();
    let mode_fd = fd.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let k = bins.len();
    let modal: Vec<usize> = (0..k).filter(|&i| fd[i] == mode_fd).collect();
    if modal.len() == k && all_equal == AllEqual::None {
        return Ok(ModeBinResult {
            modes: Vec::new(),
            density: None,
        });
    }

    let modes = modal
        .into_iter()
        .map(|i| {
            let (lower, upper) = bins[i];
            let value = match value {
                ModeBinValue::Bins => None,
                ModeBinValue::Midpoint => Some((lower + upper) / 2.0),
                ModeBinValue::Quadratic => {
                    // densities outside the binned range count as zero
                    let prev = if i > 0 { fd[i - 1] } else { 0.0 };
                    let next = if i + 1 < k { fd[i + 1] } else { 0.0 };
                    let (d1, d2) = (mode_fd - prev, mode_fd - next);
                    if d1 + d2 == 0.0 {
                        Some((lower + upper) / 2.0)
                    } else {
                        Some(lower + d1 / (d1 + d2) * (upper - lower))
                    }
                }
            };
            ModalBin {
                lower,
                upper,
                value,
            }
        })
        .collect();
    Ok(ModeBinResult {
        modes,
        density: Some(mode_fd),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_median_tie_breaks() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        for tie in [TieBreak::Between, TieBreak::Low, TieBreak::High] {
            assert_eq!(me_median(&data, tie).unwrap(), 3.0);
        }
        let even = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(me_median(&even, TieBreak::Between).unwrap(), 2.5);
        assert_eq!(me_median(&even, TieBreak::Low).unwrap(), 2.0);
        assert_eq!(me_median(&even, TieBreak::High).unwrap(), 3.0);
        assert!(me_median(&[], TieBreak::Between).is_err());
    }

    #[test]
    fn test_median_levels() {
        let levels = ["never", "rarely", "sometimes", "often"];
        let data = ["never", "often", "rarely", "sometimes"];
        let m = me_median_levels(&data, &levels, TieBreak::Between).unwrap();
        assert_eq!(m.value, 2.5);
        assert_eq!(m.label, MedianLabel::Between("rarely", "sometimes"));
        let m = me_median_levels(&data, &levels, TieBreak::High).unwrap();
        assert_eq!(m.label, MedianLabel::Level("sometimes"));

        let m = me_median_levels(&["often", "often", "never"], &levels, TieBreak::Low).unwrap();
        assert_eq!(m.label, MedianLabel::Level("often"));
    }

    #[test]
    fn test_median_levels_unknown_label() {
        let err = me_median_levels(&["maybe"], &["yes", "no"], TieBreak::Between).unwrap_err();
        assert!(matches!(err, StatsError::Domain { .. }));
    }

    #[test]
    fn test_mode() {
        let m = me_mode(&["a", "b", "b", "c", "c"], AllEqual::None).unwrap();
        assert_eq!(m.modes, vec!["b", "c"]);
        assert_eq!(m.frequency, Some(2));

        let m = me_mode(&["a", "b"], AllEqual::None).unwrap();
        assert!(m.modes.is_empty());
        assert_eq!(m.frequency, None);

        let m = me_mode(&["a", "b"], AllEqual::All).unwrap();
        assert_eq!(m.modes, vec!["a", "b"]);
    }

    #[test]
    fn test_mode_bin() {
        let data = [1.0, 2.0, 2.5, 3.0, 3.5, 4.0, 6.0];
        let bins = [(0.0, 2.0), (2.0, 4.0), (4.0, 8.0)];
        let r = me_mode_bin(&data, &bins, AllEqual::None, ModeBinValue::Bins).unwrap();
        assert_eq!(r.density, Some(2.0));
        assert_eq!(r.modes.len(), 1);
        assert_eq!((r.modes[0].lower, r.modes[0].upper), (2.0, 4.0));
        assert_eq!(r.modes[0].value, None);

        let r = me_mode_bin(&data, &bins, AllEqual::None, ModeBinValue::Midpoint).unwrap();
        assert_eq!(r.modes[0].value, Some(3.0));

        // d1 = 2 - 0.5, d2 = 2 - 0.5
        let r = me_mode_bin(&data, &bins, AllEqual::None, ModeBinValue::Quadratic).unwrap();
        assert!((r.modes[0].value.unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mode_bin_invalid_bins() {
        assert!(me_mode_bin(&[1.0], &[(2.0, 1.0)], AllEqual::None, ModeBinValue::Bins).is_err());
        assert!(me_mode_bin(&[1.0], &[], AllEqual::None, ModeBinValue::Bins).is_err());
    }
}
