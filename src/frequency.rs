//! Frequency tables (`tab_*`) and histogram bin counts.

use crate::measures::{me_quartile_range, QuartileMethod, QuartileRange};
use crate::stats::helpers::{category_counts, clean_sample, mean, min_max, require_categories, sample_variance};
use crate::stats::{StatsError, StatsResult};

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRow<T> {
    pub category: T,
    pub count: u64,
    pub percent: f64,
    pub cumulative_percent: f64,
}

/// Frequency table in category order.
///
/// # Examples
///
/// ```ignore
/// use survey_stats::frequency::tab_frequency;
///
/// for row in tab_frequency(&["b", "a", "b"])? {
///     println!("{}: {} ({:.1}%)", row.category, row.count, row.percent);
/// }
/// ```
pub fn tab_frequency<T: Ord + Clone>(data: &[T]) -> StatsResult<Vec<FrequencyRow<T>>> {
    require_categories(data, "tab_frequency")?;
    let n = data.len() as f64;
    let mut cumulative = 0;
    Ok(category_counts(data)
        .into_iter()
        .map(|(category, count)| {
            cumulative += count;
            FrequencyRow {
                category,
                count,
                percent: count as f64 / n * 100.0,
                cumulative_percent: cumulative as f64 / n * 100.0,
            }
        })
        .collect())
}

/// Rule for the number of histogram bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinRule {
    /// √n
    Src,
    /// log₂(n) + 1
    #[default]
    Sturges,
    /// 2.5·n^(1/4)
    Qr,
    /// 2·n^(1/3)
    Rice,
    /// Terrell-Scott (2n)^(1/3)
    Ts,
    /// log₂(n)
    Exp,
    /// 2√n up to n = 100, 10·log₁₀(n) above
    Velleman,
    /// 1 + log₂(n) + log₂(1 + |g₁|/σ_g₁)
    Doane,
    /// Range over a width of 3.49·s/n^(1/3)
    Scott,
    /// Freedman-Diaconis: range over a width of 2·IQR/n^(1/3)
    Fd,
}

/// Number of bins for a histogram of `data` (rounded up, at least 1).
pub fn tab_nbins(data: &[f64], rule: BinRule) -> StatsResult<usize> {
    let x = clean_sample(data, "tab_nbins")?;
    let n = x.len() as f64;
    let (lo, hi) = min_max(&x);
    let range = hi - lo;
    let k = match rule {
        BinRule::Src => n.sqrt(),
        BinRule::Sturges => n.log2() + 1.0,
        BinRule::Qr => 2.5 * n.powf(0.25),
        BinRule::Rice => 2.0 * n.cbrt(),
        BinRule::Ts => (2.0 * n).cbrt(),
        BinRule::Exp => n.log2(),
        BinRule::Velleman => {
            if n <= 100.0 {
                2.0 * n.sqrt()
            } else {
                10.0 * n.log10()
            }
        }
        BinRule::Doane => {
            if x.len() < 3 {
                return Err(StatsError::insufficient(3, x.len(), "Doane bins"));
            }
            let m = mean(&x);
            let m2 = x.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n;
            if m2 == 0.0 {
                return Err(StatsError::domain("data", 0.0, "Doane bins need a non-zero variance"));
            }
            let m3 = x.iter().map(|v| (v - m).powi(3)).sum::<f64>() / n;
            let g1 = m3 / m2.powf(1.5);
            let sigma = (6.0 * (n - 2.0) / ((n + 1.0) * (n + 3.0))).sqrt();
            1.0 + n.log2() + (1.0 + g1.abs() / sigma).log2()
        }
        BinRule::Scott => {
            if x.len() < 2 {
                return Err(StatsError::insufficient(2, x.len(), "Scott bins"));
            }
            let h = 3.49 * sample_variance(&x).sqrt() / n.cbrt();
            if h == 0.0 {
                return Err(StatsError::domain("data", 0.0, "Scott bins need a non-zero variance"));
            }
            range / h
        }
        BinRule::Fd => {
            let iqr = me_quartile_range(&x, QuartileRange::Iqr, QuartileMethod::default())?.value;
            if iqr == 0.0 {
                return Err(StatsError::domain("iqr", 0.0, "Freedman-Diaconis bins need a non-zero IQR"));
            }
            range / (2.0 * iqr / n.cbrt())
        }
    };
    Ok((k.ceil() as usize).max(1))
}

/// One equal-width bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinRow {
    pub lower: f64,
    pub upper: f64,
    pub frequency: u64,
    /// frequency / width
    pub density: f64,
}

/// Frequency table over `nbins` equal-width bins.
///
/// Bins include their lower bound. The maximum is raised by `adjust`
/// before the width is computed; the last bin also includes its upper
/// bound so that the maximum is always counted.
pub fn tab_frequency_bins(data: &[f64], nbins: usize, adjust: f64) -> StatsResult<Vec<BinRow>> {
    let x = clean_sample(data, "tab_frequency_bins")?;
    if nbins == 0 {
        return Err(StatsError::invalid_option("nbins", "need at least one bin"));
    }
    if !(adjust >= 0.0 && adjust.is_finite()) {
        return Err(StatsError::domain("adjust", adjust, "must be non-negative"));
    }
    let (lo, hi) = min_max(&x);
    let width = (hi + adjust - lo) / nbins as f64;
    if width == 0.0 {
        return Err(StatsError::domain("data", 0.0, "all values are equal; use a positive adjust"));
    }
    Ok((0..nbins)
        .map(|i| {
            let lower = lo + i as f64 * width;
            let upper = lower + width;
            let last = i + 1 == nbins;
            let frequency = x
                .iter()
                .filter(|&&v| v >= lower && (v < upper || (last && v <= upper)))
                .count() as u64;
            BinRow {
                lower,
                upper,
                frequency,
                density: frequency as f64 / width,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SKEWED: [f64; 11] = [1.0, 2.0, 4.0, 7.0, 8.0, 9.0, 12.0, 15.0, 16.0, 20.0, 30.0];
    const EVEN: [f64; 8] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

    #[test]
    fn test_frequency() {
        let rows = tab_frequency(&["b", "a", "b", "c"]).unwrap();
        assert_eq!(
            rows.iter().map(|r| (r.category, r.count)).collect::<Vec<_>>(),
            vec![("a", 1), ("b", 2), ("c", 1)]
        );
        assert_eq!(rows[1].percent, 50.0);
        assert_eq!(rows[1].cumulative_percent, 75.0);
        assert_eq!(rows[2].cumulative_percent, 100.0);
    }

    #[test]
    fn test_nbins_rules() {
        let k = |rule| tab_nbins(&SKEWED, rule).unwrap();
        assert_eq!(k(BinRule::Src), 4);
        assert_eq!(k(BinRule::Sturges), 5);
        assert_eq!(k(BinRule::Qr), 5);
        assert_eq!(k(BinRule::Rice), 5);
        assert_eq!(k(BinRule::Ts), 3);
        assert_eq!(k(BinRule::Exp), 4);
        assert_eq!(k(BinRule::Velleman), 7);
        assert_eq!(k(BinRule::Doane), 6);
        assert_eq!(k(BinRule::Scott), 3);
        assert_eq!(tab_nbins(&EVEN, BinRule::Fd).unwrap(), 2);
        assert_eq!(tab_nbins(&EVEN, BinRule::Scott).unwrap(), 2);
    }

    #[test]
    fn test_frequency_bins() {
        let bins = tab_frequency_bins(&EVEN, 4, 1.0).unwrap();
        assert_eq!(bins.len(), 4);
        assert_eq!((bins[0].lower, bins[0].upper), (1.0, 3.0));
        assert!(bins.iter().all(|b| b.frequency == 2 && b.density == 1.0));

        let tight = tab_frequency_bins(&EVEN, 7, 0.0).unwrap();
        assert_eq!(tight.iter().map(|b| b.frequency).sum::<u64>(), 8);
        assert_eq!(tight[6].frequency, 2);
    }

    #[test]
    fn test_errors() {
        let empty: [&str; 0] = [];
        assert!(matches!(tab_frequency(&empty), Err(StatsError::EmptySample { .. })));
        assert!(tab_nbins(&[f64::NAN], BinRule::Sturges).is_err());
        assert!(tab_frequency_bins(&EVEN, 0, 1.0).is_err());
        assert!(tab_frequency_bins(&[2.0, 2.0], 3, 0.0).is_err());
    }
}
