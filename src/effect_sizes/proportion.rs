//! Effect sizes for binary data and 2×2 tables.

use crate::stats::helpers::binary_counts;
use crate::stats::{StatsError, StatsResult};

/// Alternative ratios (relative risks) of both categories against `p0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltRatio {
    /// p₁ / p₀
    pub ar1: f64,
    /// p₂ / (1 − p₀)
    pub ar2: f64,
}

fn require_p0(p0: f64) -> StatsResult<()> {
    if !(p0 > 0.0 && p0 < 1.0) {
        return Err(StatsError::domain("p0", p0, "must be in (0, 1)"));
    }
    Ok(())
}

/// Alternative ratio of a binary sample.
///
/// Without `codes`, the first category in `Ord` order is category 1 and all
/// others form category 2.
pub fn es_alt_ratio<T: Ord + Clone>(
    data: &[T],
    codes: Option<(T, T)>,
    p0: f64,
) -> StatsResult<AltRatio> {
    require_p0(p0)?;
    let (n1, n2) = binary_counts(data, codes, "es_alt_ratio")?;
    let n = (n1 + n2) as f64;
    Ok(AltRatio {
        ar1: n1 as f64 / n / p0,
        ar2: n2 as f64 / n / (1.0 - p0),
    })
}

/// Cohen's g: p₁ − 0.5.
pub fn es_cohen_g<T: Ord + Clone>(data: &[T], codes: Option<(T, T)>) -> StatsResult<f64> {
    let (n1, n2) = binary_counts(data, codes, "es_cohen_g")?;
    Ok(n1 as f64 / (n1 + n2) as f64 - 0.5)
}

/// Cohen's h′ for one sample: 2·asin√p₁ − 2·asin√p₀.
pub fn es_cohen_h_os<T: Ord + Clone>(
    data: &[T],
    codes: Option<(T, T)>,
    p0: f64,
) -> StatsResult<f64> {
    if !(0.0..=1.0).contains(&p0) {
        return Err(StatsError::domain("p0", p0, "must be in [0, 1]"));
    }
    let (n1, n2) = binary_counts(data, codes, "es_cohen_h_os")?;
    let p1 = n1 as f64 / (n1 + n2) as f64;
    Ok(2.0 * p1.sqrt().asin() - 2.0 * p0.sqrt().asin())
}

/// Handling of zero cells in [`es_odds_ratio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OddsRatioCorrection {
    #[default]
    None,
    /// Add 0.5 to every cell when any cell is zero (Haldane, 1940).
    Haldane,
}

/// Odds ratio (a·d)/(b·c) of the table `[[a, b], [c, d]]`.
///
/// # Errors
///
/// `EmptySample` for an all-zero table; `Domain` when `b·c = 0` or `a·d = 0`
/// without a correction.
pub fn es_odds_ratio(table: &[[u64; 2]; 2], correction: OddsRatioCorrection) -> StatsResult<f64> {
    let cells = [table[0][0], table[0][1], table[1][0], table[1][1]];
    if cells.iter().all(|&c| c == 0) {
        return Err(StatsError::empty("es_odds_ratio"));
    }
    let has_zero = cells.contains(&0);
    let [a, b, c, d] = match correction {
        OddsRatioCorrection::Haldane if has_zero => cells.map(|v| v as f64 + 0.5),
        _ => cells.map(|v| v as f64),
    };
    if a * d == 0.0 || b * c == 0.0 {
        return Err(StatsError::domain(
            "table",
            0.0,
            "odds ratio is undefined with a zero cell",
        ));
    }
    Ok(a * d / (b * c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<&'static str> {
        let mut d = vec!["yes"; 7];
        d.extend(vec!["no"; 3]);
        d
    }

    #[test]
    fn test_odds_ratio() {
        let or = es_odds_ratio(&[[10, 5], [3, 12]], OddsRatioCorrection::None).unwrap();
        assert!((or - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_odds_ratio_zero_cell() {
        let table = [[10, 0], [3, 12]];
        assert!(matches!(
            es_odds_ratio(&table, OddsRatioCorrection::None),
            Err(StatsError::Domain { .. })
        ));
        let or = es_odds_ratio(&table, OddsRatioCorrection::Haldane).unwrap();
        assert!((or - 10.5 * 12.5 / (0.5 * 3.5)).abs() < 1e-12);
    }

    #[test]
    fn test_cohen_g_and_h() {
        let codes = Some(("yes", "no"));
        assert!((es_cohen_g(&sample(), codes).unwrap() - 0.2).abs() < 1e-12);
        let h = es_cohen_h_os(&sample(), codes, 0.5).unwrap();
        assert!((h - 0.41151684606748784).abs() < 1e-12);
        // without codes "no" sorts first
        assert!((es_cohen_g(&sample(), None).unwrap() + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_alt_ratio() {
        let ar = es_alt_ratio(&sample(), Some(("yes", "no")), 0.5).unwrap();
        assert!((ar.ar1 - 1.4).abs() < 1e-12);
        assert!((ar.ar2 - 0.6).abs() < 1e-12);
        assert!(es_alt_ratio(&sample(), None, 1.0).is_err());
    }
}
