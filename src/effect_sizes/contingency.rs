//! Effect sizes derived from chi-square statistics.

use crate::stats::helpers::{expected_table, table_shape};
use crate::stats::{StatsError, StatsResult};

fn require_chi2(chi2: f64, n: f64) -> StatsResult<()> {
    if !(chi2 >= 0.0) {
        return Err(StatsError::domain("chi2", chi2, "must be non-negative"));
    }
    if !(n > 0.0) {
        return Err(StatsError::domain("n", n, "must be positive"));
    }
    Ok(())
}

/// Cohen's w = √(χ²/n).
pub fn es_cohen_w(chi2: f64, n: f64) -> StatsResult<f64> {
    require_chi2(chi2, n)?;
    Ok((chi2 / n).sqrt())
}

/// Cramér's V for a goodness-of-fit test over `k` categories.
///
/// With `bergsma`, the bias correction of Bergsma (2013) is applied.
pub fn es_cramer_v_gof(chi2: f64, n: f64, k: usize, bergsma: bool) -> StatsResult<f64> {
    require_chi2(chi2, n)?;
    if k < 2 {
        return Err(StatsError::domain("k", k as f64, "need at least two categories"));
    }
    let df = (k - 1) as f64;
    if !bergsma {
        return Ok((chi2 / (n * df)).sqrt());
    }
    if n <= 1.0 {
        return Err(StatsError::domain("n", n, "Bergsma correction needs n > 1"));
    }
    let k_avg = k as f64 - df * df / (n - 1.0);
    let phi2 = (chi2 / n - df / (n - 1.0)).max(0.0);
    Ok((phi2 / (k_avg - 1.0)).sqrt())
}

/// Cramér's V for independence in an r×c table, from Pearson's χ².
///
/// With `bergsma`, φ² and both dimensions are bias-corrected.
pub fn es_cramer_v_ind(table: &[Vec<u64>], bergsma: bool) -> StatsResult<f64> {
    let (r, c) = table_shape(table, "es_cramer_v_ind")?;
    if r < 2 || c < 2 {
        return Err(StatsError::domain(
            "table",
            r.min(c) as f64,
            "need at least two rows and two columns",
        ));
    }
    let expected = expected_table(table);
    let mut chi2 = 0.0;
    for (row, exp_row) in table.iter().zip(&expected) {
        for (&o, &e) in row.iter().zip(exp_row) {
            if e > 0.0 {
                chi2 += (o as f64 - e).powi(2) / e;
            }
        }
    }
    let n = table.iter().flatten().sum::<u64>() as f64;
    let (rf, cf) = (r as f64, c as f64);
    if !bergsma {
        return Ok((chi2 / (n * (rf - 1.0).min(cf - 1.0))).sqrt());
    }
    if n <= 1.0 {
        return Err(StatsError::domain("n", n, "Bergsma correction needs n > 1"));
    }
    let phi2 = (chi2 / n - (rf - 1.0) * (cf - 1.0) / (n - 1.0)).max(0.0);
    let r_avg = rf - (rf - 1.0).powi(2) / (n - 1.0);
    let c_avg = cf - (cf - 1.0).powi(2) / (n - 1.0);
    Ok((phi2 / (r_avg - 1.0).min(c_avg - 1.0)).sqrt())
}

/// Statistic the Johnston-Berry-Mielke E is normalised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JbmStatistic {
    /// Pearson chi-square
    #[default]
    Chi,
    /// Likelihood ratio G
    G,
}

/// Johnston-Berry-Mielke E for a goodness-of-fit test, with `min_exp` the
/// smallest expected count.
pub fn es_jbm_e(chi2: f64, n: f64, min_exp: f64, statistic: JbmStatistic) -> StatsResult<f64> {
    require_chi2(chi2, n)?;
    if !(min_exp > 0.0 && min_exp < n) {
        return Err(StatsError::domain("min_exp", min_exp, "must be in (0, n)"));
    }
    Ok(match statistic {
        JbmStatistic::Chi => chi2 * min_exp / (n * (n - min_exp)),
        JbmStatistic::G => -1.0 / (min_exp / n).ln() * chi2 / (2.0 * n),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohen_w() {
        assert!((es_cohen_w(8.0, 50.0).unwrap() - 0.4).abs() < 1e-12);
        assert!(es_cohen_w(-1.0, 50.0).is_err());
    }

    #[test]
    fn test_cramer_v_gof() {
        let v = es_cramer_v_gof(8.0, 50.0, 4, false).unwrap();
        assert!((v - 0.23094010767585033).abs() < 1e-12);
        let v = es_cramer_v_gof(8.0, 50.0, 4, true).unwrap();
        assert!((v - 0.1872764367669247).abs() < 1e-12);
    }

    #[test]
    fn test_cramer_v_ind() {
        let table = [vec![10, 5, 7], vec![3, 12, 8]];
        let v = es_cramer_v_ind(&table, false).unwrap();
        assert!((v - 0.38584212284178393).abs() < 1e-12);
        let v = es_cramer_v_ind(&table, true).unwrap();
        assert!((v - 0.3253070937465443).abs() < 1e-12);
    }

    #[test]
    fn test_jbm_e() {
        let e = es_jbm_e(8.0, 50.0, 5.0, JbmStatistic::Chi).unwrap();
        assert!((e - 0.017777777777777778).abs() < 1e-12);
        let e = es_jbm_e(8.0, 50.0, 5.0, JbmStatistic::G).unwrap();
        assert!((e - 0.03474355855226015).abs() < 1e-12);
    }
}
