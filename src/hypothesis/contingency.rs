//! Tests on contingency tables.

use crate::stats::helpers::{expected_table, table_shape};
use crate::stats::{
    Alternative, DiscreteDistribution, Hypergeometric, StatsError, StatsResult, TestResult,
};

use super::gof::{chi_square_result, corrected_divergence, GofCorrection, GofResult, Lambda};

/// Fisher's exact test on a 2×2 table `[[a, b], [c, d]]`.
///
/// The statistic is `a`, which follows a hypergeometric distribution given
/// the margins. `Greater` tests for a positive association (large `a`).
/// The two-sided p-value sums every table no more likely than the observed
/// one (relative tolerance 1e-7).
///
/// # Examples
///
/// ```ignore
/// use survey_stats::hypothesis::ts_fisher;
/// use survey_stats::stats::Alternative;
///
/// let res = ts_fisher(&[[10, 5], [3, 12]], Alternative::TwoSided)?;
/// assert!((res.p_value - 0.0253277).abs() < 1e-6);
/// ```
pub fn ts_fisher(table: &[[u64; 2]; 2], alternative: Alternative) -> StatsResult<TestResult> {
    let [[a, b], [c, d]] = *table;
    let n = a + b + c + d;
    if n == 0 {
        return Err(StatsError::empty("ts_fisher"));
    }
    let dist = Hypergeometric::new(n, a + b, a + c)?;
    let p = match alternative {
        Alternative::Less => dist.cdf(a),
        Alternative::Greater => {
            if a == 0 {
                1.0
            } else {
                dist.sf(a - 1)
            }
        }
        Alternative::TwoSided => {
            let limit = dist.pmf(a) * (1.0 + 1e-7);
            dist.support_pmf()
                .into_iter()
                .map(|(_, p)| p)
                .filter(|&p| p <= limit)
                .sum()
        }
    };
    let test = match alternative {
        Alternative::TwoSided => "Fisher exact, two-sided",
        Alternative::Less => "Fisher exact, less",
        Alternative::Greater => "Fisher exact, greater",
    };
    Ok(TestResult::new(a as f64, None, p.min(1.0), test))
}

/// Power divergence test of independence on an r×c table.
///
/// Expected counts are row total × column total / n and df = (r−1)(c−1).
/// The Williams correction uses the contingency-table form
/// q = 1 + (nΣ1/Rᵢ − 1)(nΣ1/Cⱼ − 1)/(6n(r−1)(c−1)).
///
/// # Errors
///
/// - `EmptySample` for an empty or all-zero table
/// - `SizeMismatch` for ragged rows
/// - `Domain` for an empty row or column, or a zero cell with λ ≤ −1
pub fn ts_powerdivergence_ind(
    table: &[Vec<u64>],
    lambda: Lambda,
    correction: GofCorrection,
) -> StatsResult<GofResult> {
    let (r, c) = table_shape(table, "ts_powerdivergence_ind")?;
    if r < 2 || c < 2 {
        return Err(StatsError::insufficient(2, r.min(c), "ts_powerdivergence_ind"));
    }
    let row_tot: Vec<f64> = table.iter().map(|row| row.iter().sum::<u64>() as f64).collect();
    let col_tot: Vec<f64> = (0..c)
        .map(|j| table.iter().map(|row| row[j]).sum::<u64>() as f64)
        .collect();
    if row_tot.iter().chain(&col_tot).any(|&t| t == 0.0) {
        return Err(StatsError::domain(
            "table",
            0.0,
            "every row and column needs a non-zero total",
        ));
    }
    let l = lambda.value();
    if !l.is_finite() {
        return Err(StatsError::domain("lambda", l, "must be finite"));
    }

    let observed: Vec<f64> = table.iter().flatten().map(|&v| v as f64).collect();
    let expected: Vec<f64> = expected_table(table).into_iter().flatten().collect();
    let n: f64 = row_tot.iter().sum();
    let df = ((r - 1) * (c - 1)) as f64;

    let stat = corrected_divergence(&observed, &expected, l, correction)?;
    let factor = match correction {
        GofCorrection::Pearson => (n - 1.0) / n,
        GofCorrection::Williams => {
            let sr: f64 = row_tot.iter().map(|t| 1.0 / t).sum();
            let sc: f64 = col_tot.iter().map(|t| 1.0 / t).sum();
            1.0 / (1.0 + (n * sr - 1.0) * (n * sc - 1.0) / (6.0 * n * df))
        }
        GofCorrection::None | GofCorrection::Yates => 1.0,
    };
    chi_square_result(
        n as u64,
        stat * factor,
        df,
        &expected,
        format!("{} test of independence{}", lambda.name(), correction.label()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [[u64; 2]; 2] = [[10, 5], [3, 12]];

    #[test]
    fn test_fisher() {
        let r = ts_fisher(&TABLE, Alternative::TwoSided).unwrap();
        assert_eq!(r.statistic, 10.0);
        assert!((r.p_value - 0.025327687033676147).abs() < 1e-10);
        let r = ts_fisher(&TABLE, Alternative::Greater).unwrap();
        assert!((r.p_value - 0.012663843516838072).abs() < 1e-10);
        let less = ts_fisher(&TABLE, Alternative::Less).unwrap();
        assert!(less.p_value > 0.99);
    }

    #[test]
    fn test_fisher_empty() {
        assert!(matches!(
            ts_fisher(&[[0, 0], [0, 0]], Alternative::TwoSided),
            Err(StatsError::EmptySample { .. })
        ));
    }

    fn table() -> Vec<Vec<u64>> {
        vec![vec![10, 5, 7], vec![3, 12, 8]]
    }

    #[test]
    fn test_powerdivergence_ind() {
        let r = ts_powerdivergence_ind(&table(), Lambda::Pearson, GofCorrection::None).unwrap();
        assert_eq!((r.n, r.k, r.df), (45, 6, Some(2.0)));
        assert!((r.statistic - 6.6993364691574415).abs() < 1e-9);
        assert!((r.p_value - 0.03509599580741466).abs() < 1e-9);
        assert!((r.min_exp - 6.355555555555555).abs() < 1e-12);
        assert_eq!(r.prop_below_5, 0.0);

        let r = ts_powerdivergence_ind(&table(), Lambda::CressieRead, GofCorrection::None).unwrap();
        assert!((r.statistic - 6.759304701063052).abs() < 1e-9);
        assert!((r.p_value - 0.034059293371869456).abs() < 1e-9);
    }

    #[test]
    fn test_powerdivergence_ind_corrections() {
        let g = ts_powerdivergence_ind(
            &table(),
            Lambda::LikelihoodRatio,
            GofCorrection::Williams,
        )
        .unwrap();
        assert!((g.statistic - 6.68936098090071).abs() < 1e-9);
        assert!(g.test.ends_with("with Williams continuity correction"));
        let y = ts_powerdivergence_ind(&table(), Lambda::Pearson, GofCorrection::Yates).unwrap();
        assert!((y.statistic - 4.911525494965396).abs() < 1e-9);
        assert!((y.p_value - 0.08579772847554326).abs() < 1e-9);
    }

    #[test]
    fn test_yates_on_matching_cells() {
        let even = vec![vec![2, 2], vec![2, 2]];
        let r = ts_powerdivergence_ind(&even, Lambda::Pearson, GofCorrection::Yates).unwrap();
        assert!((r.statistic - 0.5).abs() < 1e-12);
        assert!((r.p_value - 0.4795001221869535).abs() < 1e-9);
    }

    #[test]
    fn test_powerdivergence_ind_errors() {
        assert!(matches!(
            ts_powerdivergence_ind(&[vec![1, 2], vec![3]], Lambda::Pearson, GofCorrection::None),
            Err(StatsError::SizeMismatch { .. })
        ));
        assert!(matches!(
            ts_powerdivergence_ind(&[vec![1, 0], vec![3, 0]], Lambda::Pearson, GofCorrection::None),
            Err(StatsError::Domain { .. })
        ));
    }
}
