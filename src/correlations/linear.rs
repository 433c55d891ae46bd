//! Pearson's product-moment correlation.

use crate::stats::helpers::{clean_pairs, mean};
use crate::stats::{Normal, StatsError, StatsResult, StudentT};

use super::CorrelationResult;

/// Significance test for [`r_pearson`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PearsonTest {
    /// t = r·√((n−2)/(1−r²)) on n − 2 degrees of freedom
    #[default]
    StudentT,
    /// z = atanh(r)·√(n−3)
    FisherZ,
}

/// Product-moment correlation of paired, already cleaned data.
pub(crate) fn pearson_r(x: &[f64], y: &[f64], context: &str) -> StatsResult<f64> {
    let (mx, my) = (mean(x), mean(y));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx).powi(2);
        syy += (b - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        return Err(StatsError::domain(context, 0.0, "a variable has zero variance"));
    }
    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Two-sided t test of a correlation coefficient on n pairs.
pub(crate) fn t_test_of_r(r: f64, n: usize, test: &str) -> StatsResult<CorrelationResult> {
    let df = n as f64 - 2.0;
    let (t, p) = if r.abs() == 1.0 {
        (f64::INFINITY.copysign(r), 0.0)
    } else {
        let t = r * (df / (1.0 - r * r)).sqrt();
        (t, StudentT::new(df)?.two_sided(t))
    };
    Ok(CorrelationResult::new(r, t, Some(df), p, test))
}

/// Two-sided normal test of z.
pub(crate) fn z_test_of_r(r: f64, z: f64, test: &str) -> CorrelationResult {
    let p = if z.is_finite() {
        Normal::standard().two_sided(z)
    } else {
        0.0
    };
    CorrelationResult::new(r, z, None, p, test)
}

/// Pearson correlation coefficient with a two-sided significance test.
///
/// Pairs with a missing side are dropped.
///
/// # Errors
///
/// - `SizeMismatch` when `x` and `y` differ in length
/// - `InsufficientData` for fewer than 3 pairs (4 for Fisher z)
/// - `Domain` when either variable is constant
///
/// # Examples
///
/// ```ignore
/// use survey_stats::correlations::{r_pearson, PearsonTest};
///
/// let res = r_pearson(&x, &y, PearsonTest::StudentT)?;
/// println!("r = {:.3}, p = {:.4}", res.r, res.p_value);
/// ```
pub fn r_pearson(x: &[f64], y: &[f64], test: PearsonTest) -> StatsResult<CorrelationResult> {
    let (x, y) = clean_pairs(x, y, "r_pearson")?;
    let n = x.len();
    let required = match test {
        PearsonTest::StudentT => 3,
        PearsonTest::FisherZ => 4,
    };
    if n < required {
        return Err(StatsError::insufficient(required, n, "r_pearson"));
    }
    let r = pearson_r(&x, &y, "r_pearson")?;
    match test {
        PearsonTest::StudentT => t_test_of_r(r, n, "Pearson t-test"),
        PearsonTest::FisherZ => {
            let z = r.atanh() * (n as f64 - 3.0).sqrt();
            Ok(z_test_of_r(r, z, "Pearson Fisher z"))
        }
    }
}

/// Rosenthal correlation |z|/√n from a normal test statistic.
pub fn r_rosenthal(z: f64, n: f64) -> StatsResult<f64> {
    if !(n > 0.0) {
        return Err(StatsError::domain("n", n, "must be positive"));
    }
    if !z.is_finite() {
        return Err(StatsError::domain("z", z, "must be finite"));
    }
    Ok(z.abs() / n.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    const Y: [f64; 10] = [2.0, 1.0, 4.0, 3.0, 7.0, 8.0, 5.0, 10.0, 9.0, 6.0];

    #[test]
    fn test_pearson_t() {
        let res = r_pearson(&X, &Y, PearsonTest::StudentT).unwrap();
        assert!((res.r - 0.7818181818181819).abs() < 1e-12);
        assert!((res.statistic - 3.5465802250219878).abs() < 1e-9);
        assert_eq!(res.df, Some(8.0));
        assert!((res.p_value - 0.007547007781067853).abs() < 1e-8);
    }

    #[test]
    fn test_pearson_fisher_z() {
        let res = r_pearson(&X, &Y, PearsonTest::FisherZ).unwrap();
        assert!((res.statistic - 2.778119345665728).abs() < 1e-9);
        assert!((res.p_value - 0.005467453249489829).abs() < 1e-8);
    }

    #[test]
    fn test_pearson_symmetric() {
        let a = r_pearson(&X, &Y, PearsonTest::StudentT).unwrap();
        let b = r_pearson(&Y, &X, PearsonTest::StudentT).unwrap();
        assert!((a.r - b.r).abs() < 1e-15);
        assert!((a.p_value - b.p_value).abs() < 1e-15);
    }

    #[test]
    fn test_pearson_errors() {
        assert!(matches!(
            r_pearson(&[1.0, 2.0], &[1.0], PearsonTest::StudentT),
            Err(StatsError::SizeMismatch { .. })
        ));
        assert!(matches!(
            r_pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0], PearsonTest::StudentT),
            Err(StatsError::Domain { .. })
        ));
        assert!(matches!(
            r_pearson(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0], PearsonTest::FisherZ),
            Err(StatsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_perfect_correlation() {
        let res = r_pearson(&X, &X, PearsonTest::StudentT).unwrap();
        assert_eq!(res.r, 1.0);
        assert_eq!(res.p_value, 0.0);
    }

    #[test]
    fn test_rosenthal() {
        assert!((r_rosenthal(-2.0, 16.0).unwrap() - 0.5).abs() < 1e-12);
        assert!(r_rosenthal(1.0, 0.0).is_err());
    }
}
