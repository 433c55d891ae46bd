//! Standardized mean differences and variance-explained measures.

use std::collections::BTreeMap;

use crate::stats::helpers::{
    clean_groups, clean_sample, clean_sample_min, mean, midrange, sample_variance, sum_sq_dev,
};
use crate::stats::special::lgamma;
use crate::stats::{StatsError, StatsResult};

fn require_spread(s: f64, context: &str) -> StatsResult<()> {
    if s == 0.0 {
        return Err(StatsError::domain(
            context,
            0.0,
            "standard deviation is zero",
        ));
    }
    Ok(())
}

/// Cohen's d′ for one sample: (x̄ − μ)/s.
///
/// `mu` defaults to the midrange of the sample.
pub fn es_cohen_d_os(data: &[f64], mu: Option<f64>) -> StatsResult<f64> {
    let x = clean_sample_min(data, 2, "es_cohen_d_os")?;
    let mu = mu.unwrap_or_else(|| midrange(&x));
    let s = sample_variance(&x).sqrt();
    require_spread(s, "es_cohen_d_os")?;
    Ok((mean(&x) - mu) / s)
}

/// Cohen's d for two independent samples, with the pooled standard
/// deviation.
pub fn es_cohen_d(x: &[f64], y: &[f64]) -> StatsResult<f64> {
    let x = clean_sample(x, "es_cohen_d")?;
    let y = clean_sample(y, "es_cohen_d")?;
    let df = (x.len() + y.len()) as f64 - 2.0;
    if df < 1.0 {
        return Err(StatsError::insufficient(3, x.len() + y.len(), "es_cohen_d"));
    }
    let sp = ((sum_sq_dev(&x) + sum_sq_dev(&y)) / df).sqrt();
    require_spread(sp, "es_cohen_d")?;
    Ok((mean(&x) - mean(&y)) / sp)
}

/// Small-sample bias correction for [`es_hedges_g_os`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HedgesCorrection {
    /// Γ(m)/(Γ(m − ½)·√m) with m = df/2
    #[default]
    Exact,
    /// 1 − 3/(4·df − 1)
    Hedges,
    /// (n − 3)/(n − 2.25)·√((n − 2)/n)
    Durlak,
    /// Xue (2020) polynomial approximation
    Xue,
}

/// Hedges' g for one sample: Cohen's d′ times a bias correction.
///
/// `mu` defaults to the midrange of the sample.
pub fn es_hedges_g_os(
    data: &[f64],
    mu: Option<f64>,
    correction: HedgesCorrection,
) -> StatsResult<f64> {
    let x = clean_sample_min(data, 3, "es_hedges_g_os")?;
    let d = es_cohen_d_os(&x, mu)?;
    let n = x.len() as f64;
    let df = n - 1.0;
    let factor = match correction {
        HedgesCorrection::Exact => {
            let m = df / 2.0;
            (lgamma(m) - lgamma(m - 0.5)).exp() / m.sqrt()
        }
        HedgesCorrection::Hedges => 1.0 - 3.0 / (4.0 * df - 1.0),
        HedgesCorrection::Durlak => (n - 3.0) / (n - 2.25) * ((n - 2.0) / n).sqrt(),
        HedgesCorrection::Xue => (1.0 - 9.0 / df + 69.0 / (2.0 * df.powi(2))
            - 72.0 / df.powi(3)
            + 687.0 / (8.0 * df.powi(4))
            - 441.0 / (8.0 * df.powi(5))
            + 247.0 / (16.0 * df.powi(6)))
        .powf(1.0 / 12.0),
    };
    Ok(d * factor)
}

/// Dominance of a sample over a reference value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dominance {
    pub mu: f64,
    /// p(x > μ) − p(x < μ)
    pub dominance: f64,
    /// (dominance + 1)/2
    pub vda: f64,
}

/// Dominance D = p(x > μ) − p(x < μ), with μ defaulting to the midrange.
pub fn es_dominance(data: &[f64], mu: Option<f64>) -> StatsResult<Dominance> {
    let x = clean_sample(data, "es_dominance")?;
    let mu = mu.unwrap_or_else(|| midrange(&x));
    let n = x.len() as f64;
    let above = x.iter().filter(|&&v| v > mu).count() as f64;
    let below = x.iter().filter(|&&v| v < mu).count() as f64;
    let dominance = (above - below) / n;
    Ok(Dominance {
        mu,
        dominance,
        vda: (dominance + 1.0) / 2.0,
    })
}

/// Variance explained by group membership in a one-way design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnovaEffect {
    pub eta_sq: f64,
    pub epsilon_sq: f64,
    pub omega_sq: f64,
}

/// η², ε² and ω² of a one-way ANOVA.
///
/// η² = SS_b/SS_t, ε² = (SS_b − (k−1)·MS_w)/SS_t and
/// ω² = (SS_b − (k−1)·MS_w)/(SS_t + MS_w).
pub fn es_anova_owa<L: Ord + Clone>(groups: &BTreeMap<L, Vec<f64>>) -> StatsResult<AnovaEffect> {
    let groups = clean_groups(groups, 1, "es_anova_owa")?;
    let all: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    let n = all.len() as f64;
    let k = groups.len() as f64;
    if n <= k {
        return Err(StatsError::insufficient(
            groups.len() + 1,
            all.len(),
            "es_anova_owa",
        ));
    }
    let ss_t = sum_sq_dev(&all);
    if ss_t == 0.0 {
        return Err(StatsError::domain("ss_total", 0.0, "all values are equal"));
    }
    let ss_w: f64 = groups.iter().map(|(_, v)| sum_sq_dev(v)).sum();
    let ss_b = ss_t - ss_w;
    let ms_w = ss_w / (n - k);
    Ok(AnovaEffect {
        eta_sq: ss_b / ss_t,
        epsilon_sq: (ss_b - (k - 1.0) * ms_w) / ss_t,
        omega_sq: (ss_b - (k - 1.0) * ms_w) / (ss_t + ms_w),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKEWED: [f64; 11] = [1.0, 2.0, 4.0, 7.0, 8.0, 9.0, 12.0, 15.0, 16.0, 20.0, 30.0];

    #[test]
    fn test_cohen_d_os() {
        let d = es_cohen_d_os(&SKEWED, Some(10.0)).unwrap();
        assert!((d - 0.1477339109666846).abs() < 1e-12);
        assert!(es_cohen_d_os(&[2.0, 2.0], Some(1.0)).is_err());
    }

    #[test]
    fn test_hedges_corrections() {
        let g = |c| es_hedges_g_os(&SKEWED, Some(10.0), c).unwrap();
        assert!((g(HedgesCorrection::Exact) - 0.13632081750501404).abs() < 1e-10);
        assert!((g(HedgesCorrection::Hedges) - 0.13636976396924733).abs() < 1e-12);
        assert!((g(HedgesCorrection::Durlak) - 0.1221763203710995).abs() < 1e-12);
        assert!((g(HedgesCorrection::Xue) - 0.13632081875702334).abs() < 1e-12);
    }

    #[test]
    fn test_cohen_d_two_sample() {
        let d = es_cohen_d(&SKEWED, &[3.0, 5.0, 6.0, 9.0, 11.0, 14.0]).unwrap();
        assert!((d - 0.44097871594095356).abs() < 1e-12);
    }

    #[test]
    fn test_dominance() {
        let r = es_dominance(&SKEWED, None).unwrap();
        assert_eq!(r.mu, 15.5);
        assert!((r.dominance + 0.4545454545454546).abs() < 1e-12);
        assert!((r.vda - 0.2727272727272727).abs() < 1e-12);
    }

    #[test]
    fn test_anova_effect() {
        let mut groups = BTreeMap::new();
        groups.insert("a", vec![1.0, 2.0, 4.0, 7.0]);
        groups.insert("b", vec![8.0, 9.0, 12.0]);
        groups.insert("c", vec![15.0, 16.0, 20.0, 30.0]);
        let e = es_anova_owa(&groups).unwrap();
        assert!((e.eta_sq - 0.7703842070880288).abs() < 1e-12);
        assert!((e.epsilon_sq - 0.712980258860036).abs() < 1e-12);
        assert!((e.omega_sq - 0.6930872855319576).abs() < 1e-12);
    }
}
