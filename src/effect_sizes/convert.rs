//! Conversion between effect size measures.
//!
//! Only pairs with a closed-form relation are supported. Some need
//! ancillary quantities (sample size, number of groups, mean squares),
//! passed through [`ConvertParams`].
//!
//! ```ignore
//! use survey_stats::effect_sizes::{es_convert, ConvertParams, EffectSize};
//!
//! let q = es_convert(8.0, EffectSize::OddsRatio, EffectSize::YuleQ, &ConvertParams::default())?;
//! assert!((q - 7.0 / 9.0).abs() < 1e-12);
//! ```

use std::f64::consts::PI;
use std::fmt;

use crate::stats::{StatsError, StatsResult};

/// Effect size measures known to [`es_convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectSize {
    /// One-sample Cohen's d′
    CohenDOs,
    CohenD,
    CohenF,
    /// One-sample Cohen's h′
    CohenHOs,
    CohenH,
    CohenW,
    ContingencyCoefficient,
    CramerVGof,
    EpsilonSq,
    EtaSq,
    OmegaSq,
    /// Johnston-Berry-Mielke E
    JbmE,
    OddsRatio,
    YuleQ,
    YuleY,
    RankBiserial,
    /// Vargha-Delaney A
    Vda,
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EffectSize::CohenDOs => "Cohen d'",
            EffectSize::CohenD => "Cohen d",
            EffectSize::CohenF => "Cohen f",
            EffectSize::CohenHOs => "Cohen h'",
            EffectSize::CohenH => "Cohen h",
            EffectSize::CohenW => "Cohen w",
            EffectSize::ContingencyCoefficient => "contingency coefficient",
            EffectSize::CramerVGof => "Cramer V (GoF)",
            EffectSize::EpsilonSq => "epsilon squared",
            EffectSize::EtaSq => "eta squared",
            EffectSize::OmegaSq => "omega squared",
            EffectSize::JbmE => "Johnston-Berry-Mielke E",
            EffectSize::OddsRatio => "odds ratio",
            EffectSize::YuleQ => "Yule Q",
            EffectSize::YuleY => "Yule Y",
            EffectSize::RankBiserial => "rank biserial",
            EffectSize::Vda => "Vargha-Delaney A",
        };
        f.write_str(name)
    }
}

/// Scaling between Cohen's d and the log odds ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OddsRatioMethod {
    /// ln(OR) = 1.81·d (Chinn, 2000)
    #[default]
    Chinn,
    /// ln(OR) = π/√3·d (Borenstein et al., 2009)
    Borenstein,
}

impl OddsRatioMethod {
    fn factor(self) -> f64 {
        match self {
            OddsRatioMethod::Chinn => 1.81,
            OddsRatioMethod::Borenstein => PI / 3f64.sqrt(),
        }
    }
}

/// Ancillary quantities some conversions need.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConvertParams {
    /// Sample size
    pub n: Option<f64>,
    /// Number of categories (Cramér V) or groups (ε² ↔ η²)
    pub k: Option<f64>,
    pub ms_within: Option<f64>,
    pub ss_total: Option<f64>,
    /// Smallest expected count (JBM E)
    pub e_min: Option<f64>,
    pub or_method: OddsRatioMethod,
}

fn need(value: Option<f64>, name: &str) -> StatsResult<f64> {
    value.ok_or_else(|| StatsError::domain(name, f64::NAN, "required for this conversion"))
}

impl EffectSize {
    /// Valid values as (lower, upper, lower open, upper open).
    fn range(self) -> (f64, f64, bool, bool) {
        use EffectSize::*;
        let inf = f64::INFINITY;
        match self {
            CohenDOs | CohenD | CohenHOs | CohenH => (-inf, inf, true, true),
            CohenF | CohenW | JbmE => (0.0, inf, false, true),
            ContingencyCoefficient => (0.0, 1.0, false, true),
            CramerVGof | EtaSq | Vda => (0.0, 1.0, false, false),
            EpsilonSq | OmegaSq => (-inf, 1.0, true, false),
            OddsRatio => (0.0, inf, true, true),
            YuleQ | YuleY | RankBiserial => (-1.0, 1.0, false, false),
        }
    }

    fn check(self, value: f64) -> StatsResult<()> {
        let (lo, hi, lo_open, hi_open) = self.range();
        let above = if lo_open { value > lo } else { value >= lo };
        let below = if hi_open { value < hi } else { value <= hi };
        if value.is_finite() && above && below {
            return Ok(());
        }
        let reason = format!(
            "{} must lie in {}{}, {}{}",
            self,
            if lo_open { "(" } else { "[" },
            lo,
            hi,
            if hi_open { ")" } else { "]" }
        );
        Err(StatsError::Domain {
            name: "value".to_string(),
            value,
            reason,
        })
    }
}

/// Number of categories or groups, at least two.
fn need_k(params: &ConvertParams) -> StatsResult<f64> {
    let k = need(params.k, "k")?;
    if !(k >= 2.0 && k.is_finite()) {
        return Err(StatsError::domain("k", k, "need at least two categories"));
    }
    Ok(k)
}

/// e_min / n, strictly between 0 and 1.
fn jbm_ratio(params: &ConvertParams) -> StatsResult<f64> {
    let (e_min, n) = (need(params.e_min, "e_min")?, need(params.n, "n")?);
    let q = e_min / n;
    if !(q > 0.0 && q < 1.0) {
        return Err(StatsError::domain("e_min", e_min, "must be in (0, n)"));
    }
    Ok(q)
}

/// Sample size and number of groups with n > k.
fn need_n_k(params: &ConvertParams) -> StatsResult<(f64, f64)> {
    let (n, k) = (need(params.n, "n")?, need_k(params)?);
    if !(n > k && n.is_finite()) {
        return Err(StatsError::domain("n", n, "must exceed the number of groups"));
    }
    Ok((n, k))
}

/// 1 − MS_within/(SS_total + MS_within), the ε² to ω² factor.
fn omega_factor(params: &ConvertParams) -> StatsResult<f64> {
    let ms_w = need(params.ms_within, "ms_within")?;
    let ss_t = need(params.ss_total, "ss_total")?;
    if !(ms_w >= 0.0 && ms_w.is_finite()) {
        return Err(StatsError::domain("ms_within", ms_w, "must be non-negative"));
    }
    if !(ss_t > 0.0 && ss_t.is_finite()) {
        return Err(StatsError::domain("ss_total", ss_t, "must be positive"));
    }
    Ok(1.0 - ms_w / (ss_t + ms_w))
}

/// Convert `value` from one effect size measure to another.
///
/// # Errors
///
/// - `UnsupportedConversion` when the pair has no closed-form relation
/// - `Domain` when `value` lies outside the range of `from`, when the
///   result would be unbounded, or when a required entry of `params` is
///   missing or out of range
pub fn es_convert(
    value: f64,
    from: EffectSize,
    to: EffectSize,
    params: &ConvertParams,
) -> StatsResult<f64> {
    use EffectSize::*;

    from.check(value)?;
    if from == to {
        return Ok(value);
    }
    let sqrt2 = std::f64::consts::SQRT_2;
    let out = match (from, to) {
        (CohenDOs, CohenD) => value * sqrt2,
        (CohenD, CohenDOs) => value / sqrt2,
        (CohenHOs, CohenH) => value * sqrt2,
        (CohenH, CohenHOs) => value / sqrt2,

        (CohenD, OddsRatio) => (value * params.or_method.factor()).exp(),
        (OddsRatio, CohenD) => value.ln() / params.or_method.factor(),

        (CohenF, EtaSq) => value * value / (1.0 + value * value),
        (EtaSq, CohenF) => {
            if value == 1.0 {
                return Err(StatsError::domain("value", value, "eta squared of 1 has no Cohen f"));
            }
            (value / (1.0 - value)).sqrt()
        }

        (CohenW, ContingencyCoefficient) => (value * value / (1.0 + value * value)).sqrt(),
        (ContingencyCoefficient, CohenW) => (value * value / (1.0 - value * value)).sqrt(),

        (CramerVGof, CohenW) => value * (need_k(params)? - 1.0).sqrt(),
        (CohenW, CramerVGof) => value / (need_k(params)? - 1.0).sqrt(),

        (EpsilonSq, EtaSq) => {
            let (n, k) = need_n_k(params)?;
            1.0 - (1.0 - value) * (n - k) / (n - 1.0)
        }
        (EtaSq, EpsilonSq) => {
            let (n, k) = need_n_k(params)?;
            (n * value - k + (1.0 - value)) / (n - k)
        }
        (EpsilonSq, OmegaSq) => value * omega_factor(params)?,
        (OmegaSq, EpsilonSq) => value / omega_factor(params)?,

        (JbmE, CohenW) => {
            let q = jbm_ratio(params)?;
            (value * (1.0 - q) / q).sqrt()
        }
        (CohenW, JbmE) => {
            let q = jbm_ratio(params)?;
            value * value * q / (1.0 - q)
        }

        (OddsRatio, YuleQ) => (value - 1.0) / (value + 1.0),
        (YuleQ, OddsRatio) | (YuleY, OddsRatio) if value == 1.0 => {
            return Err(StatsError::domain("value", value, "a perfect association has no finite odds ratio"));
        }
        (YuleQ, OddsRatio) => (1.0 + value) / (1.0 - value),
        (OddsRatio, YuleY) => (value.sqrt() - 1.0) / (value.sqrt() + 1.0),
        (YuleY, OddsRatio) => ((1.0 + value) / (1.0 - value)).powi(2),
        (YuleQ, YuleY) if value == 0.0 => 0.0,
        (YuleQ, YuleY) => (1.0 - (1.0 - value * value).sqrt()) / value,
        (YuleY, YuleQ) => 2.0 * value / (1.0 + value * value),

        (RankBiserial, Vda) => (value + 1.0) / 2.0,
        (Vda, RankBiserial) => 2.0 * value - 1.0,

        _ => {
            return Err(StatsError::UnsupportedConversion {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
    };
    if !out.is_finite() {
        return Err(StatsError::domain("value", value, "conversion has no finite result"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use EffectSize::*;

    fn params() -> ConvertParams {
        ConvertParams {
            n: Some(30.0),
            k: Some(3.0),
            ms_within: Some(4.0),
            ss_total: Some(200.0),
            e_min: Some(5.0),
            or_method: OddsRatioMethod::Chinn,
        }
    }

    #[test]
    fn test_round_trips() {
        let pairs = [
            (CohenDOs, CohenD, 0.4),
            (CohenHOs, CohenH, 0.3),
            (CohenD, OddsRatio, 0.5),
            (CohenF, EtaSq, 0.25),
            (CohenW, ContingencyCoefficient, 0.3),
            (CramerVGof, CohenW, 0.2),
            (EpsilonSq, EtaSq, 0.15),
            (EpsilonSq, OmegaSq, 0.15),
            (JbmE, CohenW, 0.05),
            (OddsRatio, YuleQ, 2.5),
            (OddsRatio, YuleY, 2.5),
            (YuleQ, YuleY, 0.4),
            (RankBiserial, Vda, -0.3),
        ];
        for method in [OddsRatioMethod::Chinn, OddsRatioMethod::Borenstein] {
            let p = ConvertParams { or_method: method, ..params() };
            for (a, b, v) in pairs {
                let there = es_convert(v, a, b, &p).unwrap();
                let back = es_convert(there, b, a, &p).unwrap();
                assert!((back - v).abs() < 1e-10, "{} -> {} -> {}", a, b, a);
            }
        }
    }

    #[test]
    fn test_known_values() {
        let p = ConvertParams::default();
        assert!((es_convert(8.0, OddsRatio, YuleQ, &p).unwrap() - 7.0 / 9.0).abs() < 1e-12);
        assert!((es_convert(9.0, OddsRatio, YuleY, &p).unwrap() - 0.5).abs() < 1e-12);
        let d = es_convert(1.0, CohenD, OddsRatio, &p).unwrap();
        assert!((d - 1.81f64.exp()).abs() < 1e-12);
        assert_eq!(es_convert(0.7, Vda, Vda, &p).unwrap(), 0.7);
    }

    #[test]
    fn test_unsupported_and_missing() {
        let p = ConvertParams::default();
        assert!(matches!(
            es_convert(0.5, CohenD, YuleQ, &p),
            Err(StatsError::UnsupportedConversion { .. })
        ));
        assert!(matches!(
            es_convert(0.2, EpsilonSq, EtaSq, &p),
            Err(StatsError::Domain { .. })
        ));
    }

    fn is_domain(result: StatsResult<f64>) -> bool {
        matches!(result, Err(StatsError::Domain { .. }))
    }

    #[test]
    fn test_out_of_range_values() {
        let p = params();
        assert!(is_domain(es_convert(-1.0, OddsRatio, CohenD, &p)));
        assert!(is_domain(es_convert(0.0, OddsRatio, YuleQ, &p)));
        assert!(is_domain(es_convert(1.0, YuleQ, OddsRatio, &p)));
        assert!(is_domain(es_convert(1.0, YuleY, OddsRatio, &p)));
        assert!(is_domain(es_convert(1.2, YuleQ, YuleY, &p)));
        assert!(is_domain(es_convert(-1.5, RankBiserial, Vda, &p)));
        assert!(is_domain(es_convert(1.1, Vda, RankBiserial, &p)));
        assert!(is_domain(es_convert(1.0, EtaSq, CohenF, &p)));
        assert!(is_domain(es_convert(-0.1, CohenF, EtaSq, &p)));
        assert!(is_domain(es_convert(1.0, ContingencyCoefficient, CohenW, &p)));
        assert!(is_domain(es_convert(1.3, CramerVGof, CohenW, &p)));
        assert!(is_domain(es_convert(f64::NAN, CohenD, CohenDOs, &p)));
        assert!(is_domain(es_convert(f64::INFINITY, CohenD, OddsRatio, &p)));
        // same-kind conversion still validates
        assert!(is_domain(es_convert(2.0, YuleQ, YuleQ, &p)));
    }

    #[test]
    fn test_edge_values() {
        let p = params();
        assert_eq!(es_convert(0.0, YuleQ, YuleY, &p).unwrap(), 0.0);
        assert_eq!(es_convert(1.0, YuleQ, YuleY, &p).unwrap(), 1.0);
        assert_eq!(es_convert(-1.0, YuleQ, YuleY, &p).unwrap(), -1.0);
        assert_eq!(es_convert(1.0, OddsRatio, CohenD, &p).unwrap(), 0.0);
        assert_eq!(es_convert(0.0, EtaSq, CohenF, &p).unwrap(), 0.0);
    }

    #[test]
    fn test_bad_params() {
        let k_one = ConvertParams { k: Some(1.0), ..params() };
        assert!(is_domain(es_convert(0.2, CohenW, CramerVGof, &k_one)));
        let small_n = ConvertParams { n: Some(3.0), ..params() };
        assert!(is_domain(es_convert(0.2, EtaSq, EpsilonSq, &small_n)));
        let big_e = ConvertParams { e_min: Some(30.0), ..params() };
        assert!(is_domain(es_convert(0.1, JbmE, CohenW, &big_e)));
        let no_ss = ConvertParams { ss_total: Some(0.0), ..params() };
        assert!(is_domain(es_convert(0.1, EpsilonSq, OmegaSq, &no_ss)));
    }
}
