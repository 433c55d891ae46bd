//! Quartiles and quantiles.
//!
//! Every published quartile definition is expressed as a [`QuartileRule`]:
//! an index formula, a rounding rule for fractional indices and a rule for
//! whole indices, set separately for the first and third quartile. The
//! value at the final index interpolates linearly between the neighbouring
//! order statistics.

use crate::stats::helpers::{clean_sample, sorted};
use crate::stats::{StatsError, StatsResult};

/// Formula that turns n (and p) into a 1-based order-statistic index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRule {
    /// Tukey hinges: medians of the lower and upper halves, middle score
    /// included in both.
    Inclusive,
    /// Hinges with the middle score excluded from both halves.
    Exclusive,
    /// n·p
    Sas1,
    /// (n + 1)·p
    Sas4,
    /// n·p + 1/2
    Hl,
    /// (n − 1)·p + 1
    Excel,
    /// (n + 1/3)·p + 1/3
    Hf8,
    /// (n + 1/4)·p + 3/8
    Hf9,
}

impl IndexRule {
    fn is_hinge(self) -> bool {
        matches!(self, IndexRule::Inclusive | IndexRule::Exclusive)
    }

    /// Index for probability `p`. Hinge rules only answer 0.25, 0.5, 0.75.
    fn index(self, n: usize, p: f64) -> Option<f64> {
        let nf = n as f64;
        let idx = match self {
            IndexRule::Inclusive | IndexRule::Exclusive => {
                let even = n % 2 == 0;
                let inclusive = self == IndexRule::Inclusive;
                if p == 0.5 {
                    (nf + 1.0) / 2.0
                } else if p == 0.25 {
                    match (even, inclusive) {
                        (true, _) => (nf + 2.0) / 4.0,
                        (false, true) => (nf + 3.0) / 4.0,
                        (false, false) => (nf + 1.0) / 4.0,
                    }
                } else if p == 0.75 {
                    match (even, inclusive) {
                        (true, _) => (3.0 * nf + 2.0) / 4.0,
                        (false, true) => (3.0 * nf + 1.0) / 4.0,
                        (false, false) => (3.0 * nf + 3.0) / 4.0,
                    }
                } else {
                    return None;
                }
            }
            IndexRule::Sas1 => nf * p,
            IndexRule::Sas4 => (nf + 1.0) * p,
            IndexRule::Hl => nf * p + 0.5,
            IndexRule::Excel => (nf - 1.0) * p + 1.0,
            IndexRule::Hf8 => (nf + 1.0 / 3.0) * p + 1.0 / 3.0,
            IndexRule::Hf9 => (nf + 0.25) * p + 3.0 / 8.0,
        };
        Some(idx)
    }
}

/// Rounding applied to a fractional index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FracRule {
    /// Keep the fraction and interpolate.
    #[default]
    Linear,
    Down,
    Up,
    /// Round half to even.
    Bankers,
    /// Round half up.
    Nearest,
    /// Round half down.
    HalfDown,
    /// Halfway between the two neighbouring indices.
    Midpoint,
}

impl FracRule {
    fn apply(self, idx: f64) -> f64 {
        match self {
            FracRule::Linear => idx,
            FracRule::Down => idx.floor(),
            FracRule::Up => idx.ceil(),
            FracRule::Bankers => round_half_even(idx),
            FracRule::Nearest => (idx + 0.5).floor(),
            FracRule::HalfDown => (idx - 0.5).ceil(),
            FracRule::Midpoint => idx.floor() + 0.5,
        }
    }
}

fn round_half_even(x: f64) -> f64 {
    let r = x.round();
    if (x - x.trunc()).abs() == 0.5 && r % 2.0 != 0.0 {
        r - x.signum()
    } else {
        r
    }
}

/// Treatment of a whole-number index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntRule {
    /// Use the order statistic at the index.
    #[default]
    Int,
    /// Average it with the next order statistic.
    Midpoint,
}

impl IntRule {
    fn apply(self, idx: f64) -> f64 {
        match self {
            IntRule::Int => idx,
            IntRule::Midpoint => idx + 0.5,
        }
    }
}

/// A complete quartile definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuartileRule {
    pub index: IndexRule,
    pub q1_frac: FracRule,
    pub q1_int: IntRule,
    pub q3_frac: FracRule,
    pub q3_int: IntRule,
}

impl QuartileRule {
    const fn symmetric(index: IndexRule, frac: FracRule, int: IntRule) -> Self {
        Self {
            index,
            q1_frac: frac,
            q1_int: int,
            q3_frac: frac,
            q3_int: int,
        }
    }

    const fn split(index: IndexRule, q1_frac: FracRule, q3_frac: FracRule) -> Self {
        Self {
            index,
            q1_frac,
            q1_int: IntRule::Int,
            q3_frac,
            q3_int: IntRule::Int,
        }
    }
}

/// Named quartile definitions.
///
/// Alternative names used by other packages are available as associated
/// constants, e.g. [`QuartileMethod::TUKEY`] or [`QuartileMethod::R7`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuartileMethod {
    Inclusive,
    Exclusive,
    #[default]
    Sas1,
    Sas2,
    Sas3,
    Sas4,
    Sas5,
    Ms,
    Lohninger,
    Hl1,
    Hl2,
    Excel,
    Pd2,
    Pd3,
    Pd4,
    Pd5,
    Hf3b,
    Hf8,
    Hf9,
    Maple2,
    Custom(QuartileRule),
}

impl QuartileMethod {
    pub const TUKEY: Self = Self::Inclusive;
    pub const VINING: Self = Self::Inclusive;
    pub const HINGES: Self = Self::Inclusive;
    pub const JF: Self = Self::Exclusive;
    pub const CDF: Self = Self::Sas5;
    pub const AVERAGED_INVERTED_CDF: Self = Self::Sas5;
    pub const MINITAB: Self = Self::Sas4;
    pub const WEIBULL: Self = Self::Sas4;
    pub const LINEAR: Self = Self::Excel;
    pub const GUMBEL: Self = Self::Excel;
    pub const PARZEN: Self = Self::Sas1;
    pub const INTERPOLATED_INVERTED_CDF: Self = Self::Sas1;
    pub const INVERTED_CDF: Self = Self::Sas3;
    pub const CLOSEST_OBSERVATION: Self = Self::Hf3b;
    pub const HAZEN: Self = Self::Hl2;
    pub const MIDPOINT: Self = Self::Pd5;
    pub const MEDIAN_UNBIASED: Self = Self::Hf8;
    pub const NORMAL_UNBIASED: Self = Self::Hf9;
    pub const LOWER: Self = Self::Pd2;
    pub const HIGHER: Self = Self::Pd3;
    pub const NEAREST: Self = Self::Pd4;
    pub const HF1: Self = Self::Sas3;
    pub const HF2: Self = Self::Sas5;
    pub const HF3: Self = Self::Sas2;
    pub const HF4: Self = Self::Sas1;
    pub const HF5: Self = Self::Hl2;
    pub const HF6: Self = Self::Sas4;
    pub const HF7: Self = Self::Excel;
    pub const R1: Self = Self::Sas3;
    pub const R2: Self = Self::Sas5;
    pub const R3: Self = Self::Sas2;
    pub const R4: Self = Self::Sas1;
    pub const R5: Self = Self::Hl2;
    pub const R6: Self = Self::Sas4;
    pub const R7: Self = Self::Excel;
    pub const R8: Self = Self::Hf8;
    pub const R9: Self = Self::Hf9;
    pub const MAPLE1: Self = Self::Sas3;
    pub const MAPLE3: Self = Self::Sas1;
    pub const MAPLE4: Self = Self::Hl2;
    pub const MAPLE5: Self = Self::Sas4;
    pub const MAPLE6: Self = Self::Excel;
    pub const MAPLE7: Self = Self::Hf8;
    pub const MAPLE8: Self = Self::Hf9;
    pub const PD1: Self = Self::Excel;

    /// The rule behind the named method.
    pub fn rule(self) -> QuartileRule {
        use FracRule as F;
        use IndexRule as I;
        use IntRule::{Int, Midpoint};
        match self {
            Self::Inclusive => QuartileRule::symmetric(I::Inclusive, F::Linear, Int),
            Self::Exclusive => QuartileRule::symmetric(I::Exclusive, F::Linear, Int),
            Self::Sas1 => QuartileRule::symmetric(I::Sas1, F::Linear, Int),
            Self::Sas2 => QuartileRule::symmetric(I::Sas1, F::Bankers, Int),
            Self::Sas3 => QuartileRule::symmetric(I::Sas1, F::Up, Int),
            Self::Sas5 => QuartileRule::symmetric(I::Sas1, F::Up, Midpoint),
            Self::Sas4 => QuartileRule::symmetric(I::Sas4, F::Linear, Int),
            Self::Ms => QuartileRule::split(I::Sas4, F::Nearest, F::HalfDown),
            Self::Lohninger => QuartileRule::symmetric(I::Sas4, F::Nearest, Int),
            Self::Hl2 => QuartileRule::symmetric(I::Hl, F::Linear, Int),
            Self::Hl1 => QuartileRule::symmetric(I::Hl, F::Midpoint, Int),
            Self::Excel => QuartileRule::symmetric(I::Excel, F::Linear, Int),
            Self::Pd2 => QuartileRule::symmetric(I::Excel, F::Down, Int),
            Self::Pd3 => QuartileRule::symmetric(I::Excel, F::Up, Int),
            Self::Pd4 => QuartileRule::split(I::Excel, F::HalfDown, F::Nearest),
            Self::Hf3b => QuartileRule::split(I::Sas1, F::Nearest, F::HalfDown),
            Self::Pd5 => QuartileRule::symmetric(I::Excel, F::Midpoint, Int),
            Self::Hf8 => QuartileRule::symmetric(I::Hf8, F::Linear, Int),
            Self::Hf9 => QuartileRule::symmetric(I::Hf9, F::Linear, Int),
            Self::Maple2 => QuartileRule::symmetric(I::Hl, F::Down, Int),
            Self::Custom(rule) => rule,
        }
    }
}

/// First and third quartile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

/// Value at a (possibly fractional) 1-based index of sorted data. Indices
/// outside [1, n] are clamped.
fn value_at(x: &[f64], idx: f64) -> f64 {
    let n = x.len() as f64;
    let idx = idx.clamp(1.0, n);
    let lo = idx.floor();
    let hi = idx.ceil();
    let a = x[lo as usize - 1];
    if lo == hi {
        return a;
    }
    let b = x[hi as usize - 1];
    a + (idx - lo) * (b - a)
}

fn resolve_index(raw: f64, frac: FracRule, int: IntRule) -> f64 {
    if raw == raw.round() {
        int.apply(raw)
    } else {
        frac.apply(raw)
    }
}

fn quantile_sorted(x: &[f64], p: f64, rule: &QuartileRule) -> StatsResult<f64> {
    let raw = rule.index.index(x.len(), p).ok_or_else(|| {
        StatsError::invalid_option(
            &format!("{:?}", rule.index),
            "hinge-based index rules only define the quartiles and the median",
        )
    })?;
    let (frac, int) = if p <= 0.5 {
        (rule.q1_frac, rule.q1_int)
    } else {
        (rule.q3_frac, rule.q3_int)
    };
    Ok(value_at(x, resolve_index(raw, frac, int)))
}

/// First and third quartile of the sample.
///
/// # Examples
///
/// ```ignore
/// use survey_stats::measures::{me_quartiles, QuartileMethod};
///
/// let q = me_quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], QuartileMethod::TUKEY).unwrap();
/// assert_eq!((q.q1, q.q3), (2.5, 6.5));
/// ```
pub fn me_quartiles(data: &[f64], method: QuartileMethod) -> StatsResult<Quartiles> {
    let x = sorted(&clean_sample(data, "me_quartiles")?);
    let rule = method.rule();
    Ok(Quartiles {
        q1: quantile_sorted(&x, 0.25, &rule)?,
        q3: quantile_sorted(&x, 0.75, &rule)?,
    })
}

/// Quantile at probability `p` with the given definition. The first
/// quartile's rounding rules apply up to the median, the third quartile's
/// above it.
///
/// # Errors
///
/// - `Domain` when `p` is outside [0, 1]
/// - `InvalidOption` for hinge rules at any p other than 0.25, 0.5, 0.75
pub fn me_quantile(data: &[f64], p: f64, method: QuartileMethod) -> StatsResult<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::domain("p", p, "probability must be in [0, 1]"));
    }
    let x = sorted(&clean_sample(data, "me_quantile")?);
    let rule = method.rule();
    if rule.index.is_hinge() && ![0.25, 0.5, 0.75].contains(&p) {
        return Err(StatsError::invalid_option(
            &format!("{:?}", method),
            "hinge-based index rules only define the quartiles and the median",
        ));
    }
    quantile_sorted(&x, p, &rule)
}

/// Spread measure based on the quartiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuartileRange {
    /// Interquartile range q3 − q1 (the H-spread for hinge methods).
    #[default]
    Iqr,
    /// Semi-interquartile range (quartile deviation) (q3 − q1)/2.
    Siqr,
    /// Mid-quartile range (q1 + q3)/2.
    Mqr,
}

/// Quartile-based range with the quartiles it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuartileRangeResult {
    pub q1: f64,
    pub q3: f64,
    pub value: f64,
}

pub fn me_quartile_range(
    data: &[f64],
    measure: QuartileRange,
    method: QuartileMethod,
) -> StatsResult<QuartileRangeResult> {
    let Quartiles { q1, q3 } = me_quartiles(data, method)?;
    let value = match measure {
        QuartileRange::Iqr => q3 - q1,
        QuartileRange::Siqr => (q3 - q1) / 2.0,
        QuartileRange::Mqr => (q1 + q3) / 2.0,
    };
    Ok(QuartileRangeResult { q1, q3, value })
}
