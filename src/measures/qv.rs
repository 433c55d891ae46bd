//! Indices of qualitative variation for nominal data.
//!
//! All indices are computed from the category frequencies only; the
//! category labels and their order play no role.

use crate::stats::helpers::{category_counts, require_categories};
use crate::stats::{StatsError, StatsResult};

/// Index of qualitative variation, diversity or evenness.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum QvMeasure {
    /// Freeman's variation ratio
    #[default]
    Vr,
    ModVr,
    RanVr,
    AvDev,
    MnDif,
    VarNc,
    StDev,
    HRel,
    /// Kaiser's b
    B,
    /// Bulla's E
    Be,
    /// Bulla's D
    Bd,
    /// Berger-Parker
    Bpi,
    M1,
    M2,
    M3,
    M4,
    M5,
    M6,
    /// Simpson's D
    D1,
    /// Simpson's D, biased
    D2,
    /// Simpson's D as diversity
    D3,
    /// Simpson's D as diversity, biased
    D4,
    /// Hill diversity of order `a`
    Hd { a: f64 },
    /// Hill evenness: diversity of order `a` over order `b`
    He { a: f64, b: f64 },
    /// Heip evenness
    Hi,
    /// Pielou's J
    J,
    /// Sheldon evenness
    Si,
    Sw1,
    Sw2,
    Sw3,
    /// Shannon-Weaver entropy (nats)
    Swe,
    /// Rényi entropy of order `q` (bits)
    Re { q: f64 },
}

/// Value of a qualitative-variation index with its name and citation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QvResult {
    pub value: f64,
    pub label: &'static str,
    pub source: &'static str,
}

struct Freqs {
    f: Vec<f64>,
    p: Vec<f64>,
    n: f64,
    k: f64,
    fm: f64,
}

impl Freqs {
    fn shannon(&self) -> f64 {
        -self.p.iter().map(|p| p * p.ln()).sum::<f64>()
    }

    fn sum_sq_p(&self) -> f64 {
        self.p.iter().map(|p| p * p).sum()
    }

    fn abs_dev_from_mean(&self) -> f64 {
        let fmean = self.n / self.k;
        self.f.iter().map(|f| (f - fmean).abs()).sum()
    }

    fn hill(&self, a: f64) -> f64 {
        if a == 1.0 {
            self.shannon().exp()
        } else {
            self.p
                .iter()
                .map(|p| p.powf(a))
                .sum::<f64>()
                .powf(1.0 / (1.0 - a))
        }
    }

    fn bulla_o(&self) -> f64 {
        self.p.iter().map(|&p| p.min(1.0 / self.k)).sum()
    }
}

impl QvMeasure {
    fn needs_two_categories(self) -> bool {
        matches!(
            self,
            QvMeasure::ModVr
                | QvMeasure::AvDev
                | QvMeasure::MnDif
                | QvMeasure::VarNc
                | QvMeasure::StDev
                | QvMeasure::HRel
                | QvMeasure::M2
                | QvMeasure::M3
                | QvMeasure::Be
                | QvMeasure::Bd
                | QvMeasure::Hi
                | QvMeasure::J
                | QvMeasure::Sw1
                | QvMeasure::Sw2
        )
    }

    fn label(self) -> (&'static str, &'static str) {
        match self {
            QvMeasure::Vr => ("Freeman Variation Ratio", "(Freeman, 1965)"),
            QvMeasure::ModVr => ("Wilcox MODVR", "(Wilcox, 1973, p. 7)"),
            QvMeasure::RanVr => ("Wilcox RANVR", "(Wilcox, 1973, p. 8)"),
            QvMeasure::AvDev => ("Wilcox AVDEV", "(Wilcox, 1973, p. 9)"),
            QvMeasure::MnDif => ("Wilcox MNDIF", "(Wilcox, 1973, p. 9)"),
            QvMeasure::VarNc => ("Wilcox VARNC", "(Wilcox, 1973, p. 11)"),
            QvMeasure::StDev => ("Wilcox STDEV", "(Wilcox, 1973, p. 14)"),
            QvMeasure::HRel => ("Wilcox HREL", "(Wilcox, 1973, p. 16)"),
            QvMeasure::B => ("Kaiser b", "(Kaiser, 1968, p. 211)"),
            QvMeasure::Be => ("Bulla E", "(Bulla, 1994, pp. 168-169)"),
            QvMeasure::Bd => ("Bulla D", "(Bulla, 1994, p. 169)"),
            QvMeasure::Bpi => ("Berger-Parker D", "(Berger & Parker, 1970, p. 1345)"),
            QvMeasure::M1 => ("Gibbs-Poston M1", "(Gibbs & Poston, 1975, p. 471)"),
            QvMeasure::M2 => ("Gibbs-Poston M2", "(Gibbs & Poston, 1975, p. 472)"),
            QvMeasure::M3 => ("Gibbs-Poston M3", "(Gibbs & Poston, 1975, p. 472)"),
            QvMeasure::M4 => ("Gibbs-Poston M4", "(Gibbs & Poston, 1975, p. 473)"),
            QvMeasure::M5 => ("Gibbs-Poston M5", "(Gibbs & Poston, 1975, p. 474)"),
            QvMeasure::M6 => ("Gibbs-Poston M6", "(Gibbs & Poston, 1975, p. 474)"),
            QvMeasure::D1 => ("Simpson D", "(Simpson, 1949, p. 688)"),
            QvMeasure::D2 => ("Simpson D biased", "(Smith & Wilson, 1996, p. 71)"),
            QvMeasure::D3 => ("Simpson D as diversity", "(Simpson, 1949, p. 688)"),
            QvMeasure::D4 => (
                "Simpson D as diversity biased",
                "(Berger & Parker, 1970, p. 1345)",
            ),
            QvMeasure::Hd { .. } => ("Hill Diversity", "(Hill, 1973, p. 428)"),
            QvMeasure::He { .. } => ("Hill Evenness", "(Hill, 1973, p. 429)"),
            QvMeasure::Hi => ("Heip Evenness", "(Heip, 1974, p. 555)"),
            QvMeasure::J => ("Pielou J", "(Pielou, 1966, p. 141)"),
            QvMeasure::Si => ("Sheldon Evenness", "(Sheldon, 1969, p. 467)"),
            QvMeasure::Sw1 => ("Smith-Wilson Evenness Index 1", "(Smith & Wilson, 1996, p. 71)"),
            QvMeasure::Sw2 => ("Smith-Wilson Evenness Index 2", "(Smith & Wilson, 1996, p. 71)"),
            QvMeasure::Sw3 => ("Smith-Wilson Evenness Index 3", "(Smith & Wilson, 1996, p. 71)"),
            QvMeasure::Swe => ("Shannon-Weaver Entropy", "(Shannon & Weaver, 1949, p. 20)"),
            QvMeasure::Re { .. } => ("Renyi Entropy", "(Renyi, 1961, p. 549)"),
        }
    }

    fn compute(self, fr: &Freqs) -> f64 {
        let Freqs { f, p, n, k, fm } = fr;
        let (n, k, fm) = (*n, *k, *fm);
        match self {
            QvMeasure::Vr => 1.0 - fm / n,
            QvMeasure::ModVr => f.iter().map(|fi| fm - fi).sum::<f64>() / (n * (k - 1.0)),
            QvMeasure::RanVr => {
                let fl = f.iter().copied().fold(f64::INFINITY, f64::min);
                1.0 - (fm - fl) / fm
            }
            QvMeasure::AvDev => 1.0 - fr.abs_dev_from_mean() / (2.0 * n / k * (k - 1.0)),
            QvMeasure::MnDif => {
                let mut dif = 0.0;
                for i in 0..f.len() {
                    for j in i + 1..f.len() {
                        dif += (f[i] - f[j]).abs();
                    }
                }
                1.0 - dif / (n * (k - 1.0))
            }
            QvMeasure::VarNc => {
                let ss: f64 = f.iter().map(|fi| (fi - n / k).powi(2)).sum();
                1.0 - ss / (n * n * (k - 1.0) / k)
            }
            QvMeasure::StDev => {
                let ss: f64 = f.iter().map(|fi| (fi - n / k).powi(2)).sum();
                1.0 - (ss / ((n - n / k).powi(2) + (k - 1.0) * (n / k).powi(2))).sqrt()
            }
            QvMeasure::HRel => -p.iter().map(|pi| pi * pi.log2()).sum::<f64>() / k.log2(),
            QvMeasure::B => {
                let geo = (f.iter().map(|fi| (fi * k / n).ln()).sum::<f64>() / k).exp();
                1.0 - (1.0 - geo * geo).sqrt()
            }
            QvMeasure::Be | QvMeasure::Bd => {
                let o = fr.bulla_o();
                let e = (o - 1.0 / k + (k - 1.0) / n) / (1.0 - 1.0 / k + (k - 1.0) / n);
                if self == QvMeasure::Bd {
                    k * e
                } else {
                    e
                }
            }
            QvMeasure::Bpi => fm / n,
            QvMeasure::M1 => 1.0 - fr.sum_sq_p(),
            QvMeasure::M2 => (1.0 - fr.sum_sq_p()) / (1.0 - 1.0 / k),
            QvMeasure::M3 => {
                let pl = p.iter().copied().fold(f64::INFINITY, f64::min);
                (1.0 - fr.sum_sq_p() - pl) / (1.0 - 1.0 / k - pl)
            }
            QvMeasure::M4 => 1.0 - fr.abs_dev_from_mean() / (2.0 * n),
            QvMeasure::M5 => 1.0 - fr.abs_dev_from_mean() / (2.0 * (n - k + 1.0 - n / k)),
            QvMeasure::M6 => k * (1.0 - fr.abs_dev_from_mean() / (2.0 * n)),
            QvMeasure::D1 => simpson_unbiased(f, n),
            QvMeasure::D2 => fr.sum_sq_p(),
            QvMeasure::D3 => 1.0 - simpson_unbiased(f, n),
            QvMeasure::D4 => 1.0 - fr.sum_sq_p(),
            QvMeasure::Hd { a } => fr.hill(a),
            QvMeasure::He { a, b } => fr.hill(a) / fr.hill(b),
            QvMeasure::Hi => (fr.shannon().exp() - 1.0) / (k - 1.0),
            QvMeasure::J => fr.shannon() / k.ln(),
            QvMeasure::Si => fr.shannon().exp() / k,
            QvMeasure::Sw1 => (1.0 - fr.sum_sq_p()) / (1.0 - 1.0 / k),
            QvMeasure::Sw2 => -fr.sum_sq_p().ln() / k.ln(),
            QvMeasure::Sw3 => 1.0 / (fr.sum_sq_p() * k),
            QvMeasure::Swe => fr.shannon(),
            QvMeasure::Re { q } => {
                if q == 1.0 {
                    fr.shannon() / std::f64::consts::LN_2
                } else {
                    p.iter().map(|pi| pi.powf(q)).sum::<f64>().log2() / (1.0 - q)
                }
            }
        }
    }
}

fn simpson_unbiased(f: &[f64], n: f64) -> f64 {
    f.iter().map(|fi| fi * (fi - 1.0)).sum::<f64>() / (n * (n - 1.0))
}

/// Compute an index of qualitative variation.
///
/// # Errors
///
/// - `EmptySample` for empty data
/// - `Domain` when the index needs at least two categories, has a negative
///   Hill or Rényi order, or is undefined for this frequency pattern
///
/// # Examples
///
/// ```ignore
/// use survey_stats::measures::{me_qv, QvMeasure};
///
/// let r = me_qv(&["a", "a", "b", "c"], QvMeasure::M1).unwrap();
/// assert_eq!(r.label, "Gibbs-Poston M1");
/// ```
pub fn me_qv<T: Ord + Clone>(data: &[T], measure: QvMeasure) -> StatsResult<QvResult> {
    require_categories(data, "me_qv")?;
    match measure {
        QvMeasure::Hd { a } | QvMeasure::Re { q: a } if !(a >= 0.0) => {
            return Err(StatsError::domain("order", a, "order must be non-negative"));
        }
        QvMeasure::He { a, b } if !(a >= 0.0 && b >= 0.0) => {
            return Err(StatsError::domain(
                "order",
                a.min(b),
                "orders must be non-negative",
            ));
        }
        _ => {}
    }

    let f: Vec<f64> = category_counts(data).into_values().map(|c| c as f64).collect();
    let n: f64 = f.iter().sum();
    let k = f.len() as f64;
    if measure.needs_two_categories() && f.len() < 2 {
        return Err(StatsError::domain(
            "categories",
            k,
            "index needs at least two categories",
        ));
    }
    let fm = f.iter().copied().fold(0.0, f64::max);
    let p = f.iter().map(|fi| fi / n).collect();
    let freqs = Freqs { f, p, n, k, fm };

    let value = measure.compute(&freqs);
    if !value.is_finite() {
        return Err(StatsError::domain(
            "value",
            value,
            "index is undefined for this frequency pattern",
        ));
    }
    let (label, source) = measure.label();
    Ok(QvResult {
        value,
        label,
        source,
    })
}

/// Variation ratio 1 − k_m·F_mode/n, where k_m is the number of modal
/// categories. `None` when every category is equally frequent.
pub fn me_variation_ratio<T: Ord + Clone>(data: &[T]) -> StatsResult<Option<f64>> {
    require_categories(data, "me_variation_ratio")?;
    let counts = category_counts(data);
    let max = counts.values().copied().max().unwrap_or(0);
    let n_modes = counts.values().filter(|&&c| c == max).count();
    if n_modes == counts.len() {
        return Ok(None);
    }
    Ok(Some(1.0 - (n_modes as u64 * max) as f64 / data.len() as f64))
}
