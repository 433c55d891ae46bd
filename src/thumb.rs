//! Rules of thumb (`th_*`) that put a verbal label on an effect size.
//!
//! Each rule is a published cut-off table applied to the absolute value:
//! a value falls in the first class whose upper bound it stays below, so
//! lower bounds are inclusive.
//!
//! ```ignore
//! use survey_stats::thumb::{th_cohen_d, CohenDRule};
//!
//! let label = th_cohen_d(0.45, CohenDRule::Cohen)?;
//! assert_eq!(label.classification, "small");
//! ```

use crate::stats::{StatsError, StatsResult};

/// A classification with the publication its cut-offs come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpretation {
    pub classification: &'static str,
    pub reference: &'static str,
}

/// Upper bounds (exclusive) with their label, then the label above all.
struct Scale {
    cuts: &'static [(f64, &'static str)],
    top: &'static str,
    reference: &'static str,
}

impl Scale {
    fn classify(&self, value: f64, name: &str) -> StatsResult<Interpretation> {
        if !value.is_finite() {
            return Err(StatsError::domain(name, value, "must be finite"));
        }
        let v = value.abs();
        let classification = self
            .cuts
            .iter()
            .find(|(bound, _)| v < *bound)
            .map_or(self.top, |&(_, label)| label);
        Ok(Interpretation {
            classification,
            reference: self.reference,
        })
    }
}

const COHEN_1988_D: Scale = Scale {
    cuts: &[(0.2, "negligible"), (0.5, "small"), (0.8, "medium")],
    top: "large",
    reference: "Cohen (1988, p. 40)",
};

/// Cut-off tables for Cohen's d.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CohenDRule {
    Cohen,
    Lovakov,
    Rosenthal,
    #[default]
    Sawilowsky,
}

impl CohenDRule {
    fn scale(self) -> Scale {
        match self {
            CohenDRule::Cohen => COHEN_1988_D,
            CohenDRule::Lovakov => Scale {
                cuts: &[(0.15, "negligible"), (0.35, "small"), (0.65, "medium")],
                top: "large",
                reference: "Lovakov and Agadullina (2021, p. 501)",
            },
            CohenDRule::Rosenthal => Scale {
                cuts: &[
                    (0.2, "negligible"),
                    (0.5, "small"),
                    (0.8, "medium"),
                    (1.3, "large"),
                ],
                top: "very large",
                reference: "Rosenthal (1996, p. 45)",
            },
            CohenDRule::Sawilowsky => Scale {
                cuts: &[
                    (0.01, "negligible"),
                    (0.2, "very small"),
                    (0.5, "small"),
                    (0.8, "medium"),
                    (1.2, "large"),
                    (2.0, "very large"),
                ],
                top: "huge",
                reference: "Sawilowsky (2009, p. 599)",
            },
        }
    }
}

/// Classify a Cohen's d (or another standardized mean difference).
pub fn th_cohen_d(d: f64, rule: CohenDRule) -> StatsResult<Interpretation> {
    rule.scale().classify(d, "d")
}

/// Cut-off tables for Cohen's g.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CohenGRule {
    #[default]
    Cohen,
}

pub fn th_cohen_g(g: f64, rule: CohenGRule) -> StatsResult<Interpretation> {
    let scale = match rule {
        CohenGRule::Cohen => Scale {
            cuts: &[(0.05, "negligible"), (0.15, "small"), (0.25, "medium")],
            top: "large",
            reference: "Cohen (1988, pp. 147-149)",
        },
    };
    scale.classify(g, "g")
}

/// Cut-off tables for Cohen's h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CohenHRule {
    #[default]
    Cohen,
}

pub fn th_cohen_h(h: f64, rule: CohenHRule) -> StatsResult<Interpretation> {
    let scale = match rule {
        CohenHRule::Cohen => Scale {
            reference: "Cohen (1988, p. 198)",
            ..COHEN_1988_D
        },
    };
    scale.classify(h, "h")
}

/// Cut-off tables for Cohen's w.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CohenWRule {
    #[default]
    Cohen,
}

pub fn th_cohen_w(w: f64, rule: CohenWRule) -> StatsResult<Interpretation> {
    let scale = match rule {
        CohenWRule::Cohen => Scale {
            cuts: &[(0.1, "negligible"), (0.3, "small"), (0.5, "medium")],
            top: "large",
            reference: "Cohen (1988, p. 227)",
        },
    };
    scale.classify(w, "w")
}

/// Cut-off tables for a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PearsonRule {
    #[default]
    Bartz,
    Rafter,
    Cohen,
    Rumsey,
    /// Gignac and Szodorai, identical to Hemphill
    Gignac,
    Lovakov,
    Rosenthal,
    Agnes,
    Disha,
    Hopkins,
    Funder,
}

impl PearsonRule {
    fn scale(self) -> Scale {
        match self {
            PearsonRule::Bartz => Scale {
                cuts: &[(0.2, "very low"), (0.4, "low"), (0.6, "moderate"), (0.8, "strong")],
                top: "very high",
                reference: "Bartz (1999, p. 184, as cited in Warmbrod 2001)",
            },
            PearsonRule::Rafter => Scale {
                cuts: &[(0.25, "weak"), (0.75, "moderate")],
                top: "strong",
                reference: "Rafter et al. (2003, p. 194)",
            },
            PearsonRule::Cohen => Scale {
                cuts: &[(0.1, "negligible"), (0.3, "small"), (0.5, "medium")],
                top: "large",
                reference: "Cohen (1988, p. 82)",
            },
            PearsonRule::Rumsey => Scale {
                cuts: &[(0.3, "negligible"), (0.5, "weak"), (0.7, "moderate")],
                top: "strong",
                reference: "Rumsey (2011, p. 284)",
            },
            PearsonRule::Gignac => Scale {
                cuts: &[(0.1, "negligible"), (0.2, "small"), (0.3, "medium")],
                top: "large",
                reference: "Gignac and Szodorai (2016, p. 75); Hemphill (2003, p. 78)",
            },
            PearsonRule::Lovakov => Scale {
                cuts: &[(0.12, "negligible"), (0.24, "small"), (0.41, "medium")],
                top: "large",
                reference: "Lovakov and Agadullina (2021, p. 514)",
            },
            PearsonRule::Rosenthal => Scale {
                cuts: &[
                    (0.1, "negligible"),
                    (0.3, "small"),
                    (0.5, "medium"),
                    (0.7, "large"),
                ],
                top: "very large",
                reference: "Rosenthal (1996, p. 45)",
            },
            PearsonRule::Agnes => Scale {
                cuts: &[
                    (0.2, "negligible"),
                    (0.4, "low"),
                    (0.6, "moderate"),
                    (0.8, "marked"),
                ],
                top: "high",
                reference: "Agnes (2011)",
            },
            PearsonRule::Disha => Scale {
                cuts: &[
                    (0.1, "markedly low and negligible"),
                    (0.3, "very low"),
                    (0.5, "low"),
                    (0.7, "moderate"),
                    (0.9, "high"),
                ],
                top: "very high",
                reference: "Disha (2016)",
            },
            PearsonRule::Hopkins => Scale {
                cuts: &[
                    (0.1, "trivial"),
                    (0.3, "low"),
                    (0.5, "moderate"),
                    (0.7, "high"),
                    (0.9, "very large"),
                ],
                top: "nearly perfect",
                reference: "Hopkins (1997, as cited in Warmbrod 2001)",
            },
            PearsonRule::Funder => Scale {
                cuts: &[
                    (0.05, "negligible"),
                    (0.1, "very small"),
                    (0.2, "small"),
                    (0.3, "medium"),
                    (0.4, "large"),
                ],
                top: "very large",
                reference: "Funder and Ozer (2019, p. 166)",
            },
        }
    }
}

/// Classify a correlation coefficient.
pub fn th_pearson_r(r: f64, rule: PearsonRule) -> StatsResult<Interpretation> {
    rule.scale().classify(r, "r")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn label_d(d: f64, rule: CohenDRule) -> &'static str {
        th_cohen_d(d, rule).unwrap().classification
    }

    #[test]
    fn test_cohen_d_rules() {
        assert_eq!(label_d(0.45, CohenDRule::Cohen), "small");
        assert_eq!(label_d(-0.45, CohenDRule::Lovakov), "medium");
        assert_eq!(label_d(1.5, CohenDRule::Rosenthal), "very large");
        assert_eq!(label_d(2.5, CohenDRule::default()), "huge");
        assert_eq!(label_d(0.005, CohenDRule::Sawilowsky), "negligible");
    }

    #[test]
    fn test_lower_bound_inclusive() {
        assert_eq!(label_d(0.2, CohenDRule::Cohen), "small");
        assert_eq!(label_d(0.8, CohenDRule::Cohen), "large");
        assert_eq!(th_cohen_w(0.3, CohenWRule::Cohen).unwrap().classification, "medium");
    }

    #[test]
    fn test_single_rule_scales() {
        let g = th_cohen_g(0.1, CohenGRule::Cohen).unwrap();
        assert_eq!(g.classification, "small");
        assert_eq!(g.reference, "Cohen (1988, pp. 147-149)");
        let h = th_cohen_h(0.41151684606748784, CohenHRule::Cohen).unwrap();
        assert_eq!(
            h,
            Interpretation {
                classification: "small",
                reference: "Cohen (1988, p. 198)",
            }
        );
        assert_eq!(th_cohen_w(0.05, CohenWRule::Cohen).unwrap().classification, "negligible");
    }

    #[test]
    fn test_pearson_rules() {
        let r = 0.7818181818181819;
        let label = |rule| th_pearson_r(r, rule).unwrap().classification;
        assert_eq!(label(PearsonRule::Bartz), "strong");
        assert_eq!(label(PearsonRule::Rafter), "strong");
        assert_eq!(label(PearsonRule::Rumsey), "strong");
        assert_eq!(label(PearsonRule::Agnes), "marked");
        assert_eq!(label(PearsonRule::Disha), "high");
        assert_eq!(label(PearsonRule::Hopkins), "very large");
        assert_eq!(label(PearsonRule::Funder), "very large");
        assert_eq!(th_pearson_r(-0.15, PearsonRule::Gignac).unwrap().classification, "small");
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            th_pearson_r(f64::NAN, PearsonRule::Cohen),
            Err(StatsError::Domain { .. })
        ));
        assert!(th_cohen_d(f64::INFINITY, CohenDRule::Cohen).is_err());
    }
}
