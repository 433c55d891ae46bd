//! Effect sizes (`es_*`).
//!
//! Standardized, sample-size-independent magnitudes for binary,
//! contingency, one-sample and group designs, plus [`es_convert`] between
//! measures with a closed-form relation. Interpretation labels come from
//! the [`crate::thumb`] functions.

mod contingency;
mod convert;
mod proportion;
mod standardized;

pub use contingency::{JbmStatistic, es_cohen_w, es_cramer_v_gof, es_cramer_v_ind, es_jbm_e};
pub use convert::{ConvertParams, EffectSize, OddsRatioMethod, es_convert};
pub use proportion::{
    AltRatio, OddsRatioCorrection, es_alt_ratio, es_cohen_g, es_cohen_h_os, es_odds_ratio,
};
pub use standardized::{
    AnovaEffect, Dominance, HedgesCorrection, es_anova_owa, es_cohen_d, es_cohen_d_os,
    es_dominance, es_hedges_g_os,
};
