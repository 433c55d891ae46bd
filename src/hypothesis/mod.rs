//! Hypothesis tests (`ts_*`).
//!
//! Grouped by design: one-sample binary, one-sample ordinal or scale,
//! goodness of fit, contingency tables, two samples and k samples. All
//! p-values are two-sided unless an [`Alternative`](crate::stats::Alternative)
//! says otherwise, and missing values (`NaN`) are removed before testing.
//!
//! Tests with a single reference distribution return
//! [`TestResult`](crate::stats::TestResult); the others return a record
//! that also carries the inputs a reader needs to interpret the statistic.

mod binary;
mod contingency;
mod gof;
mod k_sample;
mod one_sample;
mod two_sample;

pub use binary::{TwoSidedMethod, ts_binomial_os, ts_score_os, ts_wald_os};
pub use contingency::{ts_fisher, ts_powerdivergence_ind};
pub use gof::{
    FREEMAN_TUKEY_READ_WEIGHTS, GofCorrection, GofResult, Lambda, ts_freeman_tukey_gof,
    ts_freeman_tukey_read_gof, ts_g_gof, ts_mod_log_likelihood_gof, ts_multinomial_gof,
    ts_neyman_gof, ts_pearson_gof, ts_powerdivergence_gof,
};
pub use k_sample::{
    AnovaResult, ts_cochran_q, ts_fisher_owa, ts_friedman, ts_kruskal_wallis, ts_mood_median,
    ts_welch_owa,
};
pub use one_sample::{
    LocationResult, TrimmedSe, TrinomialResult, WilcoxonApprox, WilcoxonOptions, WilcoxonResult,
    ZeroMethod, ts_sign_os, ts_student_t_os, ts_trimmed_mean_os, ts_trinomial_os, ts_wilcoxon_os,
    ts_z_os,
};
pub use two_sample::{ts_mann_whitney, ts_student_t_is, ts_wilcoxon_ps, ts_welch_t_is};

pub(crate) use binary::binomial_two_sided;
pub(crate) use k_sample::{block_rank_sums, check_binary_blocks, median_table};
