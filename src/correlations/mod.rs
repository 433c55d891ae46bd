//! Correlation coefficients (`r_*`) and their significance tests.
//!
//! Paired inputs are two equally long slices; a pair with a missing side is
//! dropped. Pearson, Spearman and Kendall are symmetric in their inputs.

mod linear;
mod rank;

pub use linear::{PearsonTest, r_pearson, r_rosenthal};
pub use rank::{
    KendallVariant, RankBiserialOs, SpearmanTest, r_kendall_tau, r_rank_biserial_is,
    r_rank_biserial_os, r_spearman_rho,
};

/// Correlation coefficient with its test.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationResult {
    /// The coefficient
    pub r: f64,
    /// Test statistic (t, z, D or S depending on `test`)
    pub statistic: f64,
    pub df: Option<f64>,
    /// Two-sided p-value
    pub p_value: f64,
    /// Variant that produced the p-value
    pub test: String,
}

impl CorrelationResult {
    fn new(r: f64, statistic: f64, df: Option<f64>, p_value: f64, test: impl Into<String>) -> Self {
        Self {
            r,
            statistic,
            df,
            p_value: p_value.clamp(0.0, 1.0),
            test: test.into(),
        }
    }
}
