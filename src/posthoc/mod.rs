//! Post-hoc pairwise tests (`ph_*`).
//!
//! Each function follows one omnibus test from [`crate::hypothesis`] and
//! compares every pair (i, j), i < j, in label order. The raw p-values of
//! the family are adjusted together with an [`Adjustment`], where the
//! family size is m = k(k−1)/2.

mod adjust;
mod pairwise;

pub use adjust::{Adjustment, adjust_p_values};
pub use pairwise::{
    BinomialPairResult, PairwiseResult, ph_binomial, ph_cochran_mcnemar, ph_dunn,
    ph_friedman_conover, ph_mood_median,
};
