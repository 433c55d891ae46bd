//! Descriptive measures (`me_*`).
//!
//! Location, quartiles, dispersion and qualitative variation for numeric,
//! ordinal and nominal survey samples. Numeric samples are `&[f64]` with
//! `NaN` as the missing marker; nominal samples are any `Ord` category
//! type; ordinal samples come with an explicit `levels` order.
//!
//! ```ignore
//! use survey_stats::measures::{me_quartiles, QuartileMethod};
//!
//! let q = me_quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], QuartileMethod::TUKEY)?;
//! assert_eq!((q.q1, q.q3), (2.5, 6.5));
//! ```

mod dispersion;
mod location;
mod mean;
mod quartiles;
mod qv;

pub use dispersion::{
    Center, VarianceType, me_consensus, me_consensus_levels, me_mean_absolute_deviation,
    me_range, me_standard_deviation, me_variance,
};
pub use location::{
    AllEqual, LevelMedian, MedianLabel, ModalBin, ModeBinResult, ModeBinValue, ModeResult,
    TieBreak, me_median, me_median_levels, me_mode, me_mode_bin,
};
pub use mean::{MeanType, TrimFrac, me_mean};
pub use quartiles::{
    FracRule, IndexRule, IntRule, QuartileMethod, QuartileRange, QuartileRangeResult,
    QuartileRule, Quartiles, me_quantile, me_quartile_range, me_quartiles,
};
pub use qv::{QvMeasure, QvResult, me_qv, me_variation_ratio};

pub(crate) use location::level_codes;
pub(crate) use mean::trimmed_mean;
