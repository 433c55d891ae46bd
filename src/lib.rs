//! survey_stats - Statistics for survey data
//!
//! survey_stats provides the tests, effect sizes, correlations and descriptive
//! measures a survey analysis needs, on plain slices of scores or categories.
//! Distributions are built on `statrs` special functions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │   measures · effect_sizes · correlations · hypothesis   │
//! │              posthoc · thumb · frequency                 │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ uses
//! ┌──────────────────────────▼──────────────────────────────┐
//! │                        stats                             │
//! │   (distributions, rank null distributions, errors)      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`stats`] - Distributions, `di_*` rank distributions, errors and result records
//! - [`measures`] - `me_*` location, quartiles, dispersion, qualitative variation
//! - [`effect_sizes`] - `es_*` effect sizes and conversions between them
//! - [`correlations`] - `r_*` correlation coefficients with their tests
//! - [`hypothesis`] - `ts_*` one-sample, goodness-of-fit, two- and k-sample tests
//! - [`posthoc`] - `ph_*` pairwise follow-up tests with p-value adjustment
//! - [`thumb`] - `th_*` rules of thumb for effect sizes
//! - [`frequency`] - `tab_*` frequency tables and histogram bins
//!
//! # Missing values
//!
//! Numeric inputs use `NaN` as the missing marker. Every function removes
//! missing values first and reports [`StatsError::EmptySample`] when nothing
//! is left.
//!
//! # Example
//!
//! ```ignore
//! use survey_stats::hypothesis::ts_fisher;
//! use survey_stats::effect_sizes::{es_odds_ratio, OddsRatioCorrection};
//! use survey_stats::stats::Alternative;
//!
//! let table = [[8, 2], [1, 5]];
//! let test = ts_fisher(&table, Alternative::TwoSided)?;
//! println!("p = {:.4}", test.p_value);
//! ```

pub mod correlations;
pub mod effect_sizes;
pub mod frequency;
pub mod hypothesis;
pub mod measures;
pub mod posthoc;
pub mod stats;
pub mod thumb;

// Re-export main types for convenience
pub use stats::{
    Alternative,
    // Continuous distributions
    ChiSquared,
    // Distribution traits
    ContinuousDistribution,
    DiscreteDistribution,
    Distribution,
    FDistribution,
    Normal,
    StudentT,
    // Discrete distributions
    Binomial,
    Hypergeometric,
    Multinomial,
    // Errors and records
    PValueMethod,
    StatsError,
    StatsResult,
    TestResult,
};
