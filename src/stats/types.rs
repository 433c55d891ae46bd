//! Result records and options shared by the test families.

/// Result of a hypothesis test.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Test statistic value
    pub statistic: f64,
    /// Degrees of freedom, when the reference distribution has them
    pub df: Option<f64>,
    /// P-value: probability of obtaining a result at least as extreme
    pub p_value: f64,
    /// Name of the test variant that produced the result
    pub test: String,
}

impl TestResult {
    pub(crate) fn new(statistic: f64, df: Option<f64>, p_value: f64, test: impl Into<String>) -> Self {
        Self {
            statistic,
            df,
            p_value: p_value.clamp(0.0, 1.0),
            test: test.into(),
        }
    }
}

/// Direction of the alternative hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alternative {
    #[default]
    TwoSided,
    Less,
    Greater,
}
