//! Discrete probability distributions.

mod binomial;
mod hypergeometric;
mod multinomial;

pub use binomial::Binomial;
pub use hypergeometric::Hypergeometric;
pub use multinomial::Multinomial;

/// Helper for computing log-binomial coefficients.
pub(crate) fn log_binom(n: u64, k: u64) -> f64 {
    use super::continuous::special::lgamma;

    if k > n {
        return f64::NEG_INFINITY;
    }
    if k == 0 || k == n {
        return 0.0;
    }

    let n_f = n as f64;
    let k_f = k as f64;

    lgamma(n_f + 1.0) - lgamma(k_f + 1.0) - lgamma(n_f - k_f + 1.0)
}

/// Log of the multinomial coefficient n! / (x₁! ⋯ xₖ!).
pub(crate) fn log_multinom(counts: &[u64]) -> f64 {
    use super::continuous::special::lgamma;

    let n: u64 = counts.iter().sum();
    counts
        .iter()
        .fold(lgamma(n as f64 + 1.0), |acc, &x| acc - lgamma(x as f64 + 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_binom() {
        // C(5, 2) = 10
        assert!((log_binom(5, 2).exp() - 10.0).abs() < 1e-10);

        // C(10, 5) = 252
        assert!((log_binom(10, 5).exp() - 252.0).abs() < 1e-6);

        assert!((log_binom(5, 0) - 0.0).abs() < 1e-10);
        assert!((log_binom(5, 5) - 0.0).abs() < 1e-10);
        assert!(log_binom(3, 5).is_infinite());
    }

    #[test]
    fn test_log_multinom() {
        // 6! / (2! 1! 3!) = 60
        assert!((log_multinom(&[2, 1, 3]).exp() - 60.0).abs() < 1e-8);
        assert!(log_multinom(&[0, 0]).abs() < 1e-12);
    }
}
