//! Multiple-comparison adjustment of p-values.

/// Family-wise adjustment applied to the pairwise p-values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adjustment {
    None,
    /// p·m, capped at 1
    #[default]
    Bonferroni,
    /// Holm-Bonferroni step-down
    Holm,
    /// 1 − (1 − p)^m
    Sidak,
}

/// Adjust a family of p-values, keeping their order.
pub fn adjust_p_values(p: &[f64], method: Adjustment) -> Vec<f64> {
    let m = p.len() as f64;
    match method {
        Adjustment::None => p.to_vec(),
        Adjustment::Bonferroni => p.iter().map(|&v| (v * m).min(1.0)).collect(),
        Adjustment::Sidak => p.iter().map(|&v| 1.0 - (1.0 - v).powf(m)).collect(),
        Adjustment::Holm => {
            let mut order: Vec<usize> = (0..p.len()).collect();
            order.sort_by(|&a, &b| p[a].total_cmp(&p[b]));
            let mut out = vec![0.0; p.len()];
            let mut running: f64 = 0.0;
            for (step, &i) in order.iter().enumerate() {
                // step-down values never decrease
                running = running.max(((m - step as f64) * p[i]).min(1.0));
                out[i] = running;
            }
            out
        }
    }
}
