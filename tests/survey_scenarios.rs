//! Cross-family scenarios on small survey samples.

use std::collections::BTreeMap;
use std::fmt::Debug;

use pretty_assertions::assert_eq;
use survey_stats::correlations::{
    KendallVariant, PearsonTest, SpearmanTest, r_kendall_tau, r_pearson, r_spearman_rho,
};
use survey_stats::effect_sizes::{
    ConvertParams, EffectSize, OddsRatioCorrection, OddsRatioMethod, es_convert, es_odds_ratio,
};
use survey_stats::hypothesis::{
    FREEMAN_TUKEY_READ_WEIGHTS, GofCorrection, Lambda, TwoSidedMethod, WilcoxonOptions,
    ts_binomial_os, ts_cochran_q, ts_fisher, ts_fisher_owa, ts_freeman_tukey_gof,
    ts_freeman_tukey_read_gof, ts_friedman, ts_g_gof, ts_kruskal_wallis, ts_mann_whitney,
    ts_mod_log_likelihood_gof, ts_mood_median, ts_multinomial_gof, ts_neyman_gof, ts_pearson_gof,
    ts_powerdivergence_gof, ts_powerdivergence_ind, ts_score_os, ts_sign_os, ts_student_t_is,
    ts_student_t_os, ts_trimmed_mean_os, ts_trinomial_os, ts_wald_os, ts_welch_owa,
    ts_welch_t_is, ts_wilcoxon_os, ts_wilcoxon_ps, ts_z_os, TrimmedSe,
};
use survey_stats::measures::{
    AllEqual, Center, MeanType, ModeBinValue, QuartileMethod, QuartileRange, QvMeasure, TieBreak,
    VarianceType, me_consensus, me_mean, me_mean_absolute_deviation, me_median, me_mode,
    me_mode_bin, me_quantile, me_quartile_range, me_quartiles, me_qv, me_range,
    me_standard_deviation, me_variance, me_variation_ratio,
};
use survey_stats::posthoc::{Adjustment, ph_dunn};
use survey_stats::stats::{di_mann_whitney, di_wilcoxon_signed_rank};
use survey_stats::thumb::{CohenWRule, th_cohen_w};
use survey_stats::{Alternative, PValueMethod, StatsError, StatsResult};

const FISHER_TABLE: [[u64; 2]; 2] = [[10, 5], [3, 12]];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn is_empty_error<T: Debug>(result: StatsResult<T>) -> bool {
    matches!(result, Err(StatsError::EmptySample { .. }))
}

#[test]
fn test_fisher_textbook_table() {
    let two = ts_fisher(&FISHER_TABLE, Alternative::TwoSided).unwrap();
    assert!((two.p_value - 0.0253277).abs() < 1e-6);
    let greater = ts_fisher(&FISHER_TABLE, Alternative::Greater).unwrap();
    assert!((greater.p_value - 0.0126638).abs() < 1e-6);
    assert_eq!(two.statistic, 10.0);

    let or = es_odds_ratio(&FISHER_TABLE, OddsRatioCorrection::None).unwrap();
    assert!((or - 8.0).abs() < 1e-12);
}

#[test]
fn test_mean_and_median_of_one_to_five() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(me_mean(&data, MeanType::Arithmetic).unwrap(), 3.0);
    for tie in [TieBreak::Between, TieBreak::Low, TieBreak::High] {
        assert_eq!(me_median(&data, tie).unwrap(), 3.0);
    }
}

#[test]
fn test_empty_sample_for_every_measure() {
    let none: [f64; 0] = [];
    let missing = [f64::NAN, f64::NAN];
    let labels: [&str; 0] = [];
    let method = QuartileMethod::default();

    for data in [&none[..], &missing[..]] {
        assert!(is_empty_error(me_mean(data, MeanType::Arithmetic)));
        assert!(is_empty_error(me_median(data, TieBreak::Between)));
        assert!(is_empty_error(me_quartiles(data, method)));
        assert!(is_empty_error(me_quantile(data, 0.3, method)));
        assert!(is_empty_error(me_quartile_range(data, QuartileRange::Iqr, method)));
        assert!(is_empty_error(me_variance(data, VarianceType::Sample)));
        assert!(is_empty_error(me_standard_deviation(data, VarianceType::Population)));
        assert!(is_empty_error(me_range(data)));
        assert!(is_empty_error(me_mean_absolute_deviation(data, Center::Mean)));
        assert!(is_empty_error(me_consensus(data)));
        assert!(is_empty_error(me_mode_bin(
            data,
            &[(0.0, 5.0)],
            AllEqual::default(),
            ModeBinValue::default()
        )));
    }
    assert!(is_empty_error(me_mode(&labels, AllEqual::default())));
    assert!(is_empty_error(me_qv(&labels, QvMeasure::default())));
    assert!(is_empty_error(me_variation_ratio(&labels)));
}

#[test]
fn test_empty_sample_for_every_test() {
    let none: [f64; 0] = [];
    let some = [1.0, 2.0, 3.0];
    let labels: [&str; 0] = [];
    let no_groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

    assert!(is_empty_error(ts_binomial_os(&labels, None, 0.5, TwoSidedMethod::default())));
    assert!(is_empty_error(ts_score_os(&labels, None, 0.5, false)));
    assert!(is_empty_error(ts_wald_os(&labels, None, 0.5, false)));
    assert!(is_empty_error(ts_pearson_gof(&labels, None, GofCorrection::None)));
    assert!(is_empty_error(ts_multinomial_gof(&labels, None)));
    assert!(is_empty_error(ts_g_gof(&labels, None, GofCorrection::None)));
    assert!(is_empty_error(ts_freeman_tukey_gof(&labels, None, GofCorrection::None)));
    assert!(is_empty_error(ts_freeman_tukey_read_gof(
        &labels,
        None,
        &FREEMAN_TUKEY_READ_WEIGHTS,
        GofCorrection::None
    )));
    assert!(is_empty_error(ts_neyman_gof(&labels, None, GofCorrection::None)));
    assert!(is_empty_error(ts_mod_log_likelihood_gof(&labels, None, GofCorrection::None)));
    assert!(is_empty_error(ts_powerdivergence_gof(
        &labels,
        None,
        Lambda::CressieRead,
        GofCorrection::None
    )));

    assert!(is_empty_error(ts_sign_os(&none, None, PValueMethod::Auto)));
    assert!(is_empty_error(ts_wilcoxon_os(&none, WilcoxonOptions::default())));
    assert!(is_empty_error(ts_trinomial_os(&none, None)));
    assert!(is_empty_error(ts_student_t_os(&none, None)));
    assert!(is_empty_error(ts_z_os(&none, None, Some(1.0))));
    assert!(is_empty_error(ts_trimmed_mean_os(&none, None, 0.2, TrimmedSe::Yuen)));

    assert!(is_empty_error(ts_student_t_is(&none, &some)));
    assert!(is_empty_error(ts_welch_t_is(&some, &none)));
    assert!(is_empty_error(ts_mann_whitney(&none, &some, PValueMethod::Auto, false)));
    assert!(is_empty_error(ts_wilcoxon_ps(&none, &none, WilcoxonOptions::default())));

    assert!(is_empty_error(ts_fisher_owa(&no_groups)));
    assert!(is_empty_error(ts_welch_owa(&no_groups)));
    assert!(is_empty_error(ts_kruskal_wallis(&no_groups, true)));
    assert!(is_empty_error(ts_mood_median(&no_groups)));
    assert!(is_empty_error(ts_fisher(&[[0, 0], [0, 0]], Alternative::TwoSided)));
    assert!(is_empty_error(ts_powerdivergence_ind(&[], Lambda::Pearson, GofCorrection::None)));
    assert!(is_empty_error(ts_powerdivergence_ind(
        &[vec![0, 0], vec![0, 0]],
        Lambda::Pearson,
        GofCorrection::None
    )));

    assert!(is_empty_error(ts_friedman(&[])));
    assert!(is_empty_error(ts_friedman(&[vec![f64::NAN, 1.0], vec![2.0, f64::NAN]])));
    assert!(is_empty_error(ts_cochran_q(&[])));
}

#[test]
fn test_infinite_values_are_domain_errors() {
    let is_domain = |r: StatsResult<()>| matches!(r, Err(StatsError::Domain { .. }));
    let bad = [1.0, 2.0, f64::INFINITY];
    let fine = [1.0, 2.0, 3.0];
    assert!(is_domain(me_mean(&bad, MeanType::Arithmetic).map(|_| ())));
    assert!(is_domain(ts_sign_os(&bad, None, PValueMethod::Auto).map(|_| ())));
    assert!(is_domain(ts_welch_t_is(&fine, &bad).map(|_| ())));
    assert!(is_domain(r_pearson(&fine, &bad, PearsonTest::StudentT).map(|_| ())));
    let groups = BTreeMap::from([("a", fine.to_vec()), ("b", vec![f64::NEG_INFINITY, 4.0])]);
    assert!(is_domain(ts_kruskal_wallis(&groups, true).map(|_| ())));
    assert!(is_domain(ts_friedman(&[fine.to_vec(), bad.to_vec()]).map(|_| ())));
}

#[test]
fn test_convert_round_trips() {
    use EffectSize::*;

    let params = ConvertParams {
        n: Some(40.0),
        k: Some(4.0),
        ms_within: Some(2.5),
        ss_total: Some(120.0),
        e_min: Some(6.0),
        or_method: OddsRatioMethod::Borenstein,
    };
    let cases = [
        (CohenDOs, CohenD, 0.35),
        (CohenHOs, CohenH, -0.2),
        (CohenD, OddsRatio, 0.6),
        (CohenF, EtaSq, 0.3),
        (CohenW, ContingencyCoefficient, 0.25),
        (CramerVGof, CohenW, 0.18),
        (EpsilonSq, EtaSq, 0.1),
        (EpsilonSq, OmegaSq, 0.1),
        (JbmE, CohenW, 0.02),
        (OddsRatio, YuleQ, 3.0),
        (OddsRatio, YuleY, 0.5),
        (YuleQ, YuleY, -0.3),
        (RankBiserial, Vda, 0.45),
    ];
    for (a, b, value) in cases {
        let there = es_convert(value, a, b, &params).unwrap();
        let back = es_convert(there, b, a, &params).unwrap();
        assert!((back - value).abs() < 1e-10, "{} -> {} -> {}", a, b, a);
    }
    assert!(matches!(
        es_convert(0.3, CohenD, YuleQ, &params),
        Err(StatsError::UnsupportedConversion { .. })
    ));
}

#[test]
fn test_correlations_symmetric() {
    let x = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    let y = [2.0, 7.0, 1.0, 8.0, 2.0, 8.0, 1.0, 8.0];

    let p1 = r_pearson(&x, &y, PearsonTest::StudentT).unwrap();
    let p2 = r_pearson(&y, &x, PearsonTest::StudentT).unwrap();
    assert!((p1.r - p2.r).abs() < 1e-12);

    let s1 = r_spearman_rho(&x, &y, SpearmanTest::StudentT).unwrap();
    let s2 = r_spearman_rho(&y, &x, SpearmanTest::StudentT).unwrap();
    assert!((s1.r - s2.r).abs() < 1e-12);

    for variant in [KendallVariant::TauA, KendallVariant::TauB] {
        let k1 = r_kendall_tau(&x, &y, variant, PValueMethod::Asymptotic).unwrap();
        let k2 = r_kendall_tau(&y, &x, variant, PValueMethod::Asymptotic).unwrap();
        assert!((k1.r - k2.r).abs() < 1e-12);
    }
}

#[test]
fn test_exact_and_normal_converge() {
    // P(T ≤ ⌊μ − σ⌋) under both modes
    let signed_rank_gap = |n: usize| {
        let nf = n as f64;
        let mu = nf * (nf + 1.0) / 4.0;
        let sigma = (nf * (nf + 1.0) * (2.0 * nf + 1.0) / 24.0).sqrt();
        let w = (mu - sigma).floor();
        let exact = di_wilcoxon_signed_rank(n, w, PValueMethod::Exact).unwrap();
        let normal = di_wilcoxon_signed_rank(n, w, PValueMethod::Asymptotic).unwrap();
        (exact - normal).abs()
    };
    let gaps: Vec<f64> = [6, 12, 24, 48].into_iter().map(signed_rank_gap).collect();
    assert!((gaps[0] - 0.00899630315994493).abs() < 1e-9);
    assert!(gaps.windows(2).all(|w| w[1] < w[0]), "{:?}", gaps);

    let mann_whitney_gap = |m: usize| {
        let mf = m as f64;
        let mu = mf * mf / 2.0;
        let sigma = (mf * mf * (2.0 * mf + 1.0) / 12.0).sqrt();
        let u = (mu - sigma).floor();
        let exact = di_mann_whitney(m, m, u, PValueMethod::Exact).unwrap();
        let normal = di_mann_whitney(m, m, u, PValueMethod::Asymptotic).unwrap();
        (exact - normal).abs()
    };
    let gaps: Vec<f64> = [3, 6, 12, 24].into_iter().map(mann_whitney_gap).collect();
    assert!((gaps[3] - 0.001549579663138706).abs() < 1e-9);
    assert!(gaps.windows(2).all(|w| w[1] < w[0]), "{:?}", gaps);

    // a third of the values below the hypothesized median
    let sign_gap = |n: usize| {
        let data: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mu = Some((n / 3) as f64 - 0.5);
        let exact = ts_sign_os(&data, mu, PValueMethod::Exact).unwrap();
        let normal = ts_sign_os(&data, mu, PValueMethod::Asymptotic).unwrap();
        (exact.p_value - normal.p_value).abs()
    };
    let gaps: Vec<f64> = [9, 27, 81, 243].into_iter().map(sign_gap).collect();
    assert!((gaps[0] - 0.002827424906154174).abs() < 1e-9);
    assert!((gaps[1] - 0.0015795896943679175).abs() < 1e-9);
    assert!(gaps.windows(2).all(|w| w[1] < w[0]), "{:?}", gaps);
}

#[test]
fn test_multinomial_falls_back_on_large_samples() {
    init_logging();
    let data: Vec<u8> = (0..198).map(|i| (i % 6) as u8).collect();
    let res = ts_multinomial_gof(&data, None).unwrap();
    assert!(res.test.contains("too many outcomes"), "{}", res.test);
    assert_eq!(res.df, Some(5.0));
    assert!(res.statistic.abs() < 1e-12);
    assert!((res.p_value - 1.0).abs() < 1e-12);
}

#[test]
fn test_gof_effect_size_pipeline() {
    let data = [
        vec!["DIVORCED"; 7],
        vec!["MARRIED"; 6],
        vec!["NEVER MARRIED"; 4],
        vec!["SEPARATED"; 2],
    ]
    .concat();
    let gof = ts_pearson_gof(&data, None, GofCorrection::None).unwrap();
    let w = survey_stats::effect_sizes::es_cohen_w(gof.statistic, gof.n as f64).unwrap();
    assert!((w - (3.1052631578947354f64 / 19.0).sqrt()).abs() < 1e-12);
    assert_eq!(th_cohen_w(w, CohenWRule::Cohen).unwrap().classification, "medium");
}

#[test]
fn test_omnibus_then_posthoc() {
    let groups: BTreeMap<&str, Vec<f64>> = [
        ("a", vec![1.0, 2.0, 4.0, 7.0]),
        ("b", vec![8.0, 9.0, 12.0]),
        ("c", vec![15.0, 16.0, 20.0, 30.0]),
    ]
    .into_iter()
    .collect();
    let kw = ts_kruskal_wallis(&groups, true).unwrap();
    assert!(kw.p_value < 0.05);

    let pairs = ph_dunn(&groups, Adjustment::Bonferroni).unwrap();
    assert_eq!(
        pairs.iter().map(|p| (p.group1, p.group2)).collect::<Vec<_>>(),
        vec![("a", "b"), ("a", "c"), ("b", "c")]
    );
    assert!(pairs.iter().all(|p| p.p_adjusted >= p.p_value && p.p_adjusted <= 1.0));
}
