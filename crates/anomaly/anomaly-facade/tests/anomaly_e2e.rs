//! End-to-end tests for anomaly detection workflows

use anomaly_facade::{
    detect, IsolationForestConfig, SeriesDetector, Tail, ZScoreConfig, ZScoreDetector,
};
use feature_facade::FeatureMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn gaussian(rng: &mut StdRng, mean: f64, sd: f64) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    mean + sd * (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// 990 ordinary transactions around 100 and 10 injected large ones, spread
/// through the table.
fn transactions() -> (FeatureMatrix, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(2024);
    let injected: Vec<usize> = (0..10).map(|i| i * 97 + 13).collect();
    let mut rows = Vec::with_capacity(1000);
    let mut k = 0;
    for i in 0..1000 {
        let hour = rng.gen_range(0..24) as f64;
        let amount = if injected.contains(&i) {
            k += 1;
            10_000.0 + 1000.0 * k as f64
        } else {
            gaussian(&mut rng, 100.0, 10.0)
        };
        rows.push(vec![amount, hour]);
    }
    let names = vec!["TransactionAmount".to_string(), "hour".to_string()];
    (FeatureMatrix::new(names, rows).unwrap(), injected)
}

#[test]
fn e2e_fraud_scenario_catches_injected_rows() {
    let (data, injected) = transactions();
    let result = detect(&data, &IsolationForestConfig::new(0.01)).unwrap();

    let flagged = result.anomaly_indices();
    let caught = injected.iter().filter(|i| flagged.contains(i)).count();
    assert!(caught >= 8, "caught only {caught} of 10 injected rows");
    assert!(flagged.len() <= 12);
    assert!(result.note.is_none());
}

#[test]
fn e2e_zscore_rule_on_amounts() {
    let (data, injected) = transactions();
    let amounts = data.column(0).unwrap();

    let mut rule = ZScoreDetector::from_config(ZScoreConfig::new(3.0).with_tail(Tail::Upper));
    rule.fit(&amounts).unwrap();
    let result = rule.detect(&amounts).unwrap();

    // The injected rows inflate sigma, but the largest still stand out
    assert!(result.anomaly_count() >= 1);
    assert!(result.anomaly_indices().iter().all(|i| injected.contains(i)));
}

#[test]
fn e2e_small_table_degrades_quietly() {
    let data = FeatureMatrix::new(
        vec!["amount".to_string()],
        vec![vec![1.0], vec![2.0], vec![1000.0]],
    )
    .unwrap();
    let result = detect(&data, &IsolationForestConfig::new(0.1)).unwrap();
    assert_eq!(result.anomaly_count(), 0);
    assert!(result.is_low_confidence());
}
