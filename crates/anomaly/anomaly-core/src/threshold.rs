//! Path-length normalization and contamination thresholding.

/// Euler-Mascheroni constant.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Average path length of an unsuccessful binary-search-tree lookup over
/// `n` points, used to normalize isolation depths.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Number of rows a contamination share asks for: ⌈c·n⌉ clamped to [1, n].
pub fn expected_anomalies(contamination: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    // Absorb float noise such as 0.07 * 100 = 7.000000000000001
    let k = (contamination * n as f64 - 1e-9).ceil();
    (k.max(1.0) as usize).min(n)
}

/// Most rows a contamination share may flag when the threshold score is
/// shared: c·n plus the larger of 2 rows and 20%.
fn flag_limit(contamination: f64, n: usize) -> usize {
    let expected = contamination * n as f64;
    (expected + (0.2 * expected).max(2.0) + 1e-9).floor() as usize
}

/// Threshold at the contamination quantile of `scores` (lower = more
/// anomalous) and the resulting flags.
///
/// Rows tied with the threshold score are all flagged while that keeps the
/// count within c·n plus the larger of 2 rows and 20%; a larger tie group is
/// cut to exactly `k` rows, earliest rows first.
pub fn contamination_threshold(scores: &[f64], contamination: f64) -> (f64, Vec<bool>) {
    let k = expected_anomalies(contamination, scores.len());
    if k == 0 {
        return (f64::NEG_INFINITY, Vec::new());
    }
    // Stable sort keeps row order within equal scores
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
    let threshold = scores[order[k - 1]];

    let tied = order.partition_point(|&i| scores[i].total_cmp(&threshold).is_le());
    let take = if tied <= flag_limit(contamination, scores.len()) { tied } else { k };

    let mut flags = vec![false; scores.len()];
    for &row in &order[..take] {
        flags[row] = true;
    }
    (threshold, flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_path_length() {
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        // c(256) is about 10.24
        assert!((average_path_length(256) - 10.244).abs() < 1e-2);
    }

    #[test]
    fn test_expected_anomalies() {
        assert_eq!(expected_anomalies(0.01, 1000), 10);
        assert_eq!(expected_anomalies(0.07, 100), 7);
        assert_eq!(expected_anomalies(0.01, 36), 1);
        assert_eq!(expected_anomalies(0.001, 50), 1);
        assert_eq!(expected_anomalies(0.1, 0), 0);
    }

    #[test]
    fn test_threshold_flags_lowest() {
        let scores = [-0.5, -0.9, -0.4, -0.8, -0.45];
        let (threshold, flags) = contamination_threshold(&scores, 0.4);
        assert_eq!(threshold, -0.8);
        assert_eq!(flags, vec![false, true, false, true, false]);
    }

    #[test]
    fn test_threshold_keeps_ties() {
        let scores = [-0.7, -0.7, -0.4, -0.4];
        let (_, flags) = contamination_threshold(&scores, 0.25);
        assert_eq!(flags, vec![true, true, false, false]);
    }

    #[test]
    fn test_large_tie_group_is_cut_to_expected_count() {
        // 30 rows share the lowest score; c = 0.1 of 100 asks for 10
        let scores: Vec<f64> = (0..100)
            .map(|i| if i % 3 == 0 && i < 90 { -0.7 } else { -0.4 - i as f64 * 1e-3 })
            .collect();
        let (threshold, flags) = contamination_threshold(&scores, 0.1);
        assert_eq!(threshold, -0.7);

        let flagged: Vec<usize> = (0..100).filter(|&i| flags[i]).collect();
        assert_eq!(flagged, vec![0, 3, 6, 9, 12, 15, 18, 21, 24, 27]);
    }

    #[test]
    fn test_every_row_tied() {
        let scores = vec![-0.5; 50];
        let (_, flags) = contamination_threshold(&scores, 0.04);
        assert_eq!(flags.iter().filter(|&&f| f).count(), 2);
        assert!(flags[0] && flags[1]);
    }
}
