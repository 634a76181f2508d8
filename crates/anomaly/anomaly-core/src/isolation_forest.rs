//! Isolation forest detector.

use anomaly_api::{IsolationForestConfig, MIN_ROWS};
use anomaly_spi::{AnomalyDetector, AnomalyError, AnomalyResult, Result};
use feature_spi::FeatureMatrix;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::threshold::{average_path_length, contamination_threshold};

/// Score assigned to every row when the input carries no signal.
pub const UNIFORM_SCORE: f64 = -0.5;

// ============================================================================
// Isolation Tree
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        size: usize,
    },
}

/// One random isolation tree, nodes stored in an arena rooted at 0.
#[derive(Debug, Clone)]
struct IsolationTree {
    nodes: Vec<Node>,
}

impl IsolationTree {
    fn grow(data: &FeatureMatrix, sample: &[usize], depth_limit: usize, rng: &mut StdRng) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow_node(data, sample.to_vec(), 0, depth_limit, rng);
        tree
    }

    fn grow_node(
        &mut self,
        data: &FeatureMatrix,
        rows: Vec<usize>,
        depth: usize,
        depth_limit: usize,
        rng: &mut StdRng,
    ) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { size: rows.len() });
        if depth >= depth_limit || rows.len() <= 1 {
            return id;
        }

        // Only features that still vary within this node can split it
        let ranges: Vec<(usize, f64, f64)> = (0..data.n_features())
            .filter_map(|f| {
                let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                    let v = data.rows()[r][f];
                    (lo.min(v), hi.max(v))
                });
                (hi > lo).then_some((f, lo, hi))
            })
            .collect();
        if ranges.is_empty() {
            return id;
        }

        let (feature, lo, hi) = ranges[rng.gen_range(0..ranges.len())];
        // Interpolated so that lo and hi near f64::MAX cannot overflow hi - lo
        let u: f64 = rng.gen();
        let threshold = lo * (1.0 - u) + hi * u;
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| data.rows()[r][feature] < threshold);

        let left = self.grow_node(data, left_rows, depth + 1, depth_limit, rng);
        let right = self.grow_node(data, right_rows, depth + 1, depth_limit, rng);
        self.nodes[id] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        id
    }

    /// Edges from the root to the leaf holding `row`, plus the expected
    /// remaining depth for the leaf's size.
    fn path_length(&self, row: &[f64]) -> f64 {
        let mut node = 0;
        let mut depth = 0.0;
        loop {
            match &self.nodes[node] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] < *threshold { *left } else { *right };
                    depth += 1.0;
                }
                Node::Leaf { size } => return depth + average_path_length(*size),
            }
        }
    }
}

// ============================================================================
// Isolation Forest
// ============================================================================

/// Isolation forest over a feature matrix.
///
/// Rows that random axis-aligned splits isolate quickly score close to -1;
/// ordinary rows sit near -0.5. Construction is deterministic for a given
/// seed.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    config: IsolationForestConfig,
    trees: Vec<IsolationTree>,
    sample_size: usize,
    n_features: usize,
    note: Option<String>,
    fitted: bool,
}

impl IsolationForest {
    pub fn new(config: IsolationForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            sample_size: 0,
            n_features: 0,
            note: None,
            fitted: false,
        }
    }

    /// Create with default settings and the given contamination.
    pub fn with_contamination(contamination: f64) -> Self {
        Self::new(IsolationForestConfig::new(contamination))
    }

    pub fn config(&self) -> &IsolationForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn check_fitted(&self, data: &FeatureMatrix) -> Result<()> {
        if !self.fitted {
            return Err(AnomalyError::NotFitted);
        }
        if self.note.is_none() && data.n_features() != self.n_features {
            return Err(AnomalyError::DimensionMismatch {
                expected: self.n_features,
                got: data.n_features(),
            });
        }
        Ok(())
    }

    /// Scores from the fitted trees; callers check the fit first.
    fn path_scores(&self, data: &FeatureMatrix) -> Vec<f64> {
        let norm = average_path_length(self.sample_size);
        let n_trees = self.trees.len() as f64;
        data.rows()
            .iter()
            .map(|row| {
                let mean_path = self.trees.iter().map(|t| t.path_length(row)).sum::<f64>() / n_trees;
                -(2f64.powf(-mean_path / norm))
            })
            .collect()
    }
}

impl Default for IsolationForest {
    fn default() -> Self {
        Self::new(IsolationForestConfig::default())
    }
}

impl AnomalyDetector for IsolationForest {
    fn fit(&mut self, data: &FeatureMatrix) -> Result<()> {
        self.config.validate()?;
        self.trees.clear();
        self.n_features = data.n_features();
        self.note = None;

        let n = data.n_rows();
        if n < MIN_ROWS {
            self.note = Some(format!(
                "only {n} rows; at least {MIN_ROWS} are needed for anomaly scores"
            ));
        } else if data.n_features() == 0 || data.is_constant() {
            self.note = Some("all rows are identical; no row stands out".to_string());
        }
        if let Some(note) = &self.note {
            tracing::warn!(rows = n, "{note}");
            self.fitted = true;
            return Ok(());
        }

        self.sample_size = self.config.sample_size.min(n);
        let depth_limit = (self.sample_size as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        for _ in 0..self.config.n_trees {
            let sample = rand::seq::index::sample(&mut rng, n, self.sample_size).into_vec();
            self.trees
                .push(IsolationTree::grow(data, &sample, depth_limit, &mut rng));
        }

        tracing::debug!(
            trees = self.trees.len(),
            sample_size = self.sample_size,
            depth_limit,
            "fitted isolation forest"
        );
        self.fitted = true;
        Ok(())
    }

    fn detect(&self, data: &FeatureMatrix) -> Result<AnomalyResult> {
        self.check_fitted(data)?;
        if let Some(note) = &self.note {
            return Ok(AnomalyResult::low_confidence(
                data.n_rows(),
                UNIFORM_SCORE,
                note.clone(),
            ));
        }

        let scores = self.path_scores(data);
        let (threshold, is_anomaly) = contamination_threshold(&scores, self.config.contamination);
        let result = AnomalyResult::new(is_anomaly, scores, threshold);
        tracing::debug!(
            rows = result.len(),
            flagged = result.anomaly_count(),
            threshold,
            "isolation forest detection"
        );
        Ok(result)
    }

    fn score(&self, data: &FeatureMatrix) -> Result<Vec<f64>> {
        self.check_fitted(data)?;
        if self.note.is_some() {
            return Ok(vec![UNIFORM_SCORE; data.n_rows()]);
        }
        Ok(self.path_scores(data))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

/// Fit a forest on `data` and flag its own rows.
pub fn detect(data: &FeatureMatrix, config: &IsolationForestConfig) -> Result<AnomalyResult> {
    let mut forest = IsolationForest::new(config.clone());
    forest.fit(data)?;
    forest.detect(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> FeatureMatrix {
        let names = (0..rows[0].len()).map(|i| format!("f{i}")).collect();
        FeatureMatrix::new(names, rows).unwrap()
    }

    fn with_outlier(n: usize) -> FeatureMatrix {
        let mut rows: Vec<Vec<f64>> = (0..n)
            .map(|i| vec![(i % 10) as f64, (i % 7) as f64])
            .collect();
        rows.push(vec![500.0, 3.0]);
        matrix(rows)
    }

    #[test]
    fn test_outlier_scores_lowest() {
        let data = with_outlier(99);
        let mut forest = IsolationForest::with_contamination(0.01);
        forest.fit(&data).unwrap();
        let scores = forest.score(&data).unwrap();

        assert!(scores.iter().all(|&s| (-1.0..0.0).contains(&s)));
        let lowest = scores
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i);
        assert_eq!(lowest, Some(99));

        let result = forest.detect(&data).unwrap();
        assert!(result.is_anomaly[99]);
        assert_eq!(result.anomaly_count(), 1);
    }

    #[test]
    fn test_same_seed_same_result() {
        let data = with_outlier(60);
        let config = IsolationForestConfig::new(0.05);
        assert_eq!(detect(&data, &config).unwrap(), detect(&data, &config).unwrap());
    }

    #[test]
    fn test_identical_rows_flag_nothing() {
        let data = matrix(vec![vec![1.0, 2.0]; 40]);
        let result = detect(&data, &IsolationForestConfig::new(0.1)).unwrap();
        assert_eq!(result.anomaly_count(), 0);
        assert!(result.is_low_confidence());
        assert!(result.scores.iter().all(|&s| s == UNIFORM_SCORE));
    }

    #[test]
    fn test_too_few_rows() {
        let data = matrix((0..5).map(|i| vec![i as f64]).collect());
        let result = detect(&data, &IsolationForestConfig::default()).unwrap();
        assert_eq!(result.len(), 5);
        assert_eq!(result.anomaly_count(), 0);
        assert!(result.note.unwrap().contains("5 rows"));
    }

    #[test]
    fn test_not_fitted_and_dimension_mismatch() {
        let forest = IsolationForest::default();
        let data = with_outlier(20);
        assert_eq!(forest.detect(&data).unwrap_err(), AnomalyError::NotFitted);

        let mut forest = IsolationForest::default();
        forest.fit(&data).unwrap();
        let narrow = matrix((0..20).map(|i| vec![i as f64]).collect());
        assert!(matches!(
            forest.detect(&narrow),
            Err(AnomalyError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_invalid_contamination() {
        let data = with_outlier(20);
        let err = detect(&data, &IsolationForestConfig::new(0.6)).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidParameter { .. }));
    }

    #[test]
    fn test_sample_size_capped_by_rows() {
        let data = with_outlier(30);
        let mut forest = IsolationForest::default();
        forest.fit(&data).unwrap();
        assert_eq!(forest.sample_size, 31);
        assert_eq!(forest.n_trees(), 100);
    }

    #[test]
    fn test_extreme_finite_values_split() {
        let mut rows: Vec<Vec<f64>> = (0..34).map(|i| vec![100.0 + (i % 9) as f64]).collect();
        rows.push(vec![-1e308]);
        rows.push(vec![1e308]);
        let data = matrix(rows);

        let result = detect(&data, &IsolationForestConfig::new(0.05)).unwrap();
        assert!(result.scores.iter().all(|s| s.is_finite() && (-1.0..0.0).contains(s)));
        assert_eq!(result.anomaly_indices(), vec![34, 35]);
    }

    #[test]
    fn test_detect_reuses_scores() {
        let data = with_outlier(49);
        let mut forest = IsolationForest::with_contamination(0.02);
        forest.fit(&data).unwrap();
        let result = forest.detect(&data).unwrap();
        assert_eq!(result.scores, forest.score(&data).unwrap());
    }
}
