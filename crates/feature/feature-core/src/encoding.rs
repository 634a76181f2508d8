//! One-hot encoding of categorical columns.

use std::collections::HashMap;

use feature_api::{FeatureConfig, OTHER_CATEGORY};

/// Category vocabulary fitted on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEncoder {
    categories: Vec<String>,
    /// Indicator receiving values outside the vocabulary, when bucketed.
    other: Option<usize>,
}

impl CategoryEncoder {
    /// Fit on observed values.
    ///
    /// Up to `max_categories` distinct values each get an indicator, sorted
    /// lexicographically. Above that, the `top_k` most frequent values
    /// (ties lexicographic) are kept, sorted, followed by an `other` bucket.
    pub fn fit(values: &[String], config: &FeatureConfig) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for v in values {
            *counts.entry(v.as_str()).or_insert(0) += 1;
        }

        if counts.len() <= config.max_categories {
            let mut categories: Vec<String> = counts.keys().map(|c| c.to_string()).collect();
            categories.sort();
            return Self {
                categories,
                other: None,
            };
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let mut categories: Vec<String> = ranked
            .iter()
            .take(config.top_k)
            .map(|(c, _)| c.to_string())
            .collect();
        categories.sort();

        let other = match categories.iter().position(|c| c == OTHER_CATEGORY) {
            Some(i) => i,
            None => {
                categories.push(OTHER_CATEGORY.to_string());
                categories.len() - 1
            }
        };
        Self {
            categories,
            other: Some(other),
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_bucketed(&self) -> bool {
        self.other.is_some()
    }

    /// Feature names `"{column}={category}"`.
    pub fn feature_names(&self, column: &str) -> Vec<String> {
        self.categories
            .iter()
            .map(|c| format!("{column}={c}"))
            .collect()
    }

    /// Indicator position for a value; `None` for an unseen value without
    /// a bucket.
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|c| c == value)
            .or(self.other)
    }

    /// Column-major indicator vectors, one per category.
    pub fn encode(&self, values: &[String]) -> Vec<Vec<f64>> {
        let mut columns = vec![vec![0.0; values.len()]; self.categories.len()];
        for (row, value) in values.iter().enumerate() {
            if let Some(i) = self.index_of(value) {
                columns[i][row] = 1.0;
            }
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sorted_one_hot() {
        let values = strings(&["South", "North", "South", "missing"]);
        let encoder = CategoryEncoder::fit(&values, &FeatureConfig::default());
        assert_eq!(encoder.categories(), &["North", "South", "missing"]);
        assert_eq!(
            encoder.feature_names("region"),
            vec!["region=North", "region=South", "region=missing"]
        );

        let columns = encoder.encode(&values);
        assert_eq!(columns[0], vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(columns[1], vec![1.0, 0.0, 1.0, 0.0]);
        assert_eq!(columns[2], vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_top_k_with_other_bucket() {
        let config = FeatureConfig::builder()
            .max_categories(3)
            .top_k(2)
            .build()
            .unwrap();
        // c appears three times, a and b twice, d once
        let values = strings(&["c", "a", "c", "b", "c", "a", "b", "d"]);
        let encoder = CategoryEncoder::fit(&values, &config);

        assert!(encoder.is_bucketed());
        // b loses the tie with a lexicographically
        assert_eq!(encoder.categories(), &["a", "c", "other"]);
        assert_eq!(encoder.index_of("d"), Some(2));
        assert_eq!(encoder.index_of("b"), Some(2));
        assert_eq!(encoder.index_of("a"), Some(0));

        let columns = encoder.encode(&values);
        assert_eq!(columns[2], vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_unseen_value_without_bucket() {
        let encoder = CategoryEncoder::fit(&strings(&["x", "y"]), &FeatureConfig::default());
        assert_eq!(encoder.index_of("z"), None);
        let columns = encoder.encode(&strings(&["z"]));
        assert_eq!(columns, vec![vec![0.0], vec![0.0]]);
    }
}
