//! Z-score rule detector.

use anomaly_api::{Tail, ZScoreConfig};
use anomaly_spi::{AnomalyError, AnomalyResult, Result, SeriesDetector};

/// Z-Score based anomaly detector.
///
/// Flags values more than `threshold` population standard deviations from
/// the fitted mean, on the configured tail.
#[derive(Debug, Clone)]
pub struct ZScoreDetector {
    threshold: f64,
    tail: Tail,
    mean: f64,
    std_dev: f64,
    fitted: bool,
}

impl ZScoreDetector {
    /// Create a new Z-Score detector with given threshold on both tails.
    pub fn new(threshold: f64) -> Self {
        Self::from_config(ZScoreConfig::new(threshold))
    }

    /// Create from configuration.
    pub fn from_config(config: ZScoreConfig) -> Self {
        Self {
            threshold: config.threshold,
            tail: config.tail,
            mean: 0.0,
            std_dev: 0.0,
            fitted: false,
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl Default for ZScoreDetector {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl SeriesDetector for ZScoreDetector {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        if data.is_empty() {
            return Err(AnomalyError::InsufficientData { required: 1, got: 0 });
        }
        let n = data.len() as f64;
        self.mean = data.iter().sum::<f64>() / n;
        self.std_dev = (data.iter().map(|x| (x - self.mean).powi(2)).sum::<f64>() / n).sqrt();
        self.fitted = true;
        Ok(())
    }

    fn detect(&self, data: &[f64]) -> Result<AnomalyResult> {
        let scores = self.score(data)?;
        let is_anomaly = scores
            .iter()
            .map(|&s| match self.tail {
                Tail::Upper => s > self.threshold,
                Tail::Lower => s < -self.threshold,
                Tail::Both => s.abs() > self.threshold,
            })
            .collect();
        Ok(AnomalyResult::new(is_anomaly, scores, self.threshold))
    }

    fn score(&self, data: &[f64]) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(AnomalyError::NotFitted);
        }
        if self.std_dev == 0.0 {
            return Ok(vec![0.0; data.len()]);
        }
        Ok(data.iter().map(|&x| (x - self.mean) / self.std_dev).collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<f64> {
        let mut data: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        data.push(1000.0);
        data.push(-800.0);
        data
    }

    #[test]
    fn test_both_tails() {
        let data = series();
        let mut detector = ZScoreDetector::new(2.0);
        detector.fit(&data).unwrap();
        let result = detector.detect(&data).unwrap();
        assert_eq!(result.anomaly_indices(), vec![30, 31]);
    }

    #[test]
    fn test_upper_tail_only() {
        let data = series();
        let mut detector = ZScoreDetector::from_config(ZScoreConfig::new(2.0).with_tail(Tail::Upper));
        detector.fit(&data).unwrap();
        assert_eq!(detector.detect(&data).unwrap().anomaly_indices(), vec![30]);
    }

    #[test]
    fn test_constant_series() {
        let data = vec![5.0; 10];
        let mut detector = ZScoreDetector::default();
        detector.fit(&data).unwrap();
        assert_eq!(detector.score(&data).unwrap(), vec![0.0; 10]);
        assert_eq!(detector.detect(&data).unwrap().anomaly_count(), 0);
    }

    #[test]
    fn test_not_fitted() {
        let detector = ZScoreDetector::default();
        assert!(!detector.is_fitted());
        assert_eq!(detector.detect(&[1.0]).unwrap_err(), AnomalyError::NotFitted);
    }
}
