//! Prediction API payloads.

use serde::{Deserialize, Serialize};

/// Probability at or above which a batch row is shown as favourable.
pub const SURVIVAL_THRESHOLD: f64 = 0.5;

/// Response of the single-sample prediction endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalPrediction {
    /// Probability of survival beyond three years, in [0, 1].
    pub survival_probability: f64,
}

impl SurvivalPrediction {
    /// Probability as a percentage with two decimals, e.g. `"73.10"`.
    pub fn percent(&self) -> String {
        format_percent(self.survival_probability)
    }
}

/// One scored row of an uploaded batch file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Zero-based row index in the uploaded file.
    pub row: u64,
    /// `None` when the API could not score this row.
    pub survival_probability: Option<f64>,
}

impl PredictionResult {
    /// One-based row number as shown to users.
    pub fn display_row(&self) -> u64 {
        self.row + 1
    }

    pub fn is_favourable(&self) -> bool {
        self.survival_probability.is_some_and(|p| p >= SURVIVAL_THRESHOLD)
    }

    pub fn percent(&self) -> Option<String> {
        self.survival_probability.map(format_percent)
    }
}

/// Response of the batch prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPredictions {
    #[serde(default)]
    pub predictions: Vec<PredictionResult>,
}

/// Two decimals, halves rounded away from zero.
fn format_percent(probability: f64) -> String {
    let hundredths = (probability * 100.0 * 100.0).round();
    format!("{:.2}", hundredths / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_has_two_decimals() {
        assert_eq!(SurvivalPrediction { survival_probability: 0.731 }.percent(), "73.10");
        assert_eq!(SurvivalPrediction { survival_probability: 1.0 }.percent(), "100.00");
        assert_eq!(SurvivalPrediction { survival_probability: 0.0 }.percent(), "0.00");
    }

    #[test]
    fn test_percent_rounds_halves_up() {
        assert_eq!(SurvivalPrediction { survival_probability: 0.00125 }.percent(), "0.13");
        assert_eq!(SurvivalPrediction { survival_probability: 0.00625 }.percent(), "0.63");
        let row = PredictionResult { row: 0, survival_probability: Some(0.00125) };
        assert_eq!(row.percent().as_deref(), Some("0.13"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let at = PredictionResult { row: 0, survival_probability: Some(0.5) };
        let below = PredictionResult { row: 1, survival_probability: Some(0.4999) };
        let missing = PredictionResult { row: 2, survival_probability: None };
        assert!(at.is_favourable());
        assert!(!below.is_favourable());
        assert!(!missing.is_favourable());
        assert_eq!(missing.display_row(), 3);
    }

    #[test]
    fn test_batch_accepts_null_probability() {
        let body = r#"{"predictions":[{"row":0,"survival_probability":0.8},{"row":1,"survival_probability":null}]}"#;
        let batch: BatchPredictions = serde_json::from_str(body).unwrap();
        assert_eq!(batch.predictions.len(), 2);
        assert_eq!(batch.predictions[1].survival_probability, None);
    }
}
