//! Assessment score extraction and the theta to T-score conversion.
//!
//! PROMIS instruments report scores on the T-score metric (mean 50,
//! SD 10). The stateless endpoint returns `Theta`, `StdError`, and
//! sometimes `tScore` as JSON strings, so extraction tolerates both
//! string and numeric field encodings.

use serde_json::Value;

/// Convert a theta estimate to the T-score metric.
pub fn t_score_from_theta(theta: f64) -> f64 {
    theta * 10.0 + 50.0
}

/// Scoring fields pulled out of a stateless assessment response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssessmentMetrics {
    /// Latest theta estimate, if the assessment has produced one.
    pub theta: Option<f64>,
    /// Standard error of the theta estimate.
    pub std_error: Option<f64>,
    /// T-score: the API's `tScore` when present, otherwise derived
    /// from theta.
    pub t_score: Option<f64>,
}

impl AssessmentMetrics {
    /// Extract metrics from a stateless endpoint response.
    pub fn from_response(response: &Value) -> Self {
        let theta = numeric_field(response.get("Theta"));
        let std_error = numeric_field(response.get("StdError"));
        let t_score = numeric_field(response.get("tScore"))
            .or_else(|| theta.map(t_score_from_theta));

        AssessmentMetrics {
            theta,
            std_error,
            t_score,
        }
    }

    /// True when the assessment has reported any scoring data yet.
    pub fn is_available(&self) -> bool {
        self.theta.is_some() || self.std_error.is_some()
    }
}

/// Read a JSON field as a float, accepting both `1.23` and `"1.23"`.
fn numeric_field(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
