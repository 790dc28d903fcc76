//! Wire types for the prediction service and response validation.
//!
//! The service is permissive about which response fields it sends, so the
//! deserialized [`PredictionResponse`] keeps everything optional and
//! [`parse_prediction_response`] upgrades it into a strict
//! [`PredictionOutcome`] that rendering code can rely on.

mod client;

pub use client::{MAX_RESPONSE_BYTES, PredictionClient};

use serde::{Deserialize, Serialize};

/// Questionnaire payload submitted to the predict endpoint.
///
/// Field renames pin the exact wire names the service expects; the record is
/// built fresh for every submission and never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "School_Grade")]
    pub school_grade: String,
    #[serde(rename = "Daily_Usage_Hours")]
    pub daily_usage_hours: f64,
    #[serde(rename = "Sleep_Hours")]
    pub sleep_hours: f64,
    #[serde(rename = "Academic_Performance")]
    pub academic_performance: f64,
    #[serde(rename = "Social_Interactions")]
    pub social_interactions: f64,
    #[serde(rename = "Exercise_Hours")]
    pub exercise_hours: f64,
    #[serde(rename = "Anxiety_Level")]
    pub anxiety_level: f64,
    #[serde(rename = "Depression_Level")]
    pub depression_level: f64,
    #[serde(rename = "Self_Esteem")]
    pub self_esteem: f64,
    #[serde(rename = "Parental_Control")]
    pub parental_control: f64,
    #[serde(rename = "Screen_Time_Before_Bed")]
    pub screen_time_before_bed: f64,
    #[serde(rename = "Phone_Checks_Per_Day")]
    pub phone_checks_per_day: f64,
    #[serde(rename = "Apps_Used_Daily")]
    pub apps_used_daily: f64,
    #[serde(rename = "Time_on_Social_Media")]
    pub time_on_social_media: f64,
    #[serde(rename = "Time_on_Gaming")]
    pub time_on_gaming: f64,
    #[serde(rename = "Time_on_Education")]
    pub time_on_education: f64,
    #[serde(rename = "Phone_Usage_Purpose")]
    pub phone_usage_purpose: String,
    #[serde(rename = "Family_Communication")]
    pub family_communication: f64,
    #[serde(rename = "Weekend_Usage_Hours")]
    pub weekend_usage_hours: f64,
}

/// Coarse risk category derived server-side from the probability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Lower-cased tag used for severity styling of the risk text.
    pub fn severity_tag(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Server-supplied contribution of one input field to the prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// One actionable recommendation returned alongside the prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: i64,
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// Raw response as the service sends it; every payload field is optional.
#[derive(Clone, Debug, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub success: bool,
    pub risk_probability: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    pub feature_importance: Option<Vec<FeatureImportance>>,
    pub recommendations: Option<Vec<Recommendation>>,
    pub error: Option<String>,
}

/// Validated prediction the presenter can render without further checks.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionOutcome {
    /// Model-estimated likelihood of problematic usage, 0..=1.
    pub risk_probability: f64,
    pub risk_level: RiskLevel,
    pub feature_importance: Vec<FeatureImportance>,
    /// Empty when the service sent no recommendations (absent collapses to
    /// empty, matching the service contract).
    pub recommendations: Vec<Recommendation>,
}

/// Failure kinds for a prediction exchange; all are terminal for the current
/// submission and none are retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The service answered with a non-2xx status.
    #[error("Server error: HTTP {status}: {body}")]
    Server { status: u16, body: String },
    /// A 2xx response whose body is not a usable prediction.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// The request never completed at the transport level.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The service parsed our request but reported a failure.
    #[error("Prediction failed: {0}")]
    Application(String),
}

/// Upgrade a raw response body into a validated [`PredictionOutcome`].
///
/// A `success: true` response missing any field required for rendering is
/// rejected as malformed rather than surfacing a render-time fault later.
pub fn parse_prediction_response(body: &str) -> Result<PredictionOutcome, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::MalformedResponse(
            "Empty response body".to_string(),
        ));
    }
    let parsed: PredictionResponse = serde_json::from_str(trimmed)
        .map_err(|err| PredictError::MalformedResponse(err.to_string()))?;

    if !parsed.success {
        let message = parsed
            .error
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(PredictError::Application(message));
    }

    let risk_probability = parsed
        .risk_probability
        .ok_or_else(|| missing_field("risk_probability"))?;
    let risk_level = parsed
        .risk_level
        .ok_or_else(|| missing_field("risk_level"))?;
    let feature_importance = parsed
        .feature_importance
        .ok_or_else(|| missing_field("feature_importance"))?;

    Ok(PredictionOutcome {
        risk_probability,
        risk_level,
        feature_importance,
        recommendations: parsed.recommendations.unwrap_or_default(),
    })
}

fn missing_field(name: &str) -> PredictError {
    PredictError::MalformedResponse(format!("Missing field '{name}' in successful response"))
}

#[cfg(test)]
pub(crate) fn sample_request() -> PredictionRequest {
    PredictionRequest {
        age: 15.0,
        gender: "Female".to_string(),
        school_grade: "9th".to_string(),
        daily_usage_hours: 6.5,
        sleep_hours: 4.0,
        academic_performance: 70.0,
        social_interactions: 2.0,
        exercise_hours: 1.0,
        anxiety_level: 8.0,
        depression_level: 7.0,
        self_esteem: 3.0,
        parental_control: 5.0,
        screen_time_before_bed: 1.5,
        phone_checks_per_day: 80.0,
        apps_used_daily: 12.0,
        time_on_social_media: 3.5,
        time_on_gaming: 1.0,
        time_on_education: 0.5,
        phone_usage_purpose: "Social Media".to_string(),
        family_communication: 4.0,
        weekend_usage_hours: 8.0,
    }
}
