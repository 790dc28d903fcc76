//! Questionnaire input collection behind a capability trait.
//!
//! The UI exposes its controls through [`FieldSource`] so the collector can
//! be exercised against fakes in tests. Values are read fresh at call time;
//! nothing is cached between submissions.

use thiserror::Error;

use crate::api::PredictionRequest;

/// Read access to the current value of named input controls.
pub trait FieldSource {
    /// Current raw value of a control, or `None` when the control is absent.
    fn value_of(&self, field: &str) -> Option<String>;
}

/// Control identifiers, one per questionnaire field.
pub mod field {
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const SCHOOL_GRADE: &str = "school_grade";
    pub const DAILY_USAGE: &str = "daily_usage";
    pub const SLEEP_HOURS: &str = "sleep_hours";
    pub const ACADEMIC_PERFORMANCE: &str = "academic_performance";
    pub const SOCIAL_INTERACTIONS: &str = "social_interactions";
    pub const EXERCISE_HOURS: &str = "exercise_hours";
    pub const ANXIETY: &str = "anxiety";
    pub const DEPRESSION: &str = "depression";
    pub const SELF_ESTEEM: &str = "self_esteem";
    pub const PARENTAL_CONTROL: &str = "parental_control";
    pub const SCREEN_BEFORE_BED: &str = "screen_before_bed";
    pub const PHONE_CHECKS: &str = "phone_checks";
    pub const APPS_USED_DAILY: &str = "apps_used_daily";
    pub const TIME_SOCIAL_MEDIA: &str = "time_social_media";
    pub const TIME_GAMING: &str = "time_gaming";
    pub const TIME_EDUCATION: &str = "time_education";
    pub const PHONE_USAGE_PURPOSE: &str = "phone_usage_purpose";
    pub const FAMILY_COMMUNICATION: &str = "family_communication";
    pub const WEEKEND_USAGE: &str = "weekend_usage";
}

/// Controls whose slider display rounds to a whole number.
const INTEGER_FIELDS: [&str; 4] = [
    field::AGE,
    field::PHONE_CHECKS,
    field::ACADEMIC_PERFORMANCE,
    field::APPS_USED_DAILY,
];

/// Errors raised while assembling a submission payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectError {
    /// A required control was not present on the input surface.
    #[error("Input control '{0}' is missing")]
    MissingField(&'static str),
    /// A numeric control held a value that does not parse as a number.
    #[error("Input control '{field}' has non-numeric value '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Read all 21 controls into a fresh [`PredictionRequest`].
///
/// Fails fast when a control is missing or a numeric value does not parse,
/// rather than submitting an incomplete payload.
pub fn collect(source: &dyn FieldSource) -> Result<PredictionRequest, CollectError> {
    Ok(PredictionRequest {
        age: number(source, field::AGE)?,
        gender: text(source, field::GENDER)?,
        school_grade: text(source, field::SCHOOL_GRADE)?,
        daily_usage_hours: number(source, field::DAILY_USAGE)?,
        sleep_hours: number(source, field::SLEEP_HOURS)?,
        academic_performance: number(source, field::ACADEMIC_PERFORMANCE)?,
        social_interactions: number(source, field::SOCIAL_INTERACTIONS)?,
        exercise_hours: number(source, field::EXERCISE_HOURS)?,
        anxiety_level: number(source, field::ANXIETY)?,
        depression_level: number(source, field::DEPRESSION)?,
        self_esteem: number(source, field::SELF_ESTEEM)?,
        parental_control: number(source, field::PARENTAL_CONTROL)?,
        screen_time_before_bed: number(source, field::SCREEN_BEFORE_BED)?,
        phone_checks_per_day: number(source, field::PHONE_CHECKS)?,
        apps_used_daily: number(source, field::APPS_USED_DAILY)?,
        time_on_social_media: number(source, field::TIME_SOCIAL_MEDIA)?,
        time_on_gaming: number(source, field::TIME_GAMING)?,
        time_on_education: number(source, field::TIME_EDUCATION)?,
        phone_usage_purpose: text(source, field::PHONE_USAGE_PURPOSE)?,
        family_communication: number(source, field::FAMILY_COMMUNICATION)?,
        weekend_usage_hours: number(source, field::WEEKEND_USAGE)?,
    })
}

/// Format a slider value for display next to the control.
///
/// Whole-number controls round; everything else shows one decimal.
pub fn slider_display(field_id: &str, value: f64) -> String {
    if INTEGER_FIELDS.contains(&field_id) {
        format!("{}", value.round())
    } else {
        format!("{value:.1}")
    }
}

/// Snapshot of the five mental-health inputs feeding the radar chart.
///
/// Read fresh from the input surface at presentation time, independent of
/// the request that produced the response being presented. Metrics fall
/// back to their documented midpoints when a control is absent, because the
/// snapshot only feeds a display, never the wire payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MentalMetrics {
    pub sleep: f64,
    pub social: f64,
    pub self_esteem: f64,
    pub anxiety: f64,
    pub depression: f64,
}

impl Default for MentalMetrics {
    fn default() -> Self {
        Self {
            sleep: 7.0,
            social: 5.0,
            self_esteem: 7.0,
            anxiety: 5.0,
            depression: 5.0,
        }
    }
}

impl MentalMetrics {
    /// Capture the current metric values, defaulting absent controls.
    pub fn from_source(source: &dyn FieldSource) -> Self {
        let defaults = Self::default();
        Self {
            sleep: metric_or(source, field::SLEEP_HOURS, defaults.sleep),
            social: metric_or(source, field::SOCIAL_INTERACTIONS, defaults.social),
            self_esteem: metric_or(source, field::SELF_ESTEEM, defaults.self_esteem),
            anxiety: metric_or(source, field::ANXIETY, defaults.anxiety),
            depression: metric_or(source, field::DEPRESSION, defaults.depression),
        }
    }
}

fn metric_or(source: &dyn FieldSource, field: &str, fallback: f64) -> f64 {
    source
        .value_of(field)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .unwrap_or(fallback)
}

fn number(source: &dyn FieldSource, field: &'static str) -> Result<f64, CollectError> {
    let value = source
        .value_of(field)
        .ok_or(CollectError::MissingField(field))?;
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| CollectError::InvalidNumber { field, value })
}

fn text(source: &dyn FieldSource, field: &'static str) -> Result<String, CollectError> {
    source
        .value_of(field)
        .ok_or(CollectError::MissingField(field))
}
