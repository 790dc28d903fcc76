//! Shared state types for the egui UI.

use egui::Color32;

use crate::inputs::{FieldSource, field};
use crate::presenter::{RecommendationPanel, ResultsSurface};

/// Choices for the gender control.
pub const GENDER_OPTIONS: [&str; 3] = ["Female", "Male", "Other"];
/// Choices for the school grade control.
pub const GRADE_OPTIONS: [&str; 6] = ["7th", "8th", "9th", "10th", "11th", "12th"];
/// Choices for the primary phone-usage purpose control.
pub const PURPOSE_OPTIONS: [&str; 5] =
    ["Social Media", "Gaming", "Education", "Browsing", "Other"];

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub form: QuestionnaireState,
    pub status: StatusBarState,
    pub results: ResultsPanelState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            form: QuestionnaireState::default(),
            status: StatusBarState::idle(),
            results: ResultsPanelState::default(),
        }
    }
}

/// Current values of the 21 questionnaire controls.
///
/// The struct is the app's input surface; [`FieldSource`] exposes it to the
/// collector so the payload is always read fresh from the live controls.
#[derive(Clone, Debug)]
pub struct QuestionnaireState {
    pub age: f64,
    pub gender: String,
    pub school_grade: String,
    pub daily_usage: f64,
    pub sleep_hours: f64,
    pub academic_performance: f64,
    pub social_interactions: f64,
    pub exercise_hours: f64,
    pub anxiety: f64,
    pub depression: f64,
    pub self_esteem: f64,
    pub parental_control: f64,
    pub screen_before_bed: f64,
    pub phone_checks: f64,
    pub apps_used_daily: f64,
    pub time_social_media: f64,
    pub time_gaming: f64,
    pub time_education: f64,
    pub phone_usage_purpose: String,
    pub family_communication: f64,
    pub weekend_usage: f64,
}

impl Default for QuestionnaireState {
    fn default() -> Self {
        Self {
            age: 15.0,
            gender: GENDER_OPTIONS[0].to_string(),
            school_grade: GRADE_OPTIONS[2].to_string(),
            daily_usage: 4.0,
            sleep_hours: 7.0,
            academic_performance: 75.0,
            social_interactions: 5.0,
            exercise_hours: 1.0,
            anxiety: 5.0,
            depression: 5.0,
            self_esteem: 7.0,
            parental_control: 5.0,
            screen_before_bed: 1.0,
            phone_checks: 50.0,
            apps_used_daily: 10.0,
            time_social_media: 2.0,
            time_gaming: 1.0,
            time_education: 1.0,
            phone_usage_purpose: PURPOSE_OPTIONS[0].to_string(),
            family_communication: 6.0,
            weekend_usage: 5.0,
        }
    }
}

impl FieldSource for QuestionnaireState {
    fn value_of(&self, field_id: &str) -> Option<String> {
        let number = |value: f64| Some(value.to_string());
        match field_id {
            field::AGE => number(self.age),
            field::GENDER => Some(self.gender.clone()),
            field::SCHOOL_GRADE => Some(self.school_grade.clone()),
            field::DAILY_USAGE => number(self.daily_usage),
            field::SLEEP_HOURS => number(self.sleep_hours),
            field::ACADEMIC_PERFORMANCE => number(self.academic_performance),
            field::SOCIAL_INTERACTIONS => number(self.social_interactions),
            field::EXERCISE_HOURS => number(self.exercise_hours),
            field::ANXIETY => number(self.anxiety),
            field::DEPRESSION => number(self.depression),
            field::SELF_ESTEEM => number(self.self_esteem),
            field::PARENTAL_CONTROL => number(self.parental_control),
            field::SCREEN_BEFORE_BED => number(self.screen_before_bed),
            field::PHONE_CHECKS => number(self.phone_checks),
            field::APPS_USED_DAILY => number(self.apps_used_daily),
            field::TIME_SOCIAL_MEDIA => number(self.time_social_media),
            field::TIME_GAMING => number(self.time_gaming),
            field::TIME_EDUCATION => number(self.time_education),
            field::PHONE_USAGE_PURPOSE => Some(self.phone_usage_purpose.clone()),
            field::FAMILY_COMMUNICATION => number(self.family_communication),
            field::WEEKEND_USAGE => number(self.weekend_usage),
            _ => None,
        }
    }
}

/// Tone of the status banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

impl StatusTone {
    pub fn badge_color(self) -> Color32 {
        match self {
            Self::Idle => Color32::from_gray(120),
            Self::Busy => Color32::from_rgb(0x8a, 0x2b, 0xe2),
            Self::Info => Color32::from_rgb(0x00, 0xff, 0x88),
            Self::Warning => Color32::from_rgb(0xff, 0xaa, 0x00),
            Self::Error => Color32::from_rgb(0xff, 0x33, 0x66),
        }
    }
}

/// Status banner shown under the questionnaire.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Fill in the questionnaire and analyze".into(),
            tone: StatusTone::Idle,
        }
    }
}

/// Results surface: risk text, severity tag, recommendation panel.
#[derive(Clone, Debug, Default)]
pub struct ResultsPanelState {
    pub visible: bool,
    /// Scroll the panel into view on the next frame.
    pub scroll_to: bool,
    pub risk_text: String,
    pub severity: &'static str,
    pub recommendations: Option<RecommendationPanel>,
}

impl ResultsSurface for UiState {
    fn reveal_results(&mut self) {
        self.results.visible = true;
        self.results.scroll_to = true;
    }

    fn set_risk_summary(&mut self, text: String, severity: &'static str) {
        self.results.risk_text = text;
        self.results.severity = severity;
    }

    fn set_recommendations(&mut self, panel: RecommendationPanel) {
        self.results.recommendations = Some(panel);
    }

    fn show_error(&mut self, message: String) {
        self.status = StatusBarState {
            text: format!("Prediction failed: {message}"),
            tone: StatusTone::Error,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs;

    #[test]
    fn questionnaire_exposes_every_collector_field() {
        let form = QuestionnaireState::default();
        let request = inputs::collect(&form).unwrap();
        assert_eq!(request.age, 15.0);
        assert_eq!(request.gender, "Female");
        assert_eq!(request.phone_usage_purpose, "Social Media");
    }

    #[test]
    fn unknown_field_reads_as_absent() {
        let form = QuestionnaireState::default();
        assert_eq!(form.value_of("not_a_control"), None);
    }

    #[test]
    fn show_error_sets_error_tone_without_revealing_results() {
        let mut ui = UiState::default();
        ResultsSurface::show_error(&mut ui, "HTTP 500".into());
        assert_eq!(ui.status.tone, StatusTone::Error);
        assert!(ui.status.text.contains("HTTP 500"));
        assert!(!ui.results.visible);
    }
}
