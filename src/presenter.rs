//! Maps a settled prediction exchange onto the results surface.
//!
//! The surface itself (text, severity styling, recommendation list, error
//! banner) is injected as a trait so the orchestration can be tested without
//! a live UI; the charts go through [`VisualizationEngine`].

use std::time::Instant;

use crate::api::{PredictError, PredictionOutcome, Recommendation};
use crate::charts::VisualizationEngine;
use crate::inputs::MentalMetrics;

/// Message shown when the service returned no recommendations.
pub const AFFIRMATION: &str = "Your habits look healthy!";

/// Recommendation panel content, in server-supplied order.
#[derive(Clone, Debug, PartialEq)]
pub enum RecommendationPanel {
    /// No recommendations; show the affirmation message instead.
    AllClear,
    Items(Vec<Recommendation>),
}

/// Write access to the non-chart parts of the results surface.
pub trait ResultsSurface {
    /// Make the results area visible (and scrolled into view where the
    /// surface supports it).
    fn reveal_results(&mut self);
    /// Set the headline risk text and its severity tag (`low`/`medium`/`high`).
    fn set_risk_summary(&mut self, text: String, severity: &'static str);
    /// Replace the recommendation panel content.
    fn set_recommendations(&mut self, panel: RecommendationPanel);
    /// Surface a terminal submission error to the user.
    fn show_error(&mut self, message: String);
}

/// Headline text for a risk probability.
pub fn risk_text(probability: f64) -> String {
    format!("{:.1}% Risk", probability * 100.0)
}

/// Present a settled exchange.
///
/// On failure only the error is surfaced; no widget is rendered or
/// replaced. On success the surface is revealed and the widgets render in a
/// fixed order: risk text, gauge, importance chart, radar (from the
/// caller's fresh metric snapshot, not the response), recommendations.
pub fn present(
    settled: &Result<PredictionOutcome, PredictError>,
    metrics: MentalMetrics,
    engine: &mut VisualizationEngine,
    surface: &mut dyn ResultsSurface,
    now: Instant,
) {
    let outcome = match settled {
        Ok(outcome) => outcome,
        Err(err) => {
            surface.show_error(err.to_string());
            return;
        }
    };

    surface.reveal_results();
    surface.set_risk_summary(
        risk_text(outcome.risk_probability),
        outcome.risk_level.severity_tag(),
    );

    engine.render_risk_gauge(outcome.risk_probability, now);
    engine.render_importance_chart(&outcome.feature_importance);
    engine.render_mental_health_radar(metrics);

    let panel = if outcome.recommendations.is_empty() {
        RecommendationPanel::AllClear
    } else {
        RecommendationPanel::Items(outcome.recommendations.clone())
    };
    surface.set_recommendations(panel);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FeatureImportance, RiskLevel};

    #[derive(Default)]
    struct RecordingSurface {
        revealed: bool,
        summary: Option<(String, &'static str)>,
        panel: Option<RecommendationPanel>,
        error: Option<String>,
    }

    impl ResultsSurface for RecordingSurface {
        fn reveal_results(&mut self) {
            self.revealed = true;
        }

        fn set_risk_summary(&mut self, text: String, severity: &'static str) {
            self.summary = Some((text, severity));
        }

        fn set_recommendations(&mut self, panel: RecommendationPanel) {
            self.panel = Some(panel);
        }

        fn show_error(&mut self, message: String) {
            self.error = Some(message);
        }
    }

    fn high_risk_outcome() -> PredictionOutcome {
        PredictionOutcome {
            risk_probability: 0.82,
            risk_level: RiskLevel::High,
            feature_importance: vec![FeatureImportance {
                feature: "Daily_Usage_Hours".to_string(),
                importance: 0.41,
            }],
            recommendations: Vec::new(),
        }
    }

    fn unhealthy_metrics() -> MentalMetrics {
        MentalMetrics {
            sleep: 4.0,
            social: 2.0,
            self_esteem: 3.0,
            anxiety: 8.0,
            depression: 7.0,
        }
    }

    #[test]
    fn success_renders_text_charts_and_affirmation() {
        let mut engine = VisualizationEngine::new();
        let mut surface = RecordingSurface::default();
        present(
            &Ok(high_risk_outcome()),
            unhealthy_metrics(),
            &mut engine,
            &mut surface,
            Instant::now(),
        );

        assert!(surface.revealed);
        assert_eq!(
            surface.summary,
            Some(("82.0% Risk".to_string(), "high"))
        );
        assert_eq!(surface.panel, Some(RecommendationPanel::AllClear));
        assert!(surface.error.is_none());

        assert_eq!(engine.gauge().unwrap().probability(), 0.82);
        let bars = engine.importance().unwrap().bars();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].label, "Daily Usage Hours");
        assert_eq!(bars[0].tooltip(), "Importance: 41.0%");
        assert_eq!(
            engine.radar().unwrap().values(),
            [5.0, 2.0, 3.0, 2.0, 3.0]
        );
    }

    #[test]
    fn radar_uses_the_callers_snapshot_not_the_response() {
        let mut engine = VisualizationEngine::new();
        let mut surface = RecordingSurface::default();
        let mut metrics = unhealthy_metrics();
        metrics.sleep = 8.0;
        present(
            &Ok(high_risk_outcome()),
            metrics,
            &mut engine,
            &mut surface,
            Instant::now(),
        );
        assert_eq!(engine.radar().unwrap().values()[0], 10.0);
    }

    #[test]
    fn recommendations_render_in_server_order_with_priorities() {
        let mut outcome = high_risk_outcome();
        outcome.recommendations = vec![
            Recommendation {
                priority: 1,
                icon: "🌙".to_string(),
                title: "Digital Sunset".to_string(),
                description: "No screens before bed.".to_string(),
            },
            Recommendation {
                priority: 3,
                icon: "🏃".to_string(),
                title: "Move More".to_string(),
                description: "Add daily exercise.".to_string(),
            },
        ];
        let mut engine = VisualizationEngine::new();
        let mut surface = RecordingSurface::default();
        present(
            &Ok(outcome),
            MentalMetrics::default(),
            &mut engine,
            &mut surface,
            Instant::now(),
        );

        let Some(RecommendationPanel::Items(items)) = surface.panel else {
            panic!("expected recommendation items");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Digital Sunset");
        assert_eq!(items[0].priority, 1);
        assert_eq!(items[1].title, "Move More");
        assert_eq!(items[1].priority, 3);
    }

    #[test]
    fn failure_surfaces_error_and_renders_nothing() {
        let mut engine = VisualizationEngine::new();
        let mut surface = RecordingSurface::default();
        present(
            &Err(PredictError::Server {
                status: 500,
                body: "model unavailable".to_string(),
            }),
            MentalMetrics::default(),
            &mut engine,
            &mut surface,
            Instant::now(),
        );

        let error = surface.error.unwrap();
        assert!(error.contains("500"));
        assert!(error.contains("model unavailable"));
        assert!(!surface.revealed);
        assert!(surface.summary.is_none());
        assert!(surface.panel.is_none());
        assert!(engine.gauge().is_none());
        assert!(engine.importance().is_none());
        assert!(engine.radar().is_none());
    }

    #[test]
    fn risk_text_formats_one_decimal() {
        assert_eq!(risk_text(0.82), "82.0% Risk");
        assert_eq!(risk_text(0.055), "5.5% Risk");
    }
}
