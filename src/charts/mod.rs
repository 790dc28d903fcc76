//! Stateful visualization widgets for the prediction results.
//!
//! The engine owns one model per mount point (gauge, importance bars,
//! mental-health radar). Rendering replaces the previous model outright, so
//! repeated renders never accumulate artifacts; the gauge keeps just enough
//! of the prior state (its last sweep angle) to animate from it.

mod gauge;
mod importance;
mod radar;

pub use gauge::{GAUGE_CAPTION, GaugeModel, SWEEP_DURATION, risk_color};
pub use importance::{BarChartModel, humanize_label};
pub use radar::{RADAR_AXES, RADAR_MAX, RadarModel};

use std::time::Instant;

use crate::api::FeatureImportance;
use crate::inputs::MentalMetrics;

/// Owner of the three chart mount points.
#[derive(Default)]
pub struct VisualizationEngine {
    gauge: Option<GaugeModel>,
    importance: Option<BarChartModel>,
    radar: Option<RadarModel>,
}

impl VisualizationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the risk gauge, animating from the previous sweep angle
    /// (or from zero on the first render).
    pub fn render_risk_gauge(&mut self, probability: f64, now: Instant) {
        let start_sweep = self
            .gauge
            .as_ref()
            .map(|gauge| gauge.target_sweep())
            .unwrap_or(0.0);
        self.gauge = Some(GaugeModel::new(probability, start_sweep, now));
    }

    /// Replace the importance chart with one bar per item, in input order.
    pub fn render_importance_chart(&mut self, items: &[FeatureImportance]) {
        self.importance = Some(BarChartModel::new(items));
    }

    /// Replace the mental-health radar with a fresh metric snapshot.
    pub fn render_mental_health_radar(&mut self, metrics: MentalMetrics) {
        self.radar = Some(RadarModel::new(metrics));
    }

    pub fn gauge(&self) -> Option<&GaugeModel> {
        self.gauge.as_ref()
    }

    pub fn importance(&self) -> Option<&BarChartModel> {
        self.importance.as_ref()
    }

    pub fn radar(&self) -> Option<&RadarModel> {
        self.radar.as_ref()
    }

    /// True while the gauge sweep animation is still running.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.gauge
            .as_ref()
            .is_some_and(|gauge| gauge.is_animating(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[(&str, f64)]) -> Vec<FeatureImportance> {
        values
            .iter()
            .map(|(feature, importance)| FeatureImportance {
                feature: feature.to_string(),
                importance: *importance,
            })
            .collect()
    }

    #[test]
    fn rendering_twice_keeps_exactly_one_model_per_mount() {
        let mut engine = VisualizationEngine::new();
        let now = Instant::now();
        engine.render_risk_gauge(0.4, now);
        engine.render_risk_gauge(0.8, now);
        engine.render_importance_chart(&items(&[("A", 0.5)]));
        engine.render_importance_chart(&items(&[("B", 0.2), ("C", 0.1)]));
        engine.render_mental_health_radar(MentalMetrics::default());
        engine.render_mental_health_radar(MentalMetrics::default());

        assert_eq!(engine.gauge().unwrap().probability(), 0.8);
        let importance = engine.importance().unwrap();
        assert_eq!(importance.bars().len(), 2);
        assert_eq!(importance.bars()[0].label, "B");
        assert!(engine.radar().is_some());
    }

    #[test]
    fn second_gauge_render_animates_from_previous_angle() {
        let mut engine = VisualizationEngine::new();
        let now = Instant::now();
        engine.render_risk_gauge(0.5, now);
        let first_target = engine.gauge().unwrap().target_sweep();
        engine.render_risk_gauge(0.9, now);
        let gauge = engine.gauge().unwrap();
        assert_eq!(gauge.sweep_at(now), first_target);
        assert!(gauge.target_sweep() > first_target);
    }

    #[test]
    fn first_gauge_render_sweeps_from_zero() {
        let mut engine = VisualizationEngine::new();
        let now = Instant::now();
        engine.render_risk_gauge(0.7, now);
        assert_eq!(engine.gauge().unwrap().sweep_at(now), 0.0);
    }
}
