//! Half-circle risk gauge with an animated sweep.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, epaint::PathShape};

/// Duration of the sweep animation between renders.
pub const SWEEP_DURATION: Duration = Duration::from_millis(1500);

/// Static caption drawn under the percentage label.
pub const GAUGE_CAPTION: &str = "Addiction Risk";

const ARC_THICKNESS: f32 = 10.0;
const ARC_SEGMENTS: usize = 64;

const LOW_RISK_COLOR: Color32 = Color32::from_rgb(0x00, 0xff, 0x88);
const MEDIUM_RISK_COLOR: Color32 = Color32::from_rgb(0xff, 0xaa, 0x00);
const HIGH_RISK_COLOR: Color32 = Color32::from_rgb(0xff, 0x33, 0x66);

/// Threshold coloring for a risk probability; boundaries are inclusive-low.
pub fn risk_color(probability: f64) -> Color32 {
    if probability < 0.3 {
        LOW_RISK_COLOR
    } else if probability < 0.7 {
        MEDIUM_RISK_COLOR
    } else {
        HIGH_RISK_COLOR
    }
}

/// Rendered state of the gauge mount point.
///
/// The sweep is measured in radians over the half circle, so a probability
/// of `p` targets a sweep of `p * PI`.
pub struct GaugeModel {
    probability: f64,
    start_sweep: f32,
    target_sweep: f32,
    started_at: Instant,
}

impl GaugeModel {
    pub fn new(probability: f64, start_sweep: f32, now: Instant) -> Self {
        Self {
            probability,
            start_sweep,
            target_sweep: PI * probability as f32,
            started_at: now,
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn target_sweep(&self) -> f32 {
        self.target_sweep
    }

    /// Sweep angle at `now`, interpolating from the previous angle.
    pub fn sweep_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at);
        let t = (elapsed.as_secs_f32() / SWEEP_DURATION.as_secs_f32()).clamp(0.0, 1.0);
        self.start_sweep + (self.target_sweep - self.start_sweep) * t
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) < SWEEP_DURATION
    }

    /// Percentage label overlaid on the gauge, one decimal place.
    pub fn label(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }

    /// Paint the gauge into `rect`.
    pub fn paint(&self, painter: &egui::Painter, rect: Rect, now: Instant) {
        let color = risk_color(self.probability);
        let center = Pos2::new(rect.center().x, rect.max.y - 4.0);
        let radius = (rect.width() * 0.5).min(rect.height()) - ARC_THICKNESS;

        // Faint full half circle behind the sweep.
        let track = arc_points(center, radius, PI);
        painter.add(PathShape::line(
            track,
            Stroke::new(ARC_THICKNESS, Color32::from_gray(50)),
        ));

        let sweep = self.sweep_at(now);
        if sweep > 0.0 {
            let points = arc_points(center, radius, sweep);
            painter.add(PathShape::line(points, Stroke::new(ARC_THICKNESS, color)));
        }

        painter.text(
            Pos2::new(center.x, center.y - radius * 0.45),
            Align2::CENTER_CENTER,
            self.label(),
            FontId::proportional(20.0),
            color,
        );
        painter.text(
            Pos2::new(center.x, center.y - 10.0),
            Align2::CENTER_CENTER,
            GAUGE_CAPTION,
            FontId::proportional(14.0),
            Color32::from_gray(170),
        );
    }
}

/// Sample an arc from the left horizon through `sweep` radians.
fn arc_points(center: Pos2, radius: f32, sweep: f32) -> Vec<Pos2> {
    let segments = ARC_SEGMENTS.max(2);
    (0..=segments)
        .map(|i| {
            let angle = PI + sweep * i as f32 / segments as f32;
            Pos2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_thresholds_are_inclusive_low() {
        assert_eq!(risk_color(0.0), LOW_RISK_COLOR);
        assert_eq!(risk_color(0.29), LOW_RISK_COLOR);
        assert_eq!(risk_color(0.3), MEDIUM_RISK_COLOR);
        assert_eq!(risk_color(0.69), MEDIUM_RISK_COLOR);
        assert_eq!(risk_color(0.7), HIGH_RISK_COLOR);
        assert_eq!(risk_color(1.0), HIGH_RISK_COLOR);
    }

    #[test]
    fn sweep_interpolates_linearly_to_target() {
        let now = Instant::now();
        let gauge = GaugeModel::new(0.5, 0.0, now);
        assert_eq!(gauge.sweep_at(now), 0.0);
        let halfway = gauge.sweep_at(now + SWEEP_DURATION / 2);
        assert!((halfway - gauge.target_sweep() / 2.0).abs() < 1e-4);
        assert_eq!(gauge.sweep_at(now + SWEEP_DURATION), gauge.target_sweep());
        assert_eq!(
            gauge.sweep_at(now + SWEEP_DURATION * 3),
            gauge.target_sweep()
        );
    }

    #[test]
    fn sweep_also_animates_downward() {
        let now = Instant::now();
        let gauge = GaugeModel::new(0.2, PI, now);
        assert_eq!(gauge.sweep_at(now), PI);
        assert!(gauge.sweep_at(now + SWEEP_DURATION / 2) < PI);
        let settled = gauge.sweep_at(now + SWEEP_DURATION);
        assert!((settled - gauge.target_sweep()).abs() < 1e-6);
    }

    #[test]
    fn label_formats_one_decimal_percent() {
        let gauge = GaugeModel::new(0.82, 0.0, Instant::now());
        assert_eq!(gauge.label(), "82.0%");
    }

    #[test]
    fn animation_settles_after_duration() {
        let now = Instant::now();
        let gauge = GaugeModel::new(0.6, 0.0, now);
        assert!(gauge.is_animating(now));
        assert!(!gauge.is_animating(now + SWEEP_DURATION));
    }
}
