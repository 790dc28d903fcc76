//! Five-axis mental-health radar chart.
//!
//! Anxiety and depression are plotted inverted (`10 - value`) so that higher
//! on the chart always reads as healthier, and sleep hours are scaled by
//! 1.25 to map a typical 0-8h range onto the 0-10 display scale. Inputs are
//! not clamped; out-of-range values plot outside the outer ring.

use std::f32::consts::TAU;

use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, epaint::PathShape};

use crate::inputs::MentalMetrics;

/// Axis labels, in plotting order.
pub const RADAR_AXES: [&str; 5] = [
    "Sleep Quality",
    "Social Life",
    "Self Esteem",
    "Low Anxiety",
    "Low Depression",
];

/// Fixed upper bound of every axis.
pub const RADAR_MAX: f64 = 10.0;

const SLEEP_SCALE: f64 = 1.25;
const GRID_RINGS: usize = 5;

const OUTLINE: Color32 = Color32::from_rgb(0xea, 0x00, 0xff);
const FILL: Color32 = Color32::from_rgba_premultiplied(0x22, 0x0a, 0x38, 0x66);
const GRID: Color32 = Color32::from_rgba_premultiplied(0x22, 0x0a, 0x38, 0x50);

/// Rendered state of the radar mount point.
pub struct RadarModel {
    values: [f64; 5],
}

impl RadarModel {
    pub fn new(metrics: MentalMetrics) -> Self {
        Self {
            values: [
                metrics.sleep * SLEEP_SCALE,
                metrics.social,
                metrics.self_esteem,
                RADAR_MAX - metrics.anxiety,
                RADAR_MAX - metrics.depression,
            ],
        }
    }

    /// Plotted values in [`RADAR_AXES`] order.
    pub fn values(&self) -> [f64; 5] {
        self.values
    }

    /// Paint the radar into `rect`.
    pub fn paint(&self, painter: &egui::Painter, rect: Rect) {
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.5 - 24.0;

        for ring in 1..=GRID_RINGS {
            let ring_radius = radius * ring as f32 / GRID_RINGS as f32;
            let points = vertex_ring(center, ring_radius);
            painter.add(PathShape::closed_line(points, Stroke::new(1.0, GRID)));
        }
        for (index, label) in RADAR_AXES.iter().enumerate() {
            let tip = vertex(center, radius, index);
            painter.line_segment([center, tip], Stroke::new(1.0, GRID));
            let label_pos = vertex(center, radius + 16.0, index);
            painter.text(
                label_pos,
                Align2::CENTER_CENTER,
                *label,
                FontId::proportional(13.0),
                Color32::WHITE,
            );
        }

        let points: Vec<Pos2> = self
            .values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let fraction = (*value / RADAR_MAX) as f32;
                vertex(center, radius * fraction, index)
            })
            .collect();
        painter.add(PathShape::convex_polygon(
            points.clone(),
            FILL,
            Stroke::new(2.0, OUTLINE),
        ));
        for point in points {
            painter.circle_filled(point, 4.0, OUTLINE);
        }
    }
}

/// Position of axis `index` at `radius` from the center, starting at the top
/// and proceeding clockwise.
fn vertex(center: Pos2, radius: f32, index: usize) -> Pos2 {
    let angle = TAU * index as f32 / RADAR_AXES.len() as f32 - TAU / 4.0;
    Pos2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

fn vertex_ring(center: Pos2, radius: f32) -> Vec<Pos2> {
    (0..RADAR_AXES.len())
        .map(|index| vertex(center, radius, index))
        .collect()
}
