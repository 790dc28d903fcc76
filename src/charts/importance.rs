//! Horizontal bar chart of feature importances.

use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke};

use crate::api::FeatureImportance;

const BAR_FILL: Color32 = Color32::from_rgb(0x8a, 0x2b, 0xe2);
const BAR_BORDER: Color32 = Color32::from_rgb(0xba, 0x55, 0xd3);
const BAR_THICKNESS: f32 = 24.0;
const LABEL_GUTTER: f32 = 150.0;

/// One rendered bar: humanized label plus raw importance.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

impl Bar {
    /// Hover text, importance as a one-decimal percentage.
    pub fn tooltip(&self) -> String {
        format!("Importance: {:.1}%", self.value * 100.0)
    }
}

/// Rendered state of the importance-chart mount point.
pub struct BarChartModel {
    bars: Vec<Bar>,
    axis_max: f64,
}

impl BarChartModel {
    /// Build one bar per item, preserving input order.
    pub fn new(items: &[FeatureImportance]) -> Self {
        let bars: Vec<Bar> = items
            .iter()
            .map(|item| Bar {
                label: humanize_label(&item.feature),
                value: item.importance,
            })
            .collect();
        let peak = bars.iter().map(|bar| bar.value).fold(0.0, f64::max);
        // Snap the axis to the next 10% step so tick labels stay round.
        let axis_max = ((peak * 10.0).ceil() / 10.0).max(0.1);
        Self { bars, axis_max }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Upper bound of the percentage axis.
    pub fn axis_max(&self) -> f64 {
        self.axis_max
    }

    /// Axis tick label for a fractional importance value.
    pub fn tick_label(value: f64) -> String {
        format!("{:.0}%", value * 100.0)
    }

    /// Height the chart wants for all bars plus the axis row.
    pub fn desired_height(&self) -> f32 {
        self.bars.len() as f32 * (BAR_THICKNESS + 8.0) + 24.0
    }

    /// Bar under `pos` when hovering inside `rect`, for tooltips.
    pub fn bar_at(&self, rect: Rect, pos: Pos2) -> Option<&Bar> {
        if !rect.contains(pos) {
            return None;
        }
        let row_height = BAR_THICKNESS + 8.0;
        let offset = pos.y - rect.min.y;
        let index = (offset / row_height).floor() as usize;
        if offset - index as f32 * row_height > BAR_THICKNESS {
            return None;
        }
        self.bars.get(index)
    }

    /// Paint the chart into `rect`, one row per bar.
    pub fn paint(&self, painter: &egui::Painter, rect: Rect) {
        let plot_left = rect.min.x + LABEL_GUTTER;
        let plot_width = (rect.width() - LABEL_GUTTER).max(1.0);
        let row_height = BAR_THICKNESS + 8.0;

        for (index, bar) in self.bars.iter().enumerate() {
            let top = rect.min.y + index as f32 * row_height;
            painter.text(
                Pos2::new(plot_left - 8.0, top + BAR_THICKNESS / 2.0),
                Align2::RIGHT_CENTER,
                &bar.label,
                FontId::proportional(14.0),
                Color32::WHITE,
            );
            let fraction = (bar.value / self.axis_max).clamp(0.0, 1.0) as f32;
            let bar_rect = Rect::from_min_size(
                Pos2::new(plot_left, top),
                egui::vec2(plot_width * fraction, BAR_THICKNESS),
            );
            painter.rect(
                bar_rect,
                6.0,
                BAR_FILL,
                Stroke::new(1.0, BAR_BORDER),
                egui::StrokeKind::Inside,
            );
        }

        let axis_y = rect.min.y + self.bars.len() as f32 * row_height + 12.0;
        for step in 0..=4 {
            let value = self.axis_max * step as f64 / 4.0;
            let x = plot_left + plot_width * step as f32 / 4.0;
            painter.text(
                Pos2::new(x, axis_y),
                Align2::CENTER_CENTER,
                Self::tick_label(value),
                FontId::proportional(12.0),
                Color32::from_gray(170),
            );
        }
    }
}

/// Humanize a feature name for display: underscores become spaces and camel
/// humps are split into words.
pub fn humanize_label(raw: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for part in raw.split(['_', ' ']).filter(|part| !part.is_empty()) {
        let mut word = String::new();
        let mut prev_lower = false;
        for ch in part.chars() {
            if ch.is_uppercase() && prev_lower {
                words.push(std::mem::take(&mut word));
            }
            prev_lower = ch.is_lowercase();
            word.push(ch);
        }
        if !word.is_empty() {
            words.push(word);
        }
    }
    words.join(" ")
}
