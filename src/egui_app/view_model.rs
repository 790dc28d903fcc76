//! Helpers to convert domain data into egui-facing view structs.

use egui::Color32;

use crate::api::Recommendation;
use crate::presenter::{AFFIRMATION, RecommendationPanel};

/// Color for a severity tag on the risk text.
pub fn severity_color(severity: &str) -> Color32 {
    match severity {
        "low" => Color32::from_rgb(0x00, 0xff, 0x88),
        "medium" => Color32::from_rgb(0xff, 0xaa, 0x00),
        "high" => Color32::from_rgb(0xff, 0x33, 0x66),
        _ => Color32::WHITE,
    }
}

/// Display row for one recommendation entry.
#[derive(Clone, Debug, PartialEq)]
pub struct RecommendationRow {
    pub priority_label: String,
    pub icon: String,
    pub title: String,
    pub description: String,
}

fn recommendation_row(item: &Recommendation) -> RecommendationRow {
    RecommendationRow {
        priority_label: format!("Priority {}", item.priority),
        icon: item.icon.clone(),
        title: item.title.clone(),
        description: item.description.clone(),
    }
}

/// Panel content ready to draw: either the affirmation or item rows.
#[derive(Clone, Debug, PartialEq)]
pub enum RecommendationViews {
    Affirmation(&'static str),
    Rows(Vec<RecommendationRow>),
}

/// Convert the presenter panel into displayable rows, preserving order.
pub fn recommendation_views(panel: &RecommendationPanel) -> RecommendationViews {
    match panel {
        RecommendationPanel::AllClear => RecommendationViews::Affirmation(AFFIRMATION),
        RecommendationPanel::Items(items) => {
            RecommendationViews::Rows(items.iter().map(recommendation_row).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_clear_maps_to_affirmation() {
        let views = recommendation_views(&RecommendationPanel::AllClear);
        assert_eq!(
            views,
            RecommendationViews::Affirmation("Your habits look healthy!")
        );
    }

    #[test]
    fn items_map_to_rows_in_order() {
        let panel = RecommendationPanel::Items(vec![
            Recommendation {
                priority: 2,
                icon: "🌙".into(),
                title: "Digital Sunset".into(),
                description: "No screens before bed.".into(),
            },
            Recommendation {
                priority: 1,
                icon: "📵".into(),
                title: "Notification Diet".into(),
                description: "Silence non-essential apps.".into(),
            },
        ]);
        let RecommendationViews::Rows(rows) = recommendation_views(&panel) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].priority_label, "Priority 2");
        assert_eq!(rows[0].title, "Digital Sunset");
        assert_eq!(rows[1].priority_label, "Priority 1");
    }

    #[test]
    fn unknown_severity_falls_back_to_white() {
        assert_eq!(severity_color("mystery"), Color32::WHITE);
        assert_ne!(severity_color("high"), Color32::WHITE);
    }
}
