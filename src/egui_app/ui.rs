//! egui renderer for the application UI.

use std::time::{Duration, Instant};

use eframe::egui::{self, Align, Color32, Frame, RichText, Sense, Ui, Vec2};

use crate::config;
use crate::egui_app::controller::PredictController;
use crate::egui_app::state::{GENDER_OPTIONS, GRADE_OPTIONS, PURPOSE_OPTIONS};
use crate::egui_app::view_model::{self, RecommendationViews};
use crate::inputs::{field, slider_display};

/// Smallest usable window size.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(780.0, 600.0);

const GAUGE_SIZE: Vec2 = Vec2::new(220.0, 120.0);
const RADAR_SIZE: Vec2 = Vec2::new(300.0, 260.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: PredictController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create a new egui app, loading persisted configuration.
    pub fn new() -> Result<Self, String> {
        let config = config::load_or_default()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self {
            controller: PredictController::new(&config),
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 12);
        visuals.panel_fill = Color32::from_rgb(16, 16, 16);
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(16, 16, 16);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::new().fill(Color32::from_rgb(24, 24, 24)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Teen Phone Addiction Predictor").color(Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new("Close").color(Color32::WHITE))
                            .clicked()
                        {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(6.0, 10.0),
                        6.0,
                        status.tone.badge_color(),
                    );
                    ui.add_space(14.0);
                    ui.label(RichText::new(&status.text).color(Color32::WHITE));
                });
            });
    }

    fn render_questionnaire(&mut self, ui: &mut Ui) {
        ui.heading("Questionnaire");
        ui.add_space(6.0);

        let form = &mut self.controller.ui.form;
        slider_row(ui, "Age", field::AGE, &mut form.age, 10.0..=19.0);
        combo_row(ui, "Gender", &mut form.gender, &GENDER_OPTIONS);
        combo_row(ui, "School grade", &mut form.school_grade, &GRADE_OPTIONS);
        slider_row(
            ui,
            "Daily usage (h)",
            field::DAILY_USAGE,
            &mut form.daily_usage,
            0.0..=16.0,
        );
        slider_row(
            ui,
            "Sleep (h)",
            field::SLEEP_HOURS,
            &mut form.sleep_hours,
            0.0..=12.0,
        );
        slider_row(
            ui,
            "Academic performance",
            field::ACADEMIC_PERFORMANCE,
            &mut form.academic_performance,
            0.0..=100.0,
        );
        slider_row(
            ui,
            "Social interactions",
            field::SOCIAL_INTERACTIONS,
            &mut form.social_interactions,
            0.0..=10.0,
        );
        slider_row(
            ui,
            "Exercise (h)",
            field::EXERCISE_HOURS,
            &mut form.exercise_hours,
            0.0..=5.0,
        );
        slider_row(ui, "Anxiety", field::ANXIETY, &mut form.anxiety, 0.0..=10.0);
        slider_row(
            ui,
            "Depression",
            field::DEPRESSION,
            &mut form.depression,
            0.0..=10.0,
        );
        slider_row(
            ui,
            "Self esteem",
            field::SELF_ESTEEM,
            &mut form.self_esteem,
            0.0..=10.0,
        );
        slider_row(
            ui,
            "Parental control",
            field::PARENTAL_CONTROL,
            &mut form.parental_control,
            0.0..=10.0,
        );
        slider_row(
            ui,
            "Screen time before bed (h)",
            field::SCREEN_BEFORE_BED,
            &mut form.screen_before_bed,
            0.0..=5.0,
        );
        slider_row(
            ui,
            "Phone checks per day",
            field::PHONE_CHECKS,
            &mut form.phone_checks,
            0.0..=200.0,
        );
        slider_row(
            ui,
            "Apps used daily",
            field::APPS_USED_DAILY,
            &mut form.apps_used_daily,
            0.0..=30.0,
        );
        slider_row(
            ui,
            "Time on social media (h)",
            field::TIME_SOCIAL_MEDIA,
            &mut form.time_social_media,
            0.0..=12.0,
        );
        slider_row(
            ui,
            "Time on gaming (h)",
            field::TIME_GAMING,
            &mut form.time_gaming,
            0.0..=12.0,
        );
        slider_row(
            ui,
            "Time on education (h)",
            field::TIME_EDUCATION,
            &mut form.time_education,
            0.0..=12.0,
        );
        combo_row(
            ui,
            "Phone usage purpose",
            &mut form.phone_usage_purpose,
            &PURPOSE_OPTIONS,
        );
        slider_row(
            ui,
            "Family communication",
            field::FAMILY_COMMUNICATION,
            &mut form.family_communication,
            0.0..=10.0,
        );
        slider_row(
            ui,
            "Weekend usage (h)",
            field::WEEKEND_USAGE,
            &mut form.weekend_usage,
            0.0..=20.0,
        );

        ui.add_space(10.0);
        let submitting = self.controller.is_submitting();
        let label = if submitting {
            "Analyzing…"
        } else {
            "Analyze Addiction Risk"
        };
        if ui
            .add_enabled(!submitting, egui::Button::new(label))
            .clicked()
        {
            self.controller.handle_predict();
        }
    }

    fn render_results(&mut self, ui: &mut Ui, now: Instant) {
        if !self.controller.ui.results.visible {
            return;
        }

        ui.add_space(16.0);
        ui.separator();
        ui.heading("Results");

        let severity = self.controller.ui.results.severity;
        let risk_label = ui.label(
            RichText::new(&self.controller.ui.results.risk_text)
                .color(view_model::severity_color(severity))
                .size(24.0)
                .strong(),
        );
        if self.controller.ui.results.scroll_to {
            risk_label.scroll_to_me(Some(Align::TOP));
            self.controller.ui.results.scroll_to = false;
        }

        if let Some(gauge) = self.controller.engine.gauge() {
            let (rect, _) = ui.allocate_exact_size(GAUGE_SIZE, Sense::hover());
            gauge.paint(ui.painter(), rect, now);
        }

        if let Some(chart) = self.controller.engine.importance() {
            ui.add_space(12.0);
            ui.label("Feature importance");
            let size = Vec2::new(ui.available_width().min(520.0), chart.desired_height());
            let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
            chart.paint(ui.painter(), rect);
            if let Some(pos) = response.hover_pos() {
                if let Some(bar) = chart.bar_at(rect, pos) {
                    response.on_hover_text(bar.tooltip());
                }
            }
        }

        if let Some(radar) = self.controller.engine.radar() {
            ui.add_space(12.0);
            ui.label("Mental health profile");
            let (rect, _) = ui.allocate_exact_size(RADAR_SIZE, Sense::hover());
            radar.paint(ui.painter(), rect);
        }

        if let Some(panel) = &self.controller.ui.results.recommendations {
            ui.add_space(12.0);
            ui.label("Recommendations");
            match view_model::recommendation_views(panel) {
                RecommendationViews::Affirmation(message) => {
                    ui.label(
                        RichText::new(message).color(Color32::from_rgb(0x00, 0xff, 0x88)),
                    );
                }
                RecommendationViews::Rows(rows) => {
                    for row in rows {
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&row.icon).size(20.0));
                                ui.vertical(|ui| {
                                    ui.horizontal(|ui| {
                                        ui.label(RichText::new(&row.title).strong());
                                        ui.label(
                                            RichText::new(&row.priority_label)
                                                .small()
                                                .color(Color32::from_gray(170)),
                                        );
                                    });
                                    ui.label(&row.description);
                                });
                            });
                        });
                    }
                }
            }
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        let now = Instant::now();
        self.controller.poll_jobs(now);

        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_questionnaire(ui);
                self.render_results(ui, now);
            });
        });

        // Keep frames coming while a submission is pending or the gauge
        // sweep is still animating.
        if self.controller.is_submitting() {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else if self.controller.engine.is_animating(now) {
            ctx.request_repaint();
        }
    }
}

fn slider_row(
    ui: &mut Ui,
    label: &str,
    field_id: &str,
    value: &mut f64,
    range: std::ops::RangeInclusive<f64>,
) {
    ui.horizontal(|ui| {
        ui.add(egui::Slider::new(value, range).show_value(false).text(label));
        ui.monospace(slider_display(field_id, *value));
    });
}

fn combo_row(ui: &mut Ui, label: &str, value: &mut String, options: &[&str]) {
    egui::ComboBox::from_label(label)
        .selected_text(value.clone())
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
}
