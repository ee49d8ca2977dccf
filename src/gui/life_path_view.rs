//! Life Path View
//! Stage track, narrative card, mini chart and stepper buttons.

use crate::charts::mini_charts;
use crate::gui::control_panel::DatasetStatus;
use crate::lifepath::{StageStatus, ViewKind, STAGES};
use crate::view_state::{Intent, LifePathModel};
use egui::{Color32, RichText};

const ACTIVE: Color32 = Color32::from_rgb(255, 130, 198);
const COMPLETED: Color32 = Color32::from_rgb(255, 196, 222);
const CARD_WIDTH: f32 = 560.0;

#[derive(Default)]
pub struct LifePathView {
    seen_revision: Option<u64>,
    chart_started: f64,
}

impl LifePathView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the view. Returns the intent of a clicked control, if any, and
    /// whether the mini chart is still growing.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        model: Option<&LifePathModel>,
        status: &DatasetStatus,
        now: f64,
    ) -> (Option<Intent>, bool) {
        let Some(model) = model else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(status.placeholder("life path data")).size(20.0));
            });
            return (None, false);
        };

        if self.seen_revision != Some(model.revision()) {
            self.seen_revision = Some(model.revision());
            self.chart_started = now;
        }

        let state = model.state();
        let view = model.view();
        let mut intent = None;

        // ===== Stage Track =====
        ui.horizontal(|ui| {
            for (index, stage) in STAGES.iter().enumerate() {
                let (fill, text) = match state.stage_status(index) {
                    StageStatus::Active => (ACTIVE, Color32::WHITE),
                    StageStatus::Completed => (COMPLETED, Color32::BLACK),
                    StageStatus::Upcoming => {
                        (ui.visuals().widgets.inactive.bg_fill, ui.visuals().text_color())
                    }
                };
                let button = egui::Button::new(
                    RichText::new(format!("{}. {}", index + 1, stage.label)).color(text),
                )
                .fill(fill)
                .min_size(egui::vec2(100.0, 28.0));
                if ui.add(button).clicked() {
                    intent = Some(Intent::JumpToStage(stage.id));
                }
            }
        });

        ui.add_space(15.0);

        // ===== Narrative Card =====
        let mut animating = false;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(14.0)
            .show(ui, |ui| {
                ui.set_max_width(CARD_WIDTH);
                ui.label(RichText::new(&view.title).size(18.0).strong());
                ui.add_space(6.0);

                let text_color = match view.kind {
                    ViewKind::Story => ui.visuals().text_color(),
                    ViewKind::InsufficientData | ViewKind::NoData => Color32::GRAY,
                };
                ui.label(RichText::new(&view.text).size(14.0).color(text_color));

                if let Some(chart) = &view.chart {
                    ui.add_space(10.0);
                    let layout = mini_charts::layout(chart);
                    animating = mini_charts::draw(
                        ui,
                        "life_path_mini_chart",
                        &layout,
                        self.chart_started,
                        now,
                    );
                }
            });

        ui.add_space(15.0);

        // ===== Stepper =====
        ui.horizontal(|ui| {
            ui.add_enabled_ui(!state.is_first(), |ui| {
                if ui.button("◀ Previous").clicked() {
                    intent = Some(Intent::PrevStage);
                }
            });
            if ui.button(state.next_label()).clicked() {
                intent = Some(Intent::NextStage);
            }
        });

        (intent, animating)
    }
}
