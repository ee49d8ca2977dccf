//! Gender Gap View
//! Central panel showing the animated diverging bar chart for the selected decade.

use crate::aggregate::gap::decade_label;
use crate::charts::{gap_chart, BarAnimator};
use crate::gui::control_panel::DatasetStatus;
use crate::view_state::GapChartState;
use egui::{Color32, RichText, ScrollArea};

pub struct GapView {
    animator: BarAnimator,
    seen_revision: Option<u64>,
}

impl GapView {
    pub fn new(transition_secs: f64) -> Self {
        Self {
            animator: BarAnimator::new(transition_secs),
            seen_revision: None,
        }
    }

    /// Draw the chart. Returns whether a transition is still running.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        gap: Option<&GapChartState>,
        status: &DatasetStatus,
        now: f64,
    ) -> bool {
        let Some(gap) = gap else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(status.placeholder("gender gap data")).size(20.0));
            });
            return false;
        };

        let layout = gap.layout();
        if self.seen_revision != Some(gap.revision()) {
            self.animator
                .transition(&layout.bars, layout.baseline(), gap.animate(), now);
            self.seen_revision = Some(gap.revision());
        }

        let Some(decade) = gap.selected() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return false;
        };

        ui.label(
            RichText::new(format!(
                "Secondary school enrollment gap, {}",
                decade_label(decade)
            ))
            .size(18.0)
            .strong(),
        );
        ui.label(
            RichText::new("Pink bars: more girls enrolled. Blue bars: more boys enrolled.")
                .size(12.0)
                .color(Color32::GRAY),
        );
        ui.add_space(10.0);

        let bars = self.animator.frame(now);
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                gap_chart::draw(ui, layout, &bars);
            });

        self.animator.is_animating(now)
    }
}
