//! Control Panel Widget
//! Left side panel with view tabs, selections and dataset status.

use crate::aggregate::gap::decade_label;
use crate::lifepath::Gender;
use crate::view_state::{AppState, Intent};
use egui::{Color32, ComboBox, RichText};

/// Which visualization fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    GenderGap,
    LifePath,
    Globe,
}

impl ActiveView {
    fn label(self) -> &'static str {
        match self {
            ActiveView::GenderGap => "📊 Gender gap",
            ActiveView::LifePath => "🧭 Life path",
            ActiveView::Globe => "🌍 Globe",
        }
    }
}

/// Load state of one dataset, shown as a status line.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetStatus {
    Loading,
    Loaded(String),
    Failed(String),
}

impl DatasetStatus {
    /// Central-panel text while a view has nothing to draw.
    pub fn placeholder(&self, what: &str) -> String {
        match self {
            DatasetStatus::Loading => format!("Loading {}...", what),
            DatasetStatus::Loaded(_) | DatasetStatus::Failed(_) => "No Data".to_string(),
        }
    }

    fn show(&self, ui: &mut egui::Ui, name: &str) {
        let (text, color) = match self {
            DatasetStatus::Loading => (format!("{}: loading...", name), Color32::GRAY),
            DatasetStatus::Loaded(summary) => {
                (format!("{}: {}", name, summary), Color32::from_rgb(40, 167, 69))
            }
            DatasetStatus::Failed(error) => {
                (format!("{}: Error: {}", name, error), Color32::from_rgb(220, 53, 69))
            }
        };
        ui.label(RichText::new(text).size(11.0).color(color));
    }
}

/// Left side control panel.
pub struct ControlPanel {
    pub active_view: ActiveView,
    pub gap_status: DatasetStatus,
    pub life_status: DatasetStatus,
    pub globe_status: DatasetStatus,
    pub export_status: Option<String>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            active_view: ActiveView::default(),
            gap_status: DatasetStatus::Loading,
            life_status: DatasetStatus::Loading,
            globe_status: DatasetStatus::Loading,
            export_status: None,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, state: &AppState) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Gender Atlas")
                    .size(22.0)
                    .color(Color32::from_rgb(255, 130, 198)),
            );
            ui.label(
                RichText::new("Education, family and longevity by region")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== View Tabs =====
        ui.horizontal(|ui| {
            for view in [ActiveView::GenderGap, ActiveView::LifePath, ActiveView::Globe] {
                ui.selectable_value(&mut self.active_view, view, view.label());
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        match self.active_view {
            ActiveView::GenderGap => self.show_gap_controls(ui, state, &mut action),
            ActiveView::LifePath => Self::show_life_controls(ui, state, &mut action),
            ActiveView::Globe => {
                ui.label(RichText::new("🌍 World").size(14.0).strong());
                ui.add_space(5.0);
                ui.label(
                    RichText::new("Drag the globe to rotate it.")
                        .size(12.0)
                        .color(Color32::GRAY),
                );
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📁 Data").size(14.0).strong());
        ui.add_space(5.0);
        self.gap_status.show(ui, "Gender gap");
        self.life_status.show(ui, "Life path");
        self.globe_status.show(ui, "World map");

        action
    }

    fn show_gap_controls(
        &mut self,
        ui: &mut egui::Ui,
        state: &AppState,
        action: &mut ControlPanelAction,
    ) {
        ui.label(RichText::new("📅 Decade").size(14.0).strong());
        ui.add_space(5.0);

        let gap = state.gap.as_ref();
        ui.add_enabled_ui(gap.is_some_and(|g| !g.decades().is_empty()), |ui| {
            let selected = gap
                .and_then(|g| g.selected())
                .map(decade_label)
                .unwrap_or_default();
            ComboBox::from_id_salt("decade")
                .width(180.0)
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for &decade in gap.map(|g| g.decades()).unwrap_or_default() {
                        let is_selected = gap.and_then(|g| g.selected()) == Some(decade);
                        if ui
                            .selectable_label(is_selected, decade_label(decade))
                            .clicked()
                        {
                            *action = ControlPanelAction::Dispatch(Intent::SelectDecade(decade));
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.vertical_centered(|ui| {
            let enabled = gap.is_some_and(|g| !g.layout().bars.is_empty());
            ui.add_enabled_ui(enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export chart…").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    *action = ControlPanelAction::ExportChart;
                }
            });
        });
        if let Some(status) = &self.export_status {
            ui.add_space(5.0);
            ui.label(RichText::new(status).size(11.0).color(Color32::GRAY));
        }
    }

    fn show_life_controls(ui: &mut egui::Ui, state: &AppState, action: &mut ControlPanelAction) {
        ui.label(RichText::new("🔧 Your path").size(14.0).strong());
        ui.add_space(8.0);

        let Some(life) = state.life.as_ref() else {
            ui.label(RichText::new("Waiting for data...").color(Color32::GRAY));
            return;
        };
        let data = life.data();
        let path = life.state();

        let label_width = 70.0;
        let combo_width = 180.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Region:"));
            ComboBox::from_id_salt("region")
                .width(combo_width)
                .selected_text(path.region.clone().unwrap_or_default())
                .show_ui(ui, |ui| {
                    for region in data.regions() {
                        if ui
                            .selectable_label(path.region.as_ref() == Some(region), region)
                            .clicked()
                        {
                            *action =
                                ControlPanelAction::Dispatch(Intent::SelectRegion(region.clone()));
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Years:"));
            ComboBox::from_id_salt("year")
                .width(combo_width)
                .selected_text(path.year.map(decade_label).unwrap_or_default())
                .show_ui(ui, |ui| {
                    for &year in data.years() {
                        if ui
                            .selectable_label(path.year == Some(year), decade_label(year))
                            .clicked()
                        {
                            *action = ControlPanelAction::Dispatch(Intent::SelectYear(year));
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("I am a:"));
            for gender in [Gender::Female, Gender::Male] {
                if ui
                    .selectable_label(path.gender == gender, gender.label())
                    .clicked()
                    && path.gender != gender
                {
                    *action = ControlPanelAction::Dispatch(Intent::SelectGender(gender));
                }
            }
        });
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Dispatch(Intent),
    ExportChart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_load_stops_showing_loading() {
        assert_eq!(
            DatasetStatus::Loading.placeholder("gender gap data"),
            "Loading gender gap data..."
        );
        assert_eq!(
            DatasetStatus::Failed("file not found".to_string()).placeholder("gender gap data"),
            "No Data"
        );
    }

    #[test]
    fn test_period_labels_use_hyphen() {
        assert_eq!(decade_label(1990), "1990-1999");
    }
}
