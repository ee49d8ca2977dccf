//! Gender Atlas Main Application
//! Main window: control panel on the left, the active visualization in the center.

use crate::aggregate::gap::decade_label;
use crate::aggregate::GapDataset;
use crate::charts::export_chart;
use crate::config::AppConfig;
use crate::data::{load_records, Country, WorldTopology};
use crate::gui::control_panel::{ActiveView, DatasetStatus};
use crate::gui::{ControlPanel, ControlPanelAction, GapView, GlobeView, LifePathView};
use crate::lifepath::LifePathData;
use crate::view_state::{AppState, Intent};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Dataset loading result from a background thread
enum LoadResult {
    Gap(Result<GapDataset, String>),
    LifePath(Result<LifePathData, String>),
    World(Result<Vec<Country>, String>),
}

/// Main application window.
pub struct GenderAtlasApp {
    state: AppState,
    control_panel: ControlPanel,
    gap_view: GapView,
    life_view: LifePathView,
    globe_view: GlobeView,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    pending_loads: usize,
}

impl GenderAtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            state: AppState::new(&config),
            control_panel: ControlPanel::new(),
            gap_view: GapView::new(config.transition_secs()),
            life_view: LifePathView::new(),
            globe_view: GlobeView::new(),
            load_rx: None,
            pending_loads: 0,
        };
        app.start_loading(&config);
        app
    }

    /// Fetch every dataset once, each on its own thread.
    fn start_loading(&mut self, config: &AppConfig) {
        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.pending_loads = 3;

        Self::spawn_gap_load(tx.clone(), config);
        Self::spawn_life_load(tx.clone(), config);
        Self::spawn_world_load(tx, config);
    }

    fn spawn_gap_load(tx: Sender<LoadResult>, config: &AppConfig) {
        let path = config.gap_csv.clone();
        thread::spawn(move || {
            let result = load_records(&path)
                .map(|records| GapDataset::from_records(&records))
                .map_err(|e| e.to_string());
            let _ = tx.send(LoadResult::Gap(result));
        });
    }

    fn spawn_life_load(tx: Sender<LoadResult>, config: &AppConfig) {
        let path = config.life_path_csv.clone();
        let years = config.decade_range();
        thread::spawn(move || {
            let result = load_records(&path)
                .map(|records| LifePathData::from_records(&records, &years))
                .map_err(|e| e.to_string());
            let _ = tx.send(LoadResult::LifePath(result));
        });
    }

    fn spawn_world_load(tx: Sender<LoadResult>, config: &AppConfig) {
        let path = config.world_topology.clone();
        let object = config.topology_object.clone();
        thread::spawn(move || {
            let result = WorldTopology::load(&path, &object)
                .map(|world| world.countries)
                .map_err(|e| e.to_string());
            let _ = tx.send(LoadResult::World(result));
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        while let Ok(result) = rx.try_recv() {
            self.pending_loads = self.pending_loads.saturating_sub(1);
            match result {
                LoadResult::Gap(Ok(dataset)) => {
                    let rows = dataset.rows().len();
                    self.state.set_gap_data(dataset);
                    let decades = self.state.gap.as_ref().map_or(0, |g| g.decades().len());
                    self.control_panel.gap_status =
                        DatasetStatus::Loaded(format!("{} rows, {} decades", rows, decades));
                }
                LoadResult::LifePath(Ok(data)) => {
                    let summary = format!(
                        "{} regions, {} periods",
                        data.regions().len(),
                        data.years().len()
                    );
                    self.state.set_life_data(data);
                    self.control_panel.life_status = DatasetStatus::Loaded(summary);
                }
                LoadResult::World(Ok(countries)) => {
                    self.control_panel.globe_status =
                        DatasetStatus::Loaded(format!("{} countries", countries.len()));
                    self.globe_view.set_countries(countries);
                    self.state.set_globe_ready();
                }
                LoadResult::Gap(Err(error)) => {
                    tracing::error!("Failed to load gender gap data: {}", error);
                    self.control_panel.gap_status = DatasetStatus::Failed(error);
                }
                LoadResult::LifePath(Err(error)) => {
                    tracing::error!("Failed to load life path data: {}", error);
                    self.control_panel.life_status = DatasetStatus::Failed(error);
                }
                LoadResult::World(Err(error)) => {
                    tracing::error!("Failed to load world map: {}", error);
                    self.control_panel.globe_status = DatasetStatus::Failed(error);
                }
            }
        }

        // Put receiver back if still needed
        if self.pending_loads > 0 {
            self.load_rx = Some(rx);
        }
    }

    /// Handle chart export - ask for a path and write SVG or PNG
    fn handle_export_chart(&mut self) {
        let Some(gap) = self.state.gap.as_ref() else {
            return;
        };
        let Some(decade) = gap.selected() else {
            self.control_panel.export_status = Some("No chart to export".to_string());
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("SVG image", &["svg"])
            .add_filter("PNG image", &["png"])
            .set_file_name(format!("gender_gap_{}.svg", decade))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let title = format!("Secondary school enrollment gap, {}", decade_label(decade));
        self.control_panel.export_status = match export_chart(gap.layout(), &title, &output_path)
        {
            Ok(()) => Some(format!("Exported to {}", output_path.display())),
            Err(e) => {
                tracing::error!("Chart export failed: {}", e);
                Some(format!("Error: {}", e))
            }
        };
    }

    fn dispatch(&mut self, intent: Intent) {
        self.state.dispatch(intent);
    }
}

impl eframe::App for GenderAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        let now = ctx.input(|i| i.time);

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, &self.state) {
                        ControlPanelAction::Dispatch(intent) => self.dispatch(intent),
                        ControlPanelAction::ExportChart => self.handle_export_chart(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - active view
        let mut animating = self.load_rx.is_some();
        egui::CentralPanel::default().show(ctx, |ui| match self.control_panel.active_view {
            ActiveView::GenderGap => {
                animating |= self.gap_view.show(
                    ui,
                    self.state.gap.as_ref(),
                    &self.control_panel.gap_status,
                    now,
                );
            }
            ActiveView::LifePath => {
                let (intent, growing) = self.life_view.show(
                    ui,
                    self.state.life.as_ref(),
                    &self.control_panel.life_status,
                    now,
                );
                if let Some(intent) = intent {
                    self.dispatch(intent);
                }
                animating |= growing;
            }
            ActiveView::Globe => {
                let intents = self.globe_view.show(
                    ui,
                    &self.state.globe,
                    &self.control_panel.globe_status,
                );
                for intent in intents {
                    self.dispatch(intent);
                }
                if self.state.globe.is_active() {
                    self.dispatch(Intent::RotationTick);
                    animating = true;
                }
            }
        });

        // Request repaint while loading or animating
        if animating {
            ctx.request_repaint();
        }
    }
}
