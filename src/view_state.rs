//! View State Module
//! Application state owned by the window, updated only through [`Intent`]s.

use crate::aggregate::gap::{decade_label, default_decade, local_extent};
use crate::aggregate::GapDataset;
use crate::charts::GapChartLayout;
use crate::config::AppConfig;
use crate::globe::{GlobeIntent, GlobeState};
use crate::lifepath::{
    narrate, Gender, LifePathData, LifePathIntent, LifePathState, StageId, StageView,
};
use std::ops::RangeInclusive;

/// Everything a control can ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SelectDecade(i64),
    SelectRegion(String),
    SelectYear(i64),
    SelectGender(Gender),
    ToggleGender,
    NextStage,
    PrevStage,
    JumpToStage(StageId),
    DragStart([f64; 2]),
    DragMove([f64; 2]),
    DragEnd,
    RotationTick,
}

/// Bar chart selection and the layout derived from it.
#[derive(Debug, Clone)]
pub struct GapChartState {
    dataset: GapDataset,
    decades: Vec<i64>,
    selected: Option<i64>,
    layout: GapChartLayout,
    animate: bool,
    revision: u64,
}

impl GapChartState {
    /// Lay out the whole dataset, then settle on the default decade without animating.
    pub fn new(dataset: GapDataset, decade_range: &RangeInclusive<i64>, preferred: i64) -> Self {
        let decades = dataset.decades(decade_range);
        let extent = dataset.global_extent().unwrap_or(1.0);
        let mut state = Self {
            layout: GapChartLayout::new(Vec::new(), extent),
            dataset,
            decades,
            selected: None,
            animate: false,
            revision: 0,
        };

        match default_decade(&state.decades, preferred) {
            Some(decade) => {
                state.select(decade, false);
            }
            None => tracing::error!("No decades found in the gender gap data"),
        }
        state
    }

    /// Show one decade, rescaled to its own largest gap.
    /// Returns false for unknown or already-selected decades.
    pub fn select(&mut self, decade: i64, animate: bool) -> bool {
        if !self.decades.contains(&decade) || self.selected == Some(decade) {
            return false;
        }
        let rows = self.dataset.rows_for_decade(decade);
        let extent = local_extent(&rows);
        tracing::debug!(
            "Decade {}: {} regions, extent {:.2}",
            decade_label(decade),
            rows.len(),
            extent
        );

        self.layout = GapChartLayout::new(rows, extent);
        self.selected = Some(decade);
        self.animate = animate;
        self.revision += 1;
        true
    }

    pub fn decades(&self) -> &[i64] {
        &self.decades
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn layout(&self) -> &GapChartLayout {
        &self.layout
    }

    /// Whether the latest change should be animated.
    pub fn animate(&self) -> bool {
        self.animate
    }

    /// Bumped on every change of selection.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Life-path data, stepper state and the narrative for the current stage.
#[derive(Debug, Clone)]
pub struct LifePathModel {
    data: LifePathData,
    state: LifePathState,
    view: StageView,
    revision: u64,
}

impl LifePathModel {
    pub fn new(data: LifePathData) -> Self {
        let state = LifePathState::new(&data);
        let view = narrate(&state, &data);
        Self {
            data,
            state,
            view,
            revision: 0,
        }
    }

    pub fn apply(&mut self, intent: LifePathIntent) -> bool {
        if !self.state.apply(intent) {
            return false;
        }
        self.view = narrate(&self.state, &self.data);
        self.revision += 1;
        tracing::debug!(
            "Life path: stage {} for {:?} {:?} ({})",
            self.state.stage().id.as_str(),
            self.state.region,
            self.state.year,
            self.state.gender.label()
        );
        true
    }

    pub fn data(&self) -> &LifePathData {
        &self.data
    }

    pub fn state(&self) -> &LifePathState {
        &self.state
    }

    pub fn view(&self) -> &StageView {
        &self.view
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Top-level state. Views without data are `None` and ignore their intents.
#[derive(Debug, Clone)]
pub struct AppState {
    pub gap: Option<GapChartState>,
    pub life: Option<LifePathModel>,
    pub globe: GlobeState,
    decade_range: RangeInclusive<i64>,
    default_decade: i64,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            gap: None,
            life: None,
            globe: GlobeState::new(config.rotation_velocity, config.drag_sensitivity),
            decade_range: config.decade_range(),
            default_decade: config.default_decade,
        }
    }

    pub fn set_gap_data(&mut self, dataset: GapDataset) {
        self.gap = Some(GapChartState::new(
            dataset,
            &self.decade_range,
            self.default_decade,
        ));
    }

    pub fn set_life_data(&mut self, data: LifePathData) {
        self.life = Some(LifePathModel::new(data));
    }

    /// Boundaries are available; the globe starts responding.
    pub fn set_globe_ready(&mut self) {
        self.globe.activate();
    }

    /// Single reducer for all controls. Returns whether anything changed.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        let life = |model: &mut Option<LifePathModel>, intent: LifePathIntent| {
            model.as_mut().is_some_and(|m| m.apply(intent))
        };

        match intent {
            Intent::SelectDecade(decade) => {
                self.gap.as_mut().is_some_and(|gap| gap.select(decade, true))
            }
            Intent::SelectRegion(region) => {
                life(&mut self.life, LifePathIntent::SelectRegion(region))
            }
            Intent::SelectYear(year) => life(&mut self.life, LifePathIntent::SelectYear(year)),
            Intent::SelectGender(gender) => {
                life(&mut self.life, LifePathIntent::SelectGender(gender))
            }
            Intent::ToggleGender => life(&mut self.life, LifePathIntent::ToggleGender),
            Intent::NextStage => life(&mut self.life, LifePathIntent::NextStage),
            Intent::PrevStage => life(&mut self.life, LifePathIntent::PrevStage),
            Intent::JumpToStage(id) => life(&mut self.life, LifePathIntent::JumpToStage(id)),
            Intent::DragStart(p) => self.globe.apply(GlobeIntent::DragStart(p)),
            Intent::DragMove(p) => self.globe.apply(GlobeIntent::DragMove(p)),
            Intent::DragEnd => self.globe.apply(GlobeIntent::DragEnd),
            Intent::RotationTick => self.globe.apply(GlobeIntent::Tick),
        }
    }
}
