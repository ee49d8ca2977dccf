//! GUI module - User interface components

mod app;
mod control_panel;
mod gap_view;
mod globe_view;
mod life_path_view;

pub use app::GenderAtlasApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use gap_view::GapView;
pub use globe_view::GlobeView;
pub use life_path_view::LifePathView;
