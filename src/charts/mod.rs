//! Charts module - Scales, animation and chart rendering

pub mod animation;
pub mod export;
pub mod gap_chart;
pub mod mini_charts;
pub mod palette;
pub mod scale;

pub use animation::{BarAnimator, BarGeometry};
pub use export::{export_chart, ExportError};
pub use gap_chart::GapChartLayout;
pub use mini_charts::MiniChartLayout;
