//! Life-path module - stage stepper and narratives

mod narrative;
pub mod stage;
mod state;

pub use narrative::{narrate, MiniChart, StageView, ViewKind};
pub use stage::{Gender, Stage, StageId, STAGES};
pub use state::{LifePathData, LifePathIntent, LifePathState, StageStatus};
