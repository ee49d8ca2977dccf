//! Globe module - orthographic projection and rotation state

mod fill;
mod projection;
mod rotation;

pub use fill::triangulate;
pub use projection::{graticule, Orthographic};
pub use rotation::{GlobeIntent, GlobeState, DEFAULT_SENSITIVITY, DEFAULT_VELOCITY};
