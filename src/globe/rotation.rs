//! Globe Rotation Module
//! Drag-to-rotate and auto-rotation with a drag guard.

/// Starting view: tilted so the northern hemisphere faces the viewer.
pub const INITIAL_ROTATION: [f64; 2] = [0.0, -20.0];
/// Degrees of auto-rotation per frame.
pub const DEFAULT_VELOCITY: f64 = 0.02;
/// Degrees of rotation per pixel dragged.
pub const DEFAULT_SENSITIVITY: f64 = 0.4;

#[derive(Debug, Clone, PartialEq)]
pub enum GlobeIntent {
    DragStart([f64; 2]),
    DragMove([f64; 2]),
    DragEnd,
    /// One animation frame of auto-rotation.
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    pointer: [f64; 2],
    rotation: [f64; 2],
}

/// Rotation plus drag state. Inert until [`GlobeState::activate`] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeState {
    rotation: [f64; 2],
    anchor: Option<DragAnchor>,
    active: bool,
    velocity: f64,
    sensitivity: f64,
}

impl Default for GlobeState {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY, DEFAULT_SENSITIVITY)
    }
}

impl GlobeState {
    pub fn new(velocity: f64, sensitivity: f64) -> Self {
        Self {
            rotation: INITIAL_ROTATION,
            anchor: None,
            active: false,
            velocity,
            sensitivity,
        }
    }

    /// Enable dragging and auto-rotation once the map has loaded.
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn rotation(&self) -> [f64; 2] {
        self.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Apply one intent. Returns whether the rotation changed.
    pub fn apply(&mut self, intent: GlobeIntent) -> bool {
        if !self.active {
            return false;
        }
        match intent {
            GlobeIntent::DragStart(pointer) => {
                self.anchor = Some(DragAnchor {
                    pointer,
                    rotation: self.rotation,
                });
                false
            }
            GlobeIntent::DragMove(pointer) => {
                let Some(anchor) = self.anchor else {
                    return false;
                };
                let dx = pointer[0] - anchor.pointer[0];
                let dy = pointer[1] - anchor.pointer[1];
                self.rotation = [
                    anchor.rotation[0] + dx * self.sensitivity,
                    anchor.rotation[1] - dy * self.sensitivity,
                ];
                true
            }
            GlobeIntent::DragEnd => {
                self.anchor = None;
                false
            }
            GlobeIntent::Tick => {
                if self.is_dragging() {
                    return false;
                }
                self.rotation[0] += self.velocity;
                true
            }
        }
    }
}
