//! Orthographic Projection Module
//! Rotated orthographic projection with a 90° clip angle, plus the graticule.

/// Graticule and meridian sampling step, degrees.
const PRECISION: f64 = 2.5;
/// Gap between graticule lines, degrees.
const GRATICULE_STEP: f64 = 10.0;
/// Margin between the sphere and the drawing area edge.
pub const GLOBE_MARGIN: f64 = 20.0;

/// Orthographic projection of `[longitude, latitude]` degrees onto the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    /// Sphere radius in pixels.
    pub scale: f64,
    /// Screen position of the sphere center.
    pub center: [f64; 2],
    /// `[lambda, phi]` rotation in degrees.
    pub rotation: [f64; 2],
}

impl Orthographic {
    /// Fit the sphere to a `width` x `height` area.
    pub fn fit(width: f64, height: f64) -> Self {
        Self {
            scale: (width.min(height) / 2.0 - GLOBE_MARGIN).max(0.0),
            center: [width / 2.0, height / 2.0],
            rotation: [0.0, 0.0],
        }
    }

    pub fn with_rotation(mut self, rotation: [f64; 2]) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotated spherical coordinates, radians.
    fn rotate(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lambda = (lon + self.rotation[0]).to_radians();
        let phi = lat.to_radians();
        let (sin_dp, cos_dp) = self.rotation[1].to_radians().sin_cos();

        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * cos_dp + x * sin_dp;

        (y.atan2(x * cos_dp - z * sin_dp), k.clamp(-1.0, 1.0).asin())
    }

    /// Unit-disk coordinates and whether the point faces the viewer.
    fn raw(&self, lon: f64, lat: f64) -> ([f64; 2], bool) {
        let (lambda, phi) = self.rotate(lon, lat);
        let cos_phi = phi.cos();
        let visible = cos_phi * lambda.cos() > 1e-9;
        ([cos_phi * lambda.sin(), phi.sin()], visible)
    }

    fn to_screen(&self, p: [f64; 2]) -> [f64; 2] {
        [self.center[0] + self.scale * p[0], self.center[1] - self.scale * p[1]]
    }

    /// Screen position, or `None` when the point is behind the horizon.
    pub fn project(&self, lon: f64, lat: f64) -> Option<[f64; 2]> {
        let (p, visible) = self.raw(lon, lat);
        visible.then(|| self.to_screen(p))
    }

    /// Screen position with hidden points pushed out to the limb.
    pub fn project_clamped(&self, lon: f64, lat: f64) -> [f64; 2] {
        let (p, visible) = self.raw(lon, lat);
        if visible {
            return self.to_screen(p);
        }
        let len = (p[0] * p[0] + p[1] * p[1]).sqrt();
        if len > 0.0 {
            self.to_screen([p[0] / len, p[1] / len])
        } else {
            self.to_screen([0.0, 1.0])
        }
    }

    /// Project a closed ring; `None` when no point of it is visible.
    pub fn project_ring(&self, ring: &[[f64; 2]]) -> Option<Vec<[f64; 2]>> {
        if !ring.iter().any(|p| self.raw(p[0], p[1]).1) {
            return None;
        }
        Some(ring.iter().map(|p| self.project_clamped(p[0], p[1])).collect())
    }

    /// Project an open line, split into its visible runs.
    pub fn project_line(&self, line: &[[f64; 2]]) -> Vec<Vec<[f64; 2]>> {
        let mut runs = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();
        for p in line {
            match self.project(p[0], p[1]) {
                Some(screen) => current.push(screen),
                None => {
                    if current.len() > 1 {
                        runs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }
        if current.len() > 1 {
            runs.push(current);
        }
        runs
    }
}

fn steps(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = ((to - from) / step).round() as i64;
    (0..=count).map(move |i| from + i as f64 * step)
}

/// Meridians and parallels every 10°, in `[longitude, latitude]` degrees.
///
/// Meridians stop at ±80° except the major ones every 90°, which reach the poles.
pub fn graticule() -> Vec<Vec<[f64; 2]>> {
    let mut lines = Vec::new();

    for lon in steps(-180.0, 170.0, GRATICULE_STEP) {
        let extent = if lon % 90.0 == 0.0 { 90.0 } else { 80.0 };
        lines.push(steps(-extent, extent, PRECISION).map(|lat| [lon, lat]).collect());
    }
    for lat in steps(-80.0, 80.0, GRATICULE_STEP) {
        lines.push(steps(-180.0, 180.0, PRECISION).map(|lon| [lon, lat]).collect());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-6 && (a[1] - b[1]).abs() < 1e-6
    }

    #[test]
    fn test_fit_uses_margin() {
        let projection = Orthographic::fit(760.0, 600.0);
        assert_eq!(projection.scale, 280.0);
        assert_eq!(projection.center, [380.0, 300.0]);
    }

    #[test]
    fn test_rotation_centers_point() {
        let projection = Orthographic::fit(200.0, 200.0).with_rotation([0.0, -20.0]);
        let center = projection.project(0.0, 20.0).expect("center is visible");
        assert!(close(center, [100.0, 100.0]));

        let projection = Orthographic::fit(200.0, 200.0).with_rotation([-90.0, 0.0]);
        assert!(close(projection.project(90.0, 0.0).expect("visible"), [100.0, 100.0]));
    }

    #[test]
    fn test_far_side_is_hidden_and_clamped_to_limb() {
        let projection = Orthographic::fit(200.0, 200.0);
        assert!(projection.project(180.0, 0.0).is_none());
        assert!(projection.project(120.0, 10.0).is_none());

        let clamped = projection.project_clamped(120.0, 10.0);
        let dx = clamped[0] - 100.0;
        let dy = clamped[1] - 100.0;
        assert!(((dx * dx + dy * dy).sqrt() - projection.scale).abs() < 1e-6);
    }

    #[test]
    fn test_north_is_up() {
        let projection = Orthographic::fit(200.0, 200.0);
        let north = projection.project(0.0, 45.0).expect("visible");
        assert!(north[1] < 100.0);
        let east = projection.project(45.0, 0.0).expect("visible");
        assert!(east[0] > 100.0);
    }

    #[test]
    fn test_hidden_ring_and_split_line() {
        let projection = Orthographic::fit(200.0, 200.0);
        let far = vec![[170.0, -5.0], [175.0, -5.0], [175.0, 5.0], [170.0, -5.0]];
        assert!(projection.project_ring(&far).is_none());

        let near = vec![[-5.0, -5.0], [5.0, -5.0], [5.0, 5.0], [-5.0, -5.0]];
        assert_eq!(projection.project_ring(&near).map(|r| r.len()), Some(4));

        let equator: Vec<[f64; 2]> = steps(-180.0, 180.0, 10.0).map(|lon| [lon, 0.0]).collect();
        let runs = projection.project_line(&equator);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].len() >= 17);
    }

    #[test]
    fn test_graticule_shape() {
        let lines = graticule();
        assert_eq!(lines.len(), 36 + 17);
        assert_eq!(lines[0].first(), Some(&[-180.0, -90.0]));
        assert_eq!(lines[1].first(), Some(&[-170.0, -80.0]));
    }
}
