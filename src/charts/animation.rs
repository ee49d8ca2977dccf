//! Animation Module
//! Enter/update/exit transitions for keyed bars, and simple grow-in timers.

use egui::Color32;

/// Bar chart transition length, seconds.
pub const BAR_TRANSITION_SECS: f64 = 0.9;
/// Mini chart bar growth, seconds.
pub const MINI_TRANSITION_SECS: f64 = 0.7;
/// Survival markers wait this long before popping in, seconds.
pub const MARKER_DELAY_SECS: f64 = 0.4;
pub const MARKER_TRANSITION_SECS: f64 = 0.4;

pub fn ease_cubic_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t + 1.0
}

pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(a: Color32, b: Color32, t: f64) -> Color32 {
    let channel = |x: u8, y: u8| lerp(x as f64, y as f64, t).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(channel(a.r(), b.r()), channel(a.g(), b.g()), channel(a.b(), b.b()))
}

/// Position, size and fill of one bar, in chart pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color32,
}

impl BarGeometry {
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            width: lerp(self.width, to.width, t),
            height: lerp(self.height, to.height, t),
            color: lerp_color(self.color, to.color, t),
        }
    }

    /// Same bar collapsed to zero width at `x`.
    pub fn collapsed_at(&self, x: f64) -> Self {
        Self {
            x,
            width: 0.0,
            ..*self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Tween {
    from: BarGeometry,
    to: BarGeometry,
    start: f64,
    duration: f64,
    exiting: bool,
}

impl Tween {
    fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ease_cubic_out((now - self.start) / self.duration)
    }

    fn at(&self, now: f64) -> BarGeometry {
        self.from.lerp(&self.to, self.progress(now))
    }

    fn finished(&self, now: f64) -> bool {
        self.duration <= 0.0 || now >= self.start + self.duration
    }
}

/// Keyed bar transitions.
///
/// Entering bars grow from zero width at the baseline, exiting bars shrink to
/// it and are then dropped, persisting bars tween every attribute from where
/// they currently are.
#[derive(Debug, Clone)]
pub struct BarAnimator {
    bars: Vec<(String, Tween)>,
    duration: f64,
}

impl Default for BarAnimator {
    fn default() -> Self {
        Self::new(BAR_TRANSITION_SECS)
    }
}

impl BarAnimator {
    pub fn new(duration: f64) -> Self {
        Self {
            bars: Vec::new(),
            duration,
        }
    }

    /// Start a transition to `targets`.
    ///
    /// With `animate`, persisting bars also regrow their extent from the
    /// baseline; without it every bar jumps to its target.
    pub fn transition(
        &mut self,
        targets: &[(String, BarGeometry)],
        baseline_x: f64,
        animate: bool,
        now: f64,
    ) {
        let duration = if animate { self.duration } else { 0.0 };
        let mut next: Vec<(String, Tween)> = Vec::with_capacity(targets.len());

        for (key, target) in targets {
            let current = self
                .bars
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, tween)| tween.at(now));
            let from = match current {
                Some(current) if animate => current.collapsed_at(baseline_x),
                Some(current) => current,
                None => target.collapsed_at(baseline_x),
            };
            next.push((
                key.clone(),
                Tween {
                    from,
                    to: *target,
                    start: now,
                    duration,
                    exiting: false,
                },
            ));
        }

        for (key, tween) in &self.bars {
            if targets.iter().any(|(k, _)| k == key) {
                continue;
            }
            let current = tween.at(now);
            next.push((
                key.clone(),
                Tween {
                    from: current,
                    to: current.collapsed_at(baseline_x),
                    start: now,
                    duration,
                    exiting: true,
                },
            ));
        }

        self.bars = next;
    }

    /// Interpolated bars at `now`; exited bars whose transition ended are removed.
    pub fn frame(&mut self, now: f64) -> Vec<(String, BarGeometry)> {
        self.bars.retain(|(_, tween)| !(tween.exiting && tween.finished(now)));
        self.bars
            .iter()
            .map(|(key, tween)| (key.clone(), tween.at(now)))
            .collect()
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.bars.iter().any(|(_, tween)| !tween.finished(now))
    }
}

/// Eased 0→1 progress of a delayed, fixed-length transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grow {
    pub start: f64,
    pub delay: f64,
    pub duration: f64,
}

impl Grow {
    pub fn new(start: f64, delay: f64, duration: f64) -> Self {
        Self {
            start,
            delay,
            duration,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return if now >= self.start + self.delay { 1.0 } else { 0.0 };
        }
        ease_cubic_in_out((now - self.start - self.delay) / self.duration)
    }

    pub fn finished(&self, now: f64) -> bool {
        now >= self.start + self.delay + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(x: f64, y: f64, width: f64) -> BarGeometry {
        BarGeometry {
            x,
            y,
            width,
            height: 30.0,
            color: Color32::from_rgb(255, 130, 198),
        }
    }

    fn keyed(items: &[(&str, BarGeometry)]) -> Vec<(String, BarGeometry)> {
        items.iter().map(|(k, b)| (k.to_string(), *b)).collect()
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_cubic_out(0.0), 0.0);
        assert_eq!(ease_cubic_out(1.0), 1.0);
        assert_eq!(ease_cubic_out(2.0), 1.0);
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
    }

    #[test]
    fn test_entering_bars_start_at_zero_width() {
        let mut animator = BarAnimator::default();
        animator.transition(&keyed(&[("a", bar(360.0, 10.0, 100.0))]), 360.0, true, 0.0);

        let start = animator.frame(0.0);
        assert_eq!(start[0].1.width, 0.0);
        assert_eq!(start[0].1.x, 360.0);

        let middle = animator.frame(0.45);
        assert!(middle[0].1.width > 0.0 && middle[0].1.width < 100.0);

        let end = animator.frame(0.9);
        assert_eq!(end[0].1, bar(360.0, 10.0, 100.0));
        assert!(!animator.is_animating(0.9));
    }

    #[test]
    fn test_exiting_bars_shrink_then_disappear() {
        let mut animator = BarAnimator::default();
        animator.transition(&keyed(&[("a", bar(360.0, 10.0, 100.0))]), 360.0, false, 0.0);
        animator.transition(&[], 360.0, true, 1.0);

        let during = animator.frame(1.3);
        assert_eq!(during.len(), 1);
        assert!(during[0].1.width < 100.0);

        assert!(animator.frame(2.0).is_empty());
    }

    #[test]
    fn test_persisting_bars_move_and_regrow() {
        let mut animator = BarAnimator::default();
        animator.transition(&keyed(&[("a", bar(360.0, 10.0, 100.0))]), 360.0, false, 0.0);
        animator.transition(&keyed(&[("a", bar(200.0, 60.0, 160.0))]), 360.0, true, 1.0);

        let start = animator.frame(1.0);
        assert_eq!(start[0].1.y, 10.0);
        assert_eq!(start[0].1.width, 0.0);

        let end = animator.frame(2.0);
        assert_eq!(end[0].1, bar(200.0, 60.0, 160.0));
    }

    #[test]
    fn test_without_animation_bars_jump() {
        let mut animator = BarAnimator::default();
        animator.transition(&keyed(&[("a", bar(0.0, 0.0, 50.0))]), 360.0, false, 5.0);
        assert_eq!(animator.frame(5.0)[0].1, bar(0.0, 0.0, 50.0));
        assert!(!animator.is_animating(5.0));
    }

    #[test]
    fn test_grow_respects_delay() {
        let grow = Grow::new(1.0, MARKER_DELAY_SECS, MARKER_TRANSITION_SECS);
        assert_eq!(grow.progress(1.2), 0.0);
        assert_eq!(grow.progress(2.0), 1.0);
        assert!(grow.finished(2.0));
        assert!(!grow.finished(1.5));
    }
}
