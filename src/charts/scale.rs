//! Scale Module
//! Linear and band scales mapping data values to pixel positions.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Step between "nice" ticks covering `[start, stop]` with about `count` ticks.
///
/// Positive results are the step itself; negative results `-n` mean a step of `1/n`.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Continuous linear scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Symmetric domain `[-extent, extent]`.
    pub fn symmetric(extent: f64, range: [f64; 2]) -> Self {
        Self::new([-extent, extent], range)
    }

    pub fn scale(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Extend the domain to round tick boundaries.
    pub fn nice(mut self, count: usize) -> Self {
        let [mut start, mut stop] = self.domain;
        if !(start.is_finite() && stop.is_finite()) || stop <= start {
            return self;
        }
        let mut previous = 0.0;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if step == previous {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = step;
        }
        self.domain = [start, stop];
        self
    }

    /// Round tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [start, stop] = self.domain;
        if !(start.is_finite() && stop.is_finite()) || stop <= start || count == 0 {
            return Vec::new();
        }
        let step = tick_increment(start, stop, count);
        if !step.is_finite() || step == 0.0 {
            return Vec::new();
        }
        if step > 0.0 {
            let first = (start / step).ceil() as i64;
            let last = (stop / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        } else {
            let inverse = -step;
            let first = (start * inverse).ceil() as i64;
            let last = (stop * inverse).floor() as i64;
            (first..=last).map(|i| i as f64 / inverse).collect()
        }
    }
}

/// Ordinal band scale with equal inner and outer padding, centered.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: [f64; 2], padding: f64) -> Self {
        let n = domain.len() as f64;
        let [r0, r1] = range;
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_linear_maps_endpoints_and_midpoint() {
        let x = LinearScale::symmetric(20.0, [0.0, 720.0]);
        assert_eq!(x.scale(-20.0), 0.0);
        assert_eq!(x.scale(0.0), 360.0);
        assert_eq!(x.scale(20.0), 720.0);
    }

    #[rstest]
    #[case([0.0, 92.5], [0.0, 100.0])]
    #[case([0.0, 3.7], [0.0, 4.0])]
    #[case([40.0, 81.3], [40.0, 85.0])]
    #[case([0.0, 0.83], [0.0, 0.9])]
    fn test_nice_rounds_domain(#[case] domain: [f64; 2], #[case] expected: [f64; 2]) {
        let nice = LinearScale::new(domain, [0.0, 1.0]).nice(10);
        assert!((nice.domain[0] - expected[0]).abs() < 1e-9, "{:?}", nice.domain);
        assert!((nice.domain[1] - expected[1]).abs() < 1e-9, "{:?}", nice.domain);
    }

    #[test]
    fn test_ticks_are_round() {
        let x = LinearScale::symmetric(20.0, [0.0, 720.0]);
        assert_eq!(x.ticks(7), vec![-20.0, -15.0, -10.0, -5.0, 0.0, 5.0, 10.0, 15.0, 20.0]);

        let small = LinearScale::new([0.0, 1.0], [0.0, 1.0]);
        assert_eq!(small.ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_band_scale_padding() {
        let y = BandScale::new(vec!["a".into(), "b".into()], [0.0, 80.0], 0.2);
        // step = 80 / (2 - 0.2 + 0.4) = 36.36..
        let step = 80.0 / 2.2;
        assert!((y.bandwidth() - step * 0.8).abs() < 1e-9);
        assert!((y.position("a").unwrap() - step * 0.2).abs() < 1e-9);
        assert!((y.position("b").unwrap() - step * 1.2).abs() < 1e-9);
        assert_eq!(y.position("c"), None);
    }
}
