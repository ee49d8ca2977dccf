//! Mini Chart Module
//! Small stage charts next to the life-path narrative, drawn with egui_plot.

use crate::charts::animation::{
    Grow, MARKER_DELAY_SECS, MARKER_TRANSITION_SECS, MINI_TRANSITION_SECS,
};
use crate::charts::palette;
use crate::charts::scale::LinearScale;
use crate::lifepath::MiniChart;
use egui::{Align2, Color32, RichText};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Points, Text};

const BAR_WIDTH: f64 = 0.6;
const MARKER_RADIUS: f32 = 5.0;
const FERTILITY_MARKER_RADIUS: f32 = 6.0;
const FERTILITY_CAP: f64 = 7.0;
const LIFE_FLOOR: f64 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MiniBar {
    pub row: usize,
    pub value: f64,
    pub color: Color32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MiniMarker {
    pub row: usize,
    /// Position on the bar axis.
    pub position: f64,
    pub color: Color32,
    pub radius: f32,
    /// Pops in after the bars instead of with them.
    pub delayed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MiniChartLayout {
    pub title: &'static str,
    pub size: [f32; 2],
    /// Row labels, top to bottom.
    pub rows: Vec<&'static str>,
    pub domain: [f64; 2],
    pub bars: Vec<MiniBar>,
    /// Background track spanning the whole domain, for single-value charts.
    pub track: Option<Color32>,
    pub markers: Vec<MiniMarker>,
    pub tick_suffix: &'static str,
}

fn nice_domain(min: f64, max: f64) -> [f64; 2] {
    LinearScale::new([min, max], [0.0, 1.0]).nice(10).domain
}

pub fn layout(chart: &MiniChart) -> MiniChartLayout {
    match chart {
        MiniChart::Enrollment {
            title,
            female,
            male,
        } => {
            let max = female.max(*male);
            let max = if max.is_finite() && max > 0.0 { max } else { 1.0 };
            MiniChartLayout {
                title: *title,
                size: [340.0, 90.0],
                rows: vec!["Girls", "Boys"],
                domain: nice_domain(0.0, max),
                bars: vec![
                    MiniBar {
                        row: 0,
                        value: *female,
                        color: palette::MINI_GIRLS,
                        text: format!("{:.1}%", female),
                    },
                    MiniBar {
                        row: 1,
                        value: *male,
                        color: palette::MINI_BOYS,
                        text: format!("{:.1}%", male),
                    },
                ],
                track: None,
                markers: Vec::new(),
                tick_suffix: "",
            }
        }
        MiniChart::Fertility { value } => {
            let max = (value + 1.0).clamp(1.0, FERTILITY_CAP);
            MiniChartLayout {
                title: "Average number of children per woman",
                size: [340.0, 90.0],
                rows: vec![""],
                domain: [0.0, max],
                bars: vec![MiniBar {
                    row: 0,
                    value: *value,
                    color: palette::MINI_GIRLS,
                    text: format!("{:.1} kids", value),
                }],
                track: Some(palette::FERTILITY_TRACK),
                markers: vec![MiniMarker {
                    row: 0,
                    position: *value,
                    color: palette::FERTILITY_MARKER,
                    radius: FERTILITY_MARKER_RADIUS,
                    delayed: false,
                }],
                tick_suffix: "",
            }
        }
        MiniChart::Longevity {
            life_self,
            life_other,
            survival_self,
            survival_other,
        } => {
            let max = life_other
                .map_or(*life_self, |other| other.max(*life_self));
            let max = if max.is_finite() { max } else { 90.0 };
            let domain = nice_domain(LIFE_FLOOR, max);

            let mut bars = vec![MiniBar {
                row: 0,
                value: *life_self,
                color: palette::MINI_GIRLS,
                text: format!("{:.1} yrs", life_self),
            }];
            if let Some(other) = life_other {
                bars.push(MiniBar {
                    row: 1,
                    value: *other,
                    color: palette::MINI_BOYS,
                    text: format!("{:.1} yrs", other),
                });
            }

            // survival is a 0..100 share drawn over the same pixel range
            let survival = LinearScale::new([0.0, 100.0], domain);
            let markers = [(0, survival_self), (1, survival_other)]
                .into_iter()
                .filter_map(|(row, value)| {
                    value.map(|v| MiniMarker {
                        row,
                        position: survival.scale(v),
                        color: palette::SURVIVAL,
                        radius: MARKER_RADIUS,
                        delayed: true,
                    })
                })
                .collect();

            MiniChartLayout {
                title: "Life expectancy & survival to 65",
                size: [360.0, 110.0],
                rows: vec!["You", "Other"],
                domain,
                bars,
                track: None,
                markers,
                tick_suffix: " yrs",
            }
        }
    }
}

impl MiniChartLayout {
    /// Plot argument of a row; the first row sits on top.
    fn argument(&self, row: usize) -> f64 {
        (self.rows.len() - 1 - row.min(self.rows.len() - 1)) as f64
    }
}

/// Draw `layout` with its bars grown to their state at `now`.
/// Returns whether the growth is still running.
pub fn draw(ui: &mut egui::Ui, id: &str, layout: &MiniChartLayout, started: f64, now: f64) -> bool {
    let bar_grow = Grow::new(started, 0.0, MINI_TRANSITION_SECS);
    let marker_grow = Grow::new(started, MARKER_DELAY_SECS, MARKER_TRANSITION_SECS);
    let bar_progress = bar_grow.progress(now);
    let marker_progress = marker_grow.progress(now);

    ui.label(RichText::new(layout.title).small().weak());

    let [d0, d1] = layout.domain;
    let labels: Vec<String> = layout.rows.iter().rev().map(|s| s.to_string()).collect();
    let suffix = layout.tick_suffix;

    Plot::new(id)
        .width(layout.size[0])
        .height(layout.size[1])
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_x(false)
        .show_y(false)
        .include_x(d0)
        .include_x(d1)
        .include_y(-0.5)
        .include_y(layout.rows.len() as f64 - 0.5)
        .x_axis_formatter(move |mark, _range| format!("{}{}", mark.value, suffix))
        .y_axis_formatter(move |mark, _range| {
            let index = mark.value.round();
            if (mark.value - index).abs() > 1e-6 || index < 0.0 {
                return String::new();
            }
            labels.get(index as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            if let Some(track) = layout.track {
                let tracks = (0..layout.rows.len())
                    .map(|row| {
                        Bar::new(layout.argument(row), d1 - d0)
                            .base_offset(d0)
                            .width(BAR_WIDTH)
                            .fill(track)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(tracks).horizontal());
            }

            let bars = layout
                .bars
                .iter()
                .map(|bar| {
                    Bar::new(layout.argument(bar.row), (bar.value - d0) * bar_progress)
                        .base_offset(d0)
                        .width(BAR_WIDTH)
                        .fill(bar.color)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).horizontal());

            for bar in &layout.bars {
                let end = d0 + (bar.value - d0) * bar_progress;
                plot_ui.text(
                    Text::new(PlotPoint::new(end, layout.argument(bar.row)), bar.text.clone())
                        .anchor(Align2::LEFT_CENTER),
                );
            }

            for marker in &layout.markers {
                let progress = if marker.delayed { marker_progress } else { 1.0 };
                if progress <= 0.0 {
                    continue;
                }
                plot_ui.points(
                    Points::new(vec![[marker.position, layout.argument(marker.row)]])
                        .radius(marker.radius * progress as f32)
                        .color(marker.color)
                        .filled(true),
                );
            }
        });

    !(bar_grow.finished(now) && marker_grow.finished(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_enrollment_layout() {
        let layout = layout(&MiniChart::Enrollment {
            title: "Secondary enrollment (%)",
            female: 92.5,
            male: 88.0,
        });
        assert_eq!(layout.title, "Secondary enrollment (%)");
        assert_eq!(layout.rows, vec!["Girls", "Boys"]);
        assert_eq!(layout.domain, [0.0, 100.0]);
        assert_eq!(layout.bars[0].text, "92.5%");
        assert_eq!(layout.bars[0].color, palette::MINI_GIRLS);
        assert_eq!(layout.bars[1].color, palette::MINI_BOYS);
        assert!(layout.markers.is_empty());
    }

    #[test]
    fn test_enrollment_zero_values_fall_back_to_unit_domain() {
        let layout = layout(&MiniChart::Enrollment {
            title: "Primary enrollment (%)",
            female: 0.0,
            male: 0.0,
        });
        assert_eq!(layout.domain, [0.0, 1.0]);
    }

    #[rstest]
    #[case(3.1, 4.1)]
    #[case(6.5, 7.0)]
    #[case(0.0, 1.0)]
    fn test_fertility_track_is_capped(#[case] value: f64, #[case] max: f64) {
        let layout = layout(&MiniChart::Fertility { value });
        assert!((layout.domain[1] - max).abs() < 1e-9);
        assert_eq!(layout.track, Some(palette::FERTILITY_TRACK));
        assert_eq!(layout.markers[0].position, value);
        assert!(!layout.markers[0].delayed);
    }

    #[test]
    fn test_fertility_label() {
        let layout = layout(&MiniChart::Fertility { value: 2.345 });
        assert_eq!(layout.bars[0].text, "2.3 kids");
    }

    #[test]
    fn test_longevity_layout() {
        let layout = layout(&MiniChart::Longevity {
            life_self: 81.3,
            life_other: Some(76.0),
            survival_self: Some(80.0),
            survival_other: None,
        });
        assert_eq!(layout.domain, [40.0, 85.0]);
        assert_eq!(layout.rows, vec!["You", "Other"]);
        assert_eq!(layout.bars.len(), 2);
        assert_eq!(layout.bars[0].text, "81.3 yrs");

        assert_eq!(layout.markers.len(), 1);
        let marker = &layout.markers[0];
        assert!((marker.position - 76.0).abs() < 1e-9);
        assert!(marker.delayed);
        assert_eq!(marker.color, palette::SURVIVAL);
    }

    #[test]
    fn test_longevity_without_other_gender() {
        let layout = layout(&MiniChart::Longevity {
            life_self: 70.0,
            life_other: None,
            survival_self: Some(75.0),
            survival_other: Some(70.0),
        });
        assert_eq!(layout.bars.len(), 1);
        assert_eq!(layout.markers.len(), 2);
        assert_eq!(layout.argument(0), 1.0);
        assert_eq!(layout.argument(1), 0.0);
    }
}
