//! Gap Chart Module
//! Diverging horizontal bar chart of the secondary-enrollment gender gap.

use crate::aggregate::gap::Favors;
use crate::aggregate::GapRow;
use crate::charts::animation::BarGeometry;
use crate::charts::palette;
use crate::charts::scale::{BandScale, LinearScale};
use egui::{Align2, Color32, FontId, Rect, Response, RichText, Sense, Stroke};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const MARGIN: Margin = Margin {
    top: 40.0,
    right: 40.0,
    bottom: 70.0,
    left: 200.0,
};
pub const FULL_WIDTH: f64 = 960.0;
/// Width of the plotting area between the margins.
pub const CHART_WIDTH: f64 = FULL_WIDTH - MARGIN.left - MARGIN.right;
/// Vertical space per region.
pub const BAR_HEIGHT: f64 = 40.0;
pub const BAND_PADDING: f64 = 0.2;
pub const X_TICKS: usize = 7;
pub const AXIS_TITLE: &str = "Gender gap (girls - boys), percentage points";

const TICK_SIZE: f64 = 6.0;
const AXIS_TITLE_OFFSET: f64 = 52.0;

pub fn bar_color(gap: f64) -> Color32 {
    if gap >= 0.0 {
        palette::GIRLS
    } else {
        palette::BOYS
    }
}

pub fn direction_color(favors: Favors) -> Color32 {
    match favors {
        Favors::Girls => palette::GIRLS,
        Favors::Boys => palette::BOYS,
        Favors::Neither => palette::NEUTRAL,
    }
}

/// `"-15 pts"`, `"2.5 pts"`.
pub fn tick_label(value: f64) -> String {
    // avoid "-0 pts"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{} pts", value)
}

/// Bar anchored at `x(0)`: positive gaps extend right, negative ones left.
pub fn bar_geometry(x: &LinearScale, y: f64, bandwidth: f64, gap: f64) -> BarGeometry {
    let zero = x.scale(0.0);
    let end = x.scale(gap);
    BarGeometry {
        x: if gap >= 0.0 { zero } else { end },
        y,
        width: (end - zero).abs(),
        height: bandwidth,
        color: bar_color(gap),
    }
}

/// Hover card content for one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    /// `(label, value)` pairs.
    pub lines: Vec<(&'static str, String)>,
    pub direction: &'static str,
    pub direction_color: Color32,
}

pub fn tooltip(row: &GapRow) -> Tooltip {
    let favors = row.favors();
    Tooltip {
        title: row.region.clone(),
        lines: vec![
            ("Decade:", row.decade_label()),
            ("Girls in secondary:", format!("{:.1}%", row.female)),
            ("Boys in secondary:", format!("{:.1}%", row.male)),
            (
                "Gap (girls - boys):",
                format!("{:.2} percentage points", row.gap.abs()),
            ),
        ],
        direction: favors.description(),
        direction_color: direction_color(favors),
    }
}

/// Target geometry of the chart for one decade, in chart coordinates
/// (origin at the top-left of the plotting area).
#[derive(Debug, Clone)]
pub struct GapChartLayout {
    pub x: LinearScale,
    pub y: BandScale,
    pub height: f64,
    pub rows: Vec<GapRow>,
    pub bars: Vec<(String, BarGeometry)>,
}

impl GapChartLayout {
    /// Lay out `rows` (already ordered) on a symmetric `[-extent, extent]` axis.
    pub fn new(rows: Vec<GapRow>, extent: f64) -> Self {
        let height = rows.len() as f64 * BAR_HEIGHT;
        let x = LinearScale::symmetric(extent, [0.0, CHART_WIDTH]);
        let y = BandScale::new(
            rows.iter().map(|r| r.region.clone()).collect(),
            [0.0, height],
            BAND_PADDING,
        );

        let bars = rows
            .iter()
            .filter_map(|row| {
                let top = y.position(&row.region)?;
                Some((row.region.clone(), bar_geometry(&x, top, y.bandwidth(), row.gap)))
            })
            .collect();

        Self {
            x,
            y,
            height,
            rows,
            bars,
        }
    }

    /// `x(0)`, where bars enter from and exit to.
    pub fn baseline(&self) -> f64 {
        self.x.scale(0.0)
    }

    /// Height of the whole drawing, margins and axis title included.
    pub fn full_height(&self) -> f64 {
        self.height + MARGIN.top + MARGIN.bottom + 30.0
    }

    /// Tick positions in chart pixels with their labels.
    pub fn ticks(&self) -> Vec<(f64, String)> {
        self.x
            .ticks(X_TICKS)
            .into_iter()
            .map(|v| (self.x.scale(v), tick_label(v)))
            .collect()
    }

    pub fn row(&self, region: &str) -> Option<&GapRow> {
        self.rows.iter().find(|r| r.region == region)
    }
}

/// Paint the chart with the given (possibly mid-transition) bars.
///
/// The drawing is scaled to the available width. Hovering a bar shows its tooltip.
pub fn draw(ui: &mut egui::Ui, layout: &GapChartLayout, bars: &[(String, BarGeometry)]) -> Response {
    let width = ui.available_width().max(320.0);
    let s = width / FULL_WIDTH as f32;
    let size = egui::vec2(width, layout.full_height() as f32 * s);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());

    let origin = response.rect.min + egui::vec2(MARGIN.left as f32 * s, MARGIN.top as f32 * s);
    let to_screen = |x: f64, y: f64| origin + egui::vec2(x as f32 * s, y as f32 * s);

    let text_color = ui.visuals().text_color();
    let axis_stroke = Stroke::new(1.0, ui.visuals().weak_text_color());
    let font = FontId::proportional((12.0 * s).max(8.0));

    let mut hovered: Option<&str> = None;
    for (key, bar) in bars {
        let rect = Rect::from_two_pos(
            to_screen(bar.x, bar.y),
            to_screen(bar.x + bar.width, bar.y + bar.height),
        );
        painter.rect_filled(rect, 0.0, bar.color);
        if response.hover_pos().is_some_and(|p| rect.contains(p)) {
            hovered = Some(key);
        }
    }

    // y axis
    painter.line_segment([to_screen(0.0, 0.0), to_screen(0.0, layout.height)], axis_stroke);
    let half_band = layout.y.bandwidth() / 2.0;
    for region in layout.y.domain() {
        if let Some(top) = layout.y.position(region) {
            painter.text(
                to_screen(-9.0, top + half_band),
                Align2::RIGHT_CENTER,
                region,
                font.clone(),
                text_color,
            );
        }
    }

    // x axis
    painter.line_segment(
        [to_screen(0.0, layout.height), to_screen(CHART_WIDTH, layout.height)],
        axis_stroke,
    );
    for (px, label) in layout.ticks() {
        painter.line_segment(
            [to_screen(px, layout.height), to_screen(px, layout.height + TICK_SIZE)],
            axis_stroke,
        );
        painter.text(
            to_screen(px, layout.height + TICK_SIZE + 3.0),
            Align2::CENTER_TOP,
            label,
            font.clone(),
            text_color,
        );
    }
    painter.text(
        to_screen(CHART_WIDTH / 2.0, layout.height + AXIS_TITLE_OFFSET),
        Align2::CENTER_BOTTOM,
        AXIS_TITLE,
        font,
        palette::AXIS_TITLE,
    );

    match hovered.and_then(|region| layout.row(region)) {
        Some(row) => {
            let content = tooltip(row);
            response.on_hover_ui_at_pointer(|ui| show_tooltip(ui, &content))
        }
        None => response,
    }
}

fn show_tooltip(ui: &mut egui::Ui, content: &Tooltip) {
    ui.label(RichText::new(&content.title).strong().underline());
    for (label, value) in &content.lines {
        ui.horizontal(|ui| {
            ui.label(RichText::new(*label).italics());
            ui.label(value);
        });
    }
    ui.add_space(4.0);
    ui.label(
        RichText::new(content.direction)
            .strong()
            .color(content.direction_color),
    );
}
