//! Static Chart Export
//! Writes the current gap chart to an SVG or PNG file using plotters.

use crate::charts::gap_chart::{GapChartLayout, AXIS_TITLE, CHART_WIDTH, FULL_WIDTH, MARGIN};
use crate::charts::palette;
use egui::Color32;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format '{0}' (use .svg or .png)")]
    UnsupportedFormat(String),
    #[error("No bars to export")]
    Empty,
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

const FONT: &str = "sans-serif";
const TEXT: RGBColor = RGBColor(51, 51, 51);
const AXIS: RGBColor = RGBColor(170, 170, 170);

fn rgb(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

fn drawing_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ExportError {
    ExportError::Drawing(e.to_string())
}

/// Export `layout` to `path`; the format follows the file extension.
pub fn export_chart(layout: &GapChartLayout, title: &str, path: &Path) -> Result<(), ExportError> {
    if layout.bars.is_empty() {
        return Err(ExportError::Empty);
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let size = (FULL_WIDTH as u32, layout.full_height().ceil() as u32);

    match extension.as_str() {
        "svg" => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(&root, layout, title)?;
        }
        "png" => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(&root, layout, title)?;
        }
        other => return Err(ExportError::UnsupportedFormat(other.to_string())),
    }

    tracing::info!("Exported chart to {}", path.display());
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    layout: &GapChartLayout,
    title: &str,
) -> Result<(), ExportError> {
    let px = |x: f64, y: f64| ((MARGIN.left + x).round() as i32, (MARGIN.top + y).round() as i32);
    let label_style = (FONT, 12).into_font().color(&TEXT);
    let title_color = rgb(palette::AXIS_TITLE);

    root.fill(&WHITE).map_err(drawing_error)?;

    root.draw(&Text::new(
        title.to_string(),
        ((FULL_WIDTH / 2.0) as i32, (MARGIN.top / 2.0) as i32),
        (FONT, 16)
            .into_font()
            .color(&TEXT)
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))
    .map_err(drawing_error)?;

    for (_, bar) in &layout.bars {
        root.draw(&Rectangle::new(
            [px(bar.x, bar.y), px(bar.x + bar.width, bar.y + bar.height)],
            rgb(bar.color).filled(),
        ))
        .map_err(drawing_error)?;
    }

    // y axis with region labels
    root.draw(&PathElement::new(vec![px(0.0, 0.0), px(0.0, layout.height)], AXIS.stroke_width(1)))
        .map_err(drawing_error)?;
    let half_band = layout.y.bandwidth() / 2.0;
    for region in layout.y.domain() {
        if let Some(top) = layout.y.position(region) {
            root.draw(&Text::new(
                region.clone(),
                px(-9.0, top + half_band),
                label_style.clone().pos(Pos::new(HPos::Right, VPos::Center)),
            ))
            .map_err(drawing_error)?;
        }
    }

    // x axis with ticks
    root.draw(&PathElement::new(
        vec![px(0.0, layout.height), px(CHART_WIDTH, layout.height)],
        AXIS.stroke_width(1),
    ))
    .map_err(drawing_error)?;
    for (x, label) in layout.ticks() {
        root.draw(&PathElement::new(
            vec![px(x, layout.height), px(x, layout.height + 6.0)],
            AXIS.stroke_width(1),
        ))
        .map_err(drawing_error)?;
        root.draw(&Text::new(
            label,
            px(x, layout.height + 9.0),
            label_style.clone().pos(Pos::new(HPos::Center, VPos::Top)),
        ))
        .map_err(drawing_error)?;
    }

    root.draw(&Text::new(
        AXIS_TITLE,
        px(CHART_WIDTH / 2.0, layout.height + 52.0),
        (FONT, 13)
            .into_font()
            .color(&title_color)
            .pos(Pos::new(HPos::Center, VPos::Bottom)),
    ))
    .map_err(drawing_error)?;

    root.present().map_err(drawing_error)?;
    Ok(())
}
