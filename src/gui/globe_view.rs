//! Globe View
//! Rotating orthographic world map with drag-to-rotate.

use crate::charts::palette;
use crate::data::Country;
use crate::gui::control_panel::DatasetStatus;
use crate::globe::{graticule, triangulate, GlobeState, Orthographic};
use crate::view_state::Intent;
use egui::epaint::{Mesh, PathShape};
use egui::{Pos2, Sense, Shape, Stroke};

pub struct GlobeView {
    graticule: Vec<Vec<[f64; 2]>>,
    countries: Option<Vec<Country>>,
}

impl Default for GlobeView {
    fn default() -> Self {
        Self {
            graticule: graticule(),
            countries: None,
        }
    }
}

impl GlobeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_countries(&mut self, countries: Vec<Country>) {
        self.countries = Some(countries);
    }

    /// Draw the globe and translate pointer drags into intents.
    pub fn show(&self, ui: &mut egui::Ui, globe: &GlobeState, status: &DatasetStatus) -> Vec<Intent> {
        let mut intents = Vec::new();

        let available = ui.available_size();
        let side = available.x.min(available.y).max(200.0);
        let (response, painter) = ui.allocate_painter(egui::vec2(side, side), Sense::drag());
        let origin = response.rect.min;

        let local = |p: Pos2| [(p.x - origin.x) as f64, (p.y - origin.y) as f64];
        if response.drag_started() {
            if let Some(p) = response.interact_pointer_pos() {
                intents.push(Intent::DragStart(local(p)));
            }
        }
        if response.dragged() {
            if let Some(p) = response.interact_pointer_pos() {
                intents.push(Intent::DragMove(local(p)));
            }
        }
        if response.drag_stopped() {
            intents.push(Intent::DragEnd);
        }

        let projection = Orthographic::fit(side as f64, side as f64).with_rotation(globe.rotation());
        let to_screen = |p: &[f64; 2]| origin + egui::vec2(p[0] as f32, p[1] as f32);

        // water
        painter.circle_filled(
            to_screen(&projection.center),
            projection.scale as f32,
            palette::WATER,
        );

        for line in &self.graticule {
            for run in projection.project_line(line) {
                painter.add(Shape::line(
                    run.iter().map(to_screen).collect(),
                    Stroke::new(0.5, palette::GRATICULE),
                ));
            }
        }

        let Some(countries) = &self.countries else {
            painter.text(
                to_screen(&projection.center),
                egui::Align2::CENTER_CENTER,
                status.placeholder("world map"),
                egui::FontId::proportional(16.0),
                ui.visuals().text_color(),
            );
            return intents;
        };

        let border = Stroke::new(0.4, palette::COUNTRY_BORDER);
        let mut fill = Mesh::default();
        let mut outlines = Vec::new();
        for polygon in countries.iter().flat_map(|c| &c.polygons) {
            // A hidden outer ring hides its holes too.
            let Some(outer) = polygon.first().and_then(|r| projection.project_ring(r)) else {
                continue;
            };
            let rings: Vec<Vec<[f64; 2]>> = std::iter::once(outer)
                .chain(polygon[1..].iter().filter_map(|r| projection.project_ring(r)))
                .collect();

            let base = fill.vertices.len() as u32;
            for p in rings.iter().flatten() {
                fill.colored_vertex(to_screen(p), palette::COUNTRY);
            }
            for t in triangulate(&rings).chunks_exact(3) {
                fill.add_triangle(base + t[0] as u32, base + t[1] as u32, base + t[2] as u32);
            }

            outlines.extend(rings.iter().map(|ring| {
                let points: Vec<Pos2> = ring.iter().map(to_screen).collect();
                Shape::from(PathShape::closed_line(points, border))
            }));
        }
        painter.add(Shape::mesh(fill));
        painter.extend(outlines);

        intents
    }
}
