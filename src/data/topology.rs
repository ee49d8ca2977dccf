//! Topology Loader Module
//! Decodes TopoJSON country boundaries into longitude/latitude polygons.

use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Failed to read topology '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid topology JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Topology has no '{0}' object")]
    MissingObject(String),
    #[error("Arc index {0} is out of range")]
    ArcOutOfRange(i64),
}

/// A closed ring of `[longitude, latitude]` points in degrees.
pub type Ring = Vec<[f64; 2]>;

/// One country: polygons, each polygon an outer ring followed by holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub polygons: Vec<Vec<Ring>>,
}

/// Decoded world map.
#[derive(Debug, Clone, Default)]
pub struct WorldTopology {
    pub countries: Vec<Country>,
}

#[derive(Deserialize)]
struct RawTopology {
    #[serde(default)]
    transform: Option<RawTransform>,
    arcs: Vec<Vec<[f64; 2]>>,
    objects: HashMap<String, RawObject>,
}

#[derive(Deserialize, Clone, Copy)]
struct RawTransform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Deserialize)]
struct RawObject {
    #[serde(default)]
    geometries: Vec<RawGeometry>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    arcs: serde_json::Value,
}

impl WorldTopology {
    /// Read and decode the named object (normally `countries`) from a file.
    pub fn load(path: &Path, object: &str) -> Result<Self, TopologyError> {
        let text = std::fs::read_to_string(path).map_err(|source| TopologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let world = Self::from_json(&text, object)?;
        tracing::info!(
            "Loaded {} countries from {}",
            world.countries.len(),
            path.display()
        );
        Ok(world)
    }

    pub fn from_json(text: &str, object: &str) -> Result<Self, TopologyError> {
        let raw: RawTopology = serde_json::from_str(text)?;
        let arcs = decode_arcs(&raw.arcs, raw.transform);
        let collection = raw
            .objects
            .get(object)
            .ok_or_else(|| TopologyError::MissingObject(object.to_string()))?;

        let countries = collection
            .geometries
            .par_iter()
            .map(|geometry| decode_geometry(geometry, &arcs))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { countries })
    }
}

/// Undo quantization and delta encoding when a transform is present.
fn decode_arcs(arcs: &[Vec<[f64; 2]>], transform: Option<RawTransform>) -> Vec<Vec<[f64; 2]>> {
    arcs.iter()
        .map(|arc| match transform {
            Some(t) => {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .map(|p| {
                        x += p[0];
                        y += p[1];
                        [x * t.scale[0] + t.translate[0], y * t.scale[1] + t.translate[1]]
                    })
                    .collect()
            }
            None => arc.clone(),
        })
        .collect()
}

/// Stitch a ring from arc references; a negative index `!i` means arc `i` reversed.
fn stitch_ring(indices: &[i64], arcs: &[Vec<[f64; 2]>]) -> Result<Ring, TopologyError> {
    let mut ring: Ring = Vec::new();
    for &index in indices {
        let (arc_index, reversed) = if index < 0 { (!index, true) } else { (index, false) };
        let arc = usize::try_from(arc_index)
            .ok()
            .and_then(|i| arcs.get(i))
            .ok_or(TopologyError::ArcOutOfRange(index))?;

        // Consecutive arcs share their junction point.
        ring.pop();
        if reversed {
            ring.extend(arc.iter().rev());
        } else {
            ring.extend(arc.iter());
        }
    }
    Ok(ring)
}

fn decode_polygon(rings: &[Vec<i64>], arcs: &[Vec<[f64; 2]>]) -> Result<Vec<Ring>, TopologyError> {
    rings.iter().map(|ring| stitch_ring(ring, arcs)).collect()
}

fn decode_geometry(geometry: &RawGeometry, arcs: &[Vec<[f64; 2]>]) -> Result<Country, TopologyError> {
    let polygons = match geometry.kind.as_deref() {
        Some("Polygon") => {
            let rings: Vec<Vec<i64>> = serde_json::from_value(geometry.arcs.clone())?;
            vec![decode_polygon(&rings, arcs)?]
        }
        Some("MultiPolygon") => {
            let polygons: Vec<Vec<Vec<i64>>> = serde_json::from_value(geometry.arcs.clone())?;
            polygons
                .iter()
                .map(|rings| decode_polygon(rings, arcs))
                .collect::<Result<Vec<_>, _>>()?
        }
        _ => Vec::new(),
    };

    Ok(Country { polygons })
}
