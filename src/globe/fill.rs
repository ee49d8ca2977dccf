//! Country fills: projected rings ear-clipped into triangles.

/// Triangles covering a polygon given as its outer ring followed by holes.
///
/// Indices point into the rings' points taken in order, outer ring first.
/// A ring that fails to triangulate yields no triangles.
pub fn triangulate(rings: &[Vec<[f64; 2]>]) -> Vec<usize> {
    let mut coords = Vec::with_capacity(rings.iter().map(|r| r.len() * 2).sum());
    let mut holes = Vec::with_capacity(rings.len().saturating_sub(1));
    for (i, ring) in rings.iter().enumerate() {
        if i > 0 {
            holes.push(coords.len() / 2);
        }
        coords.extend(ring.iter().flat_map(|p| [p[0], p[1]]));
    }

    match earcutr::earcut(&coords, &holes, 2) {
        Ok(triangles) => triangles,
        Err(e) => {
            tracing::debug!("Skipping polygon fill: {:?}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(rings: &[Vec<[f64; 2]>]) -> Vec<[f64; 2]> {
        rings.iter().flatten().copied().collect()
    }

    fn area(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
        ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs() / 2.0
    }

    /// Strictly inside some triangle.
    fn covered(rings: &[Vec<[f64; 2]>], triangles: &[usize], p: [f64; 2]) -> bool {
        let pts = points(rings);
        triangles.chunks_exact(3).any(|t| {
            let (a, b, c) = (pts[t[0]], pts[t[1]], pts[t[2]]);
            let whole = area(a, b, c);
            let parts = [area(p, b, c), area(a, p, c), area(a, b, p)];
            parts.iter().all(|&s| s > 1e-9) && (parts.iter().sum::<f64>() - whole).abs() < 1e-6
        })
    }

    fn total_area(rings: &[Vec<[f64; 2]>], triangles: &[usize]) -> f64 {
        let pts = points(rings);
        triangles
            .chunks_exact(3)
            .map(|t| area(pts[t[0]], pts[t[1]], pts[t[2]]))
            .sum()
    }

    fn notched_ring() -> Vec<[f64; 2]> {
        vec![
            [0.0, 0.0],
            [40.0, 0.0],
            [40.0, 80.0],
            [60.0, 80.0],
            [60.0, 0.0],
            [100.0, 0.0],
            [100.0, 100.0],
            [0.0, 100.0],
            [0.0, 0.0],
        ]
    }

    #[test]
    fn test_concave_notch_stays_unfilled() {
        let rings = vec![notched_ring()];
        let triangles = triangulate(&rings);

        assert!(!triangles.is_empty());
        assert!(!covered(&rings, &triangles, [50.0, 20.0]));
        assert!(covered(&rings, &triangles, [20.0, 20.0]));
        assert!(covered(&rings, &triangles, [50.0, 90.0]));
        assert!((total_area(&rings, &triangles) - 8400.0).abs() < 1e-6);
    }

    #[test]
    fn test_holes_are_left_open() {
        let outer = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        let hole = vec![[4.0, 4.0], [4.0, 6.0], [6.0, 6.0], [6.0, 4.0]];
        let rings = vec![outer, hole];
        let triangles = triangulate(&rings);

        assert!(!covered(&rings, &triangles, [5.0, 5.0]));
        assert!(covered(&rings, &triangles, [1.0, 1.0]));
        assert!((total_area(&rings, &triangles) - 96.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_ring_has_no_triangles() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&[vec![[0.0, 0.0], [1.0, 1.0]]]).is_empty());
    }
}
