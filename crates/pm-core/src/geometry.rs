//! Polygon geometry
//!
//! Pure functions deriving real-world measurements from vertices in pixel
//! space. Pixels convert to inches through the DPI, and inches to real-world
//! units through the scale (units per inch).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::sketch::Vertex;

/// Conversion from canvas pixels to real-world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitConversion {
    /// Real-world units per inch
    pub scale: f64,
    /// Display dots per inch
    pub dpi: f64,
}

impl UnitConversion {
    pub fn new(scale: f64, dpi: f64) -> Self {
        Self { scale, dpi }
    }

    /// Linear factor applied to pixel lengths
    pub fn factor(&self) -> f64 {
        self.scale / self.dpi
    }

    /// Convert a pixel length to real-world units
    pub fn px_to_units(&self, pixels: f64) -> f64 {
        pixels / self.dpi * self.scale
    }

    /// Convert a pixel area to square real-world units
    pub fn area_to_units(&self, square_pixels: f64) -> f64 {
        square_pixels * self.factor() * self.factor()
    }

    /// Convert a vertex to real-world coordinates
    pub fn point_to_units(&self, vertex: Vertex) -> DVec2 {
        vertex.to_dvec2() * self.factor()
    }
}

/// Real-world measurements of a polygon
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub width: f64,
    pub height: f64,
    pub perimeter: f64,
    pub area: f64,
}

impl Metrics {
    pub const ZERO: Metrics = Metrics {
        width: 0.0,
        height: 0.0,
        perimeter: 0.0,
        area: 0.0,
    };
}

/// Axis-aligned bounding box in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Length label for one polygon edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDimension {
    /// Index of the edge's start vertex
    pub start: usize,
    /// Index of the edge's end vertex
    pub end: usize,
    /// Edge length in real-world units
    pub length: f64,
    /// Midpoint of the edge in pixel space
    pub midpoint: DVec2,
    /// Where the label is drawn, offset along the edge normal
    pub anchor: DVec2,
    /// Text rotation in degrees, turned by 180 for leftward edges so labels stay upright
    pub rotation_degrees: f64,
}

/// Distance between two optional points.
///
/// Returns infinity when either point is absent so proximity checks fail.
pub fn distance(a: Option<Vertex>, b: Option<Vertex>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => a.to_dvec2().distance(b.to_dvec2()),
        _ => f64::INFINITY,
    }
}

/// Drop a trailing closure sentinel (last vertex equal to the first)
pub fn unique_vertices(vertices: &[Vertex]) -> &[Vertex] {
    match vertices {
        [first, .., last] if first == last => &vertices[..vertices.len() - 1],
        _ => vertices,
    }
}

/// Bounding box of a vertex set, `None` when empty
pub fn bounding_box(vertices: &[Vertex]) -> Option<BoundingBox> {
    let first = vertices.first()?.to_dvec2();
    let (min, max) = vertices
        .iter()
        .map(|v| v.to_dvec2())
        .fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    Some(BoundingBox { min, max })
}

/// Twice the signed area of the closed vertex cycle (shoelace sum)
fn shoelace_sum(vertices: &[Vertex]) -> f64 {
    cycle_edges(vertices)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum()
}

/// Sum of edge lengths around the closed vertex cycle, in pixels
fn cycle_length(vertices: &[Vertex]) -> f64 {
    cycle_edges(vertices)
        .map(|(a, b)| a.to_dvec2().distance(b.to_dvec2()))
        .sum()
}

fn cycle_edges(vertices: &[Vertex]) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

/// Compute width, height, perimeter and area of a polygon.
///
/// The vertex cycle always wraps from the last unique vertex back to the
/// first. Fewer than three unique vertices yields all-zero metrics.
pub fn polygon_metrics(vertices: &[Vertex], scale: f64, dpi: f64) -> Metrics {
    let unique = unique_vertices(vertices);
    if unique.len() < 3 {
        return Metrics::ZERO;
    }

    let conversion = UnitConversion::new(scale, dpi);
    let Some(bbox) = bounding_box(unique) else {
        return Metrics::ZERO;
    };

    Metrics {
        width: conversion.px_to_units(bbox.width()),
        height: conversion.px_to_units(bbox.height()),
        perimeter: conversion.px_to_units(cycle_length(unique)),
        area: conversion.area_to_units(shoelace_sum(unique).abs() / 2.0),
    }
}

/// Length labels for each drawn edge.
///
/// Open sequences label consecutive edges only; closed sequences also label
/// the edge from the last vertex back to the first. Edges shorter than one
/// pixel are skipped.
pub fn edge_dimensions(
    vertices: &[Vertex],
    closed: bool,
    conversion: UnitConversion,
    label_offset: f64,
) -> Vec<EdgeDimension> {
    let n = vertices.len();
    if n < 2 {
        return Vec::new();
    }
    let edge_count = if closed && n > 2 { n } else { n - 1 };

    (0..edge_count)
        .filter_map(|i| {
            let j = (i + 1) % n;
            let a = vertices[i].to_dvec2();
            let b = vertices[j].to_dvec2();
            let d = b - a;
            let length_px = d.length();
            if length_px < 1.0 {
                return None;
            }

            let midpoint = (a + b) / 2.0;
            let normal = DVec2::new(-d.y, d.x) / length_px;
            let angle = d.y.atan2(d.x).to_degrees();
            let rotation_degrees = if angle.abs() > 90.0 { angle + 180.0 } else { angle };

            Some(EdgeDimension {
                start: i,
                end: j,
                length: conversion.px_to_units(length_px),
                midpoint,
                anchor: midpoint + normal * label_offset,
                rotation_degrees,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Vec<Vertex> {
        vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(size, 0.0),
            Vertex::new(size, size),
            Vertex::new(0.0, size),
        ]
    }

    #[test]
    fn test_unit_square_metrics() {
        let metrics = polygon_metrics(&square(10.0), 1.0, 10.0);

        assert_relative_eq!(metrics.width, 1.0);
        assert_relative_eq!(metrics.height, 1.0);
        assert_relative_eq!(metrics.perimeter, 4.0);
        assert_relative_eq!(metrics.area, 1.0);
    }

    #[test]
    fn test_sentinel_is_ignored() {
        let mut closed = square(10.0);
        closed.push(closed[0]);

        assert_eq!(
            polygon_metrics(&closed, 1.0, 10.0),
            polygon_metrics(&square(10.0), 1.0, 10.0)
        );
    }

    #[test]
    fn test_area_ignores_winding() {
        let triangle = vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(40.0, 0.0),
            Vertex::new(20.0, 60.0),
        ];
        let reversed: Vec<Vertex> = triangle.iter().rev().copied().collect();

        let forward = polygon_metrics(&triangle, 10.0, 96.0);
        let backward = polygon_metrics(&reversed, 10.0, 96.0);

        assert_relative_eq!(forward.area, backward.area);
        assert_relative_eq!(forward.area, 1200.0 * (10.0 / 96.0) * (10.0 / 96.0));
    }

    #[test]
    fn test_degenerate_inputs_are_zero() {
        assert_eq!(polygon_metrics(&[], 10.0, 96.0), Metrics::ZERO);

        let two = [Vertex::new(0.0, 0.0), Vertex::new(50.0, 50.0)];
        assert_eq!(polygon_metrics(&two, 10.0, 96.0), Metrics::ZERO);

        // Two unique vertices plus a sentinel is still degenerate
        let sentinel = [two[0], two[1], two[0]];
        assert_eq!(polygon_metrics(&sentinel, 10.0, 96.0), Metrics::ZERO);
    }

    #[test]
    fn test_area_scales_quadratically() {
        let base = polygon_metrics(&square(96.0), 1.0, 96.0);
        let doubled = polygon_metrics(&square(96.0), 2.0, 96.0);

        assert_relative_eq!(doubled.perimeter, base.perimeter * 2.0);
        assert_relative_eq!(doubled.area, base.area * 4.0);
    }

    #[test]
    fn test_distance_with_missing_operand() {
        let p = Vertex::new(3.0, 4.0);
        assert_relative_eq!(distance(Some(Vertex::new(0.0, 0.0)), Some(p)), 5.0);
        assert!(distance(None, Some(p)).is_infinite());
        assert!(distance(Some(p), None).is_infinite());
    }

    #[test]
    fn test_bounding_box() {
        let points = [
            Vertex::new(20.0, -5.0),
            Vertex::new(-10.0, 15.0),
            Vertex::new(5.0, 40.0),
        ];
        let bbox = bounding_box(&points).unwrap();
        assert_eq!(bbox.min, DVec2::new(-10.0, -5.0));
        assert_eq!(bbox.max, DVec2::new(20.0, 40.0));
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn test_edge_dimensions_closed_square() {
        let conversion = UnitConversion::new(1.0, 10.0);
        let edges = edge_dimensions(&square(10.0), true, conversion, 12.0);

        assert_eq!(edges.len(), 4);
        assert_eq!((edges[3].start, edges[3].end), (3, 0));
        for edge in &edges {
            assert_relative_eq!(edge.length, 1.0);
        }

        // Bottom edge runs along +x: normal points +y
        assert_eq!(edges[0].midpoint, DVec2::new(5.0, 0.0));
        assert_relative_eq!(edges[0].anchor.y, 12.0);
        assert_relative_eq!(edges[0].rotation_degrees, 0.0);

        // Top edge runs along -x: text is flipped upright
        assert_relative_eq!(edges[2].rotation_degrees, 360.0);
    }

    #[test]
    fn test_edge_dimensions_open_and_short_edges() {
        let conversion = UnitConversion::new(10.0, 96.0);
        let points = [
            Vertex::new(0.0, 0.0),
            Vertex::new(0.5, 0.0),
            Vertex::new(96.0, 0.0),
        ];
        let edges = edge_dimensions(&points, false, conversion, 12.0);

        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].start, edges[0].end), (1, 2));
        assert_relative_eq!(edges[0].length, 95.5 / 96.0 * 10.0);
    }

    #[test]
    fn test_point_to_units() {
        let conversion = UnitConversion::new(10.0, 96.0);
        let scaled = conversion.point_to_units(Vertex::new(96.0, 192.0));
        assert_relative_eq!(scaled.x, 10.0);
        assert_relative_eq!(scaled.y, 20.0);
    }
}
