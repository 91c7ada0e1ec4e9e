//! Plain-text measurement report

use std::fmt;

use pm_core::{EdgeDimension, Metrics, SketchDocument, edge_dimensions};

use crate::config::UiConfig;

/// Measurements of a sketch, formatted for a terminal
pub struct MeasurementReport {
    metrics: Metrics,
    point_count: usize,
    closed: bool,
    edges: Vec<EdgeDimension>,
    coordinates: Vec<(f64, f64)>,
    precision: usize,
    unit: String,
}

impl MeasurementReport {
    pub fn new(document: &SketchDocument, ui: &UiConfig) -> Self {
        let vertices = &document.vertices;
        let edges = if document.show_dimensions {
            edge_dimensions(
                vertices.vertices(),
                vertices.is_closed(),
                document.conversion(),
                0.0,
            )
        } else {
            Vec::new()
        };

        Self {
            metrics: document.metrics(),
            point_count: vertices.len(),
            closed: vertices.is_closed(),
            edges,
            coordinates: document.scaled_coordinates(),
            precision: ui.precision,
            unit: ui.unit_label.clone(),
        }
    }
}

impl fmt::Display for MeasurementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision;
        let unit = &self.unit;
        let shape = if self.closed { "closed" } else { "open" };

        writeln!(f, "Points:    {} ({})", self.point_count, shape)?;
        writeln!(f, "Width:     {:.p$} {unit}", self.metrics.width)?;
        writeln!(f, "Height:    {:.p$} {unit}", self.metrics.height)?;
        writeln!(f, "Perimeter: {:.p$} {unit}", self.metrics.perimeter)?;
        writeln!(f, "Area:      {:.p$} sq. {unit}", self.metrics.area)?;

        if !self.edges.is_empty() {
            writeln!(f, "Edges:")?;
            for edge in &self.edges {
                writeln!(f, "  P{}-P{}: {:.1}", edge.start + 1, edge.end + 1, edge.length)?;
            }
        }

        if !self.coordinates.is_empty() {
            writeln!(f, "Coordinates:")?;
            for (i, (x, y)) in self.coordinates.iter().enumerate() {
                writeln!(f, "  P{}: ({:.1}, {:.1})", i + 1, x, y)?;
            }
        }
        Ok(())
    }
}
