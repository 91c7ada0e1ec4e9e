//! Polygon sketch system
//!
//! Provides interactive authoring of a single closed polygon:
//! - Vertex model with an explicit closure flag
//! - Drawing state machine (Idle / Drawing)
//! - Vertex editing (select, hover, drag, delete)
//! - An editor actor that applies actions in arrival order

mod drawing;
mod editing;
mod editor;
mod vertex;

pub use drawing::*;
pub use editing::*;
pub use editor::*;
pub use vertex::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::viewport::ZoomLimits;

/// Grid spacing in logical pixels
pub const GRID_SIZE: f64 = 20.0;
/// Clicking this close to the first vertex closes the polygon
pub const CLOSE_TOLERANCE: f64 = 15.0;
/// Minimum spacing between consecutive vertices
pub const MIN_POINT_DISTANCE: f64 = 10.0;
/// Two vertices this close are the same point for closure checks
pub const CLOSURE_EPSILON: f64 = 1.0;
/// Minimum unique vertices of a polygon
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Sketch-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SketchError {
    #[error("Polygon must have at least {required} unique points (found {found})")]
    InsufficientVertices { required: usize, found: usize },

    #[error("Invalid sketch format: {0}")]
    InvalidFormat(String),

    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Vertex index {index} out of range (polygon has {len} points)")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("Cannot {operation} while {mode}")]
    ModeMismatch {
        operation: &'static str,
        mode: &'static str,
    },
}

/// Tolerances and grid used by the drawing and editing rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Grid spacing in logical pixels
    pub grid_size: f64,
    /// Distance to the first vertex that closes the polygon
    pub close_tolerance: f64,
    /// Minimum spacing between consecutive vertices
    pub min_point_distance: f64,
    /// Zoom step and bounds
    pub zoom: ZoomLimits,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            close_tolerance: CLOSE_TOLERANCE,
            min_point_distance: MIN_POINT_DISTANCE,
            zoom: ZoomLimits::default(),
        }
    }
}
