//! Polygon Measure core
//!
//! This crate contains the authoring engine for the polygon measure tool:
//! - Geometry: shoelace area, perimeter, bounding box, unit conversion
//! - Viewport: zoom/pan transform and grid snapping
//! - Sketch: vertex model, drawing state machine, vertex editing
//! - Document: the persisted sketch and its JSON codec

pub mod document;
pub mod geometry;
pub mod sketch;
pub mod viewport;

pub use document::*;
pub use geometry::*;
pub use sketch::*;
pub use viewport::*;
