//! Viewport transform and grid snapping
//!
//! Logical pixel space is where vertices live. Viewport space is what the
//! pointer reports: `viewport = logical * zoom + pan`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Zoom factor applied per wheel step
pub const ZOOM_STEP: f64 = 1.1;
/// Smallest allowed zoom
pub const MIN_ZOOM: f64 = 0.1;
/// Largest allowed zoom
pub const MAX_ZOOM: f64 = 10.0;

/// Direction of a discrete zoom step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel scrolled up (negative delta) zooms in
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y < 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }
    }
}

/// Zoom limits and step for viewport changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            step: ZOOM_STEP,
            min: MIN_ZOOM,
            max: MAX_ZOOM,
        }
    }
}

/// Zoom and pan mapping between logical and viewport space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    /// Uniform scale factor
    pub zoom: f64,
    /// Viewport position of the logical origin
    pub pan: DVec2,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportTransform {
    pub const IDENTITY: ViewportTransform = ViewportTransform {
        zoom: 1.0,
        pan: DVec2::ZERO,
    };

    pub fn new(zoom: f64, pan: DVec2) -> Self {
        Self { zoom, pan }
    }

    /// Map a viewport position into logical space
    pub fn to_logical(&self, viewport: DVec2) -> DVec2 {
        (viewport - self.pan) / self.zoom
    }

    /// Map a logical position into viewport space
    pub fn to_viewport(&self, logical: DVec2) -> DVec2 {
        logical * self.zoom + self.pan
    }

    /// Zoom one step toward or away from `pointer`, keeping the logical
    /// point under the pointer fixed on screen
    pub fn zoomed(&self, pointer: DVec2, direction: ZoomDirection, limits: &ZoomLimits) -> Self {
        let factor = match direction {
            ZoomDirection::In => limits.step,
            ZoomDirection::Out => 1.0 / limits.step,
        };
        let zoom = (self.zoom * factor).clamp(limits.min, limits.max);
        let anchor = self.to_logical(pointer);

        Self {
            zoom,
            pan: pointer - anchor * zoom,
        }
    }

    /// Shift the view by a viewport-space delta
    pub fn panned(&self, delta: DVec2) -> Self {
        Self {
            zoom: self.zoom,
            pan: self.pan + delta,
        }
    }

    /// Zoom as a rounded percentage for display
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn can_zoom_in(&self, limits: &ZoomLimits) -> bool {
        self.zoom < limits.max
    }

    pub fn can_zoom_out(&self, limits: &ZoomLimits) -> bool {
        self.zoom > limits.min
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

fn round_to_grid(logical: DVec2, grid_size: f64) -> DVec2 {
    (logical / grid_size).round() * grid_size
}

/// Snap a viewport position to the logical grid, returning the logical position
pub fn snap_to_logical(viewport: DVec2, transform: &ViewportTransform, grid_size: f64) -> DVec2 {
    round_to_grid(transform.to_logical(viewport), grid_size)
}

/// Snap a viewport position to the logical grid, returning the snapped
/// position back in viewport space
pub fn snap_to_grid(viewport: DVec2, transform: &ViewportTransform, grid_size: f64) -> DVec2 {
    transform.to_viewport(snap_to_logical(viewport, transform, grid_size))
}
