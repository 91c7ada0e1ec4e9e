//! Application configuration module
//!
//! This module handles application-wide configuration including drawing
//! tolerances, defaults for new sketches, and display preferences.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use pm_core::{
    CLOSE_TOLERANCE, DEFAULT_DPI, DEFAULT_SCALE, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH,
    EditorSettings, GRID_SIZE, MAX_ZOOM, MIN_POINT_DISTANCE, MIN_ZOOM, SketchDocument,
    StrokeColor, ZOOM_STEP, ZoomLimits, validate_positive, validate_stroke_width,
};
use serde::{Deserialize, Serialize};

/// Drawing and editing tolerances
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Grid spacing in pixels
    pub grid_size: f64,
    /// Clicking within this distance of the first point closes the polygon
    pub close_tolerance: f64,
    /// Minimum spacing between consecutive points
    pub min_point_distance: f64,
    /// Zoom factor per wheel step
    pub zoom_step: f64,
    /// Zoom bounds
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            close_tolerance: CLOSE_TOLERANCE,
            min_point_distance: MIN_POINT_DISTANCE,
            zoom_step: ZOOM_STEP,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl EditorConfig {
    /// Convert to editor settings, falling back to defaults for nonsense values
    pub fn to_settings(&self) -> EditorSettings {
        let defaults = EditorSettings::default();
        let positive_or = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                tracing::warn!("Ignoring invalid editor setting {}", value);
                fallback
            }
        };

        let min_zoom = positive_or(self.min_zoom, MIN_ZOOM);
        let max_zoom = positive_or(self.max_zoom, MAX_ZOOM).max(min_zoom);
        let zoom_step = if self.zoom_step.is_finite() && self.zoom_step > 1.0 {
            self.zoom_step
        } else {
            tracing::warn!("Ignoring invalid zoom step {}", self.zoom_step);
            ZOOM_STEP
        };

        EditorSettings {
            grid_size: positive_or(self.grid_size, defaults.grid_size),
            close_tolerance: positive_or(self.close_tolerance, defaults.close_tolerance),
            min_point_distance: positive_or(self.min_point_distance, defaults.min_point_distance),
            zoom: ZoomLimits {
                step: zoom_step,
                min: min_zoom,
                max: max_zoom,
            },
        }
    }
}

/// Styling and scale applied to new sketches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SketchDefaults {
    /// Real-world units per inch
    pub scale: f64,
    /// Display dots per inch
    pub dpi: f64,
    /// Polygon colour
    pub stroke_color: String,
    /// Stroke width in pixels
    pub stroke_width: u8,
    /// Show edge length labels
    pub show_dimensions: bool,
}

impl Default for SketchDefaults {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            dpi: DEFAULT_DPI,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            show_dimensions: true,
        }
    }
}

impl SketchDefaults {
    /// Empty document carrying these defaults. Invalid entries are replaced
    /// by the built-in defaults.
    pub fn to_document(&self) -> SketchDocument {
        let fallback = SketchDocument::default();
        SketchDocument {
            scale: validate_positive("scale", self.scale).unwrap_or(fallback.scale),
            dpi: validate_positive("dpi", self.dpi).unwrap_or(fallback.dpi),
            stroke_color: StrokeColor::parse(&self.stroke_color)
                .unwrap_or_else(|_| fallback.stroke_color.clone()),
            stroke_width: validate_stroke_width(self.stroke_width)
                .unwrap_or(fallback.stroke_width),
            show_dimensions: self.show_dimensions,
            ..fallback
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Show the background grid
    pub show_grid: bool,
    /// Decimal places in measurement readouts
    pub precision: usize,
    /// Unit label for measurements
    pub unit_label: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            precision: 2,
            unit_label: "units".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Drawing tolerances
    #[serde(default)]
    pub editor: EditorConfig,
    /// New sketch defaults
    #[serde(default)]
    pub sketch: SketchDefaults,
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}
