//! Persisted sketch document
//!
//! The JSON wire format is an object with `points`, `polygonColor`, `scale`,
//! `dpi`, `strokeWidth` and `showDimensions`. Missing, null or zero values
//! fall back to defaults; values that are present but out of range make the
//! whole document invalid.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Metrics, UnitConversion, polygon_metrics};
use crate::sketch::{SketchError, Vertex, VertexSequence};

/// Default polygon colour (blue)
pub const DEFAULT_STROKE_COLOR: &str = "#3b82f6";
/// Default scale in real-world units per inch
pub const DEFAULT_SCALE: f64 = 10.0;
/// Default display resolution
pub const DEFAULT_DPI: f64 = 96.0;
/// Default stroke width in pixels
pub const DEFAULT_STROKE_WIDTH: u8 = 2;
/// Allowed stroke widths
pub const STROKE_WIDTH_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// A CSS hex colour such as `#3b82f6`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StrokeColor(String);

impl StrokeColor {
    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn parse(value: &str) -> Result<Self, SketchError> {
        let digits = value.strip_prefix('#').ok_or_else(|| invalid_color(value))?;
        let valid_len = matches!(digits.len(), 3 | 6 | 8);
        if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid_color(value));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StrokeColor {
    fn default() -> Self {
        Self(DEFAULT_STROKE_COLOR.to_string())
    }
}

impl fmt::Display for StrokeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn invalid_color(value: &str) -> SketchError {
    SketchError::InvalidParameter {
        name: "color",
        reason: format!("'{}' is not a hex colour", value),
    }
}

/// Check a scale or DPI value: finite and strictly positive
pub fn validate_positive(name: &'static str, value: f64) -> Result<f64, SketchError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SketchError::InvalidParameter {
            name,
            reason: format!("{} must be a positive number", value),
        })
    }
}

/// Check a stroke width against the allowed range
pub fn validate_stroke_width(value: u8) -> Result<u8, SketchError> {
    if STROKE_WIDTH_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(stroke_width_out_of_range(value))
    }
}

fn stroke_width_out_of_range(value: impl fmt::Display) -> SketchError {
    SketchError::InvalidParameter {
        name: "stroke width",
        reason: format!(
            "{} is outside {}..={}",
            value,
            STROKE_WIDTH_RANGE.start(),
            STROKE_WIDTH_RANGE.end()
        ),
    }
}

/// The complete round-trippable state of an authored polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentWire", rename_all = "camelCase")]
pub struct SketchDocument {
    /// Polygon vertices, written with the closing sentinel when closed
    #[serde(rename = "points")]
    pub vertices: VertexSequence,
    /// Stroke and fill colour
    #[serde(rename = "polygonColor")]
    pub stroke_color: StrokeColor,
    /// Real-world units per inch
    pub scale: f64,
    /// Display dots per inch
    pub dpi: f64,
    /// Stroke width in pixels
    pub stroke_width: u8,
    /// Whether edge length labels are shown
    pub show_dimensions: bool,
}

impl Default for SketchDocument {
    fn default() -> Self {
        Self {
            vertices: VertexSequence::new(),
            stroke_color: StrokeColor::default(),
            scale: DEFAULT_SCALE,
            dpi: DEFAULT_DPI,
            stroke_width: DEFAULT_STROKE_WIDTH,
            show_dimensions: true,
        }
    }
}

impl SketchDocument {
    /// Pixel to real-world conversion for this document
    pub fn conversion(&self) -> UnitConversion {
        UnitConversion::new(self.scale, self.dpi)
    }

    /// Measurements of the current polygon
    pub fn metrics(&self) -> Metrics {
        polygon_metrics(self.vertices.vertices(), self.scale, self.dpi)
    }

    /// Vertex coordinates converted to real-world units
    pub fn scaled_coordinates(&self) -> Vec<(f64, f64)> {
        let conversion = self.conversion();
        self.vertices
            .vertices()
            .iter()
            .map(|&v| {
                let p = conversion.point_to_units(v);
                (p.x, p.y)
            })
            .collect()
    }

    /// Serialize to the JSON wire format
    pub fn to_json(&self) -> Result<String, SketchError> {
        serde_json::to_string_pretty(self).map_err(|e| SketchError::InvalidFormat(e.to_string()))
    }

    /// Parse the JSON wire format
    pub fn from_json(text: &str) -> Result<Self, SketchError> {
        serde_json::from_str(text).map_err(|e| SketchError::InvalidFormat(e.to_string()))
    }
}

/// Lenient wire shape: every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentWire {
    points: Option<Vec<Vertex>>,
    polygon_color: Option<String>,
    scale: Option<f64>,
    dpi: Option<f64>,
    stroke_width: Option<f64>,
    show_dimensions: Option<bool>,
}

/// Treat a zero number the same as a missing one
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

impl TryFrom<DocumentWire> for SketchDocument {
    type Error = SketchError;

    fn try_from(wire: DocumentWire) -> Result<Self, Self::Error> {
        let stroke_color = match wire.polygon_color.as_deref() {
            None | Some("") => StrokeColor::default(),
            Some(color) => StrokeColor::parse(color)?,
        };

        let scale = match non_zero(wire.scale) {
            Some(scale) => validate_positive("scale", scale)?,
            None => DEFAULT_SCALE,
        };
        let dpi = match non_zero(wire.dpi) {
            Some(dpi) => validate_positive("dpi", dpi)?,
            None => DEFAULT_DPI,
        };

        let stroke_width = match non_zero(wire.stroke_width) {
            Some(width) if width.fract() != 0.0 => {
                return Err(SketchError::InvalidParameter {
                    name: "stroke width",
                    reason: format!("{} is not a whole number of pixels", width),
                });
            }
            Some(width) if (0.0..=255.0).contains(&width) => validate_stroke_width(width as u8)?,
            Some(width) => return Err(stroke_width_out_of_range(width)),
            None => DEFAULT_STROKE_WIDTH,
        };

        Ok(Self {
            vertices: VertexSequence::from_stored(wire.points.unwrap_or_default()),
            stroke_color,
            scale,
            dpi,
            stroke_width,
            show_dimensions: wire.show_dimensions.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_document() -> SketchDocument {
        SketchDocument {
            vertices: VertexSequence::closed_from(vec![
                Vertex::new(0.0, 0.0),
                Vertex::new(120.0, 0.0),
                Vertex::new(120.0, 80.0),
                Vertex::new(0.0, 80.0),
            ])
            .unwrap(),
            stroke_color: StrokeColor::parse("#ff8800").unwrap(),
            scale: 12.5,
            dpi: 72.0,
            stroke_width: 4,
            show_dimensions: false,
        }
    }

    #[test]
    fn test_round_trip() {
        let document = closed_document();
        let json = document.to_json().unwrap();
        let back = SketchDocument::from_json(&json).unwrap();
        assert_eq!(back, document);

        let open = SketchDocument {
            vertices: VertexSequence::from_stored(vec![
                Vertex::new(0.1, 0.2),
                Vertex::new(33.3, 44.4),
            ]),
            ..SketchDocument::default()
        };
        let back = SketchDocument::from_json(&open.to_json().unwrap()).unwrap();
        assert_eq!(back, open);
    }

    #[test]
    fn test_wire_keys_and_sentinel() {
        let json = closed_document().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let points = value["points"].as_array().unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], points[4]);
        assert_eq!(value["polygonColor"], "#ff8800");
        assert_eq!(value["scale"], 12.5);
        assert_eq!(value["dpi"], 72.0);
        assert_eq!(value["strokeWidth"], 4);
        assert_eq!(value["showDimensions"], false);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let document = SketchDocument::from_json("{}").unwrap();
        assert_eq!(document, SketchDocument::default());

        let document =
            SketchDocument::from_json(r#"{"scale": 0, "dpi": null, "strokeWidth": 0, "polygonColor": ""}"#)
                .unwrap();
        assert_eq!(document, SketchDocument::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let document =
            SketchDocument::from_json(r#"{"zoom": 3, "points": [{"x": 1, "y": 2}]}"#).unwrap();
        assert_eq!(document.vertices.vertices(), &[Vertex::new(1.0, 2.0)]);
    }

    #[test]
    fn test_malformed_text_is_invalid_format() {
        for text in ["", "not json", "[1, 2]", r#"{"points": [{"x": "a"}]}"#] {
            assert!(matches!(
                SketchDocument::from_json(text),
                Err(SketchError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn test_out_of_range_values_are_invalid_format() {
        for text in [
            r#"{"scale": -1}"#,
            r#"{"dpi": -96}"#,
            r#"{"strokeWidth": 11}"#,
            r#"{"strokeWidth": 2.5}"#,
            r#"{"polygonColor": "blue"}"#,
        ] {
            assert!(
                matches!(SketchDocument::from_json(text), Err(SketchError::InvalidFormat(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_stroke_width_errors_name_the_problem() {
        let message = |text: &str| match SketchDocument::from_json(text) {
            Err(SketchError::InvalidFormat(message)) => message,
            other => panic!("expected InvalidFormat, got {other:?}"),
        };

        assert!(message(r#"{"strokeWidth": -3}"#).contains("-3 is outside 1..=10"));
        assert!(message(r#"{"strokeWidth": 400}"#).contains("400 is outside 1..=10"));
        assert!(message(r#"{"strokeWidth": 11}"#).contains("11 is outside 1..=10"));
        assert!(message(r#"{"strokeWidth": 2.5}"#).contains("not a whole number"));
    }

    #[test]
    fn test_stroke_color_parse() {
        assert_eq!(StrokeColor::parse("#ABC").unwrap().as_str(), "#abc");
        assert!(StrokeColor::parse("#12345678").is_ok());
        assert!(StrokeColor::parse("123456").is_err());
        assert!(StrokeColor::parse("#12345").is_err());
        assert!(StrokeColor::parse("#gggggg").is_err());
    }

    #[test]
    fn test_scaled_coordinates() {
        let document = SketchDocument {
            vertices: VertexSequence::from_stored(vec![Vertex::new(96.0, 48.0)]),
            ..SketchDocument::default()
        };
        assert_eq!(document.scaled_coordinates(), vec![(10.0, 5.0)]);
    }
}
