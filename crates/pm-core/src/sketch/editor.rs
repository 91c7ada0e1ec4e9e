//! Sketch editor
//!
//! Owns the document, the authoring mode, the interaction state and the
//! viewport, and applies actions to them strictly one at a time. A failed
//! action never leaves a partial change behind.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    EditingController, EditorSettings, InteractionState, MIN_POLYGON_VERTICES, PlaceOutcome,
    SketchError, SketchMode, Vertex, VertexSequence,
};
use crate::document::{SketchDocument, StrokeColor, validate_positive, validate_stroke_width};
use crate::geometry::{EdgeDimension, Metrics, edge_dimensions};
use crate::viewport::{ViewportTransform, ZoomDirection, snap_to_logical};

/// Screen distance between an edge and its length label
pub const EDGE_LABEL_OFFSET: f64 = 18.0;

/// Semantic input events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SketchAction {
    /// Discard the current polygon and start drawing a new one
    StartDrawing,
    /// Primary button pressed on empty canvas (viewport position)
    PointerDown { position: DVec2 },
    /// Pointer moved over the canvas (viewport position)
    PointerMove { position: DVec2 },
    /// Mouse wheel over the canvas
    Wheel { delta_y: f64, position: DVec2 },
    /// Zoom in one step about the last pointer position
    ZoomIn,
    /// Zoom out one step about the last pointer position
    ZoomOut,
    /// Restore the identity view
    ResetView,
    /// Drag the canvas by a viewport delta
    PanBy { delta: DVec2 },
    /// Complete the polygon being drawn
    Finish,
    /// Escape key
    Escape,
    /// Clear everything
    Reset,
    /// Click on a vertex handle
    SelectVertex { index: usize },
    /// Pointer entered (Some) or left (None) a vertex handle
    HoverVertex { index: Option<usize> },
    /// Began dragging a vertex handle
    DragStart { index: usize },
    /// Vertex handle dragged to a viewport position
    DragVertex { index: usize, position: DVec2 },
    /// Released a vertex handle
    DragEnd { index: usize },
    /// Delete a vertex by index
    DeleteVertex { index: usize },
    /// Delete or Backspace pressed
    DeleteSelected { text_input_focused: bool },
    /// Set real-world units per inch
    SetScale { value: f64 },
    /// Set display dots per inch
    SetDpi { value: f64 },
    /// Set the polygon colour (CSS hex)
    SetStrokeColor { color: String },
    /// Set the stroke width in pixels
    SetStrokeWidth { width: u8 },
    /// Show or hide edge length labels
    SetShowDimensions { show: bool },
    /// Replace the document with a parsed sketch file
    LoadDocument { text: String },
}

impl SketchAction {
    /// Short description for logs and notifications
    pub fn description(&self) -> &'static str {
        match self {
            SketchAction::StartDrawing => "Start Drawing",
            SketchAction::PointerDown { .. } => "Click",
            SketchAction::PointerMove { .. } => "Move Pointer",
            SketchAction::Wheel { .. } => "Zoom",
            SketchAction::ZoomIn => "Zoom In",
            SketchAction::ZoomOut => "Zoom Out",
            SketchAction::ResetView => "Reset View",
            SketchAction::PanBy { .. } => "Pan",
            SketchAction::Finish => "Complete Polygon",
            SketchAction::Escape => "Escape",
            SketchAction::Reset => "Reset",
            SketchAction::SelectVertex { .. } => "Select Point",
            SketchAction::HoverVertex { .. } => "Hover Point",
            SketchAction::DragStart { .. } => "Start Drag",
            SketchAction::DragVertex { .. } => "Move Point",
            SketchAction::DragEnd { .. } => "End Drag",
            SketchAction::DeleteVertex { .. } | SketchAction::DeleteSelected { .. } => {
                "Delete Point"
            }
            SketchAction::SetScale { .. } => "Set Scale",
            SketchAction::SetDpi { .. } => "Set DPI",
            SketchAction::SetStrokeColor { .. } => "Set Color",
            SketchAction::SetStrokeWidth { .. } => "Set Stroke Width",
            SketchAction::SetShowDimensions { .. } => "Toggle Dimensions",
            SketchAction::LoadDocument { .. } => "Load Sketch",
        }
    }
}

/// What an applied action did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SketchOutcome {
    /// The action had no effect in the current mode
    Ignored,
    /// State changed
    Changed,
    /// A click while drawing
    Placed(PlaceOutcome),
    /// A vertex was deleted
    Deleted(Vertex),
}

/// Status line summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchStatus {
    /// Empty canvas, nothing drawn
    Idle,
    /// Drawing in progress
    Drawing,
    /// A polygon exists and can be edited
    Editing,
    /// A vertex is selected
    Selected(usize),
}

/// Single-actor editor for one polygon sketch
#[derive(Debug, Clone, Default)]
pub struct SketchEditor {
    document: SketchDocument,
    mode: SketchMode,
    interaction: InteractionState,
    viewport: ViewportTransform,
    settings: EditorSettings,
    metrics: Metrics,
    /// Last pointer position over the canvas (viewport space)
    pointer: Option<DVec2>,
}

impl SketchEditor {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Start from an existing document
    pub fn with_document(document: SketchDocument, settings: EditorSettings) -> Self {
        let mut editor = Self::new(settings);
        editor.document = document;
        editor.refresh_metrics();
        editor
    }

    // ============== Read-only snapshots ==============

    pub fn document(&self) -> &SketchDocument {
        &self.document
    }

    pub fn vertices(&self) -> &VertexSequence {
        &self.document.vertices
    }

    pub fn mode(&self) -> &SketchMode {
        &self.mode
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn viewport(&self) -> ViewportTransform {
        self.viewport
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Rubber-band preview endpoint while drawing
    pub fn preview(&self) -> Option<Vertex> {
        self.mode.session().and_then(|s| s.preview)
    }

    /// Highlight the first vertex as a closing target
    pub fn is_about_to_close(&self) -> bool {
        self.mode.session().is_some_and(|s| {
            s.is_about_to_close(&self.document.vertices, self.settings.close_tolerance)
        })
    }

    /// A click at the preview would close the polygon
    pub fn will_close(&self) -> bool {
        self.mode.session().is_some_and(|s| {
            s.will_close(&self.document.vertices, self.settings.close_tolerance)
        })
    }

    /// Whether "Complete" is available
    pub fn can_finish(&self) -> bool {
        self.mode.can_finish(&self.document.vertices)
    }

    /// A completed polygon is on the canvas
    pub fn has_polygon(&self) -> bool {
        self.mode.is_idle() && self.document.vertices.unique_len() >= MIN_POLYGON_VERTICES
    }

    /// Edge length labels, shown only for a completed polygon
    pub fn edge_labels(&self) -> Vec<EdgeDimension> {
        if !self.has_polygon() || !self.document.show_dimensions {
            return Vec::new();
        }
        edge_dimensions(
            self.document.vertices.vertices(),
            self.document.vertices.is_closed(),
            self.document.conversion(),
            EDGE_LABEL_OFFSET / self.viewport.zoom,
        )
    }

    pub fn status(&self) -> SketchStatus {
        if self.mode.is_drawing() {
            SketchStatus::Drawing
        } else if let Some(index) = self.interaction.selected {
            SketchStatus::Selected(index)
        } else if !self.document.vertices.is_empty() {
            SketchStatus::Editing
        } else {
            SketchStatus::Idle
        }
    }

    /// Replace tolerances and zoom limits, clamping the current zoom
    pub fn set_settings(&mut self, settings: EditorSettings) {
        self.settings = settings;
        self.viewport.zoom = self
            .viewport
            .zoom
            .clamp(settings.zoom.min, settings.zoom.max);
    }

    // ============== Actions ==============

    /// Apply one action.
    ///
    /// On error nothing has changed and the error describes why the action
    /// was refused.
    pub fn apply(&mut self, action: SketchAction) -> Result<SketchOutcome, SketchError> {
        debug!("Applying {}", action.description());
        let outcome = self.dispatch(action)?;
        if outcome != SketchOutcome::Ignored {
            self.refresh_metrics();
        }
        Ok(outcome)
    }

    fn dispatch(&mut self, action: SketchAction) -> Result<SketchOutcome, SketchError> {
        match action {
            SketchAction::StartDrawing => {
                self.mode.start(&mut self.document.vertices);
                self.interaction.clear();
                self.viewport = ViewportTransform::IDENTITY;
                info!("Started drawing");
                Ok(SketchOutcome::Changed)
            }

            SketchAction::PointerDown { position } => {
                if self.mode.is_drawing() {
                    let vertex = self.snap(position);
                    let outcome = self.mode.place_vertex(
                        &mut self.document.vertices,
                        vertex,
                        &self.settings,
                    )?;
                    if outcome == PlaceOutcome::Closed {
                        self.interaction.clear();
                        info!("Closed polygon with {} points", self.document.vertices.len());
                    }
                    Ok(SketchOutcome::Placed(outcome))
                } else if self.interaction.selected.is_some() {
                    self.interaction.selected = None;
                    Ok(SketchOutcome::Changed)
                } else {
                    Ok(SketchOutcome::Ignored)
                }
            }

            SketchAction::PointerMove { position } => {
                self.pointer = Some(position);
                if !self.mode.is_drawing() || self.document.vertices.is_empty() {
                    return Ok(SketchOutcome::Ignored);
                }
                let vertex = self.snap(position);
                self.mode.update_preview(&self.document.vertices, vertex);
                Ok(SketchOutcome::Changed)
            }

            SketchAction::Wheel { delta_y, position } => {
                self.pointer = Some(position);
                self.zoom(position, ZoomDirection::from_wheel_delta(delta_y))
            }
            SketchAction::ZoomIn => self.zoom(self.zoom_anchor(), ZoomDirection::In),
            SketchAction::ZoomOut => self.zoom(self.zoom_anchor(), ZoomDirection::Out),

            SketchAction::ResetView => {
                if self.mode.is_drawing() {
                    return Ok(SketchOutcome::Ignored);
                }
                self.viewport = ViewportTransform::IDENTITY;
                Ok(SketchOutcome::Changed)
            }

            SketchAction::PanBy { delta } => {
                if self.mode.is_drawing() {
                    return Ok(SketchOutcome::Ignored);
                }
                self.viewport = self.viewport.panned(delta);
                Ok(SketchOutcome::Changed)
            }

            SketchAction::Finish => {
                self.mode.finish(&mut self.document.vertices)?;
                self.interaction.clear();
                info!("Completed polygon with {} points", self.document.vertices.len());
                Ok(SketchOutcome::Changed)
            }

            SketchAction::Escape => {
                if self.mode.is_drawing() {
                    self.reset();
                    info!("Drawing cancelled");
                    Ok(SketchOutcome::Changed)
                } else if self.interaction.selected.is_some() {
                    self.interaction.selected = None;
                    Ok(SketchOutcome::Changed)
                } else {
                    Ok(SketchOutcome::Ignored)
                }
            }

            SketchAction::Reset => {
                self.reset();
                info!("Sketch reset");
                Ok(SketchOutcome::Changed)
            }

            // Handles are inert while drawing
            SketchAction::SelectVertex { index } | SketchAction::DragStart { index } => {
                if self.mode.is_drawing() {
                    return Ok(SketchOutcome::Ignored);
                }
                self.editing()?.select_vertex(index)?;
                Ok(SketchOutcome::Changed)
            }

            SketchAction::HoverVertex { index } => {
                if self.mode.is_drawing() || !self.document.vertices.is_closed() {
                    return Ok(SketchOutcome::Ignored);
                }
                self.editing()?.hover_vertex(index)?;
                Ok(SketchOutcome::Changed)
            }

            SketchAction::DragVertex { index, position } => {
                if self.mode.is_drawing() {
                    return Ok(SketchOutcome::Ignored);
                }
                let vertex = self.snap(position);
                self.editing()?.drag_vertex(index, vertex)?;
                Ok(SketchOutcome::Changed)
            }

            SketchAction::DragEnd { .. } => Ok(SketchOutcome::Ignored),

            SketchAction::DeleteVertex { index } => {
                let removed = self.editing()?.delete_vertex(index)?;
                info!("Deleted point {}", index);
                Ok(SketchOutcome::Deleted(removed))
            }

            SketchAction::DeleteSelected { text_input_focused } => {
                if self.mode.is_drawing() || self.interaction.selected.is_none() {
                    return Ok(SketchOutcome::Ignored);
                }
                match self.editing()?.delete_selected(text_input_focused)? {
                    Some(removed) => Ok(SketchOutcome::Deleted(removed)),
                    None => Ok(SketchOutcome::Ignored),
                }
            }

            SketchAction::SetScale { value } => {
                self.require_idle("change the scale")?;
                self.document.scale = validate_positive("scale", value)?;
                Ok(SketchOutcome::Changed)
            }

            SketchAction::SetDpi { value } => {
                self.require_idle("change the DPI")?;
                self.document.dpi = validate_positive("dpi", value)?;
                Ok(SketchOutcome::Changed)
            }

            SketchAction::SetStrokeColor { color } => {
                self.require_idle("change the color")?;
                self.document.stroke_color = StrokeColor::parse(&color)?;
                Ok(SketchOutcome::Changed)
            }

            SketchAction::SetStrokeWidth { width } => {
                self.require_idle("change the stroke width")?;
                self.document.stroke_width = validate_stroke_width(width)?;
                Ok(SketchOutcome::Changed)
            }

            SketchAction::SetShowDimensions { show } => {
                self.require_idle("toggle dimensions")?;
                self.document.show_dimensions = show;
                Ok(SketchOutcome::Changed)
            }

            SketchAction::LoadDocument { text } => {
                let document = SketchDocument::from_json(&text)?;
                self.document = document;
                self.mode = SketchMode::Idle;
                self.interaction.clear();
                info!(
                    "Loaded sketch with {} points",
                    self.document.vertices.len()
                );
                Ok(SketchOutcome::Changed)
            }
        }
    }

    /// Zoom buttons keep the point under the last known pointer fixed
    fn zoom_anchor(&self) -> DVec2 {
        self.pointer.unwrap_or(DVec2::ZERO)
    }

    fn snap(&self, position: DVec2) -> Vertex {
        snap_to_logical(position, &self.viewport, self.settings.grid_size).into()
    }

    fn zoom(
        &mut self,
        pointer: DVec2,
        direction: ZoomDirection,
    ) -> Result<SketchOutcome, SketchError> {
        if self.mode.is_drawing() {
            return Ok(SketchOutcome::Ignored);
        }
        let zoomed = self.viewport.zoomed(pointer, direction, &self.settings.zoom);
        if zoomed == self.viewport {
            return Ok(SketchOutcome::Ignored);
        }
        self.viewport = zoomed;
        debug!("Zoom {}%", self.viewport.zoom_percent());
        Ok(SketchOutcome::Changed)
    }

    fn editing(&mut self) -> Result<EditingController<'_>, SketchError> {
        EditingController::new(
            &self.mode,
            &mut self.document.vertices,
            &mut self.interaction,
        )
    }

    fn require_idle(&self, operation: &'static str) -> Result<(), SketchError> {
        if self.mode.is_drawing() {
            return Err(SketchError::ModeMismatch {
                operation,
                mode: self.mode.name(),
            });
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.document.vertices.clear();
        self.mode = SketchMode::Idle;
        self.interaction.clear();
        self.viewport = ViewportTransform::IDENTITY;
    }

    fn refresh_metrics(&mut self) {
        self.metrics = self.document.metrics();
    }
}
