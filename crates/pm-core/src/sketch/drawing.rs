//! Drawing state machine
//!
//! `Idle` is the resting state where a completed polygon can be edited.
//! `Drawing` accepts new vertices until the polygon is closed, finished or
//! cancelled.

use tracing::debug;

use super::{EditorSettings, MIN_POLYGON_VERTICES, SketchError, Vertex, VertexSequence};
use crate::geometry::distance;

/// Transient state that exists only while drawing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingSession {
    /// Snapped pointer position used to preview the next edge
    pub preview: Option<Vertex>,
}

impl DrawingSession {
    /// The pointer is near enough to the first vertex to highlight closing
    pub fn is_about_to_close(&self, sequence: &VertexSequence, close_tolerance: f64) -> bool {
        sequence.unique_len() >= MIN_POLYGON_VERTICES
            && distance(self.preview, sequence.first()) < close_tolerance * 1.5
    }

    /// A click at the preview position would close the polygon
    pub fn will_close(&self, sequence: &VertexSequence, close_tolerance: f64) -> bool {
        sequence.unique_len() >= MIN_POLYGON_VERTICES
            && distance(self.preview, sequence.first()) < close_tolerance
    }
}

/// Result of placing a vertex while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// Vertex appended at this index
    Appended { index: usize },
    /// The click landed on the first vertex and closed the polygon
    Closed,
    /// The click was too close to the previous vertex and was ignored
    TooClose,
}

/// Authoring mode
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SketchMode {
    #[default]
    Idle,
    Drawing(DrawingSession),
}

impl SketchMode {
    pub fn is_drawing(&self) -> bool {
        matches!(self, SketchMode::Drawing(_))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SketchMode::Idle)
    }

    /// Display name of the mode
    pub fn name(&self) -> &'static str {
        match self {
            SketchMode::Idle => "idle",
            SketchMode::Drawing(_) => "drawing",
        }
    }

    /// Drawing session if drawing
    pub fn session(&self) -> Option<&DrawingSession> {
        match self {
            SketchMode::Drawing(session) => Some(session),
            SketchMode::Idle => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut DrawingSession> {
        match self {
            SketchMode::Drawing(session) => Some(session),
            SketchMode::Idle => None,
        }
    }

    fn require_drawing(&self, operation: &'static str) -> Result<(), SketchError> {
        if self.is_drawing() {
            Ok(())
        } else {
            Err(SketchError::ModeMismatch {
                operation,
                mode: self.name(),
            })
        }
    }

    /// Begin a new polygon, discarding the current one
    pub fn start(&mut self, sequence: &mut VertexSequence) {
        sequence.clear();
        *self = SketchMode::Drawing(DrawingSession::default());
        debug!("Started drawing");
    }

    /// Place a snapped vertex.
    ///
    /// With three or more vertices, a click within the close tolerance of
    /// the first vertex closes the polygon instead of appending.
    pub fn place_vertex(
        &mut self,
        sequence: &mut VertexSequence,
        position: Vertex,
        settings: &EditorSettings,
    ) -> Result<PlaceOutcome, SketchError> {
        self.require_drawing("place a point")?;

        if sequence.unique_len() >= MIN_POLYGON_VERTICES
            && distance(Some(position), sequence.first()) < settings.close_tolerance
        {
            self.close(sequence)?;
            return Ok(PlaceOutcome::Closed);
        }

        if !sequence.is_empty()
            && distance(Some(position), sequence.last()) < settings.min_point_distance
        {
            return Ok(PlaceOutcome::TooClose);
        }

        sequence.push(position);
        let index = sequence.len() - 1;
        debug!("Placed point {} at ({}, {})", index, position.x, position.y);
        Ok(PlaceOutcome::Appended { index })
    }

    /// Track the pointer for the rubber-band preview.
    ///
    /// The preview only exists once the first vertex has been placed.
    pub fn update_preview(&mut self, sequence: &VertexSequence, position: Vertex) {
        if sequence.is_empty() {
            return;
        }
        if let Some(session) = self.session_mut() {
            session.preview = Some(position);
        }
    }

    /// Close the polygon and return to idle
    pub fn close(&mut self, sequence: &mut VertexSequence) -> Result<(), SketchError> {
        self.require_drawing("close the polygon")?;
        sequence.close()?;
        *self = SketchMode::Idle;
        debug!("Closed polygon with {} points", sequence.len());
        Ok(())
    }

    /// Explicitly complete the polygon
    pub fn finish(&mut self, sequence: &mut VertexSequence) -> Result<(), SketchError> {
        self.close(sequence)
    }

    /// Abandon the polygon being drawn
    pub fn cancel(&mut self, sequence: &mut VertexSequence) -> Result<(), SketchError> {
        self.require_drawing("cancel drawing")?;
        sequence.clear();
        *self = SketchMode::Idle;
        debug!("Cancelled drawing");
        Ok(())
    }

    /// Whether the polygon being drawn can be completed
    pub fn can_finish(&self, sequence: &VertexSequence) -> bool {
        self.is_drawing() && sequence.unique_len() >= MIN_POLYGON_VERTICES
    }
}
