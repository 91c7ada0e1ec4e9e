//! Vertex model
//!
//! A polygon is an ordered list of unique vertices plus an explicit closure
//! flag. The closing sentinel (a trailing copy of the first vertex) only
//! exists in the stored form used on the wire and by simple renderers.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{CLOSURE_EPSILON, MIN_POLYGON_VERTICES, SketchError};

/// A polygon corner in logical pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Whether two vertices are within the closure epsilon of each other
    pub fn coincides_with(self, other: Vertex) -> bool {
        self.to_dvec2().distance(other.to_dvec2()) < CLOSURE_EPSILON
    }
}

impl From<DVec2> for Vertex {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vertex> for DVec2 {
    fn from(v: Vertex) -> Self {
        v.to_dvec2()
    }
}

/// Ordered polygon vertices, open while authoring and closed once complete
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Vertex>", into = "Vec<Vertex>")]
pub struct VertexSequence {
    /// Unique vertices, never including a closing sentinel
    vertices: Vec<Vertex>,
    /// Whether an edge joins the last vertex back to the first
    closed: bool,
}

impl VertexSequence {
    /// Create an empty open sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a closed polygon from unique vertices
    pub fn closed_from(vertices: Vec<Vertex>) -> Result<Self, SketchError> {
        let mut sequence = Self {
            vertices,
            closed: false,
        };
        sequence.close()?;
        Ok(sequence)
    }

    /// Build a sequence from its stored form.
    ///
    /// A trailing entry coinciding with the first marks the sequence closed
    /// and is dropped, provided at least three unique vertices remain.
    pub fn from_stored(mut stored: Vec<Vertex>) -> Self {
        let has_sentinel = match stored.as_slice() {
            [first, .., last] => first.coincides_with(*last),
            _ => false,
        };
        if has_sentinel && stored.len() > MIN_POLYGON_VERTICES {
            stored.pop();
            return Self {
                vertices: stored,
                closed: true,
            };
        }
        Self {
            vertices: stored,
            closed: false,
        }
    }

    /// Stored form: unique vertices followed by a closing sentinel when closed
    pub fn to_stored(&self) -> Vec<Vertex> {
        let mut stored = self.vertices.clone();
        if self.closed
            && let Some(&first) = self.vertices.first()
        {
            stored.push(first);
        }
        stored
    }

    /// Unique vertices
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of unique vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct corners. In an open sequence a last vertex
    /// coinciding with the first is not counted.
    pub fn unique_len(&self) -> usize {
        self.vertices.len() - usize::from(self.has_duplicate_tail())
    }

    fn has_duplicate_tail(&self) -> bool {
        !self.closed
            && matches!(self.vertices.as_slice(), [first, .., last] if first.coincides_with(*last))
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of entries in the stored form
    pub fn stored_len(&self) -> usize {
        self.vertices.len() + usize::from(self.closed)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn first(&self) -> Option<Vertex> {
        self.vertices.first().copied()
    }

    pub fn last(&self) -> Option<Vertex> {
        self.vertices.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<Vertex> {
        self.vertices.get(index).copied()
    }

    /// Map a stored-form index to a unique-vertex index.
    ///
    /// The sentinel position of a closed sequence refers to the first vertex.
    pub fn resolve_index(&self, stored_index: usize) -> Result<usize, SketchError> {
        if stored_index < self.vertices.len() {
            Ok(stored_index)
        } else if self.closed && stored_index == self.vertices.len() {
            Ok(0)
        } else {
            Err(SketchError::VertexOutOfRange {
                index: stored_index,
                len: self.vertices.len(),
            })
        }
    }

    /// Append a vertex to an open sequence
    pub(crate) fn push(&mut self, vertex: Vertex) {
        debug_assert!(!self.closed, "cannot append to a closed polygon");
        self.vertices.push(vertex);
    }

    /// Close the sequence.
    ///
    /// A last vertex coinciding with the first is absorbed as the closing
    /// sentinel rather than kept as a duplicate corner.
    pub fn close(&mut self) -> Result<(), SketchError> {
        if self.closed {
            return Ok(());
        }
        let duplicate_tail = self.has_duplicate_tail();
        let unique = self.unique_len();
        if unique < MIN_POLYGON_VERTICES {
            return Err(SketchError::InsufficientVertices {
                required: MIN_POLYGON_VERTICES,
                found: unique,
            });
        }
        if duplicate_tail {
            self.vertices.pop();
        }
        self.closed = true;
        Ok(())
    }

    /// Replace the vertex at a unique index
    pub fn replace(&mut self, index: usize, vertex: Vertex) -> Result<Vertex, SketchError> {
        let len = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index)
            .ok_or(SketchError::VertexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, vertex))
    }

    /// Remove the vertex at a unique index.
    ///
    /// Closure is kept; removing the first vertex makes the next one the
    /// closure anchor.
    pub fn remove(&mut self, index: usize) -> Result<Vertex, SketchError> {
        if index >= self.vertices.len() {
            return Err(SketchError::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            });
        }
        Ok(self.vertices.remove(index))
    }

    /// Remove every vertex and reopen the sequence
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.closed = false;
    }
}

impl From<Vec<Vertex>> for VertexSequence {
    fn from(stored: Vec<Vertex>) -> Self {
        Self::from_stored(stored)
    }
}

impl From<VertexSequence> for Vec<Vertex> {
    fn from(sequence: VertexSequence) -> Self {
        sequence.to_stored()
    }
}
