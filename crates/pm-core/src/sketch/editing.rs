//! Vertex editing
//!
//! Selection and hover are ephemeral interaction state kept apart from the
//! polygon itself. The controller borrows both for the duration of an edit.

use tracing::debug;

use super::{MIN_POLYGON_VERTICES, SketchError, SketchMode, Vertex, VertexSequence};

/// Ephemeral selection and hover state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// Selected vertex (unique index)
    pub selected: Option<usize>,
    /// Vertex under the pointer (unique index)
    pub hovered: Option<usize>,
}

impl InteractionState {
    pub fn clear(&mut self) {
        self.selected = None;
        self.hovered = None;
    }
}

/// Applies edits to a polygon outside of drawing mode
pub struct EditingController<'a> {
    sequence: &'a mut VertexSequence,
    interaction: &'a mut InteractionState,
}

impl<'a> EditingController<'a> {
    /// Borrow the polygon for editing.
    ///
    /// Only a completed polygon can be edited: fails while drawing and for
    /// an open sequence, whose last point could otherwise be moved onto the
    /// first and read back as a closing sentinel.
    pub fn new(
        mode: &SketchMode,
        sequence: &'a mut VertexSequence,
        interaction: &'a mut InteractionState,
    ) -> Result<Self, SketchError> {
        if !mode.is_idle() {
            return Err(SketchError::ModeMismatch {
                operation: "edit points",
                mode: mode.name(),
            });
        }
        if !sequence.is_closed() {
            return Err(SketchError::ModeMismatch {
                operation: "edit points",
                mode: "open",
            });
        }
        Ok(Self {
            sequence,
            interaction,
        })
    }

    /// Select a vertex by stored index
    pub fn select_vertex(&mut self, index: usize) -> Result<(), SketchError> {
        let index = self.sequence.resolve_index(index)?;
        self.interaction.selected = Some(index);
        Ok(())
    }

    /// Set or clear the hovered vertex. No validation beyond bounds.
    pub fn hover_vertex(&mut self, index: Option<usize>) -> Result<(), SketchError> {
        self.interaction.hovered = index
            .map(|i| self.sequence.resolve_index(i))
            .transpose()?;
        Ok(())
    }

    /// Move a vertex to an already-snapped position.
    ///
    /// Moving the first vertex of a closed polygon also moves the closing
    /// sentinel, since the sentinel is derived from it.
    pub fn drag_vertex(&mut self, index: usize, position: Vertex) -> Result<(), SketchError> {
        let index = self.sequence.resolve_index(index)?;
        self.sequence.replace(index, position)?;
        Ok(())
    }

    /// Delete a vertex, keeping at least three.
    ///
    /// Selection and hover are cleared afterwards since indices shift.
    pub fn delete_vertex(&mut self, index: usize) -> Result<Vertex, SketchError> {
        let index = self.sequence.resolve_index(index)?;
        let found = self.sequence.len();
        if found <= MIN_POLYGON_VERTICES {
            return Err(SketchError::InsufficientVertices {
                required: MIN_POLYGON_VERTICES,
                found,
            });
        }

        let removed = self.sequence.remove(index)?;
        self.interaction.clear();
        debug!("Deleted point {}, {} remain", index, self.sequence.len());
        Ok(removed)
    }

    /// Delete the selected vertex, the route for Delete/Backspace.
    ///
    /// Returns `Ok(None)` when there is nothing to do: no selection, or a
    /// text input has keyboard focus.
    pub fn delete_selected(
        &mut self,
        text_input_focused: bool,
    ) -> Result<Option<Vertex>, SketchError> {
        if text_input_focused {
            return Ok(None);
        }
        match self.interaction.selected {
            Some(index) => self.delete_vertex(index).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> VertexSequence {
        VertexSequence::closed_from(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(100.0, 0.0),
            Vertex::new(100.0, 100.0),
            Vertex::new(0.0, 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_editing_refused_while_drawing() {
        let mode = SketchMode::Drawing(Default::default());
        let mut sequence = square();
        let mut interaction = InteractionState::default();

        assert!(matches!(
            EditingController::new(&mode, &mut sequence, &mut interaction),
            Err(SketchError::ModeMismatch { mode: "drawing", .. })
        ));
    }

    #[test]
    fn test_editing_refused_for_open_sequence() {
        let mut sequence = VertexSequence::from_stored(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(100.0, 0.0),
            Vertex::new(100.0, 100.0),
            Vertex::new(0.0, 100.0),
        ]);
        let mut interaction = InteractionState::default();

        assert!(matches!(
            EditingController::new(&SketchMode::Idle, &mut sequence, &mut interaction),
            Err(SketchError::ModeMismatch { mode: "open", .. })
        ));
    }

    #[test]
    fn test_drag_first_vertex_moves_sentinel() {
        let mut sequence = square();
        let mut interaction = InteractionState::default();
        let mut editor =
            EditingController::new(&SketchMode::Idle, &mut sequence, &mut interaction).unwrap();

        editor.drag_vertex(0, Vertex::new(-20.0, -20.0)).unwrap();

        let stored = sequence.to_stored();
        assert_eq!(stored[0], Vertex::new(-20.0, -20.0));
        assert_eq!(stored[0], stored[stored.len() - 1]);
    }

    #[test]
    fn test_drag_sentinel_index_moves_first() {
        let mut sequence = square();
        let mut interaction = InteractionState::default();
        let mut editor =
            EditingController::new(&SketchMode::Idle, &mut sequence, &mut interaction).unwrap();

        editor.drag_vertex(4, Vertex::new(20.0, 20.0)).unwrap();
        assert_eq!(sequence.first(), Some(Vertex::new(20.0, 20.0)));
        assert_eq!(sequence.len(), 4);
    }

    #[test]
    fn test_delete_interior_vertex() {
        let mut sequence = square();
        let mut interaction = InteractionState {
            selected: Some(2),
            hovered: Some(2),
        };
        let mut editor =
            EditingController::new(&SketchMode::Idle, &mut sequence, &mut interaction).unwrap();

        let removed = editor.delete_vertex(2).unwrap();
        assert_eq!(removed, Vertex::new(100.0, 100.0));

        let stored = sequence.to_stored();
        assert_eq!(stored.len(), 4);
        assert_eq!(stored[0], stored[3]);
        assert_eq!(interaction, InteractionState::default());
    }

    #[test]
    fn test_delete_refused_at_triangle() {
        let mut sequence = square();
        let mut interaction = InteractionState::default();
        {
            let mut editor =
                EditingController::new(&SketchMode::Idle, &mut sequence, &mut interaction)
                    .unwrap();
            editor.delete_vertex(1).unwrap();
        }
        let before = sequence.to_stored();

        let mut editor =
            EditingController::new(&SketchMode::Idle, &mut sequence, &mut interaction).unwrap();
        for index in 0..3 {
            assert_eq!(
                editor.delete_vertex(index),
                Err(SketchError::InsufficientVertices {
                    required: 3,
                    found: 3
                })
            );
        }
        assert_eq!(sequence.to_stored(), before);
    }

    #[test]
    fn test_delete_selected_guards() {
        let mut sequence = square();
        let mut interaction = InteractionState::default();
        let mut editor =
            EditingController::new(&SketchMode::Idle, &mut sequence, &mut interaction).unwrap();

        assert_eq!(editor.delete_selected(false), Ok(None));

        editor.select_vertex(1).unwrap();
        assert_eq!(editor.delete_selected(true), Ok(None));
        assert_eq!(
            editor.delete_selected(false),
            Ok(Some(Vertex::new(100.0, 0.0)))
        );
        assert_eq!(sequence.len(), 3);
    }

    #[test]
    fn test_select_and_hover_bounds() {
        let mut sequence = square();
        let mut interaction = InteractionState::default();
        let mut editor =
            EditingController::new(&SketchMode::Idle, &mut sequence, &mut interaction).unwrap();

        assert!(editor.select_vertex(9).is_err());
        editor.hover_vertex(Some(3)).unwrap();
        editor.select_vertex(3).unwrap();
        editor.hover_vertex(None).unwrap();

        assert_eq!(interaction.selected, Some(3));
        assert_eq!(interaction.hovered, None);
    }
}
