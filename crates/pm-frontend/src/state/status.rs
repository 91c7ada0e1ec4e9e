//! Status line and cursor hints for the canvas

use pm_core::{SketchEditor, SketchStatus};

/// Pointer shape the host should show over the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    /// Placing points
    Crosshair,
    /// Next click closes the polygon
    Pointer,
    /// Over a draggable point or canvas
    Grab,
    /// Canvas drag in progress
    Grabbing,
}

impl CursorHint {
    /// CSS cursor name
    pub fn name(&self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Crosshair => "crosshair",
            CursorHint::Pointer => "pointer",
            CursorHint::Grab => "grab",
            CursorHint::Grabbing => "grabbing",
        }
    }
}

/// Cursor for the current editor state
pub fn cursor_hint(editor: &SketchEditor, panning: bool) -> CursorHint {
    if editor.mode().is_drawing() {
        if editor.is_about_to_close() {
            CursorHint::Pointer
        } else {
            CursorHint::Crosshair
        }
    } else if editor.interaction().hovered.is_some() {
        CursorHint::Grab
    } else if panning {
        CursorHint::Grabbing
    } else if !editor.vertices().is_empty() {
        CursorHint::Grab
    } else {
        CursorHint::Default
    }
}

/// Status indicator text. Points are numbered from 1.
pub fn status_text(status: SketchStatus) -> String {
    match status {
        SketchStatus::Idle => "Idle".to_string(),
        SketchStatus::Drawing => "Drawing...".to_string(),
        SketchStatus::Editing => "Edit Mode".to_string(),
        SketchStatus::Selected(index) => format!("P{} selected", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use pm_core::SketchAction;

    fn click(editor: &mut SketchEditor, x: f64, y: f64) {
        editor
            .apply(SketchAction::PointerDown {
                position: DVec2::new(x, y),
            })
            .unwrap();
    }

    #[test]
    fn test_cursor_while_drawing() {
        let mut editor = SketchEditor::default();
        assert_eq!(cursor_hint(&editor, false), CursorHint::Default);

        editor.apply(SketchAction::StartDrawing).unwrap();
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
            click(&mut editor, x, y);
        }
        editor
            .apply(SketchAction::PointerMove {
                position: DVec2::new(60.0, 60.0),
            })
            .unwrap();
        assert_eq!(cursor_hint(&editor, false), CursorHint::Crosshair);

        editor
            .apply(SketchAction::PointerMove {
                position: DVec2::new(20.0, 0.0),
            })
            .unwrap();
        assert_eq!(cursor_hint(&editor, false), CursorHint::Pointer);
    }

    #[test]
    fn test_cursor_while_idle() {
        let mut editor = SketchEditor::default();
        editor.apply(SketchAction::StartDrawing).unwrap();
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
            click(&mut editor, x, y);
        }
        editor.apply(SketchAction::Finish).unwrap();

        assert_eq!(cursor_hint(&editor, false), CursorHint::Grab);
        assert_eq!(cursor_hint(&editor, true), CursorHint::Grabbing);

        editor
            .apply(SketchAction::HoverVertex { index: Some(1) })
            .unwrap();
        assert_eq!(cursor_hint(&editor, true), CursorHint::Grab);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(SketchStatus::Idle), "Idle");
        assert_eq!(status_text(SketchStatus::Drawing), "Drawing...");
        assert_eq!(status_text(SketchStatus::Editing), "Edit Mode");
        assert_eq!(status_text(SketchStatus::Selected(0)), "P1 selected");
    }
}
