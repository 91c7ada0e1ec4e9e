//! Sketch action handling
//!
//! Forwards input events to the editor and turns refusals into
//! notifications.

use tracing::{debug, info};

use pm_core::{PlaceOutcome, SketchAction, SketchError, SketchOutcome};

use crate::state::AppAction;

use super::ActionContext;

/// Parse a number typed into a text field. Blank input yields `None`.
fn parse_field(name: &'static str, text: &str) -> Result<Option<f64>, SketchError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| SketchError::InvalidParameter {
            name,
            reason: format!("'{}' is not a number", trimmed),
        })
}

/// Handle sketch-related actions
pub fn handle_sketch_action(action: AppAction, ctx: &ActionContext) {
    let modifies = action.modifies_document();
    let description = action.description();

    let parsed = match action {
        AppAction::Sketch(sa) => Ok(Some(sa)),
        AppAction::SetScaleText(text) => {
            parse_field("scale", &text).map(|v| v.map(|value| SketchAction::SetScale { value }))
        }
        AppAction::SetDpiText(text) => {
            parse_field("dpi", &text).map(|v| v.map(|value| SketchAction::SetDpi { value }))
        }
        _ => return,
    };

    let mut state = ctx.app_state.lock();
    let sketch_action = match parsed {
        Ok(Some(sa)) => sa,
        Ok(None) => return,
        Err(e) => {
            state.warn(format!("{}: {}", description, e));
            return;
        }
    };

    match state.editor.apply(sketch_action) {
        Ok(SketchOutcome::Ignored) => {}
        Ok(SketchOutcome::Placed(PlaceOutcome::TooClose)) => {
            debug!("Point too close to the previous one, ignored");
        }
        Ok(outcome) => {
            if modifies {
                state.modified = true;
            }
            if let SketchOutcome::Placed(PlaceOutcome::Closed) = outcome {
                let metrics = state.editor.metrics();
                info!(
                    "Polygon closed: area {:.2}, perimeter {:.2}",
                    metrics.area, metrics.perimeter
                );
            }
        }
        Err(e) => state.warn(format!("{}: {}", description, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::dispatch_action;
    use super::super::test_support::context;
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec2;
    use pm_core::SketchStatus;

    fn sketch(action: SketchAction) -> AppAction {
        AppAction::Sketch(action)
    }

    fn click(x: f64, y: f64) -> AppAction {
        sketch(SketchAction::PointerDown {
            position: DVec2::new(x, y),
        })
    }

    #[test]
    fn test_draw_and_close_marks_modified() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        dispatch_action(sketch(SketchAction::StartDrawing), &ctx);
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (5.0, 3.0)] {
            dispatch_action(click(x, y), &ctx);
        }

        let state = ctx.app_state.lock();
        assert!(state.modified);
        assert!(state.notifications.is_empty());
        assert_eq!(state.editor.vertices().to_stored().len(), 4);
        assert_eq!(state.editor.status(), SketchStatus::Editing);
    }

    #[test]
    fn test_view_actions_do_not_mark_modified() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        dispatch_action(sketch(SketchAction::ZoomIn), &ctx);
        dispatch_action(
            sketch(SketchAction::PanBy {
                delta: DVec2::new(10.0, 0.0),
            }),
            &ctx,
        );

        let state = ctx.app_state.lock();
        assert!(!state.modified);
        assert_eq!(state.editor.viewport().zoom_percent(), 110);
    }

    #[test]
    fn test_refused_action_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        dispatch_action(sketch(SketchAction::StartDrawing), &ctx);
        dispatch_action(click(0.0, 0.0), &ctx);
        dispatch_action(sketch(SketchAction::Finish), &ctx);

        let mut state = ctx.app_state.lock();
        let notes = state.take_notifications();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].message.starts_with("Complete Polygon:"));
        assert!(state.editor.mode().is_drawing());
    }

    #[test]
    fn test_scale_text_input() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        dispatch_action(AppAction::SetScaleText(" 2.5 ".to_string()), &ctx);
        assert_relative_eq!(ctx.app_state.lock().editor.document().scale, 2.5);

        dispatch_action(AppAction::SetScaleText(String::new()), &ctx);
        dispatch_action(AppAction::SetDpiText("abc".to_string()), &ctx);
        dispatch_action(AppAction::SetDpiText("-4".to_string()), &ctx);

        let mut state = ctx.app_state.lock();
        assert_relative_eq!(state.editor.document().scale, 2.5);
        assert_relative_eq!(state.editor.document().dpi, 96.0);
        assert_eq!(state.take_notifications().len(), 2);
    }

    #[test]
    fn test_too_close_click_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        dispatch_action(sketch(SketchAction::StartDrawing), &ctx);
        dispatch_action(click(0.0, 0.0), &ctx);
        dispatch_action(click(4.0, 4.0), &ctx);

        let state = ctx.app_state.lock();
        assert_eq!(state.editor.vertices().len(), 1);
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("scale", "  "), Ok(None));
        assert_eq!(parse_field("scale", "3"), Ok(Some(3.0)));
        assert!(parse_field("scale", "3x").is_err());
    }
}
