//! Sketch file actions

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use pm_core::{SketchAction, SketchDocument, SketchError};

use crate::state::AppAction;

use super::ActionContext;

/// Sketch file errors
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Sketch(#[from] SketchError),
}

fn read_text(path: &Path) -> Result<String, FileError> {
    std::fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a sketch file
pub fn read_document(path: &Path) -> Result<SketchDocument, FileError> {
    let text = read_text(path)?;
    Ok(SketchDocument::from_json(&text)?)
}

/// Write a sketch file
pub fn write_document(path: &Path, document: &SketchDocument) -> Result<(), FileError> {
    let json = document.to_json()?;
    std::fs::write(path, json).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Handle file-related actions
pub fn handle_file_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::SaveSketch(path) => {
            let document = ctx.app_state.lock().editor.document().clone();
            let result = write_document(&path, &document);

            let mut state = ctx.app_state.lock();
            match result {
                Ok(()) => {
                    info!("Saved sketch to {:?}", path);
                    state.notify(format!("Saved {}", path.display()));
                    state.current_file = Some(path);
                    state.modified = false;
                }
                Err(e) => state.warn(format!("Save Sketch: {}", e)),
            }
        }

        AppAction::LoadSketch(path) => {
            // Read outside the lock, then apply like any other event
            let text = match read_text(&path) {
                Ok(text) => text,
                Err(e) => {
                    ctx.app_state.lock().warn(format!("Load Sketch: {}", e));
                    return;
                }
            };

            let mut state = ctx.app_state.lock();
            match state.editor.apply(SketchAction::LoadDocument { text }) {
                Ok(_) => {
                    info!("Loaded sketch from {:?}", path);
                    state.current_file = Some(path);
                    state.modified = false;
                }
                Err(e) => state.warn(format!("Error loading sketch file: {}", e)),
            }
        }

        _ => {}
    }
}
