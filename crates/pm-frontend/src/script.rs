//! Scripted action replay
//!
//! A script is a RON list of [`AppAction`]s, for example:
//!
//! ```ron
//! [
//!     Sketch(StartDrawing),
//!     Sketch(PointerDown(position: (0.0, 0.0))),
//!     SetScaleText("12"),
//! ]
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::actions::{ActionContext, dispatch_action};
use crate::state::AppAction;

/// Script loading errors
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid action script: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Parse a script from text
pub fn parse_script(text: &str) -> Result<Vec<AppAction>, ScriptError> {
    Ok(ron::from_str(text)?)
}

/// Read and parse a script file
pub fn load_script(path: &Path) -> Result<Vec<AppAction>, ScriptError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

/// Dispatch every action in order
pub fn run_script(actions: Vec<AppAction>, ctx: &ActionContext) {
    let count = actions.len();
    for action in actions {
        dispatch_action(action, ctx);
    }
    info!("Replayed {} actions", count);
}
