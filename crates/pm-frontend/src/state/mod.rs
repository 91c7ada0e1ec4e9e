//! Application state
//!
//! Wraps the sketch editor with the pieces a host UI needs around it:
//! display toggles, the file the sketch came from, and pending
//! notifications.

mod status;

pub use status::{CursorHint, cursor_hint, status_text};

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use pm_core::{SketchAction, SketchEditor};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

/// Actions that can be performed on the application state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppAction {
    /// Forward an input event to the sketch editor
    Sketch(SketchAction),
    /// Scale typed into a text field
    SetScaleText(String),
    /// DPI typed into a text field
    SetDpiText(String),
    /// Show or hide the background grid
    ToggleGrid,
    /// Canvas drag started (true) or ended (false)
    SetPanning(bool),
    /// Re-read tolerances and display settings from the shared configuration
    ApplyConfig,
    /// Write the sketch to a file
    SaveSketch(PathBuf),
    /// Read a sketch from a file
    LoadSketch(PathBuf),
    /// Drop all pending notifications
    DismissNotifications,
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Main application state
pub struct AppState {
    /// The polygon editor
    pub editor: SketchEditor,
    /// Background grid visibility
    pub show_grid: bool,
    /// Canvas is being dragged
    pub panning: bool,
    /// Document changed since the last save or load
    pub modified: bool,
    /// File the sketch was last saved to or loaded from
    pub current_file: Option<PathBuf>,
    /// Messages waiting to be shown
    pub notifications: Vec<Notification>,
}

impl AppState {
    /// Create state for a new, empty sketch
    pub fn new(config: &AppConfig) -> Self {
        Self {
            editor: SketchEditor::with_document(
                config.sketch.to_document(),
                config.editor.to_settings(),
            ),
            show_grid: config.ui.show_grid,
            panning: false,
            modified: false,
            current_file: None,
            notifications: Vec::new(),
        }
    }

    /// Queue an informational message
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification {
            level: NotificationLevel::Info,
            message: message.into(),
        });
    }

    /// Queue a warning and log it
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.notifications.push(Notification {
            level: NotificationLevel::Warning,
            message,
        });
    }

    /// Take all pending notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Window title: file name plus a marker for unsaved changes
    pub fn title(&self) -> String {
        let name = self
            .current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());
        if self.modified {
            format!("{}*", name)
        } else {
            name
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::new())
    }
}

/// Shared application state
pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create a new shared application state
pub fn create_shared_state(config: &AppConfig) -> SharedAppState {
    Arc::new(Mutex::new(AppState::new(config)))
}
