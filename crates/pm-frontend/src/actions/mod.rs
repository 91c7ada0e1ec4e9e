//! Action dispatch
//!
//! Every user intent arrives as an [`AppAction`] and is routed to a handler
//! that locks the shared state once, applies the change and releases it.

mod file;
mod sketch;

pub use file::{FileError, read_document, write_document};

use tracing::{debug, info};

use pm_core::SketchAction;

use crate::config::SharedConfig;
use crate::state::{AppAction, SharedAppState};

/// Shared handles an action handler may touch
pub struct ActionContext {
    pub app_state: SharedAppState,
    pub config: SharedConfig,
}

impl ActionContext {
    pub fn new(app_state: SharedAppState, config: SharedConfig) -> Self {
        Self { app_state, config }
    }
}

impl AppAction {
    /// Whether a successful run of this action changes what would be saved
    pub fn modifies_document(&self) -> bool {
        match self {
            AppAction::Sketch(action) => match action {
                // View and selection only
                SketchAction::PointerMove { .. }
                | SketchAction::Wheel { .. }
                | SketchAction::ZoomIn
                | SketchAction::ZoomOut
                | SketchAction::ResetView
                | SketchAction::PanBy { .. }
                | SketchAction::SelectVertex { .. }
                | SketchAction::HoverVertex { .. }
                | SketchAction::DragStart { .. }
                | SketchAction::DragEnd { .. } => false,
                _ => true,
            },
            AppAction::SetScaleText(_) | AppAction::SetDpiText(_) => true,
            AppAction::ToggleGrid
            | AppAction::SetPanning(_)
            | AppAction::ApplyConfig
            | AppAction::SaveSketch(_)
            | AppAction::LoadSketch(_)
            | AppAction::DismissNotifications => false,
        }
    }

    /// Get a description of the action for display
    pub fn description(&self) -> &'static str {
        match self {
            AppAction::Sketch(action) => action.description(),
            AppAction::SetScaleText(_) => "Set Scale",
            AppAction::SetDpiText(_) => "Set DPI",
            AppAction::ToggleGrid => "Toggle Grid",
            AppAction::SetPanning(_) => "Pan",
            AppAction::ApplyConfig => "Apply Settings",
            AppAction::SaveSketch(_) => "Save Sketch",
            AppAction::LoadSketch(_) => "Load Sketch",
            AppAction::DismissNotifications => "Dismiss",
        }
    }
}

/// Route an action to its handler
pub fn dispatch_action(action: AppAction, ctx: &ActionContext) {
    debug!("Dispatching {}", action.description());
    match action {
        AppAction::Sketch(_) | AppAction::SetScaleText(_) | AppAction::SetDpiText(_) => {
            sketch::handle_sketch_action(action, ctx);
        }

        AppAction::SaveSketch(_) | AppAction::LoadSketch(_) => {
            file::handle_file_action(action, ctx);
        }

        AppAction::ToggleGrid => {
            let show_grid = {
                let mut state = ctx.app_state.lock();
                state.show_grid = !state.show_grid;
                state.show_grid
            };
            ctx.config.write().config_mut().ui.show_grid = show_grid;
        }

        AppAction::SetPanning(panning) => {
            let mut state = ctx.app_state.lock();
            // Stage drag is disabled while drawing
            state.panning = panning && !state.editor.mode().is_drawing();
        }

        AppAction::ApplyConfig => {
            let (settings, show_grid) = {
                let manager = ctx.config.read();
                let config = manager.config();
                (config.editor.to_settings(), config.ui.show_grid)
            };
            let mut state = ctx.app_state.lock();
            state.editor.set_settings(settings);
            state.show_grid = show_grid;
            info!("Applied settings");
        }

        AppAction::DismissNotifications => {
            ctx.app_state.lock().notifications.clear();
        }
    }
}
