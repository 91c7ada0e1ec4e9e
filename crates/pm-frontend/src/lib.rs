//! Headless application shell for the polygon measure tool
//!
//! Holds the shared application state, routes actions to the sketch editor,
//! reads and writes sketch files, and manages the user configuration.

pub mod actions;
pub mod config;
pub mod report;
pub mod script;
pub mod state;

pub use actions::{ActionContext, FileError, dispatch_action, read_document, write_document};
pub use config::{AppConfig, ConfigError, ConfigManager, SharedConfig, create_shared_config};
pub use report::MeasurementReport;
pub use script::{ScriptError, load_script, parse_script, run_script};
pub use state::{
    AppAction, AppState, Notification, NotificationLevel, SharedAppState, create_shared_state,
};
