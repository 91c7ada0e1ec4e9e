//! Polygon measure command line entry point

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pm_frontend::{
    ActionContext, ConfigManager, MeasurementReport, NotificationLevel, create_shared_config,
    create_shared_state, load_script, read_document, run_script, write_document,
};

#[derive(Parser)]
#[command(name = "polymeasure")]
#[command(version, about = "Measure hand-drawn polygons at a real-world scale")]
struct Cli {
    /// Use this configuration file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the measurements of a saved sketch
    Measure { file: PathBuf },
    /// Replay a RON list of actions and print the resulting measurements
    Replay {
        script: PathBuf,
        /// Save the resulting sketch here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the configuration, or reset it to defaults
    Config {
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pm_frontend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };

    match cli.command {
        Command::Measure { file } => measure(&file, manager),
        Command::Replay { script, output } => replay(&script, output, manager),
        Command::Config { reset } => config(reset, manager),
    }
}

fn measure(file: &Path, manager: ConfigManager) -> Result<()> {
    let document = read_document(file)?;
    print!("{}", MeasurementReport::new(&document, &manager.config().ui));
    Ok(())
}

fn replay(script: &Path, output: Option<PathBuf>, manager: ConfigManager) -> Result<()> {
    let actions = load_script(script)?;
    let ui = manager.config().ui.clone();
    let app_state = create_shared_state(manager.config());
    let ctx = ActionContext::new(app_state, create_shared_config(manager));

    run_script(actions, &ctx);

    let mut state = ctx.app_state.lock();
    for note in state.take_notifications() {
        match note.level {
            NotificationLevel::Info => println!("{}", note.message),
            NotificationLevel::Warning => println!("warning: {}", note.message),
        }
    }
    print!("{}", MeasurementReport::new(state.editor.document(), &ui));

    if let Some(path) = output {
        write_document(&path, state.editor.document())
            .with_context(|| format!("saving replayed sketch to {}", path.display()))?;
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn config(reset: bool, mut manager: ConfigManager) -> Result<()> {
    if reset {
        manager.reset_to_defaults();
        manager.save()?;
        println!("Reset {}", manager.config_file_path().display());
    }
    println!("# {}", manager.config_file_path().display());
    println!("{}", manager.to_ron()?);
    Ok(())
}
