//! oxide-designer CLI
//!
//! Command-line tool for replaying designer sessions and checking forms
//! against stored layouts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_designer::render::{render_canvas, render_live_form, render_properties_panel};
use oxide_designer::{
    validate_submission, DragEngine, FieldRegistry, FormSnapshot, Gesture, IdGenerator, Layout,
    ValidationErrors,
};

/// Layout engine of a drag-and-drop form builder.
#[derive(Parser)]
#[command(name = "oxide-designer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Stored form content to start from (empty layout if not specified).
    #[arg(short, long, env = "OXIDE_DESIGNER_LAYOUT")]
    layout: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every field kind with its palette label.
    Kinds,

    /// Apply a recorded gesture script and print the resulting content.
    Replay {
        /// JSON array of gestures.
        #[arg(short, long)]
        gestures: PathBuf,

        /// Write the content here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// First id handed to new elements.
        #[arg(long, default_value_t = 1)]
        first_id: u64,
    },

    /// Validate submitted values against the layout.
    Validate {
        /// JSON object mapping element ids to raw values.
        #[arg(long)]
        values: PathBuf,
    },

    /// Render the layout as HTML.
    Render {
        #[arg(short, long, value_enum, default_value_t = RenderMode::Designer)]
        mode: RenderMode,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RenderMode {
    /// Canvas with drop zones.
    Designer,
    /// Fillable form.
    Form,
    /// Side panel.
    Properties,
}

fn load_layout(path: Option<&Path>) -> anyhow::Result<Layout> {
    let Some(path) = path else {
        return Ok(Layout::new());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading layout {}", path.display()))?;
    let snapshot = FormSnapshot::from_json(&json)?;
    let layout = Layout::from_snapshot(snapshot)?;
    debug!(elements = layout.len(), path = %path.display(), "layout loaded");
    Ok(layout)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut layout = load_layout(cli.layout.as_deref())?;

    match cli.command {
        Commands::Kinds => {
            for field in FieldRegistry::global().iter() {
                let button = field.palette_button();
                println!("{:<16} {}", field.kind(), button.label);
            }
        }

        Commands::Replay {
            gestures,
            out,
            first_id,
        } => {
            let gestures: Vec<Gesture> = read_json(&gestures)?;
            let mut engine = DragEngine::with_ids(IdGenerator::sequential(first_id));

            for (step, gesture) in gestures.into_iter().enumerate() {
                let outcome = engine
                    .apply(&mut layout, gesture)
                    .with_context(|| format!("gesture {step}"))?;
                debug!(step, outcome = ?outcome, "gesture applied");
            }
            if engine.is_dragging() {
                info!("Script ended mid-drag, cancelling.");
                engine.cancel(&mut layout)?;
            }

            let json = layout.snapshot()?.to_json_pretty()?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("Wrote {} elements to {}", layout.len(), path.display());
                }
                None => println!("{json}"),
            }
        }

        Commands::Validate { values } => {
            let values: HashMap<String, String> = read_json(&values)?;
            let report = validate_submission(&layout, &values);

            if report.is_accepted() {
                info!("Submission accepted.");
            } else {
                for (id, message) in &report.errors().errors {
                    println!("{id}: {message}");
                }
                info!("Submission rejected: {} field(s) failed.", report.errors().len());
                std::process::exit(1);
            }
        }

        Commands::Render { mode } => {
            let html = match mode {
                RenderMode::Designer => render_canvas(&layout),
                RenderMode::Form => {
                    render_live_form(&layout, &HashMap::new(), &ValidationErrors::new())
                }
                RenderMode::Properties => render_properties_panel(&layout),
            };
            println!("{html}");
        }
    }

    Ok(())
}
