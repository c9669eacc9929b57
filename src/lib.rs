//! Kmlparse: streaming KML to map annotations and overlays.
//!
//! Kmlparse reads a KML document in one streaming pass and produces
//! renderer-independent records: point annotations for markers, and
//! polygon, line and circle overlays carrying their resolved styles and
//! extended data.
//!
//! # Modules
//!
//! - [`kml`]: The parser, its session state machine and the output model
//! - [`inspect`]: Parse result statistics and reporting
//! - [`error`]: Error types for kmlparse operations

pub mod error;
pub mod inspect;
pub mod kml;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use error::{KmlError, XmlError};

use kml::{KmlOptions, ParseOutput};

/// The kmlparse CLI application.
#[derive(Parser)]
#[command(name = "kmlparse")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log parser progress to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Parse a KML file and print summary statistics.
    Inspect(InspectArgs),
    /// Parse a KML file and print the records as JSON.
    Dump(DumpArgs),
}

/// Parser options shared by every subcommand.
#[derive(clap::Args)]
struct ParseArgs {
    /// Input KML file.
    input: PathBuf,

    /// Turn every Point into a circle overlay of this radius (meters).
    #[arg(long, env = "KMLPARSE_POINT_TO_CIRCLE_RADIUS")]
    point_to_circle_radius: Option<f64>,

    /// YAML or JSON file with parser options.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    #[command(flatten)]
    parse: ParseArgs,

    /// Number of extended data keys to show.
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the dump subcommand.
#[derive(clap::Args)]
struct DumpArgs {
    #[command(flatten)]
    parse: ParseArgs,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

/// Run the kmlparse CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), KmlError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Dump(args)) => run_dump(args),
        None => {
            // No subcommand: print a short banner and exit successfully
            println!("kmlparse {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Streaming KML to map annotations and overlays.");
            println!();
            println!("Run 'kmlparse --help' for usage information.");
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), KmlError> {
    let output = parse_input(&args.parse)?;

    let opts = inspect::InspectOptions {
        top_keys: args.top,
        ..Default::default()
    };
    let report = inspect::inspect_output(&output, &opts);

    match args.output.as_str() {
        "text" => print!("{}", report),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => {
            return Err(KmlError::UnsupportedOutput(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    Ok(())
}

/// Execute the dump subcommand.
fn run_dump(args: DumpArgs) -> Result<(), KmlError> {
    let output = parse_input(&args.parse)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);

    Ok(())
}

fn parse_input(args: &ParseArgs) -> Result<ParseOutput, KmlError> {
    let options = resolve_options(args.config.as_deref(), args.point_to_circle_radius)?;
    let output = kml::read_kml(&args.input, &options)?;

    tracing::info!(
        input = %args.input.display(),
        annotations = output.annotations.len(),
        overlays = output.overlays.len(),
        "parsed KML"
    );
    Ok(output)
}

/// Config file first, then the command-line/environment override.
fn resolve_options(
    config: Option<&Path>,
    point_to_circle_radius: Option<f64>,
) -> Result<KmlOptions, KmlError> {
    let mut options = match config {
        Some(path) => KmlOptions::load(path)?,
        None => KmlOptions::default(),
    };
    if let Some(radius) = point_to_circle_radius {
        options.point_to_circle_radius = radius;
    }
    Ok(options)
}
