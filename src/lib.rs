//! IronSegment: a container for semantically tagged image planes.
//!
//! A container is one byte stream holding an XML manifest followed by raw
//! image planes. The manifest declares a shared canvas, a list of images
//! (each tagged with a [`ir::Semantic`] that fixes its pixel layout), and
//! free-form objects and metadata. Plane positions are never stored; they
//! are derived from the manifest by the [`layout`] planner, so encoder and
//! decoder always agree.
//!
//! # Modules
//!
//! - [`ir`]: Manifest model, semantic registry and the XML manifest codec
//! - [`validation`]: Manifest validation and error reporting
//! - [`layout`]: Plane layout planning
//! - [`container`]: Binary container encoding and decoding
//! - [`inspect`]: Human-readable container summaries
//! - [`error`]: Error types for ironsegment operations
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use ironsegment::container::{decode, encode};
//! use ironsegment::ir::{ImageId, Images, Manifest, Semantic};
//!
//! let manifest = Manifest::new(Images::new(2, 1).with_image(1, Semantic::Depth16));
//! let planes = BTreeMap::from([(ImageId(1), vec![0x12, 0x34, 0xff, 0xff])]);
//!
//! let bytes = encode(&manifest, &planes)?;
//! let decoded = decode(&bytes)?;
//! let depth = decoded.plane(ImageId(1)).unwrap().rgb(0, 0)?;
//! assert_eq!(depth[0], 0x1234 as f64 / 65536.0);
//! # Ok::<(), ironsegment::IronSegmentError>(())
//! ```

pub mod container;
pub mod error;
pub mod inspect;
pub mod ir;
pub mod layout;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

pub use container::{decode, decode_with, encode, encode_with, DecodedContainer, PlaneView};
pub use error::IronSegmentError;

/// The ironsegment CLI application.
#[derive(Parser)]
#[command(name = "ironsegment")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log progress to stderr (repeat for more detail).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Summarize a container: version, canvas, planes, objects and metadata.
    Inspect(InspectArgs),
    /// Validate a container and print the report.
    Validate(ValidateArgs),
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Container file to inspect.
    input: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Container file to validate.
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    fn parse(value: &str) -> Result<Self, IronSegmentError> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(IronSegmentError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            ))),
        }
    }
}

/// Run the ironsegment CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), IronSegmentError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            println!("ironsegment {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Container codec for semantically tagged image planes.");
            println!();
            println!("Run 'ironsegment --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), IronSegmentError> {
    let format = ReportFormat::parse(&args.output)?;
    let bytes = std::fs::read(&args.input)?;
    info!(path = %args.input.display(), len = bytes.len(), "inspecting container");

    let container = container::decode(&bytes)?;
    let report = inspect::inspect_container(&container, &inspect::InspectOptions::default());

    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print!("{}", report),
    }
    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), IronSegmentError> {
    let format = ReportFormat::parse(&args.output)?;
    let bytes = std::fs::read(&args.input)?;
    info!(path = %args.input.display(), len = bytes.len(), "validating container");

    let (_, manifest) = container::read_manifest(&bytes)?;
    let report = validation::validate_manifest(&manifest);

    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => print!("{}", report),
    }

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    report.into_result(opts.strict)?;

    // The manifest is acceptable; the planes must also fit the stream.
    container::decode_with(&bytes, &opts)?;
    Ok(())
}

