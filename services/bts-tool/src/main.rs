//! BTS file tool.
//!
//! - `inspect` prints the header of an existing file as JSON
//! - `demo` writes a deterministic test-pattern field, useful for checking
//!   that a downstream reader accepts our output

mod demo;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bts_writer::{write_bts_file, BtsFile, EncodeOptions, EncoderConfig, HubReference};

#[derive(Parser, Debug)]
#[command(name = "bts-tool")]
#[command(about = "Write and inspect BTS turbulence files")]
struct Args {
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the header and summary of a BTS file
    Inspect {
        /// File to read
        path: PathBuf,
    },
    /// Write a test-pattern field to a BTS file
    Demo(DemoArgs),
}

#[derive(ClapArgs, Debug)]
struct DemoArgs {
    /// Output path (".bts" is appended when missing)
    path: PathBuf,

    /// Lateral grid points
    #[arg(long, default_value = "5")]
    ny: usize,

    /// Vertical grid points
    #[arg(long, default_value = "5")]
    nz: usize,

    /// Time steps
    #[arg(long, default_value = "600")]
    nt: usize,

    /// Lateral spacing (m)
    #[arg(long, default_value = "10.0")]
    dy: f64,

    /// Vertical spacing (m)
    #[arg(long, default_value = "10.0")]
    dz: f64,

    /// Time step (s)
    #[arg(long, default_value = "0.05")]
    dt: f64,

    /// Height of the lowest grid row (m)
    #[arg(long, default_value = "70.0")]
    z_bottom: f64,

    /// Mean longitudinal wind speed (m/s)
    #[arg(long, default_value = "10.0")]
    umean: f64,

    /// Hub wind speed override (requires --zhub)
    #[arg(long, requires = "zhub")]
    uhub: Option<f64>,

    /// Hub height override (requires --uhub)
    #[arg(long, requires = "uhub")]
    zhub: Option<f64>,

    /// Mark the series as non-periodic
    #[arg(long)]
    non_periodic: bool,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    match args.command {
        Command::Inspect { path } => inspect(&path),
        Command::Demo(demo_args) => run_demo(demo_args),
    }
}

fn inspect(path: &Path) -> Result<()> {
    let file = BtsFile::open(path).with_context(|| format!("reading {}", path.display()))?;

    let report = serde_json::json!({
        "path": path.display().to_string(),
        "header": file.header.to_json(),
        "periodic": file.header.is_periodic(),
        "description": file.description,
        "samples": file.codes().len(),
        "z_axis": file.z_axis(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_demo(args: DemoArgs) -> Result<()> {
    let config = EncoderConfig::from_env();

    let spec = demo::DemoSpec {
        ny: args.ny,
        nz: args.nz,
        nt: args.nt,
        dy: args.dy,
        dz: args.dz,
        dt: args.dt,
        z_bottom: args.z_bottom,
        umean: args.umean,
    };
    let field = demo::demo_field(&spec)?;

    let mut options = EncodeOptions::from_config(&config, config.provenance(chrono::Utc::now()))?;
    if args.non_periodic {
        options = options.with_periodic(false);
    }
    if let (Some(uhub), Some(zhub)) = (args.uhub, args.zhub) {
        options = options.with_hub(HubReference::new(uhub, zhub));
    }

    let (path, summary) = write_bts_file(&field, &args.path, &options)?;
    info!(
        path = %path.display(),
        uhub = summary.hub.uhub,
        zhub = summary.hub.zhub,
        bytes = summary.bytes_written,
        "Demo field written"
    );
    Ok(())
}
