//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - runs the load -> derive -> fit pipeline
//! - prints reports and writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, DataArgs, FitArgs, SeriesArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `hs` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Series(args) => handle_series(args),
        Command::Columns(args) => handle_columns(args),
    }
}

/// Log to stderr so reports on stdout stay pipeable. `RUST_LOG` overrides the level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,housing_stats=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let inputs = pipeline::prepare_fit(&args)?;
    let model = crate::fit::fit(&inputs.x, &inputs.y)?;
    let summary = model.summary(&inputs.features, &inputs.target);

    println!("{}", crate::report::format_fit(&summary, &model));

    if let Some(path) = &args.export_json {
        crate::io::export::write_summary_json(path, &summary)?;
    }
    Ok(())
}

fn handle_series(args: SeriesArgs) -> Result<(), AppError> {
    let dataset = pipeline::prepare_series(&args)?;
    let x = dataset.x_axis()?;
    let y = dataset.y_axis()?;

    println!("{}", crate::report::format_series(x, y));

    if let Some(path) = &args.export_csv {
        crate::io::export::write_series_csv(path, x, y)?;
    }
    Ok(())
}

fn handle_columns(args: DataArgs) -> Result<(), AppError> {
    let path = pipeline::resolve_data_path(&args);
    let table = crate::io::ingest::load(&path)?;
    println!("{}", crate::report::format_columns(&table));
    Ok(())
}
