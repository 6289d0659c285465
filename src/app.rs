//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads or generates measurement data
//! - runs the conditioning + feature-extraction pipeline
//! - prints the run summary
//! - writes optional exports

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, SampleArgs};
use crate::domain::{AnalysisConfig, FilterSpec, LossConfig, ResampleConfig, SmoothingConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bh` binary.
pub fn run() -> Result<(), AppError> {
    // We want `bh measurement.csv` to behave like `bh analyze measurement.csv`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    config.validate()?;

    let ingest = crate::io::ingest::load_curve_set(&config.csv_path, config.kind)?;
    let output = pipeline::run_analysis(&ingest.set, &config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&ingest, &output, &config)
    );

    if let Some(path) = &config.export_conditioned {
        crate::io::export::write_conditioned_csv(path, &output.filtered)?;
    }
    if let Some(path) = &config.export_resampled {
        crate::io::export::write_resampled_csv(path, &output.resampled)?;
    }
    if let Some(path) = &config.export_features {
        crate::io::export::write_features_json(path, &output)?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = crate::data::SampleConfig {
        rows: args.rows,
        h_max: args.h_max,
        saturation: args.saturation,
        coercivity: args.coercivity,
        width: args.width,
        noise: args.noise,
        seed: args.seed,
    };
    let set = crate::data::generate_sample(&config)?;
    crate::io::export::write_sample_csv(&args.out, &set)?;
    println!(
        "wrote {} rows per branch to {}",
        config.rows,
        args.out.display()
    );
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        csv_path: args.csv.clone(),
        kind: args.kind,
        first_filter: FilterSpec {
            order: args.filter_order,
            cutoff: args.filter_cutoff,
        },
        second_filter: FilterSpec {
            order: args.second_order,
            cutoff: args.second_cutoff,
        },
        second_pass: args.second_pass,
        resample: ResampleConfig {
            subsample: args.subsample,
            ..Default::default()
        },
        smoothing: SmoothingConfig {
            window: args.window,
            degree: args.degree,
            stride: args.stride,
        },
        loss: LossConfig {
            grid_resolution: args.grid_resolution,
            duration: args.duration,
            density: args.density,
        },
        reshape_points: args.reshape,
        export_conditioned: args.export.clone(),
        export_resampled: args.export_resampled.clone(),
        export_features: args.export_features.clone(),
    }
}

/// Rewrite argv so `bh <file.csv>` defaults to `bh analyze <file.csv>`.
///
/// Rules:
/// - `bh`                       -> unchanged (clap prints the usage error)
/// - `bh measurement.csv ...`   -> `bh analyze measurement.csv ...`
/// - `bh --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "sample");
    if is_subcommand {
        return argv;
    }

    // Anything else is treated as the measurement file of an implied
    // `analyze` invocation.
    if !arg1.starts_with('-') {
        argv.insert(1, "analyze".to_string());
    }
    argv
}
