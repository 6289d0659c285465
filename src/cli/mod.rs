//! Command-line parsing for the hysteresis curve conditioner.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the conditioning/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::CurveKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bh", version, about = "Hysteresis curve conditioning and feature extraction")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Condition a measurement CSV and extract loop features.
    Analyze(AnalyzeArgs),
    /// Write a synthetic tanh-shaped loop as a measurement CSV.
    Sample(SampleArgs),
}

/// Options for conditioning and feature extraction.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Measurement CSV (six positional columns: H/B per branch).
    pub csv: PathBuf,

    /// Curve kind recorded in the file.
    #[arg(long, value_enum, default_value = "bh")]
    pub kind: CurveKind,

    /// Butterworth order of the first filter pass.
    #[arg(long, default_value_t = 3)]
    pub filter_order: usize,

    /// Normalized cutoff of the first filter pass, in (0, 1).
    #[arg(long, default_value_t = 0.05)]
    pub filter_cutoff: f64,

    /// Run the second, H-only filter pass.
    #[arg(long)]
    pub second_pass: bool,

    /// Butterworth order of the second pass.
    #[arg(long, default_value_t = 4)]
    pub second_order: usize,

    /// Normalized cutoff of the second pass.
    #[arg(long, default_value_t = 0.01)]
    pub second_cutoff: f64,

    /// Density divisor for the first resampling pass.
    #[arg(long, default_value_t = 2)]
    pub subsample: usize,

    /// Savitzky-Golay window length for the permeability computation (odd).
    #[arg(long, default_value_t = 11)]
    pub window: usize,

    /// Savitzky-Golay polynomial degree.
    #[arg(long, default_value_t = 3)]
    pub degree: usize,

    /// Subsampling stride before permeability smoothing.
    #[arg(long, default_value_t = 10)]
    pub stride: usize,

    /// Grid resolution for intersection scans and loss quadrature.
    #[arg(long, default_value_t = 10_000)]
    pub grid_resolution: usize,

    /// Measurement duration in seconds (enables loss-factor scaling).
    #[arg(long)]
    pub duration: Option<f64>,

    /// Material density in kg/m³ (enables loss-factor scaling).
    #[arg(long)]
    pub density: Option<f64>,

    /// Regenerate each branch at this many points (both reshape methods).
    #[arg(long)]
    pub reshape: Option<usize>,

    /// Export the filter stage's columns to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the resampled curves to CSV.
    #[arg(long = "export-resampled")]
    pub export_resampled: Option<PathBuf>,

    /// Export the extracted features to JSON.
    #[arg(long = "export-features")]
    pub export_features: Option<PathBuf>,
}

/// Options for synthetic loop generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path (measurement column layout).
    pub out: PathBuf,

    /// Samples per branch.
    #[arg(long, default_value_t = 500)]
    pub rows: usize,

    /// Field sweep limit in A/m.
    #[arg(long, default_value_t = 1000.0)]
    pub h_max: f64,

    /// Saturation flux density Bs in T.
    #[arg(long, default_value_t = 1.5)]
    pub saturation: f64,

    /// Coercive field Hc in A/m.
    #[arg(long, default_value_t = 120.0)]
    pub coercivity: f64,

    /// Transition width of the tanh shoulder in A/m.
    #[arg(long, default_value_t = 180.0)]
    pub width: f64,

    /// Standard deviation of the B noise in T.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
