//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during conditioning and feature extraction
//! - exported to JSON/CSV
//! - reloaded later for comparisons across measurement runs

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Vacuum permeability μ₀ in Vs/Am.
pub const MU_0: f64 = 4.0 * std::f64::consts::PI * 1e-7;

/// One of the three physical segments of a hysteresis measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    /// Initial magnetization curve ("Neukurve").
    Initial,
    /// Upper (descending) hysteresis branch.
    Upper,
    /// Lower (ascending) hysteresis branch.
    Lower,
}

impl Branch {
    pub const ALL: [Branch; 3] = [Branch::Initial, Branch::Upper, Branch::Lower];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Branch::Initial => "initial curve",
            Branch::Upper => "upper branch",
            Branch::Lower => "lower branch",
        }
    }

    /// Single-word name for column headers and JSON keys.
    pub fn short_name(self) -> &'static str {
        match self {
            Branch::Initial => "initial",
            Branch::Upper => "upper",
            Branch::Lower => "lower",
        }
    }

    /// Position of the branch in the fixed CSV import column order.
    pub fn index(self) -> usize {
        match self {
            Branch::Initial => 0,
            Branch::Upper => 1,
            Branch::Lower => 2,
        }
    }
}

/// Curve-type tag carried from import metadata.
///
/// The import stage classifies a measurement file by its column headers; the
/// pipeline itself only processes `Bh` sets and rejects everything else with
/// `InvalidParameter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CurveKind {
    /// B(H) characteristic (field strength vs. flux density).
    Bh,
    /// H(t) time series.
    Ht,
    /// I(t) time series.
    It,
    /// Phi(Theta) characteristic.
    PhiTheta,
    /// Psi(i) characteristic.
    PsiI,
    /// U(t) time series.
    Ut,
    /// Unrecognized column layout.
    Unknown,
}

impl CurveKind {
    pub fn display_name(self) -> &'static str {
        match self {
            CurveKind::Bh => "B(H) characteristic",
            CurveKind::Ht => "H(t) characteristic",
            CurveKind::It => "I(t) characteristic",
            CurveKind::PhiTheta => "Phi(Theta) characteristic",
            CurveKind::PsiI => "Psi(i) characteristic",
            CurveKind::Ut => "U(t) characteristic",
            CurveKind::Unknown => "unknown characteristic",
        }
    }
}

/// An ordered sequence of (H, B) samples.
///
/// No ordering invariant is assumed: raw instrument data may be unsorted and
/// may contain duplicate H values. Stages that need monotonicity sort (and
/// say so in their docs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub h: Vec<f64>,
    pub b: Vec<f64>,
}

impl Curve {
    /// Build a curve from paired samples.
    ///
    /// Callers must pass sequences of equal length; this is a programming
    /// error, not a data error, hence the assert.
    pub fn new(h: Vec<f64>, b: Vec<f64>) -> Self {
        assert_eq!(h.len(), b.len(), "H and B must have equal length");
        Self { h, b }
    }

    pub fn len(&self) -> usize {
        self.h.len()
    }

    pub fn is_empty(&self) -> bool {
        self.h.is_empty()
    }
}

/// The three branches of one measurement plus its curve-type tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSet {
    pub kind: CurveKind,
    pub initial: Curve,
    pub upper: Curve,
    pub lower: Curve,
}

impl CurveSet {
    pub fn branch(&self, branch: Branch) -> &Curve {
        match branch {
            Branch::Initial => &self.initial,
            Branch::Upper => &self.upper,
            Branch::Lower => &self.lower,
        }
    }

    /// Branches in fixed import order.
    pub fn branches(&self) -> [(Branch, &Curve); 3] {
        [
            (Branch::Initial, &self.initial),
            (Branch::Upper, &self.upper),
            (Branch::Lower, &self.lower),
        ]
    }
}

/// A zero-phase low-pass filter description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Butterworth order.
    pub order: usize,
    /// Cutoff normalized to the Nyquist frequency, in (0, 1).
    pub cutoff: f64,
}

impl FilterSpec {
    /// Default coarse pass applied to H and B of every branch.
    pub const FIRST_PASS: FilterSpec = FilterSpec {
        order: 3,
        cutoff: 0.05,
    };

    /// Default strict pass applied to the already-filtered H only.
    pub const SECOND_PASS: FilterSpec = FilterSpec {
        order: 4,
        cutoff: 0.01,
    };

    pub fn validate(&self, name: &'static str) -> Result<(), AppError> {
        if self.order == 0 {
            return Err(AppError::invalid(name, "filter order must be >= 1"));
        }
        if !(self.cutoff.is_finite() && self.cutoff > 0.0 && self.cutoff < 1.0) {
            return Err(AppError::invalid(
                name,
                format!("normalized cutoff must lie in (0, 1), got {}", self.cutoff),
            ));
        }
        Ok(())
    }
}

/// Parameters for the dedupe + dual-pass spline resampling stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResampleConfig {
    /// Density divisor for the first interpolation pass:
    /// `n1 = max(10, rows / subsample)`. 1 keeps full density, 2 halves it.
    pub subsample: usize,
    /// Evaluation points may fall epsilon-outside the knot range due to
    /// floating point; excursions beyond this fraction of the H span set the
    /// `extrapolated` flag on the output instead of raising.
    pub extrapolation_tolerance: f64,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            subsample: 2,
            extrapolation_tolerance: 1e-8,
        }
    }
}

impl ResampleConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.subsample == 0 {
            return Err(AppError::invalid("subsample", "must be >= 1"));
        }
        if !(self.extrapolation_tolerance.is_finite() && self.extrapolation_tolerance >= 0.0) {
            return Err(AppError::invalid(
                "extrapolation_tolerance",
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Savitzky–Golay smoothing + subsampling parameters for the differential
/// permeability computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Window length in samples (odd).
    pub window: usize,
    /// Polynomial degree (< window).
    pub degree: usize,
    /// Subsampling stride applied before smoothing; the trailing remainder
    /// is dropped.
    pub stride: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: 11,
            degree: 3,
            stride: 10,
        }
    }
}

impl SmoothingConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.window < 2 || self.window % 2 == 0 {
            return Err(AppError::invalid(
                "window",
                format!("smoothing window must be odd and >= 3, got {}", self.window),
            ));
        }
        if self.degree >= self.window {
            return Err(AppError::invalid(
                "degree",
                format!(
                    "polynomial degree {} must be smaller than window {}",
                    self.degree, self.window
                ),
            ));
        }
        if self.stride == 0 {
            return Err(AppError::invalid("stride", "must be >= 1"));
        }
        Ok(())
    }
}

/// Loss-area parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LossConfig {
    /// Grid resolution for intersection/zero-crossing scans and quadrature.
    pub grid_resolution: usize,
    /// Measurement duration in seconds (enables loss-factor scaling).
    pub duration: Option<f64>,
    /// Material density in kg/m³ (enables loss-factor scaling).
    pub density: Option<f64>,
}

impl Default for LossConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 10_000,
            duration: None,
            density: None,
        }
    }
}

impl LossConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.grid_resolution < 2 {
            return Err(AppError::invalid("grid_resolution", "must be >= 2"));
        }
        if let Some(d) = self.duration {
            if !(d.is_finite() && d > 0.0) {
                return Err(AppError::invalid("duration", format!("must be > 0, got {d}")));
            }
        }
        if let Some(rho) = self.density {
            if !(rho.is_finite() && rho > 0.0) {
                return Err(AppError::invalid("density", format!("must be > 0, got {rho}")));
            }
        }
        Ok(())
    }
}

/// How a branch is regenerated by the reshaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReshapeMethod {
    /// Not-a-knot cubic spline.
    Cubic,
    /// Local three-point quadratic.
    Quadratic,
}

impl ReshapeMethod {
    pub fn display_name(self) -> &'static str {
        match self {
            ReshapeMethod::Cubic => "cubic",
            ReshapeMethod::Quadratic => "quadratic",
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults). Every knob is explicit;
/// no stage reads ambient global state.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub csv_path: PathBuf,
    pub kind: CurveKind,

    pub first_filter: FilterSpec,
    pub second_filter: FilterSpec,
    /// Run the second (H-only) filter pass.
    pub second_pass: bool,

    pub resample: ResampleConfig,
    pub smoothing: SmoothingConfig,
    pub loss: LossConfig,

    /// Regenerate each branch at this many points (both reshape methods).
    pub reshape_points: Option<usize>,

    pub export_conditioned: Option<PathBuf>,
    pub export_resampled: Option<PathBuf>,
    pub export_features: Option<PathBuf>,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.first_filter.validate("first_filter")?;
        self.second_filter.validate("second_filter")?;
        self.resample.validate()?;
        self.smoothing.validate()?;
        self.loss.validate()?;
        if let Some(n) = self.reshape_points {
            if n < 2 {
                return Err(AppError::invalid(
                    "reshape_points",
                    format!("need at least 2 points, got {n}"),
                ));
            }
        }
        Ok(())
    }
}

/// Error metrics between an original and a filtered sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FilterQuality {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    /// RMSE as a percentage of |mean(original)|.
    pub rmse_percent: f64,
    /// Signal-to-removed-noise ratio in dB.
    pub snr_db: f64,
}

/// One branch after the dual-stage filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredBranch {
    pub branch: Branch,
    pub h_original: Vec<f64>,
    pub b_original: Vec<f64>,
    pub h_filtered: Vec<f64>,
    pub b_filtered: Vec<f64>,
    /// Present only after the optional second pass; B is never refiltered.
    pub h_refiltered: Option<Vec<f64>>,
    pub quality_h: FilterQuality,
    pub quality_b: FilterQuality,
}

impl FilteredBranch {
    /// The H sequence the downstream stages consume: second-pass output when
    /// available, first-pass output otherwise.
    pub fn conditioned_h(&self) -> &[f64] {
        self.h_refiltered.as_deref().unwrap_or(&self.h_filtered)
    }
}

/// All three branches after filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredSet {
    pub kind: CurveKind,
    pub branches: Vec<FilteredBranch>,
}

impl FilteredSet {
    pub fn branch(&self, branch: Branch) -> &FilteredBranch {
        &self.branches[branch.index()]
    }
}

/// One branch after dedupe + dual-pass resampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResampledBranch {
    pub branch: Branch,
    /// First-pass curve at `n1` points (diagnostic).
    pub coarse: Curve,
    /// Final evenly spaced curve at the original row count.
    pub fine: Curve,
    /// Set when any evaluation point fell outside the knot range by more
    /// than the configured tolerance.
    pub extrapolated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResampledSet {
    pub branches: Vec<ResampledBranch>,
}

impl ResampledSet {
    pub fn branch(&self, branch: Branch) -> &ResampledBranch {
        &self.branches[branch.index()]
    }
}

/// A branch regenerated at a caller-specified point count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReshapeResult {
    pub branch: Branch,
    pub method: ReshapeMethod,
    pub curve: Curve,
    /// Max |B_original − interp(H_original)| of the reshaped interpolant,
    /// i.e. how much information the reshape lost.
    pub max_residual: f64,
}

/// Magnetization and polarization along one branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedBranch {
    pub branch: Branch,
    pub h: Vec<f64>,
    /// M = B/μ₀ − H, in A/m.
    pub magnetization: Vec<f64>,
    /// J = B − μ₀·H, in T.
    pub polarization: Vec<f64>,
}

/// Smoothed differential permeability along one branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermeabilityCurve {
    pub branch: Branch,
    /// Subsampled, unsmoothed H abscissae.
    pub h: Vec<f64>,
    /// Subsampled, unsmoothed B values.
    pub b: Vec<f64>,
    /// μᵣ = (dB/dH)/μ₀ from the smoothed sequences.
    pub mu_r: Vec<f64>,
}

/// Remanence and coercivity of both hysteresis branches.
///
/// `None` means the corresponding axis crossing does not exist in the data —
/// a valid outcome, not an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CharacteristicPoints {
    /// B at H=0 on the upper branch, in T.
    pub upper_remanence: Option<f64>,
    /// B at H=0 on the lower branch, in T.
    pub lower_remanence: Option<f64>,
    /// H at B=0 on the upper branch (negative side), in A/m.
    pub negative_coercivity: Option<f64>,
    /// H at B=0 on the lower branch (positive side), in A/m.
    pub positive_coercivity: Option<f64>,
}

/// Loss figures scaled by measurement duration and material density.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LossScaling {
    /// totalArea / (0.8·T·ρ), in W/kg.
    pub loss_factor: f64,
    /// Implied remagnetization frequency 1/(0.8·T), in Hz.
    pub frequency: f64,
    /// Linear extrapolation of the loss factor to 50 Hz.
    pub loss_factor_50hz: f64,
}

/// Everything the loss-area stage computed.
///
/// Partial results are normal: a branch without its own zero crossing
/// contributes no area and the dependent fields stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LossReport {
    /// All branch intersections found in `[0, min(maxH))`, ascending.
    ///
    /// Only the first is used as the integration bound; more than one is an
    /// ambiguity callers should flag.
    pub intersections: Vec<f64>,
    pub upper_zero_crossing: Option<f64>,
    pub lower_zero_crossing: Option<f64>,
    /// Shared upper integration bound (first intersection, else the shorter
    /// branch's last H).
    pub upper_bound: f64,
    pub area_upper: Option<f64>,
    pub area_lower: Option<f64>,
    /// 2·|area_upper − area_lower|, in Ws/m³.
    pub total_area: Option<f64>,
    pub scaling: Option<LossScaling>,
}

/// Everything one analysis run produced, in pipeline order.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    pub kind: CurveKind,
    pub filtered: FilteredSet,
    pub resampled: ResampledSet,
    /// Magnetization/polarization along the upper and lower branches.
    pub derived: Vec<DerivedBranch>,
    /// Differential permeability along the initial magnetization curve.
    pub permeability: PermeabilityCurve,
    pub points: CharacteristicPoints,
    pub loss: LossReport,
    /// Present when a reshape point count was requested; both methods are
    /// run side by side so their residuals can be compared.
    pub reshaped: Vec<ReshapeResult>,
}
