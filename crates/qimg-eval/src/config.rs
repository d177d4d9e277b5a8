//! Grading configuration.
//!
//! Every field has a default, so an empty JSON object `{}` is a valid
//! configuration file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{EvalError, EvalResult};

/// Default classifier artifact, looked up in the working directory.
pub const DEFAULT_CLASSIFIER_PATH: &str = "quantum_classifier.json";

/// Widest register a grading run may simulate (2^30 amplitudes, 16 GiB).
pub const MAX_SIMULATED_QUBITS: u32 = 30;

/// How images are laid out on qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Rows of the encoding grid. Power of two.
    pub rows: usize,
    /// Columns of the encoding grid. Power of two.
    pub cols: usize,
    /// Qubits holding the intensity level of a cell.
    pub intensity_bits: u32,
    /// Normalized intensities at or below this value encode as level 0.
    pub threshold: f64,
    /// Stored intensity of a fully white pixel.
    pub intensity_scale: f64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 2,
            intensity_bits: 4,
            threshold: 1e-5,
            intensity_scale: 255.0,
        }
    }
}

impl EncoderConfig {
    /// Check every field.
    pub fn validate(&self) -> EvalResult<()> {
        for (name, value) in [("rows", self.rows), ("cols", self.cols)] {
            if !value.is_power_of_two() {
                return Err(EvalError::InvalidConfig(format!(
                    "{name} must be a power of two, got {value}"
                )));
            }
        }
        if !(1..=8).contains(&self.intensity_bits) {
            return Err(EvalError::InvalidConfig(format!(
                "intensity_bits must be in 1..=8, got {}",
                self.intensity_bits
            )));
        }
        if !(self.intensity_scale.is_finite() && self.intensity_scale > 0.0) {
            return Err(EvalError::InvalidConfig(format!(
                "intensity_scale must be finite and positive, got {}",
                self.intensity_scale
            )));
        }
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(EvalError::InvalidConfig(format!(
                "threshold must be finite and non-negative, got {}",
                self.threshold
            )));
        }
        let width = self.intensity_bits + self.position_bits();
        if width > MAX_SIMULATED_QUBITS {
            return Err(EvalError::InvalidConfig(format!(
                "encoder needs {width} qubits, at most {MAX_SIMULATED_QUBITS} are supported"
            )));
        }
        Ok(())
    }

    /// Largest intensity level, `2^intensity_bits - 1`.
    pub fn max_level(&self) -> u32 {
        (1 << self.intensity_bits) - 1
    }

    /// Qubits addressing a cell of the grid.
    pub fn position_bits(&self) -> u32 {
        self.rows.trailing_zeros() + self.cols.trailing_zeros()
    }
}

/// Everything a grading run needs besides the dataset location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeConfig {
    /// Image encoding layout.
    pub encoder: EncoderConfig,
    /// Category probabilities strictly above this read as label 1.
    pub label_threshold: f64,
    /// Base of the two-qubit gate penalty, raised to the mean gate count.
    pub gate_penalty_base: f64,
    /// Classifier circuit artifact.
    pub classifier_path: PathBuf,
    /// Largest register the simulator accepts.
    pub max_qubits: u32,
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            encoder: EncoderConfig::default(),
            label_threshold: 0.5,
            gate_penalty_base: 0.999,
            classifier_path: PathBuf::from(DEFAULT_CLASSIFIER_PATH),
            max_qubits: 20,
        }
    }
}

impl GradeConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: &Path) -> EvalResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| EvalError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&json).map_err(|e| {
            EvalError::InvalidConfig(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field.
    pub fn validate(&self) -> EvalResult<()> {
        self.encoder.validate()?;
        if !(0.0..=1.0).contains(&self.label_threshold) {
            return Err(EvalError::InvalidConfig(format!(
                "label_threshold must be in [0, 1], got {}",
                self.label_threshold
            )));
        }
        if !(self.gate_penalty_base > 0.0 && self.gate_penalty_base <= 1.0) {
            return Err(EvalError::InvalidConfig(format!(
                "gate_penalty_base must be in (0, 1], got {}",
                self.gate_penalty_base
            )));
        }
        if self.max_qubits > MAX_SIMULATED_QUBITS {
            return Err(EvalError::InvalidConfig(format!(
                "max_qubits must be at most {MAX_SIMULATED_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        Ok(())
    }
}
