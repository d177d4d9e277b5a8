//! Grading report structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reproducibility::ReproducibilityInfo;

/// Schema version of [`ScoreReport`].
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Result of the reconstruction pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionScore {
    /// Mean image MSE in 0–255 units.
    pub mean_mse: f64,
    /// `1 - mean_mse`.
    pub fidelity: f64,
    /// Mean two-qubit gate count of the encoder circuits.
    pub mean_two_qubit_gates: f64,
    /// Score before clipping.
    pub raw_score: f64,
    /// Published score in [0, 1].
    pub score: f64,
}

/// Result of the classification pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationScore {
    /// Images whose predicted label matched.
    pub correct: usize,
    /// `correct / images`.
    pub accuracy: f64,
    /// Mean two-qubit gate count of the encoder circuits.
    pub mean_two_qubit_gates: f64,
    /// Score before clipping.
    pub raw_score: f64,
    /// Published score in [0, 1].
    pub score: f64,
}

/// Complete grading report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Schema version for forward compatibility.
    pub schema_version: String,
    /// Timestamp of the run.
    pub timestamp: DateTime<Utc>,
    /// Dataset directory as given on the command line.
    pub data_path: String,
    /// Simulator used.
    pub simulator: String,
    /// Number of images graded.
    pub num_images: usize,
    /// Part 1.
    pub part1: ReconstructionScore,
    /// Part 2.
    pub part2: ClassificationScore,
    /// Reproducibility information.
    pub reproducibility: ReproducibilityInfo,
}

impl ScoreReport {
    /// The `score_part1,score_part2,data_path` result line.
    ///
    /// Scores use the shortest round-trip form with a decimal point, so `1.0`
    /// prints as `1.0` and `0.00001` as `1e-05`.
    pub fn summary_line(&self) -> String {
        format!(
            "{},{},{}",
            format_score(self.part1.score),
            format_score(self.part2.score),
            self.data_path
        )
    }
}

/// Shortest round-trip decimal, with a signed exponent of at least two digits.
pub fn format_score(score: f64) -> String {
    let repr = format!("{score:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}
