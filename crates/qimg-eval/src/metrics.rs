//! Score arithmetic: image error, gate-cost penalty and clipping.

use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EvalError, EvalResult};

/// Mean squared error of two images after scaling both to the 0–255 range.
///
/// Each pixel contributes `(255 · (a − b) / intensity_scale)²`.
pub fn image_mse(
    original: &Array2<f64>,
    reconstructed: &Array2<f64>,
    intensity_scale: f64,
) -> EvalResult<f64> {
    if original.dim() != reconstructed.dim() {
        return Err(EvalError::ShapeMismatch {
            expected: original.dim(),
            got: reconstructed.dim(),
        });
    }
    if original.is_empty() {
        return Ok(0.0);
    }

    let factor = 255.0 / intensity_scale;
    let sum = Zip::from(original)
        .and(reconstructed)
        .fold(0.0, |acc, &a, &b| {
            let d = factor * (a - b);
            acc + d * d
        });
    Ok(sum / original.len() as f64)
}

/// Multiplicative penalty `base^mean_two_qubit_gates`.
pub fn gate_penalty(base: f64, mean_two_qubit_gates: f64) -> f64 {
    base.powf(mean_two_qubit_gates)
}

/// Clamp a score to [0, 1], logging a warning when it had to move.
pub fn clip_score(name: &str, raw: f64) -> f64 {
    let clipped = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
    if clipped != raw {
        warn!("{} score {} is outside [0, 1], clipped to {}", name, raw, clipped);
    }
    clipped
}

/// Running sums for one scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accumulator {
    /// Samples seen.
    pub samples: usize,
    /// Sum of the per-sample metric (MSE or match indicator).
    pub metric_sum: f64,
    /// Sum of two-qubit gate counts.
    pub two_qubit_gates: usize,
}

impl Accumulator {
    /// Record one sample.
    pub fn push(&mut self, metric: f64, two_qubit_gates: usize) {
        self.samples += 1;
        self.metric_sum += metric;
        self.two_qubit_gates += two_qubit_gates;
    }

    /// Mean of the per-sample metric.
    pub fn mean_metric(&self) -> f64 {
        self.mean(self.metric_sum)
    }

    /// Mean two-qubit gate count.
    pub fn mean_two_qubit_gates(&self) -> f64 {
        self.mean(self.two_qubit_gates as f64)
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            sum / self.samples as f64
        }
    }
}
