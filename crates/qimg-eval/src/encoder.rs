//! Image to circuit encoding.
//!
//! The register is split into an intensity part (qubits `0..intensity_bits`) and a
//! position part (the qubits above it). The circuit prepares
//!
//! ```text
//! 1/sqrt(N) * sum_p |p> (x) |level(p)>
//! ```
//!
//! so basis index `(p << intensity_bits) | level` carries the quantized intensity of
//! grid cell `p = row * cols + col`.

use ndarray::Array2;
use tracing::debug;

use qimg_ir::{Circuit, Instruction, QubitId, StandardGate, multi_controlled_x};

use crate::config::EncoderConfig;
use crate::error::{EvalError, EvalResult};

/// Builds encoding circuits for one layout.
#[derive(Debug, Clone)]
pub struct ImageEncoder {
    config: EncoderConfig,
}

impl ImageEncoder {
    /// Create an encoder after validating `config`.
    pub fn new(config: EncoderConfig) -> EvalResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The layout this encoder uses.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Total register width.
    pub fn num_qubits(&self) -> u32 {
        self.config.intensity_bits + self.config.position_bits()
    }

    /// Qubits addressing a grid cell, least significant first.
    pub fn position_qubits(&self) -> Vec<QubitId> {
        (self.config.intensity_bits..self.num_qubits())
            .map(QubitId)
            .collect()
    }

    /// Qubits holding the intensity level, least significant first.
    pub fn intensity_qubits(&self) -> Vec<QubitId> {
        (0..self.config.intensity_bits).map(QubitId).collect()
    }

    /// Encoding grid as `(rows, cols)`.
    pub fn resolution(&self) -> (usize, usize) {
        (self.config.rows, self.config.cols)
    }

    /// Normalize to [0, 1] and area-average onto the encoding grid.
    pub fn downsample(&self, image: &Array2<f64>) -> EvalResult<Array2<f64>> {
        let (height, width) = image.dim();
        let (rows, cols) = self.resolution();
        if height < rows || width < cols {
            return Err(EvalError::ImageTooSmall {
                got: (height, width),
                grid: (rows, cols),
            });
        }

        let mut sums = Array2::<f64>::zeros((rows, cols));
        let mut counts = Array2::<f64>::zeros((rows, cols));
        for ((r, c), &value) in image.indexed_iter() {
            let cell = (r * rows / height, c * cols / width);
            sums[cell] += (value / self.config.intensity_scale).clamp(0.0, 1.0);
            counts[cell] += 1.0;
        }
        Ok(sums / counts)
    }

    /// Intensity level of a normalized value.
    pub fn quantize(&self, value: f64) -> u32 {
        if value.is_nan() || value <= self.config.threshold {
            return 0;
        }
        let max_level = self.config.max_level();
        ((value * f64::from(max_level)).round() as u32).clamp(1, max_level)
    }

    /// Build the encoding circuit of `image`.
    ///
    /// The returned circuit only contains 1- and 2-qubit gates.
    pub fn encode(&self, image: &Array2<f64>) -> EvalResult<Circuit> {
        let grid = self.downsample(image)?;
        let position = self.position_qubits();
        let mut circuit = Circuit::new("image_encoder", self.num_qubits());

        for &q in &position {
            circuit.h(q)?;
        }

        let cols = self.config.cols;
        for p in 0..self.config.rows * cols {
            let level = self.quantize(grid[(p / cols, p % cols)]);
            if level == 0 {
                continue;
            }

            // Select |p> on the position register by flipping its zero bits.
            let flips: Vec<_> = position
                .iter()
                .enumerate()
                .filter(|(bit, _)| p >> bit & 1 == 0)
                .map(|(_, &q)| Instruction::single_qubit_gate(StandardGate::X, q))
                .collect();

            for inst in &flips {
                circuit.apply(inst.clone())?;
            }
            for bit in (0..self.config.intensity_bits).filter(|b| level >> b & 1 == 1) {
                for inst in multi_controlled_x(&position, QubitId(bit)) {
                    circuit.apply(inst)?;
                }
            }
            for inst in flips {
                circuit.apply(inst)?;
            }
        }

        debug!(
            "Encoded {:?} image: {} qubits, {} gates",
            image.dim(),
            circuit.num_qubits(),
            circuit.gate_count()
        );
        Ok(circuit)
    }
}
