//! Simulator implementation.

use std::time::Instant;
use tracing::{debug, instrument};

use qimg_hal::{HalError, HalResult, Histogram, Simulator};
use qimg_ir::Circuit;

use crate::statevector::Statevector;

/// Probabilities at or below this value are dropped from the histogram.
pub const HISTOGRAM_CUTOFF: f64 = 1e-9;

/// Default register limit, about 16 MB of amplitudes.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Exact local simulator.
///
/// This simulator evolves a full statevector from |0...0⟩ and reports the exact
/// probability of every basis state. It supports circuits up to ~20 qubits
/// (limited by memory).
#[derive(Debug, Clone)]
pub struct StatevectorSimulator {
    /// Maximum number of qubits supported.
    max_qubits: u32,
}

impl StatevectorSimulator {
    /// Create a new simulator with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self { max_qubits }
    }

    /// Largest register this simulator accepts.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    /// Evolve `circuit` and return the final statevector.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn evolve(&self, circuit: &Circuit) -> HalResult<Statevector> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }
        circuit
            .validate()
            .map_err(|e| HalError::InvalidCircuit(e.to_string()))?;

        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} instructions",
            circuit.num_qubits(),
            circuit.instructions().len()
        );

        let mut sv = Statevector::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            sv.apply(inst);
        }

        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(sv)
    }
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for StatevectorSimulator {
    fn name(&self) -> &str {
        "statevector"
    }

    fn simulate(&self, circuit: &Circuit) -> HalResult<Histogram> {
        let histogram = self.evolve(circuit)?.probabilities(HISTOGRAM_CUTOFF);
        histogram.validate()?;
        Ok(histogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qimg_ir::QubitId;

    #[test]
    fn test_simulator_bell_state() {
        let sim = StatevectorSimulator::new();
        let histogram = sim.simulate(&Circuit::bell().unwrap()).unwrap();

        assert_eq!(histogram.len(), 2);
        assert!((histogram.get(0b00) - 0.5).abs() < 1e-12);
        assert!((histogram.get(0b11) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_simulator_ghz_state() {
        let sim = StatevectorSimulator::new();
        let histogram = sim.simulate(&Circuit::ghz(3).unwrap()).unwrap();
        assert!((histogram.get(0b000) + histogram.get(0b111) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_simulator_empty_circuit() {
        let sim = StatevectorSimulator::new();
        let histogram = sim.simulate(&Circuit::new("idle", 4)).unwrap();
        assert_eq!(histogram.iter().collect::<Vec<_>>(), vec![(0, 1.0)]);
    }

    #[test]
    fn test_simulator_too_many_qubits() {
        let sim = StatevectorSimulator::with_max_qubits(5);
        let result = sim.simulate(&Circuit::new("test", 10));
        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
    }

    #[test]
    fn test_simulator_rejects_unvalidated_circuit() {
        let json = r#"{"name":"bad","num_qubits":1,"instructions":[
            {"kind":{"Gate":{"kind":"X"}},"qubits":[3]}]}"#;
        let circuit: Circuit = serde_json::from_str(json).unwrap();
        let sim = StatevectorSimulator::new();
        assert!(matches!(
            sim.simulate(&circuit),
            Err(HalError::InvalidCircuit(_))
        ));
    }

    #[test]
    fn test_simulator_rejects_mass_lost_to_cutoff() {
        // Each single-excitation state carries about 9e-10, below the cutoff.
        // Sixteen of them drop 1.44e-8 of mass, beyond the histogram tolerance.
        let theta = 2.0 * 9e-10f64.sqrt().asin();
        let mut circuit = Circuit::new("near_identity", 16);
        for q in 0..16 {
            circuit.ry(theta, QubitId(q)).unwrap();
        }

        let sim = StatevectorSimulator::new();
        assert!(matches!(
            sim.simulate(&circuit),
            Err(HalError::InvalidHistogram { .. })
        ));
    }

    #[test]
    fn test_lowered_toffoli_matches_native() {
        let mut native = Circuit::new("native", 3);
        native
            .h(QubitId(0))
            .unwrap()
            .h(QubitId(1))
            .unwrap()
            .ccx(QubitId(0), QubitId(1), QubitId(2))
            .unwrap();
        let lowered = qimg_ir::decompose_multi_qubit(&native).unwrap();

        let sim = StatevectorSimulator::new();
        let a = sim.simulate(&native).unwrap();
        let b = sim.simulate(&lowered).unwrap();
        for index in 0..8 {
            assert!((a.get(index) - b.get(index)).abs() < 1e-9);
        }
        assert!((b.get(0b111) - 0.25).abs() < 1e-9);
    }
}
