//! Gate tallies by operand count.
//!
//! The grading policy only admits 1- and 2-qubit primitive gates; composite gates
//! must be lowered with [`crate::decompose`] before they are counted.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};

/// Largest operand count accepted by [`count_gates`].
pub const MAX_GATE_ARITY: u32 = 2;

/// Number of gate operations per operand count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateTally {
    counts: FxHashMap<u32, usize>,
}

impl GateTally {
    /// Tally every gate of `circuit`, whatever its arity. Barriers are skipped.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut counts = FxHashMap::default();
        for gate in circuit.instructions().iter().filter(|i| i.is_gate()) {
            *counts.entry(gate.arity() as u32).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Count of gates acting on exactly `arity` qubits.
    pub fn get(&self, arity: u32) -> usize {
        self.counts.get(&arity).copied().unwrap_or(0)
    }

    /// Count of two-qubit gates, the quantity the score penalizes.
    pub fn two_qubit(&self) -> usize {
        self.get(2)
    }

    /// Total number of gates.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

}

/// Tally the gates of `circuit`, failing on the first gate wider than two qubits.
pub fn count_gates(circuit: &Circuit) -> IrResult<GateTally> {
    if let Some(inst) = circuit
        .instructions()
        .iter()
        .find(|i| i.is_gate() && i.arity() as u32 > MAX_GATE_ARITY)
    {
        return Err(IrError::ForbiddenArity {
            gate_name: inst.name().to_string(),
            arity: inst.arity() as u32,
        });
    }
    Ok(GateTally::from_circuit(circuit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;

    #[test]
    fn test_count_by_arity() {
        let mut circuit = Circuit::new("test", 3);
        circuit
            .h(QubitId(0))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .cz(QubitId(1), QubitId(2))
            .unwrap()
            .barrier_all()
            .unwrap();

        let tally = count_gates(&circuit).unwrap();
        assert_eq!(tally.get(1), 2);
        assert_eq!(tally.two_qubit(), 2);
        assert_eq!(tally.get(3), 0);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_rejects_three_qubit_gate() {
        let mut circuit = Circuit::new("test", 3);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();

        let err = count_gates(&circuit).unwrap_err();
        assert!(matches!(err, IrError::ForbiddenArity { arity: 3, .. }));

        // The unrestricted tally still sees it.
        let tally = GateTally::from_circuit(&circuit);
        assert_eq!(tally.get(3), 1);
    }

    #[test]
    fn test_barrier_spanning_all_qubits_is_not_a_gate() {
        let mut circuit = Circuit::new("test", 6);
        circuit.barrier_all().unwrap();
        let tally = count_gates(&circuit).unwrap();
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.get(6), 0);
    }
}
