//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;

/// A quantum circuit over a fixed number of qubits.
///
/// Instructions are kept in program order. Every instruction is validated when it
/// is applied, so a `Circuit` obtained through the builder methods always refers
/// to existing qubits with the operand count its gates expect. Circuits obtained
/// from deserialization must be checked with [`Circuit::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create an empty circuit with `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
        }
    }

    /// Build a circuit from raw parts, validating every instruction.
    pub fn from_instructions(
        name: impl Into<String>,
        num_qubits: u32,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<Self> {
        let mut circuit = Self::new(name, num_qubits);
        for inst in instructions {
            circuit.apply(inst)?;
        }
        Ok(circuit)
    }

    /// Append an instruction after checking it against this circuit.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn check(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            InstructionKind::Barrier => None,
        };

        if let InstructionKind::Gate(gate) = &instruction.kind {
            if !gate.kind.has_finite_parameters() {
                return Err(IrError::NonFiniteParameter {
                    gate_name: gate.name().to_string(),
                });
            }
            let expected = gate.num_qubits();
            let got = instruction.qubits.len() as u32;
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }

        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: gate_name.clone(),
                });
            }
            if instruction.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Re-check every instruction. Needed after deserializing a circuit.
    pub fn validate(&self) -> IrResult<()> {
        self.instructions.iter().try_for_each(|inst| self.check(inst))
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply identity gate.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::I, qubit))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply controlled-Ry gate.
    pub fn cry(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CRy(theta),
            control,
            target,
        ))
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CP(theta),
            control,
            target,
        ))
    }

    // =========================================================================
    // Three-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CSwap, [control, t1, t2]))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubit_ids().collect();
        self.apply(Instruction::barrier(qubits))
    }

    /// Append `other`, placing its qubit `k` on `qubits[k]` of this circuit.
    pub fn compose(&mut self, other: &Circuit, qubits: &[QubitId]) -> IrResult<&mut Self> {
        if qubits.len() != other.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: other.name.clone(),
                expected: other.num_qubits,
                got: qubits.len() as u32,
            });
        }
        other.validate()?;
        for inst in &other.instructions {
            self.apply(inst.remapped(|q| qubits[q.index()]))?;
        }
        Ok(self)
    }

    /// Run `first` then `second` on a register as wide as the wider of the two.
    ///
    /// Both circuits start at qubit 0, so a narrower circuit acts on the low
    /// qubits of the combined register.
    pub fn stacked(name: impl Into<String>, first: &Circuit, second: &Circuit) -> IrResult<Self> {
        let width = first.num_qubits.max(second.num_qubits);
        let mut combined = Self::new(name, width);
        let first_qubits: Vec<_> = first.qubit_ids().collect();
        let second_qubits: Vec<_> = second.qubit_ids().collect();
        combined.compose(first, &first_qubits)?;
        combined.compose(second, &second_qubits)?;
        Ok(combined)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Iterate over the qubit identifiers of this circuit.
    pub fn qubit_ids(&self) -> impl Iterator<Item = QubitId> + use<> {
        (0..self.num_qubits).map(QubitId)
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of gate instructions (barriers excluded).
    pub fn gate_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Whether the circuit has no instructions at all.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new("bell", 2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::new("ghz", n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }

        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test", 3);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.gate_count(), 2);
    }

    #[test]
    fn test_ghz_state() {
        let circuit = Circuit::ghz(5).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.gate_count(), 5);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::new("test", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .rx(PI / 2.0, QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        assert_eq!(circuit.gate_count(), 3);
        assert_eq!(circuit.instructions()[1].name(), "rx");
    }

    #[test]
    fn test_rejects_unknown_qubit() {
        let mut circuit = Circuit::new("test", 2);
        let err = circuit.cx(QubitId(0), QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(2), .. }));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_qubit() {
        let mut circuit = Circuit::new("test", 3);
        let err = circuit.ccx(QubitId(0), QubitId(1), QubitId(0)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_rejects_wrong_operand_count() {
        let mut circuit = Circuit::new("test", 3);
        let err = circuit
            .gate(StandardGate::CX, [QubitId(0)])
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_finite_angle() {
        let mut circuit = Circuit::new("test", 2);
        let err = circuit.ry(f64::NAN, QubitId(0)).unwrap_err();
        assert!(matches!(err, IrError::NonFiniteParameter { ref gate_name } if gate_name == "ry"));
        assert!(circuit.is_empty());

        let err = Circuit::from_instructions(
            "test",
            2,
            [Instruction::two_qubit_gate(
                StandardGate::CP(f64::INFINITY),
                QubitId(0),
                QubitId(1),
            )],
        )
        .unwrap_err();
        assert!(matches!(err, IrError::NonFiniteParameter { .. }));
    }

    #[test]
    fn test_barrier_is_not_a_gate() {
        let mut circuit = Circuit::new("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.h(QubitId(1)).unwrap();
        assert_eq!(circuit.gate_count(), 2);
    }

    #[test]
    fn test_stacked_pads_to_wider_circuit() {
        let mut narrow = Circuit::new("encoder", 2);
        narrow.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
        let mut wide = Circuit::new("classifier", 4);
        wide.x(QubitId(3)).unwrap();

        let combined = Circuit::stacked("combined", &narrow, &wide).unwrap();
        assert_eq!(combined.num_qubits(), 4);
        assert_eq!(combined.gate_count(), 3);
        assert_eq!(combined.instructions()[0].qubits, vec![QubitId(0)]);
        assert_eq!(combined.instructions()[2].qubits, vec![QubitId(3)]);

        let reversed = Circuit::stacked("combined", &wide, &narrow).unwrap();
        assert_eq!(reversed.num_qubits(), 4);
        assert_eq!(reversed.instructions()[0].name(), "x");
    }

    #[test]
    fn test_compose_with_mapping() {
        let bell = Circuit::bell().unwrap();
        let mut host = Circuit::new("host", 4);
        host.compose(&bell, &[QubitId(2), QubitId(3)]).unwrap();
        assert_eq!(host.instructions()[1].qubits, vec![QubitId(2), QubitId(3)]);

        let err = host.compose(&bell, &[QubitId(0)]).unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { .. }));
    }

    #[test]
    fn test_validate_after_deserialize() {
        let json = r#"{"name":"bad","num_qubits":1,"instructions":[
            {"kind":{"Gate":{"kind":"CX"}},"qubits":[0,1]}]}"#;
        let circuit: Circuit = serde_json::from_str(json).unwrap();
        assert!(circuit.validate().is_err());

        let good = Circuit::ghz(3).unwrap();
        let back: Circuit = serde_json::from_str(&serde_json::to_string(&good).unwrap()).unwrap();
        assert!(back.validate().is_ok());
        assert_eq!(back, good);
    }
}
