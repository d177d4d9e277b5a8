//! Lowering of three-qubit gates to 1- and 2-qubit gates.
//!
//! The Toffoli lowering is the exact six-CX Clifford+T form; Fredkin is a Toffoli
//! conjugated by a CX on its targets.

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;
use std::f64::consts::PI;

/// Number of CX gates in one lowered Toffoli.
pub const TOFFOLI_CX_COST: usize = 6;

/// Exact Toffoli (CCX) as H, T, T-dagger and six CX gates.
pub fn toffoli(c1: QubitId, c2: QubitId, target: QubitId) -> Vec<Instruction> {
    use StandardGate::{CX, H, T, Tdg};
    let one = Instruction::single_qubit_gate;
    let two = Instruction::two_qubit_gate;
    vec![
        one(H, target),
        two(CX, c2, target),
        one(Tdg, target),
        two(CX, c1, target),
        one(T, target),
        two(CX, c2, target),
        one(Tdg, target),
        two(CX, c1, target),
        one(T, c2),
        one(T, target),
        one(H, target),
        two(CX, c1, c2),
        one(T, c1),
        one(Tdg, c2),
        two(CX, c1, c2),
    ]
}

/// Exact Fredkin (CSWAP) built on [`toffoli`].
pub fn fredkin(control: QubitId, t1: QubitId, t2: QubitId) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(17);
    out.push(Instruction::two_qubit_gate(StandardGate::CX, t2, t1));
    out.extend(toffoli(control, t1, t2));
    out.push(Instruction::two_qubit_gate(StandardGate::CX, t2, t1));
    out
}

/// Multi-controlled X on `target`, built from 1- and 2-qubit gates without ancillas.
///
/// Zero controls give X, one gives CX and two give the lowered [`toffoli`]. Wider
/// gates are `H · C^n P(π) · H` with the phase expanded by [`multi_controlled_phase`].
pub fn multi_controlled_x(controls: &[QubitId], target: QubitId) -> Vec<Instruction> {
    match *controls {
        [] => vec![Instruction::single_qubit_gate(StandardGate::X, target)],
        [c] => vec![Instruction::two_qubit_gate(StandardGate::CX, c, target)],
        [c1, c2] => toffoli(c1, c2, target),
        _ => {
            let mut out = vec![Instruction::single_qubit_gate(StandardGate::H, target)];
            out.extend(multi_controlled_phase(PI, controls, target));
            out.push(Instruction::single_qubit_gate(StandardGate::H, target));
            out
        }
    }
}

/// Multi-controlled phase `P(theta)` on `target`, without ancillas.
///
/// Uses `C^n V = CV(c_n, t) · C^{n-1}X(c_n) · CV†(c_n, t) · C^{n-1}X(c_n) · C^{n-1}V`
/// with `V = P(theta / 2)`.
pub fn multi_controlled_phase(theta: f64, controls: &[QubitId], target: QubitId) -> Vec<Instruction> {
    match controls.split_last() {
        None => vec![Instruction::single_qubit_gate(StandardGate::P(theta), target)],
        Some((&last, [])) => vec![Instruction::two_qubit_gate(StandardGate::CP(theta), last, target)],
        Some((&last, rest)) => {
            let half = theta / 2.0;
            let mut out = vec![Instruction::two_qubit_gate(StandardGate::CP(half), last, target)];
            out.extend(multi_controlled_x(rest, last));
            out.push(Instruction::two_qubit_gate(StandardGate::CP(-half), last, target));
            out.extend(multi_controlled_x(rest, last));
            out.extend(multi_controlled_phase(half, rest, target));
            out
        }
    }
}

/// Lower one instruction; instructions already within two qubits pass through.
pub fn lower(instruction: &Instruction) -> Vec<Instruction> {
    match &instruction.kind {
        InstructionKind::Gate(gate) => match (&gate.kind, instruction.qubits.as_slice()) {
            (StandardGate::CCX, &[c1, c2, t]) => toffoli(c1, c2, t),
            (StandardGate::CSwap, &[c, t1, t2]) => fredkin(c, t1, t2),
            _ => vec![instruction.clone()],
        },
        InstructionKind::Barrier => vec![instruction.clone()],
    }
}

/// Copy of `circuit` with every CCX and CSWAP lowered.
pub fn decompose_multi_qubit(circuit: &Circuit) -> IrResult<Circuit> {
    Circuit::from_instructions(
        circuit.name(),
        circuit.num_qubits() as u32,
        circuit.instructions().iter().flat_map(lower),
    )
}
