//! qimg Circuit Representation
//!
//! This crate provides the circuit data structures shared by the image encoder,
//! the simulator and the grader.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses one qubit; qubit `k` is bit `k` of a basis index
//! - **Gates**: [`StandardGate`] for the built-in gate set
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder with operand validation and composition
//! - **Tallies**: [`count_gates`] counts gates per operand count and refuses
//!   anything wider than two qubits
//! - **Lowering**: [`decompose_multi_qubit`] rewrites CCX and CSWAP into 1- and
//!   2-qubit gates
//! - **Artifacts**: [`load_circuit`] and [`save_circuit`] for the versioned JSON
//!   format pre-built circuits are shipped in
//!
//! # Example: Counting a Bell State
//!
//! ```rust
//! use qimg_ir::{Circuit, QubitId, count_gates};
//!
//! let mut circuit = Circuit::new("bell_state", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let tally = count_gates(&circuit).unwrap();
//! assert_eq!(tally.get(1), 1);
//! assert_eq!(tally.two_qubit(), 1);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `SX`, `SXdg` | 1 | Square root of X |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `U` | 1 | Universal single-qubit gate U(θ,φ,λ) |
//! | `CX`, `CY`, `CZ`, `CH` | 2 | Controlled Paulis and Hadamard |
//! | `CRy`, `CRz`, `CP` | 2 | Controlled rotations |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX`, `CSwap` | 3 | Toffoli and Fredkin (must be lowered before counting) |

pub mod artifact;
pub mod circuit;
pub mod decompose;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod tally;

pub use artifact::{ARTIFACT_FORMAT, ARTIFACT_VERSION, CircuitArtifact, load_circuit, save_circuit};
pub use circuit::Circuit;
pub use decompose::{
    TOFFOLI_CX_COST, decompose_multi_qubit, fredkin, multi_controlled_phase, multi_controlled_x,
    toffoli,
};
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::QubitId;
pub use tally::{GateTally, MAX_GATE_ARITY, count_gates};
