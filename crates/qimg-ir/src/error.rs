//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not present in the circuit.
    #[error("Qubit {qubit} not found in {num_qubits}-qubit circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Width of the circuit.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A rotation angle is NaN or infinite.
    #[error("Gate '{gate_name}' has a non-finite angle")]
    NonFiniteParameter {
        /// Name of the offending gate.
        gate_name: String,
    },

    /// A gate acts on more qubits than the counting policy allows.
    #[error("Gate '{gate_name}' acts on {arity} qubits; only 1- and 2-qubit gates are allowed")]
    ForbiddenArity {
        /// Name of the offending gate.
        gate_name: String,
        /// Its operand count.
        arity: u32,
    },

    /// Circuit artifact has an unknown format tag or version.
    #[error("Unsupported circuit artifact: format '{format}' version {version}")]
    UnsupportedArtifact {
        /// Format tag found in the artifact.
        format: String,
        /// Version found in the artifact.
        version: u32,
    },

    /// Artifact (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while reading or writing an artifact.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_not_found_display() {
        let err = IrError::QubitNotFound {
            qubit: QubitId(7),
            num_qubits: 6,
            gate_name: Some("cx".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("q7"));
        assert!(msg.contains("6-qubit"));
        assert!(msg.contains("(gate: cx)"));
    }

    #[test]
    fn test_forbidden_arity_display() {
        let err = IrError::ForbiddenArity {
            gate_name: "ccx".into(),
            arity: 3,
        };
        assert!(err.to_string().contains("ccx"));
        assert!(err.to_string().contains('3'));
    }
}
