//! Versioned on-disk format for pre-built circuits.
//!
//! ```json
//! { "format": "qimg-circuit", "version": 1, "circuit": { ... } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};

/// Format tag written into every artifact.
pub const ARTIFACT_FORMAT: &str = "qimg-circuit";

/// Current artifact version.
pub const ARTIFACT_VERSION: u32 = 1;

/// A circuit wrapped with its format tag and version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitArtifact {
    /// Format tag, always [`ARTIFACT_FORMAT`].
    pub format: String,
    /// Format version.
    pub version: u32,
    /// The stored circuit.
    pub circuit: Circuit,
}

impl CircuitArtifact {
    /// Wrap a circuit in the current format.
    pub fn new(circuit: Circuit) -> Self {
        Self {
            format: ARTIFACT_FORMAT.into(),
            version: ARTIFACT_VERSION,
            circuit,
        }
    }

    /// Parse and check an artifact from JSON text.
    pub fn from_json(json: &str) -> IrResult<Self> {
        let artifact: Self = serde_json::from_str(json)?;
        if artifact.format != ARTIFACT_FORMAT || artifact.version != ARTIFACT_VERSION {
            return Err(IrError::UnsupportedArtifact {
                format: artifact.format,
                version: artifact.version,
            });
        }
        artifact.circuit.validate()?;
        Ok(artifact)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load the circuit stored at `path`.
pub fn load_circuit(path: &Path) -> IrResult<Circuit> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| IrError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let artifact = CircuitArtifact::from_json(&json)?;
    debug!(
        "Loaded circuit '{}' from {}: {} qubits, {} instructions",
        artifact.circuit.name(),
        path.display(),
        artifact.circuit.num_qubits(),
        artifact.circuit.instructions().len()
    );
    Ok(artifact.circuit)
}

/// Store `circuit` at `path` in the current artifact format.
pub fn save_circuit(circuit: &Circuit, path: &Path) -> IrResult<()> {
    let json = CircuitArtifact::new(circuit.clone()).to_json()?;
    std::fs::write(path, json)
        .map_err(|e| IrError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
