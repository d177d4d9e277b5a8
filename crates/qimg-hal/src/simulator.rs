//! The simulator interface.

use qimg_ir::Circuit;

use crate::error::HalResult;
use crate::histogram::Histogram;

/// Something that turns a circuit into the exact probability distribution of
/// its final state.
///
/// # Contract
///
/// - Every qubit starts in |0⟩ and there is no noise or measurement sampling.
/// - The returned [`Histogram`] MUST sum to one within
///   [`crate::histogram::MASS_TOLERANCE`].
/// - States with negligible probability MAY be omitted.
/// - Circuits beyond the simulator's capacity MUST be rejected with
///   [`crate::HalError::CircuitTooLarge`] rather than attempted.
pub trait Simulator {
    /// Name of this simulator, used in logs and reports.
    fn name(&self) -> &str;

    /// Simulate `circuit` and return its basis-state probabilities.
    fn simulate(&self, circuit: &Circuit) -> HalResult<Histogram>;
}

impl<S: Simulator + ?Sized> Simulator for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn simulate(&self, circuit: &Circuit) -> HalResult<Histogram> {
        (**self).simulate(circuit)
    }
}
