//! qimg Simulator Abstraction
//!
//! This crate defines the seam between circuit producers and the code that
//! executes circuits:
//!
//! - A common [`Simulator`] trait mapping a [`qimg_ir::Circuit`] to a [`Histogram`]
//! - [`Histogram`], the exact probability of every basis state
//! - [`HalError`] for everything that can go wrong on the way
//!
//! # Implementing a Simulator
//!
//! ```rust
//! use qimg_hal::{HalResult, Histogram, Simulator};
//! use qimg_ir::Circuit;
//!
//! /// Pretends every circuit leaves the register in |0...0⟩.
//! struct Idle;
//!
//! impl Simulator for Idle {
//!     fn name(&self) -> &str { "idle" }
//!
//!     fn simulate(&self, _circuit: &Circuit) -> HalResult<Histogram> {
//!         Ok(Histogram::from_pairs([(0, 1.0)]))
//!     }
//! }
//!
//! let histogram = Idle.simulate(&Circuit::new("empty", 3)).unwrap();
//! assert!(histogram.validate().is_ok());
//! ```

pub mod error;
pub mod histogram;
pub mod simulator;

pub use error::{HalError, HalResult};
pub use histogram::{Histogram, MASS_TOLERANCE};
pub use simulator::Simulator;
