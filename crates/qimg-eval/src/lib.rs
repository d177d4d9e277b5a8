//! qimg Grader: Quantum Image Encoding Scores
//!
//! This crate grades an image encoding scheme on two tasks and reports one score
//! for each:
//!
//! - **Part 1, reconstruction**: encode every image into a circuit, simulate it
//!   exactly, decode the histogram back to an image and compare.
//! - **Part 2, classification**: run the encoder circuit followed by a pre-trained
//!   classifier and read the label from qubit 0.
//!
//! Both scores are discounted by `0.999^g`, where `g` is the mean number of
//! two-qubit gates of the encoder circuits.
//!
//! # Architecture
//!
//! ```text
//! [images.npy, labels.npy] -> Dataset
//!                               |
//!                               v
//!                 ImageEncoder -> Simulator -> HistogramDecoder
//!                               |
//!                               v
//!                     Scorer (metrics, penalty, clipping)
//!                               |
//!                               v
//!                     ScoreReport -> summary line / JSON
//! ```
//!
//! # Example
//!
//! ```ignore
//! use qimg_adapter_sim::StatevectorSimulator;
//! use qimg_eval::{Dataset, GradeConfig, Scorer};
//!
//! let config = GradeConfig::default();
//! let classifier = qimg_ir::load_circuit(&config.classifier_path)?;
//! let simulator = StatevectorSimulator::with_max_qubits(config.max_qubits);
//! let scorer = Scorer::new(simulator, classifier, config)?;
//!
//! let dataset = Dataset::load(std::path::Path::new("."))?;
//! let report = scorer.run(&dataset, ".", &[])?;
//! println!("{}", report.summary_line());
//! ```

pub mod config;
pub mod dataset;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod export;
pub mod metrics;
pub mod report;
pub mod reproducibility;
pub mod scorer;

pub use config::{DEFAULT_CLASSIFIER_PATH, EncoderConfig, GradeConfig, MAX_SIMULATED_QUBITS};
pub use dataset::Dataset;
pub use decoder::{HistogramDecoder, Label, category_to_label, histogram_to_category};
pub use encoder::ImageEncoder;
pub use error::{EvalError, EvalResult};
pub use export::ExportConfig;
pub use metrics::{clip_score, gate_penalty, image_mse};
pub use report::{ClassificationScore, ReconstructionScore, ScoreReport};
pub use scorer::{Pass, ScoreProgress, Scorer};
