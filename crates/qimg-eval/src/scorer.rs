//! The two grading passes.
//!
//! ```text
//! image -> ImageEncoder -> Simulator -> HistogramDecoder -> image MSE      (part 1)
//! image -> ImageEncoder + classifier -> Simulator -> category -> match    (part 2)
//!            |
//!            +-> count_gates -> two-qubit penalty
//! ```

use ndarray::Array2;
use std::fmt;
use tracing::{debug, info, instrument};

use qimg_hal::Simulator;
use qimg_ir::{Circuit, count_gates};

use crate::config::GradeConfig;
use crate::dataset::Dataset;
use crate::decoder::{HistogramDecoder, Label, category_to_label, histogram_to_category};
use crate::encoder::ImageEncoder;
use crate::error::EvalResult;
use crate::metrics::{Accumulator, clip_score, gate_penalty, image_mse};
use crate::report::{ClassificationScore, ReconstructionScore, SCHEMA_VERSION, ScoreReport};
use crate::reproducibility::ReproducibilityInfo;

/// Which grading pass is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Part 1: image reconstruction.
    Reconstruction,
    /// Part 2: classification.
    Classification,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Reconstruction => write!(f, "reconstruction"),
            Pass::Classification => write!(f, "classification"),
        }
    }
}

/// Progress notification, sent after every image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreProgress {
    /// Current pass.
    pub pass: Pass,
    /// Images finished in this pass.
    pub completed: usize,
    /// Images in the dataset.
    pub total: usize,
}

type ProgressFn = Box<dyn Fn(&ScoreProgress)>;

/// Drives both grading passes over a dataset.
pub struct Scorer<S> {
    simulator: S,
    encoder: ImageEncoder,
    decoder: HistogramDecoder,
    classifier: Circuit,
    config: GradeConfig,
    progress: Option<ProgressFn>,
}

impl<S: Simulator> Scorer<S> {
    /// Create a scorer. The classifier is checked once here and reused for
    /// every image.
    pub fn new(simulator: S, classifier: Circuit, config: GradeConfig) -> EvalResult<Self> {
        config.validate()?;
        classifier.validate()?;
        Ok(Self {
            simulator,
            encoder: ImageEncoder::new(config.encoder.clone())?,
            decoder: HistogramDecoder::new(config.encoder.clone())?,
            classifier,
            config,
            progress: None,
        })
    }

    /// Call `observer` after every graded image.
    pub fn with_progress(mut self, observer: impl Fn(&ScoreProgress) + 'static) -> Self {
        self.progress = Some(Box::new(observer));
        self
    }

    /// The effective configuration.
    pub fn config(&self) -> &GradeConfig {
        &self.config
    }

    /// The image encoder.
    pub fn encoder(&self) -> &ImageEncoder {
        &self.encoder
    }

    fn notify(&self, pass: Pass, completed: usize, total: usize) {
        if let Some(observer) = &self.progress {
            observer(&ScoreProgress {
                pass,
                completed,
                total,
            });
        }
    }

    /// Encode, simulate and decode one image.
    ///
    /// Returns the encoder circuit and the reconstruction at the original shape.
    pub fn reconstruct(&self, image: &Array2<f64>) -> EvalResult<(Circuit, Array2<f64>)> {
        let circuit = self.encoder.encode(image)?;
        let reconstructed = self.decode(&circuit, image.dim())?;
        Ok((circuit, reconstructed))
    }

    fn decode(&self, circuit: &Circuit, shape: (usize, usize)) -> EvalResult<Array2<f64>> {
        let histogram = self.simulator.simulate(circuit)?;
        self.decoder.decode_image(&histogram, shape)
    }

    /// Encode one image, run the classifier on it and read out a label.
    ///
    /// Returns the encoder circuit (without the classifier) and the label.
    pub fn classify(&self, image: &Array2<f64>) -> EvalResult<(Circuit, Label)> {
        let circuit = self.encoder.encode(image)?;
        let label = self.read_label(&circuit)?;
        Ok((circuit, label))
    }

    fn read_label(&self, encoder_circuit: &Circuit) -> EvalResult<Label> {
        let combined = Circuit::stacked("encoder_classifier", encoder_circuit, &self.classifier)?;
        let histogram = self.simulator.simulate(&combined)?;
        let category = histogram_to_category(&histogram)?;
        debug!("Category probability {:.6}", category);
        Ok(category_to_label(category, self.config.label_threshold))
    }

    /// Part 1: `(1 - mean MSE) * base^mean two-qubit gates`.
    #[instrument(skip_all, fields(images = dataset.len()))]
    pub fn score_reconstruction(&self, dataset: &Dataset) -> EvalResult<ReconstructionScore> {
        let mut acc = Accumulator::default();
        for (i, image) in dataset.images().iter().enumerate() {
            let circuit = self.encoder.encode(image)?;
            let two_qubit = count_gates(&circuit)?.two_qubit();
            let reconstructed = self.decode(&circuit, image.dim())?;
            let mse = image_mse(image, &reconstructed, self.config.encoder.intensity_scale)?;
            acc.push(mse, two_qubit);
            self.notify(Pass::Reconstruction, i + 1, dataset.len());
        }

        let mean_mse = acc.mean_metric();
        let fidelity = 1.0 - mean_mse;
        let mean_two_qubit_gates = acc.mean_two_qubit_gates();
        let raw_score = fidelity * gate_penalty(self.config.gate_penalty_base, mean_two_qubit_gates);
        info!(
            "Part 1: mean MSE {:.6}, fidelity {:.6}, mean 2q gates {:.2}, score {:.6}",
            mean_mse, fidelity, mean_two_qubit_gates, raw_score
        );

        Ok(ReconstructionScore {
            mean_mse,
            fidelity,
            mean_two_qubit_gates,
            raw_score,
            score: clip_score("Part 1", raw_score),
        })
    }

    /// Part 2: `accuracy * base^mean two-qubit gates` of the encoder circuits.
    #[instrument(skip_all, fields(images = dataset.len()))]
    pub fn score_classification(&self, dataset: &Dataset) -> EvalResult<ClassificationScore> {
        let mut acc = Accumulator::default();
        for (i, (image, expected)) in dataset.iter().enumerate() {
            let circuit = self.encoder.encode(image)?;
            let two_qubit = count_gates(&circuit)?.two_qubit();
            let predicted = self.read_label(&circuit)?;
            let hit = if predicted == expected { 1.0 } else { 0.0 };
            acc.push(hit, two_qubit);
            self.notify(Pass::Classification, i + 1, dataset.len());
        }

        let accuracy = acc.mean_metric();
        let mean_two_qubit_gates = acc.mean_two_qubit_gates();
        let raw_score = accuracy * gate_penalty(self.config.gate_penalty_base, mean_two_qubit_gates);
        info!(
            "Part 2: accuracy {:.4}, mean 2q gates {:.2}, score {:.6}",
            accuracy, mean_two_qubit_gates, raw_score
        );

        Ok(ClassificationScore {
            correct: acc.metric_sum.round() as usize,
            accuracy,
            mean_two_qubit_gates,
            raw_score,
            score: clip_score("Part 2", raw_score),
        })
    }

    /// Run both passes and assemble the report.
    pub fn run(
        &self,
        dataset: &Dataset,
        data_path: &str,
        cli_args: &[String],
    ) -> EvalResult<ScoreReport> {
        info!(
            "Grading {} images with the {} simulator",
            dataset.len(),
            self.simulator.name()
        );
        let part1 = self.score_reconstruction(dataset)?;
        let part2 = self.score_classification(dataset)?;

        Ok(ScoreReport {
            schema_version: SCHEMA_VERSION.into(),
            timestamp: chrono::Utc::now(),
            data_path: data_path.to_string(),
            simulator: self.simulator.name().to_string(),
            num_images: dataset.len(),
            part1,
            part2,
            reproducibility: ReproducibilityInfo::capture(cli_args, &self.config),
        })
    }
}
