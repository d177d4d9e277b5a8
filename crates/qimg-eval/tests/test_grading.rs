//! End-to-end grading tests against the statevector simulator.

use ndarray::{Array1, Array2, Array3, array};
use ndarray_npy::write_npy;
use proptest::prelude::*;
use std::path::Path;

use qimg_adapter_sim::StatevectorSimulator;
use qimg_eval::dataset::{IMAGES_FILE, LABELS_FILE};
use qimg_eval::export::{self, ExportConfig};
use qimg_eval::{
    Dataset, EncoderConfig, GradeConfig, HistogramDecoder, ImageEncoder, Label, Scorer,
    histogram_to_category,
};
use qimg_hal::{Histogram, Simulator};
use qimg_ir::{Circuit, QubitId, count_gates, load_circuit, save_circuit};

fn write_dataset(dir: &Path, images: &Array3<f64>, labels: &Array1<i64>) {
    write_npy(dir.join(IMAGES_FILE), images).unwrap();
    write_npy(dir.join(LABELS_FILE), labels).unwrap();
}

/// A classifier that always flips qubit 0, so black images read label 0.
fn flip_classifier(width: u32) -> Circuit {
    let mut circuit = Circuit::new("classifier", width);
    circuit.x(QubitId(0)).unwrap();
    circuit
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

#[test]
fn black_image_round_trip_is_black() {
    let encoder = ImageEncoder::new(EncoderConfig::default()).unwrap();
    let decoder = HistogramDecoder::new(EncoderConfig::default()).unwrap();
    let image = Array2::<f64>::zeros((28, 28));

    let circuit = encoder.encode(&image).unwrap();
    let histogram = StatevectorSimulator::new().simulate(&circuit).unwrap();
    let decoded = decoder.decode_image(&histogram, (28, 28)).unwrap();

    assert_eq!(histogram.len(), 4);
    assert!(decoded.iter().all(|&v| v.abs() < 1e-9));
}

#[test]
fn grid_sized_image_decodes_to_quantized_levels() {
    let encoder = ImageEncoder::new(EncoderConfig::default()).unwrap();
    let decoder = HistogramDecoder::new(EncoderConfig::default()).unwrap();
    let image = array![[255.0, 0.0], [128.0, 64.0]];

    let circuit = encoder.encode(&image).unwrap();
    assert!(count_gates(&circuit).is_ok());
    let histogram = StatevectorSimulator::new().simulate(&circuit).unwrap();
    let decoded = decoder.decode_image(&histogram, (2, 2)).unwrap();

    let expected = array![[255.0, 0.0], [8.0 * 17.0, 4.0 * 17.0]];
    for (got, want) in decoded.iter().zip(expected.iter()) {
        assert!((got - want).abs() < 1e-6, "{decoded:?}");
    }
}

#[test]
fn binary_encoding_matches_threshold() {
    let config = EncoderConfig {
        intensity_bits: 1,
        ..Default::default()
    };
    let encoder = ImageEncoder::new(config.clone()).unwrap();
    let decoder = HistogramDecoder::new(config).unwrap();
    let image = array![[0.0, 3.0], [0.0, 200.0]];

    let circuit = encoder.encode(&image).unwrap();
    assert_eq!(circuit.num_qubits(), 3);
    let histogram = StatevectorSimulator::new().simulate(&circuit).unwrap();
    let grid = decoder.decode_grid(&histogram).unwrap();
    assert_eq!(grid.mapv(|v| v.round()), array![[0.0, 1.0], [0.0, 1.0]]);
}

#[test]
fn single_image_reconstruct_and_classify() {
    let scorer = Scorer::new(
        StatevectorSimulator::new(),
        flip_classifier(1),
        GradeConfig::default(),
    )
    .unwrap();
    let image = array![[255.0, 255.0], [255.0, 0.0]];

    let (circuit, reconstructed) = scorer.reconstruct(&image).unwrap();
    assert_eq!(circuit.num_qubits(), scorer.encoder().num_qubits() as usize);
    for (got, want) in reconstructed.iter().zip(image.iter()) {
        assert!((got - want).abs() < 1e-6);
    }

    // Level 15 sets qubit 0 on three positions; after the flip P(q0 = 0) is 0.75.
    let (_, label) = scorer.classify(&image).unwrap();
    assert_eq!(label, Label::ONE);
}

// ---------------------------------------------------------------------------
// Full runs
// ---------------------------------------------------------------------------

#[test]
fn black_dataset_scores_one_on_both_parts() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(
        dir.path(),
        &Array3::zeros((4, 28, 28)),
        &Array1::zeros(4),
    );
    let classifier_path = dir.path().join("quantum_classifier.json");
    save_circuit(&flip_classifier(6), &classifier_path).unwrap();

    let config = GradeConfig {
        classifier_path: classifier_path.clone(),
        ..Default::default()
    };
    let classifier = load_circuit(&config.classifier_path).unwrap();
    let scorer = Scorer::new(StatevectorSimulator::new(), classifier, config).unwrap();
    let dataset = Dataset::load(dir.path()).unwrap();
    let report = scorer.run(&dataset, "fixtures", &[]).unwrap();

    assert_eq!(report.num_images, 4);
    assert_eq!(report.simulator, "statevector");
    assert_eq!(report.part1.mean_two_qubit_gates, 0.0);
    assert_eq!(report.part1.score, 1.0);
    assert_eq!(report.part2.accuracy, 1.0);
    assert_eq!(report.part2.score, 1.0);
    assert_eq!(report.summary_line(), "1.0,1.0,fixtures");
}

#[test]
fn bright_images_pay_gate_penalty() {
    let images = Array3::from_elem((2, 4, 4), 255.0);
    let dataset = Dataset::new(
        images.outer_iter().map(|i| i.to_owned()).collect(),
        vec![Label::ONE, Label::ONE],
    )
    .unwrap();

    // Classifier narrower than the encoder: it only touches qubit 0 and 1.
    let mut classifier = Circuit::new("classifier", 2);
    classifier.cx(QubitId(1), QubitId(0)).unwrap();

    let scorer = Scorer::new(StatevectorSimulator::new(), classifier, GradeConfig::default())
        .unwrap();
    let report = scorer.run(&dataset, ".", &[]).unwrap();

    // Level 15 on four cells: four Toffolis per cell, six CX each.
    assert_eq!(report.part1.mean_two_qubit_gates, 96.0);
    assert!(report.part1.mean_mse < 1e-9);
    assert!((report.part1.score - 0.999f64.powf(96.0)).abs() < 1e-9);

    // Qubits 0 and 1 are both 1, so the CX clears qubit 0 and the label is 1.
    assert_eq!(report.part2.correct, 2);
    assert_eq!(report.part2.mean_two_qubit_gates, 96.0);
}

#[test]
fn report_exports_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = Dataset::new(vec![Array2::zeros((2, 2))], vec![Label::ZERO]).unwrap();
    let scorer = Scorer::new(
        StatevectorSimulator::new(),
        flip_classifier(1),
        GradeConfig::default(),
    )
    .unwrap();
    let report = scorer.run(&dataset, ".", &["qimg-grade".into()]).unwrap();

    let path = dir.path().join("report.json");
    export::to_file(&report, &path, &ExportConfig::default()).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["part1"]["score"], 1.0);
    assert_eq!(json["reproducibility"]["cli_args"][0], "qimg-grade");

    let compact = export::to_json(&report, &ExportConfig { pretty: false }).unwrap();
    assert!(!compact.contains('\n'));
}

#[test]
fn classifier_too_wide_for_simulator_fails() {
    let dataset = Dataset::new(vec![Array2::zeros((2, 2))], vec![Label::ZERO]).unwrap();
    let scorer = Scorer::new(
        StatevectorSimulator::with_max_qubits(8),
        flip_classifier(9),
        GradeConfig::default(),
    )
    .unwrap();
    assert!(scorer.score_classification(&dataset).is_err());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn category_ignores_insertion_order(
        weights in prop::collection::vec((0u64..64, 0.01f64..1.0), 1..20)
    ) {
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        let forward = Histogram::from_pairs(weights.iter().map(|&(i, w)| (i, w / total)));
        let backward = Histogram::from_pairs(weights.iter().rev().map(|&(i, w)| (i, w / total)));

        let a = histogram_to_category(&forward).unwrap();
        let b = histogram_to_category(&backward).unwrap();
        prop_assert!((a - b).abs() < 1e-12);
        prop_assert!((-1e-12..=1.0 + 1e-12).contains(&a));
    }

    #[test]
    fn encoder_output_is_countable(values in prop::collection::vec(0.0f64..255.0, 16)) {
        let image = Array2::from_shape_vec((4, 4), values).unwrap();
        let encoder = ImageEncoder::new(EncoderConfig::default()).unwrap();
        let circuit = encoder.encode(&image).unwrap();
        let tally = count_gates(&circuit).unwrap();
        prop_assert_eq!(tally.get(3), 0);
    }
}
