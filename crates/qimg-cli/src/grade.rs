//! Grading run: load inputs, score both parts, print the summary line.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use qimg_adapter_sim::StatevectorSimulator;
use qimg_eval::export::{self, ExportConfig};
use qimg_eval::{Dataset, GradeConfig, Scorer};
use qimg_ir::load_circuit;

use crate::cli::Cli;

/// Resolve the effective configuration. Flags win over the file.
pub fn resolve_config(cli: &Cli) -> Result<GradeConfig> {
    let mut config = match &cli.config {
        Some(path) => GradeConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GradeConfig::default(),
    };
    if let Some(classifier) = &cli.classifier {
        config.classifier_path.clone_from(classifier);
    }
    Ok(config)
}

fn progress_bar() -> Result<ProgressBar> {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{msg:>14} [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    Ok(bar)
}

/// Execute the grading run.
pub fn execute(cli: &Cli, cli_args: &[String]) -> Result<()> {
    let config = resolve_config(cli)?;

    let classifier = load_circuit(&config.classifier_path).with_context(|| {
        format!(
            "Failed to load classifier {}",
            config.classifier_path.display()
        )
    })?;
    tracing::info!(
        "Classifier '{}': {} qubits, {} gates",
        classifier.name(),
        classifier.num_qubits(),
        classifier.gate_count()
    );

    let dataset = Dataset::load(Path::new(&cli.data_path))
        .with_context(|| format!("Failed to load dataset from {}", cli.data_path))?;

    let simulator = StatevectorSimulator::with_max_qubits(config.max_qubits);
    let bar = progress_bar()?;
    let observer = bar.clone();
    let scorer = Scorer::new(simulator, classifier, config)?.with_progress(move |p| {
        observer.set_length(p.total as u64);
        observer.set_message(p.pass.to_string());
        observer.set_position(p.completed as u64);
    });

    let report = scorer.run(&dataset, &cli.data_path, cli_args);
    bar.finish_and_clear();
    let report = report?;

    if let Some(path) = &cli.export {
        export::to_file(&report, path, &ExportConfig::default())
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        eprintln!(
            "{} Report written to {}",
            style("OK").green().bold(),
            path.display()
        );
    }

    println!("{}", report.summary_line());
    Ok(())
}
