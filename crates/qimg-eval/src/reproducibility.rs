//! Reproducibility Module: CLI snapshots, versioning and configuration.
//!
//! Captures all information needed to reproduce a grading run.

use serde::{Deserialize, Serialize};

use crate::config::GradeConfig;
use crate::report::SCHEMA_VERSION;

/// Information for reproducing a grading run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproducibilityInfo {
    /// qimg version used.
    pub qimg_version: String,
    /// CLI arguments used for this run.
    pub cli_args: Vec<String>,
    /// Schema version of the output format.
    pub schema_version: String,
    /// Effective configuration.
    pub config: GradeConfig,
}

impl ReproducibilityInfo {
    /// Capture current reproducibility context.
    pub fn capture(cli_args: &[String], config: &GradeConfig) -> Self {
        Self {
            qimg_version: env!("CARGO_PKG_VERSION").to_string(),
            cli_args: cli_args.to_vec(),
            schema_version: SCHEMA_VERSION.into(),
            config: config.clone(),
        }
    }
}
