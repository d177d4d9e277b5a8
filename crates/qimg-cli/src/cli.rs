//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// qimg-grade: score a quantum image encoder and classifier.
#[derive(Parser, Debug)]
#[command(name = "qimg-grade")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding images.npy and labels.npy
    #[arg(default_value = ".")]
    pub data_path: String,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Classifier circuit artifact (overrides the config file)
    #[arg(long, env = "QIMG_CLASSIFIER")]
    pub classifier: Option<PathBuf>,

    /// JSON grading configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the full JSON score report here
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// `EnvFilter` directive for the verbosity count.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
