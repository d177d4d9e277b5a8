//! qimg-grade: grading harness for quantum image encoders.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod cli;
mod grade;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the score line.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_filter()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli_args: Vec<String> = std::env::args().collect();
    if let Err(e) = grade::execute(&cli, &cli_args) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
