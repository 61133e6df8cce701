//! Paraquery CLI Module
//! Command-line interface for the comparison tool

pub mod formatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "paraquery")]
#[command(version)]
#[command(about = "Side-by-side SQL vs document-store query comparison", long_about = None)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed the sample records and run the full comparison sequence
    Run,

    /// Insert the sample records into both backends
    Seed,

    /// Show configuration and record counts for both backends
    Status,
}

impl Cli {
    pub fn get_project_dir(&self) -> PathBuf {
        self.project
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
