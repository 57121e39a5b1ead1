pub mod apply;
pub mod completions;
pub mod scan;

use clap::{Parser, Subcommand};

/// retint - Recolour design documents in HSL space
#[derive(Parser, Debug)]
#[command(name = "retint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the colours used by a document's selection
    Scan(scan::ScanArgs),

    /// Recolour a document's selection
    Apply(apply::ApplyArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
