use clap::Parser;
use miette::Result;
use retint::cli::{Cli, Commands};
use retint::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("RETINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Scan(args) => retint::cli::scan::run(args, &printer)?,
        Commands::Apply(args) => retint::cli::apply::run(args, &printer)?,
        Commands::Completions(args) => retint::cli::completions::run(args)?,
    }

    Ok(())
}
