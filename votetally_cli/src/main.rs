mod commands;
mod output;
mod xml_output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "votetally", version)]
#[command(about = "Compute legislator and bill vote summaries or preview the input CSVs")]
struct Cli {
    /// Preview output format: table, json, csv, md, xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the legislator and bill summary CSVs
    Summarize(commands::summarize::SummarizeArgs),
    /// Show the first rows of an input dataset or a computed summary
    Preview(commands::preview::PreviewArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("votetally=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    match &cli.command {
        Commands::Summarize(args) => commands::summarize::run(args)?,
        Commands::Preview(args) => commands::preview::run(args, &format)?,
    }

    Ok(())
}
