//! The `summarize` subcommand: write both summary CSVs.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use votetally_lib::summarize_dir;
use votetally_lib::writer::write_summaries;

use super::{print_issue_summary, TallyArgs};

pub const DEFAULT_LEGISLATOR_OUTPUT: &str = "data/output/legislators-support-oppose-count.csv";
pub const DEFAULT_BILL_OUTPUT: &str = "data/output/bills-summary.csv";

#[derive(Args)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub tally: TallyArgs,

    /// Output path for the legislator summary CSV
    #[arg(long, default_value = DEFAULT_LEGISLATOR_OUTPUT)]
    pub legislator_output: PathBuf,

    /// Output path for the bill summary CSV
    #[arg(long, default_value = DEFAULT_BILL_OUTPUT)]
    pub bill_output: PathBuf,
}

pub fn run(args: &SummarizeArgs) -> Result<()> {
    let options = args.tally.summary_options()?;
    let summary = summarize_dir(&args.tally.data_dir, &options)?;

    write_summaries(
        &args.legislator_output,
        &summary.legislators,
        &args.bill_output,
        &summary.bills,
    )?;

    println!(
        "Wrote {} legislator rows -> {}",
        summary.legislators.len(),
        args.legislator_output.display()
    );
    println!(
        "Wrote {} bill rows -> {}",
        summary.bills.len(),
        args.bill_output.display()
    );
    print_issue_summary(&summary.diagnostics);

    Ok(())
}
