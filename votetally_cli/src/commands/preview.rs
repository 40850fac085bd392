//! The `preview` subcommand: show the first rows of an input dataset or of a
//! computed summary.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use votetally_lib::enrich::{enrich_table, lookups_required, PreviewLookups};
use votetally_lib::loader::{self, data_path, read_raw_table, require_files};
use votetally_lib::{summarize_dir, DataFile, Diagnostics, ReferenceIndex};

use super::TallyArgs;
use crate::output::{print_bill_summary, print_legislator_summary, print_raw_table, OutputFormat};

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub tally: TallyArgs,

    /// Dataset to preview; prompts interactively when omitted
    #[arg(long, short = 'c', value_enum)]
    pub category: Option<PreviewCategory>,

    /// Number of rows to display
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub limit: u16,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PreviewCategory {
    Bills,
    Legislators,
    Votes,
    #[value(alias = "vote_results")]
    VoteResults,
    #[value(alias = "legislator_summary")]
    LegislatorSummary,
    #[value(alias = "bill_summary")]
    BillSummary,
}

impl PreviewCategory {
    const MENU: [PreviewCategory; 6] = [
        PreviewCategory::Bills,
        PreviewCategory::Legislators,
        PreviewCategory::Votes,
        PreviewCategory::VoteResults,
        PreviewCategory::LegislatorSummary,
        PreviewCategory::BillSummary,
    ];

    fn label(self) -> &'static str {
        match self {
            PreviewCategory::Bills => "Bills (bills.csv)",
            PreviewCategory::Legislators => "Legislators (legislators.csv)",
            PreviewCategory::Votes => "Votes (votes.csv)",
            PreviewCategory::VoteResults => "Vote Results (vote_results.csv)",
            PreviewCategory::LegislatorSummary => "Legislator summary (computed)",
            PreviewCategory::BillSummary => "Bill summary (computed)",
        }
    }

    fn data_file(self) -> Option<DataFile> {
        match self {
            PreviewCategory::Bills => Some(DataFile::Bills),
            PreviewCategory::Legislators => Some(DataFile::Legislators),
            PreviewCategory::Votes => Some(DataFile::Votes),
            PreviewCategory::VoteResults => Some(DataFile::VoteResults),
            PreviewCategory::LegislatorSummary | PreviewCategory::BillSummary => None,
        }
    }
}

/// Shows a numbered menu on `out` and reads the choice from `input`.
/// Accepts a menu number or a category name; blank input or EOF selects
/// nothing.
pub fn prompt_category<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<PreviewCategory>> {
    writeln!(out, "Pick a dataset to preview:")?;
    for (idx, category) in PreviewCategory::MENU.iter().enumerate() {
        writeln!(out, "  {}) {}", idx + 1, category.label())?;
    }

    loop {
        write!(out, "Choice [1-{}]: ", PreviewCategory::MENU.len())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let choice = line.trim();
        if choice.is_empty() {
            return Ok(None);
        }
        if let Ok(n) = choice.parse::<usize>() {
            if let Some(category) = n.checked_sub(1).and_then(|i| PreviewCategory::MENU.get(i)) {
                return Ok(Some(*category));
            }
        } else if let Ok(category) = PreviewCategory::from_str(choice, true) {
            return Ok(Some(category));
        }
        writeln!(out, "Unknown choice '{}'", choice)?;
    }
}

pub fn run(args: &PreviewArgs, format: &OutputFormat) -> Result<()> {
    let category = match args.category {
        Some(category) => category,
        None => {
            let stdin = io::stdin();
            match prompt_category(&mut stdin.lock(), &mut io::stderr())? {
                Some(category) => category,
                None => bail!("No category selected, exiting."),
            }
        }
    };
    let limit = usize::from(args.limit);

    match category.data_file() {
        Some(file) => preview_dataset(args, file, limit, format),
        None => preview_summary(args, category, limit, format),
    }
}

fn preview_dataset(
    args: &PreviewArgs,
    file: DataFile,
    limit: usize,
    format: &OutputFormat,
) -> Result<()> {
    let data_dir = &args.tally.data_dir;
    let mut table = read_raw_table(&data_path(data_dir, file), limit)?;
    if table.is_empty() {
        eprintln!("No rows found in {}.", file);
        return Ok(());
    }

    let required = lookups_required(file);
    require_files(data_dir, required)?;
    let mut diagnostics = Diagnostics::new();
    let legislators = if required.contains(&DataFile::Legislators) {
        loader::load_legislators(data_dir, &mut diagnostics)?
    } else {
        Vec::new()
    };
    let bills = if required.contains(&DataFile::Bills) {
        loader::load_bills(data_dir, &mut diagnostics)?
    } else {
        Vec::new()
    };
    let votes = if required.contains(&DataFile::Votes) {
        loader::load_votes(data_dir, &mut diagnostics)?
    } else {
        Vec::new()
    };
    let index = ReferenceIndex::build(&legislators, &bills, &mut diagnostics);
    enrich_table(&mut table, file, &PreviewLookups::new(index, &votes));

    eprintln!("First {} rows from {}", table.rows.len(), file);
    print_raw_table(&table, format)
}

fn preview_summary(
    args: &PreviewArgs,
    category: PreviewCategory,
    limit: usize,
    format: &OutputFormat,
) -> Result<()> {
    let options = args.tally.summary_options()?;
    let mut summary = summarize_dir(&args.tally.data_dir, &options)?;

    match category {
        PreviewCategory::LegislatorSummary => {
            summary.legislators.truncate(limit);
            eprintln!(
                "{} (first {} rows)",
                category.label(),
                summary.legislators.len()
            );
            print_legislator_summary(&summary.legislators, format)
        }
        _ => {
            summary.bills.truncate(limit);
            eprintln!("{} (first {} rows)", category.label(), summary.bills.len());
            print_bill_summary(&summary.bills, format)
        }
    }
}
