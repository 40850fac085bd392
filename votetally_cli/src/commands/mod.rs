//! CLI subcommand implementations.

pub mod preview;
pub mod summarize;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use votetally_lib::{ConflictPolicy, Diagnostics, ReportOptions, SummaryOptions, VoteClassifier};

pub const DEFAULT_DATA_DIR: &str = "data/input";

/// Options shared by every command that computes summaries.
#[derive(Args)]
pub struct TallyArgs {
    /// Directory containing bills.csv, legislators.csv, votes.csv and vote_results.csv
    #[arg(long, env = "VOTETALLY_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// YAML file mapping vote_type codes to support/oppose (replaces the built-in table)
    #[arg(long, env = "VOTETALLY_VOTE_TYPES")]
    pub vote_types: Option<PathBuf>,

    /// Which vote counts when a legislator votes more than once on a bill
    #[arg(long, value_enum, default_value = "last")]
    pub on_conflict: ConflictArg,

    /// Also list legislators who cast no support/oppose vote
    #[arg(long)]
    pub include_silent_legislators: bool,

    /// Leave out bills that received no support/oppose vote
    #[arg(long)]
    pub omit_silent_bills: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ConflictArg {
    First,
    Last,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::First => ConflictPolicy::FirstWins,
            ConflictArg::Last => ConflictPolicy::LastWins,
        }
    }
}

impl TallyArgs {
    pub fn summary_options(&self) -> Result<SummaryOptions> {
        let classifier = match &self.vote_types {
            Some(path) => VoteClassifier::from_path(path)
                .with_context(|| format!("loading vote types from {}", path.display()))?,
            None => VoteClassifier::load_default()?,
        };
        Ok(SummaryOptions {
            conflict_policy: self.on_conflict.into(),
            report: ReportOptions {
                include_silent_legislators: self.include_silent_legislators,
                include_silent_bills: !self.omit_silent_bills,
            },
            classifier,
        })
    }
}

/// Prints a per-kind count of recovered input problems to stderr.
pub fn print_issue_summary(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!(
        "{} input problem(s) were skipped or flagged:",
        diagnostics.len()
    );
    for (kind, count) in diagnostics.summary() {
        eprintln!("  {:<20} {}", kind, count);
    }
}
