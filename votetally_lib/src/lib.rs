//! Library layer for votetally: legislative vote summaries from CSV datasets.
//!
//! Loads legislators, bills, votes and vote results, joins them through a
//! reference index, classifies each vote result and tallies distinct
//! support/oppose positions per legislator and per bill. The resulting
//! reports are deterministic for a given input.

pub mod aggregate;
pub mod classify;
pub mod diagnostics;
pub mod enrich;
pub mod error;
pub mod index;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod writer;

pub use aggregate::{AggregateStats, Aggregator, ConflictPolicy, Tallies};
pub use classify::{VoteClassifier, VoteTypeError};
pub use diagnostics::{DataFile, Diagnostics, Issue};
pub use error::{Result, TallyError};
pub use index::ReferenceIndex;
pub use pipeline::{summarize_dir, summarize_records, Summary, SummaryOptions};
pub use report::{BillSummaryRow, LegislatorSummaryRow, ReportOptions};
pub use types::{Bill, Legislator, Records, Vote, VoteOutcome, VoteResult};
