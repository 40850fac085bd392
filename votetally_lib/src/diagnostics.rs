//! Row-level conditions that are reported but never abort a run.
//!
//! Malformed rows, duplicate ids and dangling foreign keys are recovered
//! locally: the offending record is skipped (or overwritten) and an [`Issue`]
//! is recorded so the caller can surface it after the run.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::{BillId, LegislatorId, VoteId, VoteResultId};

/// The input file a condition was observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataFile {
    Legislators,
    Bills,
    Votes,
    VoteResults,
}

impl DataFile {
    pub const ALL: [DataFile; 4] = [
        DataFile::Bills,
        DataFile::Legislators,
        DataFile::Votes,
        DataFile::VoteResults,
    ];

    /// File name of the dataset inside the input directory.
    pub fn file_name(self) -> &'static str {
        match self {
            DataFile::Legislators => "legislators.csv",
            DataFile::Bills => "bills.csv",
            DataFile::Votes => "votes.csv",
            DataFile::VoteResults => "vote_results.csv",
        }
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Why a vote result could not be joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanReason {
    UnknownVote,
    UnknownLegislator,
}

/// A recoverable condition found while loading or aggregating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// A row did not match the dataset's fixed schema and was skipped.
    MalformedRow {
        file: DataFile,
        line: u64,
        reason: String,
    },
    /// Two primary records shared an id; the later one was kept.
    DuplicateKey { file: DataFile, id: i64 },
    /// A vote references a bill that does not exist.
    OrphanVote { vote_id: VoteId, bill_id: BillId },
    /// A vote result references a vote or legislator that does not resolve.
    OrphanVoteResult {
        vote_result_id: VoteResultId,
        vote_id: VoteId,
        legislator_id: LegislatorId,
        reason: OrphanReason,
    },
    /// A bill's sponsor is blank or not a known legislator.
    UnknownSponsor {
        bill_id: BillId,
        sponsor_id: Option<LegislatorId>,
    },
}

impl Issue {
    /// Short stable label used when summarising issues by kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Issue::MalformedRow { .. } => "malformed_row",
            Issue::DuplicateKey { .. } => "duplicate_key",
            Issue::OrphanVote { .. } => "orphan_vote",
            Issue::OrphanVoteResult { .. } => "orphan_vote_result",
            Issue::UnknownSponsor { .. } => "unknown_sponsor",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MalformedRow { file, line, reason } => {
                write!(f, "{}:{}: skipped malformed row: {}", file, line, reason)
            }
            Issue::DuplicateKey { file, id } => {
                write!(f, "{file}: duplicate id {id}, keeping the last occurrence")
            }
            Issue::OrphanVote { vote_id, bill_id } => {
                write!(f, "vote {vote_id} references unknown bill {bill_id}")
            }
            Issue::OrphanVoteResult {
                vote_result_id,
                vote_id,
                legislator_id,
                reason,
            } => match reason {
                OrphanReason::UnknownVote => write!(
                    f,
                    "vote result {} references unknown vote {}",
                    vote_result_id, vote_id
                ),
                OrphanReason::UnknownLegislator => write!(
                    f,
                    "vote result {} references unknown legislator {}",
                    vote_result_id, legislator_id
                ),
            },
            Issue::UnknownSponsor {
                bill_id,
                sponsor_id: Some(sponsor_id),
            } => write!(f, "bill {} has unknown sponsor {}", bill_id, sponsor_id),
            Issue::UnknownSponsor {
                bill_id,
                sponsor_id: None,
            } => write!(f, "bill {} has no sponsor", bill_id),
        }
    }
}

/// Collects issues for one run and logs each as it is recorded.
#[derive(Debug, Default)]
pub struct Diagnostics {
    issues: Vec<Issue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, issue: Issue) {
        tracing::warn!(kind = issue.kind(), "{}", issue);
        self.issues.push(issue);
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    /// Number of recorded issues per [`Issue::kind`], in label order.
    pub fn summary(&self) -> BTreeMap<&'static str, usize> {
        let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.kind()).or_default() += 1;
        }
        counts
    }
}
