//! Public entry point: load → index → aggregate → build report.

use std::path::Path;

use crate::aggregate::{AggregateStats, Aggregator, ConflictPolicy};
use crate::classify::VoteClassifier;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::index::ReferenceIndex;
use crate::loader;
use crate::report::{self, BillSummaryRow, LegislatorSummaryRow, ReportOptions};
use crate::types::Records;

/// Knobs for one summary run.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub conflict_policy: ConflictPolicy,
    pub report: ReportOptions,
    pub classifier: VoteClassifier,
}

impl SummaryOptions {
    /// Default policies with the embedded vote-type table.
    pub fn with_default_classifier() -> Result<Self> {
        Ok(Self {
            conflict_policy: ConflictPolicy::default(),
            report: ReportOptions::default(),
            classifier: VoteClassifier::load_default()?,
        })
    }
}

/// Both reports plus everything observed while producing them.
#[derive(Debug)]
pub struct Summary {
    pub legislators: Vec<LegislatorSummaryRow>,
    pub bills: Vec<BillSummaryRow>,
    pub stats: AggregateStats,
    pub diagnostics: Diagnostics,
}

/// Summarizes records that are already in memory. Issues found along the
/// way are appended to `diagnostics`, which ends up in the returned summary.
pub fn summarize_records(
    records: &Records,
    options: &SummaryOptions,
    mut diagnostics: Diagnostics,
) -> Result<Summary> {
    let index = ReferenceIndex::build(&records.legislators, &records.bills, &mut diagnostics);
    let aggregator = Aggregator::new(&index, &options.classifier, options.conflict_policy);
    let tallies = aggregator.aggregate(&records.votes, &records.vote_results, &mut diagnostics);
    let legislators = report::build_legislator_report(&tallies, &index, &options.report)?;
    let bills = report::build_bill_report(&tallies, &index, &options.report, &mut diagnostics)?;
    Ok(Summary {
        legislators,
        bills,
        stats: tallies.stats,
        diagnostics,
    })
}

/// Loads the four CSV inputs from `data_dir` and summarizes them.
pub fn summarize_dir(data_dir: &Path, options: &SummaryOptions) -> Result<Summary> {
    let mut diagnostics = Diagnostics::new();
    let records = loader::load_records(data_dir, &mut diagnostics)?;
    summarize_records(&records, options, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DataFile, Issue};
    use crate::types::{Bill, Legislator, Vote, VoteResult};

    fn legislator(id: i64, name: &str) -> Legislator {
        Legislator {
            id,
            name: name.to_string(),
        }
    }

    fn result(id: i64, legislator_id: i64, vote_type: &str) -> VoteResult {
        VoteResult {
            id,
            vote_id: 100,
            legislator_id,
            vote_type: vote_type.to_string(),
        }
    }

    fn scenario_a() -> Records {
        Records {
            legislators: vec![legislator(1, "Alice"), legislator(2, "Bob")],
            bills: vec![Bill {
                id: 10,
                title: "Act A".to_string(),
                sponsor_id: Some(1),
            }],
            votes: vec![Vote {
                id: 100,
                bill_id: 10,
            }],
            vote_results: vec![result(1000, 1, "SUPPORT"), result(1001, 2, "OPPOSE")],
        }
    }

    #[test]
    fn test_scenario_a() {
        let options = SummaryOptions::with_default_classifier().unwrap();
        let summary = summarize_records(&scenario_a(), &options, Diagnostics::new()).unwrap();

        assert_eq!(
            summary.legislators,
            vec![
                LegislatorSummaryRow {
                    legislator_id: 1,
                    legislator_name: "Alice".to_string(),
                    num_supported_bills: 1,
                    num_opposed_bills: 0,
                },
                LegislatorSummaryRow {
                    legislator_id: 2,
                    legislator_name: "Bob".to_string(),
                    num_supported_bills: 0,
                    num_opposed_bills: 1,
                },
            ]
        );
        assert_eq!(
            summary.bills,
            vec![BillSummaryRow {
                bill_id: 10,
                bill_title: "Act A".to_string(),
                num_supporting: 1,
                num_opposing: 1,
                sponsor_name: "Alice".to_string(),
            }]
        );
        assert_eq!(summary.stats.positions, 2);
        assert!(summary.diagnostics.is_empty());
    }

    #[test]
    fn test_scenario_c_unknown_legislator() {
        let mut records = scenario_a();
        records.vote_results.push(result(1002, 42, "1"));
        let options = SummaryOptions::with_default_classifier().unwrap();
        let summary = summarize_records(&records, &options, Diagnostics::new()).unwrap();

        assert_eq!(summary.legislators.len(), 2);
        assert_eq!(summary.bills[0].num_supporting, 1);
        assert_eq!(
            summary.diagnostics.summary().get("orphan_vote_result"),
            Some(&1)
        );
    }

    #[test]
    fn test_summary_keeps_issues_recorded_before_aggregation() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record(Issue::MalformedRow {
            file: DataFile::Legislators,
            line: 3,
            reason: "invalid digit found in string".to_string(),
        });
        let options = SummaryOptions::with_default_classifier().unwrap();
        let summary = summarize_records(&scenario_a(), &options, diagnostics).unwrap();

        assert_eq!(summary.diagnostics.len(), 1);
        assert_eq!(summary.diagnostics.summary().get("malformed_row"), Some(&1));
    }
}
