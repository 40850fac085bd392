//! Turn tallies into deterministically ordered summary rows.
//!
//! Legislator rows sort by name, bill rows by title, both case-insensitively
//! and tie-broken by id, so repeated runs over the same input produce
//! byte-identical output.

use serde::{Deserialize, Serialize};

use crate::aggregate::{BillTally, LegislatorTally, Tallies};
use crate::diagnostics::{Diagnostics, Issue};
use crate::error::{ReferenceKind, Result, TallyError};
use crate::index::ReferenceIndex;
use crate::types::{BillId, LegislatorId};

/// Sponsor name shown when a bill's sponsor is blank or unknown.
pub const UNKNOWN_SPONSOR: &str = "Unknown";

/// Which records without any tallied vote still get a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Emit zero-count rows for legislators who cast no classified vote.
    pub include_silent_legislators: bool,
    /// Emit zero-count rows for bills that received no classified vote.
    pub include_silent_bills: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_silent_legislators: false,
            include_silent_bills: true,
        }
    }
}

/// One row of the legislator summary output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegislatorSummaryRow {
    #[serde(rename = "id")]
    pub legislator_id: LegislatorId,
    #[serde(rename = "name")]
    pub legislator_name: String,
    pub num_supported_bills: usize,
    pub num_opposed_bills: usize,
}

/// One row of the bill summary output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSummaryRow {
    #[serde(rename = "id")]
    pub bill_id: BillId,
    #[serde(rename = "title")]
    pub bill_title: String,
    #[serde(rename = "supporter_count")]
    pub num_supporting: usize,
    #[serde(rename = "opposer_count")]
    pub num_opposing: usize,
    #[serde(rename = "primary_sponsor")]
    pub sponsor_name: String,
}

pub fn build_legislator_report(
    tallies: &Tallies,
    index: &ReferenceIndex,
    options: &ReportOptions,
) -> Result<Vec<LegislatorSummaryRow>> {
    let mut rows = Vec::with_capacity(tallies.legislators.len());
    for tally in tallies.legislators.values() {
        let name = index
            .legislator_name(tally.legislator_id)
            .ok_or(TallyError::MissingReference {
                kind: ReferenceKind::Legislator,
                id: tally.legislator_id,
            })?;
        rows.push(legislator_row(tally, name));
    }

    if options.include_silent_legislators {
        for legislator in index.legislators() {
            if !tallies.legislators.contains_key(&legislator.id) {
                let empty = LegislatorTally {
                    legislator_id: legislator.id,
                    num_supported_bills: 0,
                    num_opposed_bills: 0,
                };
                rows.push(legislator_row(&empty, &legislator.name));
            }
        }
    }

    rows.sort_by_cached_key(|r| (r.legislator_name.to_lowercase(), r.legislator_id));
    Ok(rows)
}

fn legislator_row(tally: &LegislatorTally, name: &str) -> LegislatorSummaryRow {
    LegislatorSummaryRow {
        legislator_id: tally.legislator_id,
        legislator_name: name.to_string(),
        num_supported_bills: tally.num_supported_bills,
        num_opposed_bills: tally.num_opposed_bills,
    }
}

/// Builds bill rows. Blank or dangling sponsors render as
/// [`UNKNOWN_SPONSOR`] and are recorded as `UnknownSponsor` issues.
pub fn build_bill_report(
    tallies: &Tallies,
    index: &ReferenceIndex,
    options: &ReportOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<BillSummaryRow>> {
    let mut rows = Vec::with_capacity(tallies.bills.len());
    for tally in tallies.bills.values() {
        let title = index
            .bill_title(tally.bill_id)
            .ok_or(TallyError::MissingReference {
                kind: ReferenceKind::Bill,
                id: tally.bill_id,
            })?;
        rows.push(bill_row(tally, title, index, diagnostics));
    }

    if options.include_silent_bills {
        for bill in index.bills() {
            if !tallies.bills.contains_key(&bill.id) {
                let empty = BillTally {
                    bill_id: bill.id,
                    sponsor_id: bill.sponsor_id,
                    num_supporting: 0,
                    num_opposing: 0,
                };
                rows.push(bill_row(&empty, &bill.title, index, diagnostics));
            }
        }
    }

    rows.sort_by_cached_key(|r| (r.bill_title.to_lowercase(), r.bill_id));
    Ok(rows)
}

fn bill_row(
    tally: &BillTally,
    title: &str,
    index: &ReferenceIndex,
    diagnostics: &mut Diagnostics,
) -> BillSummaryRow {
    let sponsor_name = match tally.sponsor_id.and_then(|id| index.legislator_name(id)) {
        Some(name) => name.to_string(),
        None => {
            diagnostics.record(Issue::UnknownSponsor {
                bill_id: tally.bill_id,
                sponsor_id: tally.sponsor_id,
            });
            UNKNOWN_SPONSOR.to_string()
        }
    };
    BillSummaryRow {
        bill_id: tally.bill_id,
        bill_title: title.to_string(),
        num_supporting: tally.num_supporting,
        num_opposing: tally.num_opposing,
        sponsor_name,
    }
}
