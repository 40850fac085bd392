//! Friendly columns for raw dataset previews.
//!
//! Raw rows carry only foreign-key ids; previews append the names and titles
//! those ids point at. Anything that does not resolve renders as `Unknown`.

use std::collections::HashMap;

use crate::diagnostics::DataFile;
use crate::index::ReferenceIndex;
use crate::loader::RawTable;
use crate::types::{BillId, Vote, VoteId};

const UNKNOWN: &str = "Unknown";
const SPONSOR_COLUMNS: [&str; 3] = ["sponsor_id", "primary_sponsor", "Primary Sponsor"];

/// Lookups needed to enrich any raw dataset.
#[derive(Debug, Clone, Default)]
pub struct PreviewLookups {
    pub index: ReferenceIndex,
    pub vote_bills: HashMap<VoteId, BillId>,
}

impl PreviewLookups {
    pub fn new(index: ReferenceIndex, votes: &[Vote]) -> Self {
        Self {
            index,
            vote_bills: votes.iter().map(|v| (v.id, v.bill_id)).collect(),
        }
    }

    fn legislator_name(&self, id: Option<i64>) -> String {
        id.and_then(|id| self.index.legislator_name(id))
            .unwrap_or(UNKNOWN)
            .to_string()
    }

    fn bill_title(&self, id: Option<BillId>) -> String {
        id.and_then(|id| self.index.bill_title(id))
            .unwrap_or(UNKNOWN)
            .to_string()
    }
}

/// Datasets whose enrichment needs the given lookups loaded.
pub fn lookups_required(file: DataFile) -> &'static [DataFile] {
    match file {
        DataFile::Bills => &[DataFile::Legislators],
        DataFile::Votes => &[DataFile::Bills],
        DataFile::VoteResults => &[DataFile::Legislators, DataFile::Bills, DataFile::Votes],
        DataFile::Legislators => &[],
    }
}

fn parse_id(row: &[String], column: Option<usize>) -> Option<i64> {
    column
        .and_then(|idx| row.get(idx))
        .and_then(|cell| cell.trim().parse().ok())
}

fn push_column(table: &mut RawTable, name: &str, values: Vec<String>) {
    let existing = table.column(name);
    for (row, value) in table.rows.iter_mut().zip(values) {
        match existing {
            Some(idx) if idx < row.len() => row[idx] = value,
            Some(idx) => {
                row.resize(idx, String::new());
                row.push(value);
            }
            None => row.push(value),
        }
    }
    if existing.is_none() {
        table.headers.push(name.to_string());
    }
}

/// Appends the friendly columns for `file` to `table`.
pub fn enrich_table(table: &mut RawTable, file: DataFile, lookups: &PreviewLookups) {
    match file {
        DataFile::Bills => {
            let sponsor_col = SPONSOR_COLUMNS.iter().find_map(|c| table.column(c));
            let names = table
                .rows
                .iter()
                .map(|row| lookups.legislator_name(parse_id(row, sponsor_col)))
                .collect();
            push_column(table, "sponsor_name", names);
        }
        DataFile::Votes => {
            let bill_col = table.column("bill_id");
            let titles = table
                .rows
                .iter()
                .map(|row| lookups.bill_title(parse_id(row, bill_col)))
                .collect();
            push_column(table, "bill_title", titles);
        }
        DataFile::VoteResults => {
            let legislator_col = table.column("legislator_id");
            let vote_col = table.column("vote_id");
            let mut names = Vec::with_capacity(table.rows.len());
            let mut bill_ids = Vec::with_capacity(table.rows.len());
            let mut titles = Vec::with_capacity(table.rows.len());
            for row in &table.rows {
                names.push(lookups.legislator_name(parse_id(row, legislator_col)));
                let bill_id = parse_id(row, vote_col)
                    .and_then(|vote_id| lookups.vote_bills.get(&vote_id).copied());
                bill_ids.push(bill_id.map(|id| id.to_string()).unwrap_or_default());
                titles.push(lookups.bill_title(bill_id));
            }
            push_column(table, "legislator_name", names);
            push_column(table, "bill_id", bill_ids);
            push_column(table, "bill_title", titles);
        }
        DataFile::Legislators => {}
    }
}
