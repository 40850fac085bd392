//! Id → record lookup tables for legislators and bills.

use std::collections::HashMap;

use crate::diagnostics::{DataFile, Diagnostics, Issue};
use crate::types::{Bill, BillId, Legislator, LegislatorId};

/// Builds the legislator lookup. Later records replace earlier ones with the
/// same id, and each replacement is recorded as a `DuplicateKey` issue.
pub fn index_legislators(
    records: &[Legislator],
    diagnostics: &mut Diagnostics,
) -> HashMap<LegislatorId, Legislator> {
    let mut map = HashMap::with_capacity(records.len());
    for legislator in records {
        if map.insert(legislator.id, legislator.clone()).is_some() {
            diagnostics.record(Issue::DuplicateKey {
                file: DataFile::Legislators,
                id: legislator.id,
            });
        }
    }
    map
}

/// Builds the bill lookup with the same duplicate policy as
/// [`index_legislators`].
pub fn index_bills(records: &[Bill], diagnostics: &mut Diagnostics) -> HashMap<BillId, Bill> {
    let mut map = HashMap::with_capacity(records.len());
    for bill in records {
        if map.insert(bill.id, bill.clone()).is_some() {
            diagnostics.record(Issue::DuplicateKey {
                file: DataFile::Bills,
                id: bill.id,
            });
        }
    }
    map
}

/// Read-only lookups built once per run and passed to the aggregator and
/// report builder.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    legislators: HashMap<LegislatorId, Legislator>,
    bills: HashMap<BillId, Bill>,
}

impl ReferenceIndex {
    pub fn build(
        legislators: &[Legislator],
        bills: &[Bill],
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let index = Self {
            legislators: index_legislators(legislators, diagnostics),
            bills: index_bills(bills, diagnostics),
        };
        tracing::debug!(
            legislators = index.legislator_count(),
            bills = index.bill_count(),
            "reference index built"
        );
        index
    }

    pub fn legislator(&self, id: LegislatorId) -> Option<&Legislator> {
        self.legislators.get(&id)
    }

    pub fn bill(&self, id: BillId) -> Option<&Bill> {
        self.bills.get(&id)
    }

    pub fn legislator_name(&self, id: LegislatorId) -> Option<&str> {
        self.legislator(id).map(|l| l.name.as_str())
    }

    pub fn bill_title(&self, id: BillId) -> Option<&str> {
        self.bill(id).map(|b| b.title.as_str())
    }

    pub fn legislators(&self) -> impl Iterator<Item = &Legislator> {
        self.legislators.values()
    }

    pub fn bills(&self) -> impl Iterator<Item = &Bill> {
        self.bills.values()
    }

    pub fn legislator_count(&self) -> usize {
        self.legislators.len()
    }

    pub fn bill_count(&self) -> usize {
        self.bills.len()
    }
}
