//! Record types for the four input datasets and the derived vote outcome.

use serde::Deserialize;

pub type LegislatorId = i64;
pub type BillId = i64;
pub type VoteId = i64;
pub type VoteResultId = i64;

/// A member of the legislature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Legislator {
    pub id: LegislatorId,
    pub name: String,
}

/// A bill and its primary sponsor.
///
/// The sponsor column is optional in the source data, and older exports name
/// it `Primary Sponsor` or `primary_sponsor` rather than `sponsor_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub title: String,
    #[serde(default, alias = "primary_sponsor", alias = "Primary Sponsor")]
    pub sponsor_id: Option<LegislatorId>,
}

/// One roll-call event on a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub bill_id: BillId,
}

/// One legislator's recorded position in one roll-call event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoteResult {
    pub id: VoteResultId,
    pub vote_id: VoteId,
    pub legislator_id: LegislatorId,
    pub vote_type: String,
}

/// Classified position of a single vote result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    Support,
    Oppose,
    Other,
}

/// All four datasets held in memory for one run.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub legislators: Vec<Legislator>,
    pub bills: Vec<Bill>,
    pub votes: Vec<Vote>,
    pub vote_results: Vec<VoteResult>,
}
