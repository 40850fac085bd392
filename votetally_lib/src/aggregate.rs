//! Join vote results to bills and legislators and tally distinct positions.
//!
//! Every (legislator, bill) pair resolves to exactly one position no matter
//! how many roll calls on that bill the legislator took part in. Which of
//! several conflicting positions survives is governed by [`ConflictPolicy`].

use std::collections::{BTreeMap, HashMap};

use crate::classify::VoteClassifier;
use crate::diagnostics::{DataFile, Diagnostics, Issue, OrphanReason};
use crate::index::ReferenceIndex;
use crate::types::{BillId, LegislatorId, Vote, VoteId, VoteOutcome, VoteResult};

/// Which classified vote wins when a legislator votes more than once on the
/// same bill. Results are processed in input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// The first classified vote on the bill is kept; later ones are ignored.
    FirstWins,
    /// The most recent classified vote on the bill replaces earlier ones.
    #[default]
    LastWins,
}

/// Per-legislator counts of distinct bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegislatorTally {
    pub legislator_id: LegislatorId,
    pub num_supported_bills: usize,
    pub num_opposed_bills: usize,
}

/// Per-bill counts of distinct legislators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillTally {
    pub bill_id: BillId,
    pub sponsor_id: Option<LegislatorId>,
    pub num_supporting: usize,
    pub num_opposing: usize,
}

/// Counters describing one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Vote results examined.
    pub results_seen: usize,
    /// Results that resolved and classified as support or oppose.
    pub results_classified: usize,
    /// Results that resolved but classified as `Other`.
    pub results_other: usize,
    /// Results excluded because a reference did not resolve.
    pub results_skipped: usize,
    /// Distinct (legislator, bill) positions that were tallied.
    pub positions: usize,
}

/// Output of [`Aggregator::aggregate`]. Only legislators and bills with at
/// least one resolvable, classified vote result are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tallies {
    pub legislators: BTreeMap<LegislatorId, LegislatorTally>,
    pub bills: BTreeMap<BillId, BillTally>,
    pub stats: AggregateStats,
}

pub struct Aggregator<'a> {
    index: &'a ReferenceIndex,
    classifier: &'a VoteClassifier,
    policy: ConflictPolicy,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        index: &'a ReferenceIndex,
        classifier: &'a VoteClassifier,
        policy: ConflictPolicy,
    ) -> Self {
        Self {
            index,
            classifier,
            policy,
        }
    }

    /// Maps each vote id to its bill, dropping votes whose bill is unknown.
    fn resolve_votes(
        &self,
        votes: &[Vote],
        diagnostics: &mut Diagnostics,
    ) -> HashMap<VoteId, BillId> {
        let mut vote_bills = HashMap::with_capacity(votes.len());
        for vote in votes {
            if self.index.bill(vote.bill_id).is_none() {
                diagnostics.record(Issue::OrphanVote {
                    vote_id: vote.id,
                    bill_id: vote.bill_id,
                });
                vote_bills.remove(&vote.id);
                continue;
            }
            if vote_bills.insert(vote.id, vote.bill_id).is_some() {
                diagnostics.record(Issue::DuplicateKey {
                    file: DataFile::Votes,
                    id: vote.id,
                });
            }
        }
        vote_bills
    }

    pub fn aggregate(
        &self,
        votes: &[Vote],
        vote_results: &[VoteResult],
        diagnostics: &mut Diagnostics,
    ) -> Tallies {
        let vote_bills = self.resolve_votes(votes, diagnostics);
        let mut stats = AggregateStats::default();
        let mut positions: BTreeMap<(LegislatorId, BillId), VoteOutcome> = BTreeMap::new();

        for result in vote_results {
            stats.results_seen += 1;

            let Some(&bill_id) = vote_bills.get(&result.vote_id) else {
                stats.results_skipped += 1;
                diagnostics.record(orphan(result, OrphanReason::UnknownVote));
                continue;
            };
            if self.index.legislator(result.legislator_id).is_none() {
                stats.results_skipped += 1;
                diagnostics.record(orphan(result, OrphanReason::UnknownLegislator));
                continue;
            }

            let outcome = self.classifier.classify(&result.vote_type);
            if outcome == VoteOutcome::Other {
                stats.results_other += 1;
                continue;
            }
            stats.results_classified += 1;

            let key = (result.legislator_id, bill_id);
            match self.policy {
                ConflictPolicy::FirstWins => {
                    positions.entry(key).or_insert(outcome);
                }
                ConflictPolicy::LastWins => {
                    positions.insert(key, outcome);
                }
            }
        }

        let mut tallies = Tallies::default();
        for (&(legislator_id, bill_id), &outcome) in &positions {
            let legislator = tallies
                .legislators
                .entry(legislator_id)
                .or_insert(LegislatorTally {
                    legislator_id,
                    num_supported_bills: 0,
                    num_opposed_bills: 0,
                });
            let sponsor_id = self.index.bill(bill_id).and_then(|b| b.sponsor_id);
            let bill = tallies.bills.entry(bill_id).or_insert(BillTally {
                bill_id,
                sponsor_id,
                num_supporting: 0,
                num_opposing: 0,
            });
            match outcome {
                VoteOutcome::Support => {
                    legislator.num_supported_bills += 1;
                    bill.num_supporting += 1;
                }
                VoteOutcome::Oppose => {
                    legislator.num_opposed_bills += 1;
                    bill.num_opposing += 1;
                }
                VoteOutcome::Other => {}
            }
        }

        stats.positions = positions.len();
        tallies.stats = stats;
        tracing::info!(
            results = stats.results_seen,
            classified = stats.results_classified,
            other = stats.results_other,
            skipped = stats.results_skipped,
            positions = stats.positions,
            "aggregated vote results"
        );
        tallies
    }
}

fn orphan(result: &VoteResult, reason: OrphanReason) -> Issue {
    Issue::OrphanVoteResult {
        vote_result_id: result.id,
        vote_id: result.vote_id,
        legislator_id: result.legislator_id,
        reason,
    }
}
