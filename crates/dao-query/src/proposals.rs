//! The proposal projection exposed at the query boundary.

use serde::Serialize;

use dao_governance::{derive_lifecycle, ProposalLifecycle, VoteTally};
use dao_types::{Address, Member, Proposal, ProposalPayload, Timestamp};

/// A proposal as consumers see it: stored fields, the variant payload,
/// and every derived governance metric. The raw status and its history
/// stay internal; this type is built from them but does not expose them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalView {
    pub id: u64,
    pub title: String,
    pub link: String,
    pub submitted_at: Timestamp,
    pub submitted_by: Address,

    pub majority: u64,
    pub quorum: u64,
    pub voting_duration: u64,
    pub grace_duration: u64,

    pub yes_voters: Vec<Address>,
    pub no_voters: Vec<Address>,

    #[serde(flatten)]
    pub payload: ProposalPayload,

    #[serde(flatten)]
    pub lifecycle: ProposalLifecycle,

    pub yes_votes_total: u64,
    pub no_votes_total: u64,
    pub total_votable_shares: u64,
    pub current_majority: f64,
    pub current_quorum: f64,
}

impl ProposalView {
    /// Project a stored proposal against the current member set at
    /// instant `now`.
    pub fn project(proposal: &Proposal, members: &[Member], now: Timestamp) -> Self {
        let tally = VoteTally::compute(proposal, members);
        let lifecycle = derive_lifecycle(proposal, &tally, now);

        Self {
            id: proposal.id,
            title: proposal.title.clone(),
            link: proposal.link.clone(),
            submitted_at: proposal.submitted_at,
            submitted_by: proposal.submitted_by,
            majority: proposal.majority,
            quorum: proposal.quorum,
            voting_duration: proposal.voting_duration,
            grace_duration: proposal.grace_duration,
            yes_voters: proposal.yes_voters.clone(),
            no_voters: proposal.no_voters.clone(),
            payload: proposal.payload.clone(),
            lifecycle,
            yes_votes_total: tally.yes_shares,
            no_votes_total: tally.no_shares,
            total_votable_shares: tally.total_votable_shares,
            current_majority: tally.current_majority(),
            current_quorum: tally.current_quorum(),
        }
    }

    /// Whether the given member cast a vote on this proposal.
    pub fn member_did_vote(&self, member: Address) -> bool {
        self.yes_voters.contains(&member) || self.no_voters.contains(&member)
    }
}
