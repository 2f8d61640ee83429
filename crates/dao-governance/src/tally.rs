//! Share-weighted vote tallies.
//!
//! Voting power is `shares` only; `loot` carries economic weight but no
//! vote. The quorum denominator is the share total of every *votable*
//! member, not just those who voted.

use dao_types::{Member, Proposal};

use crate::eligibility::is_votable;
use crate::lifecycle::voting_period_ending_at;

/// Vote totals for one proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteTally {
    pub yes_shares: u64,
    pub no_shares: u64,
    pub total_votable_shares: u64,
}

impl VoteTally {
    /// Tally a proposal's votes over the current member set.
    pub fn compute(proposal: &Proposal, members: &[Member]) -> Self {
        let voting_ends_at = voting_period_ending_at(proposal);

        let mut tally = Self::default();
        for member in members {
            if proposal.yes_voters.contains(&member.member_address) {
                tally.yes_shares += member.shares;
            } else if proposal.no_voters.contains(&member.member_address) {
                tally.no_shares += member.shares;
            }
            if is_votable(member, proposal.submitted_at, voting_ends_at) {
                tally.total_votable_shares += member.shares;
            }
        }
        tally
    }

    /// Yes share of cast votes, as a percentage rounded to 2 decimals.
    /// Zero when no votes were cast.
    pub fn current_majority(&self) -> f64 {
        let total_votes = self.yes_shares + self.no_shares;
        if total_votes == 0 {
            return 0.0;
        }
        round2(self.yes_shares as f64 / total_votes as f64 * 100.0)
    }

    /// Cast share of all votable shares, as a percentage rounded to 2
    /// decimals. Zero when there are no votable members.
    pub fn current_quorum(&self) -> f64 {
        if self.total_votable_shares == 0 {
            return 0.0;
        }
        let cast = (self.yes_shares + self.no_shares) as f64;
        round2(cast / self.total_votable_shares as f64 * 100.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
