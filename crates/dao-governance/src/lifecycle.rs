//! The proposal lifecycle state machine.
//!
//! Raw status is authoritative for the two terminal states; everything
//! between is derived from the clock, the configured windows, and the
//! live tally:
//!
//! ```text
//! VOTING_PERIOD ──window closes──▶ thresholds met? ──yes──▶ GRACE_PERIOD ──▶ APPROVED_READY
//!                                        │
//!                                        no──▶ REJECTED_READY
//!
//! rawStatus approved/rejected ──▶ APPROVED / REJECTED   (terminal, event-driven)
//! anything else               ──▶ UNKNOWN
//! ```

use serde::Serialize;

use dao_types::{Proposal, ProposalRawStatus, ProposalStatus, Timestamp};

use crate::tally::VoteTally;

/// End of the voting window: submission plus the voting duration.
pub fn voting_period_ending_at(proposal: &Proposal) -> Timestamp {
    proposal.submitted_at + proposal.voting_duration * 60
}

/// End of the grace window: voting end plus the grace duration.
pub fn grace_period_ending_at(proposal: &Proposal) -> Timestamp {
    voting_period_ending_at(proposal) + proposal.grace_duration * 60
}

/// Derive the lifecycle status at instant `now`.
pub fn derive_status(proposal: &Proposal, tally: &VoteTally, now: Timestamp) -> ProposalStatus {
    match proposal.raw_status {
        ProposalRawStatus::Approved => ProposalStatus::Approved,
        ProposalRawStatus::Rejected => ProposalStatus::Rejected,
        ProposalRawStatus::Submitted => derive_submitted_status(proposal, tally, now),
        // `forced` (and anything else the chain may grow) has no derived
        // lifecycle; surfaced as Unknown rather than guessed at.
        ProposalRawStatus::Forced => ProposalStatus::Unknown,
    }
}

fn derive_submitted_status(
    proposal: &Proposal,
    tally: &VoteTally,
    now: Timestamp,
) -> ProposalStatus {
    if now < voting_period_ending_at(proposal) {
        return ProposalStatus::VotingPeriod;
    }

    let passed = tally.current_majority() >= proposal.majority as f64
        && tally.current_quorum() >= proposal.quorum as f64;
    if passed {
        if now < grace_period_ending_at(proposal) {
            ProposalStatus::GracePeriod
        } else {
            ProposalStatus::ApprovedReady
        }
    } else {
        ProposalStatus::RejectedReady
    }
}

/// The full derived lifecycle view of a proposal at instant `now`.
///
/// This is the computation-side type; the query surface flattens it into
/// its own projection. Nothing here is ever stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalLifecycle {
    pub status: ProposalStatus,
    pub active: bool,
    pub voting_period_ending_at: Timestamp,
    pub grace_period_ending_at: Timestamp,
    /// First `approved` entry in the raw status history, once terminal.
    pub approved_at: Option<Timestamp>,
    /// First `rejected` entry in the raw status history, once terminal.
    pub rejected_at: Option<Timestamp>,
    pub processed_at: Option<Timestamp>,
    /// Grace end, present only while `ApprovedReady`.
    pub approved_to_process_at: Option<Timestamp>,
    /// Voting end, present only while `RejectedReady`.
    pub rejected_to_process_at: Option<Timestamp>,
    /// Seconds elapsed past the relevant window end (negative while the
    /// window is open); present only during the two period states.
    pub time_remaining: Option<i64>,
}

pub fn derive_lifecycle(proposal: &Proposal, tally: &VoteTally, now: Timestamp) -> ProposalLifecycle {
    let status = derive_status(proposal, tally, now);
    let voting_ends_at = voting_period_ending_at(proposal);
    let grace_ends_at = grace_period_ending_at(proposal);

    let approved_at = (status == ProposalStatus::Approved)
        .then(|| first_history_entry(proposal, ProposalRawStatus::Approved))
        .flatten();
    let rejected_at = (status == ProposalStatus::Rejected)
        .then(|| first_history_entry(proposal, ProposalRawStatus::Rejected))
        .flatten();

    let time_remaining = match status {
        ProposalStatus::VotingPeriod => Some(now as i64 - voting_ends_at as i64),
        ProposalStatus::GracePeriod => Some(now as i64 - grace_ends_at as i64),
        _ => None,
    };

    ProposalLifecycle {
        status,
        active: status.is_active(),
        voting_period_ending_at: voting_ends_at,
        grace_period_ending_at: grace_ends_at,
        approved_at,
        rejected_at,
        processed_at: approved_at.or(rejected_at),
        approved_to_process_at: (status == ProposalStatus::ApprovedReady).then_some(grace_ends_at),
        rejected_to_process_at: (status == ProposalStatus::RejectedReady).then_some(voting_ends_at),
        time_remaining,
    }
}

fn first_history_entry(proposal: &Proposal, wanted: ProposalRawStatus) -> Option<Timestamp> {
    proposal
        .raw_status_history
        .iter()
        .find(|(status, _)| *status == wanted)
        .map(|(_, at)| *at)
}
