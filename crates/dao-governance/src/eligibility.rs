//! Vote eligibility.
//!
//! A member is *votable* on a proposal when they were onboarded strictly
//! before the voting window closed and were neither jailed nor exited at
//! (or before) submission. All three comparisons are strict: a member
//! onboarded exactly at `voting_period_ending_at`, or jailed exactly at
//! `submitted_at`, is not votable.

use dao_types::{Member, Timestamp};

/// Whether the member may vote on a proposal submitted at `submitted_at`
/// whose voting window closes at `voting_period_ending_at`.
pub fn is_votable(
    member: &Member,
    submitted_at: Timestamp,
    voting_period_ending_at: Timestamp,
) -> bool {
    member.onboarded_at < voting_period_ending_at
        && member.jailed_at.map_or(true, |jailed| jailed > submitted_at)
        && member.exited_at.map_or(true, |exited| exited > submitted_at)
}
