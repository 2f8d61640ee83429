//! Member projection for the query boundary.

use serde::Serialize;

use dao_types::{Address, Balance, LedgerEntry, Member, Timestamp};

/// A member as consumers see it. This is the stored document plus nothing
/// derived, but projecting through a dedicated view keeps the boundary
/// stable if the stored shape ever grows internal bookkeeping fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub member_address: Address,
    pub shares: u64,
    pub loot: u64,
    pub onboarded_at: Timestamp,

    pub delegate_address: Option<Address>,
    pub jailed_at: Option<Timestamp>,
    pub exited_at: Option<Timestamp>,
    pub last_proposal_yes_vote: Option<u64>,

    pub roles: Vec<String>,
    pub yes_votes: Vec<u64>,
    pub no_votes: Vec<u64>,

    pub balances: Vec<Balance>,
    pub transactions: Vec<LedgerEntry>,
}

impl From<Member> for MemberView {
    fn from(member: Member) -> Self {
        Self {
            member_address: member.member_address,
            shares: member.shares,
            loot: member.loot,
            onboarded_at: member.onboarded_at,
            delegate_address: member.delegate_address,
            jailed_at: member.jailed_at,
            exited_at: member.exited_at,
            last_proposal_yes_vote: member.last_proposal_yes_vote,
            roles: member.roles,
            yes_votes: member.yes_votes,
            no_votes: member.no_votes,
            balances: member.balances,
            transactions: member.transactions,
        }
    }
}
