//! # Typed Governance Events
//!
//! One struct per chain event, built from a decoded record by an explicit
//! constructor that enumerates its required fields. A missing or
//! mistyped field is a decode error for that event; there is no partial
//! construction.
//!
//! Serialization uses the chain's camelCase field names, so a typed event
//! doubles as its own audit-collection document.

use serde::Serialize;

use dao_decoder::{DecodedEvent, DecodeError};
use dao_types::{Address, Timestamp};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalAdded {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub proposal_type: String,
    pub link: String,
    /// Already resolved from a block-number reference.
    pub submitted_at: Timestamp,
    pub submitted_by: Address,
}

impl ProposalAdded {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            id: ev.u64("id")?,
            title: ev.str("title")?.to_owned(),
            proposal_type: ev.str("type")?.to_owned(),
            link: ev.str("link")?.to_owned(),
            submitted_at: ev.timestamp("submittedAt")?,
            submitted_by: ev.address("submittedBy")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalParamsUpdated {
    #[serde(rename = "type")]
    pub proposal_type: String,
    pub majority: u64,
    pub quorum: u64,
    pub voting_duration: u64,
    pub grace_duration: u64,
}

impl ProposalParamsUpdated {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            proposal_type: ev.str("type")?.to_owned(),
            majority: ev.u64("majority")?,
            quorum: ev.u64("quorum")?,
            voting_duration: ev.u64("votingDuration")?,
            grace_duration: ev.u64("graceDuration")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalStatusUpdated {
    pub id: u64,
    pub status: String,
}

impl ProposalStatusUpdated {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            id: ev.u64("id")?,
            status: ev.str("status")?.to_owned(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardProposalAdded {
    pub id: u64,
    pub applicant_address: Address,
    pub shares: u64,
    pub loot: u64,
    pub tribute_offered: u64,
    pub tribute_address: Address,
}

impl OnboardProposalAdded {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            id: ev.u64("id")?,
            applicant_address: ev.address("applicantAddress")?,
            shares: ev.u64("shares")?,
            loot: ev.u64("loot")?,
            tribute_offered: ev.u64("tributeOffered")?,
            tribute_address: ev.address("tributeAddress")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildKickProposalAdded {
    pub id: u64,
    pub member_address: Address,
}

impl GuildKickProposalAdded {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            id: ev.u64("id")?,
            member_address: ev.address("memberAddress")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistProposalAdded {
    pub id: u64,
    pub token_name: String,
    pub token_address: Address,
}

impl WhitelistProposalAdded {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            id: ev.u64("id")?,
            token_name: ev.str("tokenName")?.to_owned(),
            token_address: ev.address("tokenAddress")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnWhitelistProposalAdded {
    pub id: u64,
    pub token_name: String,
    pub token_address: Address,
}

impl UnWhitelistProposalAdded {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            id: ev.u64("id")?,
            token_name: ev.str("tokenName")?.to_owned(),
            token_address: ev.address("tokenAddress")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapProposalAdded {
    pub id: u64,
    pub tribute_address: Address,
    pub tribute_offered: u64,
    pub payment_address: Address,
    pub payment_requested: u64,
}

impl SwapProposalAdded {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            id: ev.u64("id")?,
            tribute_address: ev.address("tributeAddress")?,
            tribute_offered: ev.u64("tributeOffered")?,
            payment_address: ev.address("paymentAddress")?,
            payment_requested: ev.u64("paymentRequested")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSubmitted {
    pub caller_address: Address,
    pub proposal_id: u64,
    pub vote: bool,
    /// The member the vote counts for; the caller may be a delegate.
    pub on_behalf_address: Address,
}

impl VoteSubmitted {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            caller_address: ev.address("callerAddress")?,
            proposal_id: ev.u64("proposalId")?,
            vote: ev.bool("vote")?,
            on_behalf_address: ev.address("onBehalfAddress")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAdded {
    pub member_address: Address,
    pub shares: u64,
    pub loot: u64,
    pub onboarded_at: Timestamp,
}

impl MemberAdded {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            member_address: ev.address("memberAddress")?,
            shares: ev.u64("shares")?,
            loot: ev.u64("loot")?,
            onboarded_at: ev.timestamp("onboardedAt")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdated {
    pub member_address: Address,
    pub delegate_address: Address,
    pub shares: u64,
    pub loot: u64,
    pub jailed: bool,
    pub last_proposal_yes_vote: u64,
    pub onboarded_at: Timestamp,
}

impl MemberUpdated {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            member_address: ev.address("memberAddress")?,
            delegate_address: ev.address("delegateAddress")?,
            shares: ev.u64("shares")?,
            loot: ev.u64("loot")?,
            jailed: ev.bool("jailed")?,
            last_proposal_yes_vote: ev.u64("lastProposalYesVote")?,
            onboarded_at: ev.timestamp("onboardedAt")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleChanged {
    pub account: Address,
    pub role: String,
    pub sender: Address,
}

impl RoleChanged {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            account: ev.address("account")?,
            role: ev.str("role")?.to_owned(),
            sender: ev.address("sender")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenListed {
    pub token_name: String,
    pub token_address: Address,
}

impl TokenListed {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            token_name: ev.str("tokenName")?.to_owned(),
            token_address: ev.address("tokenAddress")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTokenBalanceChanged {
    pub member_address: Address,
    pub token_address: Address,
    pub amount: i64,
}

impl UserTokenBalanceChanged {
    pub fn from_decoded(ev: &DecodedEvent) -> Result<Self, DecodeError> {
        Ok(Self {
            member_address: ev.address("memberAddress")?,
            token_address: ev.address("tokenAddress")?,
            amount: ev.amount("amount")?,
        })
    }
}
