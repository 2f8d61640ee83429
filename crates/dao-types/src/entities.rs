//! # Core Domain Entities
//!
//! The three projected entity families — Proposals, Members, and the Bank —
//! plus the per-type governance parameters record.
//!
//! Each struct mirrors one stored document: serde uses the camelCase field
//! names the document store carries, so deserialization doubles as the
//! explicit "required vs optional field" contract for a stored record.
//! A missing required field is a deserialization error, not a partially
//! constructed entity.

use serde::{Deserialize, Serialize};

use crate::felt::Address;
use crate::status::ProposalRawStatus;
use crate::Timestamp;

/// One on-chain governance proposal, keyed by `id`.
///
/// `raw_status_history` is append-only and non-decreasing in timestamp;
/// `yes_voters` and `no_voters` are ordered-insertion sets kept disjoint by
/// the chain (one vote per member per proposal).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub link: String,
    pub submitted_at: Timestamp,
    pub submitted_by: Address,

    /// Majority threshold, integer percentage 0-100.
    pub majority: u64,
    /// Quorum threshold, integer percentage 0-100.
    pub quorum: u64,
    /// Voting window length in minutes.
    pub voting_duration: u64,
    /// Grace window length in minutes.
    pub grace_duration: u64,

    #[serde(default)]
    pub yes_voters: Vec<Address>,
    #[serde(default)]
    pub no_voters: Vec<Address>,

    pub raw_status: ProposalRawStatus,
    pub raw_status_history: Vec<(ProposalRawStatus, Timestamp)>,

    /// Variant payload selected by the document's `type` tag.
    #[serde(flatten)]
    pub payload: ProposalPayload,
}

/// Variant-specific proposal payload, tagged by `type` in the document.
///
/// A `ProposalAdded` event creates the proposal with an empty payload of
/// the declared type; the detail event for that variant fills it in later,
/// which is why every payload field is optional at the serde level via the
/// variant-detail defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum ProposalPayload {
    Signaling,
    #[serde(rename_all = "camelCase")]
    Onboard {
        #[serde(default)]
        applicant_address: Option<Address>,
        #[serde(default)]
        shares: Option<u64>,
        #[serde(default)]
        loot: Option<u64>,
        #[serde(default)]
        tribute_offered: Option<u64>,
        #[serde(default)]
        tribute_address: Option<Address>,
    },
    #[serde(rename_all = "camelCase")]
    GuildKick {
        #[serde(default)]
        member_address: Option<Address>,
    },
    #[serde(rename_all = "camelCase")]
    Whitelist {
        #[serde(default)]
        token_name: Option<String>,
        #[serde(default)]
        token_address: Option<Address>,
    },
    #[serde(rename_all = "camelCase")]
    UnWhitelist {
        #[serde(default)]
        token_name: Option<String>,
        #[serde(default)]
        token_address: Option<Address>,
    },
    #[serde(rename_all = "camelCase")]
    Swap {
        #[serde(default)]
        tribute_address: Option<Address>,
        #[serde(default)]
        tribute_offered: Option<u64>,
        #[serde(default)]
        payment_address: Option<Address>,
        #[serde(default)]
        payment_requested: Option<u64>,
    },
}

impl ProposalPayload {
    /// The `type` tag this payload carries in the store.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Signaling => "Signaling",
            Self::Onboard { .. } => "Onboard",
            Self::GuildKick { .. } => "GuildKick",
            Self::Whitelist { .. } => "Whitelist",
            Self::UnWhitelist { .. } => "UnWhitelist",
            Self::Swap { .. } => "Swap",
        }
    }
}

/// Per-proposal-type governance parameters.
///
/// Emitted by `ProposalParamsUpdated` and merged into each new proposal of
/// that type at projection time. A proposal type without parameters is a
/// fatal configuration error: deriving status without majority/quorum would
/// silently corrupt every downstream read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalParams {
    #[serde(rename = "type")]
    pub proposal_type: String,
    pub majority: u64,
    pub quorum: u64,
    pub voting_duration: u64,
    pub grace_duration: u64,
}

/// One DAO member, keyed by `member_address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub member_address: Address,
    pub shares: u64,
    pub loot: u64,
    pub onboarded_at: Timestamp,

    #[serde(default)]
    pub delegate_address: Option<Address>,
    /// Set while the member is jailed, cleared when unjailed.
    #[serde(default)]
    pub jailed_at: Option<Timestamp>,
    /// Inferred: set when a `MemberUpdated` reports zero shares.
    #[serde(default)]
    pub exited_at: Option<Timestamp>,
    #[serde(default)]
    pub last_proposal_yes_vote: Option<u64>,

    #[serde(default)]
    pub roles: Vec<String>,
    /// Proposal ids this member voted yes / no on.
    #[serde(default)]
    pub yes_votes: Vec<u64>,
    #[serde(default)]
    pub no_votes: Vec<u64>,

    #[serde(default)]
    pub balances: Vec<Balance>,
    #[serde(default)]
    pub transactions: Vec<LedgerEntry>,
}

/// The treasury singleton, keyed by the fixed protocol bank address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub bank_address: Address,
    #[serde(default)]
    pub whitelisted_tokens: Vec<TokenListing>,
    #[serde(default)]
    pub un_whitelisted_tokens: Vec<TokenListing>,
    #[serde(default)]
    pub balances: Vec<Balance>,
    #[serde(default)]
    pub transactions: Vec<LedgerEntry>,
}

/// A whitelist or un-whitelist record on the Bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenListing {
    pub token_name: String,
    pub token_address: Address,
    pub timestamp: Timestamp,
}

/// Current holdings of one token; at most one entry per token address.
///
/// The amount is a running sum of signed ledger entries and may go
/// negative as a ledger fact, never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub token_address: Address,
    /// Best-effort denormalization from the Bank whitelist; null when the
    /// token was not yet whitelisted at first touch.
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub amount: i64,
}

/// One signed treasury movement, append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub token_address: Address,
    pub timestamp: Timestamp,
    pub amount: i64,
}
