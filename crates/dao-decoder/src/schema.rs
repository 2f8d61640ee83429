//! Contract event schemas.
//!
//! A schema maps an event name to the ordered list of its fields, each
//! carrying a declared type tag. Tags arrive as data (from an ABI or a
//! config file), so an unrecognized tag is a runtime decode condition —
//! [`FieldType::parse`] returning `None` — not a compile-time variant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Declared type of a single event field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Plain integer felt, passed through.
    Felt,
    /// 0/1 felt.
    Bool,
    /// Canonical 32-byte big-endian address.
    Address,
    /// Packed short string, unpacked to UTF-8.
    ShortString,
    /// A block number; decoded to that block's timestamp.
    BlockNumber,
}

impl FieldType {
    /// Parse a schema type tag. `None` means the tag is unknown to this
    /// decoder and the event cannot be decoded.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "felt" => Some(Self::Felt),
            "bool" => Some(Self::Bool),
            "address" => Some(Self::Address),
            "string" => Some(Self::ShortString),
            "block_number" => Some(Self::BlockNumber),
            _ => None,
        }
    }
}

/// One field of an event schema: a name and a raw type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl EventField {
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_owned(),
            ty: ty.to_owned(),
        }
    }
}

/// Ordered field list for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventSchema {
    pub fields: Vec<EventField>,
}

/// All event schemas of one contract, keyed by event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContractSchema {
    pub events: HashMap<String, EventSchema>,
}

impl ContractSchema {
    pub fn event(&self, name: &str) -> Option<&EventSchema> {
        self.events.get(name)
    }
}

/// The canonical schema of the DAO governance contract.
///
/// Field lists mirror the contract's emitted events one-to-one; the
/// `submittedAt` / `onboardedAt` fields are block-number references the
/// decoder resolves to timestamps.
pub fn dao_governance_schema() -> ContractSchema {
    let mut events = HashMap::new();

    let mut define = |name: &str, fields: &[(&str, &str)]| {
        events.insert(
            name.to_owned(),
            EventSchema {
                fields: fields
                    .iter()
                    .map(|(field, ty)| EventField::new(field, ty))
                    .collect(),
            },
        );
    };

    define(
        "ProposalAdded",
        &[
            ("id", "felt"),
            ("title", "string"),
            ("type", "string"),
            ("link", "string"),
            ("submittedAt", "block_number"),
            ("submittedBy", "address"),
        ],
    );
    define(
        "ProposalParamsUpdated",
        &[
            ("type", "string"),
            ("majority", "felt"),
            ("quorum", "felt"),
            ("votingDuration", "felt"),
            ("graceDuration", "felt"),
        ],
    );
    define(
        "ProposalStatusUpdated",
        &[("id", "felt"), ("status", "string")],
    );
    define(
        "OnboardProposalAdded",
        &[
            ("id", "felt"),
            ("applicantAddress", "address"),
            ("shares", "felt"),
            ("loot", "felt"),
            ("tributeOffered", "felt"),
            ("tributeAddress", "address"),
        ],
    );
    define(
        "GuildKickProposalAdded",
        &[("id", "felt"), ("memberAddress", "address")],
    );
    define(
        "WhitelistProposalAdded",
        &[
            ("id", "felt"),
            ("tokenName", "string"),
            ("tokenAddress", "address"),
        ],
    );
    define(
        "UnWhitelistProposalAdded",
        &[
            ("id", "felt"),
            ("tokenName", "string"),
            ("tokenAddress", "address"),
        ],
    );
    define(
        "SwapProposalAdded",
        &[
            ("id", "felt"),
            ("tributeAddress", "address"),
            ("tributeOffered", "felt"),
            ("paymentAddress", "address"),
            ("paymentRequested", "felt"),
        ],
    );
    define(
        "VoteSubmitted",
        &[
            ("callerAddress", "address"),
            ("proposalId", "felt"),
            ("vote", "bool"),
            ("onBehalfAddress", "address"),
        ],
    );
    define(
        "MemberAdded",
        &[
            ("memberAddress", "address"),
            ("shares", "felt"),
            ("loot", "felt"),
            ("onboardedAt", "block_number"),
        ],
    );
    define(
        "MemberUpdated",
        &[
            ("memberAddress", "address"),
            ("delegateAddress", "address"),
            ("shares", "felt"),
            ("loot", "felt"),
            ("jailed", "bool"),
            ("lastProposalYesVote", "felt"),
            ("onboardedAt", "block_number"),
        ],
    );
    define(
        "RoleGranted",
        &[
            ("account", "address"),
            ("role", "string"),
            ("sender", "address"),
        ],
    );
    define(
        "RoleRevoked",
        &[
            ("account", "address"),
            ("role", "string"),
            ("sender", "address"),
        ],
    );
    define(
        "TokenWhitelisted",
        &[("tokenName", "string"), ("tokenAddress", "address")],
    );
    define(
        "TokenUnWhitelisted",
        &[("tokenName", "string"), ("tokenAddress", "address")],
    );
    define(
        "UserTokenBalanceIncreased",
        &[
            ("memberAddress", "address"),
            ("tokenAddress", "address"),
            ("amount", "felt"),
        ],
    );
    define(
        "UserTokenBalanceDecreased",
        &[
            ("memberAddress", "address"),
            ("tokenAddress", "address"),
            ("amount", "felt"),
        ],
    );

    ContractSchema { events }
}
