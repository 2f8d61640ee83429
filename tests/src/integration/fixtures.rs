//! Shared fixtures: a fully wired harness plus raw-felt event builders.
//!
//! Events are built the way the chain emits them, as felt arrays in
//! schema field order, so every test exercises the real decode path.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use dao_decoder::{
    dao_governance_schema, BlockLookup, BlockLookupError, ContractSchema, DecoderConfig,
    EventDecoder, SchemaError, SchemaProvider,
};
use dao_projector::{MemoryStore, Pipeline, Projector, ProjectorError};
use dao_query::QueryService;
use dao_types::{
    short_string_to_felt, Address, BlockEvents, BlockHeader, Felt, RawEvent, Timestamp,
};

/// An address whose last byte is `n`; enough to tell parties apart.
pub fn addr(n: u8) -> Address {
    let mut raw = [0u8; 32];
    raw[31] = n;
    Address(raw)
}

pub const GOVERNANCE_CONTRACT: u8 = 0x01;
pub const BANK: u8 = 0x0b;

/// Schema provider serving the bundled governance schema for any contract.
struct FixedSchema;

#[async_trait]
impl SchemaProvider for FixedSchema {
    async fn resolve(&self, _contract: Address) -> Result<ContractSchema, SchemaError> {
        Ok(dao_governance_schema())
    }
}

/// Block lookup over a fixed number → timestamp table.
struct FixedBlocks {
    timestamps: HashMap<u64, Timestamp>,
}

#[async_trait]
impl BlockLookup for FixedBlocks {
    async fn get_block(&self, number: u64) -> Result<BlockHeader, BlockLookupError> {
        self.timestamps
            .get(&number)
            .map(|&timestamp| BlockHeader { number, timestamp })
            .ok_or(BlockLookupError::NotFound(number))
    }
}

/// Decoder, projector, and store wired over an in-memory document store.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pipeline: Pipeline,
}

impl Harness {
    /// `blocks` seeds the lookup table for block-number references that
    /// point outside the block being processed.
    pub fn new(blocks: &[(u64, Timestamp)]) -> Self {
        let store = Arc::new(MemoryStore::new());
        let decoder = EventDecoder::new(
            Arc::new(FixedSchema),
            Arc::new(FixedBlocks {
                timestamps: blocks.iter().copied().collect(),
            }),
            DecoderConfig::default(),
        );
        let projector = Projector::new(Arc::clone(&store) as _, addr(BANK));
        Self {
            store,
            pipeline: Pipeline::new(decoder, projector),
        }
    }

    /// Run one block's events through the full pipeline.
    pub async fn ingest(
        &self,
        number: u64,
        timestamp: Timestamp,
        events: Vec<RawEvent>,
    ) -> Result<(), ProjectorError> {
        let block = BlockEvents {
            header: BlockHeader { number, timestamp },
            events,
        };
        self.pipeline.process_block(&block).await
    }

    pub fn queries(&self) -> QueryService {
        QueryService::new(Arc::clone(&self.store) as _, addr(BANK))
    }
}

fn felt(n: u64) -> Felt {
    Felt::from(n)
}

fn text(s: &str) -> Felt {
    short_string_to_felt(s)
}

fn flag(b: bool) -> Felt {
    if b {
        Felt::one()
    } else {
        Felt::zero()
    }
}

pub fn event(name: &str, data: Vec<Felt>) -> RawEvent {
    RawEvent {
        contract_address: addr(GOVERNANCE_CONTRACT),
        name: name.to_owned(),
        data,
    }
}

pub fn proposal_params(
    proposal_type: &str,
    majority: u64,
    quorum: u64,
    voting_duration: u64,
    grace_duration: u64,
) -> RawEvent {
    event(
        "ProposalParamsUpdated",
        vec![
            text(proposal_type),
            felt(majority),
            felt(quorum),
            felt(voting_duration),
            felt(grace_duration),
        ],
    )
}

pub fn member_added(member: u8, shares: u64, loot: u64, onboarded_block: u64) -> RawEvent {
    event(
        "MemberAdded",
        vec![
            addr(member).to_felt(),
            felt(shares),
            felt(loot),
            felt(onboarded_block),
        ],
    )
}

pub fn member_updated(
    member: u8,
    delegate: u8,
    shares: u64,
    loot: u64,
    jailed: bool,
    last_yes_vote: u64,
    onboarded_block: u64,
) -> RawEvent {
    event(
        "MemberUpdated",
        vec![
            addr(member).to_felt(),
            addr(delegate).to_felt(),
            felt(shares),
            felt(loot),
            flag(jailed),
            felt(last_yes_vote),
            felt(onboarded_block),
        ],
    )
}

pub fn proposal_added(
    id: u64,
    title: &str,
    proposal_type: &str,
    submitted_block: u64,
    submitter: u8,
) -> RawEvent {
    event(
        "ProposalAdded",
        vec![
            felt(id),
            text(title),
            text(proposal_type),
            text("ipfs://x"),
            felt(submitted_block),
            addr(submitter).to_felt(),
        ],
    )
}

pub fn onboard_proposal_added(
    id: u64,
    applicant: u8,
    shares: u64,
    loot: u64,
    tribute_offered: u64,
    tribute_token: u8,
) -> RawEvent {
    event(
        "OnboardProposalAdded",
        vec![
            felt(id),
            addr(applicant).to_felt(),
            felt(shares),
            felt(loot),
            felt(tribute_offered),
            addr(tribute_token).to_felt(),
        ],
    )
}

pub fn vote_submitted(caller: u8, proposal_id: u64, vote: bool, on_behalf: u8) -> RawEvent {
    event(
        "VoteSubmitted",
        vec![
            addr(caller).to_felt(),
            felt(proposal_id),
            flag(vote),
            addr(on_behalf).to_felt(),
        ],
    )
}

pub fn proposal_status_updated(id: u64, status: &str) -> RawEvent {
    event("ProposalStatusUpdated", vec![felt(id), text(status)])
}

pub fn role_granted(account: u8, role: &str, sender: u8) -> RawEvent {
    event(
        "RoleGranted",
        vec![addr(account).to_felt(), text(role), addr(sender).to_felt()],
    )
}

pub fn role_revoked(account: u8, role: &str, sender: u8) -> RawEvent {
    event(
        "RoleRevoked",
        vec![addr(account).to_felt(), text(role), addr(sender).to_felt()],
    )
}

pub fn token_whitelisted(name: &str, token: u8) -> RawEvent {
    event(
        "TokenWhitelisted",
        vec![text(name), addr(token).to_felt()],
    )
}

pub fn token_un_whitelisted(name: &str, token: u8) -> RawEvent {
    event(
        "TokenUnWhitelisted",
        vec![text(name), addr(token).to_felt()],
    )
}

pub fn balance_increased(member: u8, token: u8, amount: u64) -> RawEvent {
    event(
        "UserTokenBalanceIncreased",
        vec![addr(member).to_felt(), addr(token).to_felt(), felt(amount)],
    )
}

pub fn balance_decreased(member: u8, token: u8, amount: u64) -> RawEvent {
    event(
        "UserTokenBalanceDecreased",
        vec![addr(member).to_felt(), addr(token).to_felt(), felt(amount)],
    )
}
