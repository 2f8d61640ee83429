//! # Event Handlers
//!
//! One mutation recipe per governance event. Every handler first appends
//! the typed event to the `events` audit collection, then issues its
//! entity mutations. Handlers are written for strictly serial execution:
//! several perform read-modify-write sequences with no external locking.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use dao_decoder::{DecodedEvent, DecodeError};
use dao_types::{Address, BlockHeader, ProposalRawStatus, RawStatusParseError, Timestamp};

use crate::events::*;
use crate::ports::{Document, DocumentStore, Filter, StoreError, Update};
use crate::router::EventKind;
use crate::storage::{
    self, apply_balance_delta, update_bank, update_member, update_proposal, EVENTS,
    PROPOSALS, PROPOSAL_PARAMS,
};

/// Errors raised while projecting one event.
#[derive(Debug, Error)]
pub enum ProjectorError {
    /// A known proposal type has no governance parameters on record.
    /// Fatal: projecting the proposal without majority/quorum/durations
    /// would silently corrupt every derived status downstream. Check that
    /// the indexer handled the type's `ProposalParamsUpdated` event.
    #[error(
        "no governance parameters (majority, quorum, durations) found for \
         proposal type '{proposal_type}'"
    )]
    MissingProposalParams { proposal_type: String },

    /// The decoded record was missing or mistyping a field the handler
    /// needs. Aborts this event only.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A status-update event carried an unrecognized raw status string.
    /// Aborts this event only.
    #[error(transparent)]
    InvalidRawStatus(#[from] RawStatusParseError),

    /// Surfaced verbatim from the store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProjectorError {
    /// Whether this error must halt ingestion for operator intervention.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingProposalParams { .. } | Self::Store(_)
        )
    }
}

/// The state projector: sole writer of the Proposals, Members, and Bank
/// entity families.
pub struct Projector {
    store: Arc<dyn DocumentStore>,
    bank_address: Address,
}

impl Projector {
    pub fn new(store: Arc<dyn DocumentStore>, bank_address: Address) -> Self {
        Self {
            store,
            bank_address,
        }
    }

    pub fn bank_address(&self) -> Address {
        self.bank_address
    }

    /// Project one routed, decoded event.
    pub async fn apply(
        &self,
        kind: EventKind,
        ev: &DecodedEvent,
        block: &BlockHeader,
    ) -> Result<(), ProjectorError> {
        let now = block.timestamp;
        match kind {
            EventKind::ProposalAdded => {
                let ev = ProposalAdded::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                self.on_proposal_added(ev, now).await
            }
            EventKind::ProposalParamsUpdated => {
                let ev = ProposalParamsUpdated::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                debug!(proposal_type = %ev.proposal_type, "inserting proposal params");
                self.store
                    .insert_one(PROPOSAL_PARAMS, to_document(&ev)?)
                    .await?;
                Ok(())
            }
            EventKind::ProposalStatusUpdated => {
                let ev = ProposalStatusUpdated::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                self.on_proposal_status_updated(ev, now).await
            }
            EventKind::OnboardProposalAdded => {
                let ev = OnboardProposalAdded::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                update_proposal(&*self.store, ev.id, Update::set(to_document(&ev)?)).await?;
                Ok(())
            }
            EventKind::GuildKickProposalAdded => {
                let ev = GuildKickProposalAdded::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                update_proposal(&*self.store, ev.id, Update::set(to_document(&ev)?)).await?;
                Ok(())
            }
            EventKind::WhitelistProposalAdded => {
                let ev = WhitelistProposalAdded::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                update_proposal(&*self.store, ev.id, Update::set(to_document(&ev)?)).await?;
                Ok(())
            }
            EventKind::UnWhitelistProposalAdded => {
                let ev = UnWhitelistProposalAdded::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                update_proposal(&*self.store, ev.id, Update::set(to_document(&ev)?)).await?;
                Ok(())
            }
            EventKind::SwapProposalAdded => {
                let ev = SwapProposalAdded::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                update_proposal(&*self.store, ev.id, Update::set(to_document(&ev)?)).await?;
                Ok(())
            }
            EventKind::VoteSubmitted => {
                let ev = VoteSubmitted::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                self.on_vote_submitted(ev).await
            }
            EventKind::MemberAdded => {
                let ev = MemberAdded::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                let mut doc = to_document(&ev)?;
                doc.insert("jailedAt".into(), Value::Null);
                doc.insert("exitedAt".into(), Value::Null);
                self.store.insert_one(storage::MEMBERS, doc).await?;
                Ok(())
            }
            EventKind::MemberUpdated => {
                let ev = MemberUpdated::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                self.on_member_updated(ev, now).await
            }
            EventKind::RoleGranted => {
                let ev = RoleChanged::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                update_member(&*self.store, ev.account, Update::push("roles", ev.role)).await?;
                Ok(())
            }
            EventKind::RoleRevoked => {
                let ev = RoleChanged::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                update_member(&*self.store, ev.account, Update::pull("roles", ev.role)).await?;
                Ok(())
            }
            EventKind::TokenWhitelisted => {
                let ev = TokenListed::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                self.on_token_listed(ev, now, "whitelistedTokens").await
            }
            EventKind::TokenUnWhitelisted => {
                let ev = TokenListed::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                self.on_token_listed(ev, now, "unWhitelistedTokens").await
            }
            EventKind::UserTokenBalanceIncreased => {
                let ev = UserTokenBalanceChanged::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                apply_balance_delta(
                    &*self.store,
                    self.bank_address,
                    ev.member_address,
                    ev.token_address,
                    ev.amount,
                    now,
                )
                .await?;
                Ok(())
            }
            EventKind::UserTokenBalanceDecreased => {
                let ev = UserTokenBalanceChanged::from_decoded(ev)?;
                self.record_event(kind, &ev, now).await?;
                apply_balance_delta(
                    &*self.store,
                    self.bank_address,
                    ev.member_address,
                    ev.token_address,
                    -ev.amount,
                    now,
                )
                .await?;
                Ok(())
            }
        }
    }

    /// Append the typed event to the audit collection.
    async fn record_event<T: Serialize>(
        &self,
        kind: EventKind,
        event: &T,
        emitted_at: Timestamp,
    ) -> Result<(), ProjectorError> {
        let mut doc = Document::new();
        doc.insert("name".into(), json!(kind.name()));
        doc.insert("emittedAt".into(), json!(emitted_at));
        for (field, value) in to_document(event)? {
            doc.insert(field, value);
        }
        debug!(event = kind.name(), "inserting into 'events'");
        self.store.insert_one(EVENTS, doc).await?;
        Ok(())
    }

    async fn on_proposal_added(
        &self,
        ev: ProposalAdded,
        now: Timestamp,
    ) -> Result<(), ProjectorError> {
        let params = self
            .store
            .find_one(
                PROPOSAL_PARAMS,
                &Filter::by("type", ev.proposal_type.clone()),
            )
            .await?
            .ok_or_else(|| ProjectorError::MissingProposalParams {
                proposal_type: ev.proposal_type.clone(),
            })?;

        let mut doc = to_document(&ev)?;
        for (field, value) in params {
            doc.insert(field, value);
        }
        doc.insert(
            "rawStatus".into(),
            json!(ProposalRawStatus::Submitted.as_str()),
        );
        doc.insert(
            "rawStatusHistory".into(),
            json!([[ProposalRawStatus::Submitted.as_str(), now]]),
        );

        debug!(id = ev.id, proposal_type = %ev.proposal_type, "inserting proposal");
        self.store.insert_one(PROPOSALS, doc).await?;
        Ok(())
    }

    async fn on_proposal_status_updated(
        &self,
        ev: ProposalStatusUpdated,
        now: Timestamp,
    ) -> Result<(), ProjectorError> {
        // Reject unknown status strings before touching the store.
        let status: ProposalRawStatus = ev.status.parse()?;

        let mut set = Document::new();
        set.insert("rawStatus".into(), json!(status.as_str()));
        update_proposal(
            &*self.store,
            ev.id,
            Update::set(set).and_push("rawStatusHistory", json!([status.as_str(), now])),
        )
        .await?;
        Ok(())
    }

    async fn on_vote_submitted(&self, ev: VoteSubmitted) -> Result<(), ProjectorError> {
        let (voters_field, votes_field) = if ev.vote {
            ("yesVoters", "yesVotes")
        } else {
            ("noVoters", "noVotes")
        };

        update_proposal(
            &*self.store,
            ev.proposal_id,
            Update::push(voters_field, ev.on_behalf_address.to_string()),
        )
        .await?;
        update_member(
            &*self.store,
            ev.on_behalf_address,
            Update::push(votes_field, ev.proposal_id),
        )
        .await?;
        Ok(())
    }

    async fn on_member_updated(
        &self,
        ev: MemberUpdated,
        now: Timestamp,
    ) -> Result<(), ProjectorError> {
        let mut doc = to_document(&ev)?;
        // Jail and exit timestamps are derived, not chain-emitted: exit is
        // inferred from the member's shares dropping to zero.
        doc.insert(
            "jailedAt".into(),
            if ev.jailed { json!(now) } else { Value::Null },
        );
        doc.insert(
            "exitedAt".into(),
            if ev.shares == 0 { json!(now) } else { Value::Null },
        );
        update_member(&*self.store, ev.member_address, Update::set(doc)).await?;
        Ok(())
    }

    async fn on_token_listed(
        &self,
        ev: TokenListed,
        now: Timestamp,
        list_field: &str,
    ) -> Result<(), ProjectorError> {
        let listing = json!({
            "tokenName": ev.token_name,
            "tokenAddress": ev.token_address.to_string(),
            "timestamp": now,
        });
        update_bank(
            &*self.store,
            self.bank_address,
            Filter::new(),
            Update::push(list_field, listing),
        )
        .await?;
        Ok(())
    }
}

fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Serialization(format!(
            "expected an object, got {other}"
        ))),
        Err(e) => Err(StoreError::Serialization(e.to_string())),
    }
}
