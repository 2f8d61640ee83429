//! The query service itself.
//!
//! Every method takes the evaluation instant `now` explicitly so callers
//! (and tests) control the clock; [`unix_now`] is the convenience source
//! for serving paths.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use dao_projector::storage::{BANK, MEMBERS, PROPOSALS};
use dao_projector::{Document, Filter, FindOptions, ReadStore};
use dao_types::{Address, Bank, Member, Proposal, Timestamp};

use crate::bank::BankView;
use crate::errors::{FieldError, QueryError};
use crate::members::MemberView;
use crate::proposals::ProposalView;

/// Seconds since the Unix epoch, saturating to zero on a pre-epoch clock.
pub fn unix_now() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Pagination window for list queries.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

/// Partial data plus the per-record failures that produced the gaps.
#[derive(Debug, Clone)]
pub struct QueryResponse<T> {
    pub data: T,
    pub errors: Vec<FieldError>,
}

/// Read-only façade over the projected entities.
pub struct QueryService {
    store: Arc<dyn ReadStore>,
    bank_address: Address,
}

impl QueryService {
    pub fn new(store: Arc<dyn ReadStore>, bank_address: Address) -> Self {
        Self {
            store,
            bank_address,
        }
    }

    /// Proposals, newest submission first, with every derived governance
    /// field evaluated at `now`.
    pub async fn list_proposals(
        &self,
        page: Page,
        now: Timestamp,
    ) -> Result<QueryResponse<Vec<ProposalView>>, QueryError> {
        let (members, mut errors) = self.load_members().await?;

        let options = FindOptions::paginated(page.skip, page.limit).sorted_desc("submittedAt");
        let docs = self
            .store
            .find_many(PROPOSALS, &Filter::new(), &options)
            .await?;

        let mut views = Vec::with_capacity(docs.len());
        for (i, doc) in docs.into_iter().enumerate() {
            match decode::<Proposal>(doc) {
                Ok(proposal) => views.push(ProposalView::project(&proposal, &members, now)),
                Err(err) => errors.push(FieldError::new(format!("proposals[{i}]"), err)),
            }
        }
        Ok(QueryResponse {
            data: views,
            errors,
        })
    }

    /// A single proposal by id, or `None` when no such proposal exists.
    pub async fn get_proposal(
        &self,
        id: u64,
        now: Timestamp,
    ) -> Result<Option<ProposalView>, QueryError> {
        let Some(proposal) = self.find_proposal(id).await? else {
            return Ok(None);
        };
        let (members, errors) = self.load_members().await?;
        for err in &errors {
            warn!(path = %err.path, message = %err.message, "skipping malformed member record");
        }
        Ok(Some(ProposalView::project(&proposal, &members, now)))
    }

    /// Members, in insertion order.
    pub async fn list_members(
        &self,
        page: Page,
    ) -> Result<QueryResponse<Vec<MemberView>>, QueryError> {
        let options = FindOptions::paginated(page.skip, page.limit);
        let docs = self
            .store
            .find_many(MEMBERS, &Filter::new(), &options)
            .await?;

        let mut views = Vec::with_capacity(docs.len());
        let mut errors = Vec::new();
        for (i, doc) in docs.into_iter().enumerate() {
            match decode::<Member>(doc) {
                Ok(member) => views.push(MemberView::from(member)),
                Err(err) => errors.push(FieldError::new(format!("members[{i}]"), err)),
            }
        }
        Ok(QueryResponse {
            data: views,
            errors,
        })
    }

    /// The treasury record, with the effective whitelist and the DAO-wide
    /// share/loot totals computed over the live member set.
    pub async fn bank(&self) -> Result<BankView, QueryError> {
        let filter = Filter::by("bankAddress", self.bank_address.to_string());
        let docs = self
            .store
            .find_many(BANK, &filter, &FindOptions::default())
            .await?;
        let doc = docs
            .into_iter()
            .next()
            .ok_or(QueryError::NotFound { entity: "bank" })?;
        let bank = decode::<Bank>(doc).map_err(|err| {
            QueryError::Store(dao_projector::StoreError::Serialization(err.to_string()))
        })?;

        let (members, errors) = self.load_members().await?;
        for err in &errors {
            warn!(path = %err.path, message = %err.message, "skipping malformed member record");
        }
        Ok(BankView::project(bank, &members))
    }

    /// Whether `member_address` (a `0x`-hex string from the caller) cast a
    /// vote on the given proposal. The address is parsed strictly; a
    /// malformed one is the caller's error, never a silent `false`.
    pub async fn member_did_vote(
        &self,
        proposal_id: u64,
        member_address: &str,
    ) -> Result<bool, QueryError> {
        let address: Address = member_address.parse()?;
        let proposal = self
            .find_proposal(proposal_id)
            .await?
            .ok_or(QueryError::NotFound { entity: "proposal" })?;
        Ok(proposal.yes_voters.contains(&address) || proposal.no_voters.contains(&address))
    }

    async fn find_proposal(&self, id: u64) -> Result<Option<Proposal>, QueryError> {
        let docs = self
            .store
            .find_many(PROPOSALS, &Filter::by("id", id), &FindOptions::default())
            .await?;
        let Some(doc) = docs.into_iter().next() else {
            return Ok(None);
        };
        let proposal = decode::<Proposal>(doc).map_err(|err| {
            QueryError::Store(dao_projector::StoreError::Serialization(err.to_string()))
        })?;
        Ok(Some(proposal))
    }

    /// The full member set, with malformed records reported and dropped.
    async fn load_members(&self) -> Result<(Vec<Member>, Vec<FieldError>), QueryError> {
        let docs = self
            .store
            .find_many(MEMBERS, &Filter::new(), &FindOptions::default())
            .await?;

        let mut members = Vec::with_capacity(docs.len());
        let mut errors = Vec::new();
        for (i, doc) in docs.into_iter().enumerate() {
            match decode::<Member>(doc) {
                Ok(member) => members.push(member),
                Err(err) => errors.push(FieldError::new(format!("members[{i}]"), err)),
            }
        }
        Ok((members, errors))
    }
}

fn decode<T: DeserializeOwned>(doc: Document) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(doc))
}
