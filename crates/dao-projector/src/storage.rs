//! Collection-level write helpers shared by the handlers.
//!
//! Thin, logged wrappers over the store port: one helper per entity
//! family plus the balance bookkeeping shared by the two treasury events.

use serde_json::{json, Value};
use tracing::debug;

use dao_types::{Address, Timestamp};

use crate::ports::{Document, DocumentStore, Filter, StoreError, Update};

pub const PROPOSALS: &str = "proposals";
pub const PROPOSAL_PARAMS: &str = "proposal_params";
pub const MEMBERS: &str = "members";
pub const BANK: &str = "bank";
pub const EVENTS: &str = "events";

pub async fn update_proposal(
    store: &dyn DocumentStore,
    proposal_id: u64,
    update: Update,
) -> Result<(), StoreError> {
    debug!(proposal_id, ?update, "updating proposal");
    let existing = store
        .find_one_and_update(PROPOSALS, &Filter::by("id", proposal_id), update)
        .await?;
    debug!(proposal_id, matched = existing.is_some(), "proposal update applied");
    Ok(())
}

pub async fn update_member(
    store: &dyn DocumentStore,
    member_address: Address,
    update: Update,
) -> Result<(), StoreError> {
    update_member_filtered(store, member_address, Filter::new(), update).await
}

pub async fn update_member_filtered(
    store: &dyn DocumentStore,
    member_address: Address,
    extra: Filter,
    update: Update,
) -> Result<(), StoreError> {
    let mut filter = Filter::by("memberAddress", member_address.to_string());
    for (field, value) in extra.clauses() {
        filter = filter.and(field, value.clone());
    }
    debug!(member = %member_address, ?update, "updating member");
    let existing = store.find_one_and_update(MEMBERS, &filter, update).await?;
    debug!(member = %member_address, matched = existing.is_some(), "member update applied");
    Ok(())
}

pub async fn get_member(
    store: &dyn DocumentStore,
    member_address: Address,
    extra: Filter,
) -> Result<Option<Document>, StoreError> {
    let mut filter = Filter::by("memberAddress", member_address.to_string());
    for (field, value) in extra.clauses() {
        filter = filter.and(field, value.clone());
    }
    store.find_one(MEMBERS, &filter).await
}

/// Update the Bank singleton, creating it on first touch.
pub async fn update_bank(
    store: &dyn DocumentStore,
    bank_address: Address,
    extra: Filter,
    update: Update,
) -> Result<(), StoreError> {
    let key = Filter::by("bankAddress", bank_address.to_string());
    if store.find_one(BANK, &key).await?.is_none() {
        debug!(bank = %bank_address, "bank not found, creating it");
        let mut doc = Document::new();
        doc.insert("bankAddress".into(), json!(bank_address.to_string()));
        store.insert_one(BANK, doc).await?;
    }

    let mut filter = key;
    for (field, value) in extra.clauses() {
        filter = filter.and(field, value.clone());
    }
    debug!(bank = %bank_address, ?update, "updating bank");
    store.find_one_and_update(BANK, &filter, update).await?;
    Ok(())
}

pub async fn get_bank(
    store: &dyn DocumentStore,
    bank_address: Address,
    extra: Filter,
) -> Result<Option<Document>, StoreError> {
    let mut filter = Filter::by("bankAddress", bank_address.to_string());
    for (field, value) in extra.clauses() {
        filter = filter.and(field, value.clone());
    }
    store.find_one(BANK, &filter).await
}

/// Best-effort token-name lookup from the Bank whitelist. Not
/// authoritative; `None` simply means the token was never whitelisted (or
/// the Bank does not exist yet).
pub async fn token_name_from_whitelist(
    store: &dyn DocumentStore,
    bank_address: Address,
    token_address: Address,
) -> Result<Option<String>, StoreError> {
    let Some(bank) = get_bank(store, bank_address, Filter::new()).await? else {
        return Ok(None);
    };
    let listings = bank
        .get("whitelistedTokens")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let wanted = token_address.to_string();
    Ok(listings.iter().find_map(|listing| {
        (listing.get("tokenAddress").and_then(Value::as_str) == Some(wanted.as_str()))
            .then(|| listing.get("tokenName").and_then(Value::as_str).map(str::to_owned))
            .flatten()
    }))
}

/// Insert a zero-amount balance entry for the party's first touch of a
/// token. No-op when the entry already exists.
async fn ensure_balance_entry(
    store: &dyn DocumentStore,
    bank_address: Address,
    party: Address,
    token_address: Address,
    token_name: Option<String>,
) -> Result<(), StoreError> {
    let token_filter = Filter::by("balances.tokenAddress", token_address.to_string());
    let entry = json!({
        "tokenAddress": token_address.to_string(),
        "tokenName": token_name,
        "amount": 0,
    });

    if party == bank_address {
        if get_bank(store, bank_address, token_filter).await?.is_none() {
            update_bank(
                store,
                bank_address,
                Filter::new(),
                Update::push("balances", entry),
            )
            .await?;
        }
    } else if get_member(store, party, token_filter).await?.is_none() {
        update_member(store, party, Update::push("balances", entry)).await?;
    }
    Ok(())
}

/// Apply a signed balance change to the Bank or a Member: first-touch
/// zero-balance insert, then an atomic increment plus a ledger append.
/// Decrease events arrive here with the amount already negated.
pub async fn apply_balance_delta(
    store: &dyn DocumentStore,
    bank_address: Address,
    party: Address,
    token_address: Address,
    amount: i64,
    timestamp: Timestamp,
) -> Result<(), StoreError> {
    let token_name = token_name_from_whitelist(store, bank_address, token_address).await?;
    ensure_balance_entry(store, bank_address, party, token_address, token_name).await?;

    let token_filter = Filter::by("balances.tokenAddress", token_address.to_string());
    let update = Update::new()
        .and_inc("balances.$.amount", amount)
        .and_push(
            "transactions",
            json!({
                "tokenAddress": token_address.to_string(),
                "timestamp": timestamp,
                "amount": amount,
            }),
        );

    if party == bank_address {
        update_bank(store, bank_address, token_filter, update).await
    } else {
        update_member_filtered(store, party, token_filter, update).await
    }
}
