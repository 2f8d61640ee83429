//! In-memory document store adapter.
//!
//! Backs tests and dev runs with the same port semantics the production
//! store exposes: equality filters over dotted paths (array-aware), the
//! four update operations, and positional `array.$.field` increments.
//! Effective-dating is out of scope here; this adapter only ever holds
//! the current version of each document.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::ports::{
    Document, DocumentStore, Filter, FindOptions, ReadStore, SortOrder, StoreError, Update,
    UpdateOp,
};

/// A process-local store keyed by collection name.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(doc: &Value, filter: &Filter) -> bool {
    filter.clauses().iter().all(|(path, expected)| {
        let segments: Vec<&str> = path.split('.').collect();
        match_path(doc, &segments, expected)
    })
}

fn match_path(current: &Value, segments: &[&str], expected: &Value) -> bool {
    if segments.is_empty() {
        return current == expected;
    }
    match current {
        Value::Object(map) => match map.get(segments[0]) {
            Some(next) => match_path(next, &segments[1..], expected),
            // A missing field only matches an explicit null.
            None => segments.len() == 1 && expected.is_null(),
        },
        // Dotted paths into an array match any element.
        Value::Array(items) => items.iter().any(|item| match_path(item, segments, expected)),
        _ => false,
    }
}

/// Resolve the positional `$` in an increment path against the filter's
/// clause on the same array field, returning the matched element index.
fn positional_index(
    items: &[Value],
    array_field: &str,
    filter: &Filter,
) -> Result<usize, StoreError> {
    let prefix = format!("{array_field}.");
    let (subpath, expected) = filter
        .clauses()
        .iter()
        .find_map(|(path, value)| path.strip_prefix(&prefix).map(|rest| (rest, value)))
        .ok_or_else(|| {
            StoreError::Schema(format!(
                "positional update on '{array_field}' without a matching array filter"
            ))
        })?;
    let segments: Vec<&str> = subpath.split('.').collect();
    items
        .iter()
        .position(|item| match_path(item, &segments, expected))
        .ok_or_else(|| {
            StoreError::Schema(format!(
                "positional update on '{array_field}' matched no element"
            ))
        })
}

fn apply_update(doc: &mut Value, update: &Update, filter: &Filter) -> Result<(), StoreError> {
    let Some(map) = doc.as_object_mut() else {
        return Err(StoreError::Schema("document is not an object".into()));
    };

    for op in update.ops() {
        match op {
            UpdateOp::Set(fields) => {
                for (key, value) in fields {
                    map.insert(key.clone(), value.clone());
                }
            }
            UpdateOp::Push { field, value } => {
                let entry = map.entry(field.clone()).or_insert_with(|| Value::Array(vec![]));
                let Some(items) = entry.as_array_mut() else {
                    return Err(StoreError::Schema(format!("'{field}' is not an array")));
                };
                items.push(value.clone());
            }
            UpdateOp::Pull { field, value } => {
                if let Some(items) = map.get_mut(field).and_then(Value::as_array_mut) {
                    items.retain(|item| item != value);
                }
            }
            UpdateOp::Inc { field, amount } => {
                apply_inc(map, field, *amount, filter)?;
            }
        }
    }
    Ok(())
}

fn apply_inc(
    map: &mut Document,
    path: &str,
    amount: i64,
    filter: &Filter,
) -> Result<(), StoreError> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut current: &mut Value = match segments.as_slice() {
        [] => return Err(StoreError::Schema("empty increment path".into())),
        [single] => {
            let entry = map
                .entry((*single).to_owned())
                .or_insert(Value::Number(0.into()));
            return inc_number(entry, amount);
        }
        [first, ..] => map
            .get_mut(*first)
            .ok_or_else(|| StoreError::Schema(format!("missing field '{first}'")))?,
    };

    let mut walked = vec![segments[0]];
    for (i, segment) in segments.iter().enumerate().skip(1) {
        let last = i == segments.len() - 1;
        if *segment == "$" {
            let array_field = walked.join(".");
            let Some(items) = current.as_array_mut() else {
                return Err(StoreError::Schema(format!("'{array_field}' is not an array")));
            };
            let index = positional_index(items, &array_field, filter)?;
            current = &mut items[index];
        } else if last {
            let Some(obj) = current.as_object_mut() else {
                return Err(StoreError::Schema(format!("cannot descend into '{segment}'")));
            };
            let entry = obj
                .entry((*segment).to_owned())
                .or_insert(Value::Number(0.into()));
            return inc_number(entry, amount);
        } else {
            current = current
                .as_object_mut()
                .and_then(|obj| obj.get_mut(*segment))
                .ok_or_else(|| StoreError::Schema(format!("missing field '{segment}'")))?;
        }
        walked.push(segment);
    }
    inc_number(current, amount)
}

fn inc_number(slot: &mut Value, amount: i64) -> Result<(), StoreError> {
    let current = slot
        .as_i64()
        .or_else(|| slot.is_null().then_some(0))
        .ok_or_else(|| StoreError::Schema("increment target is not a number".into()))?;
    let next = i128::from(current) + i128::from(amount);
    let next: i64 = next
        .try_into()
        .map_err(|_| StoreError::Schema(format!("increment result out of range: {next}")))?;
    *slot = Value::Number(next.into());
    Ok(())
}

fn compare_field(a: &Value, b: &Value, field: &str) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    let left = a.get(field);
    let right = b.get(field);
    match (left, right) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

fn as_document(value: &Value) -> Result<Document, StoreError> {
    value
        .as_object()
        .cloned()
        .ok_or_else(|| StoreError::Schema("stored value is not a document".into()))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(None);
        };
        docs.iter()
            .find(|doc| matches(doc, filter))
            .map(as_document)
            .transpose()
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_owned())
            .or_default()
            .push(Value::Object(doc));
        Ok(())
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: Update,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(position) = docs.iter().position(|doc| matches(doc, filter)) else {
            return Ok(None);
        };
        let pre_image = as_document(&docs[position])?;
        apply_update(&mut docs[position], &update, filter)?;
        Ok(Some(pre_image))
    }
}

#[async_trait]
impl ReadStore for MemoryStore {
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let mut matched: Vec<&Value> = docs.iter().filter(|doc| matches(doc, filter)).collect();
        if let Some((field, order)) = &options.sort {
            matched.sort_by(|a, b| {
                let ordering = compare_field(a, b, field);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }
        matched
            .into_iter()
            .skip(options.skip)
            .take(options.limit.unwrap_or(usize::MAX))
            .map(as_document)
            .collect()
    }
}
