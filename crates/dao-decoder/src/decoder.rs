//! Schema-driven decoding of raw felt arrays into typed values.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use tracing::{debug, trace};

use dao_types::{felt_to_short_string, Address, BlockHeader, Felt, RawEvent, Timestamp};

use crate::ports::{BlockLookup, BlockLookupError, SchemaError, SchemaProvider};
use crate::schema::{ContractSchema, FieldType};

/// Errors that abort decoding of a single event.
///
/// None of these are fatal to the pipeline; the offending event is logged
/// and skipped.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The contract's schema has no event by this name.
    #[error("contract {contract} has no event '{event}' in its schema")]
    UnknownEvent { contract: Address, event: String },

    /// A field's declared type tag is not one this decoder understands.
    #[error("unknown field type '{ty}' for field '{field}' of event '{event}'")]
    UnknownFieldType {
        event: String,
        field: String,
        ty: String,
    },

    /// Raw data length does not match the schema's field count.
    #[error("event '{event}' carries {got} values, schema declares {expected}")]
    ArityMismatch {
        event: String,
        expected: usize,
        got: usize,
    },

    /// A boolean field held something other than 0 or 1.
    #[error("field '{field}' is not a boolean: {value}")]
    InvalidBool { field: String, value: String },

    /// A packed short string failed to unpack as UTF-8.
    #[error("field '{field}' is not a valid packed string: {reason}")]
    InvalidShortString { field: String, reason: String },

    /// A block-number reference exceeds u64.
    #[error("field '{field}' is not a valid block number")]
    BlockNumberOverflow { field: String },

    /// A typed accessor did not find the field in the decoded record.
    #[error("decoded event '{event}' has no field '{field}'")]
    MissingField { event: String, field: String },

    /// A typed accessor found the field with a different decoded type.
    #[error("field '{field}' of event '{event}' is not a {expected}")]
    FieldTypeMismatch {
        event: String,
        field: String,
        expected: &'static str,
    },

    /// A numeric field does not fit the handler's integer width.
    #[error("field '{field}' of event '{event}' overflows its target width")]
    NumericOverflow { event: String, field: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    BlockLookup(#[from] BlockLookupError),
}

/// One decoded felt, tagged with its interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Uint(Felt),
    Bool(bool),
    Address(Address),
    Str(String),
    /// A block-number reference, already resolved to the block's timestamp.
    Timestamp(Timestamp),
}

/// A typed event record: name plus decoded values in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub name: String,
    values: Vec<(String, DecodedValue)>,
}

impl DecodedEvent {
    fn value(&self, field: &str) -> Result<&DecodedValue, DecodeError> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
            .ok_or_else(|| DecodeError::MissingField {
                event: self.name.clone(),
                field: field.to_owned(),
            })
    }

    fn mismatch(&self, field: &str, expected: &'static str) -> DecodeError {
        DecodeError::FieldTypeMismatch {
            event: self.name.clone(),
            field: field.to_owned(),
            expected,
        }
    }

    pub fn uint(&self, field: &str) -> Result<Felt, DecodeError> {
        match self.value(field)? {
            DecodedValue::Uint(v) => Ok(*v),
            _ => Err(self.mismatch(field, "uint")),
        }
    }

    /// A uint field narrowed to u64, the width of ids, shares, and loot.
    pub fn u64(&self, field: &str) -> Result<u64, DecodeError> {
        let value = self.uint(field)?;
        if value > Felt::from(u64::MAX) {
            return Err(DecodeError::NumericOverflow {
                event: self.name.clone(),
                field: field.to_owned(),
            });
        }
        Ok(value.low_u64())
    }

    /// A uint field as a signed ledger amount.
    ///
    /// Bounded at i64 because amounts land in store documents as JSON
    /// numbers, which carry at most 64 bits; a wider felt aborts this
    /// event instead of surfacing later as a store write failure.
    pub fn amount(&self, field: &str) -> Result<i64, DecodeError> {
        let value = self.uint(field)?;
        if value > Felt::from(i64::MAX as u64) {
            return Err(DecodeError::NumericOverflow {
                event: self.name.clone(),
                field: field.to_owned(),
            });
        }
        Ok(value.low_u64() as i64)
    }

    pub fn bool(&self, field: &str) -> Result<bool, DecodeError> {
        match self.value(field)? {
            DecodedValue::Bool(v) => Ok(*v),
            _ => Err(self.mismatch(field, "bool")),
        }
    }

    pub fn address(&self, field: &str) -> Result<Address, DecodeError> {
        match self.value(field)? {
            DecodedValue::Address(v) => Ok(*v),
            _ => Err(self.mismatch(field, "address")),
        }
    }

    pub fn str(&self, field: &str) -> Result<&str, DecodeError> {
        match self.value(field)? {
            DecodedValue::Str(v) => Ok(v),
            _ => Err(self.mismatch(field, "string")),
        }
    }

    pub fn timestamp(&self, field: &str) -> Result<Timestamp, DecodeError> {
        match self.value(field)? {
            DecodedValue::Timestamp(v) => Ok(*v),
            _ => Err(self.mismatch(field, "timestamp")),
        }
    }
}

/// Cache sizing for the decoder.
#[derive(Debug, Clone, Copy)]
pub struct DecoderConfig {
    pub schema_cache_capacity: NonZeroUsize,
    pub block_cache_capacity: NonZeroUsize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            schema_cache_capacity: NonZeroUsize::new(128).unwrap(),
            block_cache_capacity: NonZeroUsize::new(128).unwrap(),
        }
    }
}

/// The event decoder.
///
/// Owns two bounded LRU caches: contract schemas keyed by address and
/// block timestamps keyed by block number. Both upstream sources serve
/// immutable data, so eviction is the only cache policy needed.
pub struct EventDecoder {
    schemas: Arc<dyn SchemaProvider>,
    blocks: Arc<dyn BlockLookup>,
    schema_cache: Mutex<LruCache<Address, Arc<ContractSchema>>>,
    block_cache: Mutex<LruCache<u64, Timestamp>>,
}

impl EventDecoder {
    pub fn new(
        schemas: Arc<dyn SchemaProvider>,
        blocks: Arc<dyn BlockLookup>,
        config: DecoderConfig,
    ) -> Self {
        Self {
            schemas,
            blocks,
            schema_cache: Mutex::new(LruCache::new(config.schema_cache_capacity)),
            block_cache: Mutex::new(LruCache::new(config.block_cache_capacity)),
        }
    }

    /// Decode one raw event against its contract schema.
    pub async fn decode(
        &self,
        event: &RawEvent,
        block: &BlockHeader,
    ) -> Result<DecodedEvent, DecodeError> {
        let schema = self.contract_schema(event.contract_address).await?;
        let event_schema =
            schema
                .event(&event.name)
                .ok_or_else(|| DecodeError::UnknownEvent {
                    contract: event.contract_address,
                    event: event.name.clone(),
                })?;

        if event_schema.fields.len() != event.data.len() {
            return Err(DecodeError::ArityMismatch {
                event: event.name.clone(),
                expected: event_schema.fields.len(),
                got: event.data.len(),
            });
        }

        let mut values = Vec::with_capacity(event.data.len());
        for (field, &felt) in event_schema.fields.iter().zip(&event.data) {
            let ty = FieldType::parse(&field.ty).ok_or_else(|| DecodeError::UnknownFieldType {
                event: event.name.clone(),
                field: field.name.clone(),
                ty: field.ty.clone(),
            })?;
            let value = self.decode_field(&field.name, ty, felt, block).await?;
            values.push((field.name.clone(), value));
        }

        let decoded = DecodedEvent {
            name: event.name.clone(),
            values,
        };
        trace!(event = %decoded.name, "decoded event");
        Ok(decoded)
    }

    async fn decode_field(
        &self,
        field: &str,
        ty: FieldType,
        felt: Felt,
        block: &BlockHeader,
    ) -> Result<DecodedValue, DecodeError> {
        match ty {
            FieldType::Felt => Ok(DecodedValue::Uint(felt)),
            FieldType::Bool => {
                if felt.is_zero() {
                    Ok(DecodedValue::Bool(false))
                } else if felt == Felt::one() {
                    Ok(DecodedValue::Bool(true))
                } else {
                    Err(DecodeError::InvalidBool {
                        field: field.to_owned(),
                        value: felt.to_string(),
                    })
                }
            }
            FieldType::Address => Ok(DecodedValue::Address(Address::from_felt(felt))),
            FieldType::ShortString => felt_to_short_string(felt)
                .map(DecodedValue::Str)
                .map_err(|e| DecodeError::InvalidShortString {
                    field: field.to_owned(),
                    reason: e.to_string(),
                }),
            FieldType::BlockNumber => {
                if felt > Felt::from(u64::MAX) {
                    return Err(DecodeError::BlockNumberOverflow {
                        field: field.to_owned(),
                    });
                }
                let number = felt.low_u64();
                let timestamp = self.block_timestamp(number, block).await?;
                Ok(DecodedValue::Timestamp(timestamp))
            }
        }
    }

    async fn contract_schema(
        &self,
        contract: Address,
    ) -> Result<Arc<ContractSchema>, DecodeError> {
        if let Some(schema) = self.schema_cache.lock().unwrap().get(&contract) {
            return Ok(Arc::clone(schema));
        }
        debug!(%contract, "schema cache miss, resolving");
        let schema = Arc::new(self.schemas.resolve(contract).await?);
        self.schema_cache
            .lock()
            .unwrap()
            .put(contract, Arc::clone(&schema));
        Ok(schema)
    }

    /// Timestamp of a referenced block. The common case is a field
    /// referencing the block the event was emitted in, which needs no
    /// lookup at all.
    async fn block_timestamp(
        &self,
        number: u64,
        current: &BlockHeader,
    ) -> Result<Timestamp, DecodeError> {
        if number == current.number {
            return Ok(current.timestamp);
        }
        if let Some(ts) = self.block_cache.lock().unwrap().get(&number) {
            return Ok(*ts);
        }
        debug!(block = number, "block cache miss, fetching header");
        let header = self.blocks.get_block(number).await?;
        self.block_cache.lock().unwrap().put(number, header.timestamp);
        Ok(header.timestamp)
    }
}
