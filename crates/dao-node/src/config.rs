//! # Node Configuration
//!
//! Environment-driven configuration for the indexer binary. Every field
//! has a development default; production runs must at least override the
//! governance contract and bank addresses, which [`NodeConfig::validate`]
//! enforces before anything is wired.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

use dao_decoder::DecoderConfig;
use dao_types::Address;

/// Complete indexer configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// The governance contract whose events are indexed.
    pub governance_contract: Address,
    /// The treasury address the Bank document is keyed by.
    pub bank_address: Address,
    /// Path to the JSONL block-events feed.
    pub feed_path: PathBuf,
    /// Schema-by-contract LRU capacity.
    pub schema_cache_capacity: NonZeroUsize,
    /// Block-timestamp LRU capacity.
    pub block_cache_capacity: NonZeroUsize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let defaults = DecoderConfig::default();
        Self {
            governance_contract: Address::default(),
            bank_address: Address::default(),
            feed_path: PathBuf::from("./feed.jsonl"),
            schema_cache_capacity: defaults.schema_cache_capacity,
            block_cache_capacity: defaults.block_cache_capacity,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The governance contract address was left at its zero default.
    #[error("governance contract address is unset; set DAO_CONTRACT_ADDRESS")]
    UnsetContractAddress,

    /// The bank address was left at its zero default.
    #[error("bank address is unset; set DAO_BANK_ADDRESS")]
    UnsetBankAddress,
}

impl NodeConfig {
    /// Reject a configuration that would index against zero addresses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.governance_contract == Address::default() {
            return Err(ConfigError::UnsetContractAddress);
        }
        if self.bank_address == Address::default() {
            return Err(ConfigError::UnsetBankAddress);
        }
        Ok(())
    }

    /// Defaults overridden by `DAO_*` environment variables. Malformed
    /// values are warned about and ignored rather than silently applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("DAO_CONTRACT_ADDRESS") {
            match raw.parse() {
                Ok(address) => config.governance_contract = address,
                Err(e) => warn!("ignoring DAO_CONTRACT_ADDRESS: {e}"),
            }
        }
        if let Ok(raw) = std::env::var("DAO_BANK_ADDRESS") {
            match raw.parse() {
                Ok(address) => config.bank_address = address,
                Err(e) => warn!("ignoring DAO_BANK_ADDRESS: {e}"),
            }
        }
        if let Ok(raw) = std::env::var("DAO_FEED_PATH") {
            config.feed_path = PathBuf::from(raw);
        }
        if let Ok(raw) = std::env::var("DAO_SCHEMA_CACHE_CAPACITY") {
            match raw.parse() {
                Ok(capacity) => config.schema_cache_capacity = capacity,
                Err(_) => warn!("ignoring DAO_SCHEMA_CACHE_CAPACITY: not a positive integer"),
            }
        }
        if let Ok(raw) = std::env::var("DAO_BLOCK_CACHE_CAPACITY") {
            match raw.parse() {
                Ok(capacity) => config.block_cache_capacity = capacity,
                Err(_) => warn!("ignoring DAO_BLOCK_CACHE_CAPACITY: not a positive integer"),
            }
        }

        config
    }

    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            schema_cache_capacity: self.schema_cache_capacity,
            block_cache_capacity: self.block_cache_capacity,
        }
    }
}
