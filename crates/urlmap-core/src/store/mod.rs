//! Mapping store adapter.
//!
//! Reads and writes the two persisted options (`mappings` and `meta_keys`)
//! through an [`OptionStore`], normalizing every entry on the way in and on
//! the way out. Malformed entries never fail a load or a save: they are left
//! out of the effective set and reported as [`Rejected`] so a caller can
//! show why a row vanished.

mod mappings;
mod meta_keys;
mod options;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::gate::MetaKeyWhitelist;

pub use options::{JsonFileOptions, MemoryOptions, OptionStore};

/// Option name holding the ordered mapping list.
pub const MAPPINGS_OPTION: &str = "mappings";
/// Option name holding the meta-key whitelist.
pub const META_KEYS_OPTION: &str = "meta_keys";

/// A normalized local-prefix → remote-base mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    /// Canonical `/folder/.../` prefix.
    pub local_prefix: String,
    /// Absolute `http(s)` URL ending in `/`.
    pub remote_base: String,
}

/// One row as submitted by an administrator, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMapping {
    #[serde(default)]
    pub local_prefix: Option<String>,
    #[serde(default)]
    pub remote_base: Option<String>,
}

impl RawMapping {
    pub fn new(local_prefix: impl Into<String>, remote_base: impl Into<String>) -> Self {
        Self {
            local_prefix: Some(local_prefix.into()),
            remote_base: Some(remote_base.into()),
        }
    }
}

/// Why an entry was left out of the effective mapping set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("entry is not a mapping record")]
    NotARecord,
    #[error("local prefix is empty")]
    EmptyLocalPrefix,
    #[error("local prefix `/` would match every path")]
    RootPrefix,
    #[error("remote base URL is empty")]
    EmptyRemoteBase,
    #[error("remote base URL `{0}` is not an absolute http(s) URL")]
    InvalidRemoteBase(String),
}

/// An entry dropped during load or save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// Position of the entry in the raw input.
    pub index: usize,
    /// Display form of the raw entry.
    pub entry: String,
    pub reason: RejectReason,
}

/// Accepted records plus the entries that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOutcome {
    pub accepted: Vec<MappingRecord>,
    pub rejected: Vec<Rejected>,
}

/// Store adapter over an injected [`OptionStore`].
#[derive(Debug, Clone)]
pub struct MappingStore<S> {
    options: S,
}

impl<S: OptionStore> MappingStore<S> {
    pub fn new(options: S) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &S {
        &self.options
    }

    /// Effective mapping list; shorthand for `load().accepted`.
    pub fn mappings(&self) -> Vec<MappingRecord> {
        self.load().accepted
    }

    /// Effective meta-key whitelist.
    pub fn meta_key_whitelist(&self) -> MetaKeyWhitelist {
        meta_keys::whitelist_from_option(self.read_option(META_KEYS_OPTION))
    }

    /// Reads an option, treating an unreadable store as "not set".
    fn read_option(&self, name: &str) -> Option<Value> {
        match self.options.get_option(name) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(option = name, "option unreadable, using defaults: {err:#}");
                None
            }
        }
    }
}

/// Coerces a scalar JSON value to text; structured or null values give "".
fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        _ => String::new(),
    }
}
