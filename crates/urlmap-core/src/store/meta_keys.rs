//! Loading and saving the meta-key whitelist.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::gate::{sanitize_key, MetaKeyWhitelist, FALLBACK_SAVED_META_KEY};

use super::{coerce_text, MappingStore, OptionStore, META_KEYS_OPTION};

/// Splits on `\r\n`, `\r` or `\n`.
fn split_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(['\r', '\n'])
}

/// Builds the effective whitelist from the stored option, which may be a
/// list or a newline-delimited blob.
pub(super) fn whitelist_from_option(stored: Option<Value>) -> MetaKeyWhitelist {
    match stored {
        Some(Value::String(blob)) => MetaKeyWhitelist::from_raw_keys(split_lines(&blob)),
        Some(Value::Array(items)) => {
            MetaKeyWhitelist::from_raw_keys(items.iter().map(coerce_text))
        }
        _ => MetaKeyWhitelist::defaults(),
    }
}

impl<S: OptionStore> MappingStore<S> {
    /// Saves a newline-delimited key list as submitted from a text area.
    ///
    /// Keys are canonicalized; an empty result saves the fallback key.
    /// Returns the keys that were persisted.
    pub fn save_meta_keys(&self, raw_text: &str) -> Result<Vec<String>> {
        let mut keys: Vec<String> = Vec::new();
        for key in split_lines(raw_text).map(sanitize_key) {
            if !key.is_empty() && !keys.contains(&key) {
                keys.push(key);
            }
        }
        if keys.is_empty() {
            keys.push(FALLBACK_SAVED_META_KEY.to_string());
        }

        self.options
            .update_option(META_KEYS_OPTION, Value::from(keys.clone()))
            .context("persist meta keys")?;
        tracing::info!(keys = keys.len(), "saved meta-key whitelist");
        Ok(keys)
    }
}
