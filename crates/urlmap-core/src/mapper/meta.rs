//! Metadata read binding.
//!
//! The host's filtered read ([`MetaDb::read_meta`]) calls
//! [`UrlMapper::rewrite_meta_value`] first. For whitelisted keys the binding
//! answers the read itself, loading raw rows through [`MetaDb::load_raw`],
//! which never goes back through the filtered read.

use anyhow::Result;

use crate::meta_db::{MetaDb, ObjectId};
use crate::pairs::ReplacementPair;
use crate::rewrite::deep_rewrite;
use crate::store::OptionStore;
use crate::value::MetaValue;

use super::UrlMapper;

/// Result of a metadata read.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaLookup {
    /// Most recently stored row.
    Single(MetaValue),
    /// Every row, in storage order.
    Multiple(Vec<MetaValue>),
}

impl MetaLookup {
    fn rewrite(self, pairs: &[ReplacementPair], max_depth: usize) -> Self {
        match self {
            MetaLookup::Single(value) => MetaLookup::Single(deep_rewrite(value, pairs, max_depth)),
            MetaLookup::Multiple(rows) => MetaLookup::Multiple(
                rows.into_iter()
                    .map(|row| deep_rewrite(row, pairs, max_depth))
                    .collect(),
            ),
        }
    }
}

impl<S: OptionStore> UrlMapper<S> {
    /// Rewrites a metadata value for `key` on `object_id`.
    ///
    /// Keys outside the whitelist (and reads with no mappings configured)
    /// get `current` back untouched. Otherwise a value the host already
    /// loaded is rewritten in place; with no `current` value the raw rows
    /// are loaded directly. No stored rows yields `None`.
    pub async fn rewrite_meta_value(
        &self,
        db: &MetaDb,
        object_id: ObjectId,
        key: &str,
        current: Option<MetaLookup>,
        single: bool,
    ) -> Result<Option<MetaLookup>> {
        if key.is_empty() || !self.store.meta_key_whitelist().allows(key) {
            return Ok(current);
        }

        let pairs = self.replacement_pairs();
        if pairs.is_empty() {
            return Ok(current);
        }

        let lookup = match current {
            Some(value) => Some(value),
            None => db.load_raw(object_id, key, single).await?,
        };
        Ok(lookup.map(|value| value.rewrite(&pairs, self.max_depth)))
    }
}
