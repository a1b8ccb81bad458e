//! Extension-point bindings.
//!
//! [`UrlMapper`] is what the host calls at render/read time. Every call
//! re-reads the mapping store and re-derives the replacement pairs, so an
//! administrator save is visible to the very next call.

mod media;
mod meta;

use crate::config::UrlmapConfig;
use crate::pairs::{derive_pairs, ReplacementPair, SiteRoots};
use crate::rewrite::{apply_pairs, deep_rewrite, DEFAULT_MAX_DEPTH};
use crate::store::{MappingStore, OptionStore};
use crate::value::MetaValue;

pub use media::{ImageSrc, Srcset, SrcsetSource};
pub use meta::MetaLookup;

/// Rewrite engine bound to a mapping store and the site's root URLs.
#[derive(Debug, Clone)]
pub struct UrlMapper<S> {
    store: MappingStore<S>,
    roots: SiteRoots,
    max_depth: usize,
}

impl<S: OptionStore> UrlMapper<S> {
    pub fn new(store: MappingStore<S>, roots: SiteRoots) -> Self {
        Self {
            store,
            roots,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Builds a mapper from the loaded config over the given option store.
    pub fn from_config(config: &UrlmapConfig, options: S) -> Self {
        Self::new(MappingStore::new(options), config.site_roots()).with_max_depth(config.max_depth)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn store(&self) -> &MappingStore<S> {
        &self.store
    }

    pub fn roots(&self) -> &SiteRoots {
        &self.roots
    }

    /// Pairs for the current configuration.
    pub fn replacement_pairs(&self) -> Vec<ReplacementPair> {
        derive_pairs(&self.store.mappings(), &self.roots)
    }

    /// Rewrites content such as post bodies, widget text and thumbnail HTML.
    pub fn rewrite_string(&self, content: &str) -> String {
        if content.is_empty() {
            return String::new();
        }
        apply_pairs(content, &self.replacement_pairs())
    }

    /// Rewrites a single attachment URL.
    pub fn rewrite_url(&self, url: &str) -> String {
        self.rewrite_string(url)
    }

    /// Rewrites every string leaf of a structured value, ungated.
    pub fn rewrite_value(&self, value: MetaValue) -> MetaValue {
        deep_rewrite(value, &self.replacement_pairs(), self.max_depth)
    }
}
