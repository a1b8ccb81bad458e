//! Replacement pair derivation.
//!
//! Each mapping record expands into literal search strings (absolute URLs
//! for every site root and scheme, the bare prefix, and the prefix without
//! its leading slash), all sharing the record's remote base as replacement.

use crate::store::MappingRecord;
use crate::url_model::with_scheme;

/// One literal search/replace instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementPair {
    pub search: String,
    pub replace: String,
}

impl ReplacementPair {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }
}

/// Root URLs the site is reachable under.
///
/// `home` is the public front-end URL and `site` the application URL; they
/// are usually identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRoots {
    pub home: String,
    pub site: String,
}

impl SiteRoots {
    pub fn new(home: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            site: site.into(),
        }
    }

    /// Same URL for both home and site.
    pub fn single(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::new(url.clone(), url)
    }

    /// Unique root variants in the order home/http, home/https, site/http,
    /// site/https. Roots without a `scheme://` form are skipped.
    pub fn variants(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(4);
        for root in [&self.home, &self.site] {
            for scheme in ["http", "https"] {
                let variant = with_scheme(root, scheme);
                if variant.contains("://") && !out.contains(&variant) {
                    out.push(variant);
                }
            }
        }
        out
    }
}

/// Expands mapping records into ordered replacement pairs.
///
/// Order follows the mappings; within one mapping the absolute pairs come
/// first, then the bare prefix, then the prefix without its leading slash.
/// An empty mapping list yields no pairs.
pub fn derive_pairs(mappings: &[MappingRecord], roots: &SiteRoots) -> Vec<ReplacementPair> {
    if mappings.is_empty() {
        return Vec::new();
    }

    let bases = roots.variants();
    let mut pairs = Vec::with_capacity(mappings.len() * (bases.len() + 2));

    for mapping in mappings {
        let prefix = mapping.local_prefix.as_str();
        let remote = mapping.remote_base.as_str();

        for base in &bases {
            pairs.push(ReplacementPair::new(
                format!("{}{}", base.trim_end_matches('/'), prefix),
                remote,
            ));
        }

        pairs.push(ReplacementPair::new(prefix, remote));

        let relative = prefix.trim_start_matches('/');
        if relative != prefix && !relative.is_empty() {
            pairs.push(ReplacementPair::new(relative, remote));
        }
    }

    tracing::debug!(
        mappings = mappings.len(),
        pairs = pairs.len(),
        "derived replacement pairs"
    );
    pairs
}

/// A later mapping whose prefix starts with an earlier one.
///
/// Substitution runs in mapping order, so every URL under the later prefix
/// is already rewritten by the earlier mapping and the later one never
/// applies to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub earlier: usize,
    pub later: usize,
    pub earlier_prefix: String,
    pub later_prefix: String,
}

/// Finds mappings shadowed by an earlier, more general (or identical) prefix.
pub fn find_overlaps(mappings: &[MappingRecord]) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    for (i, earlier) in mappings.iter().enumerate() {
        for (j, later) in mappings.iter().enumerate().skip(i + 1) {
            if later.local_prefix.starts_with(&earlier.local_prefix) {
                overlaps.push(Overlap {
                    earlier: i,
                    later: j,
                    earlier_prefix: earlier.local_prefix.clone(),
                    later_prefix: later.local_prefix.clone(),
                });
            }
        }
    }
    overlaps
}
