//! Ordered literal substitution.

use std::ops::Range;

use crate::pairs::ReplacementPair;

/// Applies every pair, in order, as a global literal replacement.
///
/// Pairs run sequentially, so an earlier pair wins wherever two pairs could
/// match the same text. Text equal to any pair's replacement is never
/// matched by a later pair: a relative search such as `/wp-content/...`
/// would otherwise match again inside a remote base that embeds the same
/// path, and rewriting already-mapped content would not be a no-op.
///
/// Known limitation: a search literal that itself contains a replacement
/// (a remote base that is a prefix of a local URL) never matches. Prefix
/// shadowing between mappings is reported by
/// [`find_overlaps`](crate::pairs::find_overlaps).
pub fn apply_pairs(input: &str, pairs: &[ReplacementPair]) -> String {
    if input.is_empty() || pairs.is_empty() {
        return input.to_string();
    }

    let mut current = input.to_string();
    for pair in pairs {
        if pair.search.is_empty() || !current.contains(pair.search.as_str()) {
            continue;
        }
        let guarded = replacement_spans(&current, pairs);
        current = replace_unguarded(&current, pair, &guarded);
    }
    current
}

/// Byte ranges of `haystack` occupied by any pair's replacement text.
fn replacement_spans(haystack: &str, pairs: &[ReplacementPair]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    for pair in pairs {
        if pair.replace.is_empty() {
            continue;
        }
        for (start, found) in haystack.match_indices(pair.replace.as_str()) {
            spans.push(start..start + found.len());
        }
    }
    spans
}

fn replace_unguarded(haystack: &str, pair: &ReplacementPair, guarded: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for (start, found) in haystack.match_indices(pair.search.as_str()) {
        let end = start + found.len();
        if guarded.iter().any(|g| g.start < end && start < g.end) {
            continue;
        }
        out.push_str(&haystack[last..start]);
        out.push_str(&pair.replace);
        last = end;
    }
    out.push_str(&haystack[last..]);
    out
}
