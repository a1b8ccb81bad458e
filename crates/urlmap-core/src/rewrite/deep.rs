//! Depth-bounded structural rewriting.

use crate::pairs::ReplacementPair;
use crate::value::MetaValue;

use super::apply_pairs;

/// Default recursion cap for [`deep_rewrite`].
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Rewrites every string leaf of `value`.
///
/// The root sits at depth 0 and every sequence element or record field one
/// level deeper than its parent. Nodes deeper than `max_depth` are returned
/// unmodified. Non-string scalars pass through untouched.
pub fn deep_rewrite(value: MetaValue, pairs: &[ReplacementPair], max_depth: usize) -> MetaValue {
    if pairs.is_empty() {
        return value;
    }
    walk(value, pairs, 0, max_depth)
}

fn walk(value: MetaValue, pairs: &[ReplacementPair], depth: usize, max_depth: usize) -> MetaValue {
    if depth > max_depth {
        return value;
    }

    match value {
        MetaValue::String(s) => MetaValue::String(apply_pairs(&s, pairs)),
        MetaValue::Sequence(items) => MetaValue::Sequence(
            items
                .into_iter()
                .map(|item| walk(item, pairs, depth + 1, max_depth))
                .collect(),
        ),
        MetaValue::Record(fields) => MetaValue::Record(
            fields
                .into_iter()
                .map(|(key, field)| (key, walk(field, pairs, depth + 1, max_depth)))
                .collect(),
        ),
        other @ MetaValue::Other(_) => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs() -> Vec<ReplacementPair> {
        vec![ReplacementPair::new("/up/", "https://cdn.example.com/up/")]
    }

    fn nest(levels: usize, leaf: MetaValue) -> MetaValue {
        (0..levels).fold(leaf, |inner, _| MetaValue::Sequence(vec![inner]))
    }

    #[test]
    fn rewrites_nested_records_and_sequences() {
        let value = MetaValue::from(json!({
            "file": "/up/a.mp3",
            "alts": ["/up/b.mp3", 3, null],
            "meta": { "thumb": "/up/c.jpg", "width": 10 }
        }));
        let expected = MetaValue::from(json!({
            "file": "https://cdn.example.com/up/a.mp3",
            "alts": ["https://cdn.example.com/up/b.mp3", 3, null],
            "meta": { "thumb": "https://cdn.example.com/up/c.jpg", "width": 10 }
        }));
        assert_eq!(deep_rewrite(value, &pairs(), DEFAULT_MAX_DEPTH), expected);
    }

    #[test]
    fn record_keys_are_not_rewritten() {
        let value = MetaValue::Record(vec![("/up/".to_string(), MetaValue::from("x"))]);
        assert_eq!(deep_rewrite(value.clone(), &pairs(), DEFAULT_MAX_DEPTH), value);
    }

    #[test]
    fn leaf_at_max_depth_is_rewritten() {
        let value = nest(DEFAULT_MAX_DEPTH, MetaValue::from("/up/a"));
        let expected = nest(DEFAULT_MAX_DEPTH, MetaValue::from("https://cdn.example.com/up/a"));
        assert_eq!(deep_rewrite(value, &pairs(), DEFAULT_MAX_DEPTH), expected);
    }

    #[test]
    fn subtree_past_max_depth_is_untouched() {
        let value = nest(DEFAULT_MAX_DEPTH + 1, MetaValue::from("/up/a"));
        assert_eq!(deep_rewrite(value.clone(), &pairs(), DEFAULT_MAX_DEPTH), value);

        let shallow = deep_rewrite(nest(3, MetaValue::from("/up/a")), &pairs(), 2);
        assert_eq!(shallow, nest(3, MetaValue::from("/up/a")));
    }

    #[test]
    fn no_pairs_returns_input() {
        let value = MetaValue::from("/up/a");
        assert_eq!(deep_rewrite(value.clone(), &[], DEFAULT_MAX_DEPTH), value);
    }
}
