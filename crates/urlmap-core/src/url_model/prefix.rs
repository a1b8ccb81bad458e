//! Local prefix canonicalization.

/// Normalizes a raw local folder prefix to `/segment/.../`.
///
/// - Trims surrounding whitespace; an empty result stays empty
/// - Strips every leading and trailing `/`, then adds exactly one of each
///
/// A prefix made only of slashes collapses to `/`. That value is canonical
/// here but the mapping store refuses to save it
/// (`RejectReason::RootPrefix`), since it would match every slash in the
/// served content. It is the only canonical prefix that is not accepted.
pub fn normalize_local_prefix(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let body = trimmed.trim_matches('/');
    if body.is_empty() {
        return "/".to_string();
    }

    let mut out = String::with_capacity(body.len() + 2);
    out.push('/');
    out.push_str(body);
    out.push('/');
    out
}
