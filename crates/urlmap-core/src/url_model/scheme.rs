//! Scheme rewriting for site root URLs.

/// Returns `url` with its scheme replaced by `scheme`.
///
/// Protocol-relative URLs (`//host/...`) gain the scheme; strings without a
/// `scheme://` prefix are returned trimmed but otherwise unchanged.
pub fn with_scheme(url: &str, scheme: &str) -> String {
    let url = url.trim();
    if let Some(rest) = url.strip_prefix("//") {
        return format!("{scheme}://{rest}");
    }

    match url.split_once("://") {
        Some((current, rest))
            if !current.is_empty()
                && current.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            format!("{scheme}://{rest}")
        }
        _ => url.to_string(),
    }
}
