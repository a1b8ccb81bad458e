//! Remote base URL sanitization.

const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Characters kept in a remote base URL; everything else is dropped.
fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-~+_.?#=!&;,/:%@$|*'()[]\\".contains(c) || !c.is_ascii()
}

/// Sanitizes a remote base URL and guarantees a trailing `/`.
///
/// Encodes inner spaces as `%20` and strips characters that cannot appear in
/// a URL. Assumes `http://` when the value carries no scheme at all, and
/// rejects anything that does not parse as an absolute `http`/`https` URL
/// with a host. Returns `None` when the value is unusable.
pub fn sanitize_remote_base(raw: &str) -> Option<String> {
    let mut cleaned: String = raw
        .trim()
        .replace(' ', "%20")
        .chars()
        .filter(|c| is_url_char(*c))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    if !cleaned.contains(':') && !cleaned.starts_with(['/', '#', '?']) {
        cleaned.insert_str(0, "http://");
    }

    let parsed = url::Url::parse(&cleaned).ok()?;
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) || parsed.host_str().is_none() {
        return None;
    }

    if !cleaned.ends_with('/') {
        cleaned.push('/');
    }
    Some(cleaned)
}
