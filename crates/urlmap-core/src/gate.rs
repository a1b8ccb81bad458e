//! Meta-key whitelist gate.
//!
//! Structured metadata is only rewritten for keys listed here, so unrelated
//! metadata (serialized settings, binary-safe blobs) is never touched.

/// Keys that are always rewritten, whatever the administrator configured.
pub const DEFAULT_META_KEYS: &[&str] = &["word_audio_file", "audio_file_path"];

/// Key persisted when an administrator saves an empty whitelist.
pub const FALLBACK_SAVED_META_KEY: &str = "word_audio_file";

/// Canonicalizes a metadata key: ASCII-lowercased, keeping only `a-z`,
/// `0-9`, `_` and `-`.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Effective set of metadata keys eligible for structural rewriting.
///
/// Keys are kept in first-seen order (built-in defaults first) without
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaKeyWhitelist {
    keys: Vec<String>,
}

impl MetaKeyWhitelist {
    /// Builds a whitelist from already-split raw keys.
    ///
    /// Keys are canonicalized and empties dropped; the built-in defaults are
    /// always included.
    pub fn from_raw_keys<I, K>(raw: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut keys: Vec<String> = DEFAULT_META_KEYS.iter().map(|k| k.to_string()).collect();
        for key in raw {
            let key = sanitize_key(key.as_ref());
            if !key.is_empty() && !keys.contains(&key) {
                keys.push(key);
            }
        }
        Self { keys }
    }

    /// Whitelist holding only the built-in defaults.
    pub fn defaults() -> Self {
        Self::from_raw_keys(std::iter::empty::<&str>())
    }

    /// Returns true if structural rewriting may run for `key`.
    pub fn allows(&self, key: &str) -> bool {
        let key = sanitize_key(key);
        !key.is_empty() && self.keys.iter().any(|k| *k == key)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl Default for MetaKeyWhitelist {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_key_lowercases_and_strips() {
        assert_eq!(sanitize_key("Word_Audio_File"), "word_audio_file");
        assert_eq!(sanitize_key(" my key!\t"), "mykey");
        assert_eq!(sanitize_key("hero-image.url"), "hero-imageurl");
        assert_eq!(sanitize_key("ключ"), "");
    }

    #[test]
    fn defaults_always_present() {
        let wl = MetaKeyWhitelist::from_raw_keys(["gallery_urls"]);
        assert_eq!(
            wl.keys(),
            &["word_audio_file", "audio_file_path", "gallery_urls"]
        );
    }

    #[test]
    fn duplicates_and_empties_dropped() {
        let wl = MetaKeyWhitelist::from_raw_keys(["", "WORD_AUDIO_FILE", "x", "X", "!!"]);
        assert_eq!(wl.keys(), &["word_audio_file", "audio_file_path", "x"]);
    }

    #[test]
    fn allows_canonicalizes_the_lookup_key() {
        let wl = MetaKeyWhitelist::from_raw_keys(["gallery_urls"]);
        assert!(wl.allows("gallery_urls"));
        assert!(wl.allows("Gallery_URLs"));
        assert!(wl.allows("word_audio_file"));
        assert!(!wl.allows("_thumbnail_id"));
        assert!(!wl.allows(""));
        assert!(!wl.allows("???"));
    }
}
