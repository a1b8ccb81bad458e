//! URL and path helpers for mapping records.
//!
//! Canonicalizes local upload prefixes, sanitizes remote base URLs, and swaps
//! URL schemes when expanding site roots.

mod prefix;
mod remote;
mod scheme;

pub use prefix::normalize_local_prefix;
pub use remote::sanitize_remote_base;
pub use scheme::with_scheme;
