//! String substitution and structural rewriting.
//!
//! [`apply_pairs`] rewrites a single string; [`deep_rewrite`] walks a
//! [`MetaValue`](crate::value::MetaValue) tree and rewrites every string
//! leaf up to a depth cap.

mod deep;
mod substitute;

pub use deep::{deep_rewrite, DEFAULT_MAX_DEPTH};
pub use substitute::apply_pairs;
