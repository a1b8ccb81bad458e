//! CLI command handlers, one file per command.

mod check;
mod completions;
mod meta;
mod rewrite;
mod set_mappings;
mod set_meta_keys;
mod show;

pub use check::run_check;
pub use completions::{run_completions, run_man};
pub use meta::{run_meta_add, run_meta_delete, run_meta_get};
pub use rewrite::run_rewrite;
pub use set_mappings::run_set_mappings;
#[cfg(test)]
pub use set_mappings::rows_from_args;
pub use set_meta_keys::run_set_meta_keys;
pub use show::run_show;
