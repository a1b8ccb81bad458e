//! `urlmap show` – print effective mappings and whitelist.

use anyhow::Result;

use crate::cli::AppContext;

pub fn run_show(ctx: &AppContext, show_pairs: bool) -> Result<()> {
    let mapper = ctx.mapper();
    let outcome = mapper.store().load();

    if outcome.accepted.is_empty() {
        println!("No folder mappings configured.");
    } else {
        println!("{:<4} {:<40} {}", "#", "LOCAL PREFIX", "REMOTE BASE");
        for (i, m) in outcome.accepted.iter().enumerate() {
            println!("{:<4} {:<40} {}", i, m.local_prefix, m.remote_base);
        }
    }
    for r in &outcome.rejected {
        println!("ignored stored entry {}: {} ({})", r.index, r.entry, r.reason);
    }

    println!();
    println!("Meta keys rewritten at read time:");
    for key in mapper.store().meta_key_whitelist().keys() {
        println!("  {key}");
    }

    if show_pairs {
        println!();
        println!("Replacement pairs (applied in order):");
        for pair in mapper.replacement_pairs() {
            println!("  {} -> {}", pair.search, pair.replace);
        }
    }
    Ok(())
}
