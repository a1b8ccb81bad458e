//! `urlmap set-mappings` – replace the folder mapping list.

use anyhow::Result;
use urlmap_core::store::RawMapping;

use crate::cli::AppContext;

/// Pairs up `--map LOCAL REMOTE` values into rows.
pub fn rows_from_args(values: &[String]) -> Vec<RawMapping> {
    values
        .chunks(2)
        .map(|chunk| RawMapping {
            local_prefix: chunk.first().cloned(),
            remote_base: chunk.get(1).cloned(),
        })
        .collect()
}

pub fn run_set_mappings(ctx: &AppContext, values: &[String]) -> Result<()> {
    let mapper = ctx.mapper();
    let outcome = mapper.store().save(&rows_from_args(values))?;

    println!("Saved {} mapping(s).", outcome.accepted.len());
    for m in &outcome.accepted {
        println!("  {} -> {}", m.local_prefix, m.remote_base);
    }
    for r in &outcome.rejected {
        println!("Skipped row {} ({}): {}", r.index, r.entry, r.reason);
    }
    Ok(())
}
