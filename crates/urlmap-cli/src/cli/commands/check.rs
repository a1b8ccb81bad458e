//! `urlmap check` – report shadowed mappings.

use anyhow::Result;
use urlmap_core::pairs::find_overlaps;

use crate::cli::AppContext;

pub fn run_check(ctx: &AppContext) -> Result<()> {
    let mappings = ctx.mapper().store().mappings();
    let overlaps = find_overlaps(&mappings);
    if overlaps.is_empty() {
        println!("OK: {} mapping(s), no shadowed prefixes.", mappings.len());
        return Ok(());
    }

    for o in &overlaps {
        println!(
            "mapping {} ({}) is shadowed by earlier mapping {} ({}); move it above to take effect",
            o.later, o.later_prefix, o.earlier, o.earlier_prefix
        );
    }
    anyhow::bail!("{} shadowed mapping(s)", overlaps.len())
}
