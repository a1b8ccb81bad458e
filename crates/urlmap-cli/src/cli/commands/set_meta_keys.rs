//! `urlmap set-meta-keys` – replace the meta-key whitelist.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::cli::AppContext;

pub fn run_set_meta_keys(ctx: &AppContext, file: Option<&Path>) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read meta keys: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read meta keys from stdin")?;
            buf
        }
    };

    let mapper = ctx.mapper();
    let saved = mapper.store().save_meta_keys(&text)?;
    println!("Saved {} meta key(s): {}", saved.len(), saved.join(", "));
    Ok(())
}
