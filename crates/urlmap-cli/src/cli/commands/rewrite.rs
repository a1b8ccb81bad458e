//! `urlmap rewrite [PATH]` – rewrite content and print it.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;

use crate::cli::AppContext;

pub fn run_rewrite(ctx: &AppContext, path: Option<&Path>) -> Result<()> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read input: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read input from stdin")?;
            buf
        }
    };

    let rewritten = ctx.mapper().rewrite_string(&content);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rewritten.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
