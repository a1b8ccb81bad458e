//! `urlmap meta add|get|delete` – object metadata through the host read path.

use anyhow::{Context, Result};
use serde_json::Value;
use urlmap_core::mapper::MetaLookup;
use urlmap_core::meta_db::ObjectId;
use urlmap_core::value::MetaValue;

use crate::cli::AppContext;

pub async fn run_meta_add(
    ctx: &AppContext,
    object_id: ObjectId,
    key: &str,
    value: &str,
    json: bool,
) -> Result<()> {
    let value = if json {
        let parsed: Value = serde_json::from_str(value).context("parse --json value")?;
        MetaValue::from(parsed)
    } else {
        MetaValue::from(value)
    };

    let db = ctx.meta_db().await?;
    let id = db.add_meta(object_id, key, &value).await?;
    println!("Added meta {id} ({key}) to object {object_id}");
    Ok(())
}

pub async fn run_meta_get(ctx: &AppContext, object_id: ObjectId, key: &str, all: bool) -> Result<()> {
    let db = ctx.meta_db().await?;
    let mapper = ctx.mapper();
    match db.read_meta(&mapper, object_id, key, !all).await? {
        None => println!("(absent)"),
        Some(MetaLookup::Single(value)) => println!("{}", render(value)),
        Some(MetaLookup::Multiple(rows)) => {
            for row in rows {
                println!("{}", render(row));
            }
        }
    }
    Ok(())
}

pub async fn run_meta_delete(ctx: &AppContext, object_id: ObjectId, key: &str) -> Result<()> {
    let db = ctx.meta_db().await?;
    let removed = db.delete_meta(object_id, key).await?;
    println!("Removed {removed} row(s) for {key} on object {object_id}");
    Ok(())
}

fn render(value: MetaValue) -> String {
    match value {
        MetaValue::String(s) => s,
        other => Value::from(other).to_string(),
    }
}
