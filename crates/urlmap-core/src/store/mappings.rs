//! Loading and saving the mapping list.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::url_model::{normalize_local_prefix, sanitize_remote_base};

use super::{
    coerce_text, MappingOutcome, MappingRecord, MappingStore, OptionStore, RawMapping, RejectReason,
    Rejected, MAPPINGS_OPTION,
};

impl<S: OptionStore> MappingStore<S> {
    /// Loads the stored mapping list, dropping entries that fail
    /// normalization. Order is preserved.
    pub fn load(&self) -> MappingOutcome {
        let entries = match self.read_option(MAPPINGS_OPTION) {
            Some(Value::Array(items)) => items,
            Some(Value::Object(map)) => map.into_iter().map(|(_, v)| v).collect(),
            Some(other) => {
                tracing::debug!("stored mappings are not a list, ignoring: {other}");
                Vec::new()
            }
            None => Vec::new(),
        };

        let mut outcome = MappingOutcome::default();
        for (index, entry) in entries.iter().enumerate() {
            let result = match entry {
                Value::Object(fields) => normalize_entry(
                    fields.get("local_prefix").map(coerce_text).as_deref(),
                    fields.get("remote_base").map(coerce_text).as_deref(),
                ),
                _ => Err(RejectReason::NotARecord),
            };
            match result {
                Ok(record) => outcome.accepted.push(record),
                Err(reason) => {
                    tracing::debug!(index, %reason, "dropping stored mapping");
                    outcome.rejected.push(Rejected {
                        index,
                        entry: entry.to_string(),
                        reason,
                    });
                }
            }
        }
        outcome
    }

    /// Normalizes submitted rows and persists the ones that pass.
    ///
    /// Rejected rows are omitted from what is stored; they never abort the
    /// save. Only I/O failures of the option store are errors.
    pub fn save(&self, rows: &[RawMapping]) -> Result<MappingOutcome> {
        let mut outcome = MappingOutcome::default();
        for (index, row) in rows.iter().enumerate() {
            match normalize_entry(row.local_prefix.as_deref(), row.remote_base.as_deref()) {
                Ok(record) => outcome.accepted.push(record),
                Err(reason) => outcome.rejected.push(Rejected {
                    index,
                    entry: format!(
                        "{} -> {}",
                        row.local_prefix.as_deref().unwrap_or(""),
                        row.remote_base.as_deref().unwrap_or("")
                    ),
                    reason,
                }),
            }
        }

        let value = serde_json::to_value(&outcome.accepted).context("serialize mappings")?;
        self.options
            .update_option(MAPPINGS_OPTION, value)
            .context("persist mappings")?;
        tracing::info!(
            saved = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            "saved folder mappings"
        );
        Ok(outcome)
    }
}

/// Applies the per-entry rules shared by load and save.
fn normalize_entry(
    local: Option<&str>,
    remote: Option<&str>,
) -> std::result::Result<MappingRecord, RejectReason> {
    let local = local.unwrap_or("").trim();
    let remote = remote.unwrap_or("").trim();

    if local.is_empty() {
        return Err(RejectReason::EmptyLocalPrefix);
    }
    if remote.is_empty() {
        return Err(RejectReason::EmptyRemoteBase);
    }

    let local_prefix = normalize_local_prefix(local);
    if local_prefix == "/" {
        return Err(RejectReason::RootPrefix);
    }

    let remote_base = sanitize_remote_base(remote)
        .ok_or_else(|| RejectReason::InvalidRemoteBase(remote.to_string()))?;

    Ok(MappingRecord {
        local_prefix,
        remote_base,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryOptions;
    use serde_json::json;

    fn store_with(value: Value) -> MappingStore<MemoryOptions> {
        MappingStore::new(MemoryOptions::new().with_option(MAPPINGS_OPTION, value))
    }

    #[test]
    fn load_normalizes_entries() {
        let store = store_with(json!([
            { "local_prefix": " wp-content/uploads/2023 ", "remote_base": "https://cdn.example.com/b/2023" }
        ]));
        let outcome = store.load();
        assert!(outcome.rejected.is_empty());
        assert_eq!(
            outcome.accepted,
            vec![MappingRecord {
                local_prefix: "/wp-content/uploads/2023/".to_string(),
                remote_base: "https://cdn.example.com/b/2023/".to_string(),
            }]
        );
    }

    #[test]
    fn load_drops_bad_entries_and_keeps_order() {
        let store = store_with(json!([
            { "local_prefix": "/a/", "remote_base": "https://cdn.example.com/a/" },
            "not a record",
            { "local_prefix": "", "remote_base": "https://cdn.example.com/x/" },
            { "local_prefix": "/y/" },
            { "local_prefix": "/z/", "remote_base": "javascript:alert(1)" },
            { "local_prefix": "//", "remote_base": "https://cdn.example.com/root/" },
            { "local_prefix": "/b/", "remote_base": "https://cdn.example.com/b/" }
        ]));
        let outcome = store.load();
        let prefixes: Vec<&str> = outcome
            .accepted
            .iter()
            .map(|m| m.local_prefix.as_str())
            .collect();
        assert_eq!(prefixes, vec!["/a/", "/b/"]);

        let reasons: Vec<(usize, RejectReason)> = outcome
            .rejected
            .iter()
            .map(|r| (r.index, r.reason.clone()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (1, RejectReason::NotARecord),
                (2, RejectReason::EmptyLocalPrefix),
                (3, RejectReason::EmptyRemoteBase),
                (4, RejectReason::InvalidRemoteBase("javascript:alert(1)".to_string())),
                (5, RejectReason::RootPrefix),
            ]
        );
    }

    #[test]
    fn load_tolerates_non_list_and_missing_option() {
        assert_eq!(store_with(json!("garbage")).load(), MappingOutcome::default());
        assert_eq!(
            MappingStore::new(MemoryOptions::new()).load(),
            MappingOutcome::default()
        );
    }

    #[test]
    fn load_accepts_keyed_map_and_numeric_prefix() {
        let store = store_with(json!({
            "0": { "local_prefix": 2023, "remote_base": "https://cdn.example.com/2023/" }
        }));
        assert_eq!(store.mappings()[0].local_prefix, "/2023/");
    }

    #[test]
    fn save_persists_only_valid_rows() {
        let store = MappingStore::new(MemoryOptions::new());
        let outcome = store
            .save(&[
                RawMapping::new("/wp-content/uploads/2023", "https://cdn.example.com/2023"),
                RawMapping::new("", ""),
                RawMapping::new("/x/", "mailto:someone@example.com"),
            ])
            .unwrap();
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.rejected.len(), 2);
        assert_eq!(outcome.rejected[0].index, 1);
        assert_eq!(outcome.rejected[1].entry, "/x/ -> mailto:someone@example.com");

        let stored = store.options().get_option(MAPPINGS_OPTION).unwrap().unwrap();
        assert_eq!(
            stored,
            json!([{
                "local_prefix": "/wp-content/uploads/2023/",
                "remote_base": "https://cdn.example.com/2023/"
            }])
        );
        assert_eq!(store.mappings(), outcome.accepted);
    }

    #[test]
    fn save_empty_clears_mappings() {
        let store = store_with(json!([
            { "local_prefix": "/a/", "remote_base": "https://cdn.example.com/a/" }
        ]));
        store.save(&[]).unwrap();
        assert!(store.mappings().is_empty());
    }

    #[test]
    fn save_refuses_root_prefix() {
        let store = MappingStore::new(MemoryOptions::new());
        let outcome = store
            .save(&[RawMapping::new("/", "https://cdn.example.com/")])
            .unwrap();
        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.rejected[0].reason, RejectReason::RootPrefix);
        assert!(store.mappings().is_empty());
    }

    #[test]
    fn save_keeps_spaces_in_remote_base_encoded() {
        let store = MappingStore::new(MemoryOptions::new());
        let outcome = store
            .save(&[RawMapping::new(
                "/wp-content/uploads/",
                "https://f002.backblazeb2.com/file/my bucket",
            )])
            .unwrap();
        assert_eq!(
            outcome.accepted[0].remote_base,
            "https://f002.backblazeb2.com/file/my%20bucket/"
        );
    }
}
