use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pairs::SiteRoots;
use crate::rewrite::DEFAULT_MAX_DEPTH;

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Global configuration loaded from `~/.config/urlmap/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlmapConfig {
    /// Application root URL of the site (scheme is ignored; both are matched).
    pub site_url: String,
    /// Public front-end URL when it differs from `site_url`.
    #[serde(default)]
    pub home_url: Option<String>,
    /// Recursion cap for structured metadata rewriting.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Override for the options file (mappings and meta-key whitelist).
    #[serde(default)]
    pub options_path: Option<PathBuf>,
    /// Override for the metadata database.
    #[serde(default)]
    pub meta_db_path: Option<PathBuf>,
}

impl Default for UrlmapConfig {
    fn default() -> Self {
        Self {
            site_url: "http://localhost".to_string(),
            home_url: None,
            max_depth: DEFAULT_MAX_DEPTH,
            options_path: None,
            meta_db_path: None,
        }
    }
}

impl UrlmapConfig {
    /// Root URLs used to expand absolute replacement pairs.
    pub fn site_roots(&self) -> SiteRoots {
        let home = self.home_url.as_deref().unwrap_or(&self.site_url);
        SiteRoots::new(home, self.site_url.as_str())
    }

    /// Rejects root URLs that are not absolute `http`/`https` URLs with a host.
    pub fn validate(&self) -> Result<()> {
        check_root_url("site_url", &self.site_url)?;
        if let Some(home) = &self.home_url {
            check_root_url("home_url", home)?;
        }
        Ok(())
    }
}

fn check_root_url(field: &str, value: &str) -> Result<()> {
    let parsed =
        url::Url::parse(value.trim()).with_context(|| format!("{field} is not a URL: {value:?}"))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        bail!("{field} must be an http(s) URL with a host: {value:?}");
    }
    Ok(())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlmap")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlmapConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<UrlmapConfig> {
    if !path.exists() {
        let default_cfg = UrlmapConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: UrlmapConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
