//! CLI host for urlmap: the administrative surface plus a few render-time
//! entry points for scripting.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use urlmap_core::config::{self, UrlmapConfig};
use urlmap_core::mapper::UrlMapper;
use urlmap_core::meta_db::{MetaDb, ObjectId};
use urlmap_core::store::JsonFileOptions;

use commands::{
    run_check, run_completions, run_man, run_meta_add, run_meta_delete, run_meta_get,
    run_rewrite, run_set_mappings, run_set_meta_keys, run_show,
};

/// Top-level CLI for urlmap.
#[derive(Debug, Parser)]
#[command(name = "urlmap")]
#[command(
    about = "urlmap: rewrite local upload URLs to remote object-storage URLs at output time",
    long_about = None
)]
pub struct Cli {
    /// Use this config file instead of ~/.config/urlmap/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show the effective folder mappings and meta-key whitelist.
    Show {
        /// Also list the derived search/replace pairs.
        #[arg(long)]
        pairs: bool,
    },

    /// Replace all folder mappings. Rows that fail validation are reported and skipped.
    SetMappings {
        /// One mapping row; repeat for more. No rows clears every mapping.
        #[arg(long = "map", num_args = 2, value_names = ["LOCAL_PREFIX", "REMOTE_BASE"])]
        map: Vec<String>,
    },

    /// Replace the meta-key whitelist (one key per line).
    SetMetaKeys {
        /// Read keys from this file instead of stdin.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Rewrite content from a file (or stdin) and print it.
    Rewrite {
        /// Input file; stdin when omitted.
        path: Option<PathBuf>,
    },

    /// Report mappings shadowed by an earlier, more general prefix.
    Check,

    /// Object metadata commands.
    #[command(subcommand)]
    Meta(MetaCommand),

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page.
    Man,
}

#[derive(Debug, Subcommand)]
pub enum MetaCommand {
    /// Append a metadata row.
    Add {
        object_id: ObjectId,
        key: String,
        value: String,
        /// Parse VALUE as JSON (array/object) instead of storing it as text.
        #[arg(long)]
        json: bool,
    },

    /// Read metadata through the rewrite binding.
    Get {
        object_id: ObjectId,
        key: String,
        /// Return every row instead of the most recent one.
        #[arg(long)]
        all: bool,
    },

    /// Delete every row for a key.
    Delete { object_id: ObjectId, key: String },
}

/// Loaded config plus the stores it points at.
pub(crate) struct AppContext {
    pub config: UrlmapConfig,
    pub options: JsonFileOptions,
}

impl AppContext {
    fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", config);
        let options = match &config.options_path {
            Some(path) => JsonFileOptions::at(path),
            None => JsonFileOptions::open_default()?,
        };
        Ok(Self { config, options })
    }

    pub fn mapper(&self) -> UrlMapper<&JsonFileOptions> {
        UrlMapper::from_config(&self.config, &self.options)
    }

    pub async fn meta_db(&self) -> Result<MetaDb> {
        let db = match &self.config.meta_db_path {
            Some(path) => MetaDb::open_at(path).await,
            None => MetaDb::open_default().await,
        };
        db.context("open metadata database")
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let ctx = AppContext::load(cli.config.as_ref())?;
        match cli.command {
            CliCommand::Show { pairs } => run_show(&ctx, pairs)?,
            CliCommand::SetMappings { map } => run_set_mappings(&ctx, &map)?,
            CliCommand::SetMetaKeys { file } => run_set_meta_keys(&ctx, file.as_deref())?,
            CliCommand::Rewrite { path } => run_rewrite(&ctx, path.as_deref())?,
            CliCommand::Check => run_check(&ctx)?,
            CliCommand::Meta(MetaCommand::Add {
                object_id,
                key,
                value,
                json,
            }) => run_meta_add(&ctx, object_id, &key, &value, json).await?,
            CliCommand::Meta(MetaCommand::Get {
                object_id,
                key,
                all,
            }) => run_meta_get(&ctx, object_id, &key, all).await?,
            CliCommand::Meta(MetaCommand::Delete { object_id, key }) => {
                run_meta_delete(&ctx, object_id, &key).await?
            }
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
