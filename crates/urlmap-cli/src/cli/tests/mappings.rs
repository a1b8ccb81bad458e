//! Tests for show, set-mappings, set-meta-keys, rewrite, check.

use super::parse;
use crate::cli::commands::rows_from_args;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;
use urlmap_core::store::RawMapping;

#[test]
fn cli_parse_show() {
    match parse(&["urlmap", "show"]) {
        CliCommand::Show { pairs } => assert!(!pairs),
        _ => panic!("expected Show"),
    }
    match parse(&["urlmap", "show", "--pairs"]) {
        CliCommand::Show { pairs } => assert!(pairs),
        _ => panic!("expected Show --pairs"),
    }
}

#[test]
fn cli_parse_set_mappings_repeated_rows() {
    let cmd = parse(&[
        "urlmap",
        "set-mappings",
        "--map",
        "/wp-content/uploads/2023/",
        "https://cdn.example.com/2023/",
        "--map",
        "/media/",
        "https://cdn.example.com/media/",
    ]);
    match cmd {
        CliCommand::SetMappings { map } => {
            assert_eq!(
                rows_from_args(&map),
                vec![
                    RawMapping::new("/wp-content/uploads/2023/", "https://cdn.example.com/2023/"),
                    RawMapping::new("/media/", "https://cdn.example.com/media/"),
                ]
            );
        }
        _ => panic!("expected SetMappings"),
    }
}

#[test]
fn cli_parse_set_mappings_empty_clears() {
    match parse(&["urlmap", "set-mappings"]) {
        CliCommand::SetMappings { map } => assert!(rows_from_args(&map).is_empty()),
        _ => panic!("expected SetMappings"),
    }
}

#[test]
fn cli_rejects_half_a_mapping_row() {
    assert!(Cli::try_parse_from(["urlmap", "set-mappings", "--map", "/only-local/"]).is_err());
}

#[test]
fn cli_parse_set_meta_keys() {
    match parse(&["urlmap", "set-meta-keys", "--file", "keys.txt"]) {
        CliCommand::SetMetaKeys { file } => assert_eq!(file, Some(PathBuf::from("keys.txt"))),
        _ => panic!("expected SetMetaKeys"),
    }
}

#[test]
fn cli_parse_rewrite_stdin_and_file() {
    match parse(&["urlmap", "rewrite"]) {
        CliCommand::Rewrite { path } => assert!(path.is_none()),
        _ => panic!("expected Rewrite"),
    }
    match parse(&["urlmap", "rewrite", "post.html"]) {
        CliCommand::Rewrite { path } => assert_eq!(path, Some(PathBuf::from("post.html"))),
        _ => panic!("expected Rewrite with path"),
    }
}

#[test]
fn cli_parse_check_with_global_config() {
    let cli = Cli::try_parse_from(["urlmap", "check", "--config", "/tmp/urlmap.toml"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/urlmap.toml")));
    assert!(matches!(cli.command, CliCommand::Check));
}
