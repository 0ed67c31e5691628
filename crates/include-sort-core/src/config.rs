use std::fmt::Display;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::batch::SortOptions;
use crate::error::{IncludeSortError, Result};

const CONFIG_FILE: &str = "config.toml";

/// Written by `include-sort config init`; every key is listed with its default.
const CONFIG_TEMPLATE: &str = r#"# include-sort
#
# Read from <base dir>/config.toml. The base dir is --base-dir, then
# $INCLUDE_SORT_BASE, then ~/.include-sort.

[sort]
# Stripped from the front of each sorted file's path (first match only)
# before the matching header is looked up:
#
#   ignored_prefixes = ["src/"]
#   src/net/socket.cc  ->  #include "net/socket.h" goes first
#
# Prefixes given with --ignore-prefix are added to these.
ignored_prefixes = []
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sort: SortConfig,
}

/// Sort-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SortConfig {
    /// Prefixes stripped before deriving the matching header
    #[serde(default)]
    pub ignored_prefixes: Vec<String>,
}

impl Config {
    /// `config.toml` under `base_dir`.
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Read `config.toml`, or the defaults when there is none.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = Self::path(base_dir);
        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| parse_error(&path, e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite `config.toml` with the current values.
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = Self::path(base_dir);
        let content = toml::to_string_pretty(self).map_err(|e| parse_error(&path, e))?;
        fs::create_dir_all(base_dir)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Write the commented template unless a config file is already there.
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = Self::path(base_dir);
        fs::create_dir_all(base_dir)?;
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => file.write_all(CONFIG_TEMPLATE.as_bytes())?,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }
        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "sort.ignored_prefixes" => Some(format!("{:?}", self.sort.ignored_prefixes)),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "sort.ignored_prefixes" => {
                self.sort.ignored_prefixes = parse_string_list(value);
                Ok(())
            }
            _ => Err(IncludeSortError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![(
            "sort.ignored_prefixes".to_string(),
            format!("{:?}", self.sort.ignored_prefixes),
        )]
    }

    /// Convert to SortOptions for a batch run
    pub fn to_sort_options(&self) -> SortOptions {
        SortOptions {
            ignored_prefixes: self.sort.ignored_prefixes.clone(),
            dry_run: false,
        }
    }
}

fn parse_error(path: &Path, e: impl Display) -> IncludeSortError {
    IncludeSortError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();

    // JSON array format: ["a", "b"]
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
