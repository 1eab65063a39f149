//! Configuration discovery and effective settings resolution.
//!
//! Diagview reads `diagview.toml|yaml|yml` from the working directory (or the
//! closest ancestor holding one, stopping at a `.git` directory) and merges
//! it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `addr`: `127.0.0.1:8080`
//! - `output`: `human`
//! - `[index]`: see `IndexConfig::default`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use crate::models::rules::IndexConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

const CONFIG_NAMES: [&str; 3] = ["diagview.toml", "diagview.yaml", "diagview.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `diagview.toml|yaml`.
pub struct DiagviewConfig {
    pub addr: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub index: Option<IndexConfig>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    /// Directory relative diagnostic paths are resolved against.
    pub working_dir: PathBuf,
    /// Config file that was loaded, if any.
    pub config_path: Option<PathBuf>,
    pub addr: String,
    pub output: String,
    pub index: IndexConfig,
}

/// Walk upward from `start` looking for a config file.
///
/// Stops at the first directory holding `diagview.toml|yaml|yml` or `.git`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        for name in CONFIG_NAMES {
            let p = cur.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// Load a `DiagviewConfig`, picking the parser by file extension.
pub fn load_config(path: &Path) -> Result<DiagviewConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// `cli_config` bypasses discovery. A relative `cli_working_dir` is made
/// absolute against the process working directory.
pub fn resolve_effective(
    cli_working_dir: Option<&str>,
    cli_config: Option<&str>,
    cli_output: Option<&str>,
    cli_addr: Option<&str>,
) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli_working_dir.unwrap_or("."));
    let working_dir = absolutize(&start);

    let config_path = match cli_config {
        Some(p) => Some(PathBuf::from(p)),
        None => find_config(&working_dir),
    };
    let cfg = match config_path.as_deref() {
        Some(p) => load_config(p)?,
        None => DiagviewConfig::default(),
    };

    let addr = cli_addr
        .map(|s| s.to_string())
        .or(cfg.addr)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    Ok(Effective {
        working_dir,
        config_path,
        addr,
        output,
        index: cfg.index.unwrap_or_default(),
    })
}

fn absolutize(p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => {
            let joined = cwd.join(p);
            // "." would otherwise leave a trailing `/.` in every absolute path
            joined.canonicalize().unwrap_or(joined)
        }
        Err(_) => p.to_path_buf(),
    }
}
