//! Level and kitchen layout loading from JSON.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use galley_logic::level::{validate_level, LevelConfig, LevelIssue};

use crate::generation::KitchenLayout;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid level: {}", join_issues(.0))]
    Invalid(Vec<LevelIssue>),
}

fn join_issues(issues: &[LevelIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse and validate a level definition.
pub fn load_level_str(json: &str) -> Result<LevelConfig, ConfigError> {
    let level: LevelConfig = serde_json::from_str(json)?;
    let issues = validate_level(&level);
    if !issues.is_empty() {
        return Err(ConfigError::Invalid(issues));
    }
    log::debug!("Loaded level '{}' with {} orders", level.name, level.orders.len());
    Ok(level)
}

pub fn load_level_file(path: impl AsRef<Path>) -> Result<LevelConfig, ConfigError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_level_str(&json)
}

pub fn load_layout_str(json: &str) -> Result<KitchenLayout, ConfigError> {
    Ok(serde_json::from_str(json)?)
}
