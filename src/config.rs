use crate::error::{RankError, Result};
use crate::types::candidate::{Candidate, CandidateFile};
use crate::types::config::AidrankConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use walkdir::WalkDir;

pub const DEFAULT_CONFIG_FILE: &str = "aidrank.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".aidrank/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/aidrank/config.toml";

pub fn load_config(root: &Path) -> Result<AidrankConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<AidrankConfig> {
    let repo_path = root.join(DEFAULT_CONFIG_FILE);
    if !repo_path.exists() {
        return Err(RankError::ConfigNotFound(repo_path.display().to_string()));
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &repo_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: AidrankConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| RankError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    tracing::debug!(
        criteria = cfg.criteria.len(),
        options = cfg.options.len(),
        "configuration loaded"
    );
    Ok(cfg)
}

/// Reads candidates from `scoring.candidates`, a single TOML file or a
/// directory of them read in path order. Symlinks are followed and any
/// unreadable entry fails the load rather than shrinking the population.
pub fn load_candidates(root: &Path, config: &AidrankConfig) -> Result<Vec<Candidate>> {
    let source = root.join(&config.scoring.candidates);
    if !source.exists() {
        return Err(RankError::PathNotFound(source.display().to_string()));
    }

    let files = if source.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(&source).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        files
    } else {
        vec![source]
    };

    let mut candidates = Vec::new();
    for path in &files {
        let content = std::fs::read_to_string(path)?;
        let file: CandidateFile = toml::from_str(&content)
            .map_err(|e| RankError::ConfigParse(format!("{}: {}", path.display(), e)))?;
        candidates.extend(file.candidates);
    }
    tracing::debug!(
        files = files.len(),
        candidates = candidates.len(),
        "candidates loaded"
    );
    Ok(candidates)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| RankError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
