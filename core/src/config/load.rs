use std::path::Path;

use crate::error::ConfigError;

use super::types::{AppConfig, ClassifierPolicy};

pub const DEFAULT_CONFIG_FILE: &str = "precommit-helper.toml";

/// Loads `precommit-helper.toml` from the working directory when present,
/// otherwise the defaults, then applies `PRECOMMIT_HELPER_*` overrides.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    let cfg = if Path::new(DEFAULT_CONFIG_FILE).exists() {
        read_file(Path::new(DEFAULT_CONFIG_FILE))?
    } else {
        AppConfig::default()
    };
    apply_env_overrides(cfg, |key| std::env::var(key).ok())
}

/// Loads an explicit config file; a missing file is an error here.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let cfg = read_file(path)?;
    apply_env_overrides(cfg, |key| std::env::var(key).ok())
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let display = path.display().to_string();
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

pub(crate) fn apply_env_overrides<F>(mut cfg: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("PRECOMMIT_HELPER_BIN") {
        if !v.trim().is_empty() {
            cfg.tool.bin = v;
        }
    }

    if let Some(v) = lookup("PRECOMMIT_HELPER_LOG") {
        if !v.trim().is_empty() {
            cfg.log.path = v;
        }
    }

    if let Some(v) = lookup("PRECOMMIT_HELPER_POLICY") {
        if !v.trim().is_empty() {
            cfg.classifier.policy = v.parse::<ClassifierPolicy>().map_err(ConfigError::Invalid)?;
        }
    }

    Ok(cfg)
}
