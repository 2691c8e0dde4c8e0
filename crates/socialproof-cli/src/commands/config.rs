use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use socialproof_core::config::{Config, ConfigPaths};

pub fn print_effective(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_effective(config_path)?;
    let output = config.to_toml_string()?;
    println!("{}", output);
    Ok(())
}

/// An explicit `--config` must exist. The per-user file is optional and
/// the built-in defaults apply without it.
pub fn load_effective(config_path: Option<PathBuf>) -> Result<Config> {
    match config_path {
        Some(path) => load_from(&path),
        None => {
            let paths = ConfigPaths::resolve()?;
            if paths.config_path.exists() {
                load_from(&paths.config_path)
            } else {
                tracing::debug!("no config file, using defaults");
                Ok(Config::default_config())
            }
        }
    }
}

fn load_from(path: &Path) -> Result<Config> {
    let config =
        Config::load(path).with_context(|| format!("load config {}", path.display()))?;
    tracing::debug!(path = %reporting::redact::redact_path(path), "config loaded");
    Ok(config)
}
