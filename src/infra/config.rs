use super::engine_adapter::DEFAULT_ENGINE;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_TOML_NAME: &str = "dockerrmi.toml";

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".config/dockerrmi")
}

/// Expands `~` in a user-supplied config directory
pub fn expand_config_dir(dir: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(dir.to_string_lossy().as_ref()).into_owned())
}

/// Raw contents of a dockerrmi.toml, every key optional
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Engine binary (docker, podman, ...)
    pub engine: Option<String>,
    /// Stop running dependents instead of refusing to remove the image
    pub stop_running: Option<bool>,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(engine) = other.engine {
            self.engine = Some(engine);
        }
        if let Some(stop) = other.stop_running {
            self.stop_running = Some(stop);
        }
    }

    pub fn into_settings(self) -> Settings {
        Settings {
            engine: self.engine.unwrap_or_else(|| DEFAULT_ENGINE.to_string()),
            stop_running: self.stop_running.unwrap_or(true),
        }
    }
}

/// Effective settings after files and command-line overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub engine: String,
    pub stop_running: bool,
}

impl Default for Settings {
    fn default() -> Self {
        AppConfig::default().into_settings()
    }
}

pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    load_app_config_from(config_dir, Path::new("./"))
}

/// Reads the global config in `config_dir`, then the local one in `local_dir` on top
pub fn load_app_config_from(config_dir: &Path, local_dir: &Path) -> Result<AppConfig> {
    let mut app_config = read_config_file(&config_dir.join(DEFAULT_CONFIG_TOML_NAME))
        .context("config global")?
        .unwrap_or_default();

    if let Some(local) = read_config_file(&local_dir.join(DEFAULT_CONFIG_TOML_NAME))
        .context("config local")?
    {
        app_config.merge(local);
    }

    Ok(app_config)
}

fn read_config_file(path: &Path) -> Result<Option<AppConfig>> {
    if !path.exists() {
        debug!("config ausente em {:?}", path);
        return Ok(None);
    }

    let content = fs::read_to_string(path).with_context(|| format!("lendo {:?}", path))?;
    let config: AppConfig =
        toml::from_str(&content).with_context(|| format!("parse de {:?}", path))?;

    debug!(?config, "config carregada de {:?}", path);
    Ok(Some(config))
}
