use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::capture::DEFAULT_MIN_DIMENSION;
use crate::selection::{TargetExclusions, DEFAULT_EXCLUDED_ELEMENTS, DEFAULT_EXCLUDED_REGIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "peek";
const APP_CONFIG_FILE: &str = "config.json";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) min_dimension: u32,
    pub(crate) excluded_elements: Vec<String>,
    pub(crate) excluded_regions: Vec<String>,
    pub(crate) screenshots_dir: Option<PathBuf>,
    pub(crate) notifications: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            min_dimension: DEFAULT_MIN_DIMENSION,
            excluded_elements: DEFAULT_EXCLUDED_ELEMENTS.map(String::from).to_vec(),
            excluded_regions: DEFAULT_EXCLUDED_REGIONS.map(String::from).to_vec(),
            screenshots_dir: None,
            notifications: true,
        }
    }
}

impl AppConfig {
    pub(crate) fn target_exclusions(&self) -> TargetExclusions {
        TargetExclusions::new(
            self.excluded_elements.iter().map(String::as_str),
            self.excluded_regions.iter().map(String::as_str),
        )
    }
}

pub(crate) fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
