//! Configuration resolution for modelvault.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/modelvault/settings.json)
//! 3. Project config (.modelvault/settings.json)
//! 4. Environment variables (highest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Complete modelvault configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
}

/// Store-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file path; resolved via [`default_database_path`] when unset.
    pub database_path: Option<PathBuf>,
    /// Root directory the file-storage collaborator writes asset payloads
    /// under. The store never touches the bytes; `file_path` values on
    /// versions are resolved against this by the serving layer.
    pub uploads_root: Option<PathBuf>,
    pub max_connections: u32,
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            uploads_root: None,
            max_connections: 5,
            log_level: "info".to_string(),
        }
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config(project_dir: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    // Load global config
    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            let global = load_config_file(&global_path)?;
            merge_config(&mut config, global);
        }
    }

    // Load project config
    if let Some(dir) = project_dir {
        let project_path = dir.join(".modelvault").join("settings.json");
        if project_path.exists() {
            let project = load_config_file(&project_path)?;
            merge_config(&mut config, project);
        }
    }

    // Apply environment overrides
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|h| PathBuf::from(h).join(".modelvault").join("settings.json"))
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join("Library/Application Support/modelvault/settings.json"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
            .map(|p| p.join("modelvault").join("settings.json"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

/// Default database path when none is configured.
pub fn default_database_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|h| PathBuf::from(h).join(".modelvault").join("models.db"))
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join("Library/Application Support/modelvault/models.db"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
            .map(|p| p.join("modelvault").join("models.db"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn merge_config(base: &mut Config, overlay: Config) {
    if overlay.store.database_path.is_some() {
        base.store.database_path = overlay.store.database_path;
    }
    if overlay.store.uploads_root.is_some() {
        base.store.uploads_root = overlay.store.uploads_root;
    }
    base.store.max_connections = overlay.store.max_connections;
    base.store.log_level = overlay.store.log_level;
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(val) = std::env::var("MODELVAULT_DATABASE_PATH") {
        config.store.database_path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("MODELVAULT_UPLOADS_ROOT") {
        config.store.uploads_root = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("MODELVAULT_MAX_CONNECTIONS") {
        if let Ok(n) = val.parse() {
            config.store.max_connections = n;
        }
    }
    if let Ok(val) = std::env::var("MODELVAULT_LOG_LEVEL") {
        config.store.log_level = val;
    }
}
