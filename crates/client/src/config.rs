//! Saved viewer defaults.
//!
//! Reads/writes ~/.config/railmatch/config.json. A base URL saved once
//! (or set by the desktop viewer) is picked up by every later run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Viewer defaults stored locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Results host base URL (e.g., "http://localhost:8080")
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Returns the path to the config file.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("railmatch/config.json"))
}

/// Load the saved defaults from disk.
/// Returns None if nothing is saved or if the file is invalid.
pub fn load_config() -> Option<ViewerConfig> {
    let path = config_file_path()?;
    let contents = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save the defaults to disk.
/// Creates the parent directory if it doesn't exist.
pub fn save_config(config: &ViewerConfig) -> Result<(), String> {
    let path = config_file_path().ok_or("Could not determine config directory")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }

    let contents = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(&path, &contents).map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

/// Delete the saved defaults.
pub fn delete_config() -> Result<(), String> {
    let Some(path) = config_file_path() else {
        return Ok(());
    };
    if path.exists() {
        std::fs::remove_file(&path).map_err(|e| format!("Failed to delete config file: {}", e))?;
    }
    Ok(())
}
