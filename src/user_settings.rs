use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "txadmin_settings.json";

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_toast_duration_secs() -> u64 {
    5
}

/// User settings that persist between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// API base URL override (None = use TXADMIN_API_URL or the built-in default)
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Page size chosen in the pagination bar (None = use TXADMIN_PAGE_SIZE)
    #[serde(default)]
    pub default_page_size: Option<u32>,
    /// chrono format string for the "Created At" column
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// How long a notification toast stays expanded
    #[serde(default = "default_toast_duration_secs")]
    pub toast_duration_secs: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            default_page_size: None,
            date_format: default_date_format(),
            toast_duration_secs: default_toast_duration_secs(),
        }
    }
}

impl UserSettings {
    /// Get the settings file path
    fn settings_path() -> PathBuf {
        // Try to use the app data directory, fall back to current directory
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("txadmin");
            if !app_dir.exists() {
                let _ = fs::create_dir_all(&app_dir);
            }
            app_dir.join(SETTINGS_FILE)
        } else {
            PathBuf::from(SETTINGS_FILE)
        }
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::settings_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match Self::from_json(&content) {
                    Ok(settings) => {
                        tracing::info!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse settings file: {}", e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read settings file: {}", e);
                }
            }
        }
        tracing::info!("Using default settings");
        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path();
        fs::write(&path, self.to_json()?)?;
        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get the settings file path for display
    pub fn settings_path_display() -> String {
        Self::settings_path().display().to_string()
    }

    /// Toast duration as a `Duration`, never shorter than one second
    pub fn toast_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.toast_duration_secs.max(1))
    }
}
