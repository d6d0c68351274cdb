use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Settings for the console helpers.
///
/// Every field has a usable default, so an empty or missing config file
/// yields a working setup pointed at a local server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub toast: ToastConfig,
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server origin, without a trailing slash.
    pub base_url: String,

    /// Path prefix every endpoint hangs off.
    pub base_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            base_path: "/api/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// How long a toast stays visible, in milliseconds.
    pub hide_delay_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Copy utility to run when the system clipboard is unavailable.
    /// Unset means the conventional utility for the platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_program: Option<String>,

    /// Arguments for the fallback utility. An argument containing
    /// `{spool}` receives the spool file's path.
    pub fallback_args: Vec<String>,
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("prompt-console").join("config.toml"))
    }
}
