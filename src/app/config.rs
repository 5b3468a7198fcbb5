use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_calibration_offset_secs")]
    pub calibration_offset_secs: f64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub tag_on_pause_default: bool,
}

fn default_backend_url() -> String {
    "http://localhost:14000".to_string()
}

fn default_owner() -> String {
    "admin".to_string()
}

fn default_calibration_offset_secs() -> f64 {
    crate::data::CALIBRATION_OFFSET_SECS
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            owner: default_owner(),
            calibration_offset_secs: default_calibration_offset_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            log_filter: default_log_filter(),
            tag_on_pause_default: false,
        }
    }
}

impl Config {
    /// Validates config values after loading. Clamps out-of-range values
    /// and rejects clearly invalid inputs.
    pub fn validate(&mut self) -> Result<()> {
        if !self.calibration_offset_secs.is_finite() {
            bail!(
                "calibration_offset_secs must be a finite number, got {}",
                self.calibration_offset_secs
            );
        }

        let url = self.backend_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("backend_url must be an http(s) URL: {}", self.backend_url);
        }
        self.backend_url = url.trim_end_matches('/').to_string();

        self.fetch_timeout_secs = self.fetch_timeout_secs.clamp(1, 600);

        if self.owner.trim().is_empty() {
            self.owner = default_owner();
        }
        if self.log_filter.trim().is_empty() {
            self.log_filter = default_log_filter();
        }

        Ok(())
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("video-annotator")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn load_config() -> Result<Config> {
    load_from(&config_path())
}

/// Load and validate `path`. A missing file yields the defaults.
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}
