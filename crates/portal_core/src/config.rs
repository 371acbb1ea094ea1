use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CLASSIFIER_URL: &str = "http://localhost:5000/classify";
pub const DEFAULT_LATENCY_FLOOR_MS: u64 = 500;

const CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_classifier_url")]
    pub classifier_url: String,
    #[serde(default)]
    pub http_proxy: String,
    #[serde(default)]
    pub https_proxy: String,
    /// Minimum delay before a bot reply is appended.
    #[serde(default = "default_latency_floor_ms")]
    pub latency_floor_ms: u64,
}

fn default_classifier_url() -> String {
    DEFAULT_CLASSIFIER_URL.to_string()
}

fn default_latency_floor_ms() -> u64 {
    DEFAULT_LATENCY_FLOOR_MS
}

fn portal_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".portal")
}

fn portal_config_json_path() -> PathBuf {
    portal_dir().join("config.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classifier_url: default_classifier_url(),
            http_proxy: String::new(),
            https_proxy: String::new(),
            latency_floor_ms: DEFAULT_LATENCY_FLOOR_MS,
        }
    }
}

impl Config {
    /// Load from `~/.portal/config.json`, falling back to `./config.toml`,
    /// then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_json_file(&portal_config_json_path())
            .or_else(|| Self::from_toml_file(Path::new(CONFIG_FILE_PATH)))
            .unwrap_or_default();
        config.apply_env();
        config
    }

    pub fn from_json_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Failed to read {}: {}", path.display(), err);
                return None;
            }
        };
        match serde_json::from_str::<Config>(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("Failed to parse {}: {}", path.display(), err);
                None
            }
        }
    }

    pub fn from_toml_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Failed to read {}: {}", path.display(), err);
                return None;
            }
        };
        match toml::from_str::<Config>(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("Failed to parse {}: {}", path.display(), err);
                None
            }
        }
    }

    fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CLASSIFIER_URL") {
            self.classifier_url = url;
        }
        if let Some(http_proxy) = lookup("HTTP_PROXY") {
            self.http_proxy = http_proxy;
        }
        if let Some(https_proxy) = lookup("HTTPS_PROXY") {
            self.https_proxy = https_proxy;
        }
        if let Some(floor) = lookup("PORTAL_LATENCY_FLOOR_MS") {
            match floor.trim().parse() {
                Ok(ms) => self.latency_floor_ms = ms,
                Err(_) => log::warn!("Ignoring invalid PORTAL_LATENCY_FLOOR_MS={:?}", floor),
            }
        }
    }

    pub fn latency_floor(&self) -> Duration {
        Duration::from_millis(self.latency_floor_ms)
    }
}
