//! Client config load/save for `~/.docs-qa/config.yaml`.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the config location.
pub const CONFIG_ENV: &str = "DOCS_QA_CONFIG";

/// Search section. `timeout_secs` bounds search requests only.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SearchSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Notification section. No endpoint means notifications are disabled.
/// `timeout_secs` bounds notification requests only.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NotifySection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_on_answer")]
    pub on_answer: bool,
}

fn default_on_answer() -> bool {
    true
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: None,
            on_answer: default_on_answer(),
        }
    }
}

/// Full config.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub notify: NotifySection,
}

impl Config {
    /// The search endpoint, which every query needs.
    pub fn search_endpoint(&self) -> Result<&str, ConfigError> {
        self.search
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or(ConfigError::MissingEndpoint)
    }
}

/// Returns the default config file path: `~/.docs-qa/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".docs-qa").join("config.yaml"))
}

/// Resolve the config path: explicit override, then `DOCS_QA_CONFIG`, then the default.
pub fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = override_path {
        return Some(p.to_path_buf());
    }
    if let Some(val) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(val));
    }
    default_config_path()
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Load config from a YAML file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config = serde_yaml::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Save config to a YAML file. Creates parent directory if missing.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let contents = serde_yaml::to_string(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Config load/save error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("search.endpoint is not configured")]
    MissingEndpoint,
}
