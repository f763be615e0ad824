use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

/// Root configuration structure, deserialized from `.url-checkr/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Lists consulted by the scoring rules.
    #[serde(default)]
    pub lists: ListConfig,
    /// How the classifier is reached.
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Static lists consulted by the scoring engine.
///
/// Suffix lists are matched with `ends_with` against the hostname, so
/// `google.com` also covers `mail.google.com`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListConfig {
    /// Substrings that mark a URL as phishing bait, matched case-insensitively.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Hostname suffixes that force a malicious verdict.
    #[serde(default = "default_blocklist")]
    pub blocklist: Vec<String>,
    /// Hostname suffixes that force a safe verdict.
    #[serde(default = "default_safelist")]
    pub safelist: Vec<String>,
    /// Hostname suffixes of risky top-level domains, checked in order.
    #[serde(default = "default_risky_tlds")]
    pub risky_tlds: Vec<String>,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            keywords: default_keywords(),
            blocklist: default_blocklist(),
            safelist: default_safelist(),
            risky_tlds: default_risky_tlds(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendConfig {
    /// Upper bound on a single classification call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Remote classification endpoint; the built-in engine is used when absent.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            timeout_secs: default_timeout_secs(),
            endpoint: None,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_keywords() -> Vec<String> {
    strings(&[
        "malicious",
        "phishing",
        "badsite",
        "login-update",
        "verify-account",
        "actualizar-cuenta",
        "verificar-login",
    ])
}

fn default_blocklist() -> Vec<String> {
    strings(&["evil-site.com", "phishers-paradise.net", "sitio-malo.es"])
}

fn default_safelist() -> Vec<String> {
    strings(&[
        "google.com",
        "github.com",
        "example.com",
        "tensorflow.org",
        "keras.io",
        "google.es",
    ])
}

fn default_risky_tlds() -> Vec<String> {
    strings(&[".zip", ".mov", ".xyz", ".tk", ".info"])
}

fn default_timeout_secs() -> u64 {
    10
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.url-checkr/config.toml`
/// 3. `~/.config/url-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".url-checkr").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("url-checkr").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
