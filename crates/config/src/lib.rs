use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Application settings, loaded from `config/default.toml` (optional) and
/// `SCRIBEKIT__`-prefixed environment variables (e.g.
/// `SCRIBEKIT__PROVIDER__API_KEY`, `SCRIBEKIT__SERVER__PORT`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub batch: BatchSettings,
    pub probe: ProbeSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Speechmatics Batch API key. Empty means "not configured".
    pub api_key: String,
    /// Base URL of the batch API.
    pub base_url: String,
    /// Seconds between job-status polls while waiting for completion.
    pub poll_interval_secs: u64,
    /// Overall deadline for a single remote job, submit to terminal state.
    pub job_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Default admission-gate capacity when the caller does not pass one.
    pub default_max_concurrent: usize,
    /// Default language code sent to the provider.
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Seconds before a duration probe is abandoned and treated as failed.
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://asr.api.speechmatics.com/v2".to_string(),
            poll_interval_secs: 2,
            job_timeout_secs: 1800,
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            default_max_concurrent: 10,
            language: "en".to_string(),
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            provider: ProviderSettings::default(),
            batch: BatchSettings::default(),
            probe: ProbeSettings::default(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("SCRIBEKIT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
