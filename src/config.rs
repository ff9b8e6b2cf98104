// Configuration for lyricscorpora
//
// The configuration is a JSON file. Every field has a default, so an empty
// object (or no file at all) gives a working setup against the public sites.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::CorporaError;
use crate::helpers::billboard::DEFAULT_CHART_BASE_URL;
use crate::helpers::http_client::{self, HttpClient, DEFAULT_USER_AGENT};
use crate::helpers::wiki::DEFAULT_WIKI_BASE_URL;
use crate::logging::LoggingConfig;

/// Service name of the lyrics wiki
pub const LYRICWIKI_SERVICE: &str = "lyricwiki";
/// Service name of the chart site
pub const BILLBOARD_SERVICE: &str = "billboard";

/// Helper function to get service configuration with backward compatibility
///
/// Looks in the "services" section first and falls back to a top-level
/// section of the same name.
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use lyricscorpora::config::get_service_config;
///
/// let config = json!({
///   "services": {
///     "lyricwiki": { "base_url": "http://localhost:8080" }
///   }
/// });
/// assert_eq!(get_service_config(&config, "lyricwiki").unwrap()["base_url"], "http://localhost:8080");
///
/// let old_config = json!({ "billboard": { "base_url": "http://localhost:9090" } });
/// assert_eq!(get_service_config(&old_config, "billboard").unwrap()["base_url"], "http://localhost:9090");
/// ```
pub fn get_service_config<'a>(config: &'a serde_json::Value, service_name: &str) -> Option<&'a serde_json::Value> {
    if let Some(service_config) = config.get("services").and_then(|s| s.get(service_name)) {
        debug!("Found {} configuration in services section", service_name);
        return Some(service_config);
    }

    if let Some(service_config) = config.get(service_name) {
        debug!("Found {} configuration at top level (legacy structure)", service_name);
        return Some(service_config);
    }

    debug!("No {} configuration found, using defaults", service_name);
    None
}

/// Settings of one remote site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub base_url: Option<String>,
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Extra attempts for transient failures; 0 means one attempt per request
    #[serde(default)]
    pub max_retries: usize,

    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_retry_interval_ms() -> u64 {
    1000
}

fn default_corpus_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_retries: 0,
            retry_interval_ms: default_retry_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorporaConfig {
    #[serde(default)]
    pub services: HashMap<String, ServiceConfig>,

    #[serde(default)]
    pub http: HttpConfig,

    /// Directory corpus files are saved to and read from
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: PathBuf,

    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl Default for CorporaConfig {
    fn default() -> Self {
        Self {
            services: HashMap::new(),
            http: HttpConfig::default(),
            corpus_dir: default_corpus_dir(),
            logging: None,
        }
    }
}

impl CorporaConfig {
    /// Parse a configuration document
    ///
    /// Service sections may sit under "services" or at the top level.
    pub fn from_json(json: &str) -> Result<Self, CorporaError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| CorporaError::Config(format!("invalid JSON: {}", e)))?;
        let mut config: CorporaConfig = serde_json::from_value(value.clone())
            .map_err(|e| CorporaError::Config(format!("invalid configuration: {}", e)))?;

        for name in [LYRICWIKI_SERVICE, BILLBOARD_SERVICE] {
            if config.services.contains_key(name) {
                continue;
            }
            if let Some(section) = get_service_config(&value, name) {
                let service = serde_json::from_value(section.clone())
                    .map_err(|e| CorporaError::Config(format!("invalid {} section: {}", name, e)))?;
                config.services.insert(name.to_string(), service);
            }
        }
        Ok(config)
    }

    /// Load the configuration file, or the defaults when there is none
    pub fn load(path: Option<&Path>) -> Result<Self, CorporaError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn base_url(&self, service: &str, default: &str) -> String {
        self.services
            .get(service)
            .and_then(|s| s.base_url.clone())
            .unwrap_or_else(|| default.to_string())
    }

    pub fn lyricwiki_base_url(&self) -> String {
        self.base_url(LYRICWIKI_SERVICE, DEFAULT_WIKI_BASE_URL)
    }

    pub fn billboard_base_url(&self) -> String {
        self.base_url(BILLBOARD_SERVICE, DEFAULT_CHART_BASE_URL)
    }

    /// Build the HTTP client described by the `http` section
    pub fn http_client(&self) -> Box<dyn HttpClient> {
        http_client::new_http_client(
            self.http.timeout_secs,
            &self.http.user_agent,
            self.http.max_retries,
            Duration::from_millis(self.http.retry_interval_ms),
        )
    }
}
