//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
///
/// Every field has a default, so an empty environment yields a runnable
/// configuration polling Kraken every 5 seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Polling ===
    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Kraken public Depth endpoint.
    #[serde(default = "default_depth_url")]
    pub kraken_depth_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_ms: u64,

    // === Observability ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    /// Install the Prometheus exporter.
    #[serde(default)]
    pub metrics_enabled: bool,

    /// Port for the Prometheus scrape endpoint.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    // === Server Configuration ===
    /// Serve the health/status HTTP API.
    #[serde(default)]
    pub api_enabled: bool,

    /// HTTP server port for health/status endpoints.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_poll_interval() -> u64 {
    5
}

fn default_depth_url() -> String {
    "https://api.kraken.com/0/public/Depth".to_string()
}

fn default_http_timeout() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            kraken_depth_url: default_depth_url(),
            http_timeout_ms: default_http_timeout(),
            rust_log: default_log_level(),
            verbose: false,
            metrics_enabled: false,
            metrics_port: default_metrics_port(),
            api_enabled: false,
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval_secs == 0 {
            return Err("POLL_INTERVAL_SECS must be greater than 0".to_string());
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        let url = Url::parse(&self.kraken_depth_url)
            .map_err(|e| format!("KRAKEN_DEPTH_URL is not a valid URL: {}", e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err("KRAKEN_DEPTH_URL must use http or https".to_string());
        }

        if self.api_enabled && self.metrics_enabled && self.port == self.metrics_port {
            return Err("PORT and METRICS_PORT must differ".to_string());
        }

        Ok(())
    }

    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Request timeout as a [`Duration`].
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}
