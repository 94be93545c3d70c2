use serde::{Deserialize, Serialize};

/// Main configuration structure for the summarization agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Interface to bind (`HOST`)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (`PORT`)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Explicit externally visible base URL (`A2A_BASE_URL`)
    #[serde(default)]
    pub a2a_base_url: Option<String>,

    /// GenAI service binding configuration
    #[serde(default)]
    pub genai: GenAiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            a2a_base_url: None,
            genai: GenAiConfig::default(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// GenAI service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenAiConfig {
    /// Name of the bound service in `VCAP_SERVICES`
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Sampling temperature for the completion call
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Skip TLS certificate validation for the service endpoints
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,

    /// Path appended to the service `api_base` to reach the OpenAI-compatible API
    #[serde(default = "default_api_path")]
    pub api_path: String,
}

fn default_service_name() -> String {
    "tanzu-gpt-oss-120b".to_string()
}

const fn default_temperature() -> f32 {
    0.9
}

const fn default_accept_invalid_certs() -> bool {
    true
}

fn default_api_path() -> String {
    "/openai/v1".to_string()
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            temperature: default_temperature(),
            accept_invalid_certs: default_accept_invalid_certs(),
            api_path: default_api_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Whether to enable permissive CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

const fn default_enable_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enable_cors: default_enable_cors(),
        }
    }
}
