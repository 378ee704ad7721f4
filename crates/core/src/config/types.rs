use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub job: JobConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    4000
}

/// Pacing and sizing of the scripted event stream.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Pause between scripted steps, in milliseconds. 0 disables pacing.
    #[serde(default = "default_step_delay")]
    pub step_delay_ms: u64,
    /// Image width used when the request does not specify one.
    #[serde(default = "default_dimension")]
    pub default_width: u32,
    /// Image height used when the request does not specify one.
    #[serde(default = "default_dimension")]
    pub default_height: u32,
    /// Number of encoded lines buffered between a session and its HTTP body.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay(),
            default_width: default_dimension(),
            default_height: default_dimension(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_step_delay() -> u64 {
    500
}

fn default_dimension() -> u32 {
    512
}

fn default_channel_capacity() -> usize {
    32
}

/// Artifact generator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub backend: GeneratorBackend,
    /// Simulated latency of the placeholder backend, in milliseconds.
    #[serde(default = "default_latency")]
    pub latency_ms: u64,
    /// HTTP backend configuration (required when backend = "http")
    #[serde(default)]
    pub http: Option<HttpGeneratorConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: GeneratorBackend::default(),
            latency_ms: default_latency(),
            http: None,
        }
    }
}

fn default_latency() -> u64 {
    3000
}

/// Available generator backends
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorBackend {
    #[default]
    Placeholder,
    Http,
}

/// Remote image generation endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpGeneratorConfig {
    /// Endpoint receiving `{prompt, width, height}` as a JSON POST
    pub url: String,
    /// Sent as a bearer token when present
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u32,
}

fn default_http_timeout() -> u32 {
    60
}

/// Background job policy
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JobConfig {
    /// Deadline for awaiting the background job. Unset means wait forever.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Log output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub stream: StreamConfig,
    pub generator: SanitizedGeneratorConfig,
    pub job: JobConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedGeneratorConfig {
    pub backend: String,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<SanitizedHttpGeneratorConfig>,
}

/// Sanitized HTTP generator config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedHttpGeneratorConfig {
    pub url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            stream: config.stream.clone(),
            generator: SanitizedGeneratorConfig {
                backend: match config.generator.backend {
                    GeneratorBackend::Placeholder => "placeholder".to_string(),
                    GeneratorBackend::Http => "http".to_string(),
                },
                latency_ms: config.generator.latency_ms,
                http: config
                    .generator
                    .http
                    .as_ref()
                    .map(|h| SanitizedHttpGeneratorConfig {
                        url: h.url.clone(),
                        api_key_configured: h.api_key.as_deref().is_some_and(|k| !k.is_empty()),
                        timeout_secs: h.timeout_secs,
                    }),
            },
            job: config.job.clone(),
        }
    }
}
