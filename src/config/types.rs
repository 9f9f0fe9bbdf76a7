// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    pub performance: PerformanceConfig,
    pub site: SiteConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

/// Site content configuration: where the greeting template and the static
/// asset tree live, and how the greeting page behaves.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Path to the greeting page template, parsed once at startup
    pub template_file: String,
    /// Root directory for static assets
    pub static_dir: String,
    /// URL prefix routed to static file serving; stripped before resolving
    pub static_prefix: String,
    /// Name shown when the request carries no usable `name` parameter
    pub default_name: String,
}
