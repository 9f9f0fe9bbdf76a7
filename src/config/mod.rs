// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig};

impl Config {
    /// Load configuration from the default "config.toml" location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; with nothing on disk and no `GREET_*`
    /// environment overrides the defaults below apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("GREET"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("http.server_name", "GreetingServer/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("site.template_file", "templates/welcome.html")?
            .set_default("site.static_dir", "static")?
            .set_default("site.static_prefix", "/static/")?
            .set_default("site.default_name", "Anonymous")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.site.static_prefix, "/static/");
        assert_eq!(cfg.site.default_name, "Anonymous");
        assert_eq!(cfg.site.template_file, "templates/welcome.html");
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 9090;
        let addr = cfg.socket_addr().expect("valid address");
        assert_eq!(addr.to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_invalid_host_rejected() {
        let mut cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        cfg.server.host = "not an address".to_string();
        assert!(cfg.socket_addr().is_err());
    }
}
