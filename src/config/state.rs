// Application state module
// Immutable shared state constructed once at startup

use std::sync::atomic::AtomicBool;

use tera::Tera;

use super::types::Config;
use crate::templates;

/// Application state shared across all connections.
///
/// Everything here is fixed after startup: the parsed template set, the
/// formatted start-of-process timestamp shown on the greeting page, and a
/// lock-free copy of the access-log switch. Request handlers never mutate
/// this state.
pub struct AppState {
    pub config: Config,
    pub templates: Tera,
    pub started_at: String,
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Build the shared state, parsing the greeting template.
    ///
    /// Fails when the template file is missing or malformed; the caller is
    /// expected to abort startup in that case.
    pub fn new(config: &Config) -> Result<Self, tera::Error> {
        let templates = templates::load(&config.site.template_file)?;

        Ok(Self {
            config: config.clone(),
            templates,
            started_at: templates::startup_timestamp(),
            cached_access_log: AtomicBool::new(config.logging.access_log),
        })
    }
}
