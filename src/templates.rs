//! Template store module
//!
//! The greeting page template is parsed exactly once at startup and kept in
//! `AppState` for the process lifetime; there is no reload path.

use serde::Serialize;
use tera::{Context, Tera};

/// Name the greeting template is registered under. Ends in `.html` so Tera
/// applies HTML auto-escaping to substituted values.
pub const GREETING_TEMPLATE: &str = "welcome.html";

/// Per-request data rendered into the greeting page.
///
/// Built fresh at the top of the greeting handler: `name` comes from the
/// request's query string (or the configured default), `timestamp` is a copy
/// of the process start time. Nothing here outlives the request.
#[derive(Debug, Clone, Serialize)]
pub struct GreetingContext {
    pub name: String,
    pub timestamp: String,
}

/// Parse the greeting template from `template_file`.
///
/// Fails when the file is unreadable or contains template syntax errors.
pub fn load(template_file: &str) -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_template_file(template_file, Some(GREETING_TEMPLATE))?;
    Ok(tera)
}

/// Format the process start time shown on the greeting page.
///
/// Captured once at startup and never refreshed: every request served by a
/// process instance shows the same timestamp.
pub fn startup_timestamp() -> String {
    chrono::Local::now().format("%b %e %H:%M:%S").to_string()
}

/// Render the greeting page for one request.
pub fn render_greeting(templates: &Tera, greeting: &GreetingContext) -> Result<String, tera::Error> {
    let context = Context::from_serialize(greeting)?;
    templates.render(GREETING_TEMPLATE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_templates() -> Tera {
        load("templates/welcome.html").expect("greeting template should parse")
    }

    fn render(name: &str) -> String {
        let greeting = GreetingContext {
            name: name.to_string(),
            timestamp: startup_timestamp(),
        };
        render_greeting(&test_templates(), &greeting).expect("render should succeed")
    }

    #[test]
    fn test_missing_template_fails() {
        assert!(load("templates/no-such-template.html").is_err());
    }

    #[test]
    fn test_render_default_name() {
        let html = render("Anonymous");
        assert!(html.contains("Anonymous"));
    }

    #[test]
    fn test_render_custom_name() {
        let html = render("Alice");
        assert!(html.contains("Alice"));
        assert!(!html.contains("Anonymous"));
    }

    #[test]
    fn test_timestamp_rendered() {
        let timestamp = startup_timestamp();
        assert!(!timestamp.is_empty());

        let greeting = GreetingContext {
            name: "Anonymous".to_string(),
            timestamp: timestamp.clone(),
        };
        let html =
            render_greeting(&test_templates(), &greeting).expect("render should succeed");
        assert!(html.contains(&timestamp));
    }

    #[test]
    fn test_markup_in_name_is_escaped() {
        let html = render("<b>X</b>");
        assert!(!html.contains("<b>X</b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_contexts_are_independent() {
        // Two requests rendered from separate contexts must each see only
        // their own name.
        let templates = test_templates();
        let timestamp = startup_timestamp();

        let first = render_greeting(
            &templates,
            &GreetingContext {
                name: "Alice".to_string(),
                timestamp: timestamp.clone(),
            },
        )
        .expect("render should succeed");
        let second = render_greeting(
            &templates,
            &GreetingContext {
                name: "Bob".to_string(),
                timestamp,
            },
        )
        .expect("render should succeed");

        assert!(first.contains("Alice") && !first.contains("Bob"));
        assert!(second.contains("Bob") && !second.contains("Alice"));
    }
}
