//! Greeting page handler
//!
//! Renders the greeting template with a per-request context: the display
//! name from the `name` query parameter (or the configured default) and the
//! process startup timestamp. The context is built fresh for every request,
//! so concurrent requests never observe each other's names.

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, query};
use crate::logger;
use crate::templates::{self, GreetingContext};

/// Serve the greeting page
pub fn serve(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    // An empty name parameter behaves exactly like an absent one
    let name = query::get_param(ctx.query, "name")
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| state.config.site.default_name.clone());

    let greeting = GreetingContext {
        name,
        timestamp: state.started_at.clone(),
    };

    match templates::render_greeting(&state.templates, &greeting) {
        Ok(html) => {
            if ctx.access_log {
                logger::log_response(html.len());
            }
            http::response::build_html_response(html, &state.config.http, ctx.is_head)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to render greeting: {e}"));
            http::build_500_response(&e.to_string())
        }
    }
}
