//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, body-size
//! check, and the prefix rule that selects exactly one of the two handlers.

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::{greeting, static_files};
use crate::http;
use crate::logger;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub access_log: bool,
}

/// Where a request path is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteTarget {
    /// Path begins with the static prefix: serve a file from the asset root
    StaticAsset,
    /// Everything else falls through to the greeting page
    Greeting,
}

/// Select the handler for a path.
///
/// Paths under the static prefix go to file serving; any other path,
/// whatever its content, gets the greeting page. The greeting handler is
/// the catch-all; there is no 404 at the dispatch layer.
fn route_for(path: &str, static_prefix: &str) -> RouteTarget {
    if path.starts_with(static_prefix) {
        RouteTarget::StaticAsset
    } else {
        RouteTarget::Greeting
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let is_head = *method == Method::HEAD;

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        logger::log_request(method, uri, req.version());
    }

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return Ok(resp);
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    // 3. Build the request context and dispatch
    let ctx = RequestContext {
        path: uri.path(),
        query: uri.query(),
        is_head,
        if_none_match: req
            .headers()
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
        access_log,
    };

    let response = match route_for(ctx.path, &state.config.site.static_prefix) {
        RouteTarget::StaticAsset => static_files::serve(&ctx, &state).await,
        RouteTarget::Greeting => greeting::serve(&ctx, &state),
    };

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let size_str = content_length.to_str().ok()?;

    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_prefix_routes_to_assets() {
        assert_eq!(
            route_for("/static/stylesheets/main.css", "/static/"),
            RouteTarget::StaticAsset
        );
    }

    #[test]
    fn test_root_routes_to_greeting() {
        assert_eq!(route_for("/", "/static/"), RouteTarget::Greeting);
    }

    #[test]
    fn test_unmatched_paths_fall_through_to_greeting() {
        // The greeting handler is the catch-all, like registering "/"
        assert_eq!(route_for("/anything/else", "/static/"), RouteTarget::Greeting);
        assert_eq!(route_for("/staticfoo", "/static/"), RouteTarget::Greeting);
    }

    #[test]
    fn test_method_gate() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::HEAD, false).is_none());

        let resp = check_http_method(&Method::OPTIONS, false).expect("options handled");
        assert_eq!(resp.status(), 204);

        let resp = check_http_method(&Method::POST, false).expect("post rejected");
        assert_eq!(resp.status(), 405);
    }
}
