//! Static asset serving module
//!
//! Resolves request paths under the configured asset root, with traversal
//! rejection, MIME detection, and conditional-GET handling.

use std::path::Path;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;

/// Serve a static asset for a request under the static prefix
pub async fn serve(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let site = &state.config.site;

    match load_asset(&site.static_dir, ctx.path, &site.static_prefix).await {
        Some((content, content_type)) => {
            if ctx.access_log {
                logger::log_response(content.len());
            }
            build_static_response(
                &content,
                content_type,
                ctx.if_none_match.as_deref(),
                ctx.is_head,
            )
        }
        None => http::build_404_response(),
    }
}

/// Resolve a request path under the asset root and read the file.
///
/// The URL prefix is stripped before resolution. Returns None for missing
/// files and for any path that would escape the root.
pub async fn load_asset(
    static_dir: &str,
    path: &str,
    static_prefix: &str,
) -> Option<(Vec<u8>, &'static str)> {
    // Remove leading slash and neutralize parent-directory components
    let clean_path = path.trim_start_matches('/').replace("..", "");

    // Remove the URL prefix from the path
    let prefix_clean = static_prefix.trim_matches('/');
    let relative_path = if prefix_clean.is_empty() {
        clean_path.as_str()
    } else {
        clean_path
            .strip_prefix(&format!("{prefix_clean}/"))
            .unwrap_or(&clean_path)
    };

    let file_path = Path::new(static_dir).join(relative_path);

    // Invariant: the canonicalized target stays inside the canonicalized root
    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // File not found is an ordinary 404, no need to log at warning level
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return None;
        }
    };

    // Determine content type from extension
    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

/// Build asset response, answering 304 when the client copy is current
fn build_static_response(
    data: &[u8],
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::response::build_asset_response(Bytes::from(data.to_owned()), content_type, &etag, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const EXISTING_ASSET: &str = "/static/stylesheets/main.css";

    fn test_state() -> Arc<AppState> {
        let cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        Arc::new(AppState::new(&cfg).expect("template should parse"))
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            query: None,
            is_head: false,
            if_none_match: None,
            access_log: false,
        }
    }

    #[tokio::test]
    async fn test_existing_asset_exact_bytes() {
        let (content, content_type) = load_asset("static", EXISTING_ASSET, "/static/")
            .await
            .expect("asset should load");
        let on_disk = std::fs::read("static/stylesheets/main.css").expect("file on disk");
        assert_eq!(content, on_disk);
        assert_eq!(content_type, "text/css");
    }

    #[tokio::test]
    async fn test_missing_asset() {
        assert!(load_asset("static", "/static/no-such-file.css", "/static/")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        // Cargo.toml sits one level above the asset root and must stay
        // unreachable however the escape is spelled
        assert!(load_asset("static", "/static/../Cargo.toml", "/static/")
            .await
            .is_none());
        assert!(load_asset("static", "/static/../../etc/passwd", "/static/")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_serve_sets_status() {
        let state = test_state();

        let resp = serve(&ctx(EXISTING_ASSET), &state).await;
        assert_eq!(resp.status(), 200);

        let resp = serve(&ctx("/static/missing.css"), &state).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_conditional_get_roundtrip() {
        let state = test_state();

        let first = serve(&ctx(EXISTING_ASSET), &state).await;
        let etag = first
            .headers()
            .get("ETag")
            .and_then(|v| v.to_str().ok())
            .expect("asset response carries an ETag")
            .to_string();

        let revalidation = RequestContext {
            if_none_match: Some(etag),
            ..ctx(EXISTING_ASSET)
        };
        let second = serve(&revalidation, &state).await;
        assert_eq!(second.status(), 304);
    }
}
