// Server module entry point
// Listener creation and the accept loop

mod connection;
mod listener;

pub use listener::create_listener;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

/// Accept connections until the process exits.
///
/// Accept errors are transient (e.g. per-connection resource exhaustion)
/// and only logged; the loop itself never terminates.
pub async fn run(listener: TcpListener, state: Arc<AppState>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => connection::accept(stream, peer_addr, &state),
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}
