use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod templates;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // Build the Tokio runtime, sizing the thread pool from config when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Parse the greeting template before binding the listener. A missing or
    // malformed template file aborts startup; no request is ever served
    // with a partially initialized state.
    let state = match config::AppState::new(&cfg) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            logger::log_error(&format!("Failed to load templates: {e}"));
            return Err(e.into());
        }
    };

    let listener = match server::create_listener(addr) {
        Ok(l) => l,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };

    logger::log_server_start(&addr, &cfg);

    server::run(listener, state).await;
    Ok(())
}
