use std::net::SocketAddr;

use hyper::{Method, Uri, Version};

use crate::config::Config;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Greeting server started successfully");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    println!("Greeting template: {}", config.site.template_file);
    println!(
        "Static assets: {} -> {}",
        config.site.static_prefix, config.site.static_dir
    );
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[Request] {method} {uri} {version:?}");
}

pub fn log_response(size: usize) {
    println!("[Response] Sent 200 OK ({size} bytes)\n");
}

pub fn log_error(message: &str) {
    eprintln!("[Error] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[Warn] {message}");
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    eprintln!("[Error] Failed to bind {addr}: {err}");
}
