use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};

/// Tokio worker threads: config.toml first, then TOKIO_WORKER_THREADS.
fn worker_threads() -> Option<usize> {
    if let Ok(cfg) = configs::AppConfig::load_and_validate() {
        if cfg.server.worker_threads.is_some() {
            return cfg.server.worker_threads;
        }
    }
    std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse().ok())
}

fn main() -> ExitCode {
    // Load .env before reading RUST_LOG and friends
    dotenv().ok();
    common::utils::logging::init_from_env();

    // Panics land in the structured log before the process dies
    std::panic::set_hook(Box::new(|info| {
        error!(event = "panic", pid = std::process::id(), message = %info, "unhandled panic");
    }));

    let threads = worker_threads();
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(n) = threads {
        builder.worker_threads(n);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "could not build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        version = env!("CARGO_PKG_VERSION"),
        threads = threads.unwrap_or_default(),
        "boutique server starting"
    );

    rt.block_on(async {
        tokio::select! {
            res = server::run() => match res {
                Ok(()) => {
                    info!(event = "stop", "server stopped");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(event = "run_failed", error = %e, "server exited with error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(event = "shutdown_signal", "Ctrl+C received, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
