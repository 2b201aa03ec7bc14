use std::io;

use tracing_subscriber::{fmt, EnvFilter};

/// Log output format, selected with `LOG_FORMAT` (`json` or human-readable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// `RUST_LOG` when set, otherwise info for the app and its HTTP layers.
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"))
}

/// Install the global tracing subscriber.
///
/// Writes to stdout and tolerates an already-installed subscriber, so the
/// binary and `run()` may both call it.
pub fn init(format: LogFormat) {
    let builder = fmt().with_env_filter(default_filter()).with_target(false);
    let _ = match format {
        LogFormat::Compact => builder.compact().with_writer(io::stdout).try_init(),
        LogFormat::Json => builder.json().with_writer(io::stdout).try_init(),
    };
}

/// Install the subscriber with the format taken from `LOG_FORMAT`.
pub fn init_from_env() {
    init(LogFormat::from_env());
}
