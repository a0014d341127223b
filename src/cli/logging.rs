//! Log subscriber setup for the binary

use std::fmt;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Timestamp layout of log lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Local time rendered with [`TIMESTAMP_FORMAT`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format(TIMESTAMP_FORMAT))
    }
}

/// Map the `-v` count to a level: errors only by default, debug from three up
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Filter for this crate at the given verbosity; `RUST_LOG` wins when set
pub fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{}={}", env!("CARGO_PKG_NAME"), level_for(verbosity)).into()
    })
}

/// Install the global subscriber. Call once, from `main`.
pub fn init_logging(verbosity: u8) {
    tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTimestamp)
                .with_writer(std::io::stderr),
        )
        .init();
}
