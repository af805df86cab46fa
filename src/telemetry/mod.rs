//! 日志初始化：基于 tracing-subscriber 的结构化日志。
//!
//! Tracing subscriber setup shared by the binaries.
//!
//! Logs go to stderr so the chat transcript on stdout stays clean. `RUST_LOG`
//! overrides the default filter.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "pizza_agent=info";

/// Install the global `fmt` subscriber. Later calls are no-ops.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
