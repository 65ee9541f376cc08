//! Logging Infrastructure
//!
//! Logs go to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "mesa=info,mesa_client=info,shared=info";

/// Initialize the logger
///
/// `log_level` wins over `RUST_LOG`; without either the default filter applies.
pub fn init_logger(log_level: Option<&str>) {
    let env_filter = match log_level {
        Some(level) => EnvFilter::new(format!("mesa={level},mesa_client={level},shared={level}")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .init();
}
