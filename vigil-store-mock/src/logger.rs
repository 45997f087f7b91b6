//! Logging Infrastructure
//!
//! Structured logging setup with optional daily file output.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// `level` takes any tracing filter directive, from a bare level
/// (`debug`) to per-target filters (`tower_http=debug,info`). When
/// `log_dir` names an existing directory, output goes to a daily
/// rolling file there instead of stdout.
pub fn init_logger(level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        if Path::new(dir).exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "vigil-mock");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
