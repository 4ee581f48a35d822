//! Optional file logging for embedders chasing a live problem.
//!
//! The engine itself only emits `tracing` events; in release builds they
//! compile away entirely. With the `debug-tracing` feature an embedding
//! shell can install this rolling-file subscriber at startup.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Installs a daily-rolling file subscriber under `dir` and returns the
/// guard that keeps the background writer alive; drop it on shutdown to
/// flush. Returns `None` when a global subscriber is already installed.
pub fn init_tracing(dir: &Path) -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(dir, "scriptswitch.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).ok()?;
    Some(guard)
}
