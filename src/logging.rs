//! Dual-output logging setup (stdout + log file)
//!
//! Instrumentation is decoupled from control flow: nothing in the fetch
//! pipeline reads logger state, and disabling logging changes no retry or
//! caching decision.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log file name, created inside the directory passed to [`init_logging`]
pub const LOG_FILE: &str = "news-client.log";

/// Initialize logging with dual output: stdout plus [`LOG_FILE`] in
/// `directory`
///
/// Both outputs use the same log level from the RUST_LOG environment
/// variable, defaulting to "info". Call once at application startup and
/// hold the returned guard for the program lifetime; dropping it flushes
/// and shuts down the file writer.
///
/// Fails when a global subscriber is already installed.
pub fn init_logging(directory: impl AsRef<Path>) -> anyhow::Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(directory.as_ref(), LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(stdout_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .try_init()
        .context("failed to install global tracing subscriber")?;

    Ok(guard)
}
