use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::FileLogSettings;

const DEFAULT_CONSOLE_FILTER: &str = "info,socialsense=debug";
const LOG_FILE_PREFIX: &str = "socialsense.log";

/// Installs the global subscriber. Console output goes to stderr so that
/// `analyze --json` keeps stdout machine-readable.
///
/// The returned guard must be held for the lifetime of the process when file
/// logging is enabled, otherwise buffered lines are dropped.
pub fn init_tracing(file_log: Option<&FileLogSettings>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(env_filter);

    let (file_layer, guard) = match file_log {
        Some(settings) => {
            let file_filter = EnvFilter::try_new(&settings.filter).with_context(|| {
                format!("invalid SOCIALSENSE_FILE_LOG filter `{}`", settings.filter)
            })?;
            let appender = tracing_appender::rolling::daily(&settings.directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(guard)
}
