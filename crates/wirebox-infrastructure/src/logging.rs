//! Structured logging with tracing
//!
//! The container itself only emits events: `debug` for recorded bindings and
//! built descriptors, `trace` for every resolution and graph visit, `info`
//! when a context is finalized. [`init_logging`] is a convenience for hosts
//! that have no subscriber of their own.

use std::path::Path;

use tracing::{info, warn, Level};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};
use wirebox_domain::error::{Error, Result};

pub use crate::config::LoggingConfig;
use crate::constants::{LOG_FILE_STEM, LOG_FILTER_ENV};
use crate::error_ext::ErrorContext;

/// Install a global subscriber configured by `config`
///
/// `WIREBOX_LOG` takes precedence over `config.level` when set. Fails when the
/// level is invalid or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_stem()
                .unwrap_or_else(|| std::ffi::OsStr::new(LOG_FILE_STEM)),
        )
    });

    let mut layers = vec![output_layer(std::io::stdout, config.json_format, true)];
    if let Some(appender) = file_appender {
        layers.push(output_layer(appender, config.json_format, false));
    }
    let installed = Registry::default().with(filter).with(layers).try_init();
    installed.context("Failed to install tracing subscriber")?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// One formatting layer writing to `writer`
///
/// Console output carries thread ids and source locations; file output is
/// plain text without ANSI colors.
fn output_layer<W>(writer: W, json: bool, console: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer::<FilteredRegistry>()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(console)
        .with_thread_ids(console)
        .with_file(console)
        .with_line_number(console);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
