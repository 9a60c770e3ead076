use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use strum_macros::{AsRefStr, Display};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

/// Log file written in the temp directory
const TRACE_LOG_FILE: &str = "propbox_docs_trace.log";

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(1); // WARN until the command line says otherwise

/// Level filter read on every event, so the level can change after the subscriber is installed
#[derive(Clone)]
pub struct DynamicFilter;

impl<S> Layer<S> for DynamicFilter
where
    S: Subscriber,
{
    fn enabled(
        &self,
        metadata: &tracing::Metadata<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) -> bool {
        TracingLevel::from(*metadata.level()).as_u8() <= CURRENT_LEVEL.load(Ordering::Relaxed)
    }
}

/// Tracing levels selectable with `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TracingLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for TracingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(format!(
                "Invalid tracing level '{s}'. Valid levels are: error, warn, info, debug, trace"
            )),
        }
    }
}

impl From<Level> for TracingLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            Level::DEBUG => Self::Debug,
            Level::TRACE => Self::Trace,
        }
    }
}

impl TracingLevel {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Info => 2,
            Self::Debug => 3,
            Self::Trace => 4,
        }
    }
}

/// Initialize file-based tracing with a fixed filename in the temp directory
///
/// Returns a `WorkerGuard` that must be kept alive until the last event is written.
pub fn init_file_tracing() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), TRACE_LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    Registry::default()
        .with(DynamicFilter)
        .with(file_layer)
        .init();

    guard
}

/// Set the current tracing level
pub fn set_tracing_level(level: TracingLevel) {
    CURRENT_LEVEL.store(level.as_u8(), Ordering::Relaxed);
    tracing::info!("Tracing level set to: {level}");
}

/// Path of the trace log file
pub fn trace_log_path() -> PathBuf { std::env::temp_dir().join(TRACE_LOG_FILE) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_level_from_str() {
        assert!(matches!(
            TracingLevel::from_str("ERROR"),
            Ok(TracingLevel::Error)
        ));
        assert!(matches!(
            TracingLevel::from_str("debug"),
            Ok(TracingLevel::Debug)
        ));
        assert!(TracingLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_levels_are_ordered_by_verbosity() {
        assert!(TracingLevel::from(Level::TRACE).as_u8() > TracingLevel::Warn.as_u8());
        assert_eq!(TracingLevel::Info.to_string(), "info");
        assert!(trace_log_path().ends_with(TRACE_LOG_FILE));
    }
}
