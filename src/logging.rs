//! Logging setup
//!
//! Installs a `tracing` subscriber writing to stderr, plus a daily-rolling log
//! file when `COMPOSIO_LOG_DIR` is set.
//!
//! Environment:
//! - `RUST_LOG` - filter directives (default `composio_toolkit_sdk=info`)
//! - `COMPOSIO_LOG_FORMAT=json` - emit JSON lines on stderr
//! - `COMPOSIO_LOG_DIR` - directory for `composio-toolkit.log.YYYY-MM-DD`

use anyhow::Result;
use std::env;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "composio_toolkit_sdk=info,composio_toolkit=info";

/// Initialize the global subscriber
///
/// Keep the returned guard alive for the whole program, otherwise buffered
/// file output is lost.
pub fn init_logging() -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (file_layer, guard) = match env::var("COMPOSIO_LOG_DIR") {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "composio-toolkit.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        Err(_) => (None, None),
    };

    let json = matches!(env::var("COMPOSIO_LOG_FORMAT").as_deref(), Ok("json"));

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(guard)
}
