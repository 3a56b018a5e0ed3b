//! Subscriber setup. `RUST_LOG` wins over the configured filter.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vsg_assessment_core::storage::ensure_data_dir;

pub const LOG_FILE: &str = "vsg-assessment.log";

fn env_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| "info".into())
}

/// Log to stderr for one-shot commands.
pub fn init_stderr(configured: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(configured))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Log to a file in the data directory for the interactive session, which
/// owns the terminal. Logging is skipped if the file cannot be opened.
pub fn init_file(configured: &str) -> Option<PathBuf> {
    let path = ensure_data_dir().ok()?.join(LOG_FILE);
    let file = File::options().create(true).append(true).open(&path).ok()?;
    tracing_subscriber::registry()
        .with(env_filter(configured))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .ok()?;
    Some(path)
}
