mod config;

pub use config::{Config, DocumentConfig, ExportConfig, LoggingConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/vsg-assessment[-dev]/` based on VSG_ASSESSMENT_ENV.
///
/// Set VSG_ASSESSMENT_ENV=dev to use the development directory. The
/// directory is not created here; see [`ensure_data_dir`].
///
/// # Errors
/// Returns an error if the home directory cannot be determined.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");

    let env = std::env::var("VSG_ASSESSMENT_ENV").unwrap_or_else(|_| "production".to_string());

    Ok(if env == "dev" {
        base_dir.join("vsg-assessment-dev")
    } else {
        base_dir.join("vsg-assessment")
    })
}

/// [`data_dir`], created if missing.
///
/// # Errors
/// Returns an error if the directory cannot be determined or created.
pub fn ensure_data_dir() -> Result<PathBuf, ConfigError> {
    let dir = data_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
