//! Platform logging initialization for edtrellis_app.
//!
//! Logs go to the configured file by default so stdout stays free for the
//! rendered listing.

use super::config::{AppConfig, ConfigError};

pub fn initialize(config: &AppConfig) -> Result<(), ConfigError> {
    let destination = config.log_destination()?;
    let level = config.log_level()?;
    edtrellis_logging::initialize(destination, level, &config.log_file);
    Ok(())
}
