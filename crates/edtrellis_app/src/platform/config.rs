use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use edtrellis_core::validation::{validate_url, ValidationError};
use edtrellis_engine::ApiSettings;
use edtrellis_logging::{trellis_info, LogDestination};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILENAME: &str = "edtrellis.ron";
const CONFIG_ENV: &str = "EDTRELLIS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub jobs_path: String,
    pub session_path: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
    pub session_cookie: Option<String>,
    /// Page URL the listing starts on; its query seeds the filters.
    pub initial_url: String,
    pub log_destination: String,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base_url: api.base_url,
            jobs_path: api.jobs_path,
            session_path: api.session_path,
            connect_timeout_ms: api.connect_timeout.as_millis() as u64,
            request_timeout_ms: api.request_timeout.as_millis() as u64,
            max_response_bytes: api.max_bytes,
            session_cookie: None,
            initial_url: "http://localhost:3000/jobs".to_string(),
            log_destination: "file".to_string(),
            log_level: "info".to_string(),
            log_file: PathBuf::from(edtrellis_logging::DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.api_base_url).map_err(|err| invalid("api_base_url", err))?;
        validate_url(&self.initial_url).map_err(|err| invalid("initial_url", err))?;
        require_positive("connect_timeout_ms", self.connect_timeout_ms)?;
        require_positive("request_timeout_ms", self.request_timeout_ms)?;
        require_positive("max_response_bytes", self.max_response_bytes)?;
        self.log_destination()?;
        self.log_level()?;
        Ok(())
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            jobs_path: self.jobs_path.clone(),
            session_path: self.session_path.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_response_bytes,
            session_cookie: self.session_cookie.clone(),
        }
    }

    pub fn log_destination(&self) -> Result<LogDestination, ConfigError> {
        self.log_destination
            .parse()
            .map_err(|reason| ConfigError::Invalid {
                field: "log_destination",
                reason,
            })
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid {
                field: "log_level",
                reason: format!("unknown level {:?}", self.log_level),
            })
    }
}

fn invalid(field: &'static str, err: ValidationError) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: err.to_string(),
    }
}

/// Zero would fail every request immediately.
fn require_positive(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// `$EDTRELLIS_CONFIG` if set, else `./edtrellis.ron`.
pub(crate) fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// A missing file yields the defaults; anything else unreadable is an error.
pub(crate) fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    trellis_info!("Loaded config from {:?}", path);
    Ok(config)
}
