use std::path::PathBuf;

use thiserror::Error;

use super::{limits::UploadLimits, public_url::PublicUrlPolicy};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";
pub const DEFAULT_FRONTEND_DIR: &str = "frontend/build";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            name,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentMode {
    #[default]
    Development,
    Production,
}

impl DeploymentMode {
    pub fn is_production(&self) -> bool {
        matches!(self, DeploymentMode::Production)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub uploads_dir: PathBuf,
    pub mode: DeploymentMode,
    pub public_url: PublicUrlPolicy,
    /// `None` means any origin may call the API.
    pub allowed_origins: Option<Vec<String>>,
    pub frontend_dir: PathBuf,
    pub limits: UploadLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            mode: DeploymentMode::Development,
            public_url: PublicUrlPolicy::InferFromRequest,
            allowed_origins: None,
            frontend_dir: PathBuf::from(DEFAULT_FRONTEND_DIR),
            limits: UploadLimits::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source; unset or blank
    /// variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = ServerConfig::default();

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("PORT", e.to_string()))?,
            None => defaults.port,
        };

        // NODE_ENV is honoured for deployments that already set it.
        let (mode_var, mode_value) = match var("APP_ENV") {
            Some(value) => ("APP_ENV", Some(value)),
            None => ("NODE_ENV", var("NODE_ENV")),
        };
        let mode = match mode_value.as_deref() {
            None | Some("development") | Some("dev") | Some("test") => {
                DeploymentMode::Development
            }
            Some("production") | Some("prod") => DeploymentMode::Production,
            Some(other) => {
                return Err(ConfigError::invalid(
                    mode_var,
                    format!("expected 'development' or 'production', got '{}'", other),
                ))
            }
        };

        let public_url = match var("PUBLIC_BASE_URL") {
            Some(base) => {
                if !(base.starts_with("http://") || base.starts_with("https://")) {
                    return Err(ConfigError::invalid(
                        "PUBLIC_BASE_URL",
                        "must start with http:// or https://",
                    ));
                }
                if mode.is_production() {
                    PublicUrlPolicy::fixed(base)
                } else {
                    tracing::warn!(
                        "PUBLIC_BASE_URL is set but ignored outside production; URLs are inferred from requests"
                    );
                    PublicUrlPolicy::InferFromRequest
                }
            }
            None => PublicUrlPolicy::InferFromRequest,
        };

        let allowed_origins = var("CORS_ALLOWED_ORIGINS").map(|raw| {
            raw.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        });

        let max_file_size = match var("MAX_FILE_SIZE") {
            Some(raw) => parse_positive::<u64>("MAX_FILE_SIZE", &raw)?,
            None => defaults.limits.max_file_size,
        };

        let max_batch_files = match var("MAX_BATCH_FILES") {
            Some(raw) => parse_positive::<usize>("MAX_BATCH_FILES", &raw)?,
            None => defaults.limits.max_batch_files,
        };

        Ok(ServerConfig {
            port,
            uploads_dir: var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.uploads_dir),
            mode,
            public_url,
            allowed_origins,
            frontend_dir: var("FRONTEND_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.frontend_dir),
            limits: UploadLimits {
                max_file_size,
                max_batch_files,
            },
        })
    }
}

fn parse_positive<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let value = raw
        .parse::<T>()
        .map_err(|e| ConfigError::invalid(name, e.to_string()))?;
    if value <= T::default() {
        return Err(ConfigError::invalid(name, "must be greater than zero"));
    }
    Ok(value)
}
