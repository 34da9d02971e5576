use std::path::PathBuf;
use std::str::FromStr;

use chrono::Duration;
use error_stack::{IntoReport, Report, ResultExt};
use repositories::cloudinary::{CloudinaryConfig, DEFAULT_FOLDER};
use tracing::{info, warn};
use trust_core::defaults::SingletonDefaults;

const STORAGE: &str = "STORAGE";
const MONGO_URI: &str = "MONGO_URI";
const MONGO_DB: &str = "MONGO_DB";
const JWT_SECRET: &str = "JWT_SECRET";
const JWT_EXPIRY_DAYS: &str = "JWT_EXPIRY_DAYS";
const BCRYPT_COST: &str = "BCRYPT_COST";
const PORT: &str = "PORT";
const METRICS_ENABLED: &str = "METRICS_ENABLED";
const CLOUDINARY_CLOUD_NAME: &str = "CLOUDINARY_CLOUD_NAME";
const CLOUDINARY_UPLOAD_PRESET: &str = "CLOUDINARY_UPLOAD_PRESET";
const CLOUDINARY_FOLDER: &str = "CLOUDINARY_FOLDER";
const CONTENT_DEFAULTS_PATH: &str = "CONTENT_DEFAULTS_PATH";
const UPLOAD_LIMIT_MB: &str = "UPLOAD_LIMIT_MB";

const DEFAULT_MONGO_DB: &str = "mandal";
const DEFAULT_JWT_EXPIRY_DAYS: i64 = 30;
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_UPLOAD_LIMIT_MB: usize = 10;
const MB: usize = 1024 * 1024;

pub type ConfigResult<T> = Result<T, Report<ConfigError>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{0} has an invalid value")]
    Invalid(&'static str),
    #[error("content defaults could not be loaded")]
    Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Mongo { uri: String, db_name: String },
    /// Nothing survives a restart. For local runs.
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: Storage,
    pub jwt_secret: String,
    pub jwt_expiry: Duration,
    pub bcrypt_cost: u32,
    pub port: u16,
    pub metrics_enabled: bool,
    pub cloudinary: Option<CloudinaryConfig>,
    pub content_defaults_path: Option<PathBuf>,
    pub upload_limit_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> ConfigResult<Self> {
        let storage = match lookup(STORAGE).as_deref() {
            Some("memory") => {
                warn!("using in-memory storage, nothing will be persisted");
                Storage::Memory
            }
            None | Some("mongo") => Storage::Mongo {
                uri: required(&lookup, MONGO_URI)?,
                db_name: lookup(MONGO_DB).unwrap_or_else(|| DEFAULT_MONGO_DB.to_string()),
            },
            Some(other) => {
                return Err(ConfigError::Invalid(STORAGE)
                    .into_report()
                    .attach(format!("'{other}' is neither mongo nor memory")));
            }
        };

        Ok(Self {
            storage,
            jwt_secret: required(&lookup, JWT_SECRET)?,
            jwt_expiry: Duration::days(parsed(&lookup, JWT_EXPIRY_DAYS, DEFAULT_JWT_EXPIRY_DAYS)?),
            bcrypt_cost: parsed(&lookup, BCRYPT_COST, bcrypt::DEFAULT_COST)?,
            port: parsed(&lookup, PORT, DEFAULT_PORT)?,
            metrics_enabled: parsed(&lookup, METRICS_ENABLED, false)?,
            cloudinary: cloudinary(&lookup),
            content_defaults_path: lookup(CONTENT_DEFAULTS_PATH).map(PathBuf::from),
            upload_limit_bytes: parsed(&lookup, UPLOAD_LIMIT_MB, DEFAULT_UPLOAD_LIMIT_MB)?
                .saturating_mul(MB),
        })
    }

    /// The built-in defaults, with the override file applied when one is configured.
    pub fn singleton_defaults(&self) -> ConfigResult<SingletonDefaults> {
        let defaults = SingletonDefaults::default();
        let Some(path) = &self.content_defaults_path else {
            return Ok(defaults);
        };

        info!("loading content defaults from {}", path.display());
        let raw = std::fs::read_to_string(path)
            .change_context(ConfigError::Defaults)
            .attach(format!("{} could not be read", path.display()))?;
        defaults
            .with_overrides(&raw)
            .change_context(ConfigError::Defaults)
    }
}

fn required(
    lookup: &impl Fn(&'static str) -> Option<String>,
    key: &'static str,
) -> ConfigResult<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing(key).into_report())
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&'static str) -> Option<String>,
    key: &'static str,
    default: T,
) -> ConfigResult<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            ConfigError::Invalid(key)
                .into_report()
                .attach(format!("could not parse '{raw}'"))
        }),
    }
}

/// Uploads stay disabled unless both the cloud and the preset are given.
fn cloudinary(lookup: &impl Fn(&'static str) -> Option<String>) -> Option<CloudinaryConfig> {
    match (lookup(CLOUDINARY_CLOUD_NAME), lookup(CLOUDINARY_UPLOAD_PRESET)) {
        (Some(cloud_name), Some(upload_preset)) => Some(CloudinaryConfig {
            cloud_name,
            upload_preset,
            folder: lookup(CLOUDINARY_FOLDER).unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
        }),
        _ => {
            warn!("cloudinary is not configured, image uploads will fail");
            None
        }
    }
}
