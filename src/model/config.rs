//! JSON-backed persistence for the installation registry.
//!
//! The whole tool state lives in one file, `fabricdw.json` inside the user's
//! config directory:
//!
//! ```json
//! {
//!     "defaults": { "backups": 5, "idle_time": 0, "max-ram": 6.0, "min-ram": 0.5 },
//!     "installations": [ { "name": "survival", "root": "/srv/survival" } ]
//! }
//! ```
//!
//! The store is read once at startup and written back only when a command
//! asks for it. There is no locking; running two processes against the same
//! file is unsupported.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::Defaults;
use super::installation::Installation;

const CONFIG_FILE_NAME: &str = "fabricdw.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the user config directory")]
    NoConfigDir,

    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a valid store. There is no repair path.
    #[error("config at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Conversion to and from the plain JSON structure written to disk.
pub trait JsonRecord: Sized {
    fn to_record(&self) -> serde_json::Result<Value>;
    fn from_record(record: Value) -> serde_json::Result<Self>;
}

impl<T: Serialize + DeserializeOwned> JsonRecord for T {
    fn to_record(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn from_record(record: Value) -> serde_json::Result<Self> {
        serde_json::from_value(record)
    }
}

/// Root persisted aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub defaults: Defaults,
    pub installations: Vec<Installation>,
}

/// Reads and writes [`Config`] at a single path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/fabricdw.json` for the current user.
    pub fn user_default() -> Result<Self, ConfigError> {
        let base = directories::BaseDirs::new().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::at(base.config_dir().join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the config, or an empty one if the file does not exist yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("config file {} missing, creating new", self.path.display());
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let record: Value = serde_json::from_str(&raw).map_err(|source| self.corrupt(source))?;
        let config = Config::from_record(record).map_err(|source| self.corrupt(source))?;

        tracing::debug!(
            installations = config.installations.len(),
            "loaded config from {}",
            self.path.display()
        );
        Ok(config)
    }

    /// Overwrite the file with `config`, creating its directory if needed.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        // Value objects are BTreeMap-backed, so keys come out sorted.
        let record = config.to_record()?;

        let mut content = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut content, PrettyFormatter::with_indent(b"    "));
        record.serialize(&mut serializer)?;
        content.push(b'\n');

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, content).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("saved config to {}", self.path.display());
        Ok(())
    }

    fn corrupt(&self, source: serde_json::Error) -> ConfigError {
        ConfigError::Corrupt {
            path: self.path.clone(),
            source,
        }
    }
}
