//! Backend selection and configuration file handling.
//!
//! # Responsibility
//! - Choose between the local-file and remote-HTTP backends.
//! - Load/save the JSON config file with sensible defaults.
//!
//! # Invariants
//! - A missing config file means the default local backend, not an error.
//! - The configured store is built here and injected everywhere else;
//!   nothing in the crate reaches for ambient persistence state.

use crate::store::local::LocalJsonStore;
use crate::store::remote::{RemoteHttpStore, DEFAULT_BASE_URL};
use crate::store::{NoteStore, StoreError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = ".marknote";
const COLLECTION_FILE_NAME: &str = "notes.json";

/// Which persistence medium backs the note store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfig {
    /// One JSON collection file on disk.
    Local {
        #[serde(default = "default_data_file")]
        data_file: PathBuf,
    },
    /// REST service on a fixed base URL.
    Remote {
        #[serde(default = "default_base_url")]
        base_url: String,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Local {
            data_file: default_data_file(),
        }
    }
}

/// Configuration load/save failure.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config io failure: {err}"),
            Self::Json(err) => write!(f, "config parse failure: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl StoreConfig {
    /// Reads configuration from a JSON file.
    ///
    /// A missing file yields the default local backend. A present but
    /// malformed file is an error: silently ignoring a config the user
    /// wrote would switch backends behind their back.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match fs::read_to_string(path.as_ref()) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes configuration as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Builds the configured backend.
    pub fn open_store(&self) -> Result<Box<dyn NoteStore>, StoreError> {
        match self {
            Self::Local { data_file } => Ok(Box::new(LocalJsonStore::new(data_file.clone()))),
            Self::Remote { base_url } => Ok(Box::new(RemoteHttpStore::new(base_url.clone())?)),
        }
    }
}

/// Default application directory: `$HOME/.marknote`, or the working
/// directory when no home is available.
pub fn default_app_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(APP_DIR_NAME),
        None => PathBuf::from(APP_DIR_NAME),
    }
}

/// Default config file location inside the application directory.
pub fn default_config_file() -> PathBuf {
    default_app_dir().join("config.json")
}

fn default_data_file() -> PathBuf {
    default_app_dir().join(COLLECTION_FILE_NAME)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
