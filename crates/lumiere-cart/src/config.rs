//! # Cart Configuration
//!
//! Where the cart record lives and which backend holds it.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment variables (highest)                                    │
//! │     LUMIERE_CART_BACKEND, LUMIERE_CART_KEY, LUMIERE_DATA_DIR           │
//! │                                                                         │
//! │  2. Config file                                                        │
//! │     ~/.config/lumiere/cart.toml (Linux)                                │
//! │     ~/Library/Application Support/com.lumiere.storefront/cart.toml     │
//! │                                                                         │
//! │  3. Defaults (this file)                                               │
//! │     backend = "file", key = "cart-storage", platform data dir          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Config File
//! ```toml
//! [storage]
//! backend = "file"
//! key = "cart-storage"
//! dir = "/var/lib/lumiere"
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use directories::ProjectDirs;
use lumiere_core::CART_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::storage::{validate_key, CartStorage, FileStorage, MemoryStorage};
use crate::store::CartStore;

/// Backend selected for the storage port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `<dir>/<key>.json`
    #[default]
    File,
    /// Nothing survives the process
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" | "disk" => Ok(StorageBackend::File),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(StoreError::Config(format!(
                "unknown storage backend '{other}' (expected 'file' or 'memory')"
            ))),
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Key the cart record is stored under.
    #[serde(default = "default_key")]
    pub key: String,

    /// Data directory for the file backend. Platform data dir when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            key: default_key(),
            dir: None,
        }
    }
}

/// Complete cart configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub storage: StorageSettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or the platform `cart.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(path = %path.display(), "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(path = %path.display(), "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load cart config, using defaults");
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        validate_key(&self.storage.key)?;

        if let Some(dir) = &self.storage.dir {
            if dir.as_os_str().is_empty() {
                return Err(StoreError::Config("storage.dir must not be empty".into()));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `LUMIERE_*` overrides looked up through `lookup`.
    ///
    /// Unparseable values are logged and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = lookup("LUMIERE_CART_BACKEND") {
            match backend.parse::<StorageBackend>() {
                Ok(parsed) => {
                    debug!(backend = %parsed, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring LUMIERE_CART_BACKEND"),
            }
        }

        if let Some(key) = lookup("LUMIERE_CART_KEY") {
            debug!(key = %key, "Overriding storage key from environment");
            self.storage.key = key;
        }

        if let Some(dir) = lookup("LUMIERE_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.storage.dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("cart.toml"))
    }

    /// Directory the file backend writes to.
    ///
    /// Configured `dir`, else the platform data dir, else `./.lumiere`.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".lumiere"))
    }

    /// Builds the configured storage backend.
    pub fn open_storage(&self) -> StoreResult<Box<dyn CartStorage + Send>> {
        self.validate()?;

        let storage: Box<dyn CartStorage + Send> = match self.storage.backend {
            StorageBackend::File => {
                let dir = self.data_dir();
                info!(dir = %dir.display(), "Using file storage");
                Box::new(FileStorage::new(dir))
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Box::new(MemoryStorage::new())
            }
        };

        Ok(storage)
    }

    /// Opens a [`CartStore`] on the configured backend and key.
    pub fn open_store(&self) -> StoreResult<CartStore<Box<dyn CartStorage + Send>>> {
        let storage = self.open_storage()?;
        Ok(CartStore::open(storage, self.storage.key.clone()))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "lumiere", "storefront")
}
