//! Configuration service implementation.
//!
//! Loads the user configuration from `config.toml` (by default
//! `~/.config/nani/config.toml`) and caches it.

use crate::paths::NaniPaths;
use crate::storage::AtomicTomlFile;
use nani_core::config::NaniConfig;
use nani_core::{NaniError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the user configuration.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicTomlFile<NaniConfig>>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<NaniConfig>>>,
}

impl ConfigService {
    /// Uses the per-user config location.
    ///
    /// # Errors
    ///
    /// `NaniError::Config` when the platform has no config directory.
    pub fn default_location() -> Result<Self> {
        let path = NaniPaths::config_file().map_err(|e| NaniError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path.into())),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns the configuration, reading the file on first access.
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(&self) -> Result<NaniConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.file.load()?.unwrap_or_default();
        tracing::debug!("Loaded configuration from {}", self.path().display());
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Writes `config` and refreshes the cache.
    pub fn save(&self, config: &NaniConfig) -> Result<()> {
        self.file.save(config)?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        tracing::info!("Saved configuration to {}", self.path().display());
        Ok(())
    }

    /// Writes the defaults when no config file exists yet, and returns the
    /// effective configuration.
    pub fn ensure_exists(&self) -> Result<NaniConfig> {
        match self.file.load()? {
            Some(config) => {
                *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
                Ok(config)
            }
            None => {
                let config = NaniConfig::default();
                self.save(&config)?;
                Ok(config)
            }
        }
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl std::fmt::Debug for ConfigService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigService")
            .field("path", &self.path())
            .finish()
    }
}
