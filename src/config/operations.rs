//! Config loading, validation, and builder operations.

use super::model::LockConfig;
use crate::error::{FsLockError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

impl LockConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(LockConfig)` - Successfully loaded and validated config
    /// * `Err(FsLockError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            FsLockError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: LockConfig = serde_yaml::from_str(yaml)
            .map_err(|e| FsLockError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| FsLockError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// A zero delay would turn the waiting loops into a busy spin, so it is
    /// rejected.
    pub fn validate(&self) -> Result<()> {
        if self.wait_delay_ms == 0 {
            return Err(FsLockError::Config(
                "config validation failed: wait_delay_ms must be greater than 0".to_string(),
            ));
        }

        if let Some(dir) = &self.scratch_dir
            && dir.as_os_str().is_empty()
        {
            return Err(FsLockError::Config(
                "config validation failed: scratch_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Delay between claim attempts.
    pub fn wait_delay(&self) -> Duration {
        Duration::from_millis(self.wait_delay_ms)
    }

    /// Set the delay between claim attempts.
    ///
    /// Sub-millisecond delays are rounded up to one millisecond.
    pub fn with_wait_delay(mut self, delay: Duration) -> Self {
        self.wait_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX).max(1);
        self
    }

    /// Create staging directories under `dir` instead of the OS temp directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }
}
