// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::schedule::Bucket;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_user() -> String {
    "local".to_string()
}

fn default_true() -> bool {
    true
}

fn default_summary_window_days() -> u32 {
    7
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Collection scope on disk; one directory per user id.
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_true")]
    pub hide_completed: bool,

    /// How far ahead the dashboard looks for deadlines and interviews.
    #[serde(default = "default_summary_window_days")]
    pub summary_window_days: u32,

    /// Bucket assigned to quick-added tasks that have no due date.
    #[serde(default)]
    pub default_bucket: Bucket,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: default_user(),
            hide_completed: true,
            summary_window_days: 7,
            default_bucket: Bucket::Today,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers can fall back to
        // defaults without masking real IO failures.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Detects whether an error from `load` means the config file was
    /// simply missing, as opposed to unreadable or malformed.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_save_then_load_round_trip() {
        let ctx = TestContext::new();
        let mut config = Config::default();
        config.user = "alice".to_string();
        config.summary_window_days = 14;
        config.save(&ctx).unwrap();

        let loaded = Config::load(&ctx).unwrap();
        assert_eq!(loaded.user, "alice");
        assert_eq!(loaded.summary_window_days, 14);
        assert!(loaded.hide_completed);
    }

    #[test]
    fn test_missing_config_is_detectable() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        std::fs::write(&path, "user = \"bob\"\n").unwrap();

        let loaded = Config::load(&ctx).unwrap();
        assert_eq!(loaded.user, "bob");
        assert_eq!(loaded.summary_window_days, 7);
        assert_eq!(loaded.default_bucket, Bucket::Today);
    }
}
