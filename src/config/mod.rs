//! Configuration management for orgpulse

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// GitHub token for authenticated requests (higher rate limits).
    /// The `GITHUB_TOKEN` environment variable takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// Directory for the response cache. Absent means caching is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Path of the repos/issues database. Defaults to the user data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    /// Path of the checkpoint file. Defaults to the user data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint_path: Option<PathBuf>,

    /// Ingestion tunables
    #[serde(default)]
    pub preferences: Preferences,
}

/// Ingestion tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Page size for paginated API requests
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Issues retained per repository page batch
    #[serde(default = "default_issues_per_repo")]
    pub issues_per_repo: usize,

    /// Total attempts for transient failures (first try included)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Response cache TTL in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_page_size() -> usize {
    100
}

fn default_issues_per_repo() -> usize {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            issues_per_repo: default_issues_per_repo(),
            max_attempts: default_max_attempts(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl Config {
    /// Get the default config file path (~/.orgpulse/config.yaml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".orgpulse").join("config.yaml"))
    }

    /// Load configuration from an explicit path, or the default location.
    ///
    /// A missing file is not an error: every field has a usable default, so
    /// first runs work without `orgpulse` ever having written a config.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_path()?,
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an explicit path, or the default location.
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_path()?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Token may be stored here, keep it private on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Resolve the GitHub token: environment variable first, then config.
    pub fn resolve_token(&self) -> Option<String> {
        std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.github_token.clone())
    }

    /// Resolve the database path, falling back to the user data dir.
    pub fn resolve_db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(p) => Ok(p.clone()),
            None => Ok(Self::data_dir()?.join("orgpulse.db")),
        }
    }

    /// Resolve the checkpoint file path, falling back to the user data dir.
    pub fn resolve_checkpoint_path(&self) -> Result<PathBuf> {
        match &self.checkpoint_path {
            Some(p) => Ok(p.clone()),
            None => Ok(Self::data_dir()?.join("checkpoint.json")),
        }
    }

    fn data_dir() -> Result<PathBuf> {
        let base = dirs::data_dir().ok_or(ConfigError::Invalid(
            "could not determine data directory".to_string(),
        ))?;
        Ok(base.join("orgpulse"))
    }
}

impl Config {
    /// Resolve the cache directory honoring the `--no-cache` override.
    /// `None` disables the response cache entirely.
    pub fn resolve_cache_dir(&self, no_cache: bool) -> Option<&Path> {
        if no_cache {
            return None;
        }
        self.cache_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let config = Config::load_at(Some(path.to_str().unwrap())).unwrap();

        assert!(config.github_token.is_none());
        assert!(config.cache_dir.is_none());
        assert_eq!(config.preferences.page_size, 100);
        assert_eq!(config.preferences.issues_per_repo, 30);
        assert_eq!(config.preferences.max_attempts, 3);
        assert_eq!(config.preferences.cache_ttl_secs, 3600);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let config = Config {
            github_token: Some("tok".to_string()),
            cache_dir: Some(dir.path().join("cache")),
            db_path: Some(dir.path().join("orgpulse.db")),
            checkpoint_path: None,
            preferences: Preferences {
                page_size: 50,
                ..Preferences::default()
            },
        };
        config.save_at(Some(path.to_str().unwrap())).unwrap();

        let loaded = Config::load_at(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.github_token.as_deref(), Some("tok"));
        assert_eq!(loaded.preferences.page_size, 50);
        assert_eq!(loaded.preferences.issues_per_repo, 30);
    }

    #[test]
    fn test_partial_yaml_fills_preference_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "preferences:\n  page_size: 10\n").unwrap();

        let loaded = Config::load_at(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.preferences.page_size, 10);
        assert_eq!(loaded.preferences.max_attempts, 3);
    }

    #[test]
    fn test_no_cache_flag_disables_cache_dir() {
        let config = Config {
            cache_dir: Some(PathBuf::from("/tmp/cache")),
            ..Config::default()
        };
        assert!(config.resolve_cache_dir(false).is_some());
        assert!(config.resolve_cache_dir(true).is_none());
    }
}
