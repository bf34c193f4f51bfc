//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve data/log locations, log level, storage keys and quota.
//! - Read overrides from `TASKDASH_*` environment variables.
//!
//! # Invariants
//! - `home_dir`, `db_path` and `log_dir` are absolute.
//! - A quota of `0` disables the capacity limit.

use crate::logging::default_log_level;
use crate::repo::notes_repo::DEFAULT_NOTES_KEY;
use crate::repo::task_repo::DEFAULT_TASKS_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "TASKDASH_HOME";
pub const LOG_LEVEL_ENV: &str = "TASKDASH_LOG_LEVEL";
pub const QUOTA_ENV: &str = "TASKDASH_QUOTA_BYTES";

const DEFAULT_HOME_DIR_NAME: &str = ".taskdash";
const DB_FILE_NAME: &str = "taskdash.sqlite3";
const LOG_DIR_NAME: &str = "logs";
/// Same order of magnitude as browser origin storage.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    HomeNotAbsolute(PathBuf),
    CurrentDir(std::io::Error),
    InvalidQuota(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeNotAbsolute(path) => {
                write!(f, "home directory must be absolute, got `{}`", path.display())
            }
            Self::CurrentDir(err) => write!(f, "failed to resolve current directory: {err}"),
            Self::InvalidQuota(value) => write!(
                f,
                "invalid {QUOTA_ENV} value `{value}`; expected a non-negative integer"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub home_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub tasks_key: String,
    pub notes_key: String,
    pub quota_bytes: Option<usize>,
}

impl DashboardConfig {
    /// Defaults rooted at an absolute `home_dir`.
    pub fn for_home(home_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let home_dir = home_dir.into();
        if !home_dir.is_absolute() {
            return Err(ConfigError::HomeNotAbsolute(home_dir));
        }
        Ok(Self {
            db_path: home_dir.join(DB_FILE_NAME),
            log_dir: home_dir.join(LOG_DIR_NAME),
            home_dir,
            log_level: default_log_level().to_string(),
            tasks_key: DEFAULT_TASKS_KEY.to_string(),
            notes_key: DEFAULT_NOTES_KEY.to_string(),
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
        })
    }

    /// Resolves configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::from_lookup(|name| std::env::var(name).ok(), &cwd)
    }

    /// Resolves configuration from `lookup`, with relative paths taken
    /// against `cwd`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, cwd: &Path) -> ConfigResult<Self> {
        let home = lookup(HOME_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(|value| resolve_path(Path::new(value.trim()), cwd))
            .unwrap_or_else(|| cwd.join(DEFAULT_HOME_DIR_NAME));
        let mut config = Self::for_home(home)?;

        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|value| !value.trim().is_empty()) {
            config.log_level = level.trim().to_string();
        }
        if let Some(quota) = lookup(QUOTA_ENV) {
            config.quota_bytes = parse_quota(&quota)?;
        }
        Ok(config)
    }

    /// Same configuration rooted at a different home directory.
    pub fn with_home(self, home_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let rehomed = Self::for_home(home_dir)?;
        Ok(Self {
            log_level: self.log_level,
            tasks_key: self.tasks_key,
            notes_key: self.notes_key,
            quota_bytes: self.quota_bytes,
            ..rehomed
        })
    }
}

/// Joins relative `path` onto `cwd`; absolute paths pass through.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn parse_quota(value: &str) -> ConfigResult<Option<usize>> {
    match value.trim().parse::<usize>() {
        Ok(0) => Ok(None),
        Ok(bytes) => Ok(Some(bytes)),
        Err(_) => Err(ConfigError::InvalidQuota(value.to_string())),
    }
}
