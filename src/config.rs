//! Configuration management for confprobe
//!
//! This module replaces the build environment a configure step would normally
//! consult with a typed [`ProbeConfig`]. Settings are loaded from environment
//! variables with sensible defaults and resolved once, before any probe runs.
//!
//! # Environment Variables
//!
//! - `CONFPROBE_CACHE_DIR`: Directory holding cache files - default: user cache dir + "confprobe"
//! - `CONFPROBE_CURL_CONFIG`: Path to curl-config - falls back to `CURL`, then "curl-config"
//! - `CONFPROBE_DPKG_ARCHITECTURE`: Path to dpkg-architecture - default: looked up on PATH
//! - `CONFPROBE_CACHE_MODE`: Cache mode (auto|force|cached) - default: "auto"
//! - `CONFPROBE_MEMOIZE`: Keep results in memory per context (true|false) - default: "true"
//! - `CONFPROBE_LOG_FILE`: Configuration log path, empty to disable - default: cache dir + "config.log"
//! - `CONFPROBE_LOG_LEVEL`: Logging level - default: "warn"
//! - `CONFPROBE_LOG_JSON`: Emit tracing output as JSON (true|false) - default: "false"
//!
//! A variable that is set but cannot be parsed is a [`ConfigError`], never a
//! silent fallback to the default.
//!
//! # Example
//!
//! ```no_run
//! use confprobe::ProbeConfig;
//!
//! let config = ProbeConfig::from_env().expect("Invalid configuration");
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_CURL_CONFIG: &str = "curl-config";
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_MEMOIZE: bool = true;
const CACHE_DIR_NAME: &str = "confprobe";
const LOG_FILE_NAME: &str = "config.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// How the on-disk cache is consulted before running a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Re-run only when the cache file is missing or older than the program
    #[default]
    Auto,
    /// Always re-run the program
    Force,
    /// Never run; a missing cache file is a failed probe
    Cached,
}

impl CacheMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheMode::Auto => "auto",
            CacheMode::Force => "force",
            CacheMode::Cached => "cached",
        }
    }

    /// Mode named by `CONFPROBE_CACHE_MODE`, `None` when unset or empty
    pub fn from_env() -> Result<Option<CacheMode>, ConfigError> {
        match env_value("CONFPROBE_CACHE_MODE") {
            Some(s) => s.parse().map(Some),
            None => Ok(None),
        }
    }
}

impl FromStr for CacheMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(CacheMode::Auto),
            "force" => Ok(CacheMode::Force),
            "cached" | "cache" => Ok(CacheMode::Cached),
            _ => Err(ConfigError::ParseError {
                field: "cache mode".to_string(),
                error: format!("{} (valid options: auto, force, cached)", s),
            }),
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed replacement for the build environment a check would read from
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Directory where `<tool>-<hash>.out` files live
    pub cache_dir: PathBuf,

    /// curl-config program (path or bare name)
    pub curl_config: PathBuf,

    /// dpkg-architecture program; looked up on PATH when unset
    pub dpkg_architecture: Option<PathBuf>,

    pub cache_mode: CacheMode,

    /// Memoize successful results in memory for the lifetime of a check context
    pub memoize: bool,

    /// Human-readable configuration log; `None` logs through tracing only
    pub log_file: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Render tracing output as JSON
    pub log_json: bool,
}

impl Default for ProbeConfig {
    /// Built-in defaults rooted at the user cache directory. The environment
    /// is not consulted; see [`ProbeConfig::from_env`].
    fn default() -> Self {
        Self::with_cache_dir(default_cache_dir())
    }
}

impl ProbeConfig {
    /// Loads configuration from `CONFPROBE_*` environment variables, falling
    /// back to defaults for anything unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cache_dir = env_value("CONFPROBE_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_cache_dir);

        let curl_config = env_value("CONFPROBE_CURL_CONFIG")
            .or_else(|| env_value("CURL"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CURL_CONFIG));

        let dpkg_architecture = env_value("CONFPROBE_DPKG_ARCHITECTURE").map(PathBuf::from);

        let log_file = match env::var("CONFPROBE_LOG_FILE") {
            Ok(v) if v.is_empty() => None,
            Ok(v) => Some(PathBuf::from(v)),
            Err(_) => Some(cache_dir.join(LOG_FILE_NAME)),
        };

        let log_level = env_value("CONFPROBE_LOG_LEVEL")
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Ok(Self {
            cache_dir,
            curl_config,
            dpkg_architecture,
            cache_mode: CacheMode::from_env()?.unwrap_or_default(),
            memoize: env_bool("CONFPROBE_MEMOIZE")?.unwrap_or(DEFAULT_MEMOIZE),
            log_file,
            log_level,
            log_json: env_bool("CONFPROBE_LOG_JSON")?.unwrap_or(false),
        })
    }

    /// Configuration rooted at `cache_dir` that ignores the environment.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        let cache_dir = cache_dir.into();
        Self {
            log_file: Some(cache_dir.join(LOG_FILE_NAME)),
            cache_dir,
            curl_config: PathBuf::from(DEFAULT_CURL_CONFIG),
            dpkg_architecture: None,
            cache_mode: CacheMode::Auto,
            memoize: DEFAULT_MEMOIZE,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
        }
    }

    /// Moves the cache directory. A log file still at its default location
    /// inside the old directory moves along with it.
    pub fn set_cache_dir(&mut self, cache_dir: impl Into<PathBuf>) {
        let cache_dir = cache_dir.into();
        if self.log_file.as_deref() == Some(self.cache_dir.join(LOG_FILE_NAME).as_path()) {
            self.log_file = Some(cache_dir.join(LOG_FILE_NAME));
        }
        self.cache_dir = cache_dir;
    }

    /// Validates the configuration
    ///
    /// Checks that:
    /// - The cache directory and curl-config paths are non-empty
    /// - A dpkg-architecture override, when set, is non-empty
    /// - Log level is valid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Cache directory must not be empty".to_string(),
            ));
        }
        if self.curl_config.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "curl-config path must not be empty".to_string(),
            ));
        }
        if let Some(dpkg) = &self.dpkg_architecture {
            if dpkg.as_os_str().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "dpkg-architecture path must not be empty".to_string(),
                ));
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

impl fmt::Display for ProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confprobe Configuration:")?;
        writeln!(f, "  Cache Dir: {}", self.cache_dir.display())?;
        writeln!(f, "  Cache Mode: {}", self.cache_mode)?;
        writeln!(f, "  curl-config: {}", self.curl_config.display())?;
        match &self.dpkg_architecture {
            Some(p) => writeln!(f, "  dpkg-architecture: {}", p.display())?,
            None => writeln!(f, "  dpkg-architecture: (PATH lookup)")?,
        }
        writeln!(f, "  Memoize: {}", self.memoize)?;
        if let Some(ref log) = self.log_file {
            writeln!(f, "  Log File: {}", log.display())?;
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        if self.log_json {
            writeln!(f, "  Log Format: json")?;
        }
        Ok(())
    }
}

/// Value of `key`, treating an empty string as unset
fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match env_value(key) {
        Some(v) => v
            .to_lowercase()
            .parse::<bool>()
            .map(Some)
            .map_err(|_| ConfigError::ParseError {
                field: key.to_string(),
                error: format!("{} (expected true or false)", v),
            }),
        None => Ok(None),
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join(CACHE_DIR_NAME)
}
