use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::cache_key;
use crate::error::{ProbeError, Result};

/// A single invocation of an external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    program: PathBuf,
    args: String,
    cache_key: Option<String>,
}

impl ProbeRequest {
    pub fn new(program: impl Into<PathBuf>, args: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: args.into(),
            cache_key: None,
        }
    }

    /// Use `key` in the cache filename instead of the argument hash
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    /// Same arguments and key, run through `program` instead
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &str {
        &self.args
    }

    pub fn cache_key(&self) -> Option<&str> {
        self.cache_key.as_deref()
    }

    pub fn tool_name(&self) -> String {
        cache_key::program_basename(&self.program)
    }

    pub fn cache_file_name(&self) -> String {
        cache_key::cache_file_name(&self.program, &self.args, self.cache_key())
    }

    /// Program and arguments as typed, for log lines
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.display().to_string()
        } else {
            format!("{} {}", self.program.display(), self.args)
        }
    }

    /// The cache file must land directly inside the cache directory
    pub fn validate(&self) -> Result<()> {
        if self.program.as_os_str().is_empty() {
            return Err(ProbeError::InvalidRequest(
                "program path is empty".to_string(),
            ));
        }
        if self.program.file_name().is_none() {
            return Err(ProbeError::InvalidRequest(format!(
                "program path '{}' has no file name",
                self.program.display()
            )));
        }
        if let Some(key) = &self.cache_key {
            if key.contains(std::path::is_separator) || key.contains('\0') {
                return Err(ProbeError::InvalidRequest(format!(
                    "cache key '{}' must not contain path separators",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Argument string split with shell quoting rules
    pub fn argv(&self) -> Result<Vec<String>> {
        shell_words::split(&self.args).map_err(|e| {
            ProbeError::InvalidRequest(format!("cannot split arguments '{}': {}", self.args, e))
        })
    }
}

/// Outcome of a probe as seen by the configure step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub success: bool,
    pub output: String,
}

impl ProbeResult {
    /// Successful result; `raw` is trimmed of surrounding whitespace
    pub fn success(raw: &str) -> Self {
        Self {
            success: true,
            output: raw.trim().to_string(),
        }
    }

    pub fn failure() -> Self {
        Self {
            success: false,
            output: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// `(1, output)` or `(0, "")`
    pub fn as_pair(&self) -> (u8, &str) {
        (u8::from(self.success), &self.output)
    }
}

impl From<ProbeResult> for (u8, String) {
    fn from(result: ProbeResult) -> Self {
        (u8::from(result.success), result.output)
    }
}
