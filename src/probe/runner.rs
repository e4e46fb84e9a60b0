use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use super::cache_key::program_basename;
use crate::error::{ProbeError, Result};

/// Process execution as the check context needs it
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` with stdout redirected into `stdout_path`.
    ///
    /// Returns `ExecutionFailed`, naming the program by its basename, when it
    /// cannot be started or exits unsuccessfully.
    fn run_to_file(&self, program: &Path, args: &[String], stdout_path: &Path) -> Result<()>;

    /// Locate `program` on the search path. Paths containing a separator are
    /// checked as given.
    fn locate(&self, program: &Path) -> Option<PathBuf>;
}

/// Runs tools with `std::process::Command` and finds them with `which`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run_to_file(&self, program: &Path, args: &[String], stdout_path: &Path) -> Result<()> {
        let stdout = File::create(stdout_path).map_err(|e| ProbeError::io(stdout_path, e))?;
        let name = program_basename(program);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                let reason = if e.kind() == std::io::ErrorKind::NotFound {
                    "program not found".to_string()
                } else {
                    e.to_string()
                };
                ProbeError::execution_failed(&name, reason)
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(program = %program.display(), stderr = %stderr.trim(), "Tool wrote to stderr");
        }

        if !output.status.success() {
            return Err(ProbeError::execution_failed(
                name,
                format!("exited with {}", output.status),
            ));
        }

        Ok(())
    }

    fn locate(&self, program: &Path) -> Option<PathBuf> {
        which::which(program).ok()
    }
}
