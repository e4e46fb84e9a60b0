use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, warn};

use super::memo::ProbeMemo;
use super::request::{ProbeRequest, ProbeResult};
use super::runner::{CommandRunner, SystemRunner};
use crate::config::{CacheMode, ProbeConfig};
use crate::config_log::ConfigLog;
use crate::error::{ProbeError, Result};

/// Everything a check needs from the surrounding configure step: resolved
/// configuration, a way to run processes, the configuration log and the
/// in-memory memo.
pub struct CheckContext {
    config: ProbeConfig,
    runner: Arc<dyn CommandRunner>,
    log: ConfigLog,
    memo: ProbeMemo,
}

impl CheckContext {
    pub fn new(config: ProbeConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner))
    }

    pub fn with_runner(config: ProbeConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let log = ConfigLog::from_config(config.log_file.as_deref());
        Self {
            config,
            runner,
            log,
            memo: ProbeMemo::new(),
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn log(&self) -> &ConfigLog {
        &self.log
    }

    pub fn memo(&self) -> &ProbeMemo {
        &self.memo
    }

    pub fn cache_path(&self, request: &ProbeRequest) -> PathBuf {
        self.config.cache_dir.join(request.cache_file_name())
    }

    /// Run `request`, writing progress and outcome to the configuration log.
    /// Errors are reported as a failed result.
    pub fn probe(&self, request: &ProbeRequest) -> ProbeResult {
        self.log.message(&format!("Checking {} ....", request.display()));
        self.finish(request, self.try_probe(request))
    }

    /// Like [`probe`](Self::probe), but the request's program is looked up
    /// first and nothing runs when it cannot be found. A bare name is searched
    /// on PATH; a path is checked as given. Failures are reported as `tool`.
    pub fn probe_on_path(&self, tool: &str, request: &ProbeRequest) -> ProbeResult {
        self.log.message(&format!("Checking {} ....", request.display()));

        let outcome = self
            .locate_tool(tool, Some(request.program()))
            .and_then(|program| self.try_probe(&request.clone().with_program(program)));
        self.finish(request, outcome)
    }

    /// Resolve `tool` on the search path, or check `explicit` when given
    pub fn locate_tool(&self, tool: &str, explicit: Option<&Path>) -> Result<PathBuf> {
        let wanted = explicit.unwrap_or_else(|| Path::new(tool));
        match self.runner.locate(wanted) {
            Some(path) => {
                debug!(tool, path = %path.display(), "Located tool");
                Ok(path)
            }
            None => Err(ProbeError::ToolNotFound(tool.to_string())),
        }
    }

    /// The probe algorithm without logging: memo, up-to-date check, run,
    /// read back the cache file.
    pub fn try_probe(&self, request: &ProbeRequest) -> Result<ProbeResult> {
        request.validate()?;
        let argv = request.argv()?;
        let name = request.cache_file_name();

        // Force re-runs every time, memo or not
        if self.config.memoize && self.config.cache_mode != CacheMode::Force {
            if let Some(hit) = self.memo.get(&name) {
                debug!(cache_file = %name, "Probe result found in memory");
                return Ok(hit);
            }
        }

        let cache_file = self.config.cache_dir.join(&name);
        if self.is_up_to_date(request, &cache_file)? {
            debug!(cache_file = %cache_file.display(), "Cache file is up to date");
        } else {
            self.build(request, &argv, &cache_file)?;
        }

        let raw =
            fs::read_to_string(&cache_file).map_err(|e| ProbeError::io(&cache_file, e))?;
        let result = ProbeResult::success(&raw);

        if self.config.memoize {
            self.memo.insert(&name, result.clone());
        }
        Ok(result)
    }

    fn finish(&self, request: &ProbeRequest, outcome: Result<ProbeResult>) -> ProbeResult {
        match outcome {
            Ok(result) => {
                self.log.result(&result.output);
                result
            }
            Err(e) => {
                warn!(probe = %request.display(), error = %e, "Probe failed");
                self.log.result(&e.result_message());
                ProbeResult::failure()
            }
        }
    }

    fn is_up_to_date(&self, request: &ProbeRequest, cache_file: &Path) -> Result<bool> {
        match self.config.cache_mode {
            CacheMode::Force => Ok(false),
            CacheMode::Cached => {
                if cache_file.is_file() {
                    Ok(true)
                } else {
                    Err(ProbeError::execution_failed(
                        request.tool_name(),
                        format!(
                            "no cached output at {} and cache mode is '{}'",
                            cache_file.display(),
                            CacheMode::Cached
                        ),
                    ))
                }
            }
            CacheMode::Auto => {
                let Some(cached_at) = modified(cache_file) else {
                    return Ok(false);
                };
                // A program that cannot be located never reuses its cache
                let Some(program) = self.runner.locate(request.program()) else {
                    debug!(
                        program = %request.program().display(),
                        "Program not found, ignoring cache"
                    );
                    return Ok(false);
                };
                Ok(match modified(&program) {
                    Some(program_at) => cached_at >= program_at,
                    None => true,
                })
            }
        }
    }

    /// `program args > cache_file`, through a uniquely named temporary file
    /// in the cache directory so a failed or concurrent run never leaves
    /// partial output behind.
    fn build(&self, request: &ProbeRequest, argv: &[String], cache_file: &Path) -> Result<()> {
        let cache_dir = &self.config.cache_dir;
        fs::create_dir_all(cache_dir).map_err(|e| ProbeError::io(cache_dir, e))?;

        let tmp = tempfile::Builder::new()
            .prefix(&format!("{}.", request.cache_file_name()))
            .suffix(".tmp")
            .tempfile_in(cache_dir)
            .map_err(|e| ProbeError::io(cache_dir, e))?;
        debug!(
            program = %request.program().display(),
            args = ?argv,
            target = %cache_file.display(),
            "Running tool"
        );

        match self.runner.run_to_file(request.program(), argv, tmp.path()) {
            Ok(()) => tmp
                .persist(cache_file)
                .map(|_| ())
                .map_err(|e| ProbeError::io(cache_file, e.error)),
            Err(e) => {
                let _ = fs::remove_file(cache_file);
                Err(e)
            }
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}
