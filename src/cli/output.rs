//! Output formatting for probe results
//!
//! Human output prints one `VARIABLE = value` line per check; JSON output is
//! meant for scripts that feed the values into a build.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::ProbeConfig;
use crate::probe::{ConfigureReport, ProbeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single check result labelled `name`
    pub fn format_result(&self, name: &str, result: &ProbeResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "check": name,
                    "success": result.success,
                    "output": result.output,
                });
                serde_json::to_string_pretty(&value).context("Failed to serialize probe result")
            }
            OutputFormat::Human => Ok(human_line(name, result)),
        }
    }

    pub fn format_report(&self, report: &ConfigureReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize configure report"),
            OutputFormat::Human => {
                let mut out: Vec<String> = report
                    .results
                    .iter()
                    .map(|(name, result)| human_line(name, result))
                    .collect();
                let passed = report.results.values().filter(|r| r.success).count();
                out.push(format!(
                    "{}/{} checks passed",
                    passed,
                    report.results.len()
                ));
                Ok(out.join("\n"))
            }
        }
    }

    pub fn format_key(&self, file_name: &str, path: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "file_name": file_name,
                "path": path,
            }))
            .context("Failed to serialize cache key"),
            OutputFormat::Human => Ok(path.display().to_string()),
        }
    }

    pub fn format_config(&self, config: &ProbeConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "cache_dir": config.cache_dir,
                "cache_mode": config.cache_mode.as_str(),
                "curl_config": config.curl_config,
                "dpkg_architecture": config.dpkg_architecture,
                "memoize": config.memoize,
                "log_file": config.log_file,
                "log_level": config.log_level,
                "log_json": config.log_json,
            }))
            .context("Failed to serialize configuration"),
            OutputFormat::Human => Ok(config.to_string().trim_end().to_string()),
        }
    }
}

fn human_line(name: &str, result: &ProbeResult) -> String {
    if result.success {
        format!("{} = {}", name, result.output)
    } else {
        format!("{}: check failed", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn sample_report() -> ConfigureReport {
        let mut results = BTreeMap::new();
        results.insert("CURL_LIBS".to_string(), ProbeResult::success("-lcurl"));
        results.insert("CURL_PREFIX".to_string(), ProbeResult::success("/usr"));
        results.insert("DEB_BUILD_ARCH".to_string(), ProbeResult::failure());
        ConfigureReport {
            results,
            all_ok: false,
        }
    }

    #[test]
    fn test_human_result() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        assert_eq!(
            formatter
                .format_result("CURL_PREFIX", &ProbeResult::success("/usr"))
                .unwrap(),
            "CURL_PREFIX = /usr"
        );
        assert_eq!(
            formatter
                .format_result("DEB_BUILD_ARCH", &ProbeResult::failure())
                .unwrap(),
            "DEB_BUILD_ARCH: check failed"
        );
    }

    #[test]
    fn test_json_result() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let out = formatter
            .format_result("CURL_LIBS", &ProbeResult::success("-lcurl"))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["check"], "CURL_LIBS");
        assert_eq!(value["success"], true);
        assert_eq!(value["output"], "-lcurl");
    }

    #[test]
    fn test_human_report() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let out = formatter.format_report(&sample_report()).unwrap();
        assert_eq!(
            out,
            "CURL_LIBS = -lcurl\nCURL_PREFIX = /usr\nDEB_BUILD_ARCH: check failed\n2/3 checks passed"
        );
    }

    #[test]
    fn test_json_report() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let out = formatter.format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["all_ok"], false);
        assert_eq!(value["results"]["CURL_PREFIX"]["output"], "/usr");
        assert_eq!(value["results"]["DEB_BUILD_ARCH"]["success"], false);
    }

    #[test]
    fn test_key_output() {
        let path = PathBuf::from("/tmp/sconf/uname.out");
        let human = OutputFormatter::new(OutputFormat::Human)
            .format_key("uname.out", &path)
            .unwrap();
        assert_eq!(human, "/tmp/sconf/uname.out");

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_key("uname.out", &path)
            .unwrap();
        assert!(json.contains("\"file_name\": \"uname.out\""));
    }

    #[test]
    fn test_config_output() {
        let config = ProbeConfig::with_cache_dir("/tmp/sconf");
        let json = OutputFormatter::new(OutputFormat::Json)
            .format_config(&config)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cache_mode"], "auto");
        assert_eq!(value["dpkg_architecture"], serde_json::Value::Null);

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_config(&config)
            .unwrap();
        assert!(human.starts_with("Confprobe Configuration:"));
    }
}
