//! Named checks a configure step runs
//!
//! The curl checks take the program from [`ProbeConfig::curl_config`] and run
//! it directly; a missing program shows up as a failed run. The Debian
//! architecture check looks `dpkg-architecture` up first and fails fast with
//! a "not found" diagnostic when it is absent.
//!
//! [`ProbeConfig::curl_config`]: crate::ProbeConfig::curl_config

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use super::context::CheckContext;
use super::request::{ProbeRequest, ProbeResult};

pub const CURL_PREFIX_ARG: &str = "--prefix";
pub const CURL_LIBS_ARG: &str = "--libs";
pub const DPKG_ARCHITECTURE: &str = "dpkg-architecture";
pub const DEB_BUILD_ARCH_ARG: &str = "-qDEB_BUILD_ARCH";

/// Run the configured curl-config with `args`
pub fn check_curl(ctx: &CheckContext, args: &str) -> ProbeResult {
    let request = ProbeRequest::new(ctx.config().curl_config.clone(), args);
    ctx.probe(&request)
}

/// Installation prefix of libcurl
pub fn check_curl_prefix(ctx: &CheckContext) -> ProbeResult {
    check_curl(ctx, CURL_PREFIX_ARG)
}

/// Linker flags for libcurl
pub fn check_curl_libs(ctx: &CheckContext) -> ProbeResult {
    check_curl(ctx, CURL_LIBS_ARG)
}

/// Debian build architecture, e.g. `amd64`
pub fn check_deb_build_arch(ctx: &CheckContext) -> ProbeResult {
    let program = ctx
        .config()
        .dpkg_architecture
        .clone()
        .unwrap_or_else(|| PathBuf::from(DPKG_ARCHITECTURE));
    ctx.probe_on_path(
        DPKG_ARCHITECTURE,
        &ProbeRequest::new(program, DEB_BUILD_ARCH_ARG),
    )
}

/// The checks available by name, each tied to the build variable it sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NamedCheck {
    CurlPrefix,
    CurlLibs,
    DebBuildArch,
}

impl NamedCheck {
    pub const ALL: [NamedCheck; 3] = [
        NamedCheck::CurlPrefix,
        NamedCheck::CurlLibs,
        NamedCheck::DebBuildArch,
    ];

    pub fn variable(&self) -> &'static str {
        match self {
            NamedCheck::CurlPrefix => "CURL_PREFIX",
            NamedCheck::CurlLibs => "CURL_LIBS",
            NamedCheck::DebBuildArch => "DEB_BUILD_ARCH",
        }
    }

    pub fn run(&self, ctx: &CheckContext) -> ProbeResult {
        match self {
            NamedCheck::CurlPrefix => check_curl_prefix(ctx),
            NamedCheck::CurlLibs => check_curl_libs(ctx),
            NamedCheck::DebBuildArch => check_deb_build_arch(ctx),
        }
    }
}

impl fmt::Display for NamedCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.variable())
    }
}

/// Results of a full configure run, keyed by build variable
#[derive(Debug, Clone, Serialize)]
pub struct ConfigureReport {
    pub results: BTreeMap<String, ProbeResult>,
    pub all_ok: bool,
}

impl ConfigureReport {
    pub fn get(&self, check: NamedCheck) -> Option<&ProbeResult> {
        self.results.get(check.variable())
    }

    /// Build variables for the checks that succeeded
    pub fn variables(&self) -> BTreeMap<&str, &str> {
        self.results
            .iter()
            .filter(|(_, r)| r.success)
            .map(|(k, r)| (k.as_str(), r.output.as_str()))
            .collect()
    }
}

/// Run every named check. A failure does not stop the remaining checks.
pub fn configure_all(ctx: &CheckContext) -> ConfigureReport {
    let results: BTreeMap<String, ProbeResult> = NamedCheck::ALL
        .iter()
        .map(|check| (check.variable().to_string(), check.run(ctx)))
        .collect();
    let all_ok = results.values().all(|r| r.success);

    ConfigureReport { results, all_ok }
}
