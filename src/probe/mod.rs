//! External tool probes
//!
//! A probe runs `program args > <cache_dir>/<tool>-<md5(args)>.out`, reuses
//! that file while it is up to date, and reports the trimmed output.

pub mod cache_key;
pub mod checks;
pub mod context;
pub mod memo;
pub mod request;
pub mod runner;

pub use checks::{
    check_curl, check_curl_libs, check_curl_prefix, check_deb_build_arch, configure_all,
    ConfigureReport, NamedCheck,
};
pub use context::CheckContext;
pub use memo::ProbeMemo;
pub use request::{ProbeRequest, ProbeResult};
pub use runner::{CommandRunner, SystemRunner};
