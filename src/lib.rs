//! confprobe - configuration checks that probe external tools
//!
//! A configure step often needs facts only an installed tool can report:
//! where libcurl lives, which flags link it, what the Debian build
//! architecture is. Each check here runs the tool once, stores its stdout in
//! a cache file named after the tool and a hash of its arguments, and reports
//! success together with the trimmed output.
//!
//! # Example Usage
//!
//! ```no_run
//! use confprobe::probe::{check_curl_prefix, CheckContext};
//! use confprobe::ProbeConfig;
//!
//! let config = ProbeConfig::from_env().expect("invalid CONFPROBE_* settings");
//! let ctx = CheckContext::new(config);
//! let prefix = check_curl_prefix(&ctx);
//! if prefix.success {
//!     println!("libcurl installed under {}", prefix.output);
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`probe`]: requests, the check context, and the named checks
//! - [`config`]: typed configuration loaded from the environment
//! - [`config_log`]: the human-readable configuration log

pub mod cli;
pub mod config;
pub mod config_log;
pub mod error;
pub mod probe;
pub mod util;

pub use config::{CacheMode, ConfigError, ProbeConfig};
pub use config_log::ConfigLog;
pub use error::ProbeError;
pub use probe::{CheckContext, ProbeRequest, ProbeResult};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
