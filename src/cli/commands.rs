use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::CacheMode;

/// Probe external tools for build configuration facts
#[derive(Parser, Debug)]
#[command(
    name = "confprobe",
    about = "Probe external tools for build configuration facts",
    version,
    author,
    long_about = "confprobe runs tools such as curl-config and dpkg-architecture, caches \
                  their output under a file named after the tool and a hash of its \
                  arguments, and reports whether the check succeeded together with the \
                  trimmed output."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "DIR", help = "Directory for cache files")]
    pub cache_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        value_name = "MODE",
        help = "When to re-run tools (default: auto, or CONFPROBE_CACHE_MODE)"
    )]
    pub mode: Option<CacheModeArg>,

    #[arg(
        short = 'f',
        long,
        global = true,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, global = true, help = "Do not memoize results in memory")]
    pub no_memo: bool,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Query libcurl's installation prefix (curl-config --prefix)")]
    CurlPrefix,

    #[command(about = "Query libcurl's linker flags (curl-config --libs)")]
    CurlLibs,

    #[command(about = "Query the Debian build architecture (dpkg-architecture -qDEB_BUILD_ARCH)")]
    DebArch,

    #[command(
        about = "Run every named check",
        long_about = "Runs the curl prefix, curl libs and Debian architecture checks and \
                      reports each build variable. Exits non-zero if any check failed."
    )]
    All,

    #[command(
        about = "Probe an arbitrary program",
        long_about = "Runs PROGRAM with ARGS through the cache, exactly like the named checks.\n\n\
                      Examples:\n  \
                      confprobe run pkg-config '--libs libcurl'\n  \
                      confprobe run --on-path uname -m"
    )]
    Run(RunArgs),

    #[command(about = "Print the cache file a probe would use")]
    Key(KeyArgs),

    #[command(about = "Show the resolved configuration")]
    Config,
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[arg(value_name = "PROGRAM", help = "Program path or name")]
    pub program: PathBuf,

    #[arg(
        value_name = "ARGS",
        default_value = "",
        allow_hyphen_values = true,
        help = "Argument string, split with shell quoting rules"
    )]
    pub args: String,

    #[arg(long, value_name = "KEY", help = "Use KEY in the cache filename instead of the hash")]
    pub key: Option<String>,

    #[arg(long, help = "Fail without running if PROGRAM is not on the search path")]
    pub on_path: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct KeyArgs {
    #[arg(value_name = "PROGRAM")]
    pub program: PathBuf,

    #[arg(value_name = "ARGS", default_value = "", allow_hyphen_values = true)]
    pub args: String,

    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheModeArg {
    Auto,
    Force,
    Cached,
}

impl From<CacheModeArg> for CacheMode {
    fn from(arg: CacheModeArg) -> Self {
        match arg {
            CacheModeArg::Auto => CacheMode::Auto,
            CacheModeArg::Force => CacheMode::Force,
            CacheModeArg::Cached => CacheMode::Cached,
        }
    }
}
