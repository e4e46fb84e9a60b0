//! Command handlers for the confprobe binary
//!
//! Each handler returns the process exit code: 0 when the check succeeded,
//! 1 when it failed, 2 when the configuration or output could not be produced.

use anyhow::Result;
use tracing::{debug, error};

use super::commands::{CliArgs, Commands, KeyArgs, RunArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::{ConfigError, ProbeConfig};
use crate::probe::{configure_all, CheckContext, NamedCheck, ProbeRequest, ProbeResult};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CHECK_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Environment-derived configuration with command line overrides applied.
/// `--log-level` wins over `-v`/`-q`, which win over `CONFPROBE_LOG_LEVEL`.
pub fn build_config(args: &CliArgs) -> Result<ProbeConfig, ConfigError> {
    let mut config = ProbeConfig::from_env()?;

    if let Some(dir) = &args.cache_dir {
        config.set_cache_dir(dir.clone());
    }
    if let Some(mode) = args.mode {
        config.cache_mode = mode.into();
    }
    if args.no_memo {
        config.memoize = false;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    } else if args.verbose {
        config.log_level = "debug".to_string();
    } else if args.quiet {
        config.log_level = "error".to_string();
    }

    config.validate()?;
    Ok(config)
}

/// Runs the parsed command against a configuration from [`build_config`]
pub fn handle(args: &CliArgs, config: &ProbeConfig) -> i32 {
    debug!("{}", config);

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));

    let outcome = match &args.command {
        Commands::CurlPrefix => run_named(config, &formatter, NamedCheck::CurlPrefix),
        Commands::CurlLibs => run_named(config, &formatter, NamedCheck::CurlLibs),
        Commands::DebArch => run_named(config, &formatter, NamedCheck::DebBuildArch),
        Commands::All => run_all(config, &formatter),
        Commands::Run(run_args) => run_program(config, &formatter, run_args),
        Commands::Key(key_args) => print_key(config, &formatter, key_args),
        Commands::Config => formatter.format_config(config).map(|out| {
            println!("{}", out);
            EXIT_SUCCESS
        }),
    };

    outcome.unwrap_or_else(|e| {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        EXIT_CONFIG_ERROR
    })
}

fn run_named(config: &ProbeConfig, formatter: &OutputFormatter, check: NamedCheck) -> Result<i32> {
    let ctx = CheckContext::new(config.clone());
    let result = check.run(&ctx);
    emit(formatter, check.variable(), &result)
}

fn run_all(config: &ProbeConfig, formatter: &OutputFormatter) -> Result<i32> {
    let ctx = CheckContext::new(config.clone());
    let report = configure_all(&ctx);
    println!("{}", formatter.format_report(&report)?);
    Ok(if report.all_ok {
        EXIT_SUCCESS
    } else {
        EXIT_CHECK_FAILED
    })
}

fn run_program(config: &ProbeConfig, formatter: &OutputFormatter, args: &RunArgs) -> Result<i32> {
    let ctx = CheckContext::new(config.clone());
    let label = args.program.display().to_string();
    let request = request_for(&args.program, &args.args, args.key.as_deref());

    let result = if args.on_path {
        ctx.probe_on_path(&label, &request)
    } else {
        ctx.probe(&request)
    };
    emit(formatter, &label, &result)
}

fn print_key(config: &ProbeConfig, formatter: &OutputFormatter, args: &KeyArgs) -> Result<i32> {
    let request = request_for(&args.program, &args.args, args.key.as_deref());
    request.validate()?;
    let file_name = request.cache_file_name();
    let path = config.cache_dir.join(&file_name);
    println!("{}", formatter.format_key(&file_name, &path)?);
    Ok(EXIT_SUCCESS)
}

fn request_for(program: &std::path::Path, args: &str, key: Option<&str>) -> ProbeRequest {
    let request = ProbeRequest::new(program, args);
    match key {
        Some(k) => request.with_cache_key(k),
        None => request,
    }
}

fn emit(formatter: &OutputFormatter, name: &str, result: &ProbeResult) -> Result<i32> {
    println!("{}", formatter.format_result(name, result)?);
    Ok(if result.success {
        EXIT_SUCCESS
    } else {
        EXIT_CHECK_FAILED
    })
}
