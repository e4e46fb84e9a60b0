use confprobe::cli::commands::CliArgs;
use confprobe::cli::handlers::{build_config, handle, EXIT_CONFIG_ERROR};
use confprobe::util::logging::{init_default, init_logging, LoggingConfig};
use confprobe::VERSION;

use clap::Parser;
use tracing::{debug, error};

fn main() {
    let args = CliArgs::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_default();
            error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };
    init_logging(LoggingConfig::from(&config));

    debug!("confprobe v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    std::process::exit(handle(&args, &config));
}
