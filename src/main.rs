use baskettrack::cli::{run, Cli};
use baskettrack::logging::{init_logging, LoggingConfig};
use clap::Parser;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let logging = LoggingConfig::from_env().verbose(cli.verbose);
    if let Err(e) = init_logging(&logging) {
        eprintln!("warning: failed to initialise logging: {e}");
    }
    run(cli)
}
