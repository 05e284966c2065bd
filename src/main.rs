use clap::Parser;
use roster::cli::commands::Cli;
use roster::cli::handlers;
use roster::io::logging::{LogTarget, init_logging};

fn main() {
    let cli = Cli::parse();

    let config = match handlers::resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // No subcommand → TUI owns the terminal, so log to file only
    let target = if cli.command.is_none() {
        LogTarget::FileOnly
    } else {
        LogTarget::Stderr
    };
    if let Err(e) = init_logging(&config.log, target) {
        eprintln!("warning: {}", e);
    }

    if let Err(e) = handlers::dispatch(cli, &config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
