use std::path::Path;
use std::time::Duration;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::source::HttpSource;
use crate::model::config::Config;
use crate::ops::filter;
use crate::ops::load::{LoadCoordinator, build_runtime};
use crate::ops::store::RecordStore;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Resolve the configuration from `--config` / ./roster.toml and apply the
/// `--url` override.
pub fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let mut config = config_io::load_config(cli.config.as_deref().map(Path::new), &cwd)?;
    if let Some(url) = &cli.url {
        config.source.url = url.clone();
    }
    Ok(config)
}

pub fn dispatch(cli: Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    match cli.command {
        None => crate::tui::run(config),
        Some(cmd) => match cmd {
            Commands::List => cmd_list(config, json),
            Commands::Search(args) => cmd_search(config, args, json),
            Commands::Show(args) => cmd_show(config, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch the user list once, blocking until it arrives or fails.
pub fn load_store(config: &Config) -> Result<RecordStore, Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(config.source.timeout_secs);
    let source = HttpSource::new(&config.source.url, timeout)?;
    let mut store = RecordStore::new();
    let mut coordinator = LoadCoordinator::new(timeout);
    let runtime = build_runtime()?;
    runtime
        .block_on(coordinator.load(&source, &mut store))
        .map_err(|e| format!("error fetching user data: {}", e))?;
    Ok(store)
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(config)?;
    let users = filter::filter(store.all(), "");
    if json {
        println!("{}", serde_json::to_string_pretty(&users_to_json(&users))?);
    } else {
        print_lines(&format_user_table(&users));
    }
    Ok(())
}

fn cmd_search(
    config: &Config,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(config)?;
    let hits = filter::filter(store.all(), &args.query);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&search_to_json(&args.query, &hits))?
        );
    } else if hits.is_empty() {
        println!("no users match \"{}\"", args.query);
    } else {
        print_lines(&format_user_table(&hits));
    }
    Ok(())
}

fn cmd_show(config: &Config, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(config)?;
    let user = store
        .get(args.id)
        .ok_or_else(|| format!("user not found: {}", args.id))?;
    if json {
        println!("{}", serde_json::to_string_pretty(user)?);
    } else {
        print_lines(&format_user_detail(user));
    }
    Ok(())
}
