use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "roster", about = concat!("roster v", env!("CARGO_PKG_VERSION"), " - browse and edit a user directory"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of ./roster.toml
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Fetch users from this URL (overrides the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all users
    List,
    /// Show users whose name, username, email, phone or website contains a query
    Search(SearchArgs),
    /// Show a single user
    Show(ShowArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive text to look for
    pub query: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// User ID to show
    pub id: u64,
}
