use crate::domain::constants::{
    DEFAULT_ENDPOINT, DEFAULT_SETTINGS_FILE, ENDPOINT_ENV, MAX_PAGE_SIZE,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "projaudit",
    version,
    about = "Audit GitLab project settings against an expected-settings document"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_SETTINGS_FILE,
        help = "Expected-settings document (YAML, or TOML with a .toml extension)"
    )]
    pub settings: PathBuf,
    #[arg(
        long,
        global = true,
        env = ENDPOINT_ENV,
        default_value = DEFAULT_ENDPOINT,
        help = "GitLab GraphQL endpoint"
    )]
    pub endpoint: String,
    #[arg(
        long,
        global = true,
        default_value_t = MAX_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE_SIZE as i64),
        help = "Projects requested per page"
    )]
    pub page_size: u32,
    #[arg(short, long, global = true, help = "Debug-level logs on stderr")]
    pub verbose: bool,
    #[arg(short, long, global = true, help = "Only log errors")]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every matching project and report deviations.
    Check {
        #[arg(long, default_value_t = false, help = "Exit with status 1 when any project deviates")]
        fail_on_mismatch: bool,
    },
    /// Print the GraphQL query for one page without contacting the server.
    Query {
        #[arg(long, help = "Pagination cursor to resume after")]
        after: Option<String>,
    },
    /// List the configured rules.
    Rules,
}
