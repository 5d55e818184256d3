use crate::cli::Cli;
use crate::domain::constants::TOKEN_ENV;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITLAB_ACCESS_TOKEN is not set; export a GitLab personal access token with the read_api scope")]
    MissingToken,
}

/// Everything a run needs, built once in `main` and never mutated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub endpoint: String,
    pub token: String,
    pub settings_path: PathBuf,
    pub page_size: u32,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_cli_with(cli, |k| std::env::var(k).ok())
    }

    pub fn from_cli_with(
        cli: &Cli,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let token = env(TOKEN_ENV)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        Ok(Self {
            endpoint: cli.endpoint.clone(),
            token,
            settings_path: cli.settings.clone(),
            page_size: cli.page_size,
        })
    }
}
