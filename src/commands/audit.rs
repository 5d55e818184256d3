use crate::cli::{Cli, Commands};
use crate::config::RunConfig;
use crate::domain::models::{QueryDocument, RuleSummary};
use crate::gitlab::{fetch_all_projects, GitlabClient};
use crate::services::audit::audit_projects;
use crate::services::output::{print_one, print_out, render_report};
use crate::services::query::build_query;
use crate::services::resolve::display_value;
use crate::services::settings::load_settings;
use std::process::ExitCode;

pub fn handle_commands(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Check { fail_on_mismatch } => {
            let config = RunConfig::from_cli(cli)?;
            let settings = load_settings(&config.settings_path)?;
            let client = GitlabClient::new(&config)?;
            let records = fetch_all_projects(&client, &settings, config.page_size)?;
            let report = audit_projects(&records, &settings);
            let deviating = !report.incorrect.is_empty();
            print_one(cli.json, report, render_report)?;
            if *fail_on_mismatch && deviating {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Query { after } => {
            let settings = load_settings(&cli.settings)?;
            let doc = QueryDocument {
                query: build_query(&settings, after.as_deref(), cli.page_size),
            };
            print_one(cli.json, doc, |d| d.query.clone())?;
        }
        Commands::Rules => {
            let settings = load_settings(&cli.settings)?;
            let rules: Vec<RuleSummary> = settings
                .rules
                .iter()
                .map(|r| RuleSummary {
                    path: r.path.to_string(),
                    kind: r.expected.kind().to_string(),
                    expected: r.expected.raw().clone(),
                })
                .collect();
            print_out(cli.json, &rules, |r| {
                format!("{}\t{}\t{}", r.path, r.kind, display_value(&r.expected))
            })?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
