use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use newcomer_cli::cli::{run_command, CliCommand, CliConfig, PreferenceOverrides};
use newcomer_core::constants::options;
use newcomer_core::tracing_setup::init_tracing;
use newcomer_core::{AssistantSession, CoreConfig, HttpAssistantClient};
use tokio::task::LocalSet;

#[derive(Parser)]
#[command(name = "newcomer-cli")]
#[command(about = "Personalized assistant for immigrants and newcomers")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    /// Path to JSON config file (apiBaseUrl, requestTimeoutSecs, preferences)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Backend base URL, overriding config and environment
    #[arg(long)]
    api_url: Option<String>,

    #[command(flatten)]
    preferences: PreferenceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PreferenceArgs {
    /// Visa status, e.g. "Student Visa"
    #[arg(long, value_parser = PossibleValuesParser::new(options::VISA_STATUSES.iter().copied()))]
    status: Option<String>,

    /// US state you live in
    #[arg(long)]
    state: Option<String>,

    /// Country of origin
    #[arg(long)]
    country: Option<String>,

    /// Preferred answer language
    #[arg(long, value_parser = PossibleValuesParser::new(options::LANGUAGES.iter().copied()))]
    language: Option<String>,

    /// Interest (can be specified multiple times)
    #[arg(long = "interest", value_parser = PossibleValuesParser::new(options::INTERESTS.iter().copied()))]
    interests: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the assistant a single question
    Ask {
        /// Question text
        question: String,
    },

    /// Interactive chat on stdin
    Chat,

    /// List FAQs for your visa status and language
    Faqs {
        /// Only FAQs whose question or answer contains this text
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Only FAQs in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Suggested questions for your profile
    Presets,

    /// Local events matching your region and interests
    Events {
        /// Only events in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// List the accepted visa statuses, interests and languages
    Options,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;
    let pretty = cli.pretty;

    let config = CliConfig::load_or_default(cli.config.as_deref())?;
    let mut core_config = config.core_config();
    if let Some(url) = cli.api_url {
        core_config = CoreConfig {
            request_timeout: core_config.request_timeout,
            ..CoreConfig::new(url)
        };
    }

    let overrides = PreferenceOverrides {
        visa_status: cli.preferences.status,
        state: cli.preferences.state,
        country: cli.preferences.country,
        language: cli.preferences.language,
        interests: cli.preferences.interests,
    };
    let preferences = overrides.apply(config.preferences);

    let command = match cli.command {
        Commands::Ask { question } => CliCommand::Ask { question },
        Commands::Chat => CliCommand::Chat,
        Commands::Faqs { search, category } => CliCommand::Faqs { search, category },
        Commands::Presets => CliCommand::Presets,
        Commands::Events { category } => CliCommand::Events { category },
        Commands::Options => CliCommand::Options,
    };

    let client = HttpAssistantClient::new(core_config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let local = LocalSet::new();
    local.block_on(&runtime, async move {
        let session = AssistantSession::new(Rc::new(client), preferences);
        run_command(&session, command, pretty).await
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_flags_accept_only_listed_values() {
        let cli = Cli::try_parse_from([
            "newcomer-cli",
            "--status",
            "Student Visa",
            "--interest",
            "Housing",
            "options",
        ])
        .unwrap();
        assert_eq!(cli.preferences.status.as_deref(), Some("Student Visa"));
        assert_eq!(cli.preferences.interests, vec!["Housing".to_string()]);
        assert!(matches!(cli.command, Commands::Options));

        assert!(Cli::try_parse_from(["newcomer-cli", "--language", "Klingon", "presets"]).is_err());
    }
}
