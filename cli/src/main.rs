use clap::{Parser, Subcommand};
use serde_json::json;

mod api;
mod commands;
mod store;
mod util;

use commands::config::ConfigCommands;
use commands::onboard::OnboardCommands;
use commands::profile::ProfileCommands;

#[derive(Parser)]
#[command(
    name = "magpie",
    version,
    about = "Magpie CLI — creator onboarding for the Magpie automation platform"
)]
struct Cli {
    /// API base URL
    #[arg(long, env = "MAGPIE_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Drive the onboarding wizard over the local draft
    Onboard {
        #[command(subcommand)]
        command: OnboardCommands,
    },
    /// Inspect or edit the stored creator profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// User settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Health => health(&cli.api_url).await,
        Commands::Onboard { command } => commands::onboard::run(&cli.api_url, command).await,
        Commands::Profile { command } => commands::profile::run(&cli.api_url, command).await,
        Commands::Config { command } => commands::config::run(command),
    };
    std::process::exit(code);
}

async fn health(api_url: &str) -> i32 {
    let response = match util::client().get(format!("{api_url}/health")).send().await {
        Ok(response) => response,
        Err(error) => {
            let err = json!({
                "error": "connection_error",
                "message": format!("{error}"),
                "docs_hint": "Is the API server running? Check MAGPIE_API_URL."
            });
            eprintln!("{}", serde_json::to_string_pretty(&err).unwrap_or_default());
            return 3;
        }
    };

    let status = response.status().as_u16();
    let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
    let exit_code = match status {
        200..=299 => 0,
        400..=499 => 1,
        _ => 2,
    };
    if exit_code == 0 {
        util::print_json(&body);
    } else {
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    }
    exit_code
}
