use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

use omnidim_interview::credentials::{
    default_provider, CredentialProvider, KeyringKey, StaticKey,
};
use omnidim_interview::omnidim::{CallConfig, CallLogQuery, DifficultyLevel, OmniDimClient};
use omnidim_interview::settings::{default_settings_path, load_settings};

#[derive(Parser)]
#[command(
    name = "omnidim-interview",
    version,
    about = "Dispatch and inspect OmniDimension interview calls"
)]
struct Cli {
    /// API key to use instead of the environment or keyring
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show whether an API key is configured
    Status,
    /// List agents available for interviews
    Agents,
    /// List call logs
    Logs {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        #[arg(long)]
        agent_id: Option<u64>,
    },
    /// Show one call log
    Log { id: String },
    /// Place an interview call
    Dispatch {
        #[arg(long)]
        agent_id: u64,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        job_role: String,
        #[arg(long, default_value = "intermediate")]
        difficulty: DifficultyLevel,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        candidate: Option<String>,
    },
    /// Store the API key in the system keyring (omit the key to delete it)
    SetKey { key: Option<String> },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present (for development convenience)
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let settings_path = match cli.settings {
        Some(path) => path,
        None => default_settings_path()?,
    };
    let settings = load_settings(&settings_path);
    log::debug!("Settings loaded from {:?}", settings_path);

    let provider: Box<dyn CredentialProvider> = match cli.api_key {
        Some(key) => Box::new(StaticKey::new(key)),
        None => Box::new(default_provider(&settings.api_key_env)),
    };
    let client = OmniDimClient::from_settings(&settings, provider.as_ref())
        .map_err(|e| e.to_string())?;

    let output: Value = match cli.command {
        Command::Status => {
            serde_json::to_value(client.key_status()).map_err(|e| e.to_string())?
        }
        Command::Agents => client
            .list_interview_agents::<Value>()
            .await
            .map_err(|e| e.to_string())?,
        Command::Logs {
            page,
            page_size,
            agent_id,
        } => client
            .call_logs::<Value>(&CallLogQuery {
                page,
                page_size,
                agent_id,
            })
            .await
            .map_err(|e| e.to_string())?,
        Command::Log { id } => client
            .get_call_log::<Value>(&id)
            .await
            .map_err(|e| e.to_string())?,
        Command::Dispatch {
            agent_id,
            phone,
            job_role,
            difficulty,
            company,
            candidate,
        } => {
            let config = CallConfig {
                job_role,
                difficulty_level: difficulty,
                target_company: company,
            };
            client
                .dispatch_interview_call::<Value>(agent_id, &phone, &config, candidate.as_deref())
                .await
                .map_err(|e| e.to_string())?
        }
        Command::SetKey { key } => return KeyringKey::default().store(key.as_deref()),
    };

    let pretty = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
    println!("{}", pretty);
    Ok(())
}
