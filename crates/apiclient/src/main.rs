use anyhow::{Context, Result};
use apiclient::{session::AuthEvent, state::AppState};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::{
    config::{ClientConfig, LogConfig},
    utils::init_logger,
};
use std::path::PathBuf;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

mod commands;

use commands::{CompanyCommands, PermissionCommands, RoleCommands, UserCommands};

/// Console for the company, RBAC and user administration backend
#[derive(Parser, Debug)]
#[command(name = "apiclient")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend base address (overrides API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Token file (overrides SESSION_FILE)
    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and store the token pair
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "API_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "API_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        phone: String,
    },

    /// Forget the stored tokens
    Logout,

    /// Show whether a session is held
    Status,

    #[command(subcommand)]
    Companies(CompanyCommands),

    #[command(subcommand)]
    Roles(RoleCommands),

    #[command(subcommand)]
    Permissions(PermissionCommands),

    /// List every module action
    ModuleActions,

    #[command(subcommand)]
    Users(UserCommands),

    /// Print client metrics in Prometheus text format
    Metrics,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let log_config = LogConfig::init().context("Failed to load log configuration")?;
    init_logger("apiclient", log_config.is_dev, log_config.enable_file);

    let cli = Cli::parse();

    let mut config = ClientConfig::init().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(session_file) = cli.session_file {
        config = config.with_session_file(session_file);
    }

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    let mut events = state.session.subscribe();
    let watcher = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(AuthEvent::LoginRequired(reason)) => {
                    warn!("Session ended ({reason}); run `apiclient login` to sign in again");
                }
                Ok(event) => info!("Auth event: {event:?}"),
                Err(RecvError::Lagged(skipped)) => warn!("Missed {skipped} auth events"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let outcome = run(&state, cli.command).await;

    // Closing the channel lets the watcher drain pending events and stop.
    drop(state);
    if let Err(err) = watcher.await {
        warn!("Auth event watcher stopped abnormally: {err}");
    }

    if let Err(err) = outcome {
        error!("Command failed: {err:?}");
        eprintln!("{err}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run(state: &AppState, command: Commands) -> Result<(), commands::CommandError> {
    match command {
        Commands::Login { username, password } => {
            commands::login(state, username, password).await
        }
        Commands::Register {
            username,
            password,
            confirm_password,
            phone,
        } => commands::register(state, username, password, confirm_password, phone).await,
        Commands::Logout => commands::logout(state).await,
        Commands::Status => commands::status(state).await,
        Commands::Companies(command) => commands::companies(state, command).await,
        Commands::Roles(command) => commands::roles(state, command).await,
        Commands::Permissions(command) => commands::permissions(state, command).await,
        Commands::ModuleActions => commands::module_actions(state).await,
        Commands::Users(command) => commands::users(state, command).await,
        Commands::Metrics => commands::metrics(state).await,
    }
}
