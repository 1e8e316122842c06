// crates/backend-bin/src/main.rs
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use usermgmt_backend_lib::{
    accounts::create_user,
    config::{Settings, StoreBackend},
    open_store,
    router::create_router,
    AppState,
};
use usermgmt_common::CreateUserRequest;

#[derive(Parser, Debug)]
#[command(name = "usermgmt", version, about = "User management and authentication service")]
struct Cli {
    /// Config file; defaults to ./config.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Override the log level
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create a user in the configured file store
    AddUser {
        #[arg(long)]
        login: String,
        #[arg(long)]
        email: String,
        /// Plaintext password; prefer the environment over the command line
        #[arg(long, env = "USERMGMT_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        /// Role reference in the external role service
        #[arg(long, default_value = "user")]
        role: String,
    },
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("failed to load configuration")?;

    if let Some(bind) = cli.bind {
        settings.bind_addr = bind;
    }
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }
    settings.validate()?;
    Ok(settings)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(settings: Settings) -> Result<()> {
    let state = Arc::new(AppState::from_settings(&settings).await?);
    let app = create_router(state);

    let listener = TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    tracing::info!(addr = %settings.bind_addr, store = ?settings.store.backend, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}

async fn add_user(
    settings: Settings,
    login: String,
    email: String,
    password: String,
    role: String,
) -> Result<()> {
    if settings.store.backend != StoreBackend::File {
        bail!("add-user needs the file store; use [bootstrap] for the memory store");
    }

    let store = open_store(&settings).await?;
    let user = create_user(
        store.as_ref(),
        CreateUserRequest {
            login,
            password,
            email,
            role,
            ..Default::default()
        },
    )
    .await?;
    println!("{}", user.id);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    init_tracing(&settings.log_level);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::AddUser {
            login,
            email,
            password,
            role,
        } => add_user(settings, login, email, password, role).await,
    }
}
