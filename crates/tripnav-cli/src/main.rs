use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

const LOG_ENV: &str = "TRIPNAV_LOG";

#[derive(Parser)]
#[command(name = "tripnav")]
#[command(about = "Tripnav CLI - inspect deep links, the persisted session and asset ids")]
#[command(long_about = None)]
struct Cli {
    /// Use this directory instead of the platform config directory
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a deep link and print the resulting intent as JSON
    Link {
        /// The link to parse, e.g. myapp://trip/join?tripId=42
        uri: String,
    },
    /// Inspect or modify the persisted session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Derive the storage id of an uploaded asset from its URL
    AssetId {
        url: String,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Print the persisted session
    Show,
    /// Persist a new session
    SignIn {
        #[arg(long)]
        token: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Clear the persisted session
    SignOut,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context::new(cli.config_dir)?;

    match cli.command {
        Commands::Link { uri } => commands::link::parse(&ctx, &uri)?,
        Commands::Session { action } => match action {
            SessionAction::Show => commands::session::show(&ctx).await?,
            SessionAction::SignIn {
                token,
                first_name,
                last_name,
                username,
                email,
            } => {
                let form = commands::session::SignInArgs {
                    token,
                    first_name,
                    last_name,
                    username,
                    email,
                };
                commands::session::sign_in(&ctx, form).await?
            }
            SessionAction::SignOut => commands::session::sign_out(&ctx).await?,
        },
        Commands::AssetId { url } => commands::asset::storage_id(&ctx, &url)?,
    }

    Ok(())
}
