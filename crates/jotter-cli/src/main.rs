use anyhow::Result;
use clap::{Parser, Subcommand};
use jotter_application::NotesClient;
use jotter_core::config::ClientConfig;
use jotter_core::session::TokenStore;
use jotter_infrastructure::{ConfigService, FileTokenStore, InMemoryTokenStore};
use jotter_interaction::HttpNotesApi;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "jotter")]
#[command(about = "Jotter - command line client for a REST notes backend", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config file and JOTTER_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to an alternative config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account (does not log in)
    Register {
        username: String,
        email: String,
        #[arg(long, env = "JOTTER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and remember the session
    Login {
        username: String,
        #[arg(long, env = "JOTTER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Status,
    /// List notes
    List {
        /// Only show notes whose title or content contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create a note
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long, default_value = "")]
        content: String,
    },
    /// Replace the title and/or content of a note
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Delete a note
    Delete { id: String },
    /// Interactive shell
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_tracing(cli.verbose, &config.log_level);
    tracing::debug!("[Cli] Using backend {}", config.base_url);

    let client = build_client(&config)?;

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => commands::account::register(&client, &username, &email, &password).await?,
        Commands::Login { username, password } => {
            commands::account::login(&client, &username, &password).await?
        }
        Commands::Logout => commands::account::logout(&client).await,
        Commands::Status => commands::account::status(&client, &config).await?,
        Commands::List { search } => commands::notes::list(&client, search.as_deref()).await?,
        Commands::Add { title, content } => commands::notes::add(&client, &title, &content).await?,
        Commands::Edit { id, title, content } => {
            commands::notes::edit(&client, &id, title, content).await?
        }
        Commands::Delete { id } => commands::notes::delete(&client, &id).await?,
        Commands::Shell => commands::shell::run(&client, &config).await?,
    }

    Ok(())
}

/// Defaults, then config file, then environment, then flags.
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = service.load()?;

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

/// `RUST_LOG` wins; otherwise `-v` flags, otherwise the configured level.
fn init_tracing(verbose: u8, configured_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => configured_level,
            1 => "info",
            _ => "debug",
        };
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(config: &ClientConfig) -> Result<NotesClient> {
    let api = Arc::new(HttpNotesApi::from_config(config));
    let token_store: Arc<dyn TokenStore> = if config.persist_session {
        Arc::new(FileTokenStore::new()?)
    } else {
        Arc::new(InMemoryTokenStore::new())
    };
    Ok(NotesClient::new(api, token_store))
}
