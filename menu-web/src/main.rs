use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use menu_service::Store;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod extract;
mod flash;
mod handlers;
mod models;
mod pages;

use config::{DatabaseArgs, ServeArgs};
use handlers::{AppState, app};

#[derive(Parser)]
#[command(version, about = "Restaurant menu web application")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, env = "DEBUG", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and serve HTTP
    Serve(ServeArgs),
    /// Apply pending migrations and exit
    Migrate(DatabaseArgs),
    /// Apply migrations and load sample restaurants into an empty database
    Seed(DatabaseArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Migrate(args) => {
            open_store(&args).await?;
            Ok(())
        }
        Commands::Seed(args) => {
            let store = open_store(&args).await?;
            let inserted = store.seed_sample_data().await?;
            if inserted == 0 {
                warn!("database already has restaurants; nothing seeded");
            }
            Ok(())
        }
    }
}

async fn open_store(args: &DatabaseArgs) -> Result<Store, Box<dyn std::error::Error>> {
    info!(database = %args.database_url, "opening database");
    let store = Store::connect(&args.database_url)?;
    let applied = store.run_migrations().await?;
    info!(applied, "migrations up to date");
    Ok(store)
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cookie_key = args.cookie_key()?;
    let store = open_store(&args.database).await?;

    let app = app(AppState { store, cookie_key });

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!("Restaurant menu listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            warn!("Received SIGTERM, shutting down");
        }
    }
}
