use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todolist::{
    app::create_app,
    config::{Config, DynamoDbConfig},
    state::AppState,
    storage::{DynamoDbStore, InMemoryStore, StoreRepository},
};

/// Where todo records are persisted.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum StorageBackend {
    /// AWS DynamoDB (or a local DynamoDB via DYNAMODB_ENDPOINT)
    Dynamodb,
    /// Process-local store, lost on exit
    Memory,
}

/// Todolist - Keep track of the things you need to do
#[derive(Parser, Debug)]
#[command(name = "todolist")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "8080", env = "PORT")]
    port: u16,

    /// Storage backend
    #[arg(long, value_enum, default_value = "dynamodb", env = "STORAGE_BACKEND")]
    storage: StorageBackend,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todolist=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let state = build_state(cli.storage, &config).await?;

    let app = create_app(state, config.request_timeout());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the application state for the selected backend.
///
/// A missing table or index name is fatal for the DynamoDB backend.
async fn build_state(backend: StorageBackend, config: &Config) -> Result<AppState> {
    let state = match backend {
        StorageBackend::Dynamodb => {
            let db = DynamoDbConfig::from_env()?;
            tracing::info!(
                target_env = %db.target_display(),
                table = %db.table_name,
                index = %db.query_index_name,
                "Using DynamoDB storage"
            );

            let store = DynamoDbStore::connect(&db)
                .await
                .with_page_size(config.query_page_size);
            AppState::new(Arc::new(StoreRepository::new(store)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, records are lost on exit");

            let store = match config.query_page_size {
                Some(page_size) => InMemoryStore::with_page_size(page_size as usize),
                None => InMemoryStore::new(),
            };
            AppState::new(Arc::new(StoreRepository::new(store)))
        }
    };

    Ok(state)
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
