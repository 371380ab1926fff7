use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use students_api::{
    app::build_router,
    application::student_service::StudentService,
    config::AppConfig,
    infrastructure::{open_repository, sqlite_student_repository::SqliteStudentRepository},
    state::AppState,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "students-api")]
#[command(version, about = "REST CRUD service for student records")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve {
        /// Overrides STUDENTS_BIND_ADDR
        #[arg(long)]
        bind: Option<SocketAddr>,
        /// Overrides STUDENTS_DATABASE_URL
        #[arg(long)]
        database_url: Option<String>,
    },
    /// Create the students table and exit
    Migrate {
        #[arg(long)]
        database_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("failed to load configuration")?;

    match cli.command {
        Some(Command::Migrate { database_url }) => migrate(&database_url, &config).await,
        Some(Command::Serve { bind, database_url }) => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if database_url.is_some() {
                config.database_url = database_url;
            }
            serve(config).await
        }
        None => serve(config).await,
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let repository = open_repository(config.database_url.as_deref(), config.db_max_connections)
        .await
        .context("failed to open student store")?;
    let service = Arc::new(StudentService::new(repository));
    let app = build_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(bind_addr = %config.bind_addr, "students API started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("students API stopped");
    Ok(())
}

async fn migrate(database_url: &str, config: &AppConfig) -> Result<()> {
    SqliteStudentRepository::connect(database_url, config.db_max_connections)
        .await
        .with_context(|| format!("failed to migrate {database_url}"))?;
    info!(database_url, "students table ready");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("students_api=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install ctrl+c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
