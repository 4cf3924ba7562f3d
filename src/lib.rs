pub(crate) mod controllers;
pub(crate) mod core;
pub(crate) mod routes;
pub(crate) mod store;
pub(crate) mod types;
pub(crate) mod utils;

use chrono::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use crate::core::error::ConfigError as Error;
use crate::core::{config::Args, state::AppState};

/// Which of the three services a binary serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Service {
    Users,
    Contracts,
    Orders,
}

impl Service {
    pub(crate) fn default_port(self) -> u16 {
        match self {
            Service::Users => 4000,
            Service::Contracts => 4001,
            Service::Orders => 4002,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Service::Users => "users",
            Service::Contracts => "contracts",
            Service::Orders => "orders",
        }
    }
}

pub async fn run(service: Service) -> Result<(), Error> {
    let config = Args::load(service)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level).unwrap_or_default())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = store::connect(&config.database_url(), config.database_max_connections).await?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(Error::DatabaseMigration)?;

    let state = AppState::new(
        pool,
        &config.secret,
        config.hash_cost,
        Duration::hours(config.token_ttl_hours),
    )?;

    let app = routes::router::routes(service, state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(Error::IO)?;

    tracing::info!(service = service.name(), port = config.port, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::IO)?;

    tracing::info!(service = service.name(), "stopped server");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
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

    tracing::info!("shutting down server");
}
