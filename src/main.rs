//! Specimen registry main entry point
//! Explicit construction of every service at the composition root; no
//! module-level singletons

use specimen_registry::{
    auth::codec::TokenCodec,
    auth::revocation::{self, RevocationStore},
    config::AppConfig,
    db,
    directory::PgUserDirectory,
    middleware::AppState,
    routes,
    services::AuthService,
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("specimen-registry {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // Load .env files for development; production sets real environment
    // variables
    if let Ok(profile) = std::env::var("REGISTRY_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    telemetry::init_telemetry(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Specimen registry starting..."
    );

    let db_pool = db::create_pool(&config.database).await?;
    if let db::HealthStatus::Unhealthy(reason) = db::health_check(&db_pool).await {
        tracing::warn!(%reason, "Database reachable check failed at startup");
    }

    let directory = Arc::new(PgUserDirectory::new(db_pool));
    let codec = TokenCodec::from_config(&config);
    let revocations = Arc::new(RevocationStore::new(
        config.security.revocation_retention_secs,
    ));

    let auth_service = Arc::new(AuthService::new(
        directory,
        codec,
        revocations.clone(),
        &config,
    ));

    // The sweeper lives outside the request path; the watch channel
    // stops it between iterations at shutdown
    let (sweeper_shutdown_tx, sweeper_shutdown_rx) = watch::channel(false);
    let sweeper = revocation::spawn_sweeper(
        revocations.clone(),
        config.security.sweep_interval_secs,
        sweeper_shutdown_rx,
    );

    let app_state = Arc::new(AppState {
        config: config.clone(),
        auth_service,
        revocations,
    });

    let app = routes::create_router(app_state);

    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = sweeper_shutdown_tx.send(true);
    if let Err(e) = sweeper.await {
        tracing::warn!("Revocation sweeper did not stop cleanly: {}", e);
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handling
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }
}

fn print_help() {
    println!("specimen-registry {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: specimen-registry [options]");
    println!();
    println!("Options:");
    println!("  --version     Print version information and exit");
    println!("  --help        Print this help and exit");
    println!();
    println!("Configuration:");
    println!("  All settings come from REGISTRY_-prefixed environment variables,");
    println!("  see .env.example for the available options");
}
