#![doc = include_str!("../README.md")]

mod server;

use barcode_range::{RangeGenerator, ThreadRandom};
use clap::Parser;
use server::config::{CliArgs, ServerConfig};
use server::credentials::CredentialStore;
use server::service::handler::{BarcodeService, router};
use server::telemetry::{TelemetryProviders, init_telemetry};
use tokio::net::TcpListener;
use tokio::signal;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    let providers = init_telemetry(config.log_json)?;

    let credentials = CredentialStore::from_env();
    if credentials.is_empty() {
        tracing::error!(
            "No CLIENT_ID_<n>/CLIENT_SECRET_<n> pairs configured; authenticated requests will fail"
        );
    } else {
        let client_ids: Vec<&str> = credentials
            .pairs()
            .iter()
            .map(|pair| pair.id.as_str())
            .collect();
        tracing::info!(
            pairs = credentials.len(),
            ?client_ids,
            "Loaded client credentials"
        );
    }

    let service = BarcodeService::new(credentials, RangeGenerator::new(ThreadRandom));
    let app = router(service, config.max_body_bytes);

    let listener = TcpListener::bind(&config.server_addr).await?;
    log_startup_info(&config);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(providers))
        .await?;

    tracing::info!("Service shut down successfully");
    Ok(())
}

fn log_startup_info(config: &ServerConfig) {
    if cfg!(debug_assertions) {
        tracing::info!(
            "Starting barcode range service on {} with full config: {:#?}",
            config.server_addr,
            config
        );
    } else {
        tracing::info!("Starting barcode range service on {}", config.server_addr);
    }
}

async fn shutdown_signal(providers: TelemetryProviders) {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Shutdown signal received, terminating gracefully...");

    providers.shutdown();
}
