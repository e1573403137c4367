use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payment_gateway::application::service::PaymentService;
use payment_gateway::config::GatewayConfig;
use payment_gateway::domain::ports::PaymentRepositoryBox;
use payment_gateway::domain::validation::PaymentValidator;
use payment_gateway::infrastructure::bank_client::HttpBankClient;
use payment_gateway::infrastructure::in_memory::InMemoryPaymentRepository;
#[cfg(feature = "storage-rocksdb")]
use payment_gateway::infrastructure::rocksdb::RocksDBPaymentRepository;
use payment_gateway::interfaces::http::{self, AppState};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GatewayConfig::parse();

    let repository = open_repository(&config).into_diagnostic()?;
    let currencies = config.supported_currencies().into_diagnostic()?;
    let validator = PaymentValidator::new(currencies);
    let bank =
        HttpBankClient::new(&config.bank_url, config.bank_timeout()).into_diagnostic()?;
    info!(
        bank = %bank.endpoint(),
        timeout_secs = config.bank_timeout_secs,
        currencies = %validator.currencies().describe(),
        "acquiring bank configured"
    );

    let service = PaymentService::new(Box::new(bank), repository);
    let state = AppState::new(service, validator, config.request_timeout());

    let listener = TcpListener::bind(config.listen).await.into_diagnostic()?;
    info!(addr = %config.listen, "payment gateway listening");

    http::serve(listener, state, shutdown_signal())
        .await
        .into_diagnostic()?;

    info!("payment gateway stopped");
    Ok(())
}

fn open_repository(
    config: &GatewayConfig,
) -> payment_gateway::error::Result<PaymentRepositoryBox> {
    match &config.db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(db_path) => {
            let store = RocksDBPaymentRepository::open(db_path)
                .map_err(payment_gateway::error::PaymentError::StoreUnavailable)?;
            info!(path = %db_path.display(), "using RocksDB payment store");
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "persistent storage requested via --db-path, but the 'storage-rocksdb' feature is not enabled; falling back to in-memory storage"
            );
            Ok(Box::new(InMemoryPaymentRepository::new()))
        }
        None => {
            info!("using in-memory payment store");
            Ok(Box::new(InMemoryPaymentRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
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
                error!(error = %e, "failed to listen for SIGTERM");
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

    info!("sigterm/interrupt signal received, shutting down");
}
