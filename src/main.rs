use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utxo_explorer::config::{Config, DatasetSource};
use utxo_explorer::server;
use utxo_explorer::services::dataset::Dataset;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "utxo_explorer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting UTXO explorer on {}", config.address());
    match &config.dataset {
        DatasetSource::Remote(url) => tracing::info!(url = %url, "Dataset source"),
        DatasetSource::File(path) => tracing::info!(path = %path.display(), "Dataset source"),
    }

    let (host, port) = (config.host.clone(), config.port);
    let (state, app) = server::build_app(config, Arc::new(Dataset::new()));
    server::start_dataset_load(&state);

    let (port, handle) = server::serve(app, &host, port)
        .await
        .expect("Failed to bind address");
    tracing::info!("Listening on http://{}:{}", host, port);

    handle.await.expect("Server task panicked");
}
