//! Server entry point

use auberge::api;
use auberge::config::AppConfig;
use auberge::store::Store;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auberge=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();

    let store = match Store::connect(&config).await {
        Ok(store) => {
            tracing::info!("MongoDB connecté");
            store
        }
        Err(e) => {
            tracing::error!("Erreur MongoDB: {e}");
            std::process::exit(1);
        }
    };

    let app = api::build_router(store);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Impossible d'écouter sur {addr}: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Serveur sur http://localhost:{}", config.port);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Erreur serveur: {e}");
        std::process::exit(1);
    }
}
