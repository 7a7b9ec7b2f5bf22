use anyhow::Result;
use bookstore_storefront::{config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bookstore_storefront=info".parse()?),
        )
        .init();

    info!("Starting bookstore storefront");

    // Load configuration from environment
    let config = config::Config::from_env()?;

    // Dictionaries are loaded and checked before the server accepts requests
    let state = server::AppState::from_config(&config)?;
    let locales: Vec<_> = state.resolver.locales().codes().collect();
    info!(
        "Serving locales {:?} (default '{}')",
        locales,
        state.resolver.locales().default_config().code
    );

    server::serve(&config, state).await
}
