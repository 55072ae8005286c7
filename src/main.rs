use imweb_proxy::{server, ProxyConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env before the subscriber so RUST_LOG from the file applies
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let config = match ProxyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port(),
        site_code = config.site_code().as_ref(),
        scopes = %config.scopes(),
        oauth_base = %config.endpoints().oauth_base(),
        api_base = %config.endpoints().api_base(),
        "configuration loaded"
    );

    if let Err(e) = server::serve(config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
