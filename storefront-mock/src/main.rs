use std::sync::Arc;
use storefront_mock::{AppState, MockConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_mock=info,tower_http=info".into()),
        )
        .init();

    let config = MockConfig::from_env();
    let state = if config.seed_demo {
        AppState::with_demo_data()
    } else {
        AppState::new(storefront_mock::state::DEMO_CSRF_TOKEN)
    };

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("storefront-mock listening on {addr}");

    storefront_mock::serve(listener, Arc::new(state)).await?;
    Ok(())
}
