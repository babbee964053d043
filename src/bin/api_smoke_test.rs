use vantage_tools::checker::{run_all, ApiClient, Session};
use vantage_tools::config::ApiConfig;
use vantage_tools::logging::{init_logging, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging(&LoggingConfig::from_env());

    let config = ApiConfig::from_env();
    tracing::info!("🚀 Running API checks against {}", config.base_url);

    let client = ApiClient::new(&config);
    let mut session = Session::new();

    if let Err(e) = run_all(&client, &mut session).await {
        tracing::error!("❌ Smoke test failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
