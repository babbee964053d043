use sqlx::postgres::PgPoolOptions;

use vantage_tools::config::DbConfig;
use vantage_tools::logging::{init_logging, LoggingConfig};
use vantage_tools::services::seeder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging(&LoggingConfig::from_env());

    let db = DbConfig::from_env();
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db.database_url)
        .await?;

    if let Err(e) = seeder::run(&pool).await {
        tracing::error!("❌ Seeding failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
