/// Connection settings for the PortfolioVantage database.
///
/// `DATABASE_URL` takes precedence; otherwise the URL is assembled from the
/// individual `DB_*` variables with local-development defaults.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
}

impl DbConfig {
    pub fn from_env() -> Self {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            return Self { database_url: url };
        }

        let name = std::env::var("DB_NAME").unwrap_or_else(|_| "portfoliovantage".to_string());
        let user = std::env::var("DB_USER")
            .or_else(|_| std::env::var("USER"))
            .unwrap_or_else(|_| "postgres".to_string());
        let password = std::env::var("DB_PASSWORD").unwrap_or_default();
        let host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());

        let database_url = if password.is_empty() {
            format!("postgres://{user}@{host}:{port}/{name}")
        } else {
            format!("postgres://{user}:{password}@{host}:{port}/{name}")
        };

        Self { database_url }
    }
}

/// Settings for the API smoke tester.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
        }
    }
}
