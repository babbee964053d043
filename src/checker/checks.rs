use chrono::{Duration, Utc};
use reqwest::Response;
use serde_json::{json, Value};
use tracing::info;

use crate::checker::ApiClient;
use crate::errors::AppError;

/// Session state threaded through the check sequence. The token and
/// portfolio id are captured by early checks and consumed by later ones;
/// nothing lives in ambient client state.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub password: String,
    pub email: String,
    pub token: Option<String>,
    pub portfolio_id: Option<i64>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            username: "testuser".to_string(),
            password: "testpass123".to_string(),
            email: "test@example.com".to_string(),
            token: None,
            portfolio_id: None,
        }
    }

    fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn portfolio_id(&self) -> Result<i64, AppError> {
        self.portfolio_id
            .ok_or_else(|| AppError::Api("no portfolio id captured by an earlier check".into()))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs every check in order. The first failure propagates immediately;
/// remaining checks are skipped and already-performed side effects stay
/// (the final check deletes the portfolio it created, nothing else is
/// cleaned up).
pub async fn run_all(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    info!("=== Authentication checks ===");
    check_register(client, session).await?;
    check_login(client, session).await?;

    info!("=== Portfolio checks ===");
    check_create_portfolio(client, session).await?;
    check_list_portfolios(client, session).await?;
    check_portfolio_value(client, session).await?;
    check_portfolio_performance(client, session).await?;

    info!("=== Asset checks ===");
    check_available_assets(client, session).await?;
    check_add_asset(client, session).await?;
    check_portfolio_assets(client, session).await?;
    check_remove_asset(client, session).await?;

    info!("=== News checks ===");
    check_news_list(client, session).await?;
    check_news_interaction(client, session).await?;

    info!("=== Profile checks ===");
    check_update_profile(client, session).await?;
    check_change_password(client, session).await?;

    info!("=== Simulation check ===");
    check_simulate_investment(client, session).await?;

    info!("=== Cleanup ===");
    check_delete_portfolio(client, session).await?;

    info!("✅ All checks passed");
    Ok(())
}

async fn check_register(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let body = json!({
        "username": session.username,
        "password": session.password,
        "email": session.email,
    });
    let resp = client.post("auth/register/", None, &body).await?;
    expect_ok(resp, "registration").await?;
    info!("✓ Registration successful");
    Ok(())
}

async fn check_login(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let body = json!({
        "username": session.username,
        "password": session.password,
    });
    let resp = client.post("auth/login/", None, &body).await?;
    let body = expect_ok(resp, "login").await?;
    let token = require_key(&body, "token")?
        .as_str()
        .ok_or_else(|| AppError::Api("token is not a string".into()))?
        .to_string();
    session.token = Some(token);
    info!("✓ Login successful");
    Ok(())
}

async fn check_create_portfolio(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let body = json!({ "portfolio_name": "Test Portfolio" });
    let resp = client.post("portfolios/", session.bearer(), &body).await?;
    let body = expect_ok(resp, "portfolio creation").await?;
    let id = require_key(&body, "portfolio_id")?
        .as_i64()
        .ok_or_else(|| AppError::Api("portfolio_id is not an integer".into()))?;
    session.portfolio_id = Some(id);
    info!("✓ Portfolio created");
    Ok(())
}

async fn check_list_portfolios(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let resp = client.get("portfolios/", session.bearer()).await?;
    let body = expect_ok(resp, "portfolio listing").await?;
    if !body.is_array() {
        return Err(AppError::Api("expected a JSON array of portfolios".into()));
    }
    info!("✓ Portfolios listed");
    Ok(())
}

async fn check_portfolio_value(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let path = format!("portfolios/{}/value/", session.portfolio_id()?);
    let resp = client.get(&path, session.bearer()).await?;
    let body = expect_ok(resp, "portfolio valuation").await?;
    require_key(&body, "total_value")?;
    info!("✓ Portfolio value retrieved");
    Ok(())
}

async fn check_portfolio_performance(
    client: &ApiClient,
    session: &mut Session,
) -> Result<(), AppError> {
    let path = format!("portfolios/{}/performance/", session.portfolio_id()?);
    let resp = client.get(&path, session.bearer()).await?;
    let body = expect_ok(resp, "portfolio performance").await?;
    require_key(&body, "performance_data")?;
    info!("✓ Portfolio performance retrieved");
    Ok(())
}

async fn check_available_assets(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let resp = client.get("assets/", session.bearer()).await?;
    let body = expect_ok(resp, "asset listing").await?;
    require_key(&body, "assets")?;
    info!("✓ Available assets retrieved");
    Ok(())
}

async fn check_add_asset(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let body = json!({
        "ticker": "AAPL",
        "quantity": 10,
        "purchase_price": 150.00,
    });
    let path = format!("portfolios/{}/assets/", session.portfolio_id()?);
    let resp = client.post(&path, session.bearer(), &body).await?;
    expect_ok(resp, "adding an asset").await?;
    info!("✓ Asset added to portfolio");
    Ok(())
}

async fn check_portfolio_assets(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let path = format!("portfolios/{}/assets/", session.portfolio_id()?);
    let resp = client.get(&path, session.bearer()).await?;
    let body = expect_ok(resp, "portfolio asset listing").await?;
    require_key(&body, "assets")?;
    info!("✓ Portfolio assets retrieved");
    Ok(())
}

async fn check_remove_asset(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let path = format!("portfolios/{}/assets/AAPL/", session.portfolio_id()?);
    let resp = client.delete(&path, session.bearer()).await?;
    expect_ok(resp, "removing an asset").await?;
    info!("✓ Asset removed from portfolio");
    Ok(())
}

async fn check_news_list(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let resp = client.get("news/", session.bearer()).await?;
    let body = expect_ok(resp, "news listing").await?;
    require_key(&body, "news")?;
    info!("✓ News retrieved");
    Ok(())
}

async fn check_news_interaction(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    // Re-fetch the list so the interaction targets a real article id.
    let resp = client.get("news/", session.bearer()).await?;
    let body = expect_ok(resp, "news listing").await?;
    let news_id = require_key(&body, "news")?
        .get(0)
        .and_then(|article| article.get("id"))
        .and_then(Value::as_i64)
        .ok_or_else(|| AppError::Api("news list has no article with an id".into()))?;

    let body = json!({
        "sentiment": "Positive",
        "comment": "Test comment",
    });
    let path = format!("news/{news_id}/interact/");
    let resp = client.post(&path, session.bearer(), &body).await?;
    expect_ok(resp, "news interaction").await?;
    info!("✓ News interaction recorded");
    Ok(())
}

async fn check_update_profile(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let body = json!({ "email": "updated@example.com" });
    let resp = client.put("auth/profile/", session.bearer(), &body).await?;
    expect_ok(resp, "profile update").await?;
    info!("✓ Profile updated");
    Ok(())
}

async fn check_change_password(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let new_password = "newpass123";
    let body = json!({
        "current_password": session.password,
        "new_password": new_password,
    });
    let resp = client
        .post("auth/change-password/", session.bearer(), &body)
        .await?;
    expect_ok(resp, "password change").await?;
    session.password = new_password.to_string();
    info!("✓ Password changed");
    Ok(())
}

async fn check_simulate_investment(
    client: &ApiClient,
    session: &mut Session,
) -> Result<(), AppError> {
    let start_date = (Utc::now() - Duration::days(30)).format("%Y-%m-%d").to_string();
    let body = json!({
        "start_date": start_date,
        "asset_allocation": { "AAPL": 50, "GOOGL": 50 },
        "monthly_budget": 1000,
    });
    let resp = client
        .post("simulate-investment/", session.bearer(), &body)
        .await?;
    let body = expect_ok(resp, "investment simulation").await?;
    require_key(&body, "simulation_data")?;
    info!("✓ Investment simulation succeeded");
    Ok(())
}

async fn check_delete_portfolio(client: &ApiClient, session: &mut Session) -> Result<(), AppError> {
    let path = format!("portfolios/{}/", session.portfolio_id()?);
    let resp = client.delete(&path, session.bearer()).await?;
    expect_ok(resp, "portfolio deletion").await?;
    session.portfolio_id = None;
    info!("✓ Portfolio deleted");
    Ok(())
}

/// Asserts a 200 response and parses the body as JSON. On any other status
/// the body text is folded into the error so the failing check names both
/// the operation and what the server said.
async fn expect_ok(resp: Response, what: &str) -> Result<Value, AppError> {
    let status = resp.status();
    if status != reqwest::StatusCode::OK {
        let text = resp.text().await.unwrap_or_default();
        return Err(AppError::Api(format!("{what} failed with {status}: {text}")));
    }
    let body = resp.json::<Value>().await?;
    Ok(body)
}

fn require_key<'a>(body: &'a Value, key: &str) -> Result<&'a Value, AppError> {
    body.get(key)
        .ok_or_else(|| AppError::Api(format!("response missing key '{key}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_key_returns_present_value() {
        let body = json!({ "token": "abc123" });
        let value = require_key(&body, "token").unwrap();
        assert_eq!(value.as_str(), Some("abc123"));
    }

    #[test]
    fn require_key_names_the_missing_key() {
        let body = json!({ "other": 1 });
        let err = require_key(&body, "total_value").unwrap_err();
        assert!(err.to_string().contains("total_value"));
    }

    #[test]
    fn fresh_session_has_no_captured_state() {
        let session = Session::new();
        assert!(session.token.is_none());
        assert!(session.portfolio_id.is_none());
        assert!(session.portfolio_id().is_err());
    }
}
