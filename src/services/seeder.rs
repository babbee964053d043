use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::Argon2;
use chrono::{Duration, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use sqlx::PgPool;
use tracing::info;

use crate::db;
use crate::errors::AppError;
use crate::models::{AssetSpec, NewHolding, NewUser, NewsDraft, PricePoint, SeededAsset, Sentiment};
use crate::services::news_gen;
use crate::services::price_sim::{simulate_prices, GbmParams};

pub const STOCK_CATALOG: [AssetSpec; 10] = [
    AssetSpec { ticker: "AAPL", name: "Apple Inc.", asset_type: "stock", source: "Yahoo Finance" },
    AssetSpec { ticker: "MSFT", name: "Microsoft Corporation", asset_type: "stock", source: "Yahoo Finance" },
    AssetSpec { ticker: "GOOGL", name: "Alphabet Inc.", asset_type: "stock", source: "Yahoo Finance" },
    AssetSpec { ticker: "AMZN", name: "Amazon.com Inc.", asset_type: "stock", source: "Yahoo Finance" },
    AssetSpec { ticker: "META", name: "Meta Platforms Inc.", asset_type: "stock", source: "Yahoo Finance" },
    AssetSpec { ticker: "TSLA", name: "Tesla Inc.", asset_type: "stock", source: "Yahoo Finance" },
    AssetSpec { ticker: "NVDA", name: "NVIDIA Corporation", asset_type: "stock", source: "Yahoo Finance" },
    AssetSpec { ticker: "JPM", name: "JPMorgan Chase & Co.", asset_type: "stock", source: "Yahoo Finance" },
    AssetSpec { ticker: "V", name: "Visa Inc.", asset_type: "stock", source: "Yahoo Finance" },
    AssetSpec { ticker: "JNJ", name: "Johnson & Johnson", asset_type: "stock", source: "Yahoo Finance" },
];

const DEMO_USERS: usize = 5;
const NEWS_ARTICLES: usize = 50;
const PRICE_HISTORY_DAYS: i64 = 365 * 5;

// Daily drift and volatility, roughly a 5% annual return at 16% annual vol.
const DAILY_DRIFT: f64 = 0.0002;
const DAILY_VOLATILITY: f64 = 0.01;

/// Runs every population step in order. Each step commits before the next
/// one starts; the first failure aborts the run and leaves earlier steps in
/// place.
pub async fn run(pool: &PgPool) -> Result<(), AppError> {
    let mut rng = StdRng::from_os_rng();

    info!("Creating users...");
    let user_ids = seed_users(pool).await?;

    info!("Creating assets...");
    let assets = seed_assets(pool).await?;

    info!("Creating price history...");
    seed_price_history(pool, &mut rng, &assets).await?;

    info!("Creating portfolios...");
    let portfolio_ids = seed_portfolios(pool, &mut rng, &user_ids).await?;

    info!("Creating portfolio holdings...");
    seed_holdings(pool, &mut rng, &portfolio_ids, &assets).await?;

    info!("Creating news articles...");
    let news_ids = seed_news(pool, &mut rng, &assets).await?;

    info!("Creating news asset tags...");
    seed_news_tags(pool, &mut rng, &news_ids, &assets).await?;

    info!("Creating news interactions...");
    seed_news_interactions(pool, &mut rng, &news_ids, &user_ids).await?;

    info!("✅ Database populated with demo data");
    Ok(())
}

async fn seed_users(pool: &PgPool) -> Result<Vec<i32>, AppError> {
    let mut user_ids = Vec::with_capacity(DEMO_USERS);
    for i in 1..=DEMO_USERS {
        let username = format!("user{i}");
        let user = NewUser {
            email: format!("{username}@example.com"),
            password_hash: hash_password(&format!("password{i}"))?,
            username,
        };
        user_ids.push(db::user_queries::upsert(pool, &user).await?);
    }
    Ok(user_ids)
}

async fn seed_assets(pool: &PgPool) -> Result<Vec<SeededAsset>, AppError> {
    let mut assets = Vec::with_capacity(STOCK_CATALOG.len());
    for spec in &STOCK_CATALOG {
        assets.push(db::asset_queries::upsert(pool, spec).await?);
    }
    Ok(assets)
}

async fn seed_price_history(
    pool: &PgPool,
    rng: &mut StdRng,
    assets: &[SeededAsset],
) -> Result<(), AppError> {
    let end = Utc::now().naive_utc();
    let start = end - Duration::days(PRICE_HISTORY_DAYS);

    let mut rows = Vec::with_capacity(assets.len() * PRICE_HISTORY_DAYS as usize);
    for asset in assets {
        let params = GbmParams {
            start_price: rng.random_range(10.0..1000.0),
            drift: DAILY_DRIFT,
            volatility: DAILY_VOLATILITY,
            horizon: PRICE_HISTORY_DAYS as f64,
            step: 1.0,
        };
        let prices = simulate_prices(&params, rng)?;
        rows.extend(build_price_rows(asset.id, start, &prices));
    }

    db::price_queries::upsert_history(pool, &rows).await?;
    Ok(())
}

/// Turns a simulated price series into daily rows starting at `start`.
/// Row order follows series order; the bulk upsert relies on that for its
/// last-in-batch-wins conflict resolution.
pub fn build_price_rows(asset_id: i32, start: NaiveDateTime, prices: &[f64]) -> Vec<PricePoint> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint {
            asset_id,
            timestamp: start + Duration::days(i as i64),
            price,
        })
        .collect()
}

async fn seed_portfolios(
    pool: &PgPool,
    rng: &mut StdRng,
    user_ids: &[i32],
) -> Result<Vec<i32>, AppError> {
    let mut portfolio_ids = Vec::new();
    for &user_id in user_ids {
        let count = rng.random_range(1..=3);
        for i in 1..=count {
            let name = format!("Portfolio {i}");
            portfolio_ids.push(db::portfolio_queries::insert(pool, user_id, &name).await?);
        }
    }
    Ok(portfolio_ids)
}

async fn seed_holdings(
    pool: &PgPool,
    rng: &mut StdRng,
    portfolio_ids: &[i32],
    assets: &[SeededAsset],
) -> Result<(), AppError> {
    for &portfolio_id in portfolio_ids {
        let count = rng.random_range(3..=7.min(assets.len()));
        let picks: Vec<SeededAsset> = assets.choose_multiple(rng, count).cloned().collect();
        for asset in picks {
            let holding = NewHolding {
                portfolio_id,
                asset_id: asset.id,
                ticker: asset.ticker,
                quantity: rng.random_range(1..=100),
                purchase_price: rng.random_range(50.0..500.0),
            };
            db::portfolio_queries::upsert_holding(pool, &holding).await?;
        }
    }
    Ok(())
}

async fn seed_news(
    pool: &PgPool,
    rng: &mut StdRng,
    assets: &[SeededAsset],
) -> Result<Vec<i32>, AppError> {
    let now = Utc::now().naive_utc();
    let mut news_ids = Vec::with_capacity(NEWS_ARTICLES);
    for _ in 0..NEWS_ARTICLES {
        let asset = &assets[rng.random_range(0..assets.len())];
        let draft: NewsDraft = news_gen::generate_article(rng, &asset.ticker, &asset.name, now);
        news_ids.push(db::news_queries::insert(pool, &draft).await?);
    }
    Ok(news_ids)
}

async fn seed_news_tags(
    pool: &PgPool,
    rng: &mut StdRng,
    news_ids: &[i32],
    assets: &[SeededAsset],
) -> Result<(), AppError> {
    for &news_id in news_ids {
        let count = rng.random_range(1..=3.min(assets.len()));
        let picks: Vec<SeededAsset> = assets.choose_multiple(rng, count).cloned().collect();
        for asset in picks {
            db::news_queries::upsert_tag(pool, news_id, asset.id, &asset.ticker).await?;
        }
    }
    Ok(())
}

async fn seed_news_interactions(
    pool: &PgPool,
    rng: &mut StdRng,
    news_ids: &[i32],
    user_ids: &[i32],
) -> Result<(), AppError> {
    for &news_id in news_ids {
        let count = rng.random_range(1..=3.min(user_ids.len()));
        let picks: Vec<i32> = user_ids.choose_multiple(rng, count).copied().collect();
        for user_id in picks {
            let sentiment: Sentiment = *Sentiment::ALL
                .choose(rng)
                .unwrap_or(&Sentiment::Neutral);
            let comment = format!("Sample comment from user {user_id} about news {news_id}");
            db::news_queries::upsert_interaction(pool, news_id, user_id, sentiment, &comment)
                .await?;
        }
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn price_rows_are_daily_and_in_series_order() {
        let prices = [100.0, 101.5, 99.25];
        let rows = build_price_rows(7, midnight(), &prices);
        assert_eq!(rows.len(), 3);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.asset_id, 7);
            assert_eq!(row.timestamp, midnight() + Duration::days(i as i64));
            assert_eq!(row.price, prices[i]);
        }
    }

    #[test]
    fn duplicate_dates_keep_batch_order() {
        // Two batches for the same asset and day: concatenated rows preserve
        // submission order, so the upsert leaves the later price behind.
        let mut rows = build_price_rows(1, midnight(), &[100.0]);
        rows.extend(build_price_rows(1, midnight(), &[105.0]));
        assert_eq!(rows[0].timestamp, rows[1].timestamp);
        assert_eq!(rows.last().unwrap().price, 105.0);
    }

    #[test]
    fn hashed_passwords_are_argon2_and_salted() {
        let a = hash_password("password1").unwrap();
        let b = hash_password("password1").unwrap();
        assert!(a.starts_with("$argon2"));
        assert_ne!(a, b, "salts must differ between hashes");
    }

    #[test]
    fn catalog_tickers_are_unique() {
        let mut tickers: Vec<&str> = STOCK_CATALOG.iter().map(|s| s.ticker).collect();
        tickers.sort_unstable();
        tickers.dedup();
        assert_eq!(tickers.len(), STOCK_CATALOG.len());
    }
}
