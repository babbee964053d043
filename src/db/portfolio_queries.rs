use sqlx::PgPool;

use crate::models::NewHolding;

pub async fn insert(pool: &PgPool, user_id: i32, name: &str) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO portfolios (userid, portfolioname)
        VALUES ($1, $2)
        RETURNING portfolioid
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await
}

/// Upsert a holding keyed (portfolio_id, asset_id); re-seeding refreshes the
/// quantity and purchase price instead of duplicating the row.
pub async fn upsert_holding(pool: &PgPool, holding: &NewHolding) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO portfolioassets (portfolioid, assetid, ticker, quantity, averagepurchaseprice)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (portfolioid, assetid) DO UPDATE
        SET quantity = EXCLUDED.quantity,
            averagepurchaseprice = EXCLUDED.averagepurchaseprice
        "#,
    )
    .bind(holding.portfolio_id)
    .bind(holding.asset_id)
    .bind(&holding.ticker)
    .bind(holding.quantity)
    .bind(holding.purchase_price)
    .execute(pool)
    .await?;
    Ok(())
}
