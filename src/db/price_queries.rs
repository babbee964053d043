use sqlx::PgPool;
use tracing::error;

use crate::models::PricePoint;

/// Bulk-upsert a batch of price history rows inside one transaction.
///
/// Rows execute in batch order, so when the batch carries duplicate
/// (asset_id, timestamp) keys the last one wins. Any failure rolls back the
/// whole batch; nothing is partially committed.
pub async fn upsert_history(pool: &PgPool, points: &[PricePoint]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await.map_err(|e| {
        error!("Failed to begin price history transaction: {}", e);
        e
    })?;

    for (i, p) in points.iter().enumerate() {
        if let Err(e) = sqlx::query(
            r#"
            INSERT INTO pricehistory (assetid, timestamp, price)
            VALUES ($1, $2, $3)
            ON CONFLICT (assetid, timestamp)
            DO UPDATE SET price = EXCLUDED.price
            "#,
        )
        .bind(p.asset_id)
        .bind(p.timestamp)
        .bind(p.price)
        .execute(&mut *tx)
        .await
        {
            error!(
                "Failed to upsert price point {} (asset: {}, timestamp: {}, price: {}): {}",
                i, p.asset_id, p.timestamp, p.price, e
            );
            return Err(e);
        }
    }

    tx.commit().await.map_err(|e| {
        error!("Failed to commit price history transaction: {}", e);
        e
    })?;
    Ok(())
}
