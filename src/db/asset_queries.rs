use sqlx::PgPool;

use crate::models::{AssetSpec, SeededAsset};

/// Upsert a catalog asset keyed on ticker. A conflicting row has its display
/// name refreshed, so the returned id is always present.
pub async fn upsert(pool: &PgPool, spec: &AssetSpec) -> Result<SeededAsset, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO assets (ticker, assetname, assettype, source)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (ticker) DO UPDATE
        SET assetname = EXCLUDED.assetname
        RETURNING assetid
        "#,
    )
    .bind(spec.ticker)
    .bind(spec.name)
    .bind(spec.asset_type)
    .bind(spec.source)
    .fetch_one(pool)
    .await?;

    Ok(SeededAsset {
        id,
        ticker: spec.ticker.to_string(),
        name: spec.name.to_string(),
    })
}
