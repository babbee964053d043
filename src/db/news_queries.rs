use sqlx::PgPool;

use crate::models::{NewsDraft, Sentiment};

pub async fn insert(pool: &PgPool, draft: &NewsDraft) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO news (category, title, content, source, author, publishedat)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING newsid
        "#,
    )
    .bind(&draft.category)
    .bind(&draft.title)
    .bind(&draft.content)
    .bind(&draft.source)
    .bind(&draft.author)
    .bind(draft.published_at)
    .fetch_one(pool)
    .await
}

/// Tag a news article with an asset; a repeated (news, asset) pair is a no-op.
pub async fn upsert_tag(
    pool: &PgPool,
    news_id: i32,
    asset_id: i32,
    ticker: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO newsassettags (newsid, assetid, ticker)
        VALUES ($1, $2, $3)
        ON CONFLICT (newsid, assetid) DO NOTHING
        "#,
    )
    .bind(news_id)
    .bind(asset_id)
    .bind(ticker)
    .execute(pool)
    .await?;
    Ok(())
}

/// Record a user's reaction to an article; one interaction per (news, user).
pub async fn upsert_interaction(
    pool: &PgPool,
    news_id: i32,
    user_id: i32,
    sentiment: Sentiment,
    comment: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO newsinteractions (newsid, userid, sentiment, comment)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (newsid, userid) DO NOTHING
        "#,
    )
    .bind(news_id)
    .bind(user_id)
    .bind(sentiment.as_str())
    .bind(comment)
    .execute(pool)
    .await?;
    Ok(())
}
