use sqlx::PgPool;

use crate::models::NewUser;

/// Insert a user, skipping the insert if the username is already taken.
/// Returns the user id either way.
pub async fn upsert(pool: &PgPool, user: &NewUser) -> Result<i32, sqlx::Error> {
    let inserted = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO users (username, password, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (username) DO NOTHING
        RETURNING userid
        "#,
    )
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.email)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(id) => Ok(id),
        // Conflict path: the user already exists, look its id up.
        None => {
            sqlx::query_scalar::<_, i32>("SELECT userid FROM users WHERE username = $1")
                .bind(&user.username)
                .fetch_one(pool)
                .await
        }
    }
}
