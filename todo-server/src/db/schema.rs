//! Idempotent schema bootstrap for the `todos` table
//!
//! Only creates what is missing. There is no versioning; schema changes are
//! applied out of band.

use sqlx::PgPool;

/// Create the `todos` table and its index if they do not exist
pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring todos schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL CHECK (title <> ''),
            description TEXT NOT NULL DEFAULT '',
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_created ON todos(created_at DESC)")
        .execute(pool)
        .await?;

    tracing::info!("Todos schema ready");
    Ok(())
}
