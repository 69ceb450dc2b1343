use super::SessionStore;
use crate::error::Result;
use async_trait::async_trait;
use log::info;
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqlitePool, SqlitePoolOptions},
    Row, Sqlite,
};

const TOKEN_KEY: &str = "admin_token";

/// Session token persisted in a local SQLite file so it survives restarts.
pub struct SqliteSession {
    pool: SqlitePool,
}

impl SqliteSession {
    pub async fn connect(db_url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            info!("Creating session database at {}", db_url);
            Sqlite::create_database(db_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(db_url)
            .await?;

        Self::init_schema(&pool).await?;

        Ok(Self { pool })
    }

    async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SessionStore for SqliteSession {
    async fn token(&self) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM session WHERE key = ?")
            .bind(TOKEN_KEY)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| row.get::<String, _>("value")))
    }

    async fn set_token(&self, token: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO session (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key)
            DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(TOKEN_KEY)
        .bind(token)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear_token(&self) -> Result<()> {
        sqlx::query("DELETE FROM session WHERE key = ?")
            .bind(TOKEN_KEY)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("session.db").display());

        let session = SqliteSession::connect(&url).await.unwrap();
        assert_eq!(session.token().await.unwrap(), None);
        session.set_token("first").await.unwrap();
        session.set_token("second").await.unwrap();
        drop(session);

        let reopened = SqliteSession::connect(&url).await.unwrap();
        assert_eq!(reopened.token().await.unwrap().as_deref(), Some("second"));
        reopened.clear_token().await.unwrap();
        assert_eq!(reopened.token().await.unwrap(), None);
    }
}
