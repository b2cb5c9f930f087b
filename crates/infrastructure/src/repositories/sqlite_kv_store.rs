use async_trait::async_trait;
use ledger_dns_application::ports::KeyValueStore;
use ledger_dns_domain::DomainError;
use sqlx::SqlitePool;
use tracing::{error, instrument};

pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let row = sqlx::query_as::<_, (String,)>("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to read key");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(|(value,)| value))
    }

    #[instrument(skip(self, value))]
    async fn put(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to write key");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}
