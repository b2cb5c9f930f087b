use ledger_dns_application::ports::KeyValueStore;
use ledger_dns_domain::config::DatabaseConfig;
use ledger_dns_infrastructure::database::create_pool;
use ledger_dns_infrastructure::repositories::{InMemoryKeyValueStore, SqliteKeyValueStore};
use std::sync::Arc;
use tracing::{error, info};

pub async fn init_store(cfg: &DatabaseConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    if cfg.is_in_memory() {
        info!("Using in-memory record index; nothing survives a restart");
        return Ok(Arc::new(InMemoryKeyValueStore::new()));
    }

    let database_url = format!("sqlite:{}", cfg.path);
    info!("Initializing database: {}", database_url);

    let pool = create_pool(&database_url, cfg).await.map_err(|e| {
        error!("Failed to initialize database: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        max_connections = cfg.max_connections,
        "Database initialized successfully"
    );

    Ok(Arc::new(SqliteKeyValueStore::new(pool)))
}
