use serde::{Deserialize, Serialize};

pub const IN_MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite file holding the record index and sync cursor.
    /// `:memory:` keeps everything in process memory.
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_secs: default_busy_timeout_secs(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_path() -> String {
    "./ledger-dns.db".to_string()
}

fn default_busy_timeout_secs() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    4
}
