pub mod memory_kv_store;
pub mod sqlite_kv_store;

pub use memory_kv_store::InMemoryKeyValueStore;
pub use sqlite_kv_store::SqliteKeyValueStore;
