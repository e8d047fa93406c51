pub mod ask;
pub mod history;
pub mod onboard;
pub mod progress;
pub mod semester;

use std::sync::Arc;

use advisor_config::AppConfig;
use advisor_core::TurnStore;
use advisor_memory::{FileTurnStore, InMemoryTurnStore, SqliteTurnStore};

/// Builds the turn store named by `memory.backend`.
pub(crate) async fn turn_store(
    config: &AppConfig,
) -> Result<Arc<dyn TurnStore>, Box<dyn std::error::Error>> {
    match config.memory.backend.as_str() {
        "in_memory" => Ok(Arc::new(InMemoryTurnStore::new())),
        "sqlite" => {
            tokio::fs::create_dir_all(&config.memory.dir).await?;
            let path = config.memory.dir.join("turns.db");
            let store = SqliteTurnStore::open(&path.to_string_lossy()).await?;
            Ok(Arc::new(store))
        }
        _ => Ok(Arc::new(FileTurnStore::new(&config.memory.dir))),
    }
}
