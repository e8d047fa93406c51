//! Process-local turn store, used in tests and ephemeral sessions.

use std::collections::HashMap;

use advisor_core::{ConversationTurn, MemoryError, TurnStore};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryTurnStore {
    histories: RwLock<HashMap<String, Vec<ConversationTurn>>>,
}

impl InMemoryTurnStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TurnStore for InMemoryTurnStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn load(&self, student_id: &str) -> Result<Vec<ConversationTurn>, MemoryError> {
        Ok(self
            .histories
            .read()
            .await
            .get(student_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, student_id: &str, turns: &[ConversationTurn]) -> Result<(), MemoryError> {
        self.histories
            .write()
            .await
            .insert(student_id.to_string(), turns.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::Intent;

    #[tokio::test]
    async fn histories_are_isolated_per_student() {
        let store = InMemoryTurnStore::new();
        store
            .save("a", &[ConversationTurn::new("q", "a", Intent::General)])
            .await
            .unwrap();
        assert_eq!(store.load("a").await.unwrap().len(), 1);
        assert!(store.load("b").await.unwrap().is_empty());
    }
}
