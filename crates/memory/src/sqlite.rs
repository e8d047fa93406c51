//! SQLite-backed turn store.

use advisor_core::{ConversationTurn, Intent, MemoryError, TurnStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteConnectOptions};
use tracing::debug;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS conversation_turns (
    student_id TEXT    NOT NULL,
    position   INTEGER NOT NULL,
    timestamp  TEXT    NOT NULL,
    question   TEXT    NOT NULL,
    answer     TEXT    NOT NULL,
    intent     TEXT    NOT NULL,
    PRIMARY KEY (student_id, position)
)
"#;

pub struct SqliteTurnStore {
    pool: SqlitePool,
}

impl SqliteTurnStore {
    /// Opens (creating if needed) the database at `path` and ensures the
    /// schema exists.
    pub async fn open(path: &str) -> Result<Self, MemoryError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self, MemoryError> {
        Self::open(":memory:").await
    }
}

#[async_trait]
impl TurnStore for SqliteTurnStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn load(&self, student_id: &str) -> Result<Vec<ConversationTurn>, MemoryError> {
        let rows = sqlx::query(
            "SELECT timestamp, question, answer, intent \
             FROM conversation_turns WHERE student_id = ? ORDER BY position",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MemoryError::Storage(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let timestamp: String = row.get("timestamp");
                let intent: String = row.get("intent");
                Ok(ConversationTurn {
                    timestamp: timestamp
                        .parse::<DateTime<Utc>>()
                        .map_err(|e| MemoryError::Corrupted(e.to_string()))?,
                    question: row.get("question"),
                    answer: row.get("answer"),
                    intent: intent
                        .parse::<Intent>()
                        .map_err(MemoryError::Corrupted)?,
                })
            })
            .collect()
    }

    /// Replaces the stored history in one transaction, so readers never
    /// observe a partially written history.
    async fn save(&self, student_id: &str, turns: &[ConversationTurn]) -> Result<(), MemoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        sqlx::query("DELETE FROM conversation_turns WHERE student_id = ?")
            .bind(student_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        for (position, turn) in turns.iter().enumerate() {
            sqlx::query(
                "INSERT INTO conversation_turns \
                 (student_id, position, timestamp, question, answer, intent) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(student_id)
            .bind(position as i64)
            .bind(turn.timestamp.to_rfc3339())
            .bind(&turn.question)
            .bind(&turn.answer)
            .bind(turn.intent.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        }
        tx.commit()
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        debug!(student_id, turns = turns.len(), "history saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_preserves_order_and_intent() {
        let store = SqliteTurnStore::in_memory().await.unwrap();
        let turns = vec![
            ConversationTurn::new("첫 질문", "첫 답변", Intent::Student),
            ConversationTurn::new("둘째 질문", "둘째 답변", Intent::Recommendation),
        ];
        store.save("2023001", &turns).await.unwrap();
        let loaded = store.load("2023001").await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].question, "첫 질문");
        assert_eq!(loaded[1].intent, Intent::Recommendation);
    }

    #[tokio::test]
    async fn save_replaces_not_appends() {
        let store = SqliteTurnStore::in_memory().await.unwrap();
        let one = vec![ConversationTurn::new("q1", "a1", Intent::General)];
        store.save("s", &one).await.unwrap();
        store.save("s", &one).await.unwrap();
        assert_eq!(store.load("s").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_student_loads_empty() {
        let store = SqliteTurnStore::in_memory().await.unwrap();
        assert!(store.load("nobody").await.unwrap().is_empty());
    }
}
