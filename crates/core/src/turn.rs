//! Conversation turns and their persistence trait.
//!
//! A turn is one (question, answer) exchange tagged with the classified
//! intent. Per-student histories are bounded; eviction lives in the
//! memory crate, persistence behind the `TurnStore` trait so the backing
//! mechanism (file, embedded DB, cache) is swappable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::MemoryError;
use crate::intent::Intent;

/// One recorded exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub timestamp: DateTime<Utc>,
    pub question: String,
    pub answer: String,
    pub intent: Intent,
}

impl ConversationTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, intent: Intent) -> Self {
        Self {
            timestamp: Utc::now(),
            question: question.into(),
            answer: answer.into(),
            intent,
        }
    }
}

/// Key-value persistence for per-student turn histories.
///
/// `load` is idempotent and returns an empty list for unknown students;
/// corrupted storage also degrades to empty rather than failing. `save`
/// atomically replaces the student's stored history.
#[async_trait]
pub trait TurnStore: Send + Sync {
    /// A human-readable name for this backend (e.g., "file", "sqlite").
    fn name(&self) -> &str;

    async fn load(&self, student_id: &str)
        -> std::result::Result<Vec<ConversationTurn>, MemoryError>;

    async fn save(
        &self,
        student_id: &str,
        turns: &[ConversationTurn],
    ) -> std::result::Result<(), MemoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_serialization() {
        let turn = ConversationTurn::new("내 성적 알려줘", "A+ 3과목", Intent::Student);
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("student"));
        assert!(json.contains("내 성적 알려줘"));
    }
}
