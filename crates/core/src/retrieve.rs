//! RequirementRetriever trait — ranked passage retrieval for graduation
//! requirement documents.
//!
//! The backing vector search is a black box to the core: it takes free
//! text and returns passages ordered by descending similarity in [0, 1].
//! Threshold selection and low-confidence fallback happen in the pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::RetrievalError;

/// One retrieved passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub content: String,

    /// Source metadata (e.g. {"source_file": "..."})
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,

    /// Cosine similarity in [0, 1]
    pub similarity: f32,
}

/// The requirement-retrieval collaborator.
#[async_trait]
pub trait RequirementRetriever: Send + Sync {
    /// A human-readable name for this backend (e.g., "pgvector", "fixtures").
    fn name(&self) -> &str;

    /// Search for passages relevant to `query`, best first.
    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> std::result::Result<Vec<Passage>, RetrievalError>;
}
