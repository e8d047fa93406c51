//! Keyword-overlap requirement retriever over JSON fixture passages.

use std::collections::HashSet;
use std::path::Path;

use advisor_core::{Passage, RequirementRetriever, RetrievalError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
struct PassageFixture {
    content: String,
    #[serde(default)]
    metadata: serde_json::Map<String, serde_json::Value>,
}

/// Scores passages by token overlap with the query. A stand-in with the
/// same interface and score range as a vector index.
pub struct FixtureRetriever {
    passages: Vec<PassageFixture>,
}

impl FixtureRetriever {
    pub fn load(path: &Path) -> Result<Self, RetrievalError> {
        let bytes = std::fs::read(path)
            .map_err(|e| RetrievalError::Unavailable(format!("{}: {e}", path.display())))?;
        let passages = serde_json::from_slice(&bytes)
            .map_err(|e| RetrievalError::Unavailable(format!("{}: {e}", path.display())))?;
        Ok(Self { passages })
    }

    pub fn from_contents(contents: Vec<&str>) -> Self {
        Self {
            passages: contents
                .into_iter()
                .map(|content| PassageFixture {
                    content: content.to_string(),
                    metadata: serde_json::Map::new(),
                })
                .collect(),
        }
    }
}

fn tokens(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}

fn similarity(query: &HashSet<&str>, content: &str) -> f32 {
    if query.is_empty() {
        return 0.0;
    }
    let content_tokens = tokens(content);
    let overlap = query.iter().filter(|t| content_tokens.contains(**t)).count();
    overlap as f32 / query.len() as f32
}

#[async_trait]
impl RequirementRetriever for FixtureRetriever {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, RetrievalError> {
        let query_tokens = tokens(query);
        let mut scored: Vec<Passage> = self
            .passages
            .iter()
            .map(|p| Passage {
                content: p.content.clone(),
                metadata: p.metadata.clone(),
                similarity: similarity(&query_tokens, &p.content),
            })
            .collect();
        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        debug!(results = scored.len(), "requirement search complete");
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn results_ordered_by_overlap() {
        let retriever = FixtureRetriever::from_contents(vec![
            "졸업 요건 총 130 학점",
            "기숙사 입주 안내",
        ]);
        let results = retriever.search("졸업 요건 학점", 3).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].content.contains("졸업"));
        assert!(results[0].similarity > results[1].similarity);
    }

    #[tokio::test]
    async fn top_k_truncates() {
        let retriever = FixtureRetriever::from_contents(vec!["a", "b", "c"]);
        assert_eq!(retriever.search("a", 2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn similarity_stays_in_unit_range() {
        let retriever = FixtureRetriever::from_contents(vec!["졸업 요건"]);
        let results = retriever.search("졸업 요건", 1).await.unwrap();
        assert!((0.0..=1.0).contains(&results[0].similarity));
        assert_eq!(results[0].similarity, 1.0);
    }
}
