//! Error types for the advisor domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each collaborator boundary has its own error variant.

use thiserror::Error;

/// The top-level error type for all advisor operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Record store errors ---
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    // --- Text generation errors ---
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    // --- Requirement retrieval errors ---
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    // --- Conversation memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Missing data (surfaced to the user, never fatal) ---
    #[error("Not found: {what}")]
    NotFound { what: String },

    // --- Free text the extractor could not recognize ---
    #[error("Ambiguous query")]
    AmbiguousQuery { guide: String },

    // --- Structured-query payloads submitted as questions ---
    #[error("Query rejected: {message}")]
    ValidationRejection { message: String },

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The user-visible rendering of this error, if it has one.
    ///
    /// `NotFound`, `AmbiguousQuery`, and `ValidationRejection` are answered
    /// with explanatory text instead of failing the pipeline. Everything
    /// else propagates as a pipeline failure.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Error::NotFound { what } => Some(format!("조회된 데이터가 없습니다: {what}")),
            Error::AmbiguousQuery { guide } => Some(guide.clone()),
            Error::ValidationRejection { message } => Some(message.clone()),
            _ => None,
        }
    }
}

// --- Collaborator boundary errors ---

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Malformed record: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    Failed(String),

    #[error("Generation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Generator not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Clone, Error)]
pub enum RetrievalError {
    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Retrieval backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupted history: {0}")]
    Corrupted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_displays_correctly() {
        let err = Error::Store(StoreError::QueryFailed("bad filter".into()));
        assert!(err.to_string().contains("bad filter"));
    }

    #[test]
    fn not_found_has_user_message() {
        let err = Error::NotFound {
            what: "학번 20230578".into(),
        };
        let msg = err.user_message().unwrap();
        assert!(msg.contains("20230578"));
    }

    #[test]
    fn collaborator_errors_have_no_user_message() {
        let err = Error::Generation(GenerationError::Failed("upstream 500".into()));
        assert!(err.user_message().is_none());
    }

    #[test]
    fn ambiguous_query_carries_guide() {
        let err = Error::AmbiguousQuery {
            guide: "검색 예시: '3학년 과목 알려줘'".into(),
        };
        assert!(err.user_message().unwrap().contains("검색 예시"));
    }
}
