//! Generator trait — the abstraction over the text-generation service.
//!
//! Each pipeline stage hands the generator a role description, an
//! instruction, and the context gathered so far, and gets free text back.
//! The generator is treated as a pure function with unspecified latency;
//! failures propagate as stage failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::GenerationError;

/// One generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Who the model is acting as (the specialist's role description)
    pub role: String,

    /// What to do, with the user's question already templated in
    pub instruction: String,

    /// Gathered data, prior stage outputs, and conversation context
    pub context: String,
}

/// The text-generation collaborator.
#[async_trait]
pub trait Generator: Send + Sync {
    /// A human-readable name for this backend (e.g., "bedrock", "static").
    fn name(&self) -> &str;

    /// Compose an answer from role + instruction + context.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_roundtrips() {
        let req = GenerationRequest {
            role: "수강 추천 전문가".into(),
            instruction: "추천해줘".into(),
            context: "이수 이력 …".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: GenerationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, req.role);
    }
}
