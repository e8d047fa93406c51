//! Offline text generator.
//!
//! Renders stage context deterministically instead of calling a model,
//! so the whole pipeline runs without network access or credentials.
//! Swap in a real provider behind the same trait for live deployments.

use advisor_core::{GenerationError, GenerationRequest, Generator};
use async_trait::async_trait;

pub struct StaticGenerator {
    model: String,
}

impl StaticGenerator {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

#[async_trait]
impl Generator for StaticGenerator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        if request.context.trim().is_empty() {
            return Ok(format!("[{}]\n수집된 정보가 없습니다.", request.instruction));
        }
        Ok(format!("[{}]\n{}", request.instruction, request.context))
    }
}
