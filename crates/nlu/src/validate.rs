//! Input screening for store-bound questions.
//!
//! Questions never reach a SQL engine directly, but text that reads like
//! an injection attempt is rejected up front with a user-facing message
//! instead of being fed through the pipeline. Keywords are matched as
//! whole words so that ordinary text like "recommendation" (contains
//! "on") or "선택" never trips the filter.

use advisor_core::Error;
use tracing::warn;

const FORBIDDEN_WORDS: &[&str] = &[
    "insert", "update", "delete", "drop", "create", "alter", "truncate", "exec", "union",
    "grant", "revoke",
];

const FORBIDDEN_SEQUENCES: &[&str] = &["--", "/*", "*/", ";"];

pub struct QueryValidator;

impl QueryValidator {
    /// Rejects questions containing SQL manipulation tokens.
    pub fn check(question: &str) -> Result<(), Error> {
        let lowered = question.to_lowercase();
        let word_hit = lowered
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| FORBIDDEN_WORDS.contains(&token));
        let sequence_hit = FORBIDDEN_SEQUENCES.iter().any(|s| lowered.contains(s));
        if word_hit || sequence_hit {
            warn!("question rejected by input screen");
            return Err(Error::ValidationRejection {
                message: "보안상 허용되지 않는 표현이 포함되어 있습니다. 질문을 다시 작성해 주세요."
                    .to_string(),
            });
        }
        Ok(())
    }
}
