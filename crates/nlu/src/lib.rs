//! Language understanding for the advising pipeline: intent
//! classification, condition extraction, and input screening.

pub mod extractor;
pub mod intent;
pub mod synonyms;
pub mod validate;

pub use extractor::ConditionExtractor;
pub use intent::IntentClassifier;
pub use validate::QueryValidator;
