//! Conversation memory: bounded per-student history plus pluggable
//! persistence backends.

pub mod file_backend;
pub mod history;
pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file_backend::FileTurnStore;
pub use history::{ConversationMemory, DEFAULT_CONTEXT_CHARS, DEFAULT_HISTORY_CAP};
pub use in_memory::InMemoryTurnStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteTurnStore;
