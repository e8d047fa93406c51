//! # Advisor Core
//!
//! Domain types, collaborator traits, and error definitions for the
//! academic advising pipeline. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (record store, text generation,
//! requirement retrieval, turn persistence) is defined as a trait here.
//! Implementations live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod conditions;
pub mod error;
pub mod generate;
pub mod intent;
pub mod records;
pub mod retrieve;
pub mod semester;
pub mod store;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use conditions::{CourseConditions, EnrollmentConditions};
pub use error::{Error, GenerationError, MemoryError, Result, RetrievalError, StoreError};
pub use generate::{GenerationRequest, Generator};
pub use intent::Intent;
pub use records::{logical_prefix, Course, CourseType, EnrollmentRecord, Grade, Student, TargetGrade};
pub use retrieve::{Passage, RequirementRetriever};
pub use semester::{Semester, SemesterCalendar, SemesterSnapshot};
pub use store::RecordStore;
pub use turn::{ConversationTurn, TurnStore};
