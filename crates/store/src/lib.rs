//! Collaborator implementations: JSON record store, fixture retriever,
//! and the offline generator.

pub mod generator;
pub mod json_store;
pub mod retriever;

pub use generator::StaticGenerator;
pub use json_store::JsonRecordStore;
pub use retriever::FixtureRetriever;
