//! The advising pipeline: intent-routed stage templates, specialist
//! data gathering, and the orchestrator that runs them sequentially.

pub mod format;
pub mod orchestrator;
pub mod specialists;
pub mod stages;

pub use orchestrator::{Orchestrator, PipelineAnswer};
pub use specialists::{Specialists, completed_courses};
pub use stages::{Specialist, StageTemplate, stages_for};
