//! Question intent categories.

use serde::{Deserialize, Serialize};

/// The category assigned to a user question. Each intent maps to a fixed
/// pipeline of specialist stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Full analysis: records, requirements, and a recommendation
    Comprehensive,
    /// Graduation requirement questions
    Graduation,
    /// Course selection / planning questions
    Recommendation,
    /// Catalog lookups
    Course,
    /// Personal record questions
    Student,
    /// Anything unrecognized
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Comprehensive => "comprehensive",
            Intent::Graduation => "graduation",
            Intent::Recommendation => "recommendation",
            Intent::Course => "course",
            Intent::Student => "student",
            Intent::General => "general",
        }
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comprehensive" => Ok(Intent::Comprehensive),
            "graduation" => Ok(Intent::Graduation),
            "recommendation" => Ok(Intent::Recommendation),
            "course" => Ok(Intent::Course),
            "student" => Ok(Intent::Student),
            "general" => Ok(Intent::General),
            other => Err(format!("unknown intent: {other}")),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
