//! Structured search conditions extracted from natural-language questions.
//!
//! These structs are the contract between the condition extractor and the
//! record store: each populated field becomes an equality or substring
//! predicate. Synonym-expanded fields hold the entire synonym group so a
//! match on any member counts.

use serde::{Deserialize, Serialize};

/// Conditions for searching the course catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseConditions {
    /// Grade level as the extracted digit, e.g. "3"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,

    /// Department name tokens (whole synonym group when one matched)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Vec<String>>,

    /// Subject keyword tokens (whole synonym group when one matched)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<String>>,

    /// Professor surname/name token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,
}

impl CourseConditions {
    /// True when no field was recognized — the caller must answer with a
    /// usage guide instead of querying.
    pub fn is_empty(&self) -> bool {
        self.grade_level.is_none()
            && self.department.is_none()
            && self.subject.is_none()
            && self.professor.is_none()
    }
}

/// Conditions for searching a student's enrollment history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentConditions {
    /// Year-term token, e.g. "2024-1"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,

    /// Letter grade surface form, e.g. "A+"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    /// Enrollment category token, e.g. "major_required"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_type: Option<String>,

    /// Subject keyword tokens (whole synonym group when one matched)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<String>>,

    /// Credit count 1–9
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u8>,
}

impl EnrollmentConditions {
    pub fn is_empty(&self) -> bool {
        self.semester.is_none()
            && self.grade.is_none()
            && self.enrollment_type.is_none()
            && self.subject.is_none()
            && self.credits.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_conditions_are_empty() {
        assert!(CourseConditions::default().is_empty());
        assert!(EnrollmentConditions::default().is_empty());
    }

    #[test]
    fn single_field_is_not_empty() {
        let cond = CourseConditions {
            professor: Some("김철수".into()),
            ..Default::default()
        };
        assert!(!cond.is_empty());
    }

    #[test]
    fn empty_fields_skipped_in_json() {
        let cond = EnrollmentConditions {
            semester: Some("2024-1".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&cond).unwrap();
        assert_eq!(json, r#"{"semester":"2024-1"}"#);
    }
}
