//! RecordStore trait — the abstraction over student/course/enrollment data.
//!
//! The pipeline only ever reads. Filtering is expressed through the
//! condition structs produced by the extractor; a backend translates each
//! populated field into an equality or LIKE-style predicate.
//!
//! Implementations: JSON fixtures (offline/testing), or whatever database
//! layer the host application wires in.

use async_trait::async_trait;
use crate::conditions::{CourseConditions, EnrollmentConditions};
use crate::error::StoreError;
use crate::records::{Course, EnrollmentRecord, Student};

/// Read-only access to academic records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// A human-readable name for this backend (e.g., "fixtures", "mysql").
    fn name(&self) -> &str;

    /// Look up one student by id.
    async fn student(&self, student_id: &str)
        -> std::result::Result<Option<Student>, StoreError>;

    /// Look up one course by exact code.
    async fn course(&self, course_code: &str)
        -> std::result::Result<Option<Course>, StoreError>;

    /// A student's enrollment history, optionally narrowed by conditions.
    /// An empty condition set returns the full history.
    async fn enrollments(
        &self,
        student_id: &str,
        conditions: &EnrollmentConditions,
    ) -> std::result::Result<Vec<EnrollmentRecord>, StoreError>;

    /// Catalog search by extracted conditions. Callers must not pass an
    /// empty condition set; backends may return everything if they do.
    async fn search_courses(
        &self,
        conditions: &CourseConditions,
    ) -> std::result::Result<Vec<Course>, StoreError>;

    /// Courses offered in a specific term.
    async fn offered(&self, year: i32, term: u8)
        -> std::result::Result<Vec<Course>, StoreError>;

    /// The whole catalog (used by "show me everything" questions).
    async fn all_courses(&self) -> std::result::Result<Vec<Course>, StoreError>;
}
