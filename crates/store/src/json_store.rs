//! JSON-fixture record store.
//!
//! Loads students, courses, and enrollments from three JSON files in a
//! data directory and answers the same queries a relational backend
//! would: equality on tokens, substring on names.

use std::path::Path;

use advisor_core::{
    Course, CourseConditions, EnrollmentConditions, EnrollmentRecord, RecordStore, StoreError,
    Student,
};
use async_trait::async_trait;
use tracing::info;

#[derive(Debug)]
pub struct JsonRecordStore {
    students: Vec<Student>,
    courses: Vec<Course>,
    enrollments: Vec<EnrollmentRecord>,
}

impl JsonRecordStore {
    pub fn load(data_dir: &Path) -> Result<Self, StoreError> {
        let students = read_json(&data_dir.join("students.json"))?;
        let courses = read_json(&data_dir.join("courses.json"))?;
        let enrollments = read_json(&data_dir.join("enrollments.json"))?;
        let store = Self {
            students,
            courses,
            enrollments,
        };
        info!(
            students = store.students.len(),
            courses = store.courses.len(),
            enrollments = store.enrollments.len(),
            "record store loaded"
        );
        Ok(store)
    }

    pub fn from_records(
        students: Vec<Student>,
        courses: Vec<Course>,
        enrollments: Vec<EnrollmentRecord>,
    ) -> Self {
        Self {
            students,
            courses,
            enrollments,
        }
    }

    fn course_by_code(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.course_code == code)
    }

    fn enrollment_matches(&self, record: &EnrollmentRecord, cond: &EnrollmentConditions) -> bool {
        if let Some(semester) = &cond.semester {
            if &record.enrollment_semester != semester {
                return false;
            }
        }
        if let Some(grade) = &cond.grade {
            match &record.grade {
                Some(g) if g.as_str() == grade => {}
                _ => return false,
            }
        }
        if let Some(kind) = &cond.enrollment_type {
            // bare "major"/"general" cover their required/elective splits
            let matches = if kind == "major" || kind == "general" {
                record.enrollment_type.starts_with(kind.as_str())
            } else {
                &record.enrollment_type == kind
            };
            if !matches {
                return false;
            }
        }
        if let Some(credits) = cond.credits {
            if record.earned_credits != credits {
                return false;
            }
        }
        if let Some(subjects) = &cond.subject {
            let Some(course) = self.course_by_code(&record.course_code) else {
                return false;
            };
            if !subjects.iter().any(|s| course.course_name.contains(s)) {
                return false;
            }
        }
        true
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let bytes = std::fs::read(path).map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Malformed(format!("{}: {e}", path.display())))
}

fn course_matches(course: &Course, cond: &CourseConditions) -> bool {
    if let Some(grade_level) = &cond.grade_level {
        match grade_level.parse::<u8>() {
            Ok(level) if course.target_grade.admits(level) => {}
            _ => return false,
        }
    }
    if let Some(departments) = &cond.department {
        if !departments
            .iter()
            .any(|d| course.department_code.contains(d))
        {
            return false;
        }
    }
    if let Some(subjects) = &cond.subject {
        if !subjects.iter().any(|s| course.course_name.contains(s)) {
            return false;
        }
    }
    if let Some(professor) = &cond.professor {
        match &course.professor {
            Some(p) if p.contains(professor) => {}
            _ => return false,
        }
    }
    true
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    fn name(&self) -> &str {
        "json"
    }

    async fn student(&self, student_id: &str) -> Result<Option<Student>, StoreError> {
        Ok(self
            .students
            .iter()
            .find(|s| s.student_id == student_id)
            .cloned())
    }

    async fn course(&self, course_code: &str) -> Result<Option<Course>, StoreError> {
        Ok(self.course_by_code(course_code).cloned())
    }

    async fn enrollments(
        &self,
        student_id: &str,
        conditions: &EnrollmentConditions,
    ) -> Result<Vec<EnrollmentRecord>, StoreError> {
        Ok(self
            .enrollments
            .iter()
            .filter(|r| r.student_id == student_id)
            .filter(|r| self.enrollment_matches(r, conditions))
            .cloned()
            .collect())
    }

    async fn search_courses(
        &self,
        conditions: &CourseConditions,
    ) -> Result<Vec<Course>, StoreError> {
        Ok(self
            .courses
            .iter()
            .filter(|c| course_matches(c, conditions))
            .cloned()
            .collect())
    }

    async fn offered(&self, year: i32, term: u8) -> Result<Vec<Course>, StoreError> {
        Ok(self
            .courses
            .iter()
            .filter(|c| c.offered_year == year && c.offered_semester == term)
            .cloned()
            .collect())
    }

    async fn all_courses(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.courses.clone())
    }
}
