//! Degree-progress accounting.

use advisor_core::CourseType;
use serde::Serialize;

/// Graduation credit thresholds. Policy constants, not derived from data.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressThresholds {
    pub total: u16,
    pub major: u16,
    pub liberal: u16,
}

impl Default for ProgressThresholds {
    fn default() -> Self {
        Self {
            total: 130,
            major: 60,
            liberal: 30,
        }
    }
}

/// One completed course as seen by the engine: the enrollment joined with
/// its catalog entry.
#[derive(Debug, Clone)]
pub struct CompletedCourse {
    pub course_code: String,
    pub credits: u8,
    pub department_code: String,
    pub course_type: CourseType,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraduationProgress {
    pub total_credits: u16,
    pub major_credits: u16,
    pub liberal_credits: u16,
    pub other_credits: u16,
    pub thresholds: ProgressThresholds,
}

impl GraduationProgress {
    /// Each course counts in exactly one category: the student's own
    /// department first, then liberal-arts types, then other.
    pub fn assess(
        major_code: &str,
        completed: &[CompletedCourse],
        thresholds: ProgressThresholds,
    ) -> Self {
        let mut major = 0u16;
        let mut liberal = 0u16;
        let mut other = 0u16;
        for course in completed {
            let credits = u16::from(course.credits);
            if course.department_code == major_code {
                major += credits;
            } else if course.course_type.is_liberal() {
                liberal += credits;
            } else {
                other += credits;
            }
        }
        Self {
            total_credits: major + liberal + other,
            major_credits: major,
            liberal_credits: liberal,
            other_credits: other,
            thresholds,
        }
    }

    pub fn remaining_total(&self) -> u16 {
        self.thresholds.total.saturating_sub(self.total_credits)
    }

    pub fn remaining_major(&self) -> u16 {
        self.thresholds.major.saturating_sub(self.major_credits)
    }

    pub fn remaining_liberal(&self) -> u16 {
        self.thresholds.liberal.saturating_sub(self.liberal_credits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(code: &str, credits: u8, dept: &str, course_type: CourseType) -> CompletedCourse {
        CompletedCourse {
            course_code: code.to_string(),
            credits,
            department_code: dept.to_string(),
            course_type,
        }
    }

    #[test]
    fn categories_partition_total() {
        let courses = vec![
            completed("CS101-01", 3, "CS", CourseType::MajorRequired),
            completed("GE201-01", 2, "GE", CourseType::GeneralElective),
            completed("MA105-01", 3, "MA", CourseType::MajorElective),
        ];
        let progress = GraduationProgress::assess("CS", &courses, ProgressThresholds::default());
        assert_eq!(progress.major_credits, 3);
        assert_eq!(progress.liberal_credits, 2);
        assert_eq!(progress.other_credits, 3);
        assert_eq!(
            progress.total_credits,
            progress.major_credits + progress.liberal_credits + progress.other_credits
        );
    }

    #[test]
    fn own_department_liberal_course_counts_as_major_only() {
        // Department match takes precedence, so nothing is double counted
        let courses = vec![completed("CS900-01", 2, "CS", CourseType::GeneralCore)];
        let progress = GraduationProgress::assess("CS", &courses, ProgressThresholds::default());
        assert_eq!(progress.major_credits, 2);
        assert_eq!(progress.liberal_credits, 0);
        assert_eq!(progress.total_credits, 2);
    }

    #[test]
    fn remaining_never_goes_negative() {
        let courses: Vec<CompletedCourse> = (0..60)
            .map(|i| completed(&format!("CS{i:03}-01"), 3, "CS", CourseType::MajorRequired))
            .collect();
        let progress = GraduationProgress::assess("CS", &courses, ProgressThresholds::default());
        assert_eq!(progress.total_credits, 180);
        assert_eq!(progress.remaining_total(), 0);
        assert_eq!(progress.remaining_major(), 0);
    }

    #[test]
    fn empty_history_has_full_remaining() {
        let progress = GraduationProgress::assess("CS", &[], ProgressThresholds::default());
        assert_eq!(progress.remaining_total(), 130);
        assert_eq!(progress.remaining_major(), 60);
        assert_eq!(progress.remaining_liberal(), 30);
    }
}
