//! Student, course, and enrollment domain records.
//!
//! These are the read-only entities the pipeline queries: students come
//! from the enrollment system, courses from the catalog, enrollment
//! records from the registrar. The advising core never mutates them.

use serde::{Deserialize, Serialize};

/// A student record. Created externally; read-only to this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique student number (e.g., "20230578")
    pub student_id: String,

    /// Full name
    pub name: String,

    /// Major code — matches `Course::department_code` for major courses
    pub major_code: String,

    /// Year of admission
    pub admission_year: i32,

    /// Number of semesters completed so far
    pub completed_semester: u8,
}

/// Category of a catalog course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseType {
    MajorRequired,
    MajorElective,
    GeneralRequired,
    GeneralElective,
    GeneralCore,
    Other,
}

impl CourseType {
    /// Whether this type counts toward the liberal-arts requirement.
    pub fn is_liberal(&self) -> bool {
        matches!(
            self,
            CourseType::GeneralRequired | CourseType::GeneralElective | CourseType::GeneralCore
        )
    }
}

/// Which grade levels a course admits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetGrade {
    /// One grade level, e.g. 3rd years only
    Single(u8),
    /// An inclusive range, e.g. 2nd through 4th years
    Range(u8, u8),
    /// Open to all grade levels
    All,
}

impl TargetGrade {
    /// Whether a student at `grade` may take the course.
    pub fn admits(&self, grade: u8) -> bool {
        match self {
            TargetGrade::Single(g) => *g == grade,
            TargetGrade::Range(lo, hi) => (*lo..=*hi).contains(&grade),
            TargetGrade::All => true,
        }
    }
}

impl TryFrom<String> for TargetGrade {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        let s = s.trim();
        if s == "전체" || s.eq_ignore_ascii_case("all") {
            return Ok(TargetGrade::All);
        }
        if let Some((lo, hi)) = s.split_once('-') {
            let lo: u8 = lo.trim().parse().map_err(|_| format!("bad grade range: {s}"))?;
            let hi: u8 = hi.trim().parse().map_err(|_| format!("bad grade range: {s}"))?;
            return Ok(TargetGrade::Range(lo, hi));
        }
        let g: u8 = s.parse().map_err(|_| format!("bad target grade: {s}"))?;
        Ok(TargetGrade::Single(g))
    }
}

impl From<TargetGrade> for String {
    fn from(t: TargetGrade) -> String {
        match t {
            TargetGrade::Single(g) => g.to_string(),
            TargetGrade::Range(lo, hi) => format!("{lo}-{hi}"),
            TargetGrade::All => "전체".into(),
        }
    }
}

/// An immutable catalog entry.
///
/// The first five characters of `course_code` identify the logical
/// course: sections and re-offerings share the prefix and are treated
/// as the same subject for completion and dedup purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub course_code: String,
    pub course_name: String,
    pub credits: u8,
    pub course_type: CourseType,
    pub department_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,

    pub target_grade: TargetGrade,
    pub offered_year: i32,
    pub offered_semester: u8,

    /// Course codes that must be completed first. Usually empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,
}

impl Course {
    /// The 5-character logical-course prefix.
    pub fn logical_prefix(&self) -> &str {
        logical_prefix(&self.course_code)
    }
}

/// The 5-character logical-course prefix of an arbitrary course code.
pub fn logical_prefix(code: &str) -> &str {
    // Counted in characters, not bytes, so hangul codes slice cleanly.
    code.char_indices().nth(5).map_or(code, |(i, _)| &code[..i])
}

/// A letter grade on the 4.5 scale, or NP for ungraded failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "D+")]
    DPlus,
    D,
    F,
    NP,
}

impl Grade {
    /// Whether this grade earns the course's credits.
    pub fn is_passing(&self) -> bool {
        !matches!(self, Grade::F | Grade::NP)
    }

    /// Grade points on the 4.5 scale (F and NP are 0.0).
    pub fn points(&self) -> f32 {
        match self {
            Grade::APlus => 4.5,
            Grade::A => 4.0,
            Grade::BPlus => 3.5,
            Grade::B => 3.0,
            Grade::CPlus => 2.5,
            Grade::C => 2.0,
            Grade::DPlus => 1.5,
            Grade::D => 1.0,
            Grade::F | Grade::NP => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
            Grade::NP => "NP",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B+" => Ok(Grade::BPlus),
            "B" => Ok(Grade::B),
            "C+" => Ok(Grade::CPlus),
            "C" => Ok(Grade::C),
            "D+" => Ok(Grade::DPlus),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            "NP" => Ok(Grade::NP),
            other => Err(format!("unknown grade: {other}")),
        }
    }
}

/// One row of a student's enrollment history.
///
/// A null `grade` means the course is still in progress. Retakes appear
/// as multiple records sharing a logical-course prefix; only passing,
/// graded records count toward completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub student_id: String,
    pub course_code: String,

    /// Enrollment category token (e.g. "major_required")
    pub enrollment_type: String,

    pub earned_credits: u8,
    pub offering_department: String,

    /// Year-term token, e.g. "2024-1"
    pub enrollment_semester: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
}

impl EnrollmentRecord {
    /// Whether this record counts toward completed courses.
    pub fn is_completed(&self) -> bool {
        self.grade.map(|g| g.is_passing()).unwrap_or(false)
    }

    /// The 5-character logical-course prefix.
    pub fn logical_prefix(&self) -> &str {
        logical_prefix(&self.course_code)
    }
}
