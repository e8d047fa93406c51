//! Natural-language → structured search conditions.
//!
//! Priority-ordered pattern matching: for each field the first matching
//! pattern wins and later patterns are not tried. This is deliberately
//! not exhaustive alternation — the patterns encode how students actually
//! phrase these questions, and the order encodes which reading wins when
//! several could apply.

use advisor_core::{CourseConditions, EnrollmentConditions};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::synonyms::{self, DEPT_STOPLIST, ENROLLMENT_TYPES, SUBJECT_KEYWORDS};

static GRADE_LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"([1-4])학년").unwrap());
static DEPT_FULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[가-힣A-Za-z]+학과").unwrap());
static DEPT_SHORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[가-힣A-Za-z]+과").unwrap());
static PROFESSOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"([가-힣A-Za-z]+)\s*교수").unwrap());

static SEM_COMPACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})-?([12])학기").unwrap());
static SEM_SPACED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})년\s*([12])학기").unwrap());
static SEM_TERM_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([12])학기").unwrap());

// Letter-grade surface forms, first match wins.
static GRADE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"([ABCDF]\+?)학점",
        r"([ABCDF]\+?)\s*받은",
        r"성적\s*([ABCDF]\+?)",
        r"([ABCDF]\+?)\s*과목",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static CREDITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"([1-9])학점").unwrap());

/// Extracts structured conditions from free-text questions.
pub struct ConditionExtractor;

impl ConditionExtractor {
    /// Conditions for a catalog search.
    pub fn extract_course(text: &str) -> CourseConditions {
        let conditions = CourseConditions {
            grade_level: GRADE_LEVEL
                .captures(text)
                .map(|c| c[1].to_string()),
            department: extract_department(text),
            subject: extract_subject(text),
            professor: PROFESSOR.captures(text).map(|c| c[1].to_string()),
        };
        debug!(?conditions, "course conditions extracted");
        conditions
    }

    /// Conditions for an enrollment-history search. Bare "T학기" tokens
    /// are resolved against `current_year`.
    pub fn extract_enrollment(text: &str, current_year: i32) -> EnrollmentConditions {
        let conditions = EnrollmentConditions {
            semester: extract_semester(text, current_year),
            grade: extract_letter_grade(text),
            enrollment_type: extract_enrollment_type(text),
            subject: extract_subject(text),
            credits: extract_credits(text),
        };
        debug!(?conditions, "enrollment conditions extracted");
        conditions
    }
}

/// Department matching: the full `…학과` suffix is preferred over the
/// short `…과` suffix, generic tokens are rejected, and a `…과` directly
/// followed by 목 is really the word 과목 ("subject"), not a department.
fn extract_department(text: &str) -> Option<Vec<String>> {
    for m in DEPT_FULL.find_iter(text) {
        let token = m.as_str();
        if DEPT_STOPLIST.contains(&token) {
            continue;
        }
        return Some(expand_department(token));
    }
    for m in DEPT_SHORT.find_iter(text) {
        if text[m.end()..].chars().next() == Some('목') {
            continue;
        }
        let token = m.as_str();
        if DEPT_STOPLIST.contains(&token) {
            continue;
        }
        return Some(expand_department(token));
    }
    None
}

/// Strip the department suffix before synonym lookup: 국문학과 belongs to
/// the 국문 group even though the group stores suffix-free stems. Falls
/// back to the matched token itself when no group contains a stem.
fn expand_department(token: &str) -> Vec<String> {
    for stem in [token.strip_suffix("학과"), token.strip_suffix("과"), Some(token)]
        .into_iter()
        .flatten()
    {
        if let Some(group) = synonyms::group_for(stem) {
            return group;
        }
    }
    vec![token.to_string()]
}

fn extract_subject(text: &str) -> Option<Vec<String>> {
    SUBJECT_KEYWORDS
        .iter()
        .find(|kw| text.contains(*kw))
        .map(|kw| synonyms::expand(kw))
}

/// Semester token: explicit year+term beats the spaced form, which beats
/// a bare term (resolved to the current year).
fn extract_semester(text: &str, current_year: i32) -> Option<String> {
    if let Some(c) = SEM_COMPACT.captures(text) {
        return Some(format!("{}-{}", &c[1], &c[2]));
    }
    if let Some(c) = SEM_SPACED.captures(text) {
        return Some(format!("{}-{}", &c[1], &c[2]));
    }
    SEM_TERM_ONLY
        .captures(text)
        .map(|c| format!("{}-{}", current_year, &c[1]))
}

fn extract_letter_grade(text: &str) -> Option<String> {
    GRADE_PATTERNS
        .iter()
        .find_map(|p| p.captures(text).map(|c| c[1].to_string()))
}

fn extract_enrollment_type(text: &str) -> Option<String> {
    ENROLLMENT_TYPES
        .iter()
        .find(|(korean, _)| text.contains(korean))
        .map(|(_, token)| token.to_string())
}

fn extract_credits(text: &str) -> Option<u8> {
    CREDITS.captures(text).and_then(|c| c[1].parse().ok())
}
