//! Keyword-priority intent classification.

use advisor_core::Intent;
use tracing::debug;

// Rule order is load-bearing: personal-possessive phrases outrank the
// comprehensive keywords, which outrank graduation, and so on. A question
// like "내 이수 현황과 졸업 요건" is a student lookup, not graduation.
const PERSONAL_PHRASES: &[&str] = &[
    "내 이수", "내 학기", "내 정보", "내 현황", "내 성적", "내 이력", "내 분석", "내 학점",
];
const COMPREHENSIVE: &[&str] = &["종합", "전체", "모든", "완전한", "전반적", "총괄"];
const GRADUATION: &[&str] = &["졸업 요건", "졸업 학점", "졸업 논문", "졸업 인증", "졸업"];
const RECOMMENDATION: &[&str] = &["추천", "수강", "계획", "로드맵", "다음학기", "선택"];
const COURSE: &[&str] = &["강의", "과목", "시간표", "교수", "강좌"];
const STUDENT: &[&str] = &["내", "현황", "성적", "이력", "정보", "분석"];

/// Classifies a question into one of the pipeline intents.
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn classify(question: &str) -> Intent {
        let intent = Self::classify_inner(question);
        debug!(intent = %intent, "question classified");
        intent
    }

    fn classify_inner(question: &str) -> Intent {
        if contains_any(question, PERSONAL_PHRASES) {
            return Intent::Student;
        }
        if contains_any(question, COMPREHENSIVE) {
            return Intent::Comprehensive;
        }
        if contains_any(question, GRADUATION) {
            return Intent::Graduation;
        }
        if contains_any(question, RECOMMENDATION) {
            return Intent::Recommendation;
        }
        if contains_any(question, COURSE) {
            return Intent::Course;
        }
        if contains_any(question, STUDENT) {
            return Intent::Student;
        }
        Intent::General
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personal_phrase_beats_everything() {
        assert_eq!(
            IntentClassifier::classify("내 이수 현황이랑 졸업 요건 알려줘"),
            Intent::Student
        );
    }

    #[test]
    fn comprehensive_beats_graduation() {
        assert_eq!(
            IntentClassifier::classify("졸업까지 포함한 종합 분석 해줘"),
            Intent::Comprehensive
        );
    }

    #[test]
    fn graduation_beats_recommendation() {
        assert_eq!(
            IntentClassifier::classify("졸업 요건 채우려면 뭘 수강해야 해?"),
            Intent::Graduation
        );
    }

    #[test]
    fn recommendation_beats_course() {
        assert_eq!(
            IntentClassifier::classify("다음학기 들을 과목 추천해줘"),
            Intent::Recommendation
        );
    }

    #[test]
    fn course_keywords() {
        assert_eq!(
            IntentClassifier::classify("김철수 교수 강의 시간표 보여줘"),
            Intent::Course
        );
    }

    #[test]
    fn bare_student_keywords() {
        assert_eq!(IntentClassifier::classify("성적 알려줘"), Intent::Student);
    }

    #[test]
    fn fallback_is_general() {
        assert_eq!(IntentClassifier::classify("안녕하세요"), Intent::General);
    }
}
