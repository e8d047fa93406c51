//! Per-specialist data gathering.
//!
//! Each specialist assembles the factual context its stage hands to the
//! generator: record lookups, requirement retrieval, or the
//! recommendation engine. Free text never reaches the stores directly;
//! it goes through the condition extractor first.

use advisor_core::{
    CourseType, EnrollmentConditions, EnrollmentRecord, Error, RecordStore, RequirementRetriever,
    Result, Semester, SemesterSnapshot,
};
use advisor_engine::{CompletedCourse, RecommendationEngine};
use advisor_nlu::ConditionExtractor;
use tracing::{debug, warn};

use crate::format;

// Passages are drawn from the top results but only this many are
// considered for the confidence cut.
const RETRIEVAL_CONSIDERED: usize = 3;

pub struct Specialists<'a> {
    pub store: &'a dyn RecordStore,
    pub retriever: &'a dyn RequirementRetriever,
    pub engine: &'a RecommendationEngine,
    pub snapshot: &'a SemesterSnapshot,
    pub retrieval_top_k: usize,
    pub similarity_threshold: f32,
}

impl Specialists<'_> {
    /// Profile, filtered enrollment history, and credit statistics.
    pub async fn student_context(&self, student_id: &str, question: &str) -> Result<String> {
        let student = self
            .store
            .student(student_id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::NotFound {
                what: format!("학번 {student_id}"),
            })?;

        let conditions = ConditionExtractor::extract_enrollment(question, self.reference_year());
        let records = self.store.enrollments(student_id, &conditions).await?;
        debug!(records = records.len(), filtered = !conditions.is_empty(), "student lookup");

        let title = if conditions.is_empty() {
            "전체 수강 이력"
        } else {
            "조건 검색 결과"
        };
        Ok(format!(
            "{}\n\n{}\n\n{}",
            format::student_profile(&student),
            format::enrollment_list(&records, title),
            format::enrollment_stats(&records)
        ))
    }

    /// Requirement passages above the similarity threshold, or the best
    /// result with low-confidence framing.
    pub async fn graduation_context(&self, question: &str) -> Result<String> {
        let passages = self
            .retriever
            .search(question, self.retrieval_top_k)
            .await
            .map_err(Error::from)?;
        if passages.is_empty() {
            return Ok("관련 졸업 요건 정보를 찾을 수 없습니다.".to_string());
        }

        let confident: Vec<&advisor_core::Passage> = passages
            .iter()
            .take(RETRIEVAL_CONSIDERED)
            .filter(|p| p.similarity > self.similarity_threshold)
            .collect();

        if confident.is_empty() {
            let best = &passages[0];
            warn!(similarity = best.similarity, "low-confidence requirement match");
            return Ok(format!(
                "참고 정보 (유사도: {:.3}):\n{}",
                best.similarity, best.content
            ));
        }

        let mut result = format!("최고 유사도: {:.3}\n\n", passages[0].similarity);
        for passage in confident {
            result.push_str(&passage.content);
            result.push_str("\n\n");
        }
        Ok(result.trim_end().to_string())
    }

    /// Catalog search. Semester keywords short-circuit the extractor;
    /// an unrecognizable question yields the usage guide as an error.
    pub async fn course_context(&self, question: &str) -> Result<String> {
        if question.contains("다음 학기") || question.contains("다음학기") {
            return self.offered_context(self.snapshot.next).await;
        }
        if question.contains("지난 학기") || question.contains("이전 학기") {
            return self.offered_context(self.snapshot.prev).await;
        }
        if question.contains("이번 학기") || question.contains("현재 학기") {
            return match self.snapshot.current {
                Some(current) => self.offered_context(current).await,
                None => Ok(format!(
                    "현재는 방학 기간입니다.\n{}\n\"다음 학기\" 또는 \"지난 학기\" 강의를 검색해보세요.",
                    self.snapshot.context_line()
                )),
            };
        }
        if question.contains("전체") || question.contains("모든") {
            let courses = self.store.all_courses().await?;
            return Ok(format::course_list(&courses, "전체 강의 목록"));
        }

        let conditions = ConditionExtractor::extract_course(question);
        if conditions.is_empty() {
            return Err(Error::AmbiguousQuery {
                guide: format::course_usage_guide().to_string(),
            });
        }
        let courses = self.store.search_courses(&conditions).await?;
        Ok(format::course_list(&courses, "검색 결과"))
    }

    /// Degree progress plus a greedy recommendation for the next term.
    pub async fn recommendation_context(&self, student_id: &str) -> Result<String> {
        let student = self
            .store
            .student(student_id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| Error::NotFound {
                what: format!("학번 {student_id}"),
            })?;

        let records = self
            .store
            .enrollments(student_id, &EnrollmentConditions::default())
            .await?;
        let completed = completed_courses(&records);

        let next = self.snapshot.next;
        let available = self.store.offered(next.year, next.term).await?;
        let outcome = self
            .engine
            .recommend(&student.major_code, &completed, &available);
        Ok(format::recommendation_block(
            &student,
            &outcome,
            next,
            self.engine.max_credits,
        ))
    }

    async fn offered_context(&self, semester: Semester) -> Result<String> {
        let courses = self.store.offered(semester.year, semester.term).await?;
        Ok(format!(
            "{}\n{}",
            self.snapshot.context_line(),
            format::course_list(&courses, &format!("{semester} 개설 강의"))
        ))
    }

    fn reference_year(&self) -> i32 {
        self.snapshot
            .current
            .map(|s| s.year)
            .unwrap_or(self.snapshot.next.year)
    }
}

/// Projects passed enrollment records onto the progress model.
pub fn completed_courses(records: &[EnrollmentRecord]) -> Vec<CompletedCourse> {
    records
        .iter()
        .filter(|r| r.is_completed())
        .map(|r| CompletedCourse {
            course_code: r.course_code.clone(),
            credits: r.earned_credits,
            department_code: r.offering_department.clone(),
            course_type: course_type_for(&r.enrollment_type),
        })
        .collect()
}

fn course_type_for(enrollment_type: &str) -> CourseType {
    match enrollment_type {
        "major_required" => CourseType::MajorRequired,
        "major_elective" | "major" => CourseType::MajorElective,
        "general_required" => CourseType::GeneralRequired,
        "general_elective" | "general" => CourseType::GeneralElective,
        "general_core" => CourseType::GeneralCore,
        _ => CourseType::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{
        Course, EnrollmentRecord, Grade, SemesterCalendar, Student, TargetGrade,
    };
    use advisor_store::{FixtureRetriever, JsonRecordStore};
    use chrono::NaiveDate;

    fn student() -> Student {
        Student {
            student_id: "2023001".into(),
            name: "김학생".into(),
            major_code: "국어국문학과".into(),
            admission_year: 2023,
            completed_semester: 4,
        }
    }

    fn course(code: &str, name: &str, year: i32, term: u8) -> Course {
        Course {
            course_code: code.into(),
            course_name: name.into(),
            credits: 3,
            course_type: CourseType::MajorRequired,
            department_code: "국어국문학과".into(),
            professor: Some("김철수".into()),
            target_grade: TargetGrade::All,
            offered_year: year,
            offered_semester: term,
            prerequisites: Vec::new(),
        }
    }

    fn record(code: &str) -> EnrollmentRecord {
        EnrollmentRecord {
            student_id: "2023001".into(),
            course_code: code.into(),
            enrollment_type: "major_required".into(),
            earned_credits: 3,
            offering_department: "국어국문학과".into(),
            enrollment_semester: "2024-1".into(),
            grade: Some(Grade::A),
        }
    }

    fn snapshot() -> advisor_core::SemesterSnapshot {
        SemesterCalendar::info(NaiveDate::from_ymd_opt(2025, 4, 10).unwrap())
    }

    fn specialists<'a>(
        store: &'a JsonRecordStore,
        retriever: &'a FixtureRetriever,
        engine: &'a RecommendationEngine,
        snapshot: &'a advisor_core::SemesterSnapshot,
    ) -> Specialists<'a> {
        Specialists {
            store,
            retriever,
            engine,
            snapshot,
            retrieval_top_k: 5,
            similarity_threshold: 0.5,
        }
    }

    #[tokio::test]
    async fn student_context_includes_profile_and_stats() {
        let store = JsonRecordStore::from_records(
            vec![student()],
            vec![course("KL101-01", "현대시론", 2025, 1)],
            vec![record("KL101-01")],
        );
        let retriever = FixtureRetriever::from_contents(vec![]);
        let engine = RecommendationEngine::default();
        let snap = snapshot();
        let sp = specialists(&store, &retriever, &engine, &snap);
        let context = sp.student_context("2023001", "내 이수 현황 알려줘").await.unwrap();
        assert!(context.contains("김학생"));
        assert!(context.contains("취득 학점: 3학점"));
    }

    #[tokio::test]
    async fn missing_student_is_not_found() {
        let store = JsonRecordStore::from_records(vec![], vec![], vec![]);
        let retriever = FixtureRetriever::from_contents(vec![]);
        let engine = RecommendationEngine::default();
        let snap = snapshot();
        let sp = specialists(&store, &retriever, &engine, &snap);
        let err = sp.student_context("999", "내 정보").await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn graduation_context_falls_back_on_low_similarity() {
        let store = JsonRecordStore::from_records(vec![], vec![], vec![]);
        let retriever = FixtureRetriever::from_contents(vec!["기숙사 입주 안내 문서"]);
        let engine = RecommendationEngine::default();
        let snap = snapshot();
        let sp = specialists(&store, &retriever, &engine, &snap);
        let context = sp.graduation_context("졸업 요건 알려줘").await.unwrap();
        assert!(context.contains("참고 정보"));
    }

    #[tokio::test]
    async fn graduation_context_uses_confident_passages() {
        let store = JsonRecordStore::from_records(vec![], vec![], vec![]);
        let retriever =
            FixtureRetriever::from_contents(vec!["졸업 요건 알려줘 총 130 학점", "기숙사 안내"]);
        let engine = RecommendationEngine::default();
        let snap = snapshot();
        let sp = specialists(&store, &retriever, &engine, &snap);
        let context = sp.graduation_context("졸업 요건 알려줘").await.unwrap();
        assert!(context.contains("130"));
        assert!(!context.contains("기숙사"));
    }

    #[tokio::test]
    async fn next_semester_keyword_uses_calendar() {
        let store = JsonRecordStore::from_records(
            vec![],
            vec![
                course("KL201-01", "고전문학", 2025, 2),
                course("KL202-01", "현대소설", 2025, 1),
            ],
            vec![],
        );
        let retriever = FixtureRetriever::from_contents(vec![]);
        let engine = RecommendationEngine::default();
        let snap = snapshot();
        let sp = specialists(&store, &retriever, &engine, &snap);
        // April 2025: next semester is 2025 term 2
        let context = sp.course_context("다음 학기 개설 과목 알려줘").await.unwrap();
        assert!(context.contains("고전문학"));
        assert!(!context.contains("현대소설"));
    }

    #[tokio::test]
    async fn unrecognizable_course_question_yields_usage_guide() {
        let store = JsonRecordStore::from_records(vec![], vec![], vec![]);
        let retriever = FixtureRetriever::from_contents(vec![]);
        let engine = RecommendationEngine::default();
        let snap = snapshot();
        let sp = specialists(&store, &retriever, &engine, &snap);
        let err = sp.course_context("음 뭔가 좀").await.unwrap_err();
        match err {
            Error::AmbiguousQuery { guide } => assert!(guide.contains("강의 검색 예시")),
            other => panic!("unexpected: {other}"),
        }
    }

    #[tokio::test]
    async fn recommendation_context_reports_progress_and_picks() {
        let store = JsonRecordStore::from_records(
            vec![student()],
            vec![course("KL301-01", "문학비평", 2025, 2)],
            vec![record("KL101-01")],
        );
        let retriever = FixtureRetriever::from_contents(vec![]);
        let engine = RecommendationEngine::default();
        let snap = snapshot();
        let sp = specialists(&store, &retriever, &engine, &snap);
        let context = sp.recommendation_context("2023001").await.unwrap();
        assert!(context.contains("졸업 요건 진행 상황"));
        assert!(context.contains("문학비평"));
    }
}
