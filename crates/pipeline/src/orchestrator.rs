//! End-to-end question handling.
//!
//! One question runs as a strictly sequential stage pipeline. Requests
//! for the same student are serialized through a per-student mutex so
//! the bounded history never loses an update; requests for different
//! students proceed independently. The conversation turn is written only
//! after every stage has completed.

use std::collections::HashMap;
use std::sync::Arc;

use advisor_config::AppConfig;
use advisor_core::{
    Generator, GenerationRequest, Intent, RecordStore, RequirementRetriever, Result,
    SemesterCalendar, SemesterSnapshot, TurnStore,
};
use advisor_engine::{ProgressThresholds, RecommendationEngine};
use advisor_memory::ConversationMemory;
use advisor_nlu::{IntentClassifier, QueryValidator};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::specialists::Specialists;
use crate::stages::{self, Specialist};

#[derive(Debug, Clone)]
pub struct PipelineAnswer {
    pub intent: Intent,
    pub answer: String,
}

pub struct Orchestrator {
    store: Arc<dyn RecordStore>,
    generator: Arc<dyn Generator>,
    retriever: Arc<dyn RequirementRetriever>,
    turns: Arc<dyn TurnStore>,
    engine: RecommendationEngine,
    retrieval_top_k: usize,
    similarity_threshold: f32,
    history_cap: usize,
    context_chars: usize,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        generator: Arc<dyn Generator>,
        retriever: Arc<dyn RequirementRetriever>,
        turns: Arc<dyn TurnStore>,
        config: &AppConfig,
    ) -> Self {
        Self {
            store,
            generator,
            retriever,
            turns,
            engine: RecommendationEngine {
                max_credits: config.recommendation.max_credits,
                pool_limit: config.recommendation.pool_limit,
                thresholds: ProgressThresholds {
                    total: config.recommendation.required_total,
                    major: config.recommendation.required_major,
                    liberal: config.recommendation.required_liberal,
                },
            },
            retrieval_top_k: config.retrieval.top_k,
            similarity_threshold: config.retrieval.similarity_threshold,
            history_cap: config.memory.history_cap,
            context_chars: config.memory.context_chars,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Answers one question for one student.
    #[instrument(skip_all, fields(student_id = %student_id))]
    pub async fn ask(&self, student_id: &str, question: &str) -> Result<PipelineAnswer> {
        QueryValidator::check(question)?;
        let intent = IntentClassifier::classify(question);
        info!(intent = %intent, "question accepted");

        let lock = self.student_lock(student_id).await;
        let _guard = lock.lock_owned().await;

        let mut memory = self.load_memory(student_id).await;
        let snapshot = SemesterCalendar::today();
        let answer = match self
            .run_stages(student_id, question, intent, &memory, &snapshot)
            .await
        {
            Ok(answer) => answer,
            // No-data and usage-guide replies are answers: they are
            // remembered like any other turn. Collaborator failures
            // still propagate and suppress the memory write.
            Err(e) => match e.user_message() {
                Some(text) => text,
                None => return Err(e),
            },
        };

        memory.record(question, &answer, intent);
        self.turns.save(student_id, memory.turns()).await?;

        Ok(PipelineAnswer { intent, answer })
    }

    /// Corrupted or missing history degrades to an empty one.
    async fn load_memory(&self, student_id: &str) -> ConversationMemory {
        let turns = match self.turns.load(student_id).await {
            Ok(turns) => turns,
            Err(e) => {
                warn!(error = %e, "history unreadable, starting empty");
                Vec::new()
            }
        };
        ConversationMemory::from_turns(turns, self.history_cap, self.context_chars)
    }

    async fn run_stages(
        &self,
        student_id: &str,
        question: &str,
        intent: Intent,
        memory: &ConversationMemory,
        snapshot: &SemesterSnapshot,
    ) -> Result<String> {
        let specialists = Specialists {
            store: self.store.as_ref(),
            retriever: self.retriever.as_ref(),
            engine: &self.engine,
            snapshot,
            retrieval_top_k: self.retrieval_top_k,
            similarity_threshold: self.similarity_threshold,
        };

        let mut prior: Vec<String> = Vec::new();
        let mut answer = String::new();
        for stage in stages::stages_for(intent) {
            let tool_context = match stage.specialist {
                Specialist::StudentLookup => {
                    specialists.student_context(student_id, question).await?
                }
                Specialist::GraduationLookup => specialists.graduation_context(question).await?,
                Specialist::CourseLookup => specialists.course_context(question).await?,
                Specialist::Recommendation => {
                    specialists.recommendation_context(student_id).await?
                }
                Specialist::Summary => String::new(),
            };

            let mut context = String::new();
            if !prior.is_empty() {
                context.push_str("이전 단계 결과:\n");
                context.push_str(&prior.join("\n\n"));
                context.push_str("\n\n");
            }
            context.push_str(&tool_context);

            let output = self
                .generator
                .generate(GenerationRequest {
                    role: self.role_for(stage.specialist, memory, snapshot),
                    instruction: stage.instruction_for(question),
                    context,
                })
                .await?;
            info!(specialist = %stage.specialist, "stage complete");
            prior.push(output.clone());
            answer = output;
        }
        Ok(answer)
    }

    /// Role text per specialist, in the register of an advising desk.
    /// Stages that personalize answers see recent conversation context.
    fn role_for(
        &self,
        specialist: Specialist,
        memory: &ConversationMemory,
        snapshot: &SemesterSnapshot,
    ) -> String {
        match specialist {
            Specialist::StudentLookup => {
                let mut role = format!(
                    "당신은 학생 데이터베이스 전문가입니다. 학생의 기본 정보, 수강 이력, 취득 학점 현황을 정확하게 조회하고 분석합니다.\n{}",
                    snapshot.context_line()
                );
                let context = memory.recent_context(2);
                if !context.is_empty() {
                    role.push_str("\n\n이전 대화 맥락:\n");
                    role.push_str(&context);
                }
                role
            }
            Specialist::GraduationLookup => {
                "당신은 졸업 요건 전문가입니다. 학과별, 입학년도별 졸업 요건을 정확하게 제공합니다."
                    .to_string()
            }
            Specialist::CourseLookup => format!(
                "당신은 강의 정보 전문가입니다. 강의 정보를 검색하고 도구의 출력을 그대로 전달합니다.\n{}",
                snapshot.context_line()
            ),
            Specialist::Recommendation => {
                let mut role = "당신은 수강 추천 전문가입니다. 졸업 요건 기반의 개인화된 수강 추천을 제공합니다."
                    .to_string();
                let context = memory.recent_context(2);
                if !context.is_empty() {
                    role.push_str("\n\n이전 대화 맥락을 고려한 추천:\n");
                    role.push_str(&context);
                }
                role
            }
            Specialist::Summary => {
                let mut role = format!(
                    "당신은 학사 상담 요약 전문가입니다. 수집된 정보를 간단히 요약하고 이전 대화 맥락을 고려하여 제공합니다.\n{}",
                    snapshot.context_line()
                );
                role.push_str("\n\n대화 요약:\n");
                role.push_str(&memory.summary());
                let context = memory.recent_context(3);
                if !context.is_empty() {
                    role.push_str("\n\n최근 대화 맥락:\n");
                    role.push_str(&context);
                }
                role
            }
        }
    }

    async fn student_lock(&self, student_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        // Entries no request holds anymore are dropped so the map does
        // not grow with every student id ever seen.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(student_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{
        Course, CourseType, EnrollmentRecord, Error, GenerationError, Grade, Student, TargetGrade,
    };
    use advisor_memory::InMemoryTurnStore;
    use advisor_store::{FixtureRetriever, JsonRecordStore};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns scripted outputs in order, then errors when exhausted.
    struct ScriptedGenerator {
        outputs: Mutex<VecDeque<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        fn new(outputs: &[&str]) -> Self {
            Self {
                outputs: Mutex::new(outputs.iter().map(|s| s.to_string()).collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Generator for ScriptedGenerator {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(
            &self,
            _request: GenerationRequest,
        ) -> std::result::Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outputs
                .lock()
                .await
                .pop_front()
                .ok_or_else(|| GenerationError::Failed("script exhausted".into()))
        }
    }

    fn student() -> Student {
        Student {
            student_id: "2023001".into(),
            name: "김학생".into(),
            major_code: "국어국문학과".into(),
            admission_year: 2023,
            completed_semester: 4,
        }
    }

    fn course(code: &str) -> Course {
        Course {
            course_code: code.into(),
            course_name: format!("{code} 강의"),
            credits: 3,
            course_type: CourseType::MajorRequired,
            department_code: "국어국문학과".into(),
            professor: None,
            target_grade: TargetGrade::All,
            offered_year: 2025,
            offered_semester: 2,
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

    fn orchestrator(
        generator: Arc<ScriptedGenerator>,
        turns: Arc<InMemoryTurnStore>,
    ) -> Orchestrator {
        let store = JsonRecordStore::from_records(
            vec![student()],
            vec![course("KL201-01"), course("KL202-01")],
            vec![record("KL101-01")],
        );
        let retriever = FixtureRetriever::from_contents(vec!["졸업 요건 총 130 학점 이수"]);
        Orchestrator::new(
            Arc::new(store),
            generator,
            Arc::new(retriever),
            turns,
            &AppConfig::default(),
        )
    }

    #[tokio::test]
    async fn comprehensive_pipeline_runs_all_four_stages() {
        let generator = Arc::new(ScriptedGenerator::new(&["s1", "s2", "s3", "최종 요약"]));
        let turns = Arc::new(InMemoryTurnStore::new());
        let orch = orchestrator(generator.clone(), turns.clone());

        let result = orch.ask("2023001", "내 상황 종합 분석 해줘").await.unwrap();
        assert_eq!(result.intent, Intent::Comprehensive);
        assert_eq!(result.answer, "최종 요약");
        assert_eq!(generator.call_count(), 4);

        let saved = turns.load("2023001").await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].answer, "최종 요약");
        assert_eq!(saved[0].intent, Intent::Comprehensive);
    }

    #[tokio::test]
    async fn validation_rejection_skips_pipeline_and_memory() {
        let generator = Arc::new(ScriptedGenerator::new(&["unused"]));
        let turns = Arc::new(InMemoryTurnStore::new());
        let orch = orchestrator(generator.clone(), turns.clone());

        let err = orch.ask("2023001", "DROP TABLE students").await.unwrap_err();
        assert!(err.user_message().is_some());
        assert_eq!(generator.call_count(), 0);
        assert!(turns.load("2023001").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stage_failure_suppresses_memory_write() {
        // Recommendation intent runs 3 stages; script only covers 2
        let generator = Arc::new(ScriptedGenerator::new(&["s1", "s2"]));
        let turns = Arc::new(InMemoryTurnStore::new());
        let orch = orchestrator(generator.clone(), turns.clone());

        let err = orch.ask("2023001", "다음학기 수강 추천해줘").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert!(turns.load("2023001").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_student_reply_is_recorded_as_turn() {
        let generator = Arc::new(ScriptedGenerator::new(&[]));
        let turns = Arc::new(InMemoryTurnStore::new());
        let orch = orchestrator(generator.clone(), turns.clone());

        let result = orch.ask("9999", "내 성적 조회해줘").await.unwrap();
        assert_eq!(result.intent, Intent::Student);
        assert!(result.answer.contains("조회된 데이터가 없습니다"));
        assert_eq!(generator.call_count(), 0);

        let saved = turns.load("9999").await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].answer, result.answer);
    }

    #[tokio::test]
    async fn idle_student_locks_are_evicted() {
        let generator = Arc::new(ScriptedGenerator::new(&[]));
        let turns = Arc::new(InMemoryTurnStore::new());
        let orch = orchestrator(generator, turns);

        {
            let lock = orch.student_lock("2023001").await;
            let _guard = lock.clone().lock_owned().await;
            // held entries survive lookups for other students
            orch.student_lock("2023002").await;
            assert!(orch.locks.lock().await.contains_key("2023001"));
        }

        orch.student_lock("2023003").await;
        let locks = orch.locks.lock().await;
        assert!(!locks.contains_key("2023001"));
        assert!(!locks.contains_key("2023002"));
        assert!(locks.contains_key("2023003"));
    }

    #[tokio::test]
    async fn general_question_routes_to_graduation_lookup() {
        let generator = Arc::new(ScriptedGenerator::new(&["졸업 안내"]));
        let turns = Arc::new(InMemoryTurnStore::new());
        let orch = orchestrator(generator.clone(), turns.clone());

        let result = orch.ask("2023001", "안녕하세요").await.unwrap();
        assert_eq!(result.intent, Intent::General);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn history_is_capped_after_many_turns() {
        let outputs: Vec<String> = (0..12).map(|i| format!("답변 {i}")).collect();
        let refs: Vec<&str> = outputs.iter().map(|s| s.as_str()).collect();
        let generator = Arc::new(ScriptedGenerator::new(&refs));
        let turns = Arc::new(InMemoryTurnStore::new());
        let orch = orchestrator(generator, turns.clone());

        for i in 0..11 {
            orch.ask("2023001", &format!("졸업 요건 질문 {i}")).await.unwrap();
        }
        let saved = turns.load("2023001").await.unwrap();
        assert_eq!(saved.len(), 10);
        assert!(saved[0].question.ends_with("질문 1"));
        assert!(saved[9].question.ends_with("질문 10"));
    }

    #[tokio::test]
    async fn concurrent_same_student_requests_both_land() {
        let generator = Arc::new(ScriptedGenerator::new(&["답변 a", "답변 b"]));
        let turns = Arc::new(InMemoryTurnStore::new());
        let orch = Arc::new(orchestrator(generator, turns.clone()));

        let a = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.ask("2023001", "졸업 요건 알려줘").await })
        };
        let b = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.ask("2023001", "졸업 학점 알려줘").await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(turns.load("2023001").await.unwrap().len(), 2);
    }
}

