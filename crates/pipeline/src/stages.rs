//! Fixed stage templates per intent.
//!
//! Each intent resolves to an ordered stage list through a lookup table.
//! Stage instructions are plain data; most carry the literal question
//! text, while the comprehensive pipeline uses fixed instructions and
//! feeds earlier stage outputs forward instead.

use advisor_core::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialist {
    StudentLookup,
    GraduationLookup,
    CourseLookup,
    Recommendation,
    Summary,
}

impl Specialist {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialist::StudentLookup => "student_expert",
            Specialist::GraduationLookup => "graduation_expert",
            Specialist::CourseLookup => "course_expert",
            Specialist::Recommendation => "recommendation_expert",
            Specialist::Summary => "summary_expert",
        }
    }
}

impl std::fmt::Display for Specialist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StageTemplate {
    pub specialist: Specialist,
    pub instruction: &'static str,
    pub expected_output: &'static str,
    pub append_question: bool,
}

impl StageTemplate {
    pub fn instruction_for(&self, question: &str) -> String {
        if self.append_question {
            format!("{}: {question}", self.instruction)
        } else {
            self.instruction.to_string()
        }
    }
}

const fn stage(
    specialist: Specialist,
    instruction: &'static str,
    expected_output: &'static str,
    append_question: bool,
) -> StageTemplate {
    StageTemplate {
        specialist,
        instruction,
        expected_output,
        append_question,
    }
}

static COMPREHENSIVE: [StageTemplate; 4] = [
    stage(
        Specialist::StudentLookup,
        "학생의 기본 정보와 수강 이력을 조회하고 분석해주세요",
        "학생의 기본 정보, 수강 이력, 취득 학점 현황",
        false,
    ),
    stage(
        Specialist::GraduationLookup,
        "해당 학생의 졸업 요건을 상세히 조회해주세요",
        "학과별, 입학년도별 상세한 졸업 요건 정보",
        false,
    ),
    stage(
        Specialist::Recommendation,
        "앞선 정보를 바탕으로 수강 추천을 제공해주세요",
        "개인화된 수강 추천 및 로드맵",
        false,
    ),
    stage(
        Specialist::Summary,
        "앞선 전문가들의 정보를 바탕으로 간단한 요약과 조언을 제공해주세요",
        "종합적인 요약 및 실행 가이드",
        false,
    ),
];

static GRADUATION: [StageTemplate; 1] = [stage(
    Specialist::GraduationLookup,
    "졸업 요건 정보를 상세히 조회해주세요",
    "상세한 졸업 요건 정보",
    true,
)];

static RECOMMENDATION: [StageTemplate; 3] = [
    stage(
        Specialist::StudentLookup,
        "수강 추천을 위한 학생 정보를 조회해주세요",
        "학생 현황 정보",
        true,
    ),
    stage(
        Specialist::Recommendation,
        "개인화된 수강 추천을 제공해주세요",
        "구체적인 수강 추천",
        true,
    ),
    stage(
        Specialist::Summary,
        "추천 정보를 요약하여 최종 가이드를 제공해주세요",
        "수강 추천 요약 가이드",
        true,
    ),
];

static COURSE: [StageTemplate; 1] = [stage(
    Specialist::CourseLookup,
    "강의 정보를 검색해주세요",
    "강의 정보 및 세부사항",
    true,
)];

static STUDENT: [StageTemplate; 1] = [stage(
    Specialist::StudentLookup,
    "학생 정보를 조회하고 분석해주세요",
    "학생 정보 및 현황 분석",
    true,
)];

// Unclassified questions route to the graduation specialist. Most
// free-form advising questions end up being requirement questions.
static GENERAL: [StageTemplate; 1] = [stage(
    Specialist::GraduationLookup,
    "다음 질문에 답변해주세요",
    "질문에 대한 정확한 답변",
    true,
)];

pub fn stages_for(intent: Intent) -> &'static [StageTemplate] {
    match intent {
        Intent::Comprehensive => &COMPREHENSIVE,
        Intent::Graduation => &GRADUATION,
        Intent::Recommendation => &RECOMMENDATION,
        Intent::Course => &COURSE,
        Intent::Student => &STUDENT,
        Intent::General => &GENERAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comprehensive_runs_four_stages_in_order() {
        let stages = stages_for(Intent::Comprehensive);
        let specialists: Vec<Specialist> = stages.iter().map(|s| s.specialist).collect();
        assert_eq!(
            specialists,
            vec![
                Specialist::StudentLookup,
                Specialist::GraduationLookup,
                Specialist::Recommendation,
                Specialist::Summary,
            ]
        );
    }

    #[test]
    fn single_stage_intents() {
        assert_eq!(stages_for(Intent::Graduation).len(), 1);
        assert_eq!(stages_for(Intent::Course).len(), 1);
        assert_eq!(stages_for(Intent::Student).len(), 1);
    }

    #[test]
    fn general_falls_back_to_graduation_lookup() {
        let stages = stages_for(Intent::General);
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].specialist, Specialist::GraduationLookup);
    }

    #[test]
    fn question_templating() {
        let stages = stages_for(Intent::Graduation);
        let instruction = stages[0].instruction_for("논문 요건 알려줘");
        assert!(instruction.ends_with(": 논문 요건 알려줘"));

        let fixed = stages_for(Intent::Comprehensive)[0].instruction_for("무시됨");
        assert!(!fixed.contains("무시됨"));
    }
}
