//! Text rendering for stage context blocks.

use advisor_core::{Course, EnrollmentRecord, Semester, Student};
use advisor_engine::{GraduationProgress, RecommendationOutcome};

pub const COURSE_LIST_LIMIT: usize = 10;
pub const ENROLLMENT_LIST_LIMIT: usize = 15;

pub fn course_list(courses: &[Course], title: &str) -> String {
    if courses.is_empty() {
        return "조회된 강의가 없습니다.".to_string();
    }
    let total = courses.len();
    let lines: Vec<String> = courses
        .iter()
        .take(COURSE_LIST_LIMIT)
        .enumerate()
        .map(|(i, c)| {
            let mut line = format!(
                "{}. [{}] {} ({}학점) - {}",
                i + 1,
                c.course_code,
                c.course_name,
                c.credits,
                c.department_code
            );
            if let Some(professor) = &c.professor {
                line.push_str(&format!(" - {professor} 교수"));
            }
            line
        })
        .collect();
    if total > COURSE_LIST_LIMIT {
        format!(
            "총 {total}개 중 상위 {COURSE_LIST_LIMIT}개 표시:\n{}",
            lines.join("\n")
        )
    } else {
        format!("{title} ({total}개):\n{}", lines.join("\n"))
    }
}

pub fn enrollment_list(records: &[EnrollmentRecord], title: &str) -> String {
    if records.is_empty() {
        return "조회된 수강 이력이 없습니다.".to_string();
    }
    let total = records.len();
    let lines: Vec<String> = records
        .iter()
        .take(ENROLLMENT_LIST_LIMIT)
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. [{}] {} / {}학점 / {}",
                i + 1,
                r.course_code,
                r.enrollment_semester,
                r.earned_credits,
                r.grade.map(|g| g.as_str()).unwrap_or("수강중")
            )
        })
        .collect();
    if total > ENROLLMENT_LIST_LIMIT {
        format!(
            "총 {total}개 중 상위 {ENROLLMENT_LIST_LIMIT}개 표시:\n{}",
            lines.join("\n")
        )
    } else {
        format!("{title} ({total}건):\n{}", lines.join("\n"))
    }
}

pub fn student_profile(student: &Student) -> String {
    format!(
        "=== 학생 정보 ===\n학번: {}\n이름: {}\n학과: {}\n입학년도: {}\n이수 학기: {}",
        student.student_id,
        student.name,
        student.major_code,
        student.admission_year,
        student.completed_semester
    )
}

/// Credit totals and GPA over graded records only.
pub fn enrollment_stats(records: &[EnrollmentRecord]) -> String {
    let completed: Vec<&EnrollmentRecord> = records.iter().filter(|r| r.is_completed()).collect();
    let earned: u32 = completed.iter().map(|r| u32::from(r.earned_credits)).sum();
    let graded: Vec<(f32, u32)> = records
        .iter()
        .filter_map(|r| r.grade.map(|g| (g.points(), u32::from(r.earned_credits))))
        .collect();
    let gpa = if graded.is_empty() {
        0.0
    } else {
        let weighted: f32 = graded.iter().map(|(p, c)| p * *c as f32).sum();
        let credits: u32 = graded.iter().map(|(_, c)| c).sum();
        if credits == 0 { 0.0 } else { weighted / credits as f32 }
    };
    format!(
        "=== 이수 현황 ===\n전체 수강: {}건\n이수 완료: {}건\n취득 학점: {earned}학점\n평점: {gpa:.2}",
        records.len(),
        completed.len()
    )
}

pub fn progress_block(progress: &GraduationProgress) -> String {
    format!(
        "=== 졸업 요건 진행 상황 ===\n\
         총 이수 학점: {}/{} (잔여: {}학점)\n\
         전공 학점: {}/{} (잔여: {}학점)\n\
         교양 학점: {}/{} (잔여: {}학점)",
        progress.total_credits,
        progress.thresholds.total,
        progress.remaining_total(),
        progress.major_credits,
        progress.thresholds.major,
        progress.remaining_major(),
        progress.liberal_credits,
        progress.thresholds.liberal,
        progress.remaining_liberal()
    )
}

pub fn recommendation_block(
    student: &Student,
    outcome: &RecommendationOutcome,
    semester: Semester,
    max_credits: u8,
) -> String {
    if outcome.recommendations.is_empty() {
        return format!(
            "{}\n\n죄송합니다. {semester}에 추천할 수 있는 과목을 찾을 수 없습니다.",
            progress_block(&outcome.progress)
        );
    }
    let mut result = format!(
        "=== {}님의 {semester} 수강 추천 ===\n\n{}\n\n추천 과목 ({max_credits}학점 기준):\n",
        student.name,
        progress_block(&outcome.progress)
    );
    for (i, rec) in outcome.recommendations.iter().enumerate() {
        result.push_str(&format!(
            "{}. [{}] {} ({}학점) - {}\n",
            i + 1,
            rec.course.course_code,
            rec.course.course_name,
            rec.course.credits,
            rec.reason
        ));
    }
    result.push_str(&format!("\n추천 학점 합계: {}학점", outcome.recommended_credits));
    result
}

pub fn course_usage_guide() -> &'static str {
    "강의 검색 예시:\n\
     - '3학년 과목 중 한국역사학과 개설 강의 알려줘'\n\
     - '심리학 관련 강의 검색해줘'\n\
     - '김철수 교수의 강의를 알려줘'\n\
     - '컴퓨터 관련 강의 찾아줘'\n\
     - '다음 학기 개설 과목 알려줘'\n\
     - '국문학과 관련 강의 검색해줘'"
}
