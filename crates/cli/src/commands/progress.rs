use advisor_config::AppConfig;
use advisor_core::{EnrollmentConditions, RecordStore};
use advisor_engine::{GraduationProgress, ProgressThresholds};
use advisor_pipeline::completed_courses;
use advisor_pipeline::format;
use advisor_store::JsonRecordStore;

pub async fn run(student_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("config error: {e}"))?;
    let store = JsonRecordStore::load(&config.data_dir).map_err(|e| format!("data error: {e}"))?;

    let Some(student) = store.student(student_id).await? else {
        println!("조회된 데이터가 없습니다: 학번 {student_id}");
        return Ok(());
    };

    let records = store
        .enrollments(student_id, &EnrollmentConditions::default())
        .await?;
    let completed = completed_courses(&records);
    let thresholds = ProgressThresholds {
        total: config.recommendation.required_total,
        major: config.recommendation.required_major,
        liberal: config.recommendation.required_liberal,
    };
    let progress = GraduationProgress::assess(&student.major_code, &completed, thresholds);

    println!("{}", format::student_profile(&student));
    println!();
    println!("{}", format::progress_block(&progress));
    Ok(())
}
