use advisor_config::AppConfig;

pub async fn run(student_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("config error: {e}"))?;
    let turns = super::turn_store(&config).await?;

    let history = turns.load(student_id).await?;
    if history.is_empty() {
        println!("학번 {student_id}의 저장된 대화가 없습니다.");
        return Ok(());
    }

    println!("학번 {student_id} 대화 이력 ({}건)", history.len());
    for (i, turn) in history.iter().enumerate() {
        println!();
        println!(
            "{}. [{}] {}",
            i + 1,
            turn.timestamp.format("%Y-%m-%d %H:%M"),
            turn.intent
        );
        println!("   질문: {}", turn.question);
        println!("   답변: {}", turn.answer);
    }
    Ok(())
}
