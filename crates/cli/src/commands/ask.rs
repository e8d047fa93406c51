use std::sync::Arc;

use advisor_config::AppConfig;
use advisor_pipeline::Orchestrator;
use advisor_store::{FixtureRetriever, JsonRecordStore, StaticGenerator};

pub async fn run(student_id: &str, question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("config error: {e}"))?;

    let store = JsonRecordStore::load(&config.data_dir).map_err(|e| {
        format!(
            "data error: {e}\n`advisor onboard`를 먼저 실행해 샘플 데이터를 생성하세요."
        )
    })?;
    let retriever = FixtureRetriever::load(&config.data_dir.join("requirements.json"))
        .map_err(|e| format!("data error: {e}"))?;
    let generator = StaticGenerator::new(config.generation.model.clone());
    let turns = super::turn_store(&config).await?;

    let orchestrator = Orchestrator::new(
        Arc::new(store),
        Arc::new(generator),
        Arc::new(retriever),
        turns,
        &config,
    );

    match orchestrator.ask(student_id, question).await {
        Ok(answer) => {
            println!("[{}]", answer.intent);
            println!("{}", answer.answer);
            Ok(())
        }
        Err(e) => {
            if let Some(message) = e.user_message() {
                println!("{message}");
                Ok(())
            } else {
                Err(e.into())
            }
        }
    }
}
