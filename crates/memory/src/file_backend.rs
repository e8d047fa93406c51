//! File-per-student turn persistence.

use std::path::{Path, PathBuf};

use advisor_core::{ConversationTurn, MemoryError, TurnStore};
use async_trait::async_trait;
use tracing::debug;

/// Stores each student's history as `<dir>/<student_id>.json`. Saves are
/// written to a temp file and renamed so a crash never leaves a
/// half-written history behind.
pub struct FileTurnStore {
    dir: PathBuf,
}

impl FileTurnStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, student_id: &str) -> PathBuf {
        let safe: String = student_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl TurnStore for FileTurnStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self, student_id: &str) -> Result<Vec<ConversationTurn>, MemoryError> {
        let path = self.path_for(student_id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| MemoryError::Corrupted(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(MemoryError::Storage(e.to_string())),
        }
    }

    async fn save(&self, student_id: &str, turns: &[ConversationTurn]) -> Result<(), MemoryError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        let path = self.path_for(student_id);
        let bytes = serde_json::to_vec_pretty(turns).map_err(|e| MemoryError::Storage(e.to_string()))?;
        let tmp = tmp_path(&path);
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;
        debug!(student_id, turns = turns.len(), "history saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
