use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::AppError;
use crate::persistence::{PersistedRecord, RecordSink};

/// Appends one JSON object per line to a local file.
///
/// Each record is serialized up front and written with a single `write_all` on a file
/// opened in append mode. The mutex serializes writers within this process.
pub struct JsonlRecordSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlRecordSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSink for JsonlRecordSink {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn append(&self, record: &PersistedRecord) -> Result<(), AppError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        debug!(
            "Appended record {} to {}",
            record.record_id,
            self.path.display()
        );
        Ok(())
    }
}
