use maskprime_core::ResultRecord;
use maskprime_experiment::{ResultSink, SequenceError};
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;

/// Accumulates result rows in memory and writes them as one JSON document
/// when the send step flushes. Single best-effort flush, no partial
/// recovery.
pub struct JsonSink {
    path: PathBuf,
    participant: Option<String>,
    records: Vec<ResultRecord>,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            participant: None,
            records: Vec::new(),
        }
    }
}

impl ResultSink for JsonSink {
    fn record(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    fn set_participant(&mut self, id: String) {
        self.participant = Some(id);
    }

    fn flush(&mut self) -> Result<(), SequenceError> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(
            file,
            &json!({
                "participant": self.participant,
                "results": self.records,
            }),
        )?;
        log::info!(
            "wrote {} result rows to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }
}
