use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Persistence collaborator for the five output documents. Each document is
/// handed over fully materialized; a sink never sees a partial collection.
pub trait ArtifactSink: Send + Sync {
    /// Write one named document, replacing any previous version
    fn write_document(&self, name: &str, document: &Value) -> Result<()>;
}

/// Writes each document as pretty-printed `<name>.json` under one directory
pub struct JsonDirSink {
    output_dir: PathBuf,
}

impl JsonDirSink {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn document_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.json"))
    }
}

impl ArtifactSink for JsonDirSink {
    fn write_document(&self, name: &str, document: &Value) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;

        // Serialize fully before touching the file, so a failed run never
        // leaves a half-written artifact behind
        let json_content = serde_json::to_string_pretty(document)?;
        let filepath = self.document_path(name);
        fs::write(&filepath, json_content)?;

        debug!("Wrote document {} to {}", name, filepath.display());
        Ok(())
    }
}

/// In-memory sink for tests
pub struct InMemorySink {
    documents: Mutex<HashMap<String, Value>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.documents.lock().unwrap().get(name).cloned()
    }

    pub fn document_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.documents.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactSink for InMemorySink {
    fn write_document(&self, name: &str, document: &Value) -> Result<()> {
        self.documents
            .lock()
            .unwrap()
            .insert(name.to_string(), document.clone());
        Ok(())
    }
}
