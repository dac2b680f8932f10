//! Analysis Store: injected record of completed gateway analyses.
//!
//! Diagnostic only: records are appended after each successful extraction
//! and never surfaced through the HTTP API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub job_description: String,
    pub user_skills: Vec<String>,
    pub required_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl AnalysisRecord {
    pub fn new(
        job_description: &str,
        user_skills: &[String],
        required_skills: &[String],
        missing_skills: &[String],
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            job_description: job_description.to_string(),
            user_skills: user_skills.to_vec(),
            required_skills: required_skills.to_vec(),
            missing_skills: missing_skills.to_vec(),
        }
    }
}

/// Storage capability. Carried in `AppState` as `Arc<dyn AnalysisStore>`.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Appends a record and returns the number of stored records.
    async fn append(&self, record: AnalysisRecord) -> usize;
    async fn list(&self) -> Vec<AnalysisRecord>;
}

/// Process-lifetime, append-only store. Nothing is persisted.
#[derive(Default)]
pub struct InMemoryAnalysisStore {
    records: RwLock<Vec<AnalysisRecord>>,
}

#[async_trait]
impl AnalysisStore for InMemoryAnalysisStore {
    async fn append(&self, record: AnalysisRecord) -> usize {
        let mut records = self.records.write().await;
        records.push(record);
        records.len()
    }

    async fn list(&self) -> Vec<AnalysisRecord> {
        self.records.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(jd: &str) -> AnalysisRecord {
        AnalysisRecord::new(
            jd,
            &["react".to_string()],
            &["React".to_string(), "SQL".to_string()],
            &["SQL".to_string()],
        )
    }

    #[tokio::test]
    async fn test_append_returns_running_count() {
        let store = InMemoryAnalysisStore::default();
        assert_eq!(store.append(record("first")).await, 1);
        assert_eq!(store.append(record("second")).await, 2);
    }

    #[tokio::test]
    async fn test_list_preserves_append_order() {
        let store = InMemoryAnalysisStore::default();
        store.append(record("first")).await;
        store.append(record("second")).await;

        let listed = store.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].job_description, "first");
        assert_eq!(listed[1].job_description, "second");
        assert_ne!(listed[0].id, listed[1].id);
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = InMemoryAnalysisStore::default();
        assert!(store.list().await.is_empty());
    }
}
