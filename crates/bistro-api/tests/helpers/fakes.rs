//! In-memory stand-ins for the document store and the content service.

use async_trait::async_trait;
use bistro_content::ContentSource;
use bistro_core::{
    models::{BusinessRecord, MenuEntry, NewBusiness},
    AppError,
};
use bistro_db::BusinessStore;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct FakeStore {
    records: Mutex<Vec<BusinessRecord>>,
    fail: bool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes and pings always fail.
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn records(&self) -> Vec<BusinessRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl BusinessStore for FakeStore {
    async fn save(&self, business: NewBusiness) -> Result<BusinessRecord, AppError> {
        if self.fail {
            return Err(AppError::Internal("document store unavailable".to_string()));
        }
        let record = business.into_record(Uuid::new_v4(), chrono::Utc::now());
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Internal("document store unavailable".to_string()));
        }
        Ok(())
    }
}

pub struct FakeContent {
    entries: Vec<serde_json::Value>,
}

impl FakeContent {
    pub fn with_entries(entries: Vec<serde_json::Value>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl ContentSource for FakeContent {
    async fn list_entries(&self, content_type: &str) -> Result<Vec<MenuEntry>, AppError> {
        assert_eq!(content_type, "menuItem");
        Ok(self.entries.iter().cloned().map(MenuEntry::from).collect())
    }
}
