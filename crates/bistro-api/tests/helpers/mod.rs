//! Test helpers: build AppState and router for integration tests.
//!
//! The document store and content service are in-memory fakes; uploads, temp
//! files and public assets live in per-test temp directories.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

use axum_test::TestServer;
use bistro_api::setup::routes;
use bistro_api::state::{AppState, UploadConfig};
use bistro_content::ContentSource;
use bistro_core::{constants::UPLOADS_URL_PREFIX, Config};
use bistro_processing::ImageNormalizer;
use bistro_storage::LocalStorage;
use fakes::{FakeContent, FakeStore};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server, fakes and owned directories.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<FakeStore>,
    pub uploads_dir: TempDir,
    pub temp_dir: TempDir,
    pub public_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_files(&self) -> Vec<String> {
        list_files(self.uploads_dir.path())
    }

    pub fn temp_files(&self) -> Vec<String> {
        list_files(self.temp_dir.path())
    }
}

fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Setup test app with a working store and an empty menu.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(FakeStore::new(), Arc::new(FakeContent::with_entries(vec![]))).await
}

pub async fn setup_test_app_with(store: FakeStore, content: Arc<dyn ContentSource>) -> TestApp {
    let uploads_dir = tempfile::tempdir().expect("Failed to create uploads dir");
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let public_dir = tempfile::tempdir().expect("Failed to create public dir");

    let config = create_test_config(uploads_dir.path(), temp_dir.path(), public_dir.path());

    let storage = LocalStorage::new(&config.uploads_dir, UPLOADS_URL_PREFIX)
        .await
        .expect("Failed to create local storage");

    let store = Arc::new(store);
    let state = Arc::new(AppState {
        store: store.clone(),
        content,
        storage: Arc::new(storage),
        normalizer: ImageNormalizer::new(&config.image),
        upload: UploadConfig {
            temp_dir: config.upload_temp_dir.clone(),
        },
        menu_content_type: config.content.menu_content_type.clone(),
        production: config.is_production(),
    });

    let router = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        store,
        uploads_dir,
        temp_dir,
        public_dir,
    }
}

pub fn create_test_config(uploads: &Path, temp: &Path, public: &Path) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("UPLOADS_DIR", uploads.display().to_string()),
        ("UPLOAD_TEMP_DIR", temp.display().to_string()),
        ("PUBLIC_DIR", public.display().to_string()),
        ("MAX_UPLOAD_SIZE_MB", "2".to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).expect("Failed to build test config")
}
