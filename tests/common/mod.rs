use std::path::PathBuf;

use axum_test::{TestResponse, TestServer};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::DbPool;
use doodle_gallery::{AppState, Config, routes};
use image_record::{ImageRecord, NewImageRecord};

mod mock_db;
mod mock_uploads;

use mock_db::{DATABASE_PROVIDER, DatabaseGuard};
use mock_uploads::UploadDirGuard;

/// A 1x1 transparent PNG
#[allow(dead_code)]
pub const PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// A 1x1 opaque PNG
#[allow(dead_code)]
pub const OTHER_PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAIAAACQd1PeAAAADElEQVR42mP4z8AAAAMBAQD3A0FDAAAAAElFTkSuQmCC";

/// Wrap a base64 PNG the way the canvas page does
#[allow(dead_code)]
pub fn data_uri(png: &str) -> String { format!("data:image/png;base64,{png}") }

/// Decode one of the PNG constants
#[allow(dead_code)]
pub fn png_bytes(png: &str) -> Vec<u8> { STANDARD.decode(png).unwrap() }

#[allow(dead_code)]
pub struct TestEnv {
	pub app:          TestServer,
	pub pool:         DbPool,
	pub db_guard:     DatabaseGuard,
	pub upload_guard: UploadDirGuard,
}

#[allow(dead_code)]
impl TestEnv {
	/// Get a test environment with a fresh database and upload directory
	///
	/// # Panics
	/// Panics if building the test server fails
	pub async fn new() -> Self {
		let upload_guard = UploadDirGuard::new();

		let mut config = Config::from_env();
		config.upload_dir = upload_guard.path().to_path_buf();
		config.static_url_prefix = "/static/images".to_string();

		let db_guard = (*DATABASE_PROVIDER).acquire().await;
		let pool = db_guard.create_pool().await;

		let state = AppState::new(config, pool.clone());
		let app = routes::get_app_router(state);

		let test_server = TestServer::builder().build(app).unwrap();

		TestEnv { app: test_server, pool, db_guard, upload_guard }
	}

	/// Submit a drawing through the save endpoint
	pub async fn submit(&self, png: &str, nickname: &str) -> TestResponse {
		self.app
			.post("/save")
			.json(&serde_json::json!({
				"image": data_uri(png),
				"nickname": nickname,
			}))
			.await
	}

	/// Insert a record directly, bypassing the API
	pub async fn insert(&self, record: NewImageRecord) -> ImageRecord {
		let conn = self.pool.get().await.unwrap();

		record.insert(&conn).await.unwrap()
	}

	/// Location on disk of a stored image given its public filename
	pub fn stored_file(&self, filename: &str) -> PathBuf {
		let name = filename.strip_prefix("/static/images/").unwrap();

		self.upload_guard.path().join(name)
	}
}
