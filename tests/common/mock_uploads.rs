use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A temporary upload directory RAII guard
pub struct UploadDirGuard {
	path: PathBuf,
}

#[allow(dead_code)]
impl UploadDirGuard {
	/// Create a fresh, empty upload directory
	///
	/// # Panics
	/// Panics if the directory can not be created
	pub fn new() -> Self {
		let path = std::env::temp_dir()
			.join(format!("test_uploads_{}", Uuid::new_v4().simple()));

		std::fs::create_dir_all(&path).expect("could not create upload dir");

		Self { path }
	}

	pub fn path(&self) -> &Path { &self.path }

	/// Number of files currently stored in the directory
	pub fn file_count(&self) -> usize {
		std::fs::read_dir(&self.path).map(Iterator::count).unwrap_or(0)
	}
}

impl Drop for UploadDirGuard {
	fn drop(&mut self) { let _ = std::fs::remove_dir_all(&self.path); }
}
