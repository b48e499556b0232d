use std::path::PathBuf;
use std::time::Duration;

use deadpool_diesel::postgres::{Manager, Pool};
use utils::image::ImageStore;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,

	pub server_address:  String,
	pub request_timeout: Duration,

	pub upload_dir:        PathBuf,
	pub static_url_prefix: String,
	pub max_upload_bytes:  usize,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_var_or(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	fn parse_env_var_or<T: std::str::FromStr>(var: &str, default: T) -> T {
		match std::env::var(var) {
			Ok(v) => {
				v.parse().unwrap_or_else(|_| panic!("{var} must be a number"))
			},
			Err(_) => default,
		}
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if a required environment variable is missing or a numeric one
	/// can not be parsed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");

		let server_address = Self::get_env_var_or("SERVER_ADDRESS", "0.0.0.0:80");
		let request_timeout = Duration::from_secs(Self::parse_env_var_or(
			"REQUEST_TIMEOUT_SECONDS",
			10,
		));

		let upload_dir =
			PathBuf::from(Self::get_env_var_or("UPLOAD_DIR", "static/images"));
		let static_url_prefix =
			Self::get_env_var_or("STATIC_URL_PREFIX", "/static/images");
		let max_upload_bytes =
			Self::parse_env_var_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024);

		Self {
			database_url,
			server_address,
			request_timeout,
			upload_dir,
			static_url_prefix,
			max_upload_bytes,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}

	/// Create the [`ImageStore`] drawings are written to
	#[must_use]
	pub fn create_image_store(&self) -> ImageStore {
		ImageStore::new(&self.upload_dir, &self.static_url_prefix)
	}
}
