use std::sync::LazyLock;

use common::{DbConn, DbPool};
use deadpool_diesel::Runtime;
use deadpool_diesel::postgres::{Manager, Pool};
use diesel::RunQueryDsl;
use doodle_gallery::run_migrations;
use uuid::Uuid;

/// Shared handle on the Postgres server named by `DATABASE_URL`
pub static DATABASE_PROVIDER: LazyLock<DatabaseProvider> =
	LazyLock::new(DatabaseProvider::new);

/// Hands out throwaway databases on the test server
pub struct DatabaseProvider {
	server_url: String,
	admin_pool: DbPool,
}

/// A throwaway database, dropped together with this guard
pub struct DatabaseGuard {
	admin_conn: DbConn,
	name:       String,
	url:        String,
}

fn build_pool(url: &str) -> DbPool {
	let manager = Manager::new(url.to_string(), Runtime::Tokio1);

	Pool::builder(manager).build().expect("could not build test pool")
}

async fn execute(conn: &DbConn, statement: String) {
	conn.interact(move |conn| diesel::sql_query(statement).execute(conn))
		.await
		.expect("could not reach the test server")
		.expect("could not run admin statement");
}

impl DatabaseProvider {
	fn new() -> Self {
		if std::env::var("CI").is_ok_and(|v| v == "true") {
			tracing_subscriber::fmt()
				.pretty()
				.with_max_level(tracing::Level::DEBUG)
				.init();
		}

		let database_url =
			std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
		let (server_url, _) = database_url
			.rsplit_once('/')
			.expect("DATABASE_URL must name a database");

		Self {
			server_url: server_url.to_string(),
			admin_pool: build_pool(&database_url),
		}
	}

	/// Create an empty database and return its guard
	///
	/// # Panics
	/// Panics if the database can not be created
	pub(crate) async fn acquire(&self) -> DatabaseGuard {
		let name = format!("test_{}", Uuid::new_v4().simple());
		let url = format!("{}/{name}", self.server_url);

		let admin_conn = self
			.admin_pool
			.get()
			.await
			.expect("could not get admin connection");

		execute(&admin_conn, format!("CREATE DATABASE {name};")).await;

		DatabaseGuard { admin_conn, name, url }
	}
}

impl DatabaseGuard {
	/// A pool on this database with the schema already migrated
	///
	/// # Panics
	/// Panics if migrating fails
	pub async fn create_pool(&self) -> DbPool {
		let pool = build_pool(&self.url);

		run_migrations(&pool).await.expect("could not migrate test database");

		pool
	}
}

impl Drop for DatabaseGuard {
	fn drop(&mut self) {
		let statement = format!("DROP DATABASE {} WITH (FORCE);", self.name);

		futures::executor::block_on(execute(&self.admin_conn, statement));
	}
}
