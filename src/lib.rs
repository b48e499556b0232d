//! # Drawing gallery backend library

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use common::{DbPool, Error, InternalServerError};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use utils::image::ImageStore;

mod config;

pub mod controllers;
pub mod routes;
pub mod schemas;
pub mod templates;

pub use config::*;

/// Schema migrations compiled into the binary
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:        Config,
	pub database_pool: DbPool,
	pub image_store:   ImageStore,
}

impl AppState {
	#[must_use]
	pub fn new(config: Config, database_pool: DbPool) -> Self {
		let image_store = config.create_image_store();

		Self { config, database_pool, image_store }
	}
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}

impl FromRef<AppState> for ImageStore {
	fn from_ref(input: &AppState) -> Self { input.image_store.clone() }
}

/// Bring the database schema up to date
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &DbPool) -> Result<(), Error> {
	let conn = pool.get().await?;

	let applied = conn
		.interact(|conn| {
			conn.run_pending_migrations(MIGRATIONS)
				.map(|versions| versions.len())
		})
		.await?
		.map_err(InternalServerError::MigrationError)?;

	info!("applied {applied} pending migrations");

	Ok(())
}
