//! Database model for submitted drawings

#[macro_use]
extern crate tracing;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::image;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A single stored drawing and its moderation state
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = image)]
#[diesel(check_for_backend(Pg))]
pub struct ImageRecord {
	pub id:         i32,
	pub filename:   String,
	pub nickname:   String,
	pub created_at: NaiveDateTime,
	pub status:     bool,
}

/// Optional filters for listing [`ImageRecord`]s
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct ImageRecordFilter {
	#[serde(default)]
	pub status: Option<bool>,
}

impl ImageRecordFilter {
	/// Only match approved images
	#[must_use]
	pub fn approved() -> Self { Self { status: Some(true) } }
}

impl ImageRecord {
	/// Get a single [`ImageRecord`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(img_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let record = conn
			.interact(move |conn| {
				use self::image::dsl::*;

				image
					.find(img_id)
					.select(ImageRecord::as_select())
					.first(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound(format!("image with id {img_id}")))?;

		Ok(record)
	}

	/// Get all [`ImageRecord`]s matching the filter, most recent first
	///
	/// Records created at the same instant are ordered by descending id
	#[instrument(skip(conn))]
	pub async fn get_latest(
		filter: ImageRecordFilter,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let records = conn
			.interact(move |conn| {
				use self::image::dsl::*;

				let mut query =
					image.select(ImageRecord::as_select()).into_boxed();

				if let Some(approved) = filter.status {
					query = query.filter(status.eq(approved));
				}

				query.order((created_at.desc(), id.desc())).load(conn)
			})
			.await??;

		Ok(records)
	}

	/// Get all approved [`ImageRecord`]s, most recent first
	pub async fn get_approved(conn: &DbConn) -> Result<Vec<Self>, Error> {
		Self::get_latest(ImageRecordFilter::approved(), conn).await
	}

	/// Get all [`ImageRecord`]s matching the filter in insertion order
	#[instrument(skip(conn))]
	pub async fn get_all(
		filter: ImageRecordFilter,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let records = conn
			.interact(move |conn| {
				use self::image::dsl::*;

				let mut query =
					image.select(ImageRecord::as_select()).into_boxed();

				if let Some(approved) = filter.status {
					query = query.filter(status.eq(approved));
				}

				query.order(id.asc()).load(conn)
			})
			.await??;

		Ok(records)
	}

	/// Set the approval flag of the [`ImageRecord`] with the given id
	#[instrument(skip(conn))]
	pub async fn set_status(
		img_id: i32,
		approved: bool,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let update =
			ImageRecordUpdate { status: Some(approved), ..Default::default() };

		update.apply_to(img_id, conn).await
	}

	/// Delete an [`ImageRecord`] given its id
	///
	/// Returns the deleted row along with the number of rows that still
	/// reference its filename afterwards
	#[instrument(skip(conn))]
	pub async fn delete_by_id(
		img_id: i32,
		conn: &DbConn,
	) -> Result<(Self, i64), Error> {
		let (record, references) = conn
			.interact(move |conn| {
				use self::image::dsl::*;

				conn.transaction::<_, diesel::result::Error, _>(|conn| {
					let Some(record) = diesel::delete(image.find(img_id))
						.returning(ImageRecord::as_returning())
						.get_result(conn)
						.optional()?
					else {
						return Ok(None);
					};

					let references = image
						.filter(filename.eq(&record.filename))
						.count()
						.get_result::<i64>(conn)?;

					Ok(Some((record, references)))
				})
			})
			.await??
			.ok_or_else(|| Error::NotFound(format!("image with id {img_id}")))?;

		info!("deleted image record {img_id}");

		Ok((record, references))
	}
}

/// A new [`ImageRecord`] to be inserted
///
/// Leaving `created_at` empty lets the database fill in the current time
#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = image)]
#[diesel(check_for_backend(Pg))]
pub struct NewImageRecord {
	pub filename:   String,
	pub nickname:   String,
	pub status:     bool,
	pub created_at: Option<NaiveDateTime>,
}

impl NewImageRecord {
	/// An unapproved record for a freshly submitted drawing
	#[must_use]
	pub fn submission(filename: String, nickname: String) -> Self {
		Self { filename, nickname, status: false, created_at: None }
	}

	/// Insert this [`NewImageRecord`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<ImageRecord, Error> {
		let record = conn
			.interact(move |conn| {
				use self::image::dsl::*;

				diesel::insert_into(image)
					.values(self)
					.returning(ImageRecord::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created image record {}", record.id);

		Ok(record)
	}
}

/// A partial update to an [`ImageRecord`], unset fields are left untouched
#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = image)]
#[diesel(check_for_backend(Pg))]
pub struct ImageRecordUpdate {
	pub filename:   Option<String>,
	pub nickname:   Option<String>,
	pub created_at: Option<NaiveDateTime>,
	pub status:     Option<bool>,
}

impl ImageRecordUpdate {
	fn is_empty(&self) -> bool {
		self.filename.is_none()
			&& self.nickname.is_none()
			&& self.created_at.is_none()
			&& self.status.is_none()
	}

	/// Apply this update to the [`ImageRecord`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		img_id: i32,
		conn: &DbConn,
	) -> Result<ImageRecord, Error> {
		// Diesel refuses to build an UPDATE without any assignments
		if self.is_empty() {
			return ImageRecord::get_by_id(img_id, conn).await;
		}

		let record = conn
			.interact(move |conn| {
				use self::image::dsl::*;

				diesel::update(image.find(img_id))
					.set(self)
					.returning(ImageRecord::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound(format!("image with id {img_id}")))?;

		info!("updated image record {img_id}");

		Ok(record)
	}
}
