use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use common::{DbConn, Error};
use image_record::{ImageRecord, NewImageRecord};
use uuid::Uuid;

/// Header the drawing canvas puts in front of its base64 payload
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Decode a base64 encoded PNG, with or without its data URI header
pub fn decode_data_uri(payload: &str) -> Result<Vec<u8>, Error> {
	let encoded = payload.strip_prefix(DATA_URI_PREFIX).unwrap_or(payload);

	let bytes = STANDARD.decode(encoded.trim())?;

	if bytes.is_empty() {
		return Err(Error::InvalidImage("image payload is empty".to_string()));
	}

	Ok(bytes)
}

/// Directory on local disk holding the submitted drawings
///
/// Files are addressed publicly as `{url_prefix}/{filename}`
#[derive(Clone, Debug)]
pub struct ImageStore {
	root:       PathBuf,
	url_prefix: String,
}

impl ImageStore {
	#[must_use]
	pub fn new(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
		let url_prefix = url_prefix.trim_end_matches('/').to_string();

		Self { root: root.into(), url_prefix }
	}

	/// The directory files are written to
	#[must_use]
	pub fn root(&self) -> &Path { &self.root }

	/// The public path prefix files are served under
	#[must_use]
	pub fn url_prefix(&self) -> &str { &self.url_prefix }

	/// Generate a new filename for a drawing submitted at the given time
	///
	/// The random suffix keeps submissions made within the same second apart
	#[must_use]
	pub fn generate_filename(now: DateTime<Utc>) -> String {
		format!(
			"{}_{}.png",
			now.format("%Y%m%d_%H%M%S"),
			Uuid::new_v4().simple()
		)
	}

	/// Generate both an absolute and public filepath for a new image
	///
	/// The absolute path is used for writing to disk, the public path is
	/// stored in the database and used by the pages
	pub fn generate_filepaths(&self) -> Result<(PathBuf, String), Error> {
		let filename = Self::generate_filename(Utc::now());

		let abs_filepath = self.root.join(&filename);
		let public_filepath = format!("{}/{filename}", self.url_prefix);

		std::fs::create_dir_all(&self.root)?;

		Ok((abs_filepath, public_filepath))
	}

	/// Map a public path back onto a file in this store
	///
	/// Returns [`None`] for paths that do not point directly into the store
	#[must_use]
	pub fn resolve(&self, public_path: &str) -> Option<PathBuf> {
		let name = public_path
			.strip_prefix(self.url_prefix.as_str())?
			.strip_prefix('/')?;

		if name.is_empty()
			|| name.contains('/')
			|| name.contains('\\')
			|| name == "."
			|| name == ".."
		{
			return None;
		}

		Some(self.root.join(name))
	}

	/// Remove the file behind the given public path, if it lives in this
	/// store
	pub fn remove(&self, public_path: &str) -> Result<(), Error> {
		let Some(filepath) = self.resolve(public_path) else {
			debug!("not removing {public_path}, it is outside the image store");

			return Ok(());
		};

		match std::fs::remove_file(&filepath) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => {
				warn!("image file {} was already gone", filepath.display());

				Ok(())
			},
			Err(e) => Err(e.into()),
		}
	}
}

/// Decode a submitted drawing, write it to the image store and record it as
/// unapproved
///
/// The file is removed again if the record can not be inserted
#[instrument(skip(store, payload, conn))]
pub async fn store_submission(
	store: &ImageStore,
	payload: &str,
	nickname: String,
	conn: &DbConn,
) -> Result<ImageRecord, Error> {
	let bytes = decode_data_uri(payload)?;

	let (abs_filepath, public_filepath) = store.generate_filepaths()?;
	save_image_file(&abs_filepath, &bytes)?;

	let new_record = NewImageRecord::submission(public_filepath, nickname);

	match new_record.insert(conn).await {
		Ok(record) => {
			info!("stored submission {} at {}", record.id, record.filename);

			Ok(record)
		},
		Err(e) => {
			if let Err(rm_err) = std::fs::remove_file(&abs_filepath) {
				warn!(
					"could not clean up {} -- {rm_err:?}",
					abs_filepath.display()
				);
			}

			Err(e)
		},
	}
}

/// Delete an image from the database, and from disk storage once no other
/// record references its file
pub async fn delete_image(
	id: i32,
	store: &ImageStore,
	conn: &DbConn,
) -> Result<ImageRecord, Error> {
	// Delete the image record before the file to prevent dangling
	let (record, references) = ImageRecord::delete_by_id(id, conn).await?;

	if references > 0 {
		debug!("keeping {}, still used by {references} rows", record.filename);
	} else {
		store.remove(&record.filename)?;
	}

	Ok(record)
}

/// Save raw image bytes to a file
fn save_image_file(path: &Path, bytes: &[u8]) -> Result<(), Error> {
	let mut file = BufWriter::new(File::create(path)?);

	file.write_all(bytes)?;
	file.flush()?;

	Ok(())
}
